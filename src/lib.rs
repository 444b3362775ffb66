//! Converting, filtering, grouping and summarizing Mint transaction exports.
//!
//! Records are read from CSV with [`import`], selected and summarized with the operations in
//! [`query`], and written back out as JSON with [`export`]. The `mint` binary wraps these in a
//! command line interface, see [`args`] and [`commands`].

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod export;
mod fs;
pub mod import;
pub mod model;
pub mod query;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};

#[cfg(test)]
mod test;
