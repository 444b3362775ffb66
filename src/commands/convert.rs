use crate::args::ConvertArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::{export, import};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct Converted {
    records: usize,
    output: PathBuf,
}

/// Reads a Mint CSV export and writes it as a JSON array.
///
/// With `--normalize` each record is converted to a `Transaction` first, and the first record
/// with a bad `Date` or `Amount` fails the whole conversion before anything is written.
pub fn convert(args: &ConvertArgs) -> Result<Out<Converted>> {
    let records = import::read_input(args.input())?;
    let output = if args.normalize() {
        let transactions = records
            .iter()
            .enumerate()
            .map(|(ix, record)| {
                Transaction::normalize(record)
                    .with_context(|| format!("Unable to normalize transaction {}", ix + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("Normalized {} transactions", transactions.len());
        export::write_json_file(args.output(), &transactions)?
    } else {
        export::write_json_file(args.output(), &records)?
    };

    Ok(Out::new(
        format!(
            "Converted {} transactions from {} to {}",
            records.len(),
            args.input().display(),
            output.display()
        ),
        Converted {
            records: records.len(),
            output,
        },
    ))
}
