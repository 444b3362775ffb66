//! Shared test utilities for building transaction records.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{RawRecord, MINT_HEADERS};

/// A small Mint export, header row first, in the same shape Mint produces.
pub const SAMPLE_CSV: &str = r#""Date","Description","Original Description","Amount","Transaction Type","Category","Account Name","Labels","Notes"
"01/15/2020","Starbucks","STARBUCKS STORE 00123","4.50","debit","Coffee Shops","Credit Card","",""
"01/20/2020","Whole Foods","WHOLEFDS SEA 10234","87.12","debit","Groceries","Checking","",""
"02/01/2020","Rent","ONLINE TRANSFER 8812","1500.00","debit","Mortgage & Rent","Checking","home",""
"02/03/2020","Venmo","VENMO PAYMENT","25.00","debit","Restaurants","Venmo","","dinner, split"
"03/10/2020","Paycheck","ACME CORP PAYROLL","2500.00","credit","Paycheck","Checking","",""
"#;

/// Builds a Mint record from nine values given in `MINT_HEADERS` order.
pub fn mint_record(values: [&str; 9]) -> RawRecord {
    RawRecord::zip(MINT_HEADERS, values)
}

/// Builds a Mint record where only the fields most tests care about are interesting.
pub fn raw(date: &str, amount: &str, category: &str, account: &str) -> RawRecord {
    mint_record([
        date,
        "Description",
        "ORIGINAL DESCRIPTION",
        amount,
        "debit",
        category,
        account,
        "",
        "",
    ])
}

/// Records that differ only in amount.
pub fn with_amounts(amounts: &[&str]) -> Vec<RawRecord> {
    amounts
        .iter()
        .map(|amount| raw("01/01/2020", amount, "Misc", "Checking"))
        .collect()
}

/// The records of `SAMPLE_CSV`.
pub fn sample_records() -> Vec<RawRecord> {
    crate::import::parse_records(SAMPLE_CSV.as_bytes()).unwrap()
}
