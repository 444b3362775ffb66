//! Commands that summarize the selected transactions: `sum`, `group`, `months` and `buckets`.

use crate::args::{BucketsArgs, GroupArgs, SelectArgs};
use crate::commands::{select, Out};
use crate::model::{display_amount, Record};
use crate::query::{bucketize_by_amount, group_by, group_by_month, sum_amounts};
use crate::{import, Config};
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

/// One line of a report: a label, how many transactions it covers and their total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    label: String,
    count: usize,
    total: f64,
}

impl Summary {
    fn of<I, R>(label: impl Into<String>, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Record,
    {
        let records: Vec<R> = records.into_iter().collect();
        Ok(Self {
            label: label.into(),
            count: records.len(),
            total: sum_amounts(&records)?,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

/// Lays out summaries as aligned columns.
fn render(rows: &[Summary]) -> String {
    let width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    let amounts: Vec<String> = rows.iter().map(|r| display_amount(r.total)).collect();
    let amount_width = amounts.iter().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (row, amount) in rows.iter().zip(&amounts) {
        let _ = writeln!(
            out,
            "{:<width$}  {:>6}  {:>amount_width$}",
            row.label, row.count, amount
        );
    }
    out.trim_end().to_string()
}

/// Prints the total amount of the selected transactions.
pub fn sum(config: &Config, args: &SelectArgs) -> Result<Out<Summary>> {
    let records = import::read_input(args.input())?;
    let selected = select(&records, config, args)?;
    let summary = Summary::of("Total", &selected)?;
    let message = format!(
        "{} transactions totalling {}",
        summary.count,
        display_amount(summary.total)
    );
    let amount = display_amount(summary.total);
    Ok(Out::new(message, summary).with_stdout(amount))
}

/// Prints the count and total of the selected transactions for each value of `--key`, in the
/// order the values first appear.
pub fn group(config: &Config, args: &GroupArgs) -> Result<Out<Vec<Summary>>> {
    let records = import::read_input(args.select().input())?;
    let selected = select(&records, config, args.select())?;
    let groups = group_by(selected, args.key())?;
    let rows = groups
        .iter()
        .map(|(key, members)| Summary::of(key.as_str(), members))
        .collect::<Result<Vec<_>>>()?;
    let message = format!("{} groups by '{}'", rows.len(), args.key());
    let text = render(&rows);
    Ok(Out::new(message, rows).with_stdout(text))
}

/// Prints the count and total of the selected transactions for each calendar month, in the order
/// the months first appear.
pub fn months(config: &Config, args: &SelectArgs) -> Result<Out<Vec<Summary>>> {
    let records = import::read_input(args.input())?;
    let selected = select(&records, config, args)?;
    let groups = group_by_month(selected)?;
    let rows = groups
        .iter()
        .map(|(month, members)| Summary::of(month.to_string(), members))
        .collect::<Result<Vec<_>>>()?;
    let message = format!("{} months", rows.len());
    let text = render(&rows);
    Ok(Out::new(message, rows).with_stdout(text))
}

/// Prints the count and total of the selected transactions for each amount range.
pub fn buckets(config: &Config, args: &BucketsArgs) -> Result<Out<Vec<Summary>>> {
    let records = import::read_input(args.select().input())?;
    let selected = select(&records, config, args.select())?;
    let bins = bucketize_by_amount(selected, args.edges())?;
    let rows = bins
        .iter()
        .map(|(interval, members)| Summary::of(interval.to_string(), members))
        .collect::<Result<Vec<_>>>()?;
    let message = format!("{} amount ranges", rows.len());
    let text = render(&rows);
    Ok(Out::new(message, rows).with_stdout(text))
}
