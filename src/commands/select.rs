//! Choosing transactions with presets, `--where` predicates and a date range.

use crate::args::{FilterArgs, SelectArgs};
use crate::commands::Out;
use crate::model::RawRecord;
use crate::query::{filter_all, DateRange, MatchMode, Predicate};
use crate::{export, import, Config};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Applies the selection described by `args` to `records`.
///
/// The predicates of every named preset and every `--where` predicate are combined with one mode,
/// then the date range is applied. The date bounds are checked before any record is.
pub fn select<'a>(
    records: &'a [RawRecord],
    config: &Config,
    args: &SelectArgs,
) -> Result<Vec<&'a RawRecord>> {
    let range = DateRange::parse(args.start(), args.end()).context("Invalid date range")?;
    let (predicates, mode) = resolve_predicates(config, args)?;
    debug!(
        "Selecting with {} predicates combined with '{mode}' between {} and {}",
        predicates.len(),
        range.start(),
        range.end()
    );
    let matched = filter_all(records, &predicates, mode)?;
    Ok(range.filter(matched)?)
}

fn resolve_predicates(config: &Config, args: &SelectArgs) -> Result<(Vec<Predicate>, MatchMode)> {
    let mut predicates = Vec::new();
    let mut preset_modes = Vec::new();
    for name in args.presets() {
        let preset = config.preset(name)?;
        predicates.extend_from_slice(preset.predicates());
        preset_modes.push((name.as_str(), preset.mode()));
    }
    predicates.extend_from_slice(args.predicates());

    let mode = match (args.mode(), preset_modes.first()) {
        (Some(mode), _) => mode,
        (None, None) => MatchMode::default(),
        (None, Some(&(first_name, first_mode))) => {
            if let Some((name, mode)) = preset_modes.iter().find(|(_, m)| *m != first_mode) {
                bail!(
                    "Preset '{first_name}' uses mode '{first_mode}' but preset '{name}' uses \
                    mode '{mode}', choose one with --mode"
                )
            }
            first_mode
        }
    };
    Ok((predicates, mode))
}

/// What `mint filter` did.
#[derive(Debug, Clone, Serialize)]
pub struct FilterSummary {
    read: usize,
    selected: usize,
    output: Option<PathBuf>,
}

/// Selects transactions and writes them as JSON, either to `--output` or to stdout.
pub fn filter(config: &Config, args: &FilterArgs) -> Result<Out<FilterSummary>> {
    let records = import::read_input(args.select().input())?;
    let selected = select(&records, config, args.select())?;
    let summary = FilterSummary {
        read: records.len(),
        selected: selected.len(),
        output: None,
    };

    match args.output() {
        Some(path) => {
            let written = export::write_json_file(path, &selected)?;
            let message = format!(
                "Wrote {} of {} transactions to {}",
                selected.len(),
                records.len(),
                written.display()
            );
            Ok(Out::new(
                message,
                FilterSummary {
                    output: Some(written),
                    ..summary
                },
            ))
        }
        None => {
            let json = export::to_json_string(&selected)?;
            let message = format!("Selected {} of {} transactions", selected.len(), records.len());
            Ok(Out::new(message, summary).with_stdout(json))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ACCOUNT_NAME, AMOUNT, CATEGORY};
    use crate::test::{sample_records, SAMPLE_CSV};
    use tempfile::TempDir;

    fn amounts(records: &[&RawRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.get(AMOUNT).unwrap().to_string())
            .collect()
    }

    fn select_sample(args: SelectArgs) -> Result<Vec<String>> {
        let records = sample_records();
        let config = Config::builtin("config.json");
        Ok(amounts(&select(&records, &config, &args)?))
    }

    #[test]
    fn test_no_criteria_selects_everything() {
        let selected = select_sample(SelectArgs::new("unused.csv")).unwrap();
        assert_eq!(selected.len(), 5);
    }

    #[test]
    fn test_preset_mode() {
        let args = SelectArgs::new("unused.csv").with_preset("food");
        assert_eq!(select_sample(args).unwrap(), vec!["4.50", "87.12", "25.00"]);
    }

    #[test]
    fn test_where_and_preset() {
        // food is "any", so the extra predicate widens the selection
        let args = SelectArgs::new("unused.csv")
            .with_preset("food")
            .with_predicate(Predicate::new(CATEGORY, "Paycheck"));
        assert_eq!(
            select_sample(args).unwrap(),
            vec!["4.50", "87.12", "25.00", "2500.00"]
        );
    }

    #[test]
    fn test_explicit_mode_overrides_preset() {
        let args = SelectArgs::new("unused.csv")
            .with_preset("food")
            .with_predicate(Predicate::new(ACCOUNT_NAME, "Venmo"))
            .with_mode(MatchMode::All);
        assert!(select_sample(args).unwrap().is_empty());
    }

    #[test]
    fn test_where_defaults_to_all() {
        let args = SelectArgs::new("unused.csv")
            .with_predicate(Predicate::new(ACCOUNT_NAME, "Checking"))
            .with_predicate(Predicate::new(CATEGORY, "Groceries"));
        assert_eq!(select_sample(args).unwrap(), vec!["87.12"]);
    }

    #[test]
    fn test_date_range() {
        let args = SelectArgs::new("unused.csv").with_range(Some("01/20/2020"), Some("02/01/2020"));
        assert_eq!(select_sample(args).unwrap(), vec!["87.12", "1500.00"]);
    }

    #[test]
    fn test_bad_date_bound() {
        let args = SelectArgs::new("unused.csv").with_range(Some("2020-01-01"), None);
        let e = select_sample(args).unwrap_err();
        assert!(e.to_string().contains("Invalid date range"));
    }

    #[test]
    fn test_unknown_preset() {
        let args = SelectArgs::new("unused.csv").with_preset("nope");
        assert!(select_sample(args).is_err());
    }

    #[test]
    fn test_conflicting_preset_modes() {
        let args = SelectArgs::new("unused.csv")
            .with_preset("food")
            .with_preset("credit-card");
        let e = select_sample(args).unwrap_err();
        assert!(e.to_string().contains("choose one with --mode"));

        let args = SelectArgs::new("unused.csv")
            .with_preset("food")
            .with_preset("credit-card")
            .with_mode(MatchMode::Any);
        assert_eq!(select_sample(args).unwrap(), vec!["4.50", "87.12", "25.00"]);
    }

    #[test]
    fn test_filter_to_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("transactions.csv");
        std::fs::write(&input, SAMPLE_CSV).unwrap();
        let args = FilterArgs::new(
            SelectArgs::new(&input).with_preset("cash-and-venmo"),
            Some(dir.path().join("venmo")),
        );
        let out = filter(&Config::builtin("config.json"), &args).unwrap();
        assert!(out.stdout().is_none());
        assert!(out.message().starts_with("Wrote 1 of 5 transactions"));

        let written = std::fs::read_to_string(dir.path().join("venmo.json")).unwrap();
        let back: Vec<RawRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].get(ACCOUNT_NAME), Some("Venmo"));
    }

    #[test]
    fn test_filter_to_stdout() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("transactions.csv");
        std::fs::write(&input, SAMPLE_CSV).unwrap();
        let args = FilterArgs::new(
            SelectArgs::new(&input).with_predicate(Predicate::new(CATEGORY, "Nothing")),
            None,
        );
        let out = filter(&Config::builtin("config.json"), &args).unwrap();
        assert_eq!(out.stdout(), Some("[]"));
        assert_eq!(out.message(), "Selected 0 of 5 transactions");
    }
}
