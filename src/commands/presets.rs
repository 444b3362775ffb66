use crate::commands::Out;
use crate::query::PredicateSet;
use crate::Config;
use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Lists the presets in the catalog, one per line, e.g.
/// `food (any): Category=Coffee Shops, Category=Groceries`.
pub fn presets(config: &Config) -> Result<Out<BTreeMap<String, PredicateSet>>> {
    let mut text = String::new();
    for (name, preset) in config.presets() {
        let predicates: Vec<String> = preset
            .predicates()
            .iter()
            .map(|p| format!("{}={}", p.field(), p.expected()))
            .collect();
        let _ = writeln!(text, "{name} ({}): {}", preset.mode(), predicates.join(", "));
    }
    let source = if config.loaded_from_file() {
        format!("from {}", config.path().display())
    } else {
        "built in".to_string()
    };
    let message = format!("{} presets, {source}", config.presets().len());
    Ok(Out::new(message, config.presets().clone()).with_stdout(text.trim_end()))
}
