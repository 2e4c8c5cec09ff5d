//! Resolved table rendering.

use anyhow::Result;
use clap::ValueEnum;
use loupe_core::{ResolvedAffix, ResolvedAffixTable};
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Rows to render, sorted: every entry with `--all`, display entries
/// otherwise.
fn rows<'a>(table: &'a ResolvedAffixTable, all: bool) -> Vec<&'a ResolvedAffix> {
    let texts = if all {
        table.texts()
    } else {
        table.display_texts()
    };
    texts.iter().filter_map(|text| table.get(text)).collect()
}

pub fn print_text(table: &ResolvedAffixTable, all: bool) {
    for affix in rows(table, all) {
        let stat_id = affix.trade_stat_id.as_deref().unwrap_or("-");
        let value = format_value(affix.trade_value);
        if affix.display {
            println!("{}\t{}\t{}", affix.text.green(), stat_id, value);
        } else {
            println!("{}\t{}\t{}", affix.text, stat_id, value);
        }
    }
}

pub fn to_json(table: &ResolvedAffixTable, all: bool) -> Result<String> {
    Ok(serde_json::to_string_pretty(&rows(table, all))?)
}

pub fn to_tsv(table: &ResolvedAffixTable, all: bool) -> String {
    let mut out = format_tsv_header();
    out.push('\n');
    for affix in rows(table, all) {
        out.push_str(&format_tsv_row(affix));
        out.push('\n');
    }
    out
}

fn format_tsv_header() -> String {
    ["Affix", "Display", "Trade Phrase", "Stat ID", "Value"].join("\t")
}

fn format_tsv_row(affix: &ResolvedAffix) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        affix.text,
        affix.display,
        affix.trade_phrase.as_deref().unwrap_or("-"),
        affix.trade_stat_id.as_deref().unwrap_or("-"),
        format_value(affix.trade_value)
    )
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}
