use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use loupe_core::ItemSlot;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod input;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "loupe")]
#[command(about = "Item affix resolver for the trade-search overlay")]
struct Args {
    /// Raw affix data file (slot name -> affix groups)
    #[arg(short, long, default_value = "data/mods.json")]
    mods: PathBuf,

    /// Trade vocabulary file (phrase -> stat id)
    #[arg(short, long, default_value = "data/trade_stats.json")]
    vocabulary: PathBuf,

    /// Equipment slot to resolve
    #[arg(short, long, default_value = "helmet")]
    slot: String,

    /// List every concrete affix, not just the display ones
    #[arg(long)]
    all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("loupe_core=info".parse()?)
                .add_directive("loupe_cli=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let slot: ItemSlot = args
        .slot
        .parse()
        .map_err(|_| anyhow!("unknown equipment slot `{}`", args.slot))?;

    let mods = input::load_raw_mods(&args.mods)?;
    let vocabulary = input::load_vocabulary(&args.vocabulary)?;
    info!(
        "loaded {} slot(s) from {} and {} trade phrases from {}",
        mods.len(),
        args.mods.display(),
        vocabulary.len(),
        args.vocabulary.display()
    );

    let groups = mods
        .get(&slot)
        .with_context(|| format!("no affix data for slot `{slot}`"))?;

    let table = loupe_core::resolve(groups, &vocabulary)?;
    info!(
        "resolved {} concrete affixes for `{slot}` ({} display)",
        table.len(),
        table.display_texts().len()
    );
    for warning in table.warnings() {
        warn!("{warning}");
    }

    match args.format {
        OutputFormat::Text => output::print_text(&table, args.all),
        OutputFormat::Json => println!("{}", output::to_json(&table, args.all)?),
        OutputFormat::Tsv => print!("{}", output::to_tsv(&table, args.all)),
    }

    Ok(())
}
