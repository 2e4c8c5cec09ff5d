//! Raw data file loading.
//!
//! The affix data file maps lowercase slot names to affix groups; each group
//! is a list of `[template, slot_patterns, value_range]` triples. The
//! vocabulary file is a flat JSON object from trade phrase to stat
//! identifier.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use loupe_core::{AffixGroup, AffixVariant, ItemSlot, TradeVocabulary};
use tracing::warn;

type RawVariant = (String, Vec<String>, Vec<i64>);

/// Load the raw affix data file. Slots the library does not know are skipped
/// with a warning rather than failing the whole load.
pub fn load_raw_mods(path: &Path) -> Result<HashMap<ItemSlot, Vec<AffixGroup>>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read affix data from {}", path.display()))?;
    let raw: HashMap<String, Vec<Vec<RawVariant>>> = serde_json::from_str(&contents)
        .with_context(|| format!("malformed affix data in {}", path.display()))?;

    let mut mods = HashMap::new();
    for (slot_name, groups) in raw {
        let Ok(slot) = slot_name.parse::<ItemSlot>() else {
            warn!("skipping unknown equipment slot `{slot_name}` in {}", path.display());
            continue;
        };
        mods.insert(slot, groups.into_iter().map(into_group).collect());
    }
    Ok(mods)
}

fn into_group(variants: Vec<RawVariant>) -> AffixGroup {
    AffixGroup::new(
        variants
            .into_iter()
            .map(|(template, slot_patterns, value_range)| {
                AffixVariant::new(template, slot_patterns, value_range)
            })
            .collect(),
    )
}

/// Load the trade vocabulary file. Phrases are lowercased on the way in.
pub fn load_vocabulary(path: &Path) -> Result<TradeVocabulary> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read trade vocabulary from {}", path.display()))?;
    let raw: HashMap<String, String> = serde_json::from_str(&contents)
        .with_context(|| format!("malformed trade vocabulary in {}", path.display()))?;
    Ok(TradeVocabulary::from(raw))
}
