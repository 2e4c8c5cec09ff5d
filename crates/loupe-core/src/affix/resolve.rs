//! Resolution of raw affix groups against the trade vocabulary.
//!
//! Resolution is a single-shot, deterministic pass over the loaded data:
//!
//! - **Match selection**: per group, find the first variant whose lowercased
//!   text (exact, slotted, or hash-only form) is a known trade phrase.
//! - **Concrete expansion**: render every variant of every group into its
//!   concrete affix string, marking only the matched variant for display.
//! - **Overrides**: force the display flag for hand-maintained corrections.
//!
//! Inputs are borrowed immutably and never modified; the returned table is
//! immutable and safe to share across threads. Recoverable conditions are
//! recorded as [`ResolutionWarning`] values on the table and mirrored through
//! `tracing`; corrupt input data aborts with a descriptive error instead.

use std::fmt;

use tracing::warn;

use crate::affix::group::{AffixGroup, AffixVariant};
use crate::affix::overrides::{DisplayOverride, builtin_overrides};
use crate::affix::table::{ResolvedAffix, ResolvedAffixTable};
use crate::affix::template;
use crate::error::{Error, Result};
use crate::trade::TradeVocabulary;

/// Recoverable condition recorded while building a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionWarning {
    /// No variant of the group matched the trade vocabulary.
    UnmatchedGroup {
        group: usize,
        templates: Vec<String>,
    },
    /// Two variants expanded to the same concrete string; the later entry
    /// replaced the earlier one.
    KeyCollision { text: String },
    /// An override named a concrete string that is not in the table.
    UnknownOverride { text: String },
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedGroup { group, templates } => {
                write!(f, "no trade phrase found for group {group}: {templates:?}")
            }
            Self::KeyCollision { text } => {
                write!(f, "duplicate concrete affix `{text}`, later entry kept")
            }
            Self::UnknownOverride { text } => {
                write!(f, "display override for unknown affix `{text}`")
            }
        }
    }
}

struct GroupMatch {
    /// The exact candidate string that matched, not the raw template.
    phrase: String,
    variant: usize,
}

/// Resolve affix groups against the vocabulary, applying the builtin display
/// overrides.
pub fn resolve(groups: &[AffixGroup], vocabulary: &TradeVocabulary) -> Result<ResolvedAffixTable> {
    resolve_with_overrides(groups, vocabulary, &builtin_overrides())
}

/// Resolve affix groups against the vocabulary with an explicit override
/// list.
pub fn resolve_with_overrides(
    groups: &[AffixGroup],
    vocabulary: &TradeVocabulary,
    overrides: &[DisplayOverride],
) -> Result<ResolvedAffixTable> {
    let mut table = ResolvedAffixTable::new();
    let mut warnings = Vec::new();

    for (group_index, group) in groups.iter().enumerate() {
        let matched = match_group(group, vocabulary)?;
        if matched.is_none() {
            let warning = ResolutionWarning::UnmatchedGroup {
                group: group_index,
                templates: group
                    .variants
                    .iter()
                    .map(|variant| variant.template.clone())
                    .collect(),
            };
            warn!("{warning}");
            warnings.push(warning);
        }

        let phrase = matched.as_ref().map(|m| m.phrase.clone());
        let stat_id = phrase
            .as_deref()
            .and_then(|p| vocabulary.stat_id(p))
            .map(str::to_string);
        let matched_variant = matched.as_ref().map(|m| m.variant);

        for (variant_index, variant) in group.variants.iter().enumerate() {
            let display = matched_variant == Some(variant_index);
            let resolved =
                expand_variant(group_index, variant, display, phrase.clone(), stat_id.clone())?;
            if let Some(previous) = table.insert(resolved) {
                let warning = ResolutionWarning::KeyCollision {
                    text: previous.text,
                };
                warn!("{warning}");
                warnings.push(warning);
            }
        }
    }

    for correction in overrides {
        if !table.set_display(&correction.text, correction.display) {
            let warning = ResolutionWarning::UnknownOverride {
                text: correction.text.clone(),
            };
            warn!("{warning}");
            warnings.push(warning);
        }
    }

    table.set_warnings(warnings);
    Ok(table)
}

fn match_group(group: &AffixGroup, vocabulary: &TradeVocabulary) -> Result<Option<GroupMatch>> {
    for (variant_index, variant) in group.variants.iter().enumerate() {
        if let Some(phrase) = match_variant(variant, vocabulary)? {
            return Ok(Some(GroupMatch {
                phrase,
                variant: variant_index,
            }));
        }
    }
    Ok(None)
}

/// Test progressively looser candidates against the vocabulary: exact text
/// for plain variants, then the slotted form, then the hash-only form.
fn match_variant(variant: &AffixVariant, vocabulary: &TradeVocabulary) -> Result<Option<String>> {
    if !variant.is_templated() {
        let candidate = variant.template.to_lowercase();
        return Ok(vocabulary.contains(&candidate).then_some(candidate));
    }

    let slotted = template::expand(&variant.template, &variant.slot_patterns)?.to_lowercase();
    if vocabulary.contains(&slotted) {
        return Ok(Some(slotted));
    }

    let hashes = vec!["#"; variant.placeholder_count()];
    let hash_only = template::expand(&variant.template, &hashes)?.to_lowercase();
    Ok(vocabulary.contains(&hash_only).then_some(hash_only))
}

fn expand_variant(
    group: usize,
    variant: &AffixVariant,
    display: bool,
    trade_phrase: Option<String>,
    trade_stat_id: Option<String>,
) -> Result<ResolvedAffix> {
    if !variant.is_templated() {
        return Ok(ResolvedAffix {
            display,
            text: variant.template.clone(),
            trade_phrase,
            trade_stat_id,
            trade_value: None,
        });
    }

    // Slot substitution rewrites `#` inside the patterns; a bare `#` in the
    // template itself would be swallowed by that rewrite.
    if variant.template.contains('#') {
        return Err(Error::MarkerInTemplate {
            group,
            template: variant.template.clone(),
        });
    }

    let trade_value = match variant.value_range[..] {
        [value] => value as f64,
        [low, high] => (low + high) as f64 / 2.0,
        _ => {
            return Err(Error::InvalidValueRange {
                group,
                template: variant.template.clone(),
                values: variant.value_range.clone(),
            });
        }
    };

    // Each slot renders its own value; the mean is only the representative
    // search value.
    let slot_values: Vec<String> = variant
        .slot_patterns
        .iter()
        .zip(&variant.value_range)
        .map(|(pattern, value)| pattern.replace('#', &value.to_string()))
        .collect();
    let text = template::expand(&variant.template, &slot_values)?;

    Ok(ResolvedAffix {
        display,
        text,
        trade_phrase,
        trade_stat_id,
        trade_value: Some(trade_value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary(entries: &[(&str, &str)]) -> TradeVocabulary {
        entries.iter().copied().collect()
    }

    fn variant(template: &str, patterns: &[&str], values: &[i64]) -> AffixVariant {
        AffixVariant::new(
            template,
            patterns.iter().map(|p| p.to_string()).collect(),
            values.to_vec(),
        )
    }

    fn group(variants: Vec<AffixVariant>) -> AffixGroup {
        AffixGroup::new(variants)
    }

    #[test]
    fn test_plain_variant_matches_exact_lowercased_text() {
        let vocab = vocabulary(&[("fireball always ignites", "enchant.ignite")]);
        let groups = vec![group(vec![AffixVariant::plain("Fireball Always Ignites")])];

        let table = resolve_with_overrides(&groups, &vocab, &[]).unwrap();
        let affix = table.get("Fireball Always Ignites").unwrap();
        assert!(affix.display);
        assert_eq!(affix.trade_phrase.as_deref(), Some("fireball always ignites"));
        assert_eq!(affix.trade_stat_id.as_deref(), Some("enchant.ignite"));
        assert_eq!(affix.trade_value, None);
    }

    #[test]
    fn test_slotted_form_matches_before_hash_only() {
        // both the slotted and hash-only forms are known phrases; the
        // slotted one must win
        let vocab = vocabulary(&[
            ("+#% chance to dodge", "stat.dodge_plus"),
            ("# chance to dodge", "stat.dodge"),
        ]);
        let groups = vec![group(vec![variant("{0} chance to Dodge", &["+#%"], &[4])])];

        let table = resolve_with_overrides(&groups, &vocab, &[]).unwrap();
        let affix = table.get("+4% chance to Dodge").unwrap();
        assert_eq!(affix.trade_phrase.as_deref(), Some("+#% chance to dodge"));
        assert_eq!(affix.trade_stat_id.as_deref(), Some("stat.dodge_plus"));
    }

    #[test]
    fn test_hash_only_form_matches_when_slotted_does_not() {
        let vocab = vocabulary(&[("adds # to # fire damage", "stat.fire")]);
        let groups = vec![group(vec![variant(
            "Adds {0} to {1} Fire Damage",
            &["#-#", "#-#"],
            &[5, 10],
        )])];

        let table = resolve_with_overrides(&groups, &vocab, &[]).unwrap();
        // each slot substitutes its own value into its pattern
        let affix = table.get("Adds 5-5 to 10-10 Fire Damage").unwrap();
        assert!(affix.display);
        assert_eq!(affix.trade_phrase.as_deref(), Some("adds # to # fire damage"));
        assert_eq!(affix.trade_stat_id.as_deref(), Some("stat.fire"));
    }

    #[test]
    fn test_first_matching_variant_wins() {
        let vocab = vocabulary(&[
            ("first wording", "stat.first"),
            ("second wording", "stat.second"),
        ]);
        let groups = vec![group(vec![
            AffixVariant::plain("First Wording"),
            AffixVariant::plain("Second Wording"),
        ])];

        let table = resolve_with_overrides(&groups, &vocab, &[]).unwrap();
        assert!(table.get("First Wording").unwrap().display);
        assert!(!table.get("Second Wording").unwrap().display);
        // both carry the phrase of the matched variant
        assert_eq!(
            table.get("Second Wording").unwrap().trade_phrase.as_deref(),
            Some("first wording")
        );
        assert_eq!(table.display_texts().len(), 1);
    }

    #[test]
    fn test_at_most_one_display_per_group() {
        let vocab = vocabulary(&[("#% increased damage", "stat.damage")]);
        let groups = vec![group(vec![
            variant("{0}% increased Damage", &["#"], &[10]),
            variant("{0}% increased Damage taken", &["#"], &[10]),
        ])];

        let table = resolve_with_overrides(&groups, &vocab, &[]).unwrap();
        let displayed: Vec<_> = table.iter().filter(|entry| entry.display).collect();
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].text, "10% increased Damage");
    }

    #[test]
    fn test_unmatched_group_warns_and_expands_anyway() {
        let vocab = vocabulary(&[]);
        let groups = vec![group(vec![
            AffixVariant::plain("Unknown Wording"),
            variant("+{0} to Unknown", &["#"], &[7]),
        ])];

        let table = resolve_with_overrides(&groups, &vocab, &[]).unwrap();
        assert_eq!(table.len(), 2);
        for entry in table.iter() {
            assert!(!entry.display);
            assert_eq!(entry.trade_phrase, None);
            assert_eq!(entry.trade_stat_id, None);
        }
        // the numeric variant still carries its value
        assert_eq!(table.get("+7 to Unknown").unwrap().trade_value, Some(7.0));
        assert_eq!(
            table.warnings(),
            &[ResolutionWarning::UnmatchedGroup {
                group: 0,
                templates: vec!["Unknown Wording".to_string(), "+{0} to Unknown".to_string()],
            }]
        );
    }

    #[test]
    fn test_trade_value_single_and_mean() {
        let vocab = vocabulary(&[]);
        let groups = vec![
            group(vec![variant("+{0}% fixed", &["#"], &[40])]),
            group(vec![variant("+{0}% rolled", &["#-#"], &[10, 20])]),
        ];

        let table = resolve_with_overrides(&groups, &vocab, &[]).unwrap();
        assert_eq!(table.get("+40% fixed").unwrap().trade_value, Some(40.0));
        assert_eq!(table.get("+10-20% rolled").unwrap().trade_value, Some(15.0));
    }

    #[test]
    fn test_per_slot_values_with_mean_trade_value() {
        let vocab = vocabulary(&[]);
        let groups = vec![group(vec![variant(
            "Adds {0} to {1} Fire Damage",
            &["#", "#"],
            &[5, 10],
        )])];

        let table = resolve_with_overrides(&groups, &vocab, &[]).unwrap();
        let affix = table.get("Adds 5 to 10 Fire Damage").unwrap();
        assert_eq!(affix.trade_value, Some(7.5));
    }

    #[test]
    fn test_value_range_length_three_is_rejected() {
        let vocab = vocabulary(&[]);
        let groups = vec![group(vec![variant("+{0}% broken", &["#"], &[1, 2, 3])])];

        let err = resolve_with_overrides(&groups, &vocab, &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValueRange { group: 0, ref values, .. } if values == &[1, 2, 3]
        ));
    }

    #[test]
    fn test_empty_value_range_on_templated_variant_is_rejected() {
        let vocab = vocabulary(&[]);
        let groups = vec![group(vec![variant("+{0}% broken", &["#"], &[])])];

        let err = resolve_with_overrides(&groups, &vocab, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidValueRange { .. }));
    }

    #[test]
    fn test_marker_in_template_is_rejected() {
        let vocab = vocabulary(&[]);
        let groups = vec![group(vec![variant("+{0}% with a # marker", &["#"], &[5])])];

        let err = resolve_with_overrides(&groups, &vocab, &[]).unwrap_err();
        assert!(matches!(err, Error::MarkerInTemplate { group: 0, .. }));
    }

    #[test]
    fn test_overrides_take_precedence() {
        // automatic matching picks the plain wording; the override list
        // forces the templated wording instead
        let vocab = vocabulary(&[("fireball always ignites", "enchant.ignite")]);
        let groups = vec![group(vec![
            AffixVariant::plain("Fireball Always Ignites"),
            variant("Fireball has +{0}% chance to Ignite", &["#"], &[30]),
        ])];

        let table = resolve(&groups, &vocab).unwrap();
        assert!(!table.get("Fireball Always Ignites").unwrap().display);
        assert!(
            table
                .get("Fireball has +30% chance to Ignite")
                .unwrap()
                .display
        );
        assert_eq!(
            table.display_texts(),
            ["Fireball has +30% chance to Ignite"]
        );
    }

    #[test]
    fn test_override_for_unknown_key_is_skipped_with_warning() {
        let vocab = vocabulary(&[]);
        let groups = vec![group(vec![AffixVariant::plain("Present")])];
        let overrides = vec![DisplayOverride::new("Absent", true)];

        let table = resolve_with_overrides(&groups, &vocab, &overrides).unwrap();
        assert!(table.get("Absent").is_none());
        assert!(table.warnings().contains(&ResolutionWarning::UnknownOverride {
            text: "Absent".to_string(),
        }));
    }

    #[test]
    fn test_key_collision_keeps_later_entry_and_warns() {
        let vocab = vocabulary(&[
            ("shared wording", "stat.shared"),
            ("other phrase", "stat.other"),
        ]);
        let groups = vec![
            group(vec![AffixVariant::plain("Shared Wording")]),
            group(vec![
                AffixVariant::plain("Other Phrase"),
                AffixVariant::plain("Shared Wording"),
            ]),
        ];

        let table = resolve_with_overrides(&groups, &vocab, &[]).unwrap();
        assert_eq!(table.len(), 2);
        // the second group's entry replaced the first group's
        let survivor = table.get("Shared Wording").unwrap();
        assert!(!survivor.display);
        assert_eq!(survivor.trade_phrase.as_deref(), Some("other phrase"));
        assert!(table.warnings().contains(&ResolutionWarning::KeyCollision {
            text: "Shared Wording".to_string(),
        }));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let vocab = vocabulary(&[
            ("fireball always ignites", "enchant.ignite"),
            ("+#% chance to dodge", "stat.dodge"),
        ]);
        let groups = vec![
            group(vec![
                AffixVariant::plain("Fireball Always Ignites"),
                variant("Fireball has +{0}% chance to Ignite", &["#"], &[30]),
            ]),
            group(vec![variant("{0} chance to Dodge", &["+#%"], &[3, 5])]),
            group(vec![AffixVariant::plain("Never Matches Anything")]),
        ];

        let first = resolve(&groups, &vocab).unwrap();
        let second = resolve(&groups, &vocab).unwrap();

        assert_eq!(first.len(), second.len());
        for entry in first.iter() {
            assert_eq!(Some(entry), second.get(&entry.text));
        }
        assert_eq!(first.warnings(), second.warnings());
        assert_eq!(first.texts(), second.texts());
        assert_eq!(first.display_texts(), second.display_texts());
    }

    #[test]
    fn test_display_view_is_subset_of_full_view() {
        let vocab = vocabulary(&[("+#% chance to dodge", "stat.dodge")]);
        let groups = vec![
            group(vec![variant("{0} chance to Dodge", &["+#%"], &[4])]),
            group(vec![AffixVariant::plain("Unmatched")]),
        ];

        let table = resolve_with_overrides(&groups, &vocab, &[]).unwrap();
        let display = table.display_texts();
        let all = table.texts();
        assert!(display.iter().all(|text| all.binary_search(text).is_ok()));
        let mut deduped = display.to_vec();
        deduped.dedup();
        assert_eq!(deduped.len(), display.len());
    }
}
