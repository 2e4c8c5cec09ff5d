use serde::{Deserialize, Serialize};

/// Hand-maintained display correction applied after automatic matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOverride {
    /// Exact concrete affix string to correct.
    pub text: String,
    /// Display flag to force for that string.
    pub display: bool,
}

impl DisplayOverride {
    pub fn new(text: impl Into<String>, display: bool) -> Self {
        Self {
            text: text.into(),
            display,
        }
    }
}

/// Corrections for affixes whose automatic match picks the wrong wording.
///
/// The matcher cannot tell certain near-duplicate affixes apart; entries are
/// added here as mismatches are reported.
pub fn builtin_overrides() -> Vec<DisplayOverride> {
    vec![
        DisplayOverride::new("Fireball Always Ignites", false),
        DisplayOverride::new("Fireball has +30% chance to Ignite", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_overrides_pair_fireball_wordings() {
        let overrides = builtin_overrides();
        assert!(overrides.contains(&DisplayOverride::new("Fireball Always Ignites", false)));
        assert!(overrides.contains(&DisplayOverride::new(
            "Fireball has +30% chance to Ignite",
            true
        )));
    }
}
