use serde::{Deserialize, Serialize};

use crate::affix::template;

/// One textual rendering of an affix.
///
/// `template` may contain positional placeholders (`{0}`, `{1}`); each
/// placeholder is rendered through the matching `slot_patterns` entry, whose
/// `#` marks where the numeric value lands (e.g. `+#` or `#-#`).
/// `value_range` holds no values for plain-text variants, one for a fixed
/// roll, or two for a `[min, max]` roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixVariant {
    pub template: String,
    pub slot_patterns: Vec<String>,
    pub value_range: Vec<i64>,
}

impl AffixVariant {
    pub fn new(
        template: impl Into<String>,
        slot_patterns: Vec<String>,
        value_range: Vec<i64>,
    ) -> Self {
        Self {
            template: template.into(),
            slot_patterns,
            value_range,
        }
    }

    /// Plain-text variant constructor (no placeholders, no values).
    pub fn plain(template: impl Into<String>) -> Self {
        Self::new(template, Vec::new(), Vec::new())
    }

    pub fn placeholder_count(&self) -> usize {
        template::placeholder_count(&self.template)
    }

    pub fn is_templated(&self) -> bool {
        self.placeholder_count() > 0
    }
}

/// Ordered alternate renderings of one logical affix.
///
/// Variant order is significant: the first variant whose text matches the
/// trade vocabulary becomes the group's canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixGroup {
    pub variants: Vec<AffixVariant>,
}

impl AffixGroup {
    pub fn new(variants: Vec<AffixVariant>) -> Self {
        Self { variants }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl From<Vec<AffixVariant>> for AffixGroup {
    fn from(variants: Vec<AffixVariant>) -> Self {
        Self::new(variants)
    }
}
