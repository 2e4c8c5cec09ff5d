use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::affix::resolve::ResolutionWarning;

/// Canonical record for one concrete affix string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAffix {
    /// Whether this concrete string is the canonical form of its group.
    pub display: bool,
    /// The concrete affix text, all placeholders expanded.
    pub text: String,
    /// Trade-search phrase the group resolved to, if any.
    pub trade_phrase: Option<String>,
    /// Vocabulary stat identifier for `trade_phrase`, if mapped.
    pub trade_stat_id: Option<String>,
    /// Representative numeric value (single roll, or the mean of a range).
    pub trade_value: Option<f64>,
}

/// Immutable mapping from concrete affix string to [`ResolvedAffix`].
///
/// Entries keep insertion order (group order, then variant order within each
/// group); overwriting an existing key replaces the entry in place. Mutation
/// is crate-private and only happens while the engine builds the table, so
/// the sorted views can be cached on first access.
#[derive(Debug, Clone, Default)]
pub struct ResolvedAffixTable {
    entries: Vec<ResolvedAffix>,
    index: HashMap<String, usize>,
    warnings: Vec<ResolutionWarning>,
    texts_cache: OnceLock<Vec<String>>,
    display_cache: OnceLock<Vec<String>>,
}

impl ResolvedAffixTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any existing entry with the same text.
    /// Returns the replaced entry.
    pub(crate) fn insert(&mut self, affix: ResolvedAffix) -> Option<ResolvedAffix> {
        if let Some(&slot) = self.index.get(&affix.text) {
            Some(std::mem::replace(&mut self.entries[slot], affix))
        } else {
            self.index.insert(affix.text.clone(), self.entries.len());
            self.entries.push(affix);
            None
        }
    }

    /// Force the display flag for a known concrete string. Returns false if
    /// the string is not in the table.
    pub(crate) fn set_display(&mut self, text: &str, display: bool) -> bool {
        match self.index.get(text) {
            Some(&slot) => {
                self.entries[slot].display = display;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_warnings(&mut self, warnings: Vec<ResolutionWarning>) {
        self.warnings = warnings;
    }

    pub fn get(&self, text: &str) -> Option<&ResolvedAffix> {
        self.index.get(text).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, text: &str) -> bool {
        self.index.contains_key(text)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedAffix> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recoverable conditions recorded while the table was built.
    pub fn warnings(&self) -> &[ResolutionWarning] {
        &self.warnings
    }

    /// All concrete affix strings, sorted. Computed on first access and
    /// cached for the lifetime of the table.
    pub fn texts(&self) -> &[String] {
        self.texts_cache.get_or_init(|| {
            let mut texts: Vec<String> =
                self.entries.iter().map(|entry| entry.text.clone()).collect();
            texts.sort();
            texts
        })
    }

    /// Concrete affix strings with the display flag set, sorted. Computed on
    /// first access and cached for the lifetime of the table.
    pub fn display_texts(&self) -> &[String] {
        self.display_cache.get_or_init(|| {
            let mut texts: Vec<String> = self
                .entries
                .iter()
                .filter(|entry| entry.display)
                .map(|entry| entry.text.clone())
                .collect();
            texts.sort();
            texts
        })
    }
}
