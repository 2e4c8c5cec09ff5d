use std::collections::HashMap;

/// Lookup table from lowercase trade-search phrase to stat identifier.
///
/// Phrases are normalized to lowercase on insertion; lookups expect
/// already-lowercased text.
#[derive(Debug, Clone, Default)]
pub struct TradeVocabulary {
    phrases: HashMap<String, String>,
}

impl TradeVocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, phrase: impl AsRef<str>, stat_id: impl Into<String>) {
        self.phrases
            .insert(phrase.as_ref().to_lowercase(), stat_id.into());
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.contains_key(phrase)
    }

    pub fn stat_id(&self, phrase: &str) -> Option<&str> {
        self.phrases.get(phrase).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.phrases
            .iter()
            .map(|(phrase, stat_id)| (phrase.as_str(), stat_id.as_str()))
    }
}

impl From<HashMap<String, String>> for TradeVocabulary {
    fn from(phrases: HashMap<String, String>) -> Self {
        phrases.into_iter().collect()
    }
}

impl<P: AsRef<str>, S: Into<String>> FromIterator<(P, S)> for TradeVocabulary {
    fn from_iter<I: IntoIterator<Item = (P, S)>>(iter: I) -> Self {
        let mut vocabulary = Self::new();
        for (phrase, stat_id) in iter {
            vocabulary.insert(phrase, stat_id);
        }
        vocabulary
    }
}
