//! Positional template expansion for affix text.
//!
//! Affix templates use `{0}`-style positional placeholders (bare `{}` is
//! accepted and auto-numbered). Game data is hand-authored, so expansion
//! fails loudly on malformed placeholders instead of passing them through.

use crate::error::{Error, Result};

/// Number of placeholders in a template.
pub(crate) fn placeholder_count(template: &str) -> usize {
    template.matches('{').count()
}

/// Substitute each placeholder with the slot value it references.
///
/// Surplus slot values are ignored; a placeholder with no corresponding slot
/// value is an error.
pub(crate) fn expand<S: AsRef<str>>(template: &str, slots: &[S]) -> Result<String> {
    let mut out = String::with_capacity(template.len() + 8);
    let mut remaining = template;
    let mut auto = 0usize;

    while let Some(open) = remaining.find('{') {
        out.push_str(&remaining[..open]);
        let after = &remaining[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| Error::UnterminatedPlaceholder {
                template: template.to_string(),
            })?;
        let body = &after[..close];
        let index = if body.is_empty() {
            let index = auto;
            auto += 1;
            index
        } else {
            body.parse::<usize>()
                .map_err(|_| Error::MalformedPlaceholder {
                    template: template.to_string(),
                    index: body.to_string(),
                })?
        };
        let slot = slots.get(index).ok_or_else(|| Error::MissingSlotValue {
            template: template.to_string(),
            index,
            available: slots.len(),
        })?;
        out.push_str(slot.as_ref());
        remaining = &after[close + 1..];
    }

    out.push_str(remaining);
    Ok(out)
}
