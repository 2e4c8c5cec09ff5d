//! # loupe-core
//!
//! Core library for the Loupe item-affix overlay helper.
//!
//! This crate provides:
//! - Raw affix data structures (`AffixGroup`, `AffixVariant`, `ItemSlot`)
//! - The trade vocabulary lookup table (`TradeVocabulary`)
//! - The resolution engine mapping every concrete affix string onto its
//!   trade-search phrase, stat identifier and representative value
//!
//! The engine is pure and synchronous. Callers load the raw affix data and
//! the vocabulary however they like, call [`resolve`] once per equipment
//! slot, and share the resulting immutable [`ResolvedAffixTable`] with any
//! number of readers. Refreshing the data means resolving again from new
//! snapshots; the table itself is never updated in place.

pub mod affix;
pub mod error;
pub mod trade;

pub use affix::{
    AffixGroup, AffixVariant, DisplayOverride, ItemSlot, ResolutionWarning, ResolvedAffix,
    ResolvedAffixTable, builtin_overrides, resolve, resolve_with_overrides,
};
pub use error::{Error, Result};
pub use trade::TradeVocabulary;
