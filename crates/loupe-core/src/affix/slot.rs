use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Equipment slot whose affix pool is being resolved.
///
/// Raw data files key their affix groups by lowercase slot name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemSlot {
    Helmet,
    Gloves,
    Boots,
}

impl ItemSlot {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
