use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("group {group}: variant `{template}` has an unexpected number of values: {values:?}")]
    InvalidValueRange {
        group: usize,
        template: String,
        values: Vec<i64>,
    },

    #[error("group {group}: variant `{template}` contains a literal `#` outside its slot patterns")]
    MarkerInTemplate { group: usize, template: String },

    #[error("template `{template}` has an unterminated placeholder")]
    UnterminatedPlaceholder { template: String },

    #[error("template `{template}` has a malformed placeholder index `{index}`")]
    MalformedPlaceholder { template: String, index: String },

    #[error("template `{template}` references slot {index} but only {available} slot values were supplied")]
    MissingSlotValue {
        template: String,
        index: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
