use alloc::string::String;

use thiserror::Error;

use crate::grammar::WordClass;

/// Validation failures raised while building declension descriptors or
/// loading lexicons.
///
/// These are the only errors a caller is expected to handle. Inconsistencies
/// found while a word is being declined are not errors: they mean the
/// descriptor does not belong to the stem, and the engine panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclensionError {
    #[error("stem type {stem_type} is not valid for a {class} declension")]
    InvalidStemType { class: WordClass, stem_type: u8 },

    #[error("stress pattern '{pattern}' is not valid for a {class}")]
    InvalidStress { class: WordClass, pattern: String },

    #[error("flags {flags} are not valid for a {class} declension")]
    InvalidFlags { class: WordClass, flags: String },

    #[error("a {lexeme} cannot be declined with a {variant} declension")]
    UnsupportedDeclension { lexeme: WordClass, variant: WordClass },

    #[error("the stem of a declinable {0} is empty")]
    EmptyStem(WordClass),

    #[error("anomaly keys of a {0} are not sorted")]
    UnsortedAnomalies(WordClass),

    #[error("unknown case '{0}'")]
    UnknownCase(String),
}
