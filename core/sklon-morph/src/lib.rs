//! Declension engine for Russian nouns, adjectives, pronouns and numerals,
//! driven by Zaliznyak-style descriptors from `sklon-protocol`.
#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::string::String;

use sklon_protocol::{
    AdjectiveDeclension, Case, Declension, DeclensionFlags, NounDeclension, NounProperties, PronounDeclension, Stress,
    StressPattern,
};

pub mod adjective;
mod alternation;
pub mod buffer;
pub mod endings;
mod letters;
pub mod lexeme;
pub mod noun;
pub mod numeral;
pub mod pronoun;
pub mod stress;

pub use buffer::InflectionBuffer;
pub use lexeme::{adjective_form, comparative_form, noun_form, pronoun_form, pronoun_form_agreeing, short_form};
pub use numeral::{agreement, cardinal, count_form, count_phrase, ordinal};

/// Stem type, stress and flags: the part of a descriptor the engines read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Paradigm {
    pub(crate) stem_type: u8,
    pub(crate) stress: StressPattern,
    pub(crate) flags: DeclensionFlags,
}

impl Paradigm {
    pub(crate) const fn new(stem_type: u8, stress: Stress, flags: DeclensionFlags) -> Self {
        Self { stem_type, stress: StressPattern::new(stress, Stress::Zero), flags }
    }

    pub(crate) const fn has(&self, flag: DeclensionFlags) -> bool {
        self.flags.contains(flag)
    }
}

impl From<&NounDeclension> for Paradigm {
    fn from(d: &NounDeclension) -> Self {
        Paradigm::new(d.stem_type(), d.stress(), d.flags())
    }
}

impl From<&AdjectiveDeclension> for Paradigm {
    fn from(d: &AdjectiveDeclension) -> Self {
        Self { stem_type: d.stem_type(), stress: d.stress(), flags: d.flags() }
    }
}

impl From<&PronounDeclension> for Paradigm {
    fn from(d: &PronounDeclension) -> Self {
        Paradigm::new(d.stem_type(), d.stress(), d.flags())
    }
}

/// Declines `stem` with a descriptor of any class. Adjective and pronoun
/// descriptors agree with a noun of `properties`.
pub fn decline(stem: &str, declension: &Declension, properties: NounProperties, case: Case, plural: bool) -> String {
    match declension {
        Declension::Noun(d) => noun::decline(stem, d, properties, case, plural),
        Declension::Adjective(d) => adjective::decline(stem, d, properties, case, plural),
        Declension::Pronoun(d) => pronoun::decline(stem, d, properties, case, plural),
    }
}
