use core::fmt;

use alloc::string::ToString;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::DeclensionError;
use crate::grammar::WordClass;

/// Zaliznyak's stress letters: a-f, their primed variants and the two
/// double-primed schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Stress {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "0"))]
    Zero = 0,
    #[cfg_attr(feature = "serde", serde(rename = "a"))]
    A = 1,
    #[cfg_attr(feature = "serde", serde(rename = "b"))]
    B = 2,
    #[cfg_attr(feature = "serde", serde(rename = "c"))]
    C = 3,
    #[cfg_attr(feature = "serde", serde(rename = "d"))]
    D = 4,
    #[cfg_attr(feature = "serde", serde(rename = "e"))]
    E = 5,
    #[cfg_attr(feature = "serde", serde(rename = "f"))]
    F = 6,
    #[cfg_attr(feature = "serde", serde(rename = "a'"))]
    APrime = 7,
    #[cfg_attr(feature = "serde", serde(rename = "b'"))]
    BPrime = 8,
    #[cfg_attr(feature = "serde", serde(rename = "c'"))]
    CPrime = 9,
    #[cfg_attr(feature = "serde", serde(rename = "d'"))]
    DPrime = 10,
    #[cfg_attr(feature = "serde", serde(rename = "e'"))]
    EPrime = 11,
    #[cfg_attr(feature = "serde", serde(rename = "f'"))]
    FPrime = 12,
    #[cfg_attr(feature = "serde", serde(rename = "c''"))]
    CDoublePrime = 13,
    #[cfg_attr(feature = "serde", serde(rename = "f''"))]
    FDoublePrime = 14,
}

impl Stress {
    /// The letter with its primes stripped.
    pub const fn unprimed(self) -> Stress {
        match self {
            Stress::APrime => Stress::A,
            Stress::BPrime => Stress::B,
            Stress::CPrime | Stress::CDoublePrime => Stress::C,
            Stress::DPrime => Stress::D,
            Stress::EPrime => Stress::E,
            Stress::FPrime | Stress::FDoublePrime => Stress::F,
            other => other,
        }
    }

    pub const fn primes(self) -> u8 {
        match self {
            Stress::Zero | Stress::A | Stress::B | Stress::C | Stress::D | Stress::E | Stress::F => 0,
            Stress::CDoublePrime | Stress::FDoublePrime => 2,
            _ => 1,
        }
    }

    pub const fn letter(self) -> char {
        match self.unprimed() {
            Stress::A => 'a',
            Stress::B => 'b',
            Stress::C => 'c',
            Stress::D => 'd',
            Stress::E => 'e',
            Stress::F => 'f',
            _ => '0',
        }
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Stress::Zero)
    }
}

impl fmt::Display for Stress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        for _ in 0..self.primes() {
            f.write_str("'")?;
        }
        Ok(())
    }
}

/// A (main, alternate) pair of stress letters.
///
/// Nouns and pronouns use only `main`. Adjectives keep the full form in
/// `main` and the short form in `alt`; verbs keep the present tense in `main`
/// and the past tense in `alt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct StressPattern {
    pub main: Stress,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alt: Stress,
}

impl From<Stress> for StressPattern {
    fn from(main: Stress) -> Self {
        StressPattern::new(main, Stress::Zero)
    }
}

impl From<(Stress, Stress)> for StressPattern {
    fn from((main, alt): (Stress, Stress)) -> Self {
        StressPattern::new(main, alt)
    }
}

impl StressPattern {
    pub const fn new(main: Stress, alt: Stress) -> Self {
        Self { main, alt }
    }

    pub fn normalize_for_noun(self) -> Result<StressPattern, DeclensionError> {
        use Stress::*;
        let valid = matches!(self.main, Zero | A | B | C | D | E | F | BPrime | DPrime | FPrime | FDoublePrime);
        if !valid || !self.alt.is_zero() {
            return Err(self.invalid_for(WordClass::Noun));
        }
        Ok(self)
    }

    pub fn normalize_for_pronoun(self) -> Result<StressPattern, DeclensionError> {
        use Stress::*;
        if !matches!(self.main, Zero | A | B | F) || !self.alt.is_zero() {
            return Err(self.invalid_for(WordClass::Pronoun));
        }
        Ok(self)
    }

    /// Validates an adjective pattern. An unset `alt` is derived from `main`:
    /// "a'" becomes a/a', "b" becomes b/b.
    pub fn normalize_for_adjective(self) -> Result<StressPattern, DeclensionError> {
        use Stress::*;
        let mut pattern = self;
        if pattern.alt.is_zero() {
            if pattern.main.is_zero() {
                return Ok(pattern);
            }
            pattern.alt = pattern.main;
            pattern.main = pattern.main.unprimed();
        }
        let valid_main = matches!(pattern.main, A | B);
        let valid_alt = matches!(pattern.alt, A | B | C | APrime | BPrime | CPrime | CDoublePrime);
        if !valid_main || !valid_alt {
            return Err(self.invalid_for(WordClass::Adjective));
        }
        Ok(pattern)
    }

    pub fn normalize_for_verb(self) -> Result<StressPattern, DeclensionError> {
        use Stress::*;
        let mut pattern = self;
        if pattern.alt.is_zero() {
            pattern.alt = pattern.main;
        }
        let valid_main = matches!(pattern.main, Zero | A | B | C | CPrime);
        let valid_alt = matches!(pattern.alt, Zero | A | B | C | CPrime | CDoublePrime);
        if !valid_main || !valid_alt || pattern.main.is_zero() != pattern.alt.is_zero() {
            return Err(self.invalid_for(WordClass::Verb));
        }
        Ok(pattern)
    }

    fn invalid_for(self, class: WordClass) -> DeclensionError {
        DeclensionError::InvalidStress { class, pattern: self.to_string() }
    }
}

impl fmt::Display for StressPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.main)?;
        if !self.alt.is_zero() {
            write!(f, "/{}", self.alt)?;
        }
        Ok(())
    }
}
