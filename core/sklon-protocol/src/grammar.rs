use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::DeclensionError;

/// Grammatical case, including the three secondary cases that share their
/// endings with a primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Case {
    Nominative = 0,
    Genitive = 1,
    Dative = 2,
    Accusative = 3,
    Instrumental = 4,
    Prepositional = 5,
    /// "чашка чаю"
    Partitive = 6,
    /// "пошёл в солдаты"
    Translative = 7,
    /// "в лесу"
    Locative = 8,
}

impl Case {
    /// The six cases with endings of their own, in paradigm order.
    pub const PRIMARY: [Case; 6] = [
        Case::Nominative,
        Case::Genitive,
        Case::Dative,
        Case::Accusative,
        Case::Instrumental,
        Case::Prepositional,
    ];

    pub const ALL: [Case; 9] = [
        Case::Nominative,
        Case::Genitive,
        Case::Dative,
        Case::Accusative,
        Case::Instrumental,
        Case::Prepositional,
        Case::Partitive,
        Case::Translative,
        Case::Locative,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_secondary(self) -> bool {
        (self as u8) >= 6
    }

    /// Maps a secondary case onto the primary case whose endings it uses.
    pub const fn primary(self) -> Case {
        match self {
            Case::Partitive => Case::Genitive,
            Case::Translative => Case::Nominative,
            Case::Locative => Case::Prepositional,
            other => other,
        }
    }

    /// Short Latin abbreviation ("nom", "gen", ...).
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Case::Nominative => "nom",
            Case::Genitive => "gen",
            Case::Dative => "dat",
            Case::Accusative => "acc",
            Case::Instrumental => "ins",
            Case::Prepositional => "prp",
            Case::Partitive => "par",
            Case::Translative => "trn",
            Case::Locative => "loc",
        }
    }
}

impl TryFrom<u8> for Case {
    type Error = DeclensionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Case::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| DeclensionError::UnknownCase(value.to_string()))
    }
}

impl FromStr for Case {
    type Err = DeclensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let case = match s {
            "nom" | "nominative" | "им" => Case::Nominative,
            "gen" | "genitive" | "род" => Case::Genitive,
            "dat" | "dative" | "дат" => Case::Dative,
            "acc" | "accusative" | "вин" => Case::Accusative,
            "ins" | "instrumental" | "тв" => Case::Instrumental,
            "prp" | "prep" | "prepositional" | "пр" => Case::Prepositional,
            "par" | "partitive" | "парт" => Case::Partitive,
            "trn" | "translative" | "счётн" => Case::Translative,
            "loc" | "locative" | "мест" => Case::Locative,
            _ => return Err(DeclensionError::UnknownCase(s.to_string())),
        };
        Ok(case)
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Gender {
    Masculine = 0,
    Neuter = 1,
    Feminine = 2,
    /// "сирота", "задира": declines like a feminine noun.
    Common = 3,
}

impl Gender {
    /// The gender whose endings a word of this gender takes.
    pub const fn declension_gender(self) -> Gender {
        match self {
            Gender::Common => Gender::Feminine,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Tantum {
    #[default]
    None = 0,
    /// Singulare tantum ("молоко").
    SingularOnly = 1,
    /// Plurale tantum ("ножницы").
    PluralOnly = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum WordClass {
    Noun = 0,
    Adjective = 1,
    Pronoun = 2,
    Verb = 3,
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WordClass::Noun => "noun",
            WordClass::Adjective => "adjective",
            WordClass::Pronoun => "pronoun",
            WordClass::Verb => "verb",
        })
    }
}

/// Which form of a counted noun follows a numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum CountAgreement {
    /// 1, 21, 101: "одна собака"
    Singular = 0,
    /// 2-4, 22-24 (not 12-14): "две собаки"
    Paucal = 1,
    /// 0, 5-20, 25-30: "пять собак"
    Plural = 2,
}

/// Agreement column of an adjective or pronoun: one per singular gender plus
/// the shared plural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum AgreementSlot {
    Masculine = 0,
    Neuter = 1,
    Feminine = 2,
    Plural = 3,
}

impl AgreementSlot {
    pub const ALL: [AgreementSlot; 4] = [
        AgreementSlot::Masculine,
        AgreementSlot::Neuter,
        AgreementSlot::Feminine,
        AgreementSlot::Plural,
    ];

    pub const fn of(gender: Gender, plural: bool) -> AgreementSlot {
        if plural {
            return AgreementSlot::Plural;
        }
        match gender.declension_gender() {
            Gender::Masculine => AgreementSlot::Masculine,
            Gender::Neuter => AgreementSlot::Neuter,
            _ => AgreementSlot::Feminine,
        }
    }
}

/// Lexical grammatical properties of a noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct NounProperties {
    pub gender: Gender,
    pub animate: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tantum: Tantum,
}

impl NounProperties {
    pub const fn new(gender: Gender, animate: bool) -> Self {
        Self { gender, animate, tantum: Tantum::None }
    }

    pub const fn with_tantum(mut self, tantum: Tantum) -> Self {
        self.tantum = tantum;
        self
    }

    /// Resolves the requested case and number into the form the ending
    /// tables are keyed by.
    pub const fn prepare(self, case: Case, plural: bool) -> PreparedProperties {
        let plural = match self.tantum {
            Tantum::SingularOnly => false,
            Tantum::PluralOnly => true,
            Tantum::None => plural || matches!(case, Case::Translative),
        };
        PreparedProperties {
            gender: self.gender,
            animate: self.animate,
            plural,
            case: case.primary(),
        }
    }
}

/// [`NounProperties`] prepared for one declension call: number resolved,
/// case reduced to one of the six primary cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreparedProperties {
    pub gender: Gender,
    pub animate: bool,
    pub plural: bool,
    pub case: Case,
}

impl PreparedProperties {
    /// Nominative, or an accusative that takes the nominative form.
    pub const fn is_nominative_normalized(&self) -> bool {
        match self.case {
            Case::Nominative => true,
            Case::Accusative => !self.animate,
            _ => false,
        }
    }

    /// Genitive, or an accusative that takes the genitive form.
    pub const fn is_genitive_normalized(&self) -> bool {
        match self.case {
            Case::Genitive => true,
            Case::Accusative => self.animate,
            _ => false,
        }
    }

    /// The case an accusative ending is borrowed from.
    pub const fn accusative_source(&self) -> Case {
        if self.animate {
            Case::Genitive
        } else {
            Case::Nominative
        }
    }

    pub const fn slot(&self) -> AgreementSlot {
        AgreementSlot::of(self.gender, self.plural)
    }

    pub const fn with_case(mut self, case: Case) -> Self {
        self.case = case;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secondary_cases_normalize() {
        let props = NounProperties::new(Gender::Masculine, false);

        let partitive = props.prepare(Case::Partitive, false);
        assert_eq!(partitive.case, Case::Genitive);
        assert!(!partitive.plural);

        let translative = props.prepare(Case::Translative, false);
        assert_eq!(translative.case, Case::Nominative);
        assert!(translative.plural);

        assert_eq!(props.prepare(Case::Locative, true).case, Case::Prepositional);
    }

    #[test]
    fn test_tantum_overrides_number() {
        let scissors = NounProperties::new(Gender::Feminine, false).with_tantum(Tantum::PluralOnly);
        assert!(scissors.prepare(Case::Dative, false).plural);

        let milk = NounProperties::new(Gender::Neuter, false).with_tantum(Tantum::SingularOnly);
        assert!(!milk.prepare(Case::Dative, true).plural);
        assert!(!milk.prepare(Case::Translative, false).plural);
    }

    #[test]
    fn test_normalized_accusative() {
        let cat = NounProperties::new(Gender::Masculine, true).prepare(Case::Accusative, false);
        assert!(cat.is_genitive_normalized());
        assert!(!cat.is_nominative_normalized());

        let table = NounProperties::new(Gender::Masculine, false).prepare(Case::Accusative, false);
        assert!(table.is_nominative_normalized());
        assert!(!table.is_genitive_normalized());
    }

    #[test]
    fn test_case_parsing() {
        assert_eq!("gen".parse::<Case>(), Ok(Case::Genitive));
        assert_eq!("тв".parse::<Case>(), Ok(Case::Instrumental));
        assert!("vocative".parse::<Case>().is_err());
        assert_eq!(Case::try_from(8u8), Ok(Case::Locative));
        assert!(Case::try_from(9u8).is_err());
    }

    #[test]
    fn test_common_gender_slot() {
        assert_eq!(AgreementSlot::of(Gender::Common, false), AgreementSlot::Feminine);
        assert_eq!(AgreementSlot::of(Gender::Neuter, true), AgreementSlot::Plural);
    }
}
