use alloc::format;

use bitflags::bitflags;
use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::DeclensionError;
use crate::grammar::{NounProperties, WordClass};
use crate::stress::{Stress, StressPattern};

bitflags! {
    /// Alternation marks of a declension descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct DeclensionFlags: u8 {
        /// `*`: fleeting vowel.
        const STAR = 1;
        /// `°`: unique stem alternation (крестьянин, утёнок, время).
        const CIRCLE = 2;
        /// `①`: irregular nominative plural; for adjectives, a doubled н
        /// dropped in the masculine short form.
        const CIRCLED_ONE = 4;
        /// `②`: irregular genitive plural; for adjectives, a doubled н
        /// dropped in every short form.
        const CIRCLED_TWO = 8;
        /// `③`: stressed -е in the prepositional singular of stem type 7.
        const CIRCLED_THREE = 16;
        /// `ё`: alternating е/ё in the stem.
        const ALTERNATING_YO = 32;
    }
}

bitflags! {
    /// Short-form availability marks of an adjective.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AdjectiveFlags: u8 {
        /// `—`: no short forms at all.
        const MINUS = 1;
        /// `✕`: every short form is difficult to form.
        const CROSS = 2;
        /// `⌧`: the masculine short form is difficult to form.
        const BOXED_CROSS = 4;
    }
}

// rkyv support for the flag sets: archived as their raw bits.
macro_rules! archive_flags {
    ($name:ident, $bits:ty) => {
        impl Archive for $name {
            type Archived = $bits;
            type Resolver = ();

            unsafe fn resolve(&self, _pos: usize, _resolver: Self::Resolver, out: *mut Self::Archived) {
                out.write(self.bits());
            }
        }

        impl<S: rkyv::Fallible + ?Sized> Serialize<S> for $name {
            fn serialize(&self, _serializer: &mut S) -> Result<Self::Resolver, S::Error> {
                Ok(())
            }
        }

        impl<D: rkyv::Fallible + ?Sized> Deserialize<$name, D> for $bits {
            fn deserialize(&self, _deserializer: &mut D) -> Result<$name, D::Error> {
                Ok($name::from_bits_truncate(*self))
            }
        }
    };
}

archive_flags!(DeclensionFlags, u8);
archive_flags!(AdjectiveFlags, u8);

impl DeclensionFlags {
    pub const NOUN: DeclensionFlags = DeclensionFlags::all();
    pub const ADJECTIVE: DeclensionFlags = DeclensionFlags::STAR
        .union(DeclensionFlags::CIRCLED_ONE)
        .union(DeclensionFlags::CIRCLED_TWO)
        .union(DeclensionFlags::ALTERNATING_YO);
    pub const PRONOUN: DeclensionFlags = DeclensionFlags::STAR;
}

fn check_stem_type(class: WordClass, stem_type: u8, max: u8) -> Result<(), DeclensionError> {
    if stem_type > max {
        return Err(DeclensionError::InvalidStemType { class, stem_type });
    }
    Ok(())
}

/// Normalizes an adjective pattern. Only the zero declension goes without
/// stress.
fn check_adjective_stress(stem_type: u8, stress: StressPattern) -> Result<StressPattern, DeclensionError> {
    let normalized = stress.normalize_for_adjective()?;
    if normalized.main.is_zero() && stem_type != 0 {
        return Err(DeclensionError::InvalidStress {
            class: WordClass::Adjective,
            pattern: alloc::string::ToString::to_string(&stress),
        });
    }
    Ok(normalized)
}

fn check_flags(class: WordClass, flags: DeclensionFlags, legal: DeclensionFlags) -> Result<(), DeclensionError> {
    if !legal.contains(flags) {
        return Err(DeclensionError::InvalidFlags { class, flags: format!("{:?}", flags.difference(legal)) });
    }
    Ok(())
}

/// Noun declension: stem type 0-8, one stress letter, all alternation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct NounDeclension {
    stem_type: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    stress: Stress,
    #[cfg_attr(feature = "serde", serde(default))]
    flags: DeclensionFlags,
    /// Gender and animacy that select the endings instead of the lexeme's own
    /// ("папа" is masculine but declines like "мама").
    #[cfg_attr(feature = "serde", serde(default))]
    special: Option<NounProperties>,
}

impl NounDeclension {
    /// Indeclinable: every form equals the stem.
    pub const ZERO: NounDeclension =
        NounDeclension { stem_type: 0, stress: Stress::Zero, flags: DeclensionFlags::empty(), special: None };

    pub fn new(
        stem_type: u8,
        stress: impl Into<StressPattern>,
        flags: DeclensionFlags,
    ) -> Result<Self, DeclensionError> {
        check_stem_type(WordClass::Noun, stem_type, 8)?;
        let stress = stress.into().normalize_for_noun()?.main;
        check_flags(WordClass::Noun, flags, DeclensionFlags::NOUN)?;
        Ok(Self { stem_type, stress, flags, special: None })
    }

    pub const fn with_special_properties(mut self, properties: NounProperties) -> Self {
        self.special = Some(properties);
        self
    }

    pub const fn stem_type(&self) -> u8 {
        self.stem_type
    }

    pub const fn stress(&self) -> Stress {
        self.stress
    }

    pub const fn flags(&self) -> DeclensionFlags {
        self.flags
    }

    pub const fn has(&self, flag: DeclensionFlags) -> bool {
        self.flags.contains(flag)
    }

    pub const fn special_properties(&self) -> Option<NounProperties> {
        self.special
    }

    pub const fn is_zero(&self) -> bool {
        self.stem_type == 0
    }

    pub fn set_stem_type(&mut self, stem_type: u8) -> Result<(), DeclensionError> {
        check_stem_type(WordClass::Noun, stem_type, 8)?;
        self.stem_type = stem_type;
        Ok(())
    }

    pub fn set_stress(&mut self, stress: impl Into<StressPattern>) -> Result<(), DeclensionError> {
        self.stress = stress.into().normalize_for_noun()?.main;
        Ok(())
    }

    pub fn set_flags(&mut self, flags: DeclensionFlags) -> Result<(), DeclensionError> {
        check_flags(WordClass::Noun, flags, DeclensionFlags::NOUN)?;
        self.flags = flags;
        Ok(())
    }

    pub fn set_special_properties(&mut self, properties: Option<NounProperties>) {
        self.special = properties;
    }

    /// Re-checks a value that did not come through [`NounDeclension::new`].
    pub fn validate(&self) -> Result<(), DeclensionError> {
        check_stem_type(WordClass::Noun, self.stem_type, 8)?;
        StressPattern::from(self.stress).normalize_for_noun()?;
        check_flags(WordClass::Noun, self.flags, DeclensionFlags::NOUN)
    }
}

/// Adjective declension: stem type 0-7, a full/short stress pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct AdjectiveDeclension {
    stem_type: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    stress: StressPattern,
    #[cfg_attr(feature = "serde", serde(default))]
    flags: DeclensionFlags,
    /// Participles in -ся ("учащийся") keep the particle after the ending.
    #[cfg_attr(feature = "serde", serde(default))]
    reflexive: bool,
}

impl AdjectiveDeclension {
    pub fn new(
        stem_type: u8,
        stress: impl Into<StressPattern>,
        flags: DeclensionFlags,
    ) -> Result<Self, DeclensionError> {
        check_stem_type(WordClass::Adjective, stem_type, 7)?;
        let stress = check_adjective_stress(stem_type, stress.into())?;
        check_flags(WordClass::Adjective, flags, DeclensionFlags::ADJECTIVE)?;
        Ok(Self { stem_type, stress, flags, reflexive: false })
    }

    pub const fn reflexive(mut self) -> Self {
        self.reflexive = true;
        self
    }

    pub const fn stem_type(&self) -> u8 {
        self.stem_type
    }

    pub const fn stress(&self) -> StressPattern {
        self.stress
    }

    pub const fn flags(&self) -> DeclensionFlags {
        self.flags
    }

    pub const fn has(&self, flag: DeclensionFlags) -> bool {
        self.flags.contains(flag)
    }

    pub const fn is_reflexive(&self) -> bool {
        self.reflexive
    }

    pub const fn is_zero(&self) -> bool {
        self.stem_type == 0
    }

    pub fn set_stem_type(&mut self, stem_type: u8) -> Result<(), DeclensionError> {
        check_stem_type(WordClass::Adjective, stem_type, 7)?;
        check_adjective_stress(stem_type, self.stress)?;
        self.stem_type = stem_type;
        Ok(())
    }

    pub fn set_stress(&mut self, stress: impl Into<StressPattern>) -> Result<(), DeclensionError> {
        self.stress = check_adjective_stress(self.stem_type, stress.into())?;
        Ok(())
    }

    pub fn set_flags(&mut self, flags: DeclensionFlags) -> Result<(), DeclensionError> {
        check_flags(WordClass::Adjective, flags, DeclensionFlags::ADJECTIVE)?;
        self.flags = flags;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DeclensionError> {
        check_stem_type(WordClass::Adjective, self.stem_type, 7)?;
        // A stored pattern is already normalized; normalizing it again must
        // not change it.
        let normalized = check_adjective_stress(self.stem_type, self.stress)?;
        if normalized != self.stress {
            return Err(DeclensionError::InvalidStress {
                class: WordClass::Adjective,
                pattern: alloc::string::ToString::to_string(&self.stress),
            });
        }
        check_flags(WordClass::Adjective, self.flags, DeclensionFlags::ADJECTIVE)
    }
}

/// Pronoun declension: stem type 0-7, one stress letter, only the star flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct PronounDeclension {
    stem_type: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    stress: Stress,
    #[cfg_attr(feature = "serde", serde(default))]
    flags: DeclensionFlags,
}

impl PronounDeclension {
    pub fn new(
        stem_type: u8,
        stress: impl Into<StressPattern>,
        flags: DeclensionFlags,
    ) -> Result<Self, DeclensionError> {
        check_stem_type(WordClass::Pronoun, stem_type, 7)?;
        let stress = stress.into().normalize_for_pronoun()?.main;
        check_flags(WordClass::Pronoun, flags, DeclensionFlags::PRONOUN)?;
        Ok(Self { stem_type, stress, flags })
    }

    pub const fn stem_type(&self) -> u8 {
        self.stem_type
    }

    pub const fn stress(&self) -> Stress {
        self.stress
    }

    pub const fn flags(&self) -> DeclensionFlags {
        self.flags
    }

    pub const fn has(&self, flag: DeclensionFlags) -> bool {
        self.flags.contains(flag)
    }

    pub const fn is_zero(&self) -> bool {
        self.stem_type == 0
    }

    pub fn set_stress(&mut self, stress: impl Into<StressPattern>) -> Result<(), DeclensionError> {
        self.stress = stress.into().normalize_for_pronoun()?.main;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), DeclensionError> {
        check_stem_type(WordClass::Pronoun, self.stem_type, 7)?;
        StressPattern::from(self.stress).normalize_for_pronoun()?;
        check_flags(WordClass::Pronoun, self.flags, DeclensionFlags::PRONOUN)
    }
}

/// A declension descriptor of any word class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[archive(check_bytes)]
pub enum Declension {
    Noun(NounDeclension),
    Adjective(AdjectiveDeclension),
    Pronoun(PronounDeclension),
}

impl Declension {
    pub const fn class(&self) -> WordClass {
        match self {
            Declension::Noun(_) => WordClass::Noun,
            Declension::Adjective(_) => WordClass::Adjective,
            Declension::Pronoun(_) => WordClass::Pronoun,
        }
    }

    pub const fn stem_type(&self) -> u8 {
        match self {
            Declension::Noun(d) => d.stem_type(),
            Declension::Adjective(d) => d.stem_type(),
            Declension::Pronoun(d) => d.stem_type(),
        }
    }

    pub const fn flags(&self) -> DeclensionFlags {
        match self {
            Declension::Noun(d) => d.flags(),
            Declension::Adjective(d) => d.flags(),
            Declension::Pronoun(d) => d.flags(),
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.stem_type() == 0
    }

    pub const fn as_noun(&self) -> Option<&NounDeclension> {
        match self {
            Declension::Noun(d) => Some(d),
            _ => None,
        }
    }

    pub const fn as_adjective(&self) -> Option<&AdjectiveDeclension> {
        match self {
            Declension::Adjective(d) => Some(d),
            _ => None,
        }
    }

    pub const fn as_pronoun(&self) -> Option<&PronounDeclension> {
        match self {
            Declension::Pronoun(d) => Some(d),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), DeclensionError> {
        match self {
            Declension::Noun(d) => d.validate(),
            Declension::Adjective(d) => d.validate(),
            Declension::Pronoun(d) => d.validate(),
        }
    }
}

impl From<NounDeclension> for Declension {
    fn from(d: NounDeclension) -> Self {
        Declension::Noun(d)
    }
}

impl From<AdjectiveDeclension> for Declension {
    fn from(d: AdjectiveDeclension) -> Self {
        Declension::Adjective(d)
    }
}

impl From<PronounDeclension> for Declension {
    fn from(d: PronounDeclension) -> Self {
        Declension::Pronoun(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Gender;

    #[test]
    fn test_stem_type_range() {
        assert!(NounDeclension::new(8, Stress::B, DeclensionFlags::empty()).is_ok());
        assert_eq!(
            NounDeclension::new(9, Stress::A, DeclensionFlags::empty()),
            Err(DeclensionError::InvalidStemType { class: WordClass::Noun, stem_type: 9 })
        );
        // 8 is noun-only
        assert!(AdjectiveDeclension::new(8, Stress::A, DeclensionFlags::empty()).is_err());
        assert!(PronounDeclension::new(8, Stress::A, DeclensionFlags::empty()).is_err());
    }

    #[test]
    fn test_adjective_stress_is_required_outside_zero_declension() {
        let unstressed = || AdjectiveDeclension::new(1, Stress::Zero, DeclensionFlags::empty());
        assert_eq!(
            unstressed(),
            Err(DeclensionError::InvalidStress { class: WordClass::Adjective, pattern: "0".into() })
        );
        assert!(AdjectiveDeclension::new(0, Stress::Zero, DeclensionFlags::empty()).is_ok());

        let mut zero = AdjectiveDeclension::new(0, Stress::Zero, DeclensionFlags::empty()).unwrap();
        assert!(zero.set_stem_type(1).is_err());
        assert_eq!(zero.stem_type(), 0);

        let mut regular = AdjectiveDeclension::new(1, Stress::A, DeclensionFlags::empty()).unwrap();
        assert!(regular.set_stress(Stress::Zero).is_err());
        assert_eq!(regular.stress(), StressPattern::new(Stress::A, Stress::A));
        assert!(regular.validate().is_ok());

        // As deserialized from a lexicon that left the stress out.
        let loaded = AdjectiveDeclension {
            stem_type: 1,
            stress: StressPattern::default(),
            flags: DeclensionFlags::empty(),
            reflexive: false,
        };
        assert!(matches!(loaded.validate(), Err(DeclensionError::InvalidStress { .. })));
    }

    #[test]
    fn test_flag_subsets() {
        assert!(NounDeclension::new(1, Stress::A, DeclensionFlags::all()).is_ok());
        assert!(AdjectiveDeclension::new(1, Stress::A, DeclensionFlags::CIRCLE).is_err());
        assert!(PronounDeclension::new(1, Stress::B, DeclensionFlags::STAR).is_ok());
        assert!(matches!(
            PronounDeclension::new(1, Stress::B, DeclensionFlags::ALTERNATING_YO),
            Err(DeclensionError::InvalidFlags { class: WordClass::Pronoun, .. })
        ));
    }

    #[test]
    fn test_narrowing() {
        let noun: Declension = NounDeclension::new(3, Stress::A, DeclensionFlags::empty()).unwrap().into();
        assert!(noun.as_noun().is_some());
        assert!(noun.as_adjective().is_none());
        assert_eq!(noun.class(), WordClass::Noun);
        assert_eq!(noun.stem_type(), 3);
    }

    #[test]
    fn test_structural_equality() {
        let a = NounDeclension::new(1, Stress::A, DeclensionFlags::empty())
            .unwrap()
            .with_special_properties(NounProperties::new(Gender::Feminine, true));
        let b = NounDeclension::new(1, Stress::A, DeclensionFlags::empty())
            .unwrap()
            .with_special_properties(NounProperties::new(Gender::Feminine, true));
        assert_eq!(a, b);
        assert_ne!(a, NounDeclension::new(1, Stress::A, DeclensionFlags::empty()).unwrap());
    }

    #[test]
    fn test_adjective_stores_normalized_pair() {
        let decl = AdjectiveDeclension::new(1, Stress::APrime, DeclensionFlags::STAR).unwrap();
        assert_eq!(decl.stress(), StressPattern::new(Stress::A, Stress::APrime));
        assert!(decl.validate().is_ok());
    }
}
