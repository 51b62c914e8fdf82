use alloc::string::String;

use sklon_protocol::{
    AgreementSlot, Case, DeclensionFlags, Gender, NounProperties, PreparedProperties, PronounDeclension, WordClass,
};
use tracing::trace;

use crate::buffer::InflectionBuffer;
use crate::{alternation, endings, stress, Paradigm};

/// Declines an adjectival pronoun ("мой", "один", "третий") in agreement
/// with a noun of `properties`.
pub fn decline(
    stem: &str,
    declension: &PronounDeclension,
    properties: NounProperties,
    case: Case,
    plural: bool,
) -> String {
    if declension.is_zero() {
        return String::from(stem);
    }
    inflect(stem, &Paradigm::from(declension), &properties.prepare(case, plural))
}

pub(crate) fn inflect(stem: &str, paradigm: &Paradigm, props: &PreparedProperties) -> String {
    let stressed = stress::is_pronoun_ending_stressed(paradigm.stress.main, props);
    let mut buffer = InflectionBuffer::new(stem);
    buffer.append_to_ending(endings::pronoun_ending(props, paradigm.stem_type, stressed));

    let bare_masculine = props.slot() == AgreementSlot::Masculine && props.is_nominative_normalized();
    if paradigm.has(DeclensionFlags::STAR) && !bare_masculine {
        alternation::drop_fleeting_vowel(&mut buffer, paradigm.stem_type, Gender::Masculine, WordClass::Pronoun);
    }
    trace!(stem, case = ?props.case, slot = ?props.slot(), form = %buffer, "pronoun");
    buffer.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use sklon_protocol::Stress;

    fn pronoun(stem_type: u8, stress: Stress, flags: DeclensionFlags) -> PronounDeclension {
        PronounDeclension::new(stem_type, stress, flags).unwrap()
    }

    fn column(stem: &str, declension: &PronounDeclension, properties: NounProperties, plural: bool) -> Vec<String> {
        Case::PRIMARY.iter().map(|&case| decline(stem, declension, properties, case, plural)).collect()
    }

    #[test]
    fn test_odin() {
        let one = pronoun(1, Stress::B, DeclensionFlags::STAR);
        let masculine = NounProperties::new(Gender::Masculine, false);
        assert_eq!(column("один", &one, masculine, false), ["один", "одного", "одному", "один", "одним", "одном"]);

        let feminine = NounProperties::new(Gender::Feminine, true);
        assert_eq!(column("один", &one, feminine, false), ["одна", "одной", "одной", "одну", "одной", "одной"]);

        let neuter = NounProperties::new(Gender::Neuter, false);
        assert_eq!(decline("один", &one, neuter, Case::Accusative, false), "одно");
        assert_eq!(decline("один", &one, masculine, Case::Nominative, true), "одни");

        let animate = NounProperties::new(Gender::Masculine, true);
        assert_eq!(decline("один", &one, animate, Case::Accusative, false), "одного");
        assert_eq!(decline("один", &one, animate, Case::Accusative, true), "одних");
    }

    #[test]
    fn test_tretij() {
        let third = pronoun(6, Stress::A, DeclensionFlags::STAR);
        let masculine = NounProperties::new(Gender::Masculine, false);
        assert_eq!(
            column("трети", &third, masculine, false),
            ["третий", "третьего", "третьему", "третий", "третьим", "третьем"]
        );
        let feminine = NounProperties::new(Gender::Feminine, false);
        assert_eq!(decline("трети", &third, feminine, Case::Accusative, false), "третью");
        assert_eq!(decline("трети", &third, masculine, Case::Genitive, true), "третьих");
    }

    #[test]
    fn test_moj_and_chej() {
        let mine = pronoun(6, Stress::B, DeclensionFlags::empty());
        let neuter = NounProperties::new(Gender::Neuter, false);
        assert_eq!(decline("мо", &mine, neuter, Case::Nominative, false), "моё");
        assert_eq!(decline("мо", &mine, neuter, Case::Prepositional, false), "моём");
        assert_eq!(decline("мо", &mine, neuter, Case::Genitive, true), "моих");

        let whose = pronoun(6, Stress::B, DeclensionFlags::STAR);
        let masculine = NounProperties::new(Gender::Masculine, false);
        assert_eq!(decline("че", &whose, masculine, Case::Nominative, false), "чей");
        assert_eq!(decline("че", &whose, masculine, Case::Genitive, false), "чьего");
        assert_eq!(decline("че", &whose, NounProperties::new(Gender::Feminine, false), Case::Nominative, false), "чья");
    }

    #[test]
    fn test_nash() {
        let ours = pronoun(4, Stress::A, DeclensionFlags::empty());
        let feminine = NounProperties::new(Gender::Feminine, false);
        assert_eq!(column("наш", &ours, feminine, false), ["наша", "нашей", "нашей", "нашу", "нашей", "нашей"]);
        assert_eq!(decline("наш", &ours, feminine, Case::Instrumental, true), "нашими");
    }
}
