use alloc::string::String;

use sklon_protocol::{
    Case, DeclensionFlags, Gender, NounDeclension, NounProperties, PreparedProperties, Stress, WordClass,
};
use tracing::trace;

use crate::buffer::InflectionBuffer;
use crate::letters::is_hissing;
use crate::{alternation, endings, stress, Paradigm};

/// Declines a noun stem. A declension carrying special properties takes its
/// endings from those instead of the lexeme's own gender and animacy.
pub fn decline(stem: &str, declension: &NounDeclension, properties: NounProperties, case: Case, plural: bool) -> String {
    if declension.is_zero() {
        return String::from(stem);
    }
    let mut props = properties.prepare(case, plural);
    if let Some(special) = declension.special_properties() {
        props.gender = special.gender;
        props.animate = special.animate;
    }
    inflect(stem, &Paradigm::from(declension), &props)
}

pub(crate) fn inflect(stem: &str, paradigm: &Paradigm, props: &PreparedProperties) -> String {
    let stem_type = paradigm.stem_type;
    let gender = props.gender.declension_gender();
    let stressed = stress::is_noun_ending_stressed(paradigm.stress.main, props);

    let mut buffer = InflectionBuffer::new(stem);
    let ending = irregular_ending(paradigm, props, gender, stressed)
        .unwrap_or_else(|| endings::noun_ending(props, stem_type, stressed));
    buffer.append_to_ending(ending);

    if paradigm.has(DeclensionFlags::CIRCLE) {
        alternation::alternate_unique(&mut buffer, paradigm, props, gender);
    }

    // ночь → ночам
    if stem_type == 8 && buffer.ending_starts_with('я') && buffer.last_stem_char().is_some_and(is_hissing) {
        buffer.replace_ending_char(0, 'а');
    }

    if paradigm.has(DeclensionFlags::STAR) {
        if gender == Gender::Masculine || (gender == Gender::Feminine && stem_type == 8) {
            let keeps_stem = !props.plural
                && (props.is_nominative_normalized()
                    || (gender == Gender::Feminine
                        && matches!(props.case, Case::Accusative | Case::Instrumental)));
            if !keeps_stem {
                alternation::drop_fleeting_vowel(&mut buffer, stem_type, gender, WordClass::Noun);
            }
        } else if props.plural && props.is_genitive_normalized() && !keeps_closed_stem(paradigm) {
            alternation::insert_fleeting_vowel(&mut buffer, stressed);
        }
    }

    if paradigm.has(DeclensionFlags::ALTERNATING_YO) {
        let first = props.plural && !stressed && paradigm.stress.main.unprimed() == Stress::F;
        alternation::alternate_yo(&mut buffer, stressed, first);
    }

    trace!(stem, case = ?props.case, plural = props.plural, form = %buffer, "noun");
    buffer.into()
}

/// Soft stems with stress on the genitive plural ending, and stems with an
/// irregular genitive plural, keep their closed cluster ("ступней").
fn keeps_closed_stem(paradigm: &Paradigm) -> bool {
    let ending_stressed = matches!(paradigm.stress.main.unprimed(), Stress::B | Stress::F);
    (paradigm.stem_type == 2 && ending_stressed) || paradigm.has(DeclensionFlags::CIRCLED_TWO)
}

/// Endings replaced by the circled-digit marks.
fn irregular_ending(paradigm: &Paradigm, props: &PreparedProperties, gender: Gender, stressed: bool) -> Option<&'static str> {
    let stem_type = paradigm.stem_type;
    if props.plural {
        if paradigm.has(DeclensionFlags::CIRCLED_ONE) && props.is_nominative_normalized() {
            // глаза, учителя; плечи, яблоки
            return match gender {
                Gender::Masculine => Some(if matches!(stem_type, 2 | 6 | 7 | 8) { "я" } else { "а" }),
                Gender::Neuter => Some(if matches!(stem_type, 1 | 5) { "ы" } else { "и" }),
                _ => None,
            };
        }
        // Stem type 8 neuters spell theirs through the circle alternation.
        if paradigm.has(DeclensionFlags::CIRCLED_TWO) && props.is_genitive_normalized() && stem_type != 8 {
            // глаз, платьев, долей
            return Some(match gender {
                Gender::Masculine => match stem_type {
                    2 | 8 => "ь",
                    6 | 7 => "й",
                    _ => "",
                },
                Gender::Neuter => match stem_type {
                    1 | 3 => "ов",
                    5 if stressed => "ов",
                    2 | 4 => "ей",
                    _ => "ев",
                },
                _ => "ей",
            });
        }
        return None;
    }
    let locative_e = props.case == Case::Prepositional || (gender == Gender::Feminine && props.case == Case::Dative);
    (stem_type == 7 && paradigm.has(DeclensionFlags::CIRCLED_THREE) && locative_e).then_some("е")
}
