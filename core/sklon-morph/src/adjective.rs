use alloc::string::String;

use sklon_protocol::{
    AdjectiveDeclension, AdjectiveFlags, AgreementSlot, Case, DeclensionFlags, Gender, NounProperties,
    PreparedProperties, Stress, StressPattern,
};
use tracing::trace;

use crate::buffer::InflectionBuffer;
use crate::endings::{self, SHORT_FORM};
use crate::letters::is_consonant;
use crate::{alternation, stress, Paradigm};

/// Declines the full form of an adjective in agreement with a noun of
/// `properties`.
pub fn decline(
    stem: &str,
    declension: &AdjectiveDeclension,
    properties: NounProperties,
    case: Case,
    plural: bool,
) -> String {
    if declension.is_zero() {
        return String::from(stem);
    }
    let mut form = inflect(stem, &Paradigm::from(declension), &properties.prepare(case, plural));
    if declension.is_reflexive() {
        form.push_str("ся");
    }
    form
}

pub(crate) fn inflect(stem: &str, paradigm: &Paradigm, props: &PreparedProperties) -> String {
    let stressed = stress::is_adjective_ending_stressed(paradigm.stress.main);
    let ending = endings::adjective_ending(props.case.index(), props.slot(), props.animate, paradigm.stem_type, stressed);

    let mut buffer = InflectionBuffer::new(stem);
    buffer.append_to_ending(ending);
    if paradigm.has(DeclensionFlags::ALTERNATING_YO) {
        alternation::alternate_yo(&mut buffer, stressed, false);
    }
    trace!(stem, case = ?props.case, slot = ?props.slot(), form = %buffer, "adjective");
    buffer.into()
}

/// Declines the short form ("красив", "красива"). Returns `None` when the
/// adjective has no such form, or when the form is marked difficult and
/// `force` is not set.
pub fn decline_short(
    stem: &str,
    declension: &AdjectiveDeclension,
    flags: AdjectiveFlags,
    gender: Gender,
    plural: bool,
    force: bool,
) -> Option<String> {
    if declension.is_zero() {
        return Some(String::from(stem));
    }
    let slot = AgreementSlot::of(gender, plural);
    if declension.is_reflexive() || flags.contains(AdjectiveFlags::MINUS) {
        return None;
    }
    let difficult = flags.contains(AdjectiveFlags::CROSS)
        || (flags.contains(AdjectiveFlags::BOXED_CROSS) && slot == AgreementSlot::Masculine);
    if difficult && !force {
        return None;
    }
    Some(inflect_short(stem, &Paradigm::from(declension), slot))
}

fn inflect_short(stem: &str, paradigm: &Paradigm, slot: AgreementSlot) -> String {
    let stressed = stress::is_short_ending_stressed(paradigm.stress.alt, slot);
    let ending = endings::adjective_ending(SHORT_FORM, slot, false, paradigm.stem_type, stressed);

    let mut buffer = InflectionBuffer::new(stem);
    buffer.append_to_ending(ending);

    // торжественный → торжествен (①); воспитанный → воспитана (②)
    let doubled_n = paradigm.has(DeclensionFlags::CIRCLED_TWO)
        || (paradigm.has(DeclensionFlags::CIRCLED_ONE) && slot == AgreementSlot::Masculine);
    if doubled_n {
        assert!(buffer.stem_ends_with("нн"), "'{stem}' has no doubled н to drop");
        buffer.shrink_stem_by(1);
    }

    if paradigm.has(DeclensionFlags::STAR) && slot == AgreementSlot::Masculine && closes_with_cluster(&buffer) {
        alternation::insert_fleeting_vowel(&mut buffer, stressed);
    }
    if paradigm.has(DeclensionFlags::ALTERNATING_YO) {
        alternation::alternate_yo(&mut buffer, stressed, false);
    }
    trace!(stem, slot = ?slot, form = %buffer, "short adjective");
    buffer.into()
}

fn closes_with_cluster(buffer: &InflectionBuffer) -> bool {
    let stem = buffer.stem();
    let n = stem.len();
    n >= 2 && is_consonant(stem[n - 1]) && (is_consonant(stem[n - 2]) || stem[n - 2] == 'ь')
}

/// Synthesizes the comparative: "-ее" for most stems, "-е" after a velar
/// that palatalizes ("мягкий" → "мягче").
pub fn decline_comparative(stem: &str, declension: &AdjectiveDeclension) -> String {
    if declension.is_zero() {
        return String::from(stem);
    }
    let mut buffer = InflectionBuffer::new(stem);
    if declension.stem_type() == 3 {
        if buffer.stem_ends_with("ск") {
            buffer.shrink_stem_by(2);
            buffer.append_to_stem("щ");
        } else if let Some(last) = buffer.last_stem_char() {
            let palatal = match last {
                'к' => 'ч',
                'г' => 'ж',
                'х' => 'ш',
                other => other,
            };
            buffer.replace_stem_char(buffer.stem_len() - 1, palatal);
        }
        buffer.append_to_ending("е");
    } else {
        buffer.append_to_ending("ее");
    }

    if declension.stress() != StressPattern::new(Stress::A, Stress::A) {
        while let Some(at) = buffer.rfind_in_stem(|c| c == 'ё') {
            buffer.replace_stem_char(at, 'е');
        }
    }

    let mut form = String::from(buffer);
    if declension.is_reflexive() {
        form.push_str("ся");
    }
    form
}
