//! Stem alternations: the fleeting vowel (types A and B), the unique
//! alternations marked with a circle, and е/ё.

use sklon_protocol::{DeclensionFlags, Gender, PreparedProperties, WordClass};

use crate::buffer::InflectionBuffer;
use crate::letters::{is_consonant, is_hissing, is_velar, is_vowel};
use crate::Paradigm;

/// Type A: drops the last vowel of the stem ("сон" → "сна", "отец" →
/// "отца") or turns it into й or ь ("боец" → "бойца", "лёд" → "льда").
pub fn drop_fleeting_vowel(buffer: &mut InflectionBuffer, stem_type: u8, gender: Gender, class: WordClass) {
    let Some(at) = buffer.rfind_in_stem(is_vowel) else {
        panic!("no fleeting vowel in '{buffer}'");
    };
    let before = at.checked_sub(1).map(|i| buffer.stem_char(i));
    let after = (at + 1 < buffer.stem_len()).then(|| buffer.stem_char(at + 1));
    let is_last_before_k = at + 2 == buffer.stem_len() && after == Some('к');

    match buffer.stem_char(at) {
        'о' => buffer.remove_stem_char_at(at),
        'е' | 'ё' | 'я' => {
            if before.is_some_and(is_vowel) {
                buffer.replace_stem_char(at, 'й');
            } else if before == Some('л')
                || stem_type == 6
                || (is_last_before_k && !before.is_some_and(is_hissing))
                || (gender == Gender::Feminine && stem_type == 8)
            {
                buffer.replace_stem_char(at, 'ь');
            } else {
                buffer.remove_stem_char_at(at);
            }
        }
        'и' if class == WordClass::Pronoun => {
            if stem_type == 6 {
                buffer.replace_stem_char(at, 'ь');
            } else {
                buffer.remove_stem_char_at(at);
            }
        }
        other => panic!("'{other}' cannot be a fleeting vowel"),
    }
}

/// Type B: puts a vowel back into a vowelless ending's stem ("сказк" →
/// "сказок", "письм" → "писем"). `stressed` says whether that form stresses
/// its ending. Returns the index of the changed stem character, or `None`
/// when the ending leaves nothing to fill.
pub fn insert_fleeting_vowel(buffer: &mut InflectionBuffer, stressed: bool) -> Option<usize> {
    let ending_y = buffer.ending_is("й");
    if !(buffer.ending_is("") || buffer.ending_is("ь") || ending_y) {
        return None;
    }
    let len = buffer.stem_len();
    assert!(len >= 2, "stem '{buffer}' is too short for a fleeting vowel");
    let (prev, last) = (buffer.stem_char(len - 2), buffer.stem_char(len - 1));

    if ending_y {
        // гостья → гостий, статья → статей
        if last == 'ь' {
            buffer.replace_stem_char(len - 1, if stressed { 'е' } else { 'и' });
            return Some(len - 1);
        }
        return None;
    }

    // A stem holds one ё at most.
    let yo_free = !buffer.stem().contains(&'ё');
    let full = |soft: char| if stressed && last != 'ц' && yo_free { soft } else { 'е' };

    if prev == 'ь' || prev == 'й' {
        buffer.replace_stem_char(len - 2, full('ё'));
        return Some(len - 2);
    }
    assert!(
        is_consonant(prev) && is_consonant(last),
        "stem '{buffer}' does not end in two consonants"
    );

    let vowel = if is_velar(prev) || (is_velar(last) && !is_hissing(prev) && prev != 'ц') {
        'о'
    } else if is_hissing(prev) || prev == 'ц' {
        if stressed && last != 'ц' {
            'о'
        } else {
            'е'
        }
    } else {
        full('ё')
    };
    buffer.insert_between_two_last_stem_chars(vowel);

    // песня → песен, but кухня → кухонь
    if buffer.ending_is("ь") && last == 'н' && vowel == 'е' && !stressed {
        buffer.remove_ending();
    }
    Some(len - 1)
}

/// The circle mark: suffixes that change shape across the paradigm.
pub fn alternate_unique(buffer: &mut InflectionBuffer, paradigm: &Paradigm, props: &PreparedProperties, gender: Gender) {
    let len = buffer.stem_len();
    let nominative = props.is_nominative_normalized();
    let genitive = props.is_genitive_normalized();

    // время: врем-ени, врем-ена, врем-ён; семя: сем-ян
    if gender == Gender::Neuter && buffer.stem_ends_with("м") {
        if !props.plural && nominative {
            return;
        }
        if props.plural && genitive {
            buffer.append_to_stem(if paradigm.has(DeclensionFlags::CIRCLED_TWO) { "ян" } else { "ён" });
            buffer.remove_ending();
        } else {
            buffer.append_to_stem("ен");
        }
        return;
    }

    // котёночек: котёночка, котятки, котяток
    if buffer.stem_ends_with("ёночек") || buffer.stem_ends_with("оночек") {
        let soft = buffer.stem_char(len - 6) == 'ё';
        if !props.plural {
            if !nominative {
                buffer.remove_stem_char_at(len - 2);
            }
            return;
        }
        buffer.shrink_stem_by(6);
        if genitive {
            buffer.append_to_stem(if soft { "яток" } else { "аток" });
            buffer.remove_ending();
        } else {
            buffer.append_to_stem(if soft { "ятк" } else { "атк" });
        }
        return;
    }

    // утёнок: утёнка, утята, утят; медвежонок: медвежата
    let young = if buffer.stem_ends_with("ёнок") || buffer.stem_ends_with("онок") {
        let soft = buffer.stem_char(len - 4) == 'ё';
        Some((4, if soft { "ят" } else { "ат" }))
    } else if buffer.stem_ends_with("ок") {
        // щенок: щенка, щенята
        Some((2, "ят"))
    } else {
        None
    };
    if let Some((suffix_len, plural_suffix)) = young {
        if !props.plural {
            if !nominative {
                buffer.remove_stem_char_at(len - 2);
            }
            return;
        }
        buffer.shrink_stem_by(suffix_len);
        buffer.append_to_stem(plural_suffix);
        if nominative {
            buffer.replace_ending("а");
        } else if genitive {
            buffer.remove_ending();
        }
        return;
    }

    // крестьянин: крестьяне, крестьян; болгарин: болгары
    if buffer.stem_ends_with("ин") {
        if !props.plural {
            return;
        }
        let settler = buffer.stem_ends_with("анин") || buffer.stem_ends_with("янин");
        buffer.shrink_stem_by(2);
        if nominative {
            if settler && !paradigm.has(DeclensionFlags::CIRCLED_ONE) {
                buffer.replace_ending("е");
            }
        } else if genitive {
            buffer.remove_ending();
        }
        return;
    }

    panic!("no unique alternation matches the stem of '{buffer}'");
}

/// е/ё alternation. A stressed ending with a vowel demotes ё to е; otherwise
/// the stem takes its ё back on the vowel the stress falls on.
///
/// `first` picks the first е instead of the last. The last е may be the one a
/// type B pass just filled ("сестёр").
pub fn alternate_yo(buffer: &mut InflectionBuffer, stressed: bool, first: bool) {
    if stressed && buffer.ending_has_vowel() {
        while let Some(at) = buffer.rfind_in_stem(|c| c == 'ё') {
            buffer.replace_stem_char(at, 'е');
        }
        return;
    }
    if buffer.stem().contains(&'ё') {
        return;
    }

    let target = if first && !stressed {
        buffer.stem().iter().position(|&c| c == 'е')
    } else {
        buffer.rfind_in_stem(|c| c == 'е')
    };
    match target {
        Some(at) => buffer.replace_stem_char(at, 'ё'),
        None => panic!("no е in '{buffer}' to alternate with ё"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use rstest::rstest;

    fn buffer(stem: &str, ending: &str) -> InflectionBuffer {
        let mut buffer = InflectionBuffer::new(stem);
        buffer.append_to_ending(ending);
        buffer
    }

    #[rstest]
    #[case("сон", 1, "сн")]
    #[case("отец", 5, "отц")]
    #[case("боец", 5, "бойц")]
    #[case("лёд", 1, "льд")]
    #[case("паренёк", 3, "пареньк")]
    #[case("уле", 6, "уль")]
    #[case("заяц", 5, "зайц")]
    #[case("ден", 2, "дн")]
    fn test_type_a_masculine(#[case] stem: &str, #[case] stem_type: u8, #[case] expected: &str) {
        let mut b = buffer(stem, "");
        drop_fleeting_vowel(&mut b, stem_type, Gender::Masculine, WordClass::Noun);
        assert_eq!(b.to_string(), expected);
    }

    #[test]
    fn test_type_a_feminine_eight_and_pronouns() {
        let mut b = buffer("восем", "и");
        drop_fleeting_vowel(&mut b, 8, Gender::Feminine, WordClass::Noun);
        assert_eq!(b.to_string(), "восьми");

        let mut b = buffer("один", "ого");
        drop_fleeting_vowel(&mut b, 1, Gender::Masculine, WordClass::Pronoun);
        assert_eq!(b.to_string(), "одного");

        let mut b = buffer("трети", "его");
        drop_fleeting_vowel(&mut b, 6, Gender::Masculine, WordClass::Pronoun);
        assert_eq!(b.to_string(), "третьего");
    }

    #[test]
    #[should_panic(expected = "cannot be a fleeting vowel")]
    fn test_type_a_rejects_other_vowels() {
        let mut b = buffer("стул", "а");
        drop_fleeting_vowel(&mut b, 1, Gender::Masculine, WordClass::Noun);
    }

    #[rstest]
    #[case("сказк", "", false, "сказок")]
    #[case("кошк", "", false, "кошек")]
    #[case("кишк", "", true, "кишок")]
    #[case("окн", "", false, "окон")]
    #[case("письм", "", false, "писем")]
    #[case("серьг", "", true, "серёг")]
    #[case("кольц", "", true, "колец")]
    #[case("чайк", "", false, "чаек")]
    #[case("овц", "", false, "овец")]
    #[case("сестр", "", false, "сестер")]
    #[case("кухн", "ь", false, "кухонь")]
    #[case("песн", "ь", false, "песен")]
    #[case("земл", "ь", false, "земель")]
    #[case("гость", "й", false, "гостий")]
    #[case("стать", "й", true, "статей")]
    #[case("арми", "й", false, "армий")]
    #[case("окн", "а", false, "окна")]
    fn test_type_b(#[case] stem: &str, #[case] ending: &str, #[case] stressed: bool, #[case] expected: &str) {
        let mut b = buffer(stem, ending);
        insert_fleeting_vowel(&mut b, stressed);
        assert_eq!(String::from(b), expected);
    }

    #[test]
    fn test_type_b_reports_the_filled_index() {
        let mut b = buffer("сестр", "");
        assert_eq!(insert_fleeting_vowel(&mut b, false), Some(4));
        let mut b = buffer("письм", "");
        assert_eq!(insert_fleeting_vowel(&mut b, false), Some(3));
        let mut b = buffer("окн", "а");
        assert_eq!(insert_fleeting_vowel(&mut b, false), None);
    }

    #[test]
    fn test_yo() {
        let mut b = buffer("ёж", "а");
        alternate_yo(&mut b, true, false);
        assert_eq!(b.to_string(), "ежа");

        let mut b = buffer("звезд", "ы");
        alternate_yo(&mut b, false, false);
        assert_eq!(b.to_string(), "звёзды");

        // The inserted е is the last one and takes the ё.
        let mut b = buffer("сестр", "");
        insert_fleeting_vowel(&mut b, false);
        alternate_yo(&mut b, false, false);
        assert_eq!(b.to_string(), "сестёр");

        let mut b = buffer("береза", "");
        alternate_yo(&mut b, false, true);
        assert_eq!(b.to_string(), "бёреза");
    }

    #[test]
    #[should_panic(expected = "to alternate with ё")]
    fn test_yo_without_e_panics() {
        let mut b = buffer("стол", "");
        alternate_yo(&mut b, false, false);
    }
}
