use alloc::string::String;
use alloc::vec::Vec;

use sklon_protocol::{Case, DeclensionFlags, NounProperties, PreparedProperties, Stress};

use super::cardinal::{compose, hundreds, small, teen, tens, INANIMATE, SCALES};
use crate::{adjective, pronoun, Paradigm};

const TRETIJ: Paradigm = Paradigm::new(6, Stress::A, DeclensionFlags::STAR);

const UNITS: [(&str, Stress); 9] = [
    ("перв", Stress::A),
    ("втор", Stress::B),
    ("трети", Stress::A),
    ("четвёрт", Stress::A),
    ("пят", Stress::A),
    ("шест", Stress::B),
    ("седьм", Stress::B),
    ("восьм", Stress::B),
    ("девят", Stress::A),
];

const TEENS: [&str; 10] = [
    "десят",
    "одиннадцат",
    "двенадцат",
    "тринадцат",
    "четырнадцат",
    "пятнадцат",
    "шестнадцат",
    "семнадцат",
    "восемнадцат",
    "девятнадцат",
];

const TENS: [(&str, Stress); 8] = [
    ("двадцат", Stress::A),
    ("тридцат", Stress::A),
    ("сороков", Stress::B),
    ("пятидесят", Stress::A),
    ("шестидесят", Stress::A),
    ("семидесят", Stress::A),
    ("восьмидесят", Stress::A),
    ("девяност", Stress::A),
];

const HUNDREDS: [&str; 9] = [
    "сот",
    "двухсот",
    "трёхсот",
    "четырёхсот",
    "пятисот",
    "шестисот",
    "семисот",
    "восьмисот",
    "девятисот",
];

fn adjectival(stem: &str, stress: Stress, props: &PreparedProperties) -> String {
    adjective::inflect(stem, &Paradigm::new(1, stress, DeclensionFlags::empty()), props)
}

fn unit(digit: u64, props: &PreparedProperties) -> String {
    if digit == 3 {
        return pronoun::inflect("трети", &TRETIJ, props);
    }
    let (stem, stress) = UNITS[(digit - 1) as usize];
    adjectival(stem, stress, props)
}

/// Ordinal of 1-999.
fn below_thousand(n: u64, props: &PreparedProperties, words: &mut Vec<String>) {
    let (h, t) = (n / 100, n % 100);
    if t == 0 {
        words.push(adjectival(HUNDREDS[(h - 1) as usize], Stress::A, props));
        return;
    }
    if h > 0 {
        words.push(hundreds(h, Case::Nominative));
    }
    match t {
        10..=19 => words.push(adjectival(TEENS[(t - 10) as usize], Stress::A, props)),
        _ if t % 10 == 0 => {
            let (stem, stress) = TENS[(t / 10 - 2) as usize];
            words.push(adjectival(stem, stress, props));
        }
        _ => {
            if t >= 20 {
                words.push(tens(t / 10, Case::Nominative));
            }
            words.push(unit(t % 10, props));
        }
    }
}

/// The genitive of a scale multiplier fused into one word
/// ("двадцатиодно" in "двадцатиоднотысячный", "двухсот" in
/// "двухсоттысячный").
fn fused_multiplier(m: u64) -> String {
    if m == 1 {
        return String::new();
    }
    let (h, t) = (m / 100, m % 100);
    let mut fused = String::new();
    match h {
        0 => {}
        1 => fused.push_str("сто"),
        _ => fused.push_str(&hundreds(h, Case::Genitive)),
    }
    match t {
        0 => {}
        10..=19 => fused.push_str(&teen(t, Case::Genitive)),
        _ => {
            match t / 10 {
                0 => {}
                9 => fused.push_str("девяносто"),
                d => fused.push_str(&tens(d, Case::Genitive)),
            }
            match t % 10 {
                0 => {}
                1 => fused.push_str("одно"),
                u => fused.push_str(&small(u, Case::Genitive, INANIMATE)),
            }
        }
    }
    fused
}

/// Spells out the ordinal of `number` agreeing with a noun of `properties`
/// in `case`: "двадцать первый", "две тысячи третьей", "двухсотым".
/// Only the last word declines; the words before it stay nominative
/// cardinals.
pub fn ordinal(number: i64, case: Case, properties: NounProperties, plural: bool) -> String {
    let n = number.unsigned_abs();
    let props = properties.prepare(case, plural);
    let mut words = Vec::new();
    if number < 0 {
        words.push(String::from("минус"));
    }
    if n == 0 {
        words.push(adjectival("нулев", Stress::B, &props));
        return words.join(" ");
    }

    let low = n % 1000;
    if low != 0 {
        if n > low {
            compose(n - low, Case::Nominative, INANIMATE, &mut words);
        }
        below_thousand(low, &props, &mut words);
        return words.join(" ");
    }

    // `n` ends in a scale: the multiplier fuses with the scale word.
    for (value, stem, _, _) in SCALES {
        if n % value != 0 {
            continue;
        }
        let multiplier = (n / value) % 1000;
        let higher = n - multiplier * value;
        if higher > 0 {
            compose(higher, Case::Nominative, INANIMATE, &mut words);
        }
        let fused = format!("{}{}н", fused_multiplier(multiplier), stem);
        words.push(adjectival(&fused, Stress::A, &props));
        break;
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sklon_protocol::Gender;

    const MASCULINE: NounProperties = NounProperties::new(Gender::Masculine, false);
    const FEMININE: NounProperties = NounProperties::new(Gender::Feminine, false);

    #[rstest]
    #[case(1, "первый")]
    #[case(2, "второй")]
    #[case(3, "третий")]
    #[case(4, "четвёртый")]
    #[case(7, "седьмой")]
    #[case(10, "десятый")]
    #[case(13, "тринадцатый")]
    #[case(21, "двадцать первый")]
    #[case(40, "сороковой")]
    #[case(90, "девяностый")]
    #[case(100, "сотый")]
    #[case(145, "сто сорок пятый")]
    #[case(300, "трёхсотый")]
    #[case(1000, "тысячный")]
    #[case(2000, "двухтысячный")]
    #[case(2021, "две тысячи двадцать первый")]
    #[case(21_000, "двадцатиоднотысячный")]
    #[case(90_000, "девяностотысячный")]
    #[case(100_000, "стотысячный")]
    #[case(1_000_000, "миллионный")]
    #[case(1_002_000, "миллион двухтысячный")]
    #[case(0, "нулевой")]
    fn test_masculine_nominative(#[case] number: i64, #[case] expected: &str) {
        assert_eq!(ordinal(number, Case::Nominative, MASCULINE, false), expected);
    }

    #[test]
    fn test_agreement_with_the_noun() {
        assert_eq!(ordinal(3, Case::Nominative, FEMININE, false), "третья");
        assert_eq!(ordinal(3, Case::Genitive, MASCULINE, false), "третьего");
        assert_eq!(ordinal(8, Case::Instrumental, MASCULINE, false), "восьмым");
        assert_eq!(ordinal(2003, Case::Dative, FEMININE, false), "две тысячи третьей");
        assert_eq!(ordinal(200, Case::Instrumental, MASCULINE, false), "двухсотым");
        assert_eq!(ordinal(5, Case::Nominative, MASCULINE, true), "пятые");
    }

    #[test]
    fn test_negative() {
        assert_eq!(ordinal(-1, Case::Nominative, MASCULINE, false), "минус первый");
    }
}
