//! Whether a form puts the stress on its ending, per word class.

use sklon_protocol::{AgreementSlot, Case, PreparedProperties, Stress};

pub fn is_noun_ending_stressed(stress: Stress, props: &PreparedProperties) -> bool {
    use Stress::*;
    let plural_ending = props.plural && !props.is_nominative_normalized();
    match stress {
        Zero | A => false,
        B => true,
        BPrime => props.plural || props.case != Case::Instrumental,
        C => props.plural,
        D => !props.plural,
        DPrime => !props.plural && props.case != Case::Accusative,
        E => plural_ending,
        F => !props.plural || plural_ending,
        FPrime => if props.plural { plural_ending } else { props.case != Case::Accusative },
        FDoublePrime => if props.plural { plural_ending } else { props.case != Case::Instrumental },
        other => panic!("stress '{other}' cannot decline a noun"),
    }
}

pub fn is_pronoun_ending_stressed(stress: Stress, props: &PreparedProperties) -> bool {
    match stress {
        Stress::Zero | Stress::A => false,
        Stress::B => true,
        Stress::F => !props.plural || !props.is_nominative_normalized(),
        other => panic!("stress '{other}' cannot decline a pronoun"),
    }
}

/// Full forms stress the ending everywhere under "b" and nowhere under "a".
pub fn is_adjective_ending_stressed(main: Stress) -> bool {
    main.unprimed() == Stress::B
}

/// Short forms, keyed by the alternate stress letter.
pub fn is_short_ending_stressed(alt: Stress, slot: AgreementSlot) -> bool {
    match alt.unprimed() {
        Stress::A | Stress::Zero => false,
        Stress::B => true,
        Stress::C => slot == AgreementSlot::Feminine,
        other => panic!("stress '{other}' cannot decline a short adjective"),
    }
}
