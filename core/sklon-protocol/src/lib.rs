//! Grammatical types, declension descriptors and the lexicon model shared by
//! the engine, the compiler tool and the wasm surface.
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod declension;
pub mod error;
pub mod grammar;
pub mod ids;
pub mod stress;

pub use declension::*;
pub use error::DeclensionError;
pub use grammar::*;
pub use ids::LexemeId;
pub use stress::{Stress, StressPattern};

pub mod model;
pub use model::*;

#[cfg(test)]
mod tests {
    use super::*;
    use rkyv::{from_bytes, to_bytes};

    #[test]
    fn test_enum_serialization() {
        let original = Case::Instrumental;

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize Case");
        let deserialized: Case = from_bytes(&bytes).expect("Failed to deserialize Case");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_declension_serialization() {
        // Flags go through the hand-written Archive impl
        let original: Declension = NounDeclension::new(
            1,
            Stress::B,
            DeclensionFlags::STAR | DeclensionFlags::ALTERNATING_YO,
        )
        .expect("valid declension")
        .with_special_properties(NounProperties::new(Gender::Feminine, true))
        .into();

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize Declension");
        let deserialized: Declension = from_bytes(&bytes).expect("Failed to deserialize Declension");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(core::mem::size_of::<LexemeId>(), 4);
    }
}
