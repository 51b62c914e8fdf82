use rkyv::{AlignedVec, Deserialize};
use serde::Serialize;
use sklon_protocol::{AgreementSlot, Case, Gender, Lexeme, LexemeId, Lexicon, NounProperties};
use thiserror::Error;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("the lexicon archive is corrupt: {0}")]
    CorruptArchive(String),

    #[error("entry {0} is invalid: {1}")]
    InvalidEntry(LexemeId, sklon_protocol::DeclensionError),

    #[error("no entry {0} in the lexicon")]
    UnknownEntry(LexemeId),

    #[error("entry {0} is not a noun")]
    NotANoun(LexemeId),

    #[error(transparent)]
    Case(#[from] sklon_protocol::DeclensionError),

    #[error("unknown gender '{0}'")]
    UnknownGender(String),

    #[error("{0} is not an integer")]
    NotAnInteger(f64),
}

/// One row of a paradigm table, sent to JavaScript as a plain object.
#[derive(Debug, Serialize)]
pub struct ParadigmRow {
    pub case: &'static str,
    pub forms: Vec<String>,
}

fn parse_gender(gender: &str) -> Result<Gender, EngineError> {
    match gender {
        "m" | "masculine" => Ok(Gender::Masculine),
        "n" | "neuter" => Ok(Gender::Neuter),
        "f" | "feminine" => Ok(Gender::Feminine),
        "c" | "common" => Ok(Gender::Common),
        other => Err(EngineError::UnknownGender(other.to_string())),
    }
}

// JavaScript numbers arrive as f64. `i64::MAX as f64` rounds up to 2^63,
// which is already out of range.
fn to_integer(number: f64) -> Result<i64, EngineError> {
    if number.fract() != 0.0 || number < i64::MIN as f64 || number >= i64::MAX as f64 {
        return Err(EngineError::NotAnInteger(number));
    }
    Ok(number as i64)
}

/// The declension engine running in the browser, over a lexicon compiled by
/// `lexicon-compiler`.
#[wasm_bindgen]
pub struct SklonEngine {
    lexicon: Lexicon,
}

impl SklonEngine {
    /// Validates the archive bytes before anything reads them.
    pub fn load(data: &[u8]) -> Result<Self, EngineError> {
        let mut aligned = AlignedVec::with_capacity(data.len());
        aligned.extend_from_slice(data);
        let archived = rkyv::check_archived_root::<Lexicon>(&aligned)
            .map_err(|e| EngineError::CorruptArchive(e.to_string()))?;
        let lexicon: Lexicon = archived.deserialize(&mut rkyv::Infallible).unwrap_or_else(|e| match e {});
        lexicon.validate().map_err(|(id, e)| EngineError::InvalidEntry(id, e))?;
        Ok(Self { lexicon })
    }

    fn entry(&self, id: u32) -> Result<&Lexeme, EngineError> {
        let id = LexemeId::new(id);
        self.lexicon.find(id).ok_or(EngineError::UnknownEntry(id))
    }

    /// A noun or pronoun in its own gender; an adjective in the masculine.
    pub fn try_decline(&self, id: u32, case: &str, plural: bool) -> Result<String, EngineError> {
        let case: Case = case.parse()?;
        Ok(match self.entry(id)? {
            Lexeme::Noun(noun) => sklon_morph::noun_form(noun, case, plural),
            Lexeme::Adjective(adj) => {
                sklon_morph::adjective_form(adj, NounProperties::new(Gender::Masculine, false), case, plural)
            }
            Lexeme::Pronoun(pronoun) => sklon_morph::pronoun_form(pronoun, case, plural),
        })
    }

    /// An adjective or pronoun agreeing with a noun of `gender`.
    pub fn try_decline_agreeing(
        &self,
        id: u32,
        case: &str,
        gender: &str,
        animate: bool,
        plural: bool,
    ) -> Result<String, EngineError> {
        let case: Case = case.parse()?;
        let properties = NounProperties::new(parse_gender(gender)?, animate);
        Ok(match self.entry(id)? {
            Lexeme::Noun(noun) => sklon_morph::noun_form(noun, case, plural),
            Lexeme::Adjective(adj) => sklon_morph::adjective_form(adj, properties, case, plural),
            Lexeme::Pronoun(pronoun) => sklon_morph::pronoun_form_agreeing(pronoun, properties, case, plural),
        })
    }

    /// Rows of (case, forms): singular and plural for nouns and pronouns,
    /// one column per agreement slot for adjectives.
    pub fn try_paradigm(&self, id: u32) -> Result<Vec<ParadigmRow>, EngineError> {
        let rows = match self.entry(id)? {
            Lexeme::Noun(noun) => Case::ALL
                .iter()
                .map(|&case| ParadigmRow {
                    case: case.abbreviation(),
                    forms: vec![sklon_morph::noun_form(noun, case, false), sklon_morph::noun_form(noun, case, true)],
                })
                .collect(),
            Lexeme::Adjective(adj) => Case::PRIMARY
                .iter()
                .map(|&case| ParadigmRow {
                    case: case.abbreviation(),
                    forms: AgreementSlot::ALL
                        .iter()
                        .map(|&slot| {
                            let (gender, plural) = match slot {
                                AgreementSlot::Masculine => (Gender::Masculine, false),
                                AgreementSlot::Neuter => (Gender::Neuter, false),
                                AgreementSlot::Feminine => (Gender::Feminine, false),
                                AgreementSlot::Plural => (Gender::Masculine, true),
                            };
                            sklon_morph::adjective_form(adj, NounProperties::new(gender, false), case, plural)
                        })
                        .collect(),
                })
                .collect(),
            Lexeme::Pronoun(pronoun) => Case::PRIMARY
                .iter()
                .map(|&case| ParadigmRow {
                    case: case.abbreviation(),
                    forms: vec![
                        sklon_morph::pronoun_form(pronoun, case, false),
                        sklon_morph::pronoun_form(pronoun, case, true),
                    ],
                })
                .collect(),
        };
        Ok(rows)
    }

    pub fn try_count_phrase(&self, id: u32, number: f64, case: &str) -> Result<String, EngineError> {
        let case: Case = case.parse()?;
        let number = to_integer(number)?;
        match self.entry(id)? {
            Lexeme::Noun(noun) => Ok(sklon_morph::count_phrase(noun, number, case)),
            _ => Err(EngineError::NotANoun(LexemeId::new(id))),
        }
    }
}

#[wasm_bindgen]
impl SklonEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<SklonEngine, JsError> {
        Ok(Self::load(&data)?)
    }

    pub fn decline(&self, id: u32, case: &str, plural: bool) -> Result<String, JsError> {
        Ok(self.try_decline(id, case, plural)?)
    }

    #[wasm_bindgen(js_name = declineAgreeing)]
    pub fn decline_agreeing(
        &self,
        id: u32,
        case: &str,
        gender: &str,
        animate: bool,
        plural: bool,
    ) -> Result<String, JsError> {
        Ok(self.try_decline_agreeing(id, case, gender, animate, plural)?)
    }

    pub fn paradigm(&self, id: u32) -> Result<JsValue, JsError> {
        let rows = self.try_paradigm(id)?;
        serde_wasm_bindgen::to_value(&rows).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = countPhrase)]
    pub fn count_phrase(&self, id: u32, number: f64, case: &str) -> Result<String, JsError> {
        Ok(self.try_count_phrase(id, number, case)?)
    }

    #[wasm_bindgen(js_name = entryCount)]
    pub fn entry_count(&self) -> usize {
        self.lexicon.entries.len()
    }
}

/// Spells out a cardinal agreeing with a counted noun of `gender`.
#[wasm_bindgen]
pub fn cardinal(number: f64, case: &str, gender: &str, animate: bool) -> Result<String, JsError> {
    let case: Case = case.parse().map_err(EngineError::from)?;
    let counted = NounProperties::new(parse_gender(gender)?, animate);
    Ok(sklon_morph::cardinal(to_integer(number)?, case, counted))
}

/// Spells out an ordinal agreeing with a noun of `gender`.
#[wasm_bindgen]
pub fn ordinal(number: f64, case: &str, gender: &str, animate: bool, plural: bool) -> Result<String, JsError> {
    let case: Case = case.parse().map_err(EngineError::from)?;
    let properties = NounProperties::new(parse_gender(gender)?, animate);
    Ok(sklon_morph::ordinal(to_integer(number)?, case, properties, plural))
}
