use rkyv::{Archive, Deserialize, Serialize};
use crate::declension::{AdjectiveFlags, Declension};
use crate::error::DeclensionError;
use crate::grammar::{AgreementSlot, Case, CountAgreement, NounProperties, WordClass};
use crate::ids::LexemeId;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Integer key of an [`AnomalyList`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnomalyKey(pub u16);

impl AnomalyKey {
    /// A noun form; secondary cases have keys of their own.
    pub const fn noun(case: Case, plural: bool) -> Self {
        Self(case as u16 * 2 + plural as u16)
    }

    /// A full adjective form, or an adjectival pronoun form.
    pub const fn adjective(case: Case, slot: AgreementSlot) -> Self {
        Self(case as u16 * 4 + slot as u16)
    }

    /// A short adjective form.
    pub const fn short(slot: AgreementSlot) -> Self {
        Self(slot as u16)
    }

    /// The form a noun takes after a numeral.
    pub const fn count(agreement: CountAgreement) -> Self {
        Self(agreement as u16)
    }
}

/// Literal forms that replace what the regular rules would produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[archive(check_bytes)]
pub struct AnomalyList {
    // Sorted by key.
    entries: Vec<(u16, String)>,
}

impl AnomalyList {
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn get(&self, key: AnomalyKey) -> Option<&str> {
        self.entries
            .binary_search_by_key(&key.0, |(k, _)| *k)
            .ok()
            .map(|i| self.entries[i].1.as_str())
    }

    /// Registers `form` for `key`; `None` removes the entry.
    pub fn set(&mut self, key: AnomalyKey, form: Option<String>) {
        match (self.entries.binary_search_by_key(&key.0, |(k, _)| *k), form) {
            (Ok(i), Some(form)) => self.entries[i].1 = form,
            (Ok(i), None) => {
                self.entries.remove(i);
            }
            (Err(i), Some(form)) => self.entries.insert(i, (key.0, form)),
            (Err(_), None) => {}
        }
    }

    pub fn with(mut self, key: AnomalyKey, form: impl Into<String>) -> Self {
        self.set(key, Some(form.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnomalyKey, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (AnomalyKey(*k), v.as_str()))
    }

    // Keys can't be re-sorted after deserialization without a custom visitor,
    // so unsorted input is rejected instead.
    fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].0 < w[1].0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RussianNoun {
    pub stem: String,
    pub declension: Declension,
    pub properties: NounProperties,
    #[cfg_attr(feature = "serde", serde(default))]
    pub anomalies: AnomalyList,
    /// Forms after numerals ("пять человек", not "пять людей").
    #[cfg_attr(feature = "serde", serde(default))]
    pub count_anomalies: AnomalyList,
}

impl RussianNoun {
    pub fn new(stem: impl Into<String>, declension: impl Into<Declension>, properties: NounProperties) -> Self {
        Self {
            stem: stem.into(),
            declension: declension.into(),
            properties,
            anomalies: AnomalyList::new(),
            count_anomalies: AnomalyList::new(),
        }
    }

    pub fn validate(&self) -> Result<(), DeclensionError> {
        // Substantivized adjectives and pronouns are nouns too.
        validate_stem(WordClass::Noun, &self.stem, &self.declension)?;
        check_anomalies(WordClass::Noun, &[&self.anomalies, &self.count_anomalies])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RussianAdjective {
    pub stem: String,
    pub declension: Declension,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: AdjectiveFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub anomalies: AnomalyList,
    #[cfg_attr(feature = "serde", serde(default))]
    pub short_anomalies: AnomalyList,
    #[cfg_attr(feature = "serde", serde(default))]
    pub comparative: Option<String>,
}

impl RussianAdjective {
    pub fn new(stem: impl Into<String>, declension: impl Into<Declension>) -> Self {
        Self {
            stem: stem.into(),
            declension: declension.into(),
            flags: AdjectiveFlags::empty(),
            anomalies: AnomalyList::new(),
            short_anomalies: AnomalyList::new(),
            comparative: None,
        }
    }

    pub fn validate(&self) -> Result<(), DeclensionError> {
        if let Declension::Noun(_) = self.declension {
            return Err(DeclensionError::UnsupportedDeclension {
                lexeme: WordClass::Adjective,
                variant: WordClass::Noun,
            });
        }
        validate_stem(WordClass::Adjective, &self.stem, &self.declension)?;
        check_anomalies(WordClass::Adjective, &[&self.anomalies, &self.short_anomalies])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RussianPronoun {
    pub stem: String,
    pub declension: Declension,
    pub properties: NounProperties,
    #[cfg_attr(feature = "serde", serde(default))]
    pub anomalies: AnomalyList,
}

impl RussianPronoun {
    pub fn new(stem: impl Into<String>, declension: impl Into<Declension>, properties: NounProperties) -> Self {
        Self { stem: stem.into(), declension: declension.into(), properties, anomalies: AnomalyList::new() }
    }

    pub fn validate(&self) -> Result<(), DeclensionError> {
        if let Declension::Noun(_) = self.declension {
            return Err(DeclensionError::UnsupportedDeclension {
                lexeme: WordClass::Pronoun,
                variant: WordClass::Noun,
            });
        }
        validate_stem(WordClass::Pronoun, &self.stem, &self.declension)?;
        check_anomalies(WordClass::Pronoun, &[&self.anomalies])
    }
}

fn validate_stem(class: WordClass, stem: &str, declension: &Declension) -> Result<(), DeclensionError> {
    declension.validate()?;
    if stem.is_empty() && !declension.is_zero() {
        return Err(DeclensionError::EmptyStem(class));
    }
    Ok(())
}

fn check_anomalies(class: WordClass, lists: &[&AnomalyList]) -> Result<(), DeclensionError> {
    if lists.iter().all(|list| list.is_sorted()) {
        return Ok(());
    }
    Err(DeclensionError::UnsortedAnomalies(class))
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "class", rename_all = "snake_case"))]
#[archive(check_bytes)]
pub enum Lexeme {
    Noun(RussianNoun),
    Adjective(RussianAdjective),
    Pronoun(RussianPronoun),
}

impl Lexeme {
    pub fn stem(&self) -> &str {
        match self {
            Lexeme::Noun(n) => &n.stem,
            Lexeme::Adjective(a) => &a.stem,
            Lexeme::Pronoun(p) => &p.stem,
        }
    }

    pub fn class(&self) -> WordClass {
        match self {
            Lexeme::Noun(_) => WordClass::Noun,
            Lexeme::Adjective(_) => WordClass::Adjective,
            Lexeme::Pronoun(_) => WordClass::Pronoun,
        }
    }

    pub fn validate(&self) -> Result<(), DeclensionError> {
        match self {
            Lexeme::Noun(n) => n.validate(),
            Lexeme::Adjective(a) => a.validate(),
            Lexeme::Pronoun(p) => p.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LexiconEntry {
    pub id: LexemeId,
    pub lexeme: Lexeme,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub entries: Vec<LexiconEntry>,
}

impl Lexicon {
    pub fn find(&self, id: LexemeId) -> Option<&Lexeme> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.lexeme)
    }

    /// Validates every entry, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), (LexemeId, DeclensionError)> {
        for entry in &self.entries {
            entry.lexeme.validate().map_err(|e| (entry.id, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declension::{AdjectiveDeclension, DeclensionFlags, NounDeclension};
    use crate::grammar::Gender;
    use crate::stress::Stress;
    #[cfg(feature = "serde")]
    use crate::stress::StressPattern;
    use alloc::vec;
    use proptest::prelude::*;

    #[test]
    fn test_anomaly_set_and_remove() {
        let mut list = AnomalyList::new();
        let locative = AnomalyKey::noun(Case::Locative, false);
        list.set(locative, Some("лесу".into()));
        list.set(AnomalyKey::noun(Case::Nominative, true), Some("леса".into()));
        assert_eq!(list.get(locative), Some("лесу"));
        assert_eq!(list.len(), 2);

        list.set(locative, None);
        assert_eq!(list.get(locative), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_key_spaces_do_not_collide_within_a_kind() {
        let mut seen = Vec::new();
        for case in Case::ALL {
            for slot in AgreementSlot::ALL {
                let key = AnomalyKey::adjective(case, slot);
                assert!(!seen.contains(&key));
                seen.push(key);
            }
        }
    }

    #[test]
    fn test_adjective_rejects_noun_declension() {
        let noun_decl = NounDeclension::new(1, Stress::A, DeclensionFlags::empty()).unwrap();
        let adjective = RussianAdjective::new("садов", noun_decl);
        assert!(matches!(adjective.validate(), Err(DeclensionError::UnsupportedDeclension { .. })));

        let ok = RussianAdjective::new("садов", AdjectiveDeclension::new(1, Stress::A, DeclensionFlags::empty()).unwrap());
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_lexicon_validation_reports_entry() {
        let lexicon = Lexicon {
            version: 1,
            entries: vec![LexiconEntry {
                id: LexemeId(7),
                lexeme: Lexeme::Noun(RussianNoun::new(
                    "",
                    NounDeclension::new(1, Stress::A, DeclensionFlags::empty()).unwrap(),
                    NounProperties::new(Gender::Masculine, false),
                )),
            }],
        };
        assert_eq!(lexicon.validate(), Err((LexemeId(7), DeclensionError::EmptyStem(WordClass::Noun))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_lexicon_round_trip() {
        let json = r#"{
            "version": 3,
            "entries": [
                {
                    "id": 2,
                    "lexeme": {
                        "class": "noun",
                        "stem": "лес",
                        "declension": { "kind": "noun", "stem_type": 1, "stress": "c", "flags": "CIRCLED_ONE" },
                        "properties": { "gender": "masculine", "animate": false },
                        "anomalies": [[16, "лесу"]]
                    }
                },
                {
                    "id": 4,
                    "lexeme": {
                        "class": "adjective",
                        "stem": "весёл",
                        "declension": {
                            "kind": "adjective",
                            "stem_type": 1,
                            "stress": { "main": "a", "alt": "c'" },
                            "flags": "ALTERNATING_YO"
                        }
                    }
                }
            ]
        }"#;
        let lexicon: Lexicon = serde_json::from_str(json).unwrap();
        assert!(lexicon.validate().is_ok());

        let Some(Lexeme::Noun(forest)) = lexicon.find(LexemeId(2)) else { panic!("entry 2 is not a noun") };
        assert_eq!(forest.anomalies.get(AnomalyKey::noun(Case::Locative, false)), Some("лесу"));
        assert!(forest.declension.as_noun().is_some_and(|d| d.has(DeclensionFlags::CIRCLED_ONE)));

        let Some(Lexeme::Adjective(cheerful)) = lexicon.find(LexemeId(4)) else { panic!("entry 4 is not an adjective") };
        assert_eq!(cheerful.flags, AdjectiveFlags::empty());
        let declension = cheerful.declension.as_adjective().unwrap();
        assert_eq!(declension.stress(), StressPattern::new(Stress::A, Stress::CPrime));
        assert!(declension.has(DeclensionFlags::ALTERNATING_YO));

        let text = serde_json::to_string(&lexicon).unwrap();
        assert!(text.contains(r#""class":"noun""#));
        assert!(text.contains(r#""kind":"adjective""#));
        let reloaded: Lexicon = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded, lexicon);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_rejects_unknown_declension_kind() {
        let json = r#"{ "kind": "verb", "stem_type": 1, "stress": "a" }"#;
        assert!(serde_json::from_str::<Declension>(json).is_err());
    }

    proptest! {
        #[test]
        fn test_anomaly_list_stays_sorted(keys in proptest::collection::vec(0u16..64, 0..32)) {
            let mut list = AnomalyList::new();
            for key in &keys {
                list.set(AnomalyKey(*key), Some(String::from("x")));
            }
            prop_assert!(list.is_sorted());
            for key in &keys {
                prop_assert_eq!(list.get(AnomalyKey(*key)), Some("x"));
            }
        }
    }
}
