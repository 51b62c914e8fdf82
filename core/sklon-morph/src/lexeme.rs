//! Declension of lexicon entries. A registered anomaly always wins over the
//! regular rules; a secondary case without one of its own falls back to its
//! primary case's anomaly before the rules run.

use alloc::string::String;

use sklon_protocol::{
    AgreementSlot, AnomalyKey, AnomalyList, Case, Declension, Gender, NounProperties, RussianAdjective, RussianNoun,
    RussianPronoun,
};
use tracing::debug;

use crate::{adjective, decline};

fn lookup(anomalies: &AnomalyList, key: impl Fn(Case) -> AnomalyKey, case: Case) -> Option<&str> {
    anomalies.get(key(case)).or_else(|| if case.is_secondary() { anomalies.get(key(case.primary())) } else { None })
}

pub fn noun_form(noun: &RussianNoun, case: Case, plural: bool) -> String {
    let plural = noun.properties.prepare(case, plural).plural;
    if let Some(form) = lookup(&noun.anomalies, |c| AnomalyKey::noun(c, plural), case) {
        debug!(stem = %noun.stem, ?case, plural, form, "noun anomaly");
        return String::from(form);
    }
    decline(&noun.stem, &noun.declension, noun.properties, case, plural)
}

/// Full form of an adjective agreeing with a noun of `properties`.
pub fn adjective_form(adj: &RussianAdjective, properties: NounProperties, case: Case, plural: bool) -> String {
    let slot = properties.prepare(case, plural).slot();
    if let Some(form) = lookup(&adj.anomalies, |c| AnomalyKey::adjective(c, slot), case) {
        debug!(stem = %adj.stem, ?case, ?slot, form, "adjective anomaly");
        return String::from(form);
    }
    decline(&adj.stem, &adj.declension, properties, case, plural)
}

/// Short form of an adjective. Anomalies are returned even where the rules
/// would give no form; pronoun-declined adjectives have no short forms.
pub fn short_form(adj: &RussianAdjective, gender: Gender, plural: bool, force: bool) -> Option<String> {
    let slot = AgreementSlot::of(gender, plural);
    if let Some(form) = adj.short_anomalies.get(AnomalyKey::short(slot)) {
        debug!(stem = %adj.stem, ?slot, form, "short form anomaly");
        return Some(String::from(form));
    }
    match &adj.declension {
        Declension::Adjective(d) => adjective::decline_short(&adj.stem, d, adj.flags, gender, plural, force),
        _ => None,
    }
}

pub fn comparative_form(adj: &RussianAdjective) -> Option<String> {
    if let Some(form) = &adj.comparative {
        return Some(form.clone());
    }
    match &adj.declension {
        Declension::Adjective(d) => Some(adjective::decline_comparative(&adj.stem, d)),
        _ => None,
    }
}

/// A pronoun in its own gender and animacy ("кто", "что").
pub fn pronoun_form(pronoun: &RussianPronoun, case: Case, plural: bool) -> String {
    pronoun_form_agreeing(pronoun, pronoun.properties, case, plural)
}

/// An attributive pronoun agreeing with a noun of `properties` ("мой",
/// "тот"). Anomalies use adjective keys.
pub fn pronoun_form_agreeing(pronoun: &RussianPronoun, properties: NounProperties, case: Case, plural: bool) -> String {
    let slot = properties.prepare(case, plural).slot();
    if let Some(form) = lookup(&pronoun.anomalies, |c| AnomalyKey::adjective(c, slot), case) {
        debug!(stem = %pronoun.stem, ?case, ?slot, form, "pronoun anomaly");
        return String::from(form);
    }
    decline(&pronoun.stem, &pronoun.declension, properties, case, plural)
}
