//! # Sentidos (Synsets) e Classes Gramaticais
//!
//! Um [`Sense`] é um nó da ontologia: um significado possível de uma ou mais
//! palavras. Ele carrega suas formas lexicais (lemas), as chaves de sentido
//! por lema (no estilo WordNet, ex: `bank%1:14:00::`) e as relações de saída
//! para outros sentidos, agrupadas pelo nome da relação.
//!
//! Sentidos vindos da ontologia são imutáveis durante toda a vida do
//! [`crate::graph::SenseGraph`] que os contém.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ontology::normalize_lemma;

/// Identidade estável de um sentido na ontologia (ex: `"bank.n.01"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SenseId(pub String);

impl SenseId {
    pub fn new(id: impl Into<String>) -> Self {
        SenseId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SenseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SenseId {
    fn from(s: &str) -> Self {
        SenseId(s.to_string())
    }
}

/// Classes gramaticais cobertas pela ontologia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Nome da classe como string (para serialização e UI)
    pub fn name(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
        }
    }

    /// Letra usada pelo WordNet (`n`, `v`, `a`, `r`)
    pub fn letter(&self) -> char {
        match self {
            PartOfSpeech::Noun => 'n',
            PartOfSpeech::Verb => 'v',
            PartOfSpeech::Adjective => 'a',
            PartOfSpeech::Adverb => 'r',
        }
    }

    /// Interpreta uma tag de POS.
    ///
    /// Aceita os nomes longos (`"noun"`), as letras do WordNet (`"n"`, `"s"` para
    /// adjetivo satélite) e as tags do Penn Treebank (`NN*`, `VB*`, `JJ*`, `RB*`).
    /// Tags de classes fechadas (`DT`, `IN`, ...) retornam `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lower = tag.trim().to_lowercase();
        match lower.as_str() {
            "noun" | "n" => return Some(PartOfSpeech::Noun),
            "verb" | "v" => return Some(PartOfSpeech::Verb),
            "adjective" | "adj" | "a" | "s" => return Some(PartOfSpeech::Adjective),
            "adverb" | "adv" | "r" => return Some(PartOfSpeech::Adverb),
            _ => {}
        }
        if lower.starts_with("nn") {
            Some(PartOfSpeech::Noun)
        } else if lower.starts_with("vb") || lower == "md" {
            Some(PartOfSpeech::Verb)
        } else if lower.starts_with("jj") {
            Some(PartOfSpeech::Adjective)
        } else if lower.starts_with("rb") {
            Some(PartOfSpeech::Adverb)
        } else {
            None
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Um sentido da ontologia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sense {
    pub id: SenseId,
    pub pos: PartOfSpeech,
    /// Formas lexicais que realizam este sentido (ex: `["bank", "depository_financial_institution"]`).
    #[serde(default)]
    pub lemmas: Vec<String>,
    /// Chave de sentido por lema. Lemas sem chave usam o próprio `id`.
    #[serde(default)]
    pub sense_keys: BTreeMap<String, String>,
    /// Relações de saída: nome da relação → alvos, na ordem em que foram carregados.
    #[serde(default)]
    pub relations: BTreeMap<String, Vec<SenseId>>,
    /// Definição (glosa) opcional, apenas informativa.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gloss: Option<String>,
}

impl Sense {
    pub fn new(id: impl Into<String>, pos: PartOfSpeech) -> Self {
        Self {
            id: SenseId::new(id),
            pos,
            lemmas: Vec::new(),
            sense_keys: BTreeMap::new(),
            relations: BTreeMap::new(),
            gloss: None,
        }
    }

    pub fn with_lemma(mut self, lemma: &str) -> Self {
        self.lemmas.push(lemma.to_string());
        self
    }

    pub fn with_sense_key(mut self, lemma: &str, key: &str) -> Self {
        self.sense_keys.insert(lemma.to_string(), key.to_string());
        self
    }

    pub fn with_relation(mut self, relation: &str, target: &str) -> Self {
        self.relations
            .entry(relation.to_string())
            .or_default()
            .push(SenseId::new(target));
        self
    }

    pub fn with_gloss(mut self, gloss: &str) -> Self {
        self.gloss = Some(gloss.to_string());
        self
    }

    /// Alvos de uma relação (vazio se a relação não existir).
    pub fn relation(&self, name: &str) -> &[SenseId] {
        self.relations.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Chave de sentido para a palavra dada; recai no `id` quando não há chave registrada.
    ///
    /// Palavra e lemas registrados são comparados na forma normalizada, então
    /// `"Ice Cream"`, `"ice cream"` e `"ice_cream"` encontram a mesma chave.
    pub fn sense_key(&self, word: &str) -> String {
        if let Some(key) = self.sense_keys.get(word) {
            return key.clone();
        }
        let lemma = normalize_lemma(word);
        self.sense_keys
            .iter()
            .find(|(registered, _)| normalize_lemma(registered) == lemma)
            .map(|(_, key)| key.clone())
            .unwrap_or_else(|| self.id.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_from_penn_tags() {
        assert_eq!(PartOfSpeech::from_tag("NNS"), Some(PartOfSpeech::Noun));
        assert_eq!(PartOfSpeech::from_tag("VBD"), Some(PartOfSpeech::Verb));
        assert_eq!(PartOfSpeech::from_tag("JJR"), Some(PartOfSpeech::Adjective));
        assert_eq!(PartOfSpeech::from_tag("RB"), Some(PartOfSpeech::Adverb));
        assert_eq!(PartOfSpeech::from_tag("DT"), None);
    }

    #[test]
    fn test_pos_from_wordnet_letters() {
        assert_eq!(PartOfSpeech::from_tag("n"), Some(PartOfSpeech::Noun));
        assert_eq!(PartOfSpeech::from_tag("s"), Some(PartOfSpeech::Adjective));
        assert_eq!(PartOfSpeech::Adverb.letter(), 'r');
    }

    #[test]
    fn test_sense_key_fallback() {
        let sense = Sense::new("bank.n.01", PartOfSpeech::Noun)
            .with_lemma("bank")
            .with_sense_key("bank", "bank%1:17:01::");
        assert_eq!(sense.sense_key("bank"), "bank%1:17:01::");
        assert_eq!(sense.sense_key("Bank"), "bank%1:17:01::");
        // Sem chave registrada, usa o id
        assert_eq!(sense.sense_key("shore"), "bank.n.01");
    }

    #[test]
    fn test_multiword_sense_key_matches_any_spelling() {
        let sense = Sense::new("ice_cream.n.01", PartOfSpeech::Noun)
            .with_lemma("ice cream")
            .with_sense_key("ice cream", "ice_cream%1:13:00::");
        assert_eq!(sense.sense_key("ice_cream"), "ice_cream%1:13:00::");
        assert_eq!(sense.sense_key("Ice  Cream"), "ice_cream%1:13:00::");
        assert_eq!(sense.sense_key("ice"), "ice_cream.n.01");
    }

    #[test]
    fn test_relations_keep_insertion_order() {
        let sense = Sense::new("a", PartOfSpeech::Noun)
            .with_relation("hypernym", "c")
            .with_relation("hypernym", "b");
        let targets: Vec<&str> = sense.relation("hypernym").iter().map(|s| s.as_str()).collect();
        assert_eq!(targets, vec!["c", "b"]);
        assert!(sense.relation("hyponym").is_empty());
    }
}
