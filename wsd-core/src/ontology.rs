//! # Ontologia e Consulta de Sentidos
//!
//! A [`Ontology`] é a coleção de sentidos carregada de um documento JSON (ou
//! montada em código) e o índice `lema → sentidos` usado para encontrar os
//! candidatos de cada palavra. Na montagem do desambiguador os sentidos vão
//! para o [`SenseGraph`] e só o [`LemmaIndex`] fica, visto pelo trait
//! [`SenseLookup`].
//!
//! ## Formato JSON
//!
//! ```json
//! {
//!   "senses": [
//!     {
//!       "id": "bank.n.01",
//!       "pos": "noun",
//!       "lemmas": ["bank"],
//!       "sense_keys": {"bank": "bank%1:14:00::"},
//!       "relations": {"hypernym": ["institution.n.01"]}
//!     }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, WsdError};
use crate::graph::SenseGraph;
use crate::sense::{PartOfSpeech, Sense, SenseId};

/// Consulta somente-leitura de sentidos candidatos.
///
/// Retorna os sentidos na ordem da ontologia (possivelmente vazio). Quando
/// `pos` é informado, só sentidos daquela classe gramatical são devolvidos.
pub trait SenseLookup: Send + Sync {
    fn candidates(&self, word: &str, pos: Option<PartOfSpeech>) -> Vec<SenseId>;
}

/// Normaliza uma palavra para a forma de lema: minúsculas e espaços viram `_`.
pub fn normalize_lemma(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OntologyDocument {
    senses: Vec<Sense>,
}

/// Índice `lema normalizado → (classe, id)`, na ordem de carga.
///
/// É o que sobra da ontologia depois que os sentidos vão para o
/// [`SenseGraph`]: o desambiguador só precisa dele para achar candidatos.
#[derive(Debug, Default, Clone)]
pub struct LemmaIndex {
    entries: HashMap<String, Vec<(PartOfSpeech, SenseId)>>,
}

impl LemmaIndex {
    fn from_senses(senses: &[Sense]) -> Self {
        let mut entries: HashMap<String, Vec<(PartOfSpeech, SenseId)>> = HashMap::new();
        for sense in senses {
            for lemma in &sense.lemmas {
                let entry = entries.entry(normalize_lemma(lemma)).or_default();
                if !entry.iter().any(|(_, id)| *id == sense.id) {
                    entry.push((sense.pos, sense.id.clone()));
                }
            }
        }
        Self { entries }
    }

    /// Número de lemas distintos.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SenseLookup for LemmaIndex {
    fn candidates(&self, word: &str, pos: Option<PartOfSpeech>) -> Vec<SenseId> {
        let Some(entries) = self.entries.get(&normalize_lemma(word)) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter(|(sense_pos, _)| pos.map_or(true, |p| p == *sense_pos))
            .map(|(_, id)| id.clone())
            .collect()
    }
}

/// Ontologia em memória.
#[derive(Debug, Default)]
pub struct Ontology {
    senses: Vec<Sense>,
    index: LemmaIndex,
}

impl Ontology {
    /// IDs repetidos: vale a primeira ocorrência, como no [`SenseGraph`].
    pub fn new(senses: Vec<Sense>) -> Self {
        let mut seen: HashSet<SenseId> = HashSet::new();
        let total = senses.len();
        let senses: Vec<Sense> = senses
            .into_iter()
            .filter(|sense| seen.insert(sense.id.clone()))
            .collect();
        if senses.len() < total {
            warn!(duplicates = total - senses.len(), "ignoring repeated sense ids");
        }
        let index = LemmaIndex::from_senses(&senses);
        Self { senses, index }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: OntologyDocument = serde_json::from_str(json)
            .map_err(|e| WsdError::GraphConstruction(format!("invalid ontology document: {e}")))?;
        Ok(Self::new(doc.senses))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            WsdError::GraphConstruction(format!("cannot read ontology {}: {e}", path.display()))
        })?;
        let ontology = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            senses = ontology.len(),
            lemmas = ontology.lemma_count(),
            "ontology loaded"
        );
        Ok(ontology)
    }

    pub fn to_json_string(&self) -> Result<String> {
        let doc = OntologyDocument {
            senses: self.senses.clone(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    pub fn len(&self) -> usize {
        self.senses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }

    pub fn lemma_count(&self) -> usize {
        self.index.len()
    }

    pub fn senses(&self) -> &[Sense] {
        &self.senses
    }

    /// Move os sentidos para o grafo base e devolve o índice de lemas.
    pub fn into_parts(self) -> Result<(SenseGraph, LemmaIndex)> {
        let graph = SenseGraph::from_senses(self.senses)?;
        Ok((graph, self.index))
    }
}

impl SenseLookup for Ontology {
    fn candidates(&self, word: &str, pos: Option<PartOfSpeech>) -> Vec<SenseId> {
        self.index.candidates(word, pos)
    }
}
