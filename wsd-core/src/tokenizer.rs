//! # Tokenizador
//!
//! Divide o texto bruto em palavras, preservando a posição original de cada
//! uma (offsets em bytes) para destacar os sentidos na interface web.
//! Pontuação e espaços não viram tokens: só palavras interessam à consulta
//! de sentidos.
//!
//! Dois modos de entrada:
//! - **Texto simples** ([`tokenize`]): segmentação de palavras Unicode, sem POS.
//! - **Texto etiquetado** ([`tokenize_tagged`]): `palavra/TAG` separados por
//!   espaço, como nos corpora anotados (ex: `"the/DT bank/NN"`).
//!
//! ```rust
//! use wsd_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("The bank raised rates.");
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tokens[1].text, "bank");
//! ```

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::annotation::Annotation;
use crate::sense::PartOfSpeech;

/// Um token da sentença.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "bank").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na sentença (0, 1, 2...).
    pub index: usize,
    /// Classe gramatical, quando a entrada a fornece.
    #[serde(default)]
    pub pos: Option<PartOfSpeech>,
    /// Sentido atribuído pelo desambiguador (escrito uma única vez).
    #[serde(default)]
    pub sense: Option<String>,
}

impl Token {
    pub fn new(text: &str, index: usize) -> Self {
        Self {
            text: text.to_string(),
            start: 0,
            end: text.len(),
            index,
            pos: None,
            sense: None,
        }
    }

    pub fn with_pos(mut self, pos: PartOfSpeech) -> Self {
        self.pos = Some(pos);
        self
    }
}

impl Annotation for Token {
    fn word(&self) -> &str {
        &self.text
    }

    fn pos(&self) -> Option<PartOfSpeech> {
        self.pos
    }

    fn sense(&self) -> Option<&str> {
        self.sense.as_deref()
    }

    fn assign_sense(&mut self, sense_key: String) -> bool {
        if self.sense.is_some() {
            return false;
        }
        self.sense = Some(sense_key);
        true
    }
}

/// Tokeniza texto simples em palavras.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.unicode_word_indices()
        .enumerate()
        .map(|(index, (start, word))| Token {
            text: word.to_string(),
            start,
            end: start + word.len(),
            index,
            pos: None,
            sense: None,
        })
        .collect()
}

/// Tokeniza texto no formato `palavra/TAG`.
///
/// Itens sem `/` viram tokens sem POS. Tags de classes fechadas (ex: `DT`)
/// também ficam sem POS, o que não restringe a consulta.
pub fn tokenize_tagged(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    for item in text.split_whitespace() {
        // split_whitespace preserva a ordem; localiza o item a partir do último offset
        let start = text[offset..].find(item).map_or(offset, |pos| offset + pos);
        offset = start + item.len();

        let (word, pos) = match item.rsplit_once('/') {
            Some((word, tag)) if !word.is_empty() => (word, PartOfSpeech::from_tag(tag)),
            _ => (item, None),
        };
        tokens.push(Token {
            text: word.to_string(),
            start,
            end: start + word.len(),
            index: tokens.len(),
            pos,
            sense: None,
        });
    }
    tokens
}
