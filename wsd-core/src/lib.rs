//! # wsd-core: Desambiguação de Sentidos por PageRank Personalizado
//!
//! Este crate atribui a cada palavra de uma sentença o seu sentido mais
//! provável numa ontologia lexical (no estilo WordNet), usando o método de
//! grafo de Agirre & Soroa: o contexto da palavra vira um conjunto de
//! pseudo-nós ligados aos seus sentidos candidatos, e o PageRank
//! personalizado sobre esses pseudo-nós mede qual candidato está mais
//! "perto" do contexto.
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Ontologia** ([`ontology`]): sentidos carregados de JSON e índice `lema → sentidos`.
//! 2.  **Grafo de Sentidos** ([`graph`]): construído uma vez, imutável e compartilhado.
//! 3.  **Tokenização** ([`tokenizer`]): texto simples ou `palavra/TAG`.
//! 4.  **Janela de Contexto** ([`window`]): até `k` vizinhos de cada lado do foco.
//! 5.  **Overlay** ([`overlay`]): pseudo-nós por chamada, sem tocar no grafo base.
//! 6.  **PageRank** ([`pagerank`]): iteração de potência com vetor de personalização.
//! 7.  **Orquestração** ([`wsd`]): escolhe e grava o sentido de cada token.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use wsd_core::{corpus::demo_ontology, tokenizer::tokenize, PageRankWsd, WsdConfig};
//!
//! // 1. Monta o desambiguador sobre a ontologia de demonstração
//! let wsd = PageRankWsd::from_ontology(demo_ontology(), WsdConfig::default()).unwrap();
//!
//! // 2. Tokeniza e desambigua
//! let mut tokens = tokenize("She deposited the money in the bank.");
//! wsd.disambiguate(&mut tokens);
//!
//! // 3. Cada token reconhecido recebe a chave do sentido escolhido
//! for token in &tokens {
//!     if let Some(sense) = &token.sense {
//!         println!("{} -> {}", token.text, sense);
//!     }
//! }
//! ```
//!
//! ## Módulos Principais
//!
//! - [`wsd`]: orquestrador e eventos de streaming.
//! - [`config`]: parâmetros do PageRank e da janela.
//! - [`corpus`]: ontologia e sentenças de demonstração.

pub mod annotation;
pub mod config;
pub mod corpus;
pub mod error;
pub mod graph;
pub mod ontology;
pub mod overlay;
pub mod pagerank;
pub mod sense;
pub mod tokenizer;
pub mod window;
pub mod wsd;

pub use annotation::Annotation;
pub use config::{PageRankConfig, WsdConfig};
pub use error::{Result, WsdError};
pub use graph::{GraphView, SenseGraph};
pub use ontology::{LemmaIndex, Ontology, SenseLookup};
pub use overlay::GraphOverlay;
pub use pagerank::{PersonalizationVector, PersonalizedPageRank, RankVector};
pub use sense::{PartOfSpeech, Sense, SenseId};
pub use tokenizer::Token;
pub use window::ContextWindow;
pub use wsd::{Outcome, PageRankWsd, SkipReason, TokenDecision, WsdEvent};
