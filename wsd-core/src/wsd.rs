//! # Desambiguação por PageRank Personalizado
//!
//! Implementa o método de Agirre & Soroa (2009): para cada palavra da
//! sentença, o grafo de sentidos ganha um **pseudo-nó** por palavra do
//! contexto, ligado aos seus sentidos candidatos. O PageRank roda com toda a
//! massa de reinício sobre esses pseudo-nós, e o candidato da palavra em foco
//! com maior rank é o sentido escolhido.
//!
//! ## Ciclo de vida de um token
//!
//! ```text
//! sem candidatos ──────────────────────────────────────────► pulado
//! com candidatos → overlay montado → ranqueado → rank > 0 ──► sentido atribuído
//!                                             └ rank = 0 ──► pulado
//! ```
//!
//! Nenhum token é repetido e nenhuma falha de um token interrompe a sentença.
//!
//! ## Concorrência
//!
//! O [`SenseGraph`] é compartilhado por `Arc` e nunca alterado; cada foco
//! monta seu próprio [`GraphOverlay`] e o descarta ao final. Por isso
//! [`PageRankWsd`] é `Send + Sync` e [`PageRankWsd::disambiguate_batch`]
//! processa sentenças em paralelo sem nenhum lock.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::annotation::Annotation;
use crate::config::WsdConfig;
use crate::error::Result;
use crate::graph::{GraphView, SenseGraph};
use crate::ontology::{normalize_lemma, LemmaIndex, Ontology, SenseLookup};
use crate::overlay::GraphOverlay;
use crate::pagerank::{PersonalizationVector, PersonalizedPageRank};
use crate::sense::SenseId;
use crate::window::{ContextWindow, WindowContext};

/// Por que um token ficou sem sentido. Nenhum destes casos é um erro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A palavra não tem entrada na ontologia (ex: erro de digitação).
    NoSenseCandidates,
    /// Nenhum candidato recebeu massa positiva.
    NoPositiveRank,
    /// O token já tinha um sentido atribuído ou recusou a escrita.
    AlreadyAssigned,
    /// O PageRank rejeitou a entrada; registrado no log e absorvido.
    RankingFailed,
}

/// Desfecho da desambiguação de um token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Assigned {
        sense_id: SenseId,
        sense_key: String,
        rank: f64,
    },
    Skipped {
        reason: SkipReason,
    },
}

/// Decisão tomada para um token da sentença.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDecision {
    pub token_index: usize,
    pub word: String,
    pub outcome: Outcome,
}

impl TokenDecision {
    pub fn is_assigned(&self) -> bool {
        matches!(self.outcome, Outcome::Assigned { .. })
    }
}

/// Eventos emitidos durante a desambiguação.
///
/// Permitem que a interface web mostre, token a token, o grafo montado, os
/// ranks dos candidatos e a decisão final.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WsdEvent {
    /// Overlay montado para o token em foco.
    ContextBuilt {
        token_index: usize,
        word: String,
        candidates: Vec<SenseId>,
        /// Palavras do contexto que viraram pseudo-nós.
        context_words: Vec<String>,
        pseudo_nodes: usize,
    },
    /// PageRank concluído; ranks dos candidatos na ordem da relação.
    Ranked {
        token_index: usize,
        iterations: usize,
        converged: bool,
        candidate_ranks: Vec<(SenseId, f64)>,
    },
    SenseAssigned {
        token_index: usize,
        word: String,
        sense_id: SenseId,
        sense_key: String,
        rank: f64,
    },
    TokenSkipped {
        token_index: usize,
        word: String,
        reason: SkipReason,
    },
    Done {
        decisions: Vec<TokenDecision>,
        assigned: usize,
        total_tokens: usize,
        processing_ms: u64,
    },
}

/// O desambiguador. Barato de clonar: grafo e índice de lemas ficam atrás de `Arc`.
#[derive(Debug)]
pub struct PageRankWsd<L: SenseLookup = LemmaIndex> {
    graph: Arc<SenseGraph>,
    lookup: Arc<L>,
    config: WsdConfig,
    engine: PersonalizedPageRank,
}

impl<L: SenseLookup> Clone for PageRankWsd<L> {
    fn clone(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            lookup: Arc::clone(&self.lookup),
            config: self.config.clone(),
            engine: self.engine,
        }
    }
}

impl PageRankWsd<LemmaIndex> {
    /// Constrói o grafo base a partir da ontologia e monta o desambiguador.
    pub fn from_ontology(ontology: Ontology, config: WsdConfig) -> Result<Self> {
        let (graph, index) = ontology.into_parts()?;
        Self::new(Arc::new(graph), Arc::new(index), config)
    }
}

impl<L: SenseLookup> PageRankWsd<L> {
    pub fn new(graph: Arc<SenseGraph>, lookup: Arc<L>, config: WsdConfig) -> Result<Self> {
        config.validate()?;
        let engine = PersonalizedPageRank::new(config.pagerank);
        Ok(Self {
            graph,
            lookup,
            config,
            engine,
        })
    }

    /// Mesmo grafo e índice de lemas, outra configuração.
    pub fn with_config(&self, config: WsdConfig) -> Result<Self> {
        Self::new(Arc::clone(&self.graph), Arc::clone(&self.lookup), config)
    }

    pub fn graph(&self) -> &SenseGraph {
        &self.graph
    }

    pub fn config(&self) -> &WsdConfig {
        &self.config
    }

    /// Desambigua uma sentença, atribuindo sentidos aos tokens elegíveis.
    pub fn disambiguate<A: Annotation>(&self, tokens: &mut [A]) -> Vec<TokenDecision> {
        self.run(tokens, &mut |_| {})
    }

    /// Igual a [`Self::disambiguate`], mas envia [`WsdEvent`]s pelo canal a cada passo.
    ///
    /// # Fluxo de Eventos
    /// 1. `ContextBuilt` / `Ranked` (por token com candidatos)
    /// 2. `SenseAssigned` ou `TokenSkipped` (por token)
    /// 3. `Done`
    pub fn disambiguate_streaming<A: Annotation>(
        &self,
        tokens: &mut [A],
        tx: &mpsc::Sender<WsdEvent>,
    ) -> Vec<TokenDecision> {
        self.run(tokens, &mut |event| {
            let _ = tx.send(event);
        })
    }

    /// Desambigua várias sentenças em paralelo. Retorna o total de sentidos atribuídos.
    pub fn disambiguate_batch<A: Annotation + Send>(&self, sentences: &mut [Vec<A>]) -> usize {
        sentences
            .par_iter_mut()
            .map(|sentence| {
                self.disambiguate(sentence)
                    .iter()
                    .filter(|d| d.is_assigned())
                    .count()
            })
            .sum()
    }

    fn run<A: Annotation>(
        &self,
        tokens: &mut [A],
        emit: &mut dyn FnMut(WsdEvent),
    ) -> Vec<TokenDecision> {
        let start = Instant::now();

        let mut decisions: Vec<TokenDecision> = ContextWindow::new(&*tokens, self.config.window_radius)
            .iter()
            .map(|ctx| {
                let outcome = self.decide(&ctx, emit);
                TokenDecision {
                    token_index: ctx.index,
                    word: ctx.focus.word().to_string(),
                    outcome,
                }
            })
            .collect();

        for decision in &mut decisions {
            if let Outcome::Assigned {
                sense_id,
                sense_key,
                rank,
            } = &decision.outcome
            {
                if tokens[decision.token_index].assign_sense(sense_key.clone()) {
                    emit(WsdEvent::SenseAssigned {
                        token_index: decision.token_index,
                        word: decision.word.clone(),
                        sense_id: sense_id.clone(),
                        sense_key: sense_key.clone(),
                        rank: *rank,
                    });
                    continue;
                }
                debug!(token = decision.token_index, "annotation refused the sense");
                decision.outcome = Outcome::Skipped {
                    reason: SkipReason::AlreadyAssigned,
                };
            }
            if let Outcome::Skipped { reason } = decision.outcome {
                emit(WsdEvent::TokenSkipped {
                    token_index: decision.token_index,
                    word: decision.word.clone(),
                    reason,
                });
            }
        }

        let assigned = decisions.iter().filter(|d| d.is_assigned()).count();
        debug!(tokens = tokens.len(), assigned, "sentence disambiguated");
        emit(WsdEvent::Done {
            decisions: decisions.clone(),
            assigned,
            total_tokens: tokens.len(),
            processing_ms: start.elapsed().as_millis() as u64,
        });
        decisions
    }

    /// Procedimento para um único foco: overlay, personalização, PageRank, escolha.
    fn decide<A: Annotation>(
        &self,
        ctx: &WindowContext<'_, A>,
        emit: &mut dyn FnMut(WsdEvent),
    ) -> Outcome {
        let focus = ctx.focus;
        let word = focus.word();
        let relation = self.config.link_relation.as_str();

        if focus.sense().is_some() {
            return Outcome::Skipped {
                reason: SkipReason::AlreadyAssigned,
            };
        }

        let candidates = self.lookup.candidates(word, focus.pos());
        let mut overlay = GraphOverlay::new(&self.graph);
        let Some(focus_index) = overlay.add_pseudo_node(word, &candidates, relation) else {
            debug!(token = ctx.index, word, "no sense candidates");
            return Outcome::Skipped {
                reason: SkipReason::NoSenseCandidates,
            };
        };

        let mut context_words = Vec::new();
        for token in ctx.context() {
            let senses = self.lookup.candidates(token.word(), token.pos());
            if overlay
                .add_pseudo_node(token.word(), &senses, relation)
                .is_some()
            {
                context_words.push(token.word().to_string());
            }
        }

        emit(WsdEvent::ContextBuilt {
            token_index: ctx.index,
            word: word.to_string(),
            candidates,
            context_words,
            pseudo_nodes: overlay.delta_size(),
        });

        let personalization = PersonalizationVector::uniform(overlay.pseudo_indices());
        let ranks = match self.engine.rank(&overlay, &personalization) {
            Ok(ranks) => ranks,
            Err(e) => {
                warn!(token = ctx.index, word, error = %e, "ranking failed, skipping token");
                return Outcome::Skipped {
                    reason: SkipReason::RankingFailed,
                };
            }
        };

        // Empates: `<=` faz o último candidato (na ordem da relação) vencer.
        let targets = overlay.relation_indices(focus_index, relation);
        let mut best: Option<(usize, f64)> = None;
        for &candidate in targets {
            let rank = ranks.get(candidate);
            if best.map_or(true, |(_, best_rank)| best_rank <= rank) {
                best = Some((candidate, rank));
            }
        }

        emit(WsdEvent::Ranked {
            token_index: ctx.index,
            iterations: ranks.iterations,
            converged: ranks.converged,
            candidate_ranks: targets
                .iter()
                .filter_map(|&i| overlay.sense_at(i).map(|s| (s.id.clone(), ranks.get(i))))
                .collect(),
        });

        match best.and_then(|(index, rank)| overlay.sense_at(index).map(|s| (s, rank))) {
            Some((sense, rank)) if rank > 0.0 => {
                let sense_key = sense.sense_key(&normalize_lemma(word));
                debug!(token = ctx.index, word, sense = %sense.id, rank, "sense selected");
                Outcome::Assigned {
                    sense_id: sense.id.clone(),
                    sense_key,
                    rank,
                }
            }
            _ => Outcome::Skipped {
                reason: SkipReason::NoPositiveRank,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageRankConfig;
    use crate::sense::{PartOfSpeech, Sense};
    use crate::tokenizer::{tokenize, Token};

    /// "bank" com dois sentidos; "money" só alcança o sentido financeiro,
    /// via o vizinho compartilhado `finance`.
    fn bank_ontology() -> Ontology {
        Ontology::new(vec![
            Sense::new("bank_RIVER", PartOfSpeech::Noun)
                .with_lemma("bank")
                .with_relation("hypernym", "slope"),
            Sense::new("slope", PartOfSpeech::Noun).with_relation("hyponym", "bank_RIVER"),
            Sense::new("bank_FINANCE", PartOfSpeech::Noun)
                .with_lemma("bank")
                .with_sense_key("bank", "bank%1:14:00::")
                .with_relation("hypernym", "financial_institution")
                .with_relation("domain", "finance"),
            Sense::new("financial_institution", PartOfSpeech::Noun)
                .with_relation("hyponym", "bank_FINANCE"),
            Sense::new("finance", PartOfSpeech::Noun)
                .with_relation("member", "bank_FINANCE")
                .with_relation("member", "money"),
            Sense::new("money", PartOfSpeech::Noun)
                .with_lemma("money")
                .with_relation("domain", "finance"),
            Sense::new("bank_VERB", PartOfSpeech::Verb).with_lemma("bank"),
        ])
    }

    fn wsd(ontology: Ontology) -> PageRankWsd {
        PageRankWsd::from_ontology(ontology, WsdConfig::default()).unwrap()
    }

    fn nouns(words: &[&str]) -> Vec<Token> {
        words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(w, i).with_pos(PartOfSpeech::Noun))
            .collect()
    }

    #[test]
    fn test_money_context_selects_financial_bank() {
        let wsd = wsd(bank_ontology());
        let mut tokens = nouns(&["money", "bank"]);
        let decisions = wsd.disambiguate(&mut tokens);

        assert_eq!(tokens[1].sense.as_deref(), Some("bank%1:14:00::"));
        match &decisions[1].outcome {
            Outcome::Assigned { sense_id, .. } => assert_eq!(sense_id.as_str(), "bank_FINANCE"),
            other => panic!("esperava atribuição, veio {other:?}"),
        }
        // "money" tem um único candidato alcançável: recebe esse sentido (id como chave)
        assert_eq!(tokens[0].sense.as_deref(), Some("money"));
    }

    #[test]
    fn test_without_context_topology_decides() {
        // Sozinho, o ciclo bank_RIVER <-> slope retém mais massa que o ramo financeiro
        let wsd = wsd(bank_ontology());
        let mut tokens = nouns(&["bank"]);
        wsd.disambiguate(&mut tokens);
        assert_eq!(tokens[0].sense.as_deref(), Some("bank_RIVER"));
    }

    #[test]
    fn test_unknown_word_is_skipped_silently() {
        let wsd = wsd(bank_ontology());
        let mut tokens = nouns(&["bnak", "money"]);
        let decisions = wsd.disambiguate(&mut tokens);
        assert_eq!(tokens[0].sense, None);
        assert_eq!(
            decisions[0].outcome,
            Outcome::Skipped { reason: SkipReason::NoSenseCandidates }
        );
        assert!(decisions[1].is_assigned());
    }

    #[test]
    fn test_part_of_speech_narrows_candidates() {
        let wsd = wsd(bank_ontology());
        let mut tokens = vec![Token::new("bank", 0).with_pos(PartOfSpeech::Verb)];
        wsd.disambiguate(&mut tokens);
        assert_eq!(tokens[0].sense.as_deref(), Some("bank_VERB"));
    }

    #[test]
    fn test_single_node_graph_selects_sole_candidate() {
        let ontology = Ontology::new(vec![Sense::new("solo", PartOfSpeech::Noun).with_lemma("solo")]);
        let wsd = wsd(ontology);
        let mut tokens = nouns(&["solo"]);
        let decisions = wsd.disambiguate(&mut tokens);
        assert_eq!(tokens[0].sense.as_deref(), Some("solo"));
        assert!(decisions[0].is_assigned());
    }

    #[test]
    fn test_ties_go_to_last_candidate() {
        // Dois candidatos simétricos recebem exatamente o mesmo rank
        let wsd = wsd(twin_ontology());
        let (tx, rx) = mpsc::channel();
        let mut tokens = nouns(&["w"]);
        wsd.disambiguate_streaming(&mut tokens, &tx);

        let ranked = rx
            .try_iter()
            .find_map(|e| match e {
                WsdEvent::Ranked { candidate_ranks, .. } => Some(candidate_ranks),
                _ => None,
            })
            .unwrap();
        assert_eq!(ranked[0].1, ranked[1].1);
        assert_eq!(tokens[0].sense.as_deref(), Some("w.2"));
    }

    #[test]
    fn test_base_graph_unchanged_after_many_calls() {
        let wsd = wsd(bank_ontology());
        let size = wsd.graph().size();
        let edges = wsd.graph().edge_count();
        for _ in 0..20 {
            let mut tokens = nouns(&["money", "bank", "money"]);
            wsd.disambiguate(&mut tokens);
        }
        assert_eq!(wsd.graph().size(), size);
        assert_eq!(wsd.graph().edge_count(), edges);
        assert!(wsd.graph().relations("bank_FINANCE", "related").is_empty());
    }

    #[test]
    fn test_assigned_tokens_are_not_overwritten() {
        let wsd = wsd(bank_ontology());
        let mut tokens = nouns(&["money", "bank"]);
        tokens[1].sense = Some("manual".to_string());
        let decisions = wsd.disambiguate(&mut tokens);
        assert_eq!(tokens[1].sense.as_deref(), Some("manual"));
        assert_eq!(
            decisions[1].outcome,
            Outcome::Skipped { reason: SkipReason::AlreadyAssigned }
        );
    }

    #[test]
    fn test_streaming_events_order() {
        let wsd = wsd(bank_ontology());
        let (tx, rx) = mpsc::channel();
        let mut tokens = nouns(&["money", "bnak", "bank"]);
        wsd.disambiguate_streaming(&mut tokens, &tx);
        let events: Vec<WsdEvent> = rx.try_iter().collect();

        assert!(matches!(events[0], WsdEvent::ContextBuilt { token_index: 0, .. }));
        assert!(events
            .iter()
            .any(|e| matches!(e, WsdEvent::TokenSkipped { token_index: 1, .. })));
        match events.last().unwrap() {
            WsdEvent::Done { assigned, total_tokens, .. } => {
                assert_eq!(*assigned, 2);
                assert_eq!(*total_tokens, 3);
            }
            other => panic!("último evento deveria ser Done, veio {other:?}"),
        }
    }

    #[test]
    fn test_batch_runs_sentences_in_parallel() {
        let wsd = wsd(bank_ontology());
        let mut sentences: Vec<Vec<Token>> = (0..16).map(|_| nouns(&["money", "bank"])).collect();
        let assigned = wsd.disambiguate_batch(&mut sentences);
        assert_eq!(assigned, 32);
        assert!(sentences
            .iter()
            .all(|s| s[1].sense.as_deref() == Some("bank%1:14:00::")));
    }

    #[test]
    fn test_deterministic_decisions() {
        let wsd = wsd(crate::corpus::demo_ontology());
        let text = "She deposited the money in the bank to earn interest.";
        let mut first = tokenize(text);
        let mut second = tokenize(text);
        assert_eq!(wsd.disambiguate(&mut first), wsd.disambiguate(&mut second));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = WsdConfig {
            pagerank: PageRankConfig { damping: 2.0, ..PageRankConfig::default() },
            ..WsdConfig::default()
        };
        assert!(PageRankWsd::from_ontology(bank_ontology(), config).is_err());
    }

    #[test]
    fn test_multiword_lemma_writes_its_sense_key() {
        let ontology = Ontology::new(vec![
            Sense::new("ice_cream.n.01", PartOfSpeech::Noun)
                .with_lemma("ice cream")
                .with_sense_key("ice cream", "ice_cream%1:13:00::"),
        ]);
        let wsd = wsd(ontology);
        let mut tokens = vec![Token::new("Ice Cream", 0)];
        wsd.disambiguate(&mut tokens);
        assert_eq!(tokens[0].sense.as_deref(), Some("ice_cream%1:13:00::"));
    }

    /// Dois candidatos isolados para "w".
    fn twin_ontology() -> Ontology {
        Ontology::new(vec![
            Sense::new("w.1", PartOfSpeech::Noun).with_lemma("w"),
            Sense::new("w.2", PartOfSpeech::Noun).with_lemma("w"),
        ])
    }

    #[test]
    fn test_zero_damping_leaves_no_positive_rank() {
        // Sem damping toda a massa fica nos pseudo-nós
        let config = WsdConfig {
            pagerank: PageRankConfig { damping: 0.0, ..PageRankConfig::default() },
            ..WsdConfig::default()
        };
        let wsd = PageRankWsd::from_ontology(twin_ontology(), config).unwrap();
        let mut tokens = nouns(&["w"]);
        let decisions = wsd.disambiguate(&mut tokens);
        assert_eq!(
            decisions[0].outcome,
            Outcome::Skipped { reason: SkipReason::NoPositiveRank }
        );
        assert_eq!(tokens[0].sense, None);
    }

    #[test]
    fn test_ranking_errors_are_absorbed_per_token() {
        let mut wsd = wsd(twin_ontology());
        wsd.engine = PersonalizedPageRank::new(PageRankConfig {
            max_iterations: 0,
            ..PageRankConfig::default()
        });
        let mut tokens = nouns(&["w", "bnak", "w"]);
        let decisions = wsd.disambiguate(&mut tokens);
        assert_eq!(decisions.len(), 3);
        assert_eq!(
            decisions[0].outcome,
            Outcome::Skipped { reason: SkipReason::RankingFailed }
        );
        assert_eq!(
            decisions[2].outcome,
            Outcome::Skipped { reason: SkipReason::RankingFailed }
        );
        assert!(tokens.iter().all(|t| t.sense.is_none()));
    }

    /// Token que aceita ranking mas nunca aceita a escrita.
    struct ReadOnlyToken(&'static str);

    impl Annotation for ReadOnlyToken {
        fn word(&self) -> &str {
            self.0
        }

        fn pos(&self) -> Option<PartOfSpeech> {
            None
        }

        fn sense(&self) -> Option<&str> {
            None
        }

        fn assign_sense(&mut self, _sense_key: String) -> bool {
            false
        }
    }

    #[test]
    fn test_refused_write_is_not_reported_as_assigned() {
        let wsd = wsd(bank_ontology());
        let (tx, rx) = mpsc::channel();
        let mut tokens = vec![ReadOnlyToken("money"), ReadOnlyToken("bank")];
        let decisions = wsd.disambiguate_streaming(&mut tokens, &tx);

        assert!(decisions.iter().all(|d| d.outcome
            == Outcome::Skipped { reason: SkipReason::AlreadyAssigned }));
        let events: Vec<WsdEvent> = rx.try_iter().collect();
        assert!(!events.iter().any(|e| matches!(e, WsdEvent::SenseAssigned { .. })));
        match events.last().unwrap() {
            WsdEvent::Done { assigned, .. } => assert_eq!(*assigned, 0),
            other => panic!("último evento deveria ser Done, veio {other:?}"),
        }
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PageRankWsd<LemmaIndex>>();
        assert_send_sync::<PageRankWsd<Ontology>>();
    }
}
