//! # PageRank Personalizado (Iteração de Potência)
//!
//! Implementa o PageRank com **vetor de reinício** (personalização) sobre
//! qualquer [`GraphView`]: o grafo base sozinho ou o grafo base com o overlay
//! da chamada.
//!
//! ## Regra de atualização
//!
//! ```text
//! rank'(v) = (1 - d) · p(v)  +  d · dangling · p(v)  +  d · Σ_{u → v} rank(u) / grau_saida(u)
//! ```
//!
//! - `p` é a personalização normalizada (soma 1).
//! - `dangling` é a massa total dos nós sem arestas de saída. Ela volta ao
//!   grafo **segundo a personalização**, como se o surfista reiniciasse. Com
//!   isso a soma do vetor é conservada em 1 a cada passo.
//! - O vetor inicial é a própria personalização.
//!
//! A iteração para quando a variação L1 entre dois vetores fica abaixo da
//! tolerância, ou ao atingir o teto de iterações. A ordem das operações é
//! fixa, então entradas idênticas produzem vetores idênticos bit a bit.

use serde::{Deserialize, Serialize};

use crate::config::PageRankConfig;
use crate::error::{Result, WsdError};
use crate::graph::GraphView;

/// Pesos de reinício esparsos: `(índice, peso)`, ordenados por índice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalizationVector {
    entries: Vec<(usize, f64)>,
}

impl PersonalizationVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Massa uniforme `1/k` sobre os `k` índices dados.
    pub fn uniform(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut vector = Self::new();
        let indices: Vec<usize> = indices.into_iter().collect();
        if indices.is_empty() {
            return vector;
        }
        let weight = 1.0 / indices.len() as f64;
        for index in indices {
            vector.set(index, weight);
        }
        vector
    }

    /// Define (ou substitui) o peso de um índice.
    pub fn set(&mut self, index: usize, weight: f64) {
        match self.entries.binary_search_by_key(&index, |&(i, _)| i) {
            Ok(pos) => self.entries[pos].1 = weight,
            Err(pos) => self.entries.insert(pos, (index, weight)),
        }
    }

    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w).sum()
    }

    /// Valida contra um universo de `n` nós e devolve o vetor denso normalizado.
    fn to_dense(&self, n: usize) -> Result<Vec<f64>> {
        for &(index, weight) in &self.entries {
            if index >= n {
                return Err(WsdError::InvalidPersonalization(format!(
                    "index {index} outside graph of {n} nodes"
                )));
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(WsdError::InvalidPersonalization(format!(
                    "weight at index {index} must be finite and non-negative (got {weight})"
                )));
            }
        }
        let total = self.total();
        if total <= 0.0 {
            return Err(WsdError::InvalidPersonalization(
                "weights must sum to a positive value".to_string(),
            ));
        }
        let mut dense = vec![0.0; n];
        for &(index, weight) in &self.entries {
            dense[index] = weight / total;
        }
        Ok(dense)
    }
}

/// Resultado de uma execução: massa por nó e diagnóstico da convergência.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankVector {
    scores: Vec<f64>,
    /// Iterações efetivamente executadas.
    pub iterations: usize,
    /// Variação L1 da última iteração.
    pub delta: f64,
    /// `true` se a tolerância foi atingida antes do teto.
    pub converged: bool,
}

impl RankVector {
    /// Massa do nó; índices fora do universo valem 0.
    pub fn get(&self, index: usize) -> f64 {
        self.scores.get(index).copied().unwrap_or(0.0)
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }
}

/// O motor de ranking. Não guarda estado entre chamadas.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalizedPageRank {
    config: PageRankConfig,
}

impl PersonalizedPageRank {
    pub fn new(config: PageRankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PageRankConfig {
        &self.config
    }

    /// Executa a iteração de potência sobre `graph`.
    ///
    /// # Erros
    /// - [`WsdError::InvalidGraph`] se o grafo não tem nós.
    /// - [`WsdError::InvalidPersonalization`] se os pesos não somam um valor positivo,
    ///   são negativos/não finitos ou apontam para fora do grafo.
    /// - [`WsdError::InvalidConfig`] se os parâmetros estão fora dos limites.
    pub fn rank<G: GraphView + ?Sized>(
        &self,
        graph: &G,
        personalization: &PersonalizationVector,
    ) -> Result<RankVector> {
        self.config.validate()?;
        let n = graph.size();
        if n == 0 {
            return Err(WsdError::InvalidGraph("graph has no nodes".to_string()));
        }
        let restart = personalization.to_dense(n)?;
        let damping = self.config.damping;

        let dangling_nodes: Vec<usize> = (0..n).filter(|&u| graph.out_degree(u) == 0).collect();

        let mut scores = restart.clone();
        let mut next = vec![0.0; n];
        let mut iterations = 0usize;
        let mut delta = f64::INFINITY;
        let mut converged = false;

        for _ in 0..self.config.max_iterations {
            iterations += 1;

            let dangling: f64 = dangling_nodes.iter().map(|&u| scores[u]).sum();
            let teleport = (1.0 - damping) + damping * dangling;
            for (slot, &p) in next.iter_mut().zip(restart.iter()) {
                *slot = teleport * p;
            }

            for (u, &mass) in scores.iter().enumerate() {
                if mass == 0.0 {
                    continue;
                }
                let neighbors = graph.neighbors(u);
                if neighbors.is_empty() {
                    continue;
                }
                let share = damping * mass / neighbors.len() as f64;
                for &v in neighbors {
                    next[v] += share;
                }
            }

            delta = scores
                .iter()
                .zip(next.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();
            std::mem::swap(&mut scores, &mut next);
            if delta < self.config.tolerance {
                converged = true;
                break;
            }
        }

        Ok(RankVector {
            scores,
            iterations,
            delta,
            converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Adjacency;
    use proptest::prelude::*;

    /// Grafo mínimo em memória para exercitar o motor sem ontologia.
    struct VecGraph(Vec<Adjacency>);

    impl VecGraph {
        fn from_lists(lists: &[Vec<usize>]) -> Self {
            VecGraph(
                lists
                    .iter()
                    .map(|targets| {
                        let mut adj = Adjacency::new();
                        adj.push_relation("edge", targets.iter().copied());
                        adj
                    })
                    .collect(),
            )
        }
    }

    impl GraphView for VecGraph {
        fn size(&self) -> usize {
            self.0.len()
        }

        fn adjacency(&self, index: usize) -> Option<&Adjacency> {
            self.0.get(index)
        }
    }

    fn tight() -> PersonalizedPageRank {
        PersonalizedPageRank::new(PageRankConfig {
            tolerance: 1e-12,
            max_iterations: 1000,
            ..PageRankConfig::default()
        })
    }

    #[test]
    fn test_two_node_cycle_closed_form() {
        // a <-> b, reinício todo em a: r(a) = 1/(1+d), r(b) = d/(1+d)
        let graph = VecGraph::from_lists(&[vec![1], vec![0]]);
        let mut p = PersonalizationVector::new();
        p.set(0, 1.0);
        let ranks = tight().rank(&graph, &p).unwrap();
        let d = 0.85;
        assert!(ranks.converged);
        assert!((ranks.get(0) - 1.0 / (1.0 + d)).abs() < 1e-9);
        assert!((ranks.get(1) - d / (1.0 + d)).abs() < 1e-9);
    }

    #[test]
    fn test_dangling_mass_returns_through_personalization() {
        // 0 -> 1, 1 sem saída. Toda massa de 1 volta para 0 via reinício.
        let graph = VecGraph::from_lists(&[vec![1], vec![]]);
        let p = PersonalizationVector::uniform([0]);
        let ranks = tight().rank(&graph, &p).unwrap();
        // r0 = (1-d) + d*r1 ; r1 = d*r0  =>  r0 = 1/(1+d)
        let d = 0.85;
        assert!((ranks.get(0) - 1.0 / (1.0 + d)).abs() < 1e-9);
        assert!((ranks.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let graph = VecGraph::from_lists(&[vec![1, 2], vec![2], vec![0, 3], vec![]]);
        let p = PersonalizationVector::uniform([0, 3]);
        let engine = PersonalizedPageRank::default();
        let first = engine.rank(&graph, &p).unwrap();
        for _ in 0..5 {
            let again = engine.rank(&graph, &p).unwrap();
            assert_eq!(first.scores(), again.scores());
            assert_eq!(first.iterations, again.iterations);
        }
    }

    #[test]
    fn test_iteration_cap_always_terminates() {
        let graph = VecGraph::from_lists(&[vec![1], vec![0]]);
        let engine = PersonalizedPageRank::new(PageRankConfig {
            max_iterations: 1,
            ..PageRankConfig::default()
        });
        let ranks = engine.rank(&graph, &PersonalizationVector::uniform([0])).unwrap();
        assert_eq!(ranks.iterations, 1);
        assert!(!ranks.converged);
    }

    #[test]
    fn test_empty_graph_is_rejected() {
        let graph = VecGraph(Vec::new());
        let err = PersonalizedPageRank::default()
            .rank(&graph, &PersonalizationVector::uniform([0]))
            .unwrap_err();
        assert!(matches!(err, WsdError::InvalidGraph(_)));
    }

    #[test]
    fn test_bad_personalization_is_rejected() {
        let graph = VecGraph::from_lists(&[vec![1], vec![0]]);
        let engine = PersonalizedPageRank::default();

        let empty = PersonalizationVector::new();
        assert!(matches!(
            engine.rank(&graph, &empty),
            Err(WsdError::InvalidPersonalization(_))
        ));

        let mut zero = PersonalizationVector::new();
        zero.set(0, 0.0);
        assert!(matches!(
            engine.rank(&graph, &zero),
            Err(WsdError::InvalidPersonalization(_))
        ));

        let mut negative = PersonalizationVector::new();
        negative.set(0, 2.0);
        negative.set(1, -1.0);
        assert!(engine.rank(&graph, &negative).is_err());

        let out_of_range = PersonalizationVector::uniform([7]);
        assert!(engine.rank(&graph, &out_of_range).is_err());
    }

    #[test]
    fn test_unnormalized_weights_are_scaled() {
        let graph = VecGraph::from_lists(&[vec![1], vec![0]]);
        let mut heavy = PersonalizationVector::new();
        heavy.set(0, 4.0);
        let mut unit = PersonalizationVector::new();
        unit.set(0, 1.0);
        let a = tight().rank(&graph, &heavy).unwrap();
        let b = tight().rank(&graph, &unit).unwrap();
        assert_eq!(a.scores(), b.scores());
    }

    #[test]
    fn test_personalization_set_replaces() {
        let mut p = PersonalizationVector::new();
        p.set(3, 0.5);
        p.set(1, 0.25);
        p.set(3, 0.75);
        assert_eq!(p.entries(), &[(1, 0.25), (3, 0.75)]);
        assert_eq!(p.get(2), 0.0);
    }

    proptest! {
        #[test]
        fn test_rank_mass_is_conserved(
            lists in prop::collection::vec(prop::collection::vec(0usize..64, 0..4), 1..10),
            weights in prop::collection::vec(0.01f64..1.0, 1..10),
        ) {
            let n = lists.len();
            let lists: Vec<Vec<usize>> = lists
                .iter()
                .map(|targets| targets.iter().map(|t| t % n).collect())
                .collect();
            let graph = VecGraph::from_lists(&lists);
            let mut p = PersonalizationVector::new();
            for (i, w) in weights.iter().enumerate() {
                p.set(i % n, *w);
            }
            let ranks = PersonalizedPageRank::default().rank(&graph, &p).unwrap();
            prop_assert_eq!(ranks.len(), n);
            prop_assert!((ranks.total() - 1.0).abs() < 1e-9);
            prop_assert!(ranks.scores().iter().all(|&r| r >= 0.0));
        }
    }
}
