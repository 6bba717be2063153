//! # Grafo de Sentidos (SenseGraph)
//!
//! Representação imutável da ontologia como um grafo em **arena**: os sentidos
//! ficam num `Vec` e cada um recebe um índice denso `0..N`, que é o que o
//! PageRank usa para indexar seus vetores. Um `HashMap` faz o caminho inverso
//! (`SenseId → índice`) em O(1).
//!
//! ## Por que não há métodos de mutação
//!
//! O grafo base é construído uma única vez e depois compartilhado (via `Arc`)
//! entre todas as chamadas de desambiguação, inclusive em threads diferentes.
//! O tipo simplesmente não expõe nenhum método `&mut self`: qualquer extensão
//! por chamada passa pelo [`crate::overlay::GraphOverlay`].

use std::collections::HashMap;
use std::ops::Range;

use tracing::{info, warn};

use crate::error::{Result, WsdError};
use crate::sense::{Sense, SenseId};

/// Arestas de saída de um nó, agrupadas por relação.
///
/// Todas as arestas ficam contíguas em `targets`; `spans` guarda, para cada
/// nome de relação, o intervalo correspondente. Assim o PageRank lê a
/// vizinhança inteira como uma fatia e as consultas por relação continuam O(r).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjacency {
    targets: Vec<usize>,
    spans: Vec<(String, Range<usize>)>,
}

impl Adjacency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acrescenta uma relação. Cada nome deve ser adicionado uma única vez.
    pub fn push_relation(&mut self, name: &str, targets: impl IntoIterator<Item = usize>) {
        let start = self.targets.len();
        self.targets.extend(targets);
        self.spans.push((name.to_string(), start..self.targets.len()));
    }

    /// Todos os vizinhos de saída, por qualquer relação.
    pub fn neighbors(&self) -> &[usize] {
        &self.targets
    }

    pub fn out_degree(&self) -> usize {
        self.targets.len()
    }

    /// Vizinhos de saída por uma relação específica, na ordem de carga.
    pub fn relation(&self, name: &str) -> &[usize] {
        self.spans
            .iter()
            .find(|(rel, _)| rel == name)
            .map(|(_, range)| &self.targets[range.clone()])
            .unwrap_or(&[])
    }
}

/// Visão de leitura sobre um grafo indexado, comum ao grafo base e ao overlay.
///
/// É tudo o que o PageRank precisa saber sobre o grafo.
pub trait GraphView {
    /// Número total de nós (índices válidos são `0..size()`).
    fn size(&self) -> usize;

    /// Arestas de saída do nó no índice dado.
    fn adjacency(&self, index: usize) -> Option<&Adjacency>;

    fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency(index).map(Adjacency::neighbors).unwrap_or(&[])
    }

    fn out_degree(&self, index: usize) -> usize {
        self.adjacency(index).map(Adjacency::out_degree).unwrap_or(0)
    }

    /// Alvos de uma relação a partir do nó no índice dado.
    fn relation_indices(&self, index: usize, relation: &str) -> &[usize] {
        self.adjacency(index)
            .map(|adj| adj.relation(relation))
            .unwrap_or(&[])
    }
}

/// O grafo base, imutável após a construção.
#[derive(Debug)]
pub struct SenseGraph {
    senses: Vec<Sense>,
    adjacency: Vec<Adjacency>,
    index: HashMap<SenseId, usize>,
    edge_count: usize,
}

impl SenseGraph {
    /// Constrói o grafo a partir dos sentidos, na ordem dada.
    ///
    /// - IDs repetidos: vale a primeira ocorrência, as demais são descartadas.
    /// - Alvos de relação desconhecidos são descartados (e reportados no log).
    /// - Zero sentidos é um erro fatal de construção.
    pub fn from_senses(senses: impl IntoIterator<Item = Sense>) -> Result<Self> {
        let mut unique: Vec<Sense> = Vec::new();
        let mut index: HashMap<SenseId, usize> = HashMap::new();
        let mut duplicates = 0usize;

        for sense in senses {
            if index.contains_key(&sense.id) {
                duplicates += 1;
                continue;
            }
            index.insert(sense.id.clone(), unique.len());
            unique.push(sense);
        }

        if unique.is_empty() {
            return Err(WsdError::GraphConstruction(
                "ontology yielded zero senses".to_string(),
            ));
        }

        let mut dangling = 0usize;
        let mut edge_count = 0usize;
        let adjacency: Vec<Adjacency> = unique
            .iter()
            .map(|sense| {
                let mut adj = Adjacency::new();
                for (relation, targets) in &sense.relations {
                    let resolved: Vec<usize> = targets
                        .iter()
                        .filter_map(|target| {
                            let found = index.get(target).copied();
                            if found.is_none() {
                                dangling += 1;
                            }
                            found
                        })
                        .collect();
                    edge_count += resolved.len();
                    adj.push_relation(relation, resolved);
                }
                adj
            })
            .collect();

        if duplicates > 0 {
            warn!(duplicates, "ignoring repeated sense ids");
        }
        if dangling > 0 {
            warn!(dangling, "dropping relations to unknown senses");
        }
        info!(nodes = unique.len(), edges = edge_count, "sense graph built");

        Ok(Self {
            senses: unique,
            adjacency,
            index,
            edge_count,
        })
    }

    pub fn size(&self) -> usize {
        self.senses.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn sense_at(&self, index: usize) -> Option<&Sense> {
        self.senses.get(index)
    }

    pub fn sense(&self, id: &str) -> Option<&Sense> {
        self.index_of(id).and_then(|i| self.sense_at(i))
    }

    /// Sentidos alcançados a partir de `id` pela relação `relation`, na ordem de carga.
    pub fn relations(&self, id: &str, relation: &str) -> Vec<&Sense> {
        match self.index_of(id) {
            Some(i) => self.adjacency[i]
                .relation(relation)
                .iter()
                .map(|&j| &self.senses[j])
                .collect(),
            None => Vec::new(),
        }
    }
}

impl GraphView for SenseGraph {
    fn size(&self) -> usize {
        self.senses.len()
    }

    fn adjacency(&self, index: usize) -> Option<&Adjacency> {
        self.adjacency.get(index)
    }
}
