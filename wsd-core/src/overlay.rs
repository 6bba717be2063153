//! # Overlay de Grafo por Chamada
//!
//! O [`GraphOverlay`] estende um [`SenseGraph`] com **pseudo-nós** válidos
//! apenas durante uma desambiguação. Cada pseudo-nó representa uma palavra da
//! sentença e aponta, por uma relação designada, para os sentidos candidatos
//! daquela palavra no grafo base.
//!
//! ```text
//!  índices:  0 ........ base.size()-1 | base.size() ... size()-1
//!            [   grafo base (&)      ] [  delta (pseudo-nós)  ]
//! ```
//!
//! A busca é em duas camadas: primeiro o delta, depois a base. O overlay só
//! guarda uma referência compartilhada à base, então nunca a altera, e
//! descartá-lo custa O(|delta|), independente do tamanho da base.

use std::collections::HashMap;
use std::ops::Range;

use crate::graph::{Adjacency, GraphView, SenseGraph};
use crate::sense::{Sense, SenseId};

/// Nó sintético criado para uma palavra do contexto.
#[derive(Debug, Clone)]
pub struct PseudoNode {
    /// Identidade gerada a partir da palavra, única dentro do overlay (ex: `"#pseudo:0:bank"`).
    pub id: SenseId,
    adjacency: Adjacency,
}

impl PseudoNode {
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }
}

/// Um nó resolvido pelo overlay: da ontologia ou sintético.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Sense(&'a Sense),
    Pseudo(&'a PseudoNode),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a SenseId {
        match self {
            NodeRef::Sense(sense) => &sense.id,
            NodeRef::Pseudo(node) => &node.id,
        }
    }

    pub fn is_pseudo(&self) -> bool {
        matches!(self, NodeRef::Pseudo(_))
    }

    pub fn as_sense(&self) -> Option<&'a Sense> {
        match self {
            NodeRef::Sense(sense) => Some(sense),
            NodeRef::Pseudo(_) => None,
        }
    }
}

/// Visão `base ∪ delta` de um grafo de sentidos.
#[derive(Debug)]
pub struct GraphOverlay<'g> {
    base: &'g SenseGraph,
    delta: Vec<PseudoNode>,
    delta_index: HashMap<SenseId, usize>,
}

impl<'g> GraphOverlay<'g> {
    pub fn new(base: &'g SenseGraph) -> Self {
        Self {
            base,
            delta: Vec::new(),
            delta_index: HashMap::new(),
        }
    }

    /// Cria um pseudo-nó ligado por `relation` a cada candidato.
    ///
    /// Candidatos repetidos geram arestas repetidas. Candidatos que não
    /// existem na base são ignorados. Retorna `None` quando nenhum candidato
    /// sobra: nesse caso nada é adicionado ao overlay.
    pub fn add_pseudo_node(
        &mut self,
        word: &str,
        candidates: &[SenseId],
        relation: &str,
    ) -> Option<usize> {
        let targets: Vec<usize> = candidates
            .iter()
            .filter_map(|id| self.base.index_of(id.as_str()))
            .collect();
        if targets.is_empty() {
            return None;
        }

        let mut adjacency = Adjacency::new();
        adjacency.push_relation(relation, targets);

        let index = self.base.size() + self.delta.len();
        let id = SenseId(format!("#pseudo:{}:{}", self.delta.len(), word));
        self.delta_index.insert(id.clone(), self.delta.len());
        self.delta.push(PseudoNode { id, adjacency });
        Some(index)
    }

    pub fn size(&self) -> usize {
        self.base.size() + self.delta.len()
    }

    /// Quantos pseudo-nós foram adicionados.
    pub fn delta_size(&self) -> usize {
        self.delta.len()
    }

    /// Intervalo de índices ocupado pelos pseudo-nós.
    pub fn pseudo_indices(&self) -> Range<usize> {
        self.base.size()..self.size()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        match self.delta_index.get(id) {
            Some(&local) => Some(self.base.size() + local),
            None => self.base.index_of(id),
        }
    }

    pub fn node_at(&self, index: usize) -> Option<NodeRef<'_>> {
        let base_size = self.base.size();
        if index >= base_size {
            self.delta.get(index - base_size).map(NodeRef::Pseudo)
        } else {
            self.base.sense_at(index).map(NodeRef::Sense)
        }
    }

    /// Sentido da ontologia no índice dado (`None` para pseudo-nós).
    pub fn sense_at(&self, index: usize) -> Option<&'g Sense> {
        self.base.sense_at(index)
    }

    /// Nós alcançados a partir de `id` pela relação dada, na ordem determinística.
    pub fn relations(&self, id: &str, relation: &str) -> Vec<NodeRef<'_>> {
        match self.index_of(id) {
            Some(index) => self
                .relation_indices(index, relation)
                .iter()
                .filter_map(|&j| self.node_at(j))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl GraphView for GraphOverlay<'_> {
    fn size(&self) -> usize {
        GraphOverlay::size(self)
    }

    fn adjacency(&self, index: usize) -> Option<&Adjacency> {
        let base_size = self.base.size();
        if index >= base_size {
            self.delta.get(index - base_size).map(PseudoNode::adjacency)
        } else {
            self.base.adjacency(index)
        }
    }
}
