//! # Erros do Motor de Desambiguação
//!
//! Apenas falhas de contrato e de construção são erros. Os desfechos esperados
//! por token (palavra sem sentidos no dicionário, ranking degenerado) são
//! valores de [`crate::wsd::SkipReason`], não erros.

use thiserror::Error;

/// Erros produzidos pelo grafo, pelo PageRank e pela carga da ontologia.
#[derive(Debug, Error)]
pub enum WsdError {
    /// A ontologia não pôde ser carregada ou não contém nenhum sentido.
    /// Fatal: sem grafo base não há o que desambiguar.
    #[error("graph construction error: {0}")]
    GraphConstruction(String),

    /// O grafo entregue ao PageRank é inválido (ex: zero nós).
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// O vetor de personalização é inválido (pesos negativos, soma zero, índice fora do grafo).
    #[error("invalid personalization: {0}")]
    InvalidPersonalization(String),

    /// Configuração fora dos limites aceitos.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WsdError>;
