//! # Configuração do Motor
//!
//! Parâmetros do PageRank e da janela de contexto. Todos os campos têm valores
//! padrão, então um JSON parcial (ou vazio, `{}`) é uma configuração válida.
//!
//! ```rust
//! use wsd_core::config::WsdConfig;
//!
//! let config = WsdConfig::from_json_str(r#"{"window_radius": 3}"#).unwrap();
//! assert_eq!(config.window_radius, 3);
//! assert!((config.pagerank.damping - 0.85).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, WsdError};

/// Nome da relação que liga um pseudo-nó aos seus sentidos candidatos.
pub const LINK_RELATION: &str = "related";

/// Parâmetros da iteração de potência.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probabilidade de seguir uma aresta em vez de reiniciar (tipicamente 0.85).
    pub damping: f64,
    /// Limite da variação L1 entre duas iterações para considerar convergência.
    pub tolerance: f64,
    /// Teto de iterações. Garante término mesmo sem convergência.
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl PageRankConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.damping) {
            return Err(WsdError::InvalidConfig(format!(
                "damping must be in [0, 1) (got {})",
                self.damping
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(WsdError::InvalidConfig(format!(
                "tolerance must be finite and > 0 (got {})",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(WsdError::InvalidConfig(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuração completa do desambiguador.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WsdConfig {
    /// Quantos tokens antes e depois do foco entram no contexto.
    pub window_radius: usize,
    /// Relação usada para ligar pseudo-nós aos candidatos.
    pub link_relation: String,
    pub pagerank: PageRankConfig,
}

impl Default for WsdConfig {
    fn default() -> Self {
        Self {
            window_radius: 5,
            link_relation: LINK_RELATION.to_string(),
            pagerank: PageRankConfig::default(),
        }
    }
}

impl WsdConfig {
    /// Lê uma configuração JSON e valida os limites.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: WsdConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.link_relation.is_empty() {
            return Err(WsdError::InvalidConfig(
                "link_relation must not be empty".to_string(),
            ));
        }
        self.pagerank.validate()
    }
}
