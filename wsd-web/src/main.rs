//! Servidor web Axum com WebSocket para visualização da desambiguação em tempo real

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wsd_core::{
    corpus::{demo_ontology, demo_sentences},
    tokenizer::{tokenize, tokenize_tagged, Token},
    wsd::{PageRankWsd, TokenDecision, WsdEvent},
    Ontology, WsdConfig,
};

/// Estado compartilhado da aplicação
struct AppState {
    wsd: PageRankWsd,
}

/// Parâmetros de uma análise, iguais para HTTP e WebSocket.
#[derive(Deserialize)]
struct DisambiguateRequest {
    text: String,
    /// Entrada no formato `palavra/TAG`.
    #[serde(default)]
    tagged: bool,
    #[serde(default)]
    window_radius: Option<usize>,
    #[serde(default)]
    damping: Option<f64>,
}

#[derive(Serialize)]
struct DisambiguateResponse {
    tokens: Vec<Token>,
    decisions: Vec<TokenDecision>,
    assigned: usize,
    total_tokens: usize,
    processing_ms: u64,
}

impl DisambiguateRequest {
    fn tokens(&self) -> Vec<Token> {
        if self.tagged {
            tokenize_tagged(&self.text)
        } else {
            tokenize(&self.text)
        }
    }

    /// Desambiguador com os ajustes pedidos aplicados sobre a configuração do servidor.
    fn engine(&self, base: &PageRankWsd) -> wsd_core::Result<PageRankWsd> {
        if self.window_radius.is_none() && self.damping.is_none() {
            return Ok(base.clone());
        }
        let mut config = base.config().clone();
        if let Some(radius) = self.window_radius {
            config.window_radius = radius;
        }
        if let Some(damping) = self.damping {
            config.pagerank.damping = damping;
        }
        base.with_config(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let ontology = match std::env::var("WSD_ONTOLOGY") {
        Ok(path) => Ontology::from_path(path)?,
        Err(_) => {
            info!("WSD_ONTOLOGY não definido, usando a ontologia de demonstração");
            demo_ontology()
        }
    };
    let wsd = PageRankWsd::from_ontology(ontology, WsdConfig::default())?;
    let state = Arc::new(AppState { wsd });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/disambiguate", post(disambiguate_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-sentences", get(demo_sentences_handler))
        .layer(cors)
        .with_state(state);

    let addr = std::env::var("WSD_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Servidor WSD iniciado em http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

fn bad_request(message: String) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Desambiguação via HTTP POST (sem streaming)
async fn disambiguate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DisambiguateRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return bad_request("Texto vazio".to_string());
    }
    let wsd = match req.engine(&state.wsd) {
        Ok(wsd) => wsd,
        Err(e) => return bad_request(e.to_string()),
    };

    let mut tokens = req.tokens();
    let result = tokio::task::spawn_blocking(move || {
        let start = std::time::Instant::now();
        let decisions = wsd.disambiguate(&mut tokens);
        (tokens, decisions, start.elapsed().as_millis() as u64)
    })
    .await;

    match result {
        Ok((tokens, decisions, processing_ms)) => {
            let assigned = decisions.iter().filter(|d| d.is_assigned()).count();
            Json(DisambiguateResponse {
                total_tokens: tokens.len(),
                tokens,
                decisions,
                assigned,
                processing_ms,
            })
            .into_response()
        }
        Err(e) => {
            warn!(error = %e, "disambiguation task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Retorna sentenças de demonstração
async fn demo_sentences_handler() -> impl IntoResponse {
    let sentences: Vec<serde_json::Value> = demo_sentences()
        .iter()
        .map(|(domain, text)| {
            serde_json::json!({
                "domain": domain,
                "text": text
            })
        })
        .collect();
    Json(sentences)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe a sentença, desambigua e envia os eventos passo a passo
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // JSON {text, tagged, window_radius, damping}; senão o texto puro
                let req = serde_json::from_str::<DisambiguateRequest>(&text).unwrap_or_else(|_| {
                    DisambiguateRequest {
                        text: text.trim().to_string(),
                        tagged: false,
                        window_radius: None,
                        damping: None,
                    }
                });
                if req.text.trim().is_empty() {
                    continue;
                }

                let wsd = match req.engine(&state.wsd) {
                    Ok(wsd) => wsd,
                    Err(e) => {
                        let error = serde_json::json!({ "type": "Error", "data": e.to_string() });
                        if socket.send(Message::Text(error.to_string())).await.is_err() {
                            return;
                        }
                        continue;
                    }
                };

                let mut tokens = req.tokens();
                info!("Desambiguando via WebSocket: {} tokens", tokens.len());

                // O desambiguador é síncrono: roda fora do runtime
                let (tx, rx) = std::sync::mpsc::channel::<WsdEvent>();
                let handle = tokio::task::spawn_blocking(move || {
                    wsd.disambiguate_streaming(&mut tokens, &tx);
                });
                handle.await.ok();

                let events: Vec<WsdEvent> = rx.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pausa curta para a animação passo a passo
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
