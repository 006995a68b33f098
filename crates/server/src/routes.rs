//! HTTP surface of the chat bot.
//!
//! - `GET /` renders the chat page with the session's transcript
//! - `GET /get?msg=...` advances the conversation, returns the reply fragment
//! - `GET /health` reports which artifacts are loaded

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, error};

use conversation::{ConversationMachine, Session};

use crate::config::ServerConfig;
use crate::orchestrator::RecommendationOrchestrator;
use crate::sessions::{SessionId, SessionStore, session_cookie, session_id_from_headers};

pub const BOT_NAME: &str = "Lumi";

const INDEX_TEMPLATE: &str = "index.html";

pub type Machine = ConversationMachine<Arc<RecommendationOrchestrator>>;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to render {template}: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: tera::Error,
    },
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!("{:?}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1>".to_string()),
        )
            .into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    machine: Arc<Machine>,
    sessions: SessionStore,
    templates: Arc<Tera>,
    cookie_name: Arc<str>,
}

impl AppState {
    pub fn new(
        orchestrator: Arc<RecommendationOrchestrator>,
        config: &ServerConfig,
    ) -> Result<Self, tera::Error> {
        Ok(Self {
            machine: Arc::new(ConversationMachine::new(orchestrator)),
            sessions: SessionStore::new(config.session_ttl, config.max_sessions),
            templates: init_templates()?,
            cookie_name: Arc::from(config.session_cookie.as_str()),
        })
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    fn orchestrator(&self) -> &RecommendationOrchestrator {
        self.machine.recommender()
    }
}

fn init_templates() -> Result<Arc<Tera>, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
    Ok(Arc::new(tera))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get", get(get_bot_response))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog_loaded: bool,
    pub products: usize,
    pub classifiers: usize,
    pub sessions: usize,
}

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, PageError> {
    let requested = session_id_from_headers(&headers, &state.cookie_name);
    let access = state
        .sessions
        .with_session(requested, |session| {
            state.machine.greet(session);
            session.history().to_vec()
        })
        .await;

    let mut context = Context::new();
    context.insert("bot_name", BOT_NAME);
    context.insert("messages", &access.value);
    let html = state
        .templates
        .render(INDEX_TEMPLATE, &context)
        .map_err(|source| PageError::Render {
            template: INDEX_TEMPLATE,
            source,
        })?;

    Ok(with_cookie(&state, access.id, access.created, Html(html)))
}

pub async fn get_bot_response(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MessageQuery>,
) -> Response {
    let input = query.msg.unwrap_or_default();
    let requested = session_id_from_headers(&headers, &state.cookie_name);

    let access = state
        .sessions
        .with_session(requested, |session: &mut Session| {
            state.machine.advance(session, &input)
        })
        .await;
    debug!("Session {} replied with {:?}", access.id, access.value.kind);

    with_cookie(&state, access.id, access.created, Html(access.value.text))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let orchestrator = state.orchestrator();
    let catalog_loaded = orchestrator.catalog().is_some();
    let classifiers = orchestrator.ensemble().len();

    Json(HealthResponse {
        status: if catalog_loaded && classifiers > 0 {
            "ready"
        } else {
            "degraded"
        },
        catalog_loaded,
        products: orchestrator.catalog().map_or(0, |c| c.len()),
        classifiers,
        sessions: state.sessions.len().await,
    })
}

fn with_cookie(state: &AppState, id: SessionId, created: bool, body: Html<String>) -> Response {
    if created {
        ([(header::SET_COOKIE, session_cookie(&state.cookie_name, id))], body).into_response()
    } else {
        body.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::HeaderValue;
    use catalog::{Catalog, Product};
    use conversation::Step;
    use pipeline::RecommendationSelector;
    use predictor::{Classifier, ClassifierError, Ensemble, FeatureRecord};

    struct Fixed(&'static str);

    impl Classifier for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _features: &FeatureRecord) -> Result<String, ClassifierError> {
            Ok(self.0.to_string())
        }
    }

    fn state(catalog: Option<Catalog>) -> AppState {
        state_with(catalog, &ServerConfig::default())
    }

    fn state_with(catalog: Option<Catalog>, config: &ServerConfig) -> AppState {
        let orchestrator = RecommendationOrchestrator::new(
            catalog.map(Arc::new),
            Ensemble::new().with_classifier(Fixed("Serum")),
            RecommendationSelector::default(),
        );
        AppState::new(Arc::new(orchestrator), config).unwrap()
    }

    fn serum_catalog() -> Catalog {
        Catalog::from_products(vec![
            Product::new("Glow Serum", "Serum", Some(4.7), "https://shop.example/glow"),
            Product::new("Calm Serum", "Serum", Some(4.1), "https://shop.example/calm"),
        ])
    }

    fn cookie_headers(response: &Response) -> HeaderMap {
        let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        let (pair, _) = set_cookie.split_once(';').unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());
        headers
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn send(state: &AppState, headers: &HeaderMap, msg: &str) -> Response {
        get_bot_response(
            State(state.clone()),
            headers.clone(),
            Query(MessageQuery {
                msg: Some(msg.to_string()),
            }),
        )
        .await
    }

    #[tokio::test]
    async fn test_index_seeds_first_question() {
        let state = state(Some(serum_catalog()));

        let response = index(State(state.clone()), HeaderMap::new()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let headers = cookie_headers(&response);
        let html = body_text(response).await;
        assert!(html.contains("<b>skin type</b>"));
        assert!(html.contains("Lumi"));

        // Reload keeps the same session and doesn't greet twice
        let response = index(State(state.clone()), headers.clone()).await.unwrap();
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let html = body_text(response).await;
        assert_eq!(html.matches("<b>skin type</b>").count(), 1);
        assert_eq!(state.sessions().len().await, 1);
    }

    #[tokio::test]
    async fn test_full_conversation_over_http() {
        let state = state(Some(serum_catalog()));
        let response = index(State(state.clone()), HeaderMap::new()).await.unwrap();
        let headers = cookie_headers(&response);

        for answer in ["oily", "fair", "black"] {
            let response = send(&state, &headers, answer).await;
            assert!(response.headers().get(header::SET_COOKIE).is_none());
        }
        let html = body_text(send(&state, &headers, "brown").await).await;

        assert!(html.contains("<b>Serum</b>"));
        assert!(html.contains("Glow Serum"));
        assert!(html.contains("Calm Serum"));
        assert!(html.contains("restart"));
    }

    #[tokio::test]
    async fn test_user_text_is_escaped_on_reload() {
        let state = state(Some(serum_catalog()));
        let response = index(State(state.clone()), HeaderMap::new()).await.unwrap();
        let headers = cookie_headers(&response);

        let reply = body_text(send(&state, &headers, "<i>oily</i>").await).await;
        assert!(reply.starts_with("⚠️ Oops!"));

        let html = body_text(index(State(state.clone()), headers).await.unwrap()).await;
        assert!(html.contains("&lt;i&gt;oily&lt;&#x2F;i&gt;"));
        assert!(!html.contains("<i>oily</i>"));
    }

    #[tokio::test]
    async fn test_missing_msg_is_invalid_choice() {
        let state = state(Some(serum_catalog()));

        let response = get_bot_response(
            State(state.clone()),
            HeaderMap::new(),
            Query(MessageQuery::default()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
        let text = body_text(response).await;
        assert_eq!(text, "⚠️ Oops! Please choose from: Oily, Dry, Normal, Combination");
    }

    #[tokio::test]
    async fn test_restart_over_http() {
        let state = state(Some(serum_catalog()));
        let response = index(State(state.clone()), HeaderMap::new()).await.unwrap();
        let headers = cookie_headers(&response);
        send(&state, &headers, "dry").await;

        let text = body_text(send(&state, &headers, "RESTART").await).await;
        assert!(text.contains("<b>skin type</b>"));

        let id = session_id_from_headers(&headers, "lumi_session").unwrap();
        let session = state.sessions().get(id).await.unwrap();
        assert_eq!(session.step(), Step::AskingSkinType);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_catalog_reports_unavailable() {
        let state = state(None);
        let headers = cookie_headers(&send(&state, &HeaderMap::new(), "oily").await);
        for answer in ["fair", "black"] {
            send(&state, &headers, answer).await;
        }

        let text = body_text(send(&state, &headers, "brown").await).await;
        assert!(text.contains("trouble accessing product data"));
    }

    #[tokio::test]
    async fn test_cookieless_clients_do_not_grow_sessions_unbounded() {
        let config = ServerConfig {
            max_sessions: 25,
            ..ServerConfig::default()
        };
        let state = state_with(Some(serum_catalog()), &config);

        for _ in 0..500 {
            let response = send(&state, &HeaderMap::new(), "oily").await;
            assert!(response.headers().get(header::SET_COOKIE).is_some());
        }
        assert_eq!(state.sessions().len().await, 25);
        assert_eq!(health(State(state.clone())).await.0.sessions, 25);
    }

    #[tokio::test]
    async fn test_health() {
        let ready = health(State(state(Some(serum_catalog())))).await.0;
        assert_eq!(
            ready,
            HealthResponse {
                status: "ready",
                catalog_loaded: true,
                products: 2,
                classifiers: 1,
                sessions: 0,
            }
        );

        let degraded = health(State(state(None))).await.0;
        assert_eq!(degraded.status, "degraded");
        assert!(!degraded.catalog_loaded);
        assert_eq!(degraded.products, 0);
    }
}
