use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use reply::Dispatcher;
use tracing::instrument;

pub const CHAT_PATH: &str = "/api/chat";

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct ChatRequest {
    /// Missing and `null` both mean an empty message.
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

#[derive(serde::Serialize, Debug, Clone)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Clone, Default)]
pub struct AppState {
    dispatcher: Dispatcher,
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route(CHAT_PATH, post(chat_handler))
        .with_state(AppState::default())
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[instrument(skip_all, fields(rule, message_len))]
async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let span = tracing::Span::current();
    let message = request.message();

    let reply = state.dispatcher.dispatch(message);

    span.record("rule", reply.rule.as_str());
    span.record("message_len", message.len());
    tracing::info!("SUCCESS");

    Json(ChatResponse { reply: reply.text })
}
