use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::chat;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware, REQUEST_ID_HEADER};
use super::state::AppState;
use super::types::ApiError;

/// Build the HTTP surface
///
/// `/metrics` is only routed when the state carries a Prometheus handle.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let mut router = Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health_check))
        .route("/api/chat", post(chat::chat));

    if state.metrics.is_some() {
        router = router.route("/metrics", get(metrics_handler));
    }

    let request_id = header::HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(cors_layer(cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    state
        .metrics
        .as_ref()
        .map(|metrics| metrics.render())
        .unwrap_or_default()
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::state::LOCAL_BADGE;
    use crate::domain::provider::MockUpstreamInvoker;
    use crate::domain::responder::FixedSelector;
    use crate::domain::{
        ChainConfig, Credential, FallbackChain, LocalResponder, ProviderDescriptor, ProviderKind,
        ProviderOutcome, ProviderSet,
    };

    fn providers() -> Arc<ProviderSet> {
        let groq = ProviderDescriptor::new(
            "groq",
            ProviderKind::OpenAi,
            "https://api.groq.com/openai/v1/chat/completions",
            "llama-3.1-8b-instant",
        )
        .with_credential(Some(Credential::new("gsk-test")))
        .with_badge("🚀 **[Groq Llama3]**");

        Arc::new(ProviderSet::new(vec![groq]).unwrap())
    }

    fn state(invoker: MockUpstreamInvoker) -> AppState {
        let chain = FallbackChain::new(
            providers(),
            Arc::new(invoker),
            Arc::new(LocalResponder::builtin().with_selector(Arc::new(FixedSelector(0)))),
            ChainConfig::default(),
        );
        AppState::new(Arc::new(chain))
    }

    fn app(state: AppState) -> Router {
        create_router(state, &["http://localhost:5500".to_string()])
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_returns_provider_reply() {
        let mut invoker = MockUpstreamInvoker::new();
        invoker
            .expect_invoke()
            .times(1)
            .returning(|_, _| ProviderOutcome::success("Closures capture variables."));

        let response = app(state(invoker))
            .oneshot(post_chat(r#"{"message": "what is a closure?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let body = json_body(response).await;
        assert_eq!(body, serde_json::json!({ "reply": "Closures capture variables." }));
    }

    #[tokio::test]
    async fn test_chat_falls_back_to_local_reply() {
        let mut invoker = MockUpstreamInvoker::new();
        invoker
            .expect_invoke()
            .times(1)
            .returning(|_, _| ProviderOutcome::RateLimited);

        let response = app(state(invoker))
            .oneshot(post_chat(r#"{"message": "hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["reply"],
            "Hello! I'm MindSpark AI. How can I help you today?"
        );
    }

    #[tokio::test]
    async fn test_empty_message_never_reaches_chain() {
        let mut invoker = MockUpstreamInvoker::new();
        invoker.expect_invoke().never();
        let app = app(state(invoker));

        for body in [r#"{"message": ""}"#, r#"{"message": "   "}"#, r#"{}"#] {
            let response = app.clone().oneshot(post_chat(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {}", body);

            let json = json_body(response).await;
            assert_eq!(json["error"]["type"], "invalid_request_error");
            assert_eq!(json["error"]["param"], "message");
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let mut invoker = MockUpstreamInvoker::new();
        invoker.expect_invoke().never();

        let response = app(state(invoker))
            .oneshot(post_chat("{\"message\": "))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["code"], "invalid_json");
    }

    #[tokio::test]
    async fn test_badges() {
        let mut invoker = MockUpstreamInvoker::new();
        let mut calls = 0;
        invoker.expect_invoke().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                ProviderOutcome::success("From Groq.")
            } else {
                ProviderOutcome::Unavailable
            }
        });

        let app = app(state(invoker).with_badges(true));

        let response = app.clone().oneshot(post_chat(r#"{"message": "q"}"#)).await.unwrap();
        assert_eq!(json_body(response).await["reply"], "🚀 **[Groq Llama3]** From Groq.");

        let response = app.oneshot(post_chat(r#"{"message": "hey"}"#)).await.unwrap();
        let reply = json_body(response).await["reply"].as_str().unwrap().to_string();
        assert!(reply.starts_with(LOCAL_BADGE));
    }

    #[tokio::test]
    async fn test_health_lists_enabled_providers() {
        let response = app(state(MockUpstreamInvoker::new()))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["providers"], serde_json::json!(["groq"]));
    }

    #[tokio::test]
    async fn test_banner_and_unknown_route() {
        let app = app(state(MockUpstreamInvoker::new()));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metrics_route_absent_when_disabled() {
        let response = app(state(MockUpstreamInvoker::new()))
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_preflight_for_allowed_origin() {
        let response = app(state(MockUpstreamInvoker::new()))
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/chat")
                    .header("origin", "http://localhost:5500")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5500"
        );
    }
}
