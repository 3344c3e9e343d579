use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};

use llm_relay::{
    LlmRelay, RelayError,
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::ProviderErrorKind,
};

/// Serves `router` on an ephemeral local port and returns its base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn openai_cfg(endpoint: String) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: "gpt-4o-mini".into(),
        endpoint,
        api_key: Some("sk-test".into()),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(5),
    }
}

/// Echoes `system|user` back, after checking the bearer token.
async fn echo_completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer sk-test") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
    }
    let messages = body["messages"].as_array().cloned().unwrap_or_default();
    let joined: Vec<String> = messages
        .iter()
        .map(|m| format!("{}={}", m["role"].as_str().unwrap_or(""), m["content"].as_str().unwrap_or("")))
        .collect();
    (
        StatusCode::OK,
        Json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": joined.join("|")}}]
        })),
    )
}

#[tokio::test]
async fn openai_reply_is_returned_verbatim() {
    let base = spawn_upstream(Router::new().route("/v1/chat/completions", post(echo_completion))).await;
    let relay = LlmRelay::new(openai_cfg(base)).unwrap();

    let reply = relay.chat("안녕", Some("도우미")).await.unwrap();
    assert_eq!(reply, "system=도우미|user=안녕");
}

#[tokio::test]
async fn non_success_status_becomes_provider_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
    );
    let base = spawn_upstream(router).await;
    let relay = LlmRelay::new(openai_cfg(base)).unwrap();

    let err = relay.chat("안녕", None).await.unwrap_err();
    match &err {
        RelayError::Provider(p) => match &p.kind {
            ProviderErrorKind::HttpStatus(h) => {
                assert_eq!(h.status.as_u16(), 502);
                assert_eq!(h.snippet, "upstream exploded");
            }
            other => panic!("unexpected kind: {other:?}"),
        },
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("upstream exploded"));
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let base = spawn_upstream(router).await;
    let relay = LlmRelay::new(openai_cfg(base)).unwrap();

    let err = relay.chat("안녕", None).await.unwrap_err();
    assert!(matches!(
        err,
        RelayError::Provider(ref p) if matches!(p.kind, ProviderErrorKind::EmptyChoices)
    ));
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let router = Router::new().route("/v1/chat/completions", post(|| async { "not json" }));
    let base = spawn_upstream(router).await;
    let relay = LlmRelay::new(openai_cfg(base)).unwrap();

    let err = relay.chat("안녕", None).await.unwrap_err();
    assert!(matches!(
        err,
        RelayError::Provider(ref p) if matches!(p.kind, ProviderErrorKind::Decode(_))
    ));
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let relay = LlmRelay::new(openai_cfg(format!("http://{addr}"))).unwrap();
    let err = relay.chat("안녕", None).await.unwrap_err();
    assert!(matches!(err, RelayError::HttpTransport(_)));
}

#[tokio::test]
async fn ollama_chat_reads_message_content() {
    let router = Router::new().route(
        "/api/chat",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["stream"], false);
            let user = body["messages"][1]["content"].as_str().unwrap_or("").to_string();
            Json(json!({
                "model": "llama3.1",
                "message": {"role": "assistant", "content": format!("re: {user}")},
                "done": true
            }))
        }),
    );
    let base = spawn_upstream(router).await;
    let relay = LlmRelay::new(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: "llama3.1".into(),
        endpoint: base,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.1),
        top_p: None,
        timeout_secs: Some(5),
    })
    .unwrap();

    assert_eq!(relay.provider(), LlmProvider::Ollama);
    assert_eq!(relay.model(), "llama3.1");
    assert_eq!(relay.chat("급식", Some("sys")).await.unwrap(), "re: 급식");
}
