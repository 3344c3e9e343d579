use std::{collections::HashMap, path::Path, sync::Arc};

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::post,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use api::{
    core::{
        app_config::{AllowedOrigins, AppConfig, DEFAULT_SYSTEM_PROMPT},
        app_state::AppState,
    },
    router,
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

/// Completion mock answering with `system|user` so tests can see both.
fn echo_upstream() -> Router {
    Router::new().route(
        "/v1/chat/completions",
        post(|Json(body): Json<Value>| async move {
            let system = body["messages"][0]["content"].as_str().unwrap_or("").to_string();
            let user = body["messages"][1]["content"].as_str().unwrap_or("").to_string();
            Json(json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": format!("{system}|{user}")}}]
            }))
        }),
    )
}

fn app(vars: &[(&str, &str)]) -> Router {
    let mut map: HashMap<String, String> = HashMap::from([
        ("OPENAI_API_KEY".to_string(), "sk-test".to_string()),
        ("LLM_ENDPOINT".to_string(), "http://127.0.0.1:9".to_string()),
        ("LLM_TIMEOUT_SECS".to_string(), "5".to_string()),
    ]);
    for (k, v) in vars {
        map.insert(k.to_string(), v.to_string());
    }
    let cfg = AppConfig::from_lookup(move |key: &str| map.get(key).cloned()).unwrap();
    let state = AppState::from_config(cfg).unwrap();
    router(Arc::new(state), &AllowedOrigins::Any)
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn chat_uses_default_system_prompt() {
    let base = spawn_upstream(echo_upstream()).await;
    let app = app(&[("LLM_ENDPOINT", base.as_str())]);

    let (status, body) = send(app, post_json("/chat", r#"{"message":"안녕"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reply": format!("{DEFAULT_SYSTEM_PROMPT}|안녕")}));
}

#[tokio::test]
async fn chat_honours_custom_system_prompt_on_api_path() {
    let base = spawn_upstream(echo_upstream()).await;
    let app = app(&[("LLM_ENDPOINT", base.as_str())]);

    let (status, body) = send(
        app,
        post_json("/api/chat", r#"{"message":"급식?","system":"짧게 답해"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "짧게 답해|급식?");
}

#[tokio::test]
async fn blank_system_prompt_falls_back_to_configured_default() {
    let base = spawn_upstream(echo_upstream()).await;
    let app = app(&[("LLM_ENDPOINT", base.as_str()), ("SYSTEM_PROMPT", "기본 안내")]);

    let (_, body) = send(app, post_json("/chat", r#"{"message":"hi","system":"   "}"#)).await;
    assert_eq!(body["reply"], "기본 안내|hi");
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let (status, body) = send(app(&[]), post_json("/chat", r#"{"message":"  "}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (status, body) = send(app(&[]), post_json("/chat", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (status, _) = send(app(&[]), post_json("/chat", r#"{"system":"x"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upstream_failure_becomes_relay_error() {
    let upstream = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
    );
    let base = spawn_upstream(upstream).await;
    let app = app(&[("LLM_ENDPOINT", base.as_str())]);

    let (status, body) = send(app, post_json("/chat", r#"{"message":"안녕"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "LLM_RELAY_FAILED");
    assert!(body["message"].as_str().unwrap().contains("overloaded"));
}

#[tokio::test]
async fn health_on_both_paths() {
    for path in ["/health", "/api/health"] {
        let (status, body) = send(app(&[]), get(path)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "service": "pangyo-qna"}));
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = send(app(&[]), get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn temperature_is_parsed_from_command_output() {
    let (status, body) = send(app(&[("TEMP_COMMAND", "echo temp=48.3'C")]), get("/api/temp")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"temperature": 48.3, "unit": "°C"}));
}

#[tokio::test]
async fn failing_temperature_command_reports_error_with_ok_status() {
    let (status, body) = send(app(&[("TEMP_COMMAND", "false")]), get("/api/temp")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].is_string());
    assert!(body.get("temperature").is_none());
}

fn write_knowledge(dir: &Path) -> String {
    let entries = json!([
        {
            "id": "배정은-어떻게-되나요",
            "category": "학교 현황 · 배정",
            "question": "배정은 어떻게 되나요?",
            "answer": "학군 내 추첨으로 배정됩니다.",
            "sources": ["general-a.html"],
            "tags": ["입학·배정"]
        },
        {
            "id": "급식은-어떻게-운영되나요",
            "category": "교과 · 비교과 운영",
            "question": "급식은 어떻게 운영되나요?",
            "answer": "중식과 석식을 제공합니다.",
            "sources": ["general-b.html"],
            "tags": ["생활지원"]
        },
        {
            "id": "ace-프로그램은-무엇인가요",
            "category": "ACE 프로그램",
            "question": "ACE 프로그램은 무엇인가요?",
            "answer": "심화 탐구 프로그램입니다.",
            "sources": ["ace.html"],
            "tags": ["비교과·프로그램", "ACE특화"]
        }
    ]);
    let path = dir.join("knowledgeBase.json");
    std::fs::write(&path, serde_json::to_string_pretty(&entries).unwrap()).unwrap();
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn knowledge_lists_and_searches_loaded_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_knowledge(dir.path());

    let (status, body) = send(app(&[("KNOWLEDGE_JSON", path.as_str())]), get("/knowledge")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["entries"].as_array().unwrap().len(), 3);

    let (status, body) = send(
        app(&[("KNOWLEDGE_JSON", path.as_str())]),
        get("/api/knowledge?q=%EA%B8%89%EC%8B%9D&limit=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let hits = body["entries"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], "급식은-어떻게-운영되나요");
}

#[tokio::test]
async fn missing_knowledge_file_serves_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");

    let (status, body) = send(
        app(&[("KNOWLEDGE_JSON", missing.to_str().unwrap())]),
        get("/knowledge?q=%EB%B0%B0%EC%A0%95"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"total": 0, "entries": []}));
}

#[tokio::test]
async fn invalid_limit_is_a_bad_request() {
    let (status, body) = send(app(&[]), get("/knowledge?q=x&limit=lots")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
}
