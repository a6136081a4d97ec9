//! 生成APIクライアントテスト
//!
//! ローカルに立てたモックサーバに対してmultipart送信と応答処理を検証

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use imagegen_common::{Error, GeneratorConfig};
use imagegen_rust::{Config, GenerationBackend, GenerationClient, UploadFile};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// モックサーバが受け取ったパート
#[derive(Debug, Clone, Default)]
struct ReceivedPart {
    name: String,
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

type Received = Arc<Mutex<Vec<ReceivedPart>>>;

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/generate", addr)
}

async fn record_and_generate(
    State(received): State<Received>,
    mut multipart: Multipart,
) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let part = ReceivedPart {
            name: field.name().unwrap_or_default().to_string(),
            file_name: field.file_name().unwrap_or_default().to_string(),
            content_type: field.content_type().unwrap_or_default().to_string(),
            bytes: field.bytes().await.unwrap().to_vec(),
        };
        received.lock().unwrap().push(part);
    }
    Json(json!({ "generated_image_url": "http://x/out.png" }))
}

fn client_for(endpoint: &str) -> GenerationClient {
    let config = Config {
        generator: GeneratorConfig::with_endpoint(endpoint),
        ..Config::default()
    };
    GenerationClient::new(&config).expect("client init failed")
}

fn sketch() -> UploadFile {
    UploadFile::from_bytes("sketch.png", "image/png", vec![0x89, b'P', b'N', b'G', 1, 2, 3])
}

/// 成功時は生成画像URLを返す
#[tokio::test]
async fn test_generate_success() {
    let received = Received::default();
    let router = Router::new()
        .route("/generate", post(record_and_generate))
        .with_state(received.clone());
    let endpoint = spawn_server(router).await;

    let result = client_for(&endpoint).generate(&sketch()).await.unwrap();
    assert_eq!(result.image_url, "http://x/out.png");
}

/// multipartは `image` フィールド1つで、元のContent-Typeとファイル名を保つ
#[tokio::test]
async fn test_generate_sends_single_image_part() {
    let received = Received::default();
    let router = Router::new()
        .route("/generate", post(record_and_generate))
        .with_state(received.clone());
    let endpoint = spawn_server(router).await;

    client_for(&endpoint).generate(&sketch()).await.unwrap();

    let parts = received.lock().unwrap().clone();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, "image");
    assert_eq!(parts[0].file_name, "sketch.png");
    assert_eq!(parts[0].content_type, "image/png");
    assert_eq!(parts[0].bytes, sketch().bytes);
}

/// 500は本文に関わらず固定メッセージ
#[tokio::test]
async fn test_generate_server_error() {
    let router = Router::new().route(
        "/generate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Traceback ...") }),
    );
    let endpoint = spawn_server(router).await;

    let err = client_for(&endpoint).generate(&sketch()).await.unwrap_err();
    assert!(matches!(err, Error::RequestFailed { status: 500 }));
    assert_eq!(err.to_string(), "Image processing failed");
}

/// 400（サーバ側の形式エラー）も同じ扱い
#[tokio::test]
async fn test_generate_bad_request() {
    let router = Router::new().route(
        "/generate",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid file format" })),
            )
        }),
    );
    let endpoint = spawn_server(router).await;

    let err = client_for(&endpoint).generate(&sketch()).await.unwrap_err();
    assert_eq!(err.to_string(), "Image processing failed");
}

/// 2xxでもJSONでなければパースエラー
#[tokio::test]
async fn test_generate_malformed_json() {
    let router = Router::new().route("/generate", post(|| async { "definitely not json" }));
    let endpoint = spawn_server(router).await;

    let err = client_for(&endpoint).generate(&sketch()).await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

/// 結果フィールドが無い
#[tokio::test]
async fn test_generate_missing_result_field() {
    let router = Router::new().route(
        "/generate",
        post(|| async { Json(json!({ "status": "ok" })) }),
    );
    let endpoint = spawn_server(router).await;

    let err = client_for(&endpoint).generate(&sketch()).await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert!(err.to_string().contains("generated_image_url"));
}

/// 接続拒否は下位エラーのメッセージを保持
#[tokio::test]
async fn test_generate_connection_refused() {
    // 一度bindしたポートを解放して、誰も待ち受けていないアドレスを作る
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = format!("http://{}/generate", addr);
    let err = client_for(&endpoint).generate(&sketch()).await.unwrap_err();

    match err {
        Error::Network(message) => {
            // OSの接続拒否メッセージまで含む
            assert!(
                message.to_lowercase().contains("refused"),
                "message lacks the refusal cause: {}",
                message
            );
            assert!(message.contains(&addr.to_string()));
        }
        other => panic!("expected network error, got {:?}", other),
    }
}

/// 不正なContent-Typeは送信前にパースエラー（接続先が無くても通信エラーにならない）
#[tokio::test]
async fn test_generate_invalid_content_type() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let file = UploadFile::from_bytes("broken.png", "image/", vec![1, 2, 3]);
    let endpoint = format!("http://{}/generate", addr);
    let err = client_for(&endpoint).generate(&file).await.unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert!(err.to_string().contains("image/"));
}

/// 不正なエンドポイントはクライアント生成時に弾く
#[test]
fn test_client_rejects_invalid_endpoint() {
    let config = Config {
        generator: GeneratorConfig::with_endpoint("not a url"),
        ..Config::default()
    };
    assert!(GenerationClient::new(&config).is_err());
}
