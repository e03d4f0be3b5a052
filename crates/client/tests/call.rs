use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use eos_trace_client::{is_not_found, ApiError, ClientSettings, TraceApiClient, TransportError, UnexpectedResponse};
use eos_trace_primitives::{Block, Checksum256};
use serde_json::{json, Value};


const BLOCK: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../data/tests/fixtures/block.json"));

const UNKNOWN_KEY: &str = r#"{
    "code": 500,
    "message": "Internal Service Error",
    "error": {
        "code": 0,
        "name": "exception",
        "what": "unspecified",
        "details": [{
            "message": "unknown key (boost::tuples::tuple<bool, eosio::chain::name, boost::tuples::null_type>): (0 nosuchblock)",
            "file": "http_plugin.cpp",
            "line_number": 589,
            "method": "handle_exception"
        }]
    }
}"#;


/// Serves `router` on an ephemeral port, returns the base url with a trailing slash.
async fn serve(router: Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await
    });
    Ok(format!("http://{}/", addr))
}


async fn get_block(body: Bytes) -> (StatusCode, String) {
    let request: Value = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string())
    };
    match request["block_num"].as_str() {
        Some("123") => (StatusCode::OK, BLOCK.to_string()),
        Some("404") => (StatusCode::NOT_FOUND, "Not Found".to_string()),
        Some("405") => (
            StatusCode::NOT_FOUND,
            r#"{"code": 404, "message": "Trace API: block trace missing"}"#.to_string()
        ),
        Some("500") => (StatusCode::INTERNAL_SERVER_ERROR, UNKNOWN_KEY.to_string()),
        Some("501") => (StatusCode::INTERNAL_SERVER_ERROR, "<html>bad gateway</html>".to_string()),
        Some("502") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "code": 500,
                "message": "Internal Service Error",
                "error": {"code": 3100002, "name": "unknown_block_exception", "what": "Unknown block"}
            }).to_string()
        ),
        Some("777") => (StatusCode::OK, r#"{"id": "not a block"}"#.to_string()),
        _ => (StatusCode::BAD_REQUEST, format!("unexpected request {}", request))
    }
}


async fn get_transaction_trace(Json(request): Json<Value>) -> (StatusCode, String) {
    let block: Value = match serde_json::from_str(BLOCK) {
        Ok(block) => block,
        Err(err) => return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    };
    let found = block["transactions"].as_array()
        .and_then(|txs| txs.iter().find(|tx| tx["id"] == request["id"]));
    match found {
        Some(tx) => (StatusCode::OK, tx.to_string()),
        None => (
            StatusCode::NOT_FOUND,
            r#"{"code": 404, "message": "Trace API: transaction id missing"}"#.to_string()
        )
    }
}


async fn echo(headers: HeaderMap, body: Bytes) -> Json<Value> {
    let trace: Vec<String> = headers.get_all("x-trace")
        .iter()
        .filter_map(|v| v.to_str().ok().map(|s| s.to_string()))
        .collect();
    Json(json!({
        "raw_body": String::from_utf8_lossy(&body),
        "x_trace": trace,
        "connection": headers.get("connection").and_then(|v| v.to_str().ok())
    }))
}


async fn trace_api_client() -> anyhow::Result<TraceApiClient> {
    let router = Router::new()
        .route("/v1/trace_api/get_block", post(get_block))
        .route("/v1/trace_api/get_transaction_trace", post(get_transaction_trace))
        .route("/v1/test/echo", post(echo));
    let url = serve(router).await?;
    ClientSettings::default()
        .with_env_proxy(false)
        .with_header("X-Trace", "1")?
        .build(&url)
}


#[tokio::test]
async fn fetch_block() -> anyhow::Result<()> {
    let client = trace_api_client().await?;
    let block = client.get_block_by_num(123).await?;

    assert_eq!(block.number(), 123);
    assert_eq!(block.transactions().len(), 2);
    assert_eq!(block.transactions()[0].transaction.actions.len(), 3);
    assert_eq!(block.transactions()[1].transaction.actions.len(), 1);
    Ok(())
}


fn assert_send_sync<T: Clone + Send + Sync + 'static>() {}


#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_share_one_client() -> anyhow::Result<()> {
    assert_send_sync::<TraceApiClient>();

    let client = trace_api_client().await?;

    let tasks: Vec<_> = (0..8).map(|i| {
        let client = client.clone();
        tokio::spawn(async move {
            let num = if i % 2 == 0 { 123 } else { 404 };
            (num, client.get_block_by_num(num).await)
        })
    }).collect();

    for task in tasks {
        match task.await? {
            (123, res) => assert_eq!(res?.number(), 123),
            (_, res) => assert!(is_not_found(&res.unwrap_err()))
        }
    }
    Ok(())
}


#[tokio::test]
async fn fetch_transaction_trace() -> anyhow::Result<()> {
    let client = trace_api_client().await?;

    let id = "628b49d96dcde97a430dd4f597705899e09a968f793491e4b704cae33a40dc02".parse()?;
    let trace = client.get_transaction_trace(&id).await?;
    assert_eq!(trace.transaction.transaction.id, id);
    assert_eq!(trace.block_num, 123);
    assert_eq!(trace.transaction.transaction.actions.len(), 3);

    let missing = Checksum256([7; 32]);
    let err = client.get_transaction_trace(&missing).await.unwrap_err();
    assert!(is_not_found(&err));
    Ok(())
}


#[tokio::test]
async fn missing_block_is_not_found_for_any_status() -> anyhow::Result<()> {
    let client = trace_api_client().await?;

    for num in [404, 405, 500] {
        let err = client.get_block_by_num(num).await.unwrap_err();
        assert!(is_not_found(&err), "block {}: {:?}", num, err);
    }

    let err = client.get_block_by_num(405).await.unwrap_err();
    assert_eq!(err.downcast_ref::<ApiError>().unwrap().code, 404);

    let err = client.get_block_by_num(500).await.unwrap_err();
    assert!(err.downcast_ref::<ApiError>().is_none());
    Ok(())
}


#[tokio::test]
async fn api_error() -> anyhow::Result<()> {
    let client = trace_api_client().await?;
    let err = client.get_block_by_num(502).await.unwrap_err();

    assert!(!is_not_found(&err));
    assert_eq!(err.downcast_ref::<ApiError>().unwrap().error.code, 3100002);
    Ok(())
}


#[tokio::test]
async fn unparseable_error_body() -> anyhow::Result<()> {
    let client = trace_api_client().await?;
    let err = client.get_block_by_num(501).await.unwrap_err();

    let unexpected = err.downcast_ref::<UnexpectedResponse>().unwrap();
    assert_eq!(unexpected.status, 500);
    assert!(unexpected.url.ends_with("/v1/trace_api/get_block"));

    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("<html>bad gateway</html>"));
    Ok(())
}


#[tokio::test]
async fn malformed_success_body() -> anyhow::Result<()> {
    let client = trace_api_client().await?;
    let err = client.get_block_by_num(777).await.unwrap_err();

    assert!(!is_not_found(&err));
    assert!(err.downcast_ref::<serde_json::Error>().is_some());
    Ok(())
}


#[tokio::test]
async fn request_body_and_headers() -> anyhow::Result<()> {
    let mut client = trace_api_client().await?;
    client.add_header("x-trace", "2")?;

    let payload = json!({"account": "a&b", "memo": "<b>hi</b>"});
    let res: Value = client.call("test", "echo", Some(&payload)).await?;

    let raw = res["raw_body"].as_str().unwrap();
    assert_eq!(serde_json::from_str::<Value>(raw)?, payload);
    assert!(raw.contains("a&b"));
    assert!(raw.contains("<b>hi</b>"));

    assert_eq!(res["x_trace"], json!(["1", "2"]));
    assert_eq!(res["connection"], "close");
    Ok(())
}


#[tokio::test]
async fn request_without_body() -> anyhow::Result<()> {
    let client = trace_api_client().await?;
    let res: Value = client.call::<Value, _>("test", "echo", None).await?;
    assert_eq!(res["raw_body"], "");
    Ok(())
}


#[tokio::test]
async fn transport_failure() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = ClientSettings::default()
        .with_env_proxy(false)
        .build(&format!("http://{}", addr))?;
    let err = client.get_block_by_num(1).await.unwrap_err();

    let transport = err.downcast_ref::<TransportError>().unwrap();
    assert_eq!(transport.url, format!("http://{}/v1/trace_api/get_block", addr));
    assert!(transport.source.is_connect());
    Ok(())
}
