use codebox_sandbox::transfer::{download_file, fetch_file, frame_payload};
use codebox_sandbox::{ExecutionStatus, Language, ReportStyle, SandboxClient, SandboxError};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXECUTE: &str = "/api/v1/interpreter/execute";

fn client(server: &MockServer) -> SandboxClient {
    SandboxClient::builder()
        .base_url(server.uri())
        .api_key("cgk_test")
        .build()
        .unwrap()
}

fn stdout_response(lines: &[&str]) -> ResponseTemplate {
    let outputs: Vec<_> = lines
        .iter()
        .map(|l| serde_json::json!({ "type": "stdout", "data": l }))
        .collect();
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "data": { "status": "completed", "outputs": outputs, "execution_time_ms": 30 }
    }))
}

#[tokio::test]
async fn execute_sends_request_and_parses_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .and(header("authorization", "Bearer cgk_test"))
        .and(body_partial_json(serde_json::json!({
            "code": "print(2 + 2)",
            "language": "python",
            "networking": false
        })))
        .respond_with(stdout_response(&["4"]))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .execute("print(2 + 2)", Language::Python, false)
        .await
        .unwrap();

    assert_eq!(result.status, ExecutionStatus::Completed);
    assert_eq!(result.stdout_text(), "4");
    assert_eq!(ReportStyle::plain().render(&result), "4");
}

#[tokio::test]
async fn error_status_is_a_result_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "status": "error",
                "outputs": [{ "type": "stderr", "data": "NameError: name 'x' is not defined" }]
            }
        })))
        .mount(&server)
        .await;

    let outcome = client(&server).execute("print(x)", Language::Python, false).await;
    assert_eq!(
        ReportStyle::Analysis.render_outcome(&outcome),
        "❌ Execution failed with status: error"
    );
}

#[tokio::test]
async fn http_errors_map_to_variants() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({ "error": "invalid api key" })),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .execute("1", Language::Bash, true)
        .await
        .unwrap_err();
    assert!(matches!(err, SandboxError::Auth(ref m) if m == "invalid api key"));
}

#[tokio::test]
async fn missing_data_is_a_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "quota exhausted" })))
        .mount(&server)
        .await;

    let err = client(&server)
        .execute("1", Language::Python, false)
        .await
        .unwrap_err();
    assert!(matches!(err, SandboxError::Server(ref m) if m == "quota exhausted"));
}

#[tokio::test]
async fn download_writes_decoded_bytes() {
    let server = MockServer::start().await;
    let png: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0, 1, 2, 250];
    let framed = frame_payload(&png);
    let lines: Vec<&str> = framed.lines().collect();

    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .and(body_string_contains("/tmp/revenue_by_region.png"))
        .respond_with(stdout_response(&lines))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("charts").join("revenue_by_region.png");
    assert!(download_file(&client(&server), "/tmp/revenue_by_region.png", &local).await);
    assert_eq!(std::fs::read(&local).unwrap(), png);
}

#[tokio::test]
async fn download_of_missing_file_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .respond_with(stdout_response(&["ERROR: File not found"]))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("missing.png");
    let err = fetch_file(&client(&server), "/tmp/missing.png", &local)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), codebox_error::ErrorKind::TransferFailed);
    assert!(!local.exists());
}

#[tokio::test]
async fn download_of_truncated_output_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .respond_with(stdout_response(&["BASE64_START", "iVBORw0KGgo="]))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("partial.png");
    assert!(!download_file(&client(&server), "/tmp/partial.png", &local).await);
    assert!(!local.exists());
}
