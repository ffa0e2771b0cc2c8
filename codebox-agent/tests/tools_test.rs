use codebox_agent::tools::{sample_sales_csv, ChartTool, ExecuteCodeTool};
use codebox_agent::Tool;
use codebox_sandbox::SandboxClient;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXECUTE: &str = "/api/v1/interpreter/execute";

fn client(server: &MockServer) -> SandboxClient {
    SandboxClient::builder()
        .base_url(server.uri())
        .api_key("cgk_test")
        .build()
        .unwrap()
}

fn respond(status: &str, outputs: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "data": { "status": status, "outputs": outputs, "execution_time_ms": 18 }
    }))
}

#[tokio::test]
async fn basic_tool_defaults_to_python_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .and(body_partial_json(serde_json::json!({ "language": "python", "networking": false })))
        .respond_with(respond(
            "completed",
            serde_json::json!([
                { "type": "stdout", "data": "a" },
                { "type": "stdout", "data": "b" }
            ]),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let tool = ExecuteCodeTool::basic(client(&server));
    let text = tool.call(serde_json::json!({ "code": "print('a'); print('b')" })).await;
    assert_eq!(text, "a\nb");
}

#[tokio::test]
async fn network_tool_sends_language_and_networking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .and(body_partial_json(serde_json::json!({ "language": "bash", "networking": true })))
        .respond_with(respond("completed", serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let tool = ExecuteCodeTool::with_network(client(&server));
    assert!(!tool.parameters()["properties"]["networking"].is_object());
    let text = tool
        .call(serde_json::json!({ "code": "curl -s example.com >/dev/null", "language": "bash" }))
        .await;
    assert_eq!(text, "Code executed successfully (status: completed) but produced no output.");
}

#[tokio::test]
async fn analysis_tool_reports_failures_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .respond_with(respond(
            "failed",
            serde_json::json!([
                { "type": "stdout", "data": "partial" },
                { "type": "stderr", "data": "ZeroDivisionError" }
            ]),
        ))
        .mount(&server)
        .await;

    let tool = ExecuteCodeTool::python_analysis(client(&server));
    let text = tool.call(serde_json::json!({ "code": "print(1/0)" })).await;
    assert_eq!(text, "❌ Execution failed with status: failed");
}

#[tokio::test]
async fn transport_errors_become_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({ "error": "sandbox pool exhausted" })))
        .mount(&server)
        .await;

    let tool = ExecuteCodeTool::basic(client(&server));
    let text = tool.call(serde_json::json!({ "code": "print(1)" })).await;
    assert_eq!(text, "Error executing code: server error: sandbox pool exhausted");
}

#[tokio::test]
async fn missing_code_is_reported_to_the_model() {
    let server = MockServer::start().await;
    let tool = ExecuteCodeTool::basic(client(&server));
    let text = tool.call(serde_json::json!({ "language": "python" })).await;
    assert!(text.starts_with("An error occurred while running the tool. Please try again. Error: "));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn chart_tool_sends_dataset_and_formats_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EXECUTE))
        .and(body_string_contains("Total Revenue by Region"))
        .and(body_string_contains("2024-10-07,Monitor,Electronics,28,14000,East"))
        .respond_with(respond(
            "completed",
            serde_json::json!([
                { "type": "stdout", "data": "Revenue by Region:\n  North: $98,350.00" },
                { "type": "stderr", "data": "FutureWarning: palette" }
            ]),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let tool = ChartTool::new(client(&server), sample_sales_csv());
    let text = tool
        .call(serde_json::json!({
            "chart_type": "bar",
            "analysis_description": "Total revenue by region",
            "output_filename": "revenue_by_region.png"
        }))
        .await;
    assert_eq!(
        text,
        "✅ Chart created successfully!\n\nRevenue by Region:\n  North: $98,350.00\n\n⚠️ Warnings/Errors:\nFutureWarning: palette"
    );
}
