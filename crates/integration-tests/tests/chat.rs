mod harness;

use harness::config::{ConfigBuilder, TEST_MODEL_ID};
use harness::mock_bedrock::MockBedrock;
use harness::server::TestServer;

fn conversation(len: usize) -> Vec<serde_json::Value> {
    (0..len)
        .map(|i| {
            let role = if i % 2 == 0 { "user" } else { "assistant" };
            serde_json::json!({ "role": role, "content": format!("message {i}") })
        })
        .collect()
}

#[tokio::test]
async fn single_message_round_trip() {
    let mock = MockBedrock::start("こんにちは！何かお手伝いできますか？").await.unwrap();
    let config = ConfigBuilder::new().with_bedrock(&mock.endpoint_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .post_json(
            "/chat",
            &serde_json::json!({ "messages": [{ "role": "user", "content": "hello" }] }),
        )
        .await;

    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "response": "こんにちは！何かお手伝いできますか？" })
    );

    let invocations = mock.invocations();
    assert_eq!(invocations.len(), 1);

    let (model_id, envelope) = &invocations[0];
    assert_eq!(model_id, TEST_MODEL_ID);
    assert_eq!(envelope["anthropic_version"], "bedrock-2023-05-31");
    assert_eq!(envelope["max_tokens"], 4096);
    assert_eq!(
        envelope["messages"],
        serde_json::json!([{ "role": "user", "content": "hello" }])
    );
}

#[tokio::test]
async fn long_history_is_truncated_to_last_twenty() {
    let mock = MockBedrock::start("ok").await.unwrap();
    let config = ConfigBuilder::new().with_bedrock(&mock.endpoint_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let history = conversation(31);
    let resp = server
        .post_json("/chat", &serde_json::json!({ "messages": history }))
        .await;

    assert_eq!(resp.status(), 200);

    let (_, envelope) = &mock.invocations()[0];
    assert_eq!(envelope["messages"], serde_json::Value::Array(history[11..].to_vec()));
}

#[tokio::test]
async fn twenty_turns_pass_unchanged() {
    let mock = MockBedrock::start("ok").await.unwrap();
    let config = ConfigBuilder::new().with_bedrock(&mock.endpoint_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let history = conversation(20);
    server
        .post_json("/chat", &serde_json::json!({ "messages": history }))
        .await;

    let (_, envelope) = &mock.invocations()[0];
    assert_eq!(envelope["messages"], serde_json::Value::Array(history));
}

#[tokio::test]
async fn reply_without_text_is_malformed() {
    let mock = MockBedrock::start_with_body(r#"{"content":[]}"#).await.unwrap();
    let config = ConfigBuilder::new().with_bedrock(&mock.endpoint_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .post_json("/chat", &serde_json::json!({ "messages": conversation(1) }))
        .await;

    assert_eq!(resp.status(), 502);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["type"], "malformed_response");
}

#[tokio::test]
async fn model_rejection_is_bad_gateway() {
    let mock = MockBedrock::start_rejecting().await.unwrap();
    let config = ConfigBuilder::new().with_bedrock(&mock.endpoint_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .post_json(
            "/chat",
            &serde_json::json!({ "messages": [{ "role": "assistant", "content": "first" }] }),
        )
        .await;

    assert_eq!(resp.status(), 502);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["type"], "provider_error");
    assert!(body["error"]["message"].as_str().unwrap().contains("roles must alternate"));
}

#[tokio::test]
async fn missing_model_id_is_configuration_error() {
    let mock = MockBedrock::start("unused").await.unwrap();
    let mut config = ConfigBuilder::new().with_bedrock(&mock.endpoint_url()).build();
    config.chat.model_id = None;

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .post_json("/chat", &serde_json::json!({ "messages": conversation(1) }))
        .await;

    assert_eq!(resp.status(), 500);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["type"], "configuration_error");
    assert!(mock.invocations().is_empty());
}

#[tokio::test]
async fn history_over_one_mebibyte_is_truncated_and_answered() {
    let mock = MockBedrock::start("ok").await.unwrap();
    let config = ConfigBuilder::new().with_bedrock(&mock.endpoint_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let history: Vec<_> = conversation(80)
        .into_iter()
        .map(|mut turn| {
            turn["content"] = serde_json::json!(format!("{} {}", turn["content"].as_str().unwrap(), "x".repeat(16 * 1024)));
            turn
        })
        .collect();
    let body = serde_json::json!({ "messages": history });
    assert!(body.to_string().len() > 1 << 20);

    let resp = server.post_json("/chat", &body).await;

    assert_eq!(resp.status(), 200);

    let (_, envelope) = &mock.invocations()[0];
    assert_eq!(envelope["messages"], serde_json::Value::Array(history[60..].to_vec()));
}

#[tokio::test]
async fn body_over_configured_limit_is_rejected() {
    let mock = MockBedrock::start("ok").await.unwrap();
    let mut config = ConfigBuilder::new().with_bedrock(&mock.endpoint_url()).build();
    config.chat.max_body_bytes = 4 * 1024;

    let server = TestServer::start(config).await.unwrap();

    let history: Vec<_> = (0..4)
        .map(|_| serde_json::json!({ "role": "user", "content": "x".repeat(2048) }))
        .collect();
    let resp = server.post_json("/chat", &serde_json::json!({ "messages": history })).await;

    assert_eq!(resp.status(), 413);
    assert!(mock.invocations().is_empty());
}

#[tokio::test]
async fn text_after_tool_use_block_is_returned() {
    let mock = MockBedrock::start_with_body(
        r#"{"content":[{"type":"tool_use","id":"toolu_1","name":"lookup","input":{}},{"type":"text","text":"わかりました"}]}"#,
    )
    .await
    .unwrap();
    let config = ConfigBuilder::new().with_bedrock(&mock.endpoint_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .post_json(
            "/chat",
            &serde_json::json!({ "messages": [{ "role": "user", "content": "天気は？" }] }),
        )
        .await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "response": "わかりました" }));
}
