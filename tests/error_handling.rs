//! 错误处理测试
//!
//! 单个片段失败只跳过该片段；缺少 API 密钥会中止整个运行

use serde_json::json;

use hinglish::translation::{
    BackgroundTransport, GroqClient, HostMessage, MemorySettingsStore, RunState,
    TranslationError, TranslationRequester, TranslatorConfig,
};

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{translator_with_mode, FakeTransport, HtmlTestHelper};

#[tokio::test(start_paused = true)]
async fn test_failed_fragment_does_not_stop_the_next_one() {
    let dom = HtmlTestHelper::create_test_dom("<p>First line</p><p>Second line</p><p>Third line</p>");
    let transport = FakeTransport::with_responses(&[
        ("First line", json!("Pehli line")),
        ("Second line", json!("Translation error: rate limited")),
        ("Third line", json!("Teesri line")),
    ]);
    let mut translator = translator_with_mode(transport, None);

    let outcome = translator.translate_page(&dom).await;

    assert_eq!(outcome.state, RunState::Succeeded);
    let report = outcome.report.expect("成功的运行应当有报告");
    assert_eq!(report.translated, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(
        HtmlTestHelper::texts(&dom, "p"),
        vec!["Pehli line", "Second line", "Teesri line"]
    );
    assert!(!HtmlTestHelper::is_translated(&HtmlTestHelper::elements(&dom, "p")[1]));
    assert_eq!(translator.transport().call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_failed_fragment_in_textual_mode() {
    let dom = HtmlTestHelper::create_test_dom("<p>Alpha</p><p>Beta</p>");
    let transport = FakeTransport::with_responses(&[
        ("Alpha", json!("Translation error:")),
        ("Beta", json!("Beta ji")),
    ]);
    let mut translator = translator_with_mode(transport, Some("text"));

    let outcome = translator.translate_page(&dom).await;

    assert_eq!(outcome.state, RunState::Succeeded);
    assert_eq!(HtmlTestHelper::texts(&dom, "p"), vec!["Alpha", "Beta ji"]);
}

#[tokio::test(start_paused = true)]
async fn test_missing_key_stops_further_requests() {
    let dom = HtmlTestHelper::create_test_dom("<p>One more</p><p>Two more</p><p>Three more</p>");
    let transport = FakeTransport::with_responses(&[
        ("One more", json!("Ek aur")),
        ("Two more", json!(common::API_KEY_MISSING)),
        ("Three more", json!("Teen aur")),
    ]);
    let mut translator = translator_with_mode(transport, None);

    let outcome = translator.translate_page(&dom).await;

    assert!(outcome.state.is_failed());
    assert_eq!(
        translator.transport().calls(),
        vec!["One more".to_string(), "Two more".to_string()]
    );
    // 已经完成的翻译保留在页面上
    assert_eq!(
        HtmlTestHelper::texts(&dom, "p"),
        vec!["Ek aur", "Two more", "Three more"]
    );
    assert_eq!(translator.state(), &RunState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_non_string_responses_are_skipped() {
    let dom = HtmlTestHelper::create_test_dom("<p>Keep me</p><p>And me</p>");
    let transport = FakeTransport::with_responses(&[
        ("Keep me", json!({ "translated": "Mujhe rakho" })),
        ("And me", json!(42)),
    ]);
    let mut translator = translator_with_mode(transport, None);

    let outcome = translator.translate_page(&dom).await;

    assert_eq!(outcome.state, RunState::Succeeded);
    assert_eq!(HtmlTestHelper::texts(&dom, "p"), vec!["Keep me", "And me"]);
}

#[tokio::test]
async fn test_requester_classifies_error_strings() {
    let transport = FakeTransport::with_responses(&[
        ("Missing key", json!(common::API_KEY_MISSING)),
        ("Broken text", json!("Translation error:   upstream 503  ")),
    ]);
    let mut requester = TranslationRequester::new(&transport, Default::default());

    let missing = requester.request_translation("Missing key").await;
    assert!(matches!(missing, Err(TranslationError::ApiKeyMissing(_))));

    match requester.request_translation("Broken text").await {
        Err(TranslationError::TranslationFailed(detail)) => assert_eq!(detail, "upstream 503"),
        other => panic!("期望 TranslationFailed，实际为 {other:?}"),
    }
}

/// 后台传输在没有密钥时不发起网络请求，直接回复提示文本
#[tokio::test]
async fn test_background_transport_without_api_key() {
    let config = TranslatorConfig::default();
    let client = GroqClient::new(config).expect("客户端应当可以创建");
    let transport = BackgroundTransport::new(client, MemorySettingsStore::new());

    let reply = transport
        .handle_message(&HostMessage::translate_text("Hello there"))
        .await
        .expect("translateText 应当有回复");

    assert_eq!(reply.unwrap(), json!(common::API_KEY_MISSING));
}
