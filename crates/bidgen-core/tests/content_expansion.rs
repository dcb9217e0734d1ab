//! Free-form passage expansion

use bidgen_core::ContentExpander;
use bidgen_test_utils::ScriptedGenerator;
use std::sync::Arc;

#[tokio::test]
async fn expansion_forwards_content_and_instruction() {
    let generator = Arc::new(ScriptedGenerator::with_responses(["expanded text"]));
    let expander = ContentExpander::new(Arc::clone(&generator));

    let result = expander
        .expand("short passage", "add quantitative detail")
        .await
        .unwrap();

    assert_eq!(result, "expanded text");
    let captured = generator.captured_messages();
    assert!(captured[0][1].content.contains("short passage"));
    assert!(captured[0][1].content.contains("add quantitative detail"));
}

#[tokio::test]
async fn provider_failure_propagates() {
    let generator = Arc::new(ScriptedGenerator::always_failing("offline"));
    let expander = ContentExpander::new(generator);

    let err = expander.expand("a", "b").await.unwrap_err();
    assert!(err.to_string().contains("offline"));
}
