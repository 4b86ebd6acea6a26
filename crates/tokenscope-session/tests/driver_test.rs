//! End-to-end runs of the driver loop over raw protocol JSON.

use test_fixtures::{frame, load_document, rect, solid, MemoryDocument};

use tokenscope_core::tracing::init_tracing;
use tokenscope_core::types::NodeId;
use tokenscope_core::{HostDocument, TokenscopeConfig};
use tokenscope_session::{
    decode_inbound, encode_outbound, OutboundMessage, Phase, SessionDriver, SessionEvent, Tab,
};

#[tokio::test]
async fn driver_processes_events_until_the_ui_hangs_up() {
    init_tracing();
    let (driver, mut channels) =
        SessionDriver::new(load_document("brand_scenario"), &TokenscopeConfig::default());

    for raw in [
        r#"{"type":"apply-token","nodeId":"child-b","styleId":"X"}"#,
        r#"{"type":"get-suggested-tokens"}"#,
        r#"{"type":"switch-tab","tab":"typography"}"#,
    ] {
        let message = decode_inbound(raw).unwrap();
        channels.events.send(SessionEvent::Ui(message)).unwrap();
    }
    drop(channels.events);

    let session = driver.run().await;

    let mut out = Vec::new();
    while let Ok(message) = channels.outbox.try_recv() {
        out.push(message);
    }
    assert_eq!(out[0], OutboundMessage::InitTab { tab: Tab::Colors });
    assert!(out.contains(&OutboundMessage::TokenAppliedSuccess {
        style_name: "Gray-500".to_string(),
        style_id: "X".to_string(),
        fallback_nodes: Vec::new(),
    }));
    assert!(out.iter().any(|m| matches!(
        m,
        OutboundMessage::ResultSuggestedTokens { tokens } if !tokens.is_empty()
    )));
    assert!(matches!(
        out.last(),
        Some(OutboundMessage::ResultTypography { .. })
    ));

    assert_eq!(session.state().tab, Tab::Typography);
    assert_eq!(session.host().selection(), vec![NodeId::new("child-b")]);

    let encoded = encode_outbound(&out[0]).unwrap();
    assert_eq!(encoded, r#"{"type":"init-tab","tab":"colors"}"#);
}

#[tokio::test]
async fn superseded_walks_still_end_with_a_result() {
    let (driver, channels) =
        SessionDriver::new(load_document("brand_scenario"), &TokenscopeConfig::default());
    for _ in 0..3 {
        channels.events.send(SessionEvent::SelectionChanged).unwrap();
    }
    channels
        .events
        .send(SessionEvent::Ui(decode_inbound(r#"{"type":"reanalyze"}"#).unwrap()))
        .unwrap();
    let mut outbox = channels.outbox;
    drop(channels.events);

    let session = driver.run().await;

    let mut out = Vec::new();
    while let Ok(message) = outbox.try_recv() {
        out.push(message);
    }
    assert!(matches!(
        out.last(),
        Some(OutboundMessage::ResultColors { groups }) if groups.len() == 2
    ));
    assert!(!session.state().superseded);
}

fn wide_frame(children: usize) -> MemoryDocument {
    let mut doc = MemoryDocument::new("page").with_node(None, frame("root"));
    for i in 0..children {
        doc = doc.with_node(Some("root"), rect(&format!("r{i}"), vec![solid("#FF0000")]));
    }
    doc.with_selection(&["r1"])
}

#[tokio::test]
async fn failed_apply_still_replaces_the_walk_it_cancelled() {
    let config = TokenscopeConfig::from_toml(
        r#"
        [analysis]
        yield_interval = 1
        "#,
    )
    .unwrap();
    let (driver, channels) = SessionDriver::new(wide_frame(200), &config);
    let events = channels.events;
    let mut outbox = channels.outbox;

    // Arrives while the start-up walk is parked at a yield point.
    tokio::spawn(async move {
        let message =
            decode_inbound(r#"{"type":"apply-token","nodeId":"r1","styleId":"does-not-exist"}"#)
                .unwrap();
        events.send(SessionEvent::Ui(message)).unwrap();
    });

    let session = driver.run().await;

    let mut out = Vec::new();
    while let Ok(message) = outbox.try_recv() {
        out.push(message);
    }
    assert!(out.contains(&OutboundMessage::TokenAppliedError {
        message: Some("[TOKEN_NOT_FOUND] Token not found: does-not-exist".to_string()),
    }));
    let last_start = out
        .iter()
        .rposition(|m| *m == OutboundMessage::AnalyzingStart)
        .unwrap();
    let replaced = out[last_start..].iter().any(|m| match m {
        OutboundMessage::ResultColors { groups } => groups[0].occurrences.len() == 200,
        _ => false,
    });
    assert!(replaced);
    assert!(!session.state().superseded);
    assert_eq!(session.state().phase, Phase::ListView);
}
