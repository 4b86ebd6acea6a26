//! Session state machine over the brand fixture document.

use test_fixtures::{
    frame, hidden, load_document, rect, solid, text, text_style, MemoryDocument,
};
use tokio::sync::mpsc;

use tokenscope_analysis::ColorGroup;
use tokenscope_core::types::{FontName, NodeId};
use tokenscope_core::{HostDocument, TokenscopeConfig};
use tokenscope_session::{InboundMessage, OutboundMessage, Phase, Session, SessionEvent, Tab};

type Outbox = mpsc::UnboundedReceiver<OutboundMessage>;

fn session(doc: MemoryDocument) -> (Session<MemoryDocument>, Outbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Session::new(doc, &TokenscopeConfig::default(), tx), rx)
}

fn drain(rx: &mut Outbox) -> Vec<OutboundMessage> {
    let mut out = Vec::new();
    while let Ok(message) = rx.try_recv() {
        out.push(message);
    }
    out
}

fn color_groups(messages: &[OutboundMessage]) -> Option<&Vec<ColorGroup>> {
    messages.iter().rev().find_map(|m| match m {
        OutboundMessage::ResultColors { groups } => Some(groups),
        _ => None,
    })
}

fn labels(groups: &[ColorGroup]) -> Vec<&str> {
    groups.iter().map(|g| g.label.as_str()).collect()
}

fn ids(values: &[&str]) -> Vec<NodeId> {
    values.iter().map(|v| NodeId::new(*v)).collect()
}

async fn started() -> (Session<MemoryDocument>, Outbox) {
    let (mut session, mut rx) = session(load_document("brand_scenario"));
    session.start().await;
    drain(&mut rx);
    (session, rx)
}

#[tokio::test]
async fn start_announces_tab_and_analyzes_existing_selection() {
    let (mut session, mut rx) = session(load_document("brand_scenario"));
    session.start().await;
    let out = drain(&mut rx);

    assert_eq!(out[0], OutboundMessage::InitTab { tab: Tab::Colors });
    assert!(out.contains(&OutboundMessage::SelectionChanged));
    assert!(out.contains(&OutboundMessage::FrameChanged));
    assert!(out.contains(&OutboundMessage::AnalyzingStart));
    assert_eq!(labels(color_groups(&out).unwrap()), vec!["#FF0000", "#00FF00"]);
    assert_eq!(session.state().root_containers.as_slice(), ids(&["container"]).as_slice());
    assert_eq!(session.state().phase, Phase::ListView);
}

#[tokio::test]
async fn empty_selection_clears_every_tab() {
    let (mut session, mut rx) = started().await;
    session.host_mut().user_select(&[]);
    session.handle_event(SessionEvent::SelectionChanged).await;

    assert_eq!(drain(&mut rx), vec![OutboundMessage::Empty { clear_all: true }]);
    assert!(session.state().root_containers.is_empty());
    assert_eq!(session.state().phase, Phase::Idle);
}

#[tokio::test]
async fn same_container_selection_does_not_report_frame_change() {
    let (mut session, mut rx) = started().await;
    session.host_mut().user_select(&["child-c"]);
    session.handle_event(SessionEvent::SelectionChanged).await;

    let out = drain(&mut rx);
    assert!(out.contains(&OutboundMessage::SelectionChanged));
    assert!(!out.contains(&OutboundMessage::FrameChanged));
    assert!(color_groups(&out).is_some());
}

#[tokio::test]
async fn panel_selection_echo_is_swallowed_once() {
    let (mut session, mut rx) = started().await;
    session
        .handle_message(InboundMessage::SelectNode {
            node_id: NodeId::new("child-c"),
        })
        .await;
    assert_eq!(session.host().selection(), ids(&["child-c"]));
    assert_eq!(session.host().viewport(), ids(&["child-c"]).as_slice());
    assert_eq!(session.state().phase, Phase::DetailView);

    session.handle_event(SessionEvent::SelectionChanged).await;
    assert!(drain(&mut rx).is_empty());

    session.handle_event(SessionEvent::SelectionChanged).await;
    assert!(color_groups(&drain(&mut rx)).is_some());
}

#[tokio::test]
async fn missing_echo_does_not_swallow_the_next_user_selection() {
    let (mut session, mut rx) = started().await;
    session
        .handle_message(InboundMessage::SelectMultipleNodes {
            node_ids: ids(&["child-b", "child-c", "ghost"]),
        })
        .await;
    assert_eq!(session.host().selection(), ids(&["child-b", "child-c"]));

    session.host_mut().user_select(&["child-a"]);
    session.handle_event(SessionEvent::SelectionChanged).await;
    assert!(drain(&mut rx).contains(&OutboundMessage::SelectionChanged));
}

#[tokio::test]
async fn apply_and_remove_round_trip() {
    let (mut session, mut rx) = started().await;

    session
        .handle_message(InboundMessage::ApplyToken {
            node_ids: None,
            node_id: Some(NodeId::new("child-b")),
            style_id: "X".to_string(),
            is_stroke: false,
            is_text: false,
        })
        .await;
    let out = drain(&mut rx);
    assert_eq!(
        out[0],
        OutboundMessage::UpdateDetail {
            node_id: NodeId::new("child-b"),
            style_name: "Gray-500".to_string(),
            style_id: "X".to_string(),
        }
    );
    assert_eq!(
        out[1],
        OutboundMessage::TokenAppliedSuccess {
            style_name: "Gray-500".to_string(),
            style_id: "X".to_string(),
            fallback_nodes: Vec::new(),
        }
    );
    assert_eq!(labels(color_groups(&out).unwrap()), vec!["#00FF00"]);
    assert_eq!(session.snapshots().len(), 1);

    session
        .handle_message(InboundMessage::GetSuggestedTokens { node_id: None })
        .await;
    let out = drain(&mut rx);
    let OutboundMessage::ResultSuggestedTokens { tokens } = &out[0] else {
        panic!("expected color suggestions, got {out:?}");
    };
    assert!(tokens.iter().any(|t| t.name == "Gray-500" && t.hex == "#808080"));

    session
        .handle_message(InboundMessage::RemoveColorToken {
            node_ids: ids(&["child-b"]),
            is_stroke: false,
        })
        .await;
    let out = drain(&mut rx);
    assert_eq!(out[0], OutboundMessage::TokenRemovedSuccess);
    assert_eq!(labels(color_groups(&out).unwrap()), vec!["#FF0000", "#00FF00"]);
}

#[tokio::test]
async fn unknown_token_reports_error_code() {
    let (mut session, mut rx) = started().await;
    session
        .handle_message(InboundMessage::ApplyTokenMultiple {
            node_ids: ids(&["child-b"]),
            style_id: "nope".to_string(),
            is_stroke: false,
        })
        .await;
    assert_eq!(
        drain(&mut rx),
        vec![OutboundMessage::TokenAppliedError {
            message: Some("[TOKEN_NOT_FOUND] Token not found: nope".to_string()),
        }]
    );
}

#[tokio::test]
async fn back_to_list_restores_selection_and_closes_edit_session() {
    let (mut session, mut rx) = started().await;
    session.handle_message(InboundMessage::EnterListView).await;
    session
        .handle_message(InboundMessage::SelectNode {
            node_id: NodeId::new("child-c"),
        })
        .await;
    session.handle_event(SessionEvent::SelectionChanged).await;
    session
        .handle_message(InboundMessage::SaveOriginalState {
            node_ids: ids(&["child-c"]),
        })
        .await;
    assert_eq!(session.snapshots().len(), 1);
    drain(&mut rx);

    session.handle_message(InboundMessage::BackToList).await;
    assert_eq!(session.host().selection(), ids(&["child-b"]));
    assert!(session.snapshots().is_empty());
    assert!(session.state().initial_selection.is_none());
    assert_eq!(session.state().phase, Phase::ListView);
    assert!(color_groups(&drain(&mut rx)).is_some());

    // The host echo of the restored selection is ours.
    session.handle_event(SessionEvent::SelectionChanged).await;
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn back_to_list_skips_deleted_nodes() {
    let (mut session, _rx) = started().await;
    session.host_mut().user_select(&["child-b", "child-c"]);
    session.handle_message(InboundMessage::SaveInitialSelection).await;
    session.host_mut().delete_node("child-c");
    session.handle_message(InboundMessage::BackToList).await;
    assert_eq!(session.host().selection(), ids(&["child-b"]));
}

#[tokio::test]
async fn switch_tab_analyzes_typography_or_shows_empty() {
    let (mut session, mut rx) = started().await;
    session
        .handle_message(InboundMessage::SwitchTab {
            tab: Tab::Typography,
        })
        .await;
    let out = drain(&mut rx);
    let groups = out
        .iter()
        .find_map(|m| match m {
            OutboundMessage::ResultTypography { groups } => Some(groups),
            _ => None,
        })
        .unwrap();
    assert_eq!(groups[0].label, "Inter Bold");

    session.host_mut().user_select(&[]);
    session
        .handle_message(InboundMessage::SwitchTab { tab: Tab::Colors })
        .await;
    assert_eq!(drain(&mut rx), vec![OutboundMessage::Empty { clear_all: false }]);
    assert_eq!(session.state().tab, Tab::Colors);
}

#[tokio::test]
async fn toggle_hidden_reanalyzes_last_known_containers() {
    let doc = MemoryDocument::new("page")
        .with_node(None, frame("root"))
        .with_node(Some("root"), rect("shown", vec![solid("#111111")]))
        .with_node(Some("root"), hidden(rect("ghost", vec![solid("#222222")])))
        .with_selection(&["shown"]);
    let (mut session, mut rx) = session(doc);
    session.start().await;
    assert_eq!(labels(color_groups(&drain(&mut rx)).unwrap()), vec!["#111111"]);

    session.host_mut().user_select(&[]);
    session
        .handle_message(InboundMessage::ToggleHidden { value: true })
        .await;
    assert_eq!(
        labels(color_groups(&drain(&mut rx)).unwrap()),
        vec!["#111111", "#222222"]
    );
    assert!(session.state().include_hidden);
}

#[tokio::test]
async fn typography_apply_discloses_fallback_nodes() {
    let doc = load_document("brand_scenario")
        .with_style(text_style("T:display", "Display", "Playfair", "Black", 32.0))
        .with_unavailable_font(FontName::new("Playfair", "Black"));
    let (mut session, mut rx) = session(doc);
    session.start().await;
    drain(&mut rx);

    session
        .handle_message(InboundMessage::ApplyTypographyTokenMultiple {
            node_ids: ids(&["heading"]),
            style_id: "T:display".to_string(),
        })
        .await;
    let out = drain(&mut rx);
    assert!(out.contains(&OutboundMessage::TokenAppliedSuccess {
        style_name: "Display".to_string(),
        style_id: "T:display".to_string(),
        fallback_nodes: ids(&["heading"]),
    }));
    let node = session.host().node(&NodeId::new("heading")).unwrap();
    let (props, _) = node.text().unwrap();
    assert_eq!(props.font_name, FontName::new("Inter", "Bold"));
    assert_eq!(props.font_size, 32.0);
}

#[tokio::test]
async fn text_suggestions_rank_against_the_node() {
    let doc = MemoryDocument::new("page")
        .with_style(text_style("t-roboto", "Roboto Body", "Roboto", "Regular", 16.0))
        .with_style(text_style("t-heading", "Inter Heading", "Inter", "Bold", 24.0))
        .with_style(text_style("t-body", "Inter Body", "Inter", "Regular", 16.0))
        .with_node(None, frame("root"))
        .with_node(Some("root"), text("probe", "Inter", "Regular", 16.0))
        .with_selection(&["probe"]);
    let (mut session, mut rx) = session(doc);
    session
        .handle_message(InboundMessage::SwitchTab {
            tab: Tab::Typography,
        })
        .await;
    drain(&mut rx);

    session
        .handle_message(InboundMessage::GetSuggestedTokens {
            node_id: Some(NodeId::new("probe")),
        })
        .await;
    let out = drain(&mut rx);
    let OutboundMessage::ResultSuggestedTextTokens { tokens } = &out[0] else {
        panic!("expected text suggestions, got {out:?}");
    };
    let order: Vec<&str> = tokens.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, vec!["t-body", "t-heading", "t-roboto"]);
}

#[tokio::test]
async fn configured_initial_tab_is_announced() {
    let config = TokenscopeConfig::from_toml(
        r#"
        [session]
        initial_tab = "typography"
        "#,
    )
    .unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = Session::new(load_document("brand_scenario"), &config, tx);
    session.start().await;

    let out = drain(&mut rx);
    assert_eq!(out[0], OutboundMessage::InitTab { tab: Tab::Typography });
    assert!(matches!(
        out.last(),
        Some(OutboundMessage::ResultTypography { .. })
    ));
}
