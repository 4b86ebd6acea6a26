//! End-to-end analysis scenarios over the brand fixture document.

use test_fixtures::load_document;
use tokenscope_analysis::inventory::TokenInventory;
use tokenscope_analysis::mutation::{ApplyTarget, MutationEngine, SnapshotStore};
use tokenscope_analysis::{analyze_colors, analyze_typography, AnalysisOptions};
use tokenscope_core::types::{FontName, NodeId, PaintSlot, StyleId, TextProps};
use tokenscope_core::{CancellationToken, HostDocument, TokenscopeConfig};

fn container() -> Vec<NodeId> {
    vec![NodeId::new("container")]
}

fn options() -> AnalysisOptions {
    AnalysisOptions::default()
}

#[tokio::test]
async fn styled_brand_color_is_not_reported() {
    let doc = load_document("brand_scenario");
    let groups = analyze_colors(&doc, &container(), &options(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "#FF0000");
    assert!(!groups[0].is_stroke);
    let red: Vec<&str> = groups[0].occurrences.iter().map(|o| o.node_id.as_str()).collect();
    assert_eq!(red, vec!["child-b"]);
    assert_eq!(groups[1].label, "#00FF00");
    let green: Vec<&str> = groups[1].occurrences.iter().map(|o| o.node_id.as_str()).collect();
    assert_eq!(green, vec!["child-c"]);
}

#[tokio::test]
async fn applied_token_clears_group_and_shows_in_suggestions() {
    let config = TokenscopeConfig::default();
    let mut doc = load_document("brand_scenario");
    let mut snapshots = SnapshotStore::new();
    let mut inventory = TokenInventory::from_config(&config);

    // Prime the cache before the edit.
    inventory.color_tokens(&doc).await.unwrap();

    let outcome = MutationEngine::from_config(&config)
        .apply_token(
            &mut doc,
            &mut snapshots,
            &[NodeId::new("child-b")],
            "X",
            ApplyTarget::Paint(PaintSlot::Fill),
        )
        .await
        .unwrap();
    assert_eq!(outcome.applied[0].style_name, "Gray-500");
    inventory.invalidate();

    let groups = analyze_colors(&doc, &container(), &options(), &CancellationToken::new())
        .await
        .unwrap();
    assert!(groups.iter().all(|g| g.label != "#FF0000"));
    assert!(groups
        .iter()
        .flat_map(|g| &g.occurrences)
        .all(|o| o.node_id.as_str() != "child-b"));

    let tokens = inventory.color_tokens(&doc).await.unwrap();
    let gray = tokens.iter().find(|t| t.name == "Gray-500").unwrap();
    assert_eq!(gray.hex, "#808080");
    assert_eq!(gray.id, "X");
}

#[tokio::test]
async fn unstyled_text_groups_by_readable_label_until_styled() {
    let mut doc = load_document("brand_scenario");
    let groups = analyze_typography(&doc, &container(), &options(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "Inter Bold");
    assert_eq!(groups[0].occurrences[0].readable_weight, "Bold");
    assert_eq!(groups[0].occurrences[0].font_weight, 700);

    doc.load_font(&FontName::new("Inter", "Bold")).await.unwrap();
    doc.set_style_binding(
        &NodeId::new("heading"),
        tokenscope_core::types::StyleSlot::Text,
        Some(&StyleId::new("T:heading")),
    )
    .await
    .unwrap();

    let groups = analyze_typography(&doc, &container(), &options(), &CancellationToken::new())
        .await
        .unwrap();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn text_suggestions_are_ranked_by_closeness() {
    use test_fixtures::{frame, text, text_style, with_text_style, MemoryDocument};

    let doc = MemoryDocument::new("page")
        .with_style(text_style("t-roboto", "Roboto Body", "Roboto", "Regular", 16.0))
        .with_style(text_style("t-heading", "Inter Heading", "Inter", "Bold", 24.0))
        .with_style(text_style("t-body", "Inter Body", "Inter", "Regular", 16.0))
        .with_node(None, frame("root"))
        .with_node(Some("root"), with_text_style(text("a", "Roboto", "Regular", 16.0), "t-roboto"))
        .with_node(Some("root"), with_text_style(text("b", "Inter", "Bold", 24.0), "t-heading"))
        .with_node(Some("root"), with_text_style(text("c", "Inter", "Regular", 16.0), "t-body"));
    let mut inventory = TokenInventory::from_config(&TokenscopeConfig::default());

    let mut current = TextProps::new(FontName::new("Inter", "Regular"), 16.0);
    current.font_weight = Some(400);
    let tokens = inventory.text_tokens(&doc, Some(&current)).await.unwrap();
    let order: Vec<&str> = tokens.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, vec!["t-body", "t-heading", "t-roboto"]);

    // Unranked requests come back alphabetically.
    let tokens = inventory.text_tokens(&doc, None).await.unwrap();
    let order: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(order, vec!["Inter Body", "Inter Heading", "Roboto Body"]);
}
