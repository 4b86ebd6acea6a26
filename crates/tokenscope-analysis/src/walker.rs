//! Tree walker and grouping engine.
//!
//! Depth-first, pre-order over every descendant of the given containers. A
//! hidden node prunes its whole subtree unless hidden elements are included.
//! The walk yields to the executor every `yield_interval` visited nodes and
//! checks for cancellation at the same points.

use tracing::{debug, field, info, Span};

use tokenscope_core::config::AnalysisConfig;
use tokenscope_core::tracing::metrics;
use tokenscope_core::types::collections::{FxHashMap, FxHashSet};
use tokenscope_core::types::{FontName, NodeId, PaintSlot, SceneNode};
use tokenscope_core::{AnalysisError, Cancellable, HostDocument};

use crate::color::{classify_paint, PaintClass};
use crate::compliance::{is_text_compliant, ComplianceChecker};
use crate::types::{ColorGroup, PaintKind, PaintOccurrence, TypographyGroup, TypographyOccurrence};
use crate::weight::{numeric_weight, readable_weight, typography_label};

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub include_hidden: bool,
    pub yield_interval: u32,
    pub token_prefixes: Vec<String>,
    pub gradient_label: String,
}

impl AnalysisOptions {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            include_hidden: config.effective_include_hidden(),
            yield_interval: config.effective_yield_interval(),
            token_prefixes: config.effective_token_prefixes(),
            gradient_label: config.effective_gradient_label(),
        }
    }

    pub fn with_include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

/// Synchronous pre-order iterator over the union of several subtrees.
///
/// A node reachable from two selected containers (one nested in the other)
/// is visited once. Ids the host no longer resolves are skipped.
pub struct Preorder<'h, H> {
    host: &'h H,
    stack: Vec<NodeId>,
    seen: FxHashSet<NodeId>,
    include_hidden: bool,
}

impl<'h, H: HostDocument> Preorder<'h, H> {
    pub fn new(host: &'h H, roots: &[NodeId], include_hidden: bool) -> Self {
        Self {
            host,
            stack: roots.iter().rev().cloned().collect(),
            seen: FxHashSet::default(),
            include_hidden,
        }
    }
}

impl<H: HostDocument> Iterator for Preorder<'_, H> {
    type Item = SceneNode;

    fn next(&mut self) -> Option<SceneNode> {
        while let Some(id) = self.stack.pop() {
            if !self.seen.insert(id.clone()) {
                continue;
            }
            let Some(node) = self.host.node(&id) else {
                continue;
            };
            if !node.visible && !self.include_hidden {
                continue;
            }
            self.stack.extend(node.children.iter().rev().cloned());
            return Some(node);
        }
        None
    }
}

/// Yield point: bail out if superseded, otherwise let the executor breathe.
async fn checkpoint(cancel: &impl Cancellable) -> Result<(), AnalysisError> {
    if cancel.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }
    tokio::task::yield_now().await;
    if cancel.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }
    Ok(())
}

/// Insertion-ordered grouping: groups come out in first-seen order.
struct Grouper<K, G> {
    index: FxHashMap<K, usize>,
    groups: Vec<G>,
}

impl<K: std::hash::Hash + Eq, G> Grouper<K, G> {
    fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            groups: Vec::new(),
        }
    }

    fn entry(&mut self, key: K, make: impl FnOnce() -> G) -> &mut G {
        let next = self.groups.len();
        let slot = *self.index.entry(key).or_insert(next);
        if slot == next {
            self.groups.push(make());
        }
        &mut self.groups[slot]
    }

    fn into_groups(self) -> Vec<G> {
        self.groups
    }
}

fn record_summary(visited: usize, groups: usize, occurrences: usize) {
    let span = Span::current();
    span.record(metrics::VISITED_NODES, visited);
    span.record(metrics::GROUP_COUNT, groups);
    span.record(metrics::OCCURRENCE_COUNT, occurrences);
}

/// Group every non-compliant fill and stroke paint under `containers`,
/// keyed by `(hex or gradient signature, slot)`.
#[tracing::instrument(
    skip_all,
    fields(
        containers = containers.len(),
        visited_nodes = field::Empty,
        group_count = field::Empty,
        occurrence_count = field::Empty
    )
)]
pub async fn analyze_colors<H: HostDocument>(
    host: &H,
    containers: &[NodeId],
    options: &AnalysisOptions,
    cancel: &impl Cancellable,
) -> Result<Vec<ColorGroup>, AnalysisError> {
    checkpoint(cancel).await?;

    let interval = options.yield_interval.max(1) as usize;
    let mut checker = ComplianceChecker::new(options.token_prefixes.clone());
    let mut grouper: Grouper<(String, bool), ColorGroup> = Grouper::new();
    let mut visited = 0usize;
    let mut occurrences = 0usize;

    for node in Preorder::new(host, containers, options.include_hidden) {
        visited += 1;
        if visited % interval == 0 {
            checkpoint(cancel).await?;
        }
        let Some(paints) = node.paints() else {
            continue;
        };

        for slot in [PaintSlot::Fill, PaintSlot::Stroke] {
            for paint in paints.paints(slot) {
                let (kind, value, label) = match classify_paint(paint) {
                    PaintClass::Excluded => continue,
                    PaintClass::Solid { hex } => (PaintKind::Solid, hex.clone(), hex),
                    PaintClass::Gradient { signature } => {
                        (PaintKind::Gradient, signature, options.gradient_label.clone())
                    }
                };
                if checker.is_paint_compliant(host, paints, paint, slot).await {
                    continue;
                }
                let is_stroke = slot.is_stroke();
                let group = grouper.entry((value.clone(), is_stroke), || ColorGroup {
                    label,
                    color_value: value.clone(),
                    is_stroke,
                    occurrences: Vec::new(),
                });
                group.occurrences.push(PaintOccurrence {
                    node_id: node.id.clone(),
                    node_name: node.name.clone(),
                    paint_kind: kind,
                    color_value: value,
                    is_stroke,
                });
                occurrences += 1;
            }
        }
    }

    checkpoint(cancel).await?;
    let groups = grouper.into_groups();
    record_summary(visited, groups.len(), occurrences);
    info!(
        visited,
        groups = groups.len(),
        occurrences,
        "color analysis complete"
    );
    Ok(groups)
}

/// Group every text node without a text-style binding under `containers`,
/// keyed by the raw `(family, style)` font name.
#[tracing::instrument(
    skip_all,
    fields(
        containers = containers.len(),
        visited_nodes = field::Empty,
        group_count = field::Empty,
        occurrence_count = field::Empty
    )
)]
pub async fn analyze_typography<H: HostDocument>(
    host: &H,
    containers: &[NodeId],
    options: &AnalysisOptions,
    cancel: &impl Cancellable,
) -> Result<Vec<TypographyGroup>, AnalysisError> {
    checkpoint(cancel).await?;

    let interval = options.yield_interval.max(1) as usize;
    let mut grouper: Grouper<FontName, TypographyGroup> = Grouper::new();
    let mut visited = 0usize;
    let mut occurrences = 0usize;

    for node in Preorder::new(host, containers, options.include_hidden) {
        visited += 1;
        if visited % interval == 0 {
            checkpoint(cancel).await?;
        }
        let Some((props, binding)) = node.text() else {
            continue;
        };
        if is_text_compliant(binding) {
            continue;
        }

        let font = &props.font_name;
        let group = grouper.entry(font.clone(), || TypographyGroup {
            style: font.clone(),
            label: typography_label(&font.family, &font.style),
            occurrences: Vec::new(),
        });
        group.occurrences.push(TypographyOccurrence {
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            font_family: font.family.clone(),
            font_style: font.style.clone(),
            readable_weight: readable_weight(&font.style).to_string(),
            font_size: props.font_size,
            font_weight: props
                .font_weight
                .unwrap_or_else(|| numeric_weight(&font.style)),
            line_height: props.line_height,
            letter_spacing: props.letter_spacing,
        });
        occurrences += 1;
    }

    checkpoint(cancel).await?;
    let groups = grouper.into_groups();
    record_summary(visited, groups.len(), occurrences);
    debug!(groups = groups.len(), "typography groups built");
    info!(visited, occurrences, "typography analysis complete");
    Ok(groups)
}
