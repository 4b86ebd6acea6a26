//! The session state machine.
//!
//! One `Session` owns the host handle and every piece of mutable session
//! state: view state, snapshots, token inventory. Events are handled to
//! completion one at a time; results go out through an unbounded channel.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tokenscope_analysis::mutation::{ApplyOutcome, ApplyTarget, MutationEngine, SnapshotStore};
use tokenscope_analysis::{analyze_colors, analyze_typography, AnalysisOptions, TokenInventory};
use tokenscope_core::types::{NodeId, PaintSlot};
use tokenscope_core::{AnalysisError, ErrorCode, HostDocument, MutationError, TokenscopeConfig};

use crate::driver::AnalysisGate;
use crate::protocol::{InboundMessage, OutboundMessage};
use crate::selection::resolve_containers;
use crate::state::{Phase, Tab, ViewState};

/// Everything a session reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Ui(InboundMessage),
    /// The host reports that its selection changed.
    SelectionChanged,
}

impl SessionEvent {
    pub fn triggers_analysis(&self) -> bool {
        match self {
            Self::Ui(message) => message.triggers_analysis(),
            Self::SelectionChanged => true,
        }
    }
}

pub struct Session<H: HostDocument> {
    host: H,
    options: AnalysisOptions,
    state: ViewState,
    snapshots: SnapshotStore,
    inventory: TokenInventory,
    engine: MutationEngine,
    gate: AnalysisGate,
    outbox: mpsc::UnboundedSender<OutboundMessage>,
}

impl<H: HostDocument> Session<H> {
    pub fn new(
        host: H,
        config: &TokenscopeConfig,
        outbox: mpsc::UnboundedSender<OutboundMessage>,
    ) -> Self {
        let options = AnalysisOptions::from_config(&config.analysis);
        // validated at config load; an unknown name falls back to the default tab
        let tab = config
            .session
            .effective_initial_tab()
            .parse::<Tab>()
            .unwrap_or_default();
        Self {
            host,
            state: ViewState::new(tab, options.include_hidden),
            options,
            snapshots: SnapshotStore::new(),
            inventory: TokenInventory::from_config(config),
            engine: MutationEngine::from_config(config),
            gate: AnalysisGate::default(),
            outbox,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Handle used by the driver to cancel the walk in flight.
    pub fn gate(&self) -> AnalysisGate {
        self.gate.clone()
    }

    fn post(&self, message: OutboundMessage) {
        if self.outbox.send(message).is_err() {
            debug!("ui channel closed, dropping message");
        }
    }

    /// Announce the initial tab and analyze whatever is already selected.
    pub async fn start(&mut self) {
        info!(tab = %self.state.tab, "session started");
        self.post(OutboundMessage::InitTab {
            tab: self.state.tab,
        });
        if !self.host.selection().is_empty() {
            self.on_selection_changed().await;
        }
    }

    /// Handle one event to completion. If the walk in flight was cancelled
    /// on this event's behalf and the handler did not replace it (a failed
    /// apply, a swallowed selection echo), the active tab is analyzed again.
    pub async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Ui(message) => self.handle_message(message).await,
            SessionEvent::SelectionChanged => self.on_selection_changed().await,
        }
        if self.state.superseded {
            debug!(tab = %self.state.tab, "replacing superseded analysis");
            self.analyze_active_tab().await;
        }
    }

    pub async fn handle_message(&mut self, message: InboundMessage) {
        debug!(?message, "ui message");
        let apply_targets = message.apply_targets();
        match message {
            InboundMessage::SelectNode { node_id } => self.select_nodes(vec![node_id]),
            InboundMessage::SelectMultipleNodes { node_ids } => self.select_nodes(node_ids),
            InboundMessage::GetSuggestedTokens { node_id } => {
                self.suggest_tokens(node_id.as_ref()).await
            }
            InboundMessage::ApplyToken {
                style_id,
                is_stroke,
                is_text,
                ..
            } => {
                let targets = apply_targets.unwrap_or_default();
                self.apply(&targets, &style_id, ApplyTarget::from_flags(is_stroke, is_text))
                    .await
            }
            InboundMessage::ApplyTokenMultiple {
                node_ids,
                style_id,
                is_stroke,
            } => {
                let target = ApplyTarget::Paint(PaintSlot::from_is_stroke(is_stroke));
                self.apply(&node_ids, &style_id, target).await
            }
            InboundMessage::ApplyTypographyTokenMultiple { node_ids, style_id } => {
                self.apply(&node_ids, &style_id, ApplyTarget::Text).await
            }
            InboundMessage::RemoveColorToken {
                node_ids,
                is_stroke,
            } => {
                let target = ApplyTarget::Paint(PaintSlot::from_is_stroke(is_stroke));
                self.remove(&node_ids, target).await
            }
            InboundMessage::RemoveTextToken { node_ids } => {
                self.remove(&node_ids, ApplyTarget::Text).await
            }
            InboundMessage::ToggleHidden { value } => {
                self.state.include_hidden = value;
                self.options.include_hidden = value;
                self.refresh_containers();
                self.analyze_active_tab().await;
            }
            InboundMessage::SwitchTab { tab } => self.switch_tab(tab).await,
            InboundMessage::EnterListView => {
                self.state.initial_selection = Some(self.host.selection());
                self.refresh_containers();
                self.state.phase = Phase::ListView;
            }
            InboundMessage::SaveInitialSelection => {
                self.state.initial_selection = Some(self.host.selection());
            }
            InboundMessage::SaveOriginalState { node_ids } => {
                let captured = self.snapshots.capture_all(&self.host, &node_ids).await;
                debug!(requested = node_ids.len(), captured, "original state saved");
            }
            InboundMessage::BackToList => self.back_to_list().await,
            InboundMessage::Reanalyze => {
                self.refresh_containers();
                self.analyze_active_tab().await;
            }
        }
    }

    /// Host selection event. Our own writes are swallowed once.
    pub async fn on_selection_changed(&mut self) {
        let live = self.host.selection();
        if self.state.take_self_triggered(&live) {
            debug!(selected = live.len(), "ignoring self-triggered selection change");
            return;
        }

        if live.is_empty() {
            self.state.root_containers.clear();
            self.state.phase = Phase::Idle;
            self.state.superseded = false;
            self.post(OutboundMessage::Empty { clear_all: true });
            return;
        }

        let containers = resolve_containers(&self.host, &live);
        self.post(OutboundMessage::SelectionChanged);
        if containers != self.state.root_containers {
            self.post(OutboundMessage::FrameChanged);
        }
        self.state.root_containers = containers;
        self.analyze_active_tab().await;
    }

    /// Re-resolve containers from the live selection. An empty or
    /// container-less selection keeps the last known set.
    fn refresh_containers(&mut self) {
        let live = self.host.selection();
        if live.is_empty() {
            return;
        }
        let containers = resolve_containers(&self.host, &live);
        if !containers.is_empty() {
            self.state.root_containers = containers;
        }
    }

    async fn switch_tab(&mut self, tab: Tab) {
        self.state.tab = tab;
        if self.host.selection().is_empty() {
            self.state.phase = Phase::Idle;
            self.state.superseded = false;
            self.post(OutboundMessage::Empty { clear_all: false });
            return;
        }
        self.refresh_containers();
        self.analyze_active_tab().await;
    }

    /// Walk the current containers for the active tab and post the result.
    /// A superseded walk posts nothing.
    async fn analyze_active_tab(&mut self) {
        if self.state.root_containers.is_empty() {
            self.state.phase = Phase::Idle;
            self.state.superseded = false;
            self.post(OutboundMessage::Empty { clear_all: false });
            return;
        }

        let token = self.gate.begin();
        let resumed = self.state.phase;
        self.state.phase = Phase::Analyzing;
        self.post(OutboundMessage::AnalyzingStart);

        let containers = self.state.root_containers.clone();
        let result = match self.state.tab {
            Tab::Colors => analyze_colors(&self.host, &containers, &self.options, &token)
                .await
                .map(|groups| OutboundMessage::ResultColors { groups }),
            Tab::Typography => {
                analyze_typography(&self.host, &containers, &self.options, &token)
                    .await
                    .map(|groups| OutboundMessage::ResultTypography { groups })
            }
        };

        self.state.phase = if resumed == Phase::DetailView {
            Phase::DetailView
        } else {
            Phase::ListView
        };
        self.state.superseded = matches!(result, Err(AnalysisError::Cancelled));
        match result {
            Ok(message) => self.post(message),
            Err(AnalysisError::Cancelled) => {
                debug!(tab = %self.state.tab, "analysis superseded");
            }
            Err(e) => {
                warn!(tab = %self.state.tab, error = %e, "analysis failed");
                self.post(OutboundMessage::Empty { clear_all: false });
            }
        }
    }

    /// Select nodes in the host and frame them. The resulting host event
    /// is our own and gets swallowed.
    fn select_nodes(&mut self, ids: Vec<NodeId>) {
        let existing: Vec<NodeId> = ids
            .into_iter()
            .filter(|id| self.host.node(id).is_some())
            .collect();
        self.host.set_selection(&existing);
        self.state.suppressed_selection = Some(self.host.selection());
        self.host.scroll_into_view(&existing);
        self.state.phase = Phase::DetailView;
        debug!(selected = existing.len(), "nodes selected from panel");
    }

    async fn suggest_tokens(&mut self, node_id: Option<&NodeId>) {
        match self.state.tab {
            Tab::Colors => {
                let tokens = self
                    .inventory
                    .color_tokens(&self.host)
                    .await
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "color token collection failed");
                        Vec::new()
                    });
                self.post(OutboundMessage::ResultSuggestedTokens { tokens });
            }
            Tab::Typography => {
                let current = node_id
                    .and_then(|id| self.host.node(id))
                    .and_then(|node| node.text().map(|(props, _)| props.clone()));
                let tokens = self
                    .inventory
                    .text_tokens(&self.host, current.as_ref())
                    .await
                    .unwrap_or_else(|e| {
                        warn!(error = %e, "text token collection failed");
                        Vec::new()
                    });
                self.post(OutboundMessage::ResultSuggestedTextTokens { tokens });
            }
        }
    }

    async fn apply(&mut self, node_ids: &[NodeId], token_id: &str, target: ApplyTarget) {
        let result = self
            .engine
            .apply_token(
                &mut self.host,
                &mut self.snapshots,
                node_ids,
                token_id,
                target,
            )
            .await;

        match result {
            Ok(outcome) => {
                self.report_applied(outcome);
                self.inventory.invalidate();
                self.refresh_containers();
                self.analyze_active_tab().await;
            }
            Err(e) => {
                warn!(token = token_id, error = %e, "apply failed");
                self.post(OutboundMessage::TokenAppliedError {
                    message: Some(e.ui_message()),
                });
            }
        }
    }

    fn report_applied(&self, outcome: ApplyOutcome) {
        for node in &outcome.applied {
            self.post(OutboundMessage::UpdateDetail {
                node_id: node.node_id.clone(),
                style_name: node.style_name.clone(),
                style_id: node.style_id.clone(),
            });
        }
        let first = outcome.applied.first().cloned();
        let fallback_nodes = outcome.fallback_nodes.clone();
        match (outcome.into_result(), first) {
            (Ok(_), Some(first)) => self.post(OutboundMessage::TokenAppliedSuccess {
                style_name: first.style_name,
                style_id: first.style_id,
                fallback_nodes,
            }),
            (Ok(_), None) => self.post(OutboundMessage::TokenAppliedError {
                message: Some(MutationError::NoTargets.ui_message()),
            }),
            (Err(e), _) => self.post(OutboundMessage::TokenAppliedError {
                message: Some(e.ui_message()),
            }),
        }
    }

    async fn remove(&mut self, node_ids: &[NodeId], target: ApplyTarget) {
        match self
            .engine
            .remove_token(&mut self.host, &self.snapshots, node_ids, target)
            .await
        {
            Ok(_) => {
                self.post(OutboundMessage::TokenRemovedSuccess);
                self.inventory.invalidate();
                self.refresh_containers();
                self.analyze_active_tab().await;
            }
            Err(e) => {
                warn!(error = %e, "remove failed");
                self.post(OutboundMessage::TokenAppliedError {
                    message: Some(e.ui_message()),
                });
            }
        }
    }

    /// Leave the detail view: restore the selection captured on entry,
    /// re-run analysis, then close the editing session.
    async fn back_to_list(&mut self) {
        if let Some(initial) = self.state.initial_selection.clone() {
            let existing: Vec<NodeId> = initial
                .into_iter()
                .filter(|id| self.host.node(id).is_some())
                .collect();
            self.host.set_selection(&existing);
            self.state.suppressed_selection = Some(self.host.selection());
        }
        self.state.phase = Phase::ListView;
        self.refresh_containers();
        self.analyze_active_tab().await;

        self.state.initial_selection = None;
        let cleared = self.snapshots.len();
        self.snapshots.clear();
        debug!(cleared, "editing session closed");
    }
}
