//! Text flow controller.
//!
//! Owns the single logical buffer and routes every edit made on a visible
//! page back into it. After each change the buffer is re-paginated, the
//! caret is re-homed onto the page that now holds it, and the spread follows
//! the caret when it leaves the screen.
//!
//! Caret restoration is two-phase: an edit stores a [`FocusRequest`], the
//! host re-renders both sides, and only then takes the request and places
//! the caret. A request is superseded by the next edit; its `generation`
//! tells a host which one it is looking at.

use core::fmt;
use core::ops::Range;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::cursor::{focus_on_page, resolve_focus, to_global, CursorResolution, FocusTarget, Side};
use crate::error::MeasureError;
use crate::measure::MeasurementOracle;
use crate::paginate::{CutList, PaginationEngine};
use crate::spread::{AdvancePolicy, SpreadNavigator, SpreadTransition};
use crate::text::{char_len, FlowBuffer};
use crate::viewport::ViewportGeometry;

/// Controller options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowOptions {
    /// Geometry shared by both pages of a spread.
    pub viewport: ViewportGeometry,
    /// Boundary caret placement.
    #[serde(default)]
    pub advance_policy: AdvancePolicy,
}

impl FlowOptions {
    /// Build options for a content-box size.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            viewport: ViewportGeometry::for_content(width, height),
            advance_policy: AdvancePolicy::default(),
        }
    }
}

/// Runtime diagnostics from pagination and navigation.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowDiagnostic {
    Repaginated {
        page_count: usize,
        oracle_calls: usize,
    },
    /// Nothing fit on a page, so it was forced to a single character.
    DegenerateFit { page_index: usize, offset: usize },
    /// The oracle could not answer; the previous cuts were kept.
    StaleOracle { reason: MeasureError },
    /// A caret offset past the buffer end was clamped.
    FocusClamped { requested: usize, buffer_len: usize },
    SpreadChanged { from: usize, to: usize },
}

/// Borrowed view of the controller state handed to publish sinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FlowView<'a> {
    pub full_text: &'a str,
    pub cuts: &'a [usize],
    pub spread_start: usize,
}

impl FlowView<'_> {
    pub fn to_snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            full_text: self.full_text.to_string(),
            cuts: self.cuts.to_vec(),
            spread_start: self.spread_start,
        }
    }
}

/// Owned copy of the published state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub full_text: String,
    pub cuts: Vec<usize>,
    pub spread_start: usize,
}

/// Caret placement waiting for the host's next render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusRequest {
    /// Side and page-local offset to focus.
    pub target: FocusTarget,
    /// Page the caret lands on.
    pub page_index: usize,
    /// Caret position in the full buffer.
    pub global_offset: usize,
    /// Edit counter when the request was made.
    pub generation: u64,
}

/// Result of [`TextFlowController::apply_edit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    pub focus: FocusRequest,
    pub transition: SpreadTransition,
    /// False when the previous cuts had to be kept.
    pub repaginated: bool,
}

/// Oracle handle shared between the controller and its host.
pub type SharedOracle = Arc<dyn MeasurementOracle + Send + Sync>;
type DiagnosticCallback = Arc<Mutex<Box<dyn FnMut(FlowDiagnostic) + Send + 'static>>>;
type PublishCallback = Arc<Mutex<Box<dyn FnMut(&FlowView<'_>) + Send + 'static>>>;

/// Two-page text flow over one buffer.
#[derive(Clone)]
pub struct TextFlowController {
    buffer: FlowBuffer,
    engine: PaginationEngine,
    cuts: CutList,
    navigator: SpreadNavigator,
    oracle: Option<SharedOracle>,
    pending_focus: Option<FocusRequest>,
    generation: u64,
    diagnostic_sink: Option<DiagnosticCallback>,
    publish_sink: Option<PublishCallback>,
}

impl fmt::Debug for TextFlowController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFlowController")
            .field("buffer_len", &self.buffer.char_len())
            .field("cuts", &self.cuts)
            .field("navigator", &self.navigator)
            .field("oracle_attached", &self.oracle.is_some())
            .field("pending_focus", &self.pending_focus)
            .finish_non_exhaustive()
    }
}

impl TextFlowController {
    /// Create a controller with no measurement surface yet.
    ///
    /// Until an oracle is attached the whole buffer is a single page.
    pub fn new(initial_text: impl Into<String>, options: FlowOptions) -> Self {
        let buffer = FlowBuffer::new(initial_text);
        let mut cuts = CutList::default();
        cuts.reconcile(buffer.char_len());
        Self {
            buffer,
            engine: PaginationEngine::new(options.viewport),
            cuts,
            navigator: SpreadNavigator::new(options.advance_policy),
            oracle: None,
            pending_focus: None,
            generation: 0,
            diagnostic_sink: None,
            publish_sink: None,
        }
    }

    /// Create a controller and paginate with `oracle` right away.
    pub fn with_oracle<O>(initial_text: impl Into<String>, options: FlowOptions, oracle: O) -> Self
    where
        O: MeasurementOracle + Send + Sync + 'static,
    {
        let mut controller = Self::new(initial_text, options);
        controller.oracle = Some(Arc::new(oracle));
        controller.repaginate();
        controller
    }

    /// Register or replace the diagnostics sink.
    pub fn set_diagnostic_sink<F>(&mut self, sink: F)
    where
        F: FnMut(FlowDiagnostic) + Send + 'static,
    {
        self.diagnostic_sink = Some(Arc::new(Mutex::new(Box::new(sink))));
    }

    /// Register or replace the consumer notified after every change.
    pub fn set_publish_sink<F>(&mut self, sink: F)
    where
        F: FnMut(&FlowView<'_>) + Send + 'static,
    {
        self.publish_sink = Some(Arc::new(Mutex::new(Box::new(sink))));
    }

    /// Mount a measurement surface and re-paginate against it.
    pub fn attach_oracle<O>(&mut self, oracle: O) -> bool
    where
        O: MeasurementOracle + Send + Sync + 'static,
    {
        self.attach_shared_oracle(Arc::new(oracle))
    }

    /// Mount an oracle that is shared with other owners.
    ///
    /// A pending focus is re-resolved against the new cuts and dropped if its
    /// page is no longer on screen.
    pub fn attach_shared_oracle(&mut self, oracle: SharedOracle) -> bool {
        self.oracle = Some(oracle);
        let repaginated = self.repaginate();
        self.refresh_pending_focus();
        self.publish();
        repaginated
    }

    /// Unmount the measurement surface. Edits keep working on stale cuts
    /// until a new one is attached.
    pub fn detach_oracle(&mut self) -> Option<SharedOracle> {
        self.oracle.take()
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    pub fn full_text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Buffer length in characters.
    pub fn buffer_len(&self) -> usize {
        self.buffer.char_len()
    }

    pub fn cuts(&self) -> &CutList {
        &self.cuts
    }

    pub fn page_count(&self) -> usize {
        self.cuts.page_count()
    }

    pub fn spread_start(&self) -> usize {
        self.navigator.spread_start()
    }

    pub fn navigator(&self) -> &SpreadNavigator {
        &self.navigator
    }

    pub fn viewport(&self) -> &ViewportGeometry {
        self.engine.viewport()
    }

    pub fn advance_policy(&self) -> AdvancePolicy {
        self.navigator.policy()
    }

    pub fn set_advance_policy(&mut self, policy: AdvancePolicy) {
        self.navigator.set_policy(policy);
    }

    /// Character range shown on `side`.
    pub fn visible_range(&self, side: Side) -> Range<usize> {
        self.cuts
            .page_range(side.page_index(self.navigator.spread_start()))
    }

    /// Text shown on `side`; empty when the page is past the content.
    pub fn visible_text(&self, side: Side) -> &str {
        self.buffer.slice(self.visible_range(side))
    }

    /// Ruling-line offsets for the page on `side`.
    pub fn ruling_offsets(&self, side: Side) -> Vec<f32> {
        self.engine
            .viewport()
            .ruling_offsets(side.page_index(self.navigator.spread_start()))
    }

    /// Replace the text shown on `side` with `new_local_text`.
    ///
    /// `local_caret` is the caret position inside the edited page after the
    /// edit, in characters; it is clamped to the new page text. The spread
    /// is moved when the caret ends up off screen, and the resulting caret
    /// placement is stored as the pending focus.
    pub fn apply_edit(
        &mut self,
        side: Side,
        new_local_text: &str,
        local_caret: usize,
    ) -> EditOutcome {
        let spread_start = self.navigator.spread_start();
        let edited = self.visible_range(side);
        let caret = local_caret.min(char_len(new_local_text));
        let requested = to_global(side, caret, &self.cuts, spread_start);
        self.buffer.splice(edited, new_local_text);
        log::trace!(
            "flow: edit on {:?} page {} -> caret {}",
            side,
            side.page_index(spread_start),
            requested
        );

        let repaginated = self.repaginate();
        let global = self.clamp_focus(requested);
        let (target, page_index, transition) = self.follow_caret(global);

        self.generation = self.generation.wrapping_add(1);
        let focus = FocusRequest {
            target,
            page_index,
            global_offset: global,
            generation: self.generation,
        };
        self.pending_focus = Some(focus);
        self.publish();
        EditOutcome {
            focus,
            transition,
            repaginated,
        }
    }

    /// Show the spread containing `page_index` (odd indices round down).
    ///
    /// Manual navigation drops any pending focus.
    pub fn set_spread(&mut self, page_index: usize) -> SpreadTransition {
        let transition = self.navigator.show_page(page_index);
        self.after_navigation(transition)
    }

    pub fn next_spread(&mut self) -> SpreadTransition {
        let transition = self.navigator.next();
        self.after_navigation(transition)
    }

    pub fn prev_spread(&mut self) -> SpreadTransition {
        let transition = self.navigator.prev();
        self.after_navigation(transition)
    }

    /// Change page geometry. Returns whether a repagination ran.
    pub fn set_viewport(&mut self, viewport: ViewportGeometry) -> bool {
        if *self.engine.viewport() == viewport {
            return false;
        }
        self.engine.set_viewport(viewport);
        let repaginated = self.repaginate();
        self.refresh_pending_focus();
        self.publish();
        repaginated
    }

    /// Replace the whole buffer from outside the page editors.
    ///
    /// A pending focus is clamped to the new text and dropped if its page
    /// is no longer on screen.
    pub fn replace_buffer(&mut self, text: impl Into<String>) {
        self.buffer.replace(text);
        self.repaginate();
        self.refresh_pending_focus();
        self.publish();
    }

    pub fn pending_focus(&self) -> Option<&FocusRequest> {
        self.pending_focus.as_ref()
    }

    /// Take the caret placement once the host has re-rendered.
    pub fn take_pending_focus(&mut self) -> Option<FocusRequest> {
        self.pending_focus.take()
    }

    pub fn view(&self) -> FlowView<'_> {
        FlowView {
            full_text: self.buffer.as_str(),
            cuts: self.cuts.as_slice(),
            spread_start: self.navigator.spread_start(),
        }
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        self.view().to_snapshot()
    }

    /// Recompute cuts for the current buffer.
    ///
    /// On oracle failure the old list is reconciled to the buffer length
    /// and kept. Returns whether fresh cuts were computed.
    fn repaginate(&mut self) -> bool {
        let result = match self.oracle.as_deref() {
            Some(oracle) => self.engine.compute_cuts(self.buffer.as_str(), oracle),
            None => Err(MeasureError::Unavailable),
        };
        match result {
            Ok(pagination) => {
                for &page_index in &pagination.degenerate_pages {
                    let offset = pagination.cuts.page_start(page_index);
                    self.emit_diagnostic(FlowDiagnostic::DegenerateFit { page_index, offset });
                }
                self.emit_diagnostic(FlowDiagnostic::Repaginated {
                    page_count: pagination.cuts.page_count(),
                    oracle_calls: pagination.oracle_calls,
                });
                self.cuts = pagination.cuts;
                true
            }
            Err(reason) => {
                log::warn!("flow: {}; keeping previous page cuts", reason);
                self.cuts.reconcile(self.buffer.char_len());
                self.emit_diagnostic(FlowDiagnostic::StaleOracle { reason });
                false
            }
        }
    }

    fn clamp_focus(&mut self, requested: usize) -> usize {
        let buffer_len = self.buffer.char_len();
        if requested <= buffer_len {
            return requested;
        }
        log::debug!("flow: caret {} clamped to {}", requested, buffer_len);
        self.emit_diagnostic(FlowDiagnostic::FocusClamped {
            requested,
            buffer_len,
        });
        buffer_len
    }

    /// Move the spread onto the page holding `global` if needed.
    fn follow_caret(&mut self, global: usize) -> (FocusTarget, usize, SpreadTransition) {
        let spread_start = self.navigator.spread_start();
        let policy = self.navigator.policy();
        let (page_index, transition) = match resolve_focus(global, &self.cuts, spread_start, policy)
        {
            CursorResolution::Stay(target) => {
                return (
                    target,
                    target.side.page_index(spread_start),
                    SpreadTransition::Stayed,
                );
            }
            CursorResolution::Advance { page_index, .. } => {
                (page_index, self.navigator.auto_advance(page_index))
            }
            CursorResolution::Retreat { page_index, .. } => {
                (page_index, self.navigator.auto_retreat(page_index))
            }
        };
        if let SpreadTransition::Advanced { from, to } | SpreadTransition::Retreated { from, to } =
            transition
        {
            self.emit_diagnostic(FlowDiagnostic::SpreadChanged { from, to });
        }
        (
            focus_on_page(global, &self.cuts, page_index),
            page_index,
            transition,
        )
    }

    fn refresh_pending_focus(&mut self) {
        let Some(pending) = self.pending_focus else {
            return;
        };
        let global = self.clamp_focus(pending.global_offset);
        let spread_start = self.navigator.spread_start();
        self.pending_focus =
            match resolve_focus(global, &self.cuts, spread_start, self.navigator.policy()) {
                CursorResolution::Stay(target) => Some(FocusRequest {
                    target,
                    page_index: target.side.page_index(spread_start),
                    global_offset: global,
                    ..pending
                }),
                CursorResolution::Advance { .. } | CursorResolution::Retreat { .. } => None,
            };
    }

    fn after_navigation(&mut self, transition: SpreadTransition) -> SpreadTransition {
        if let SpreadTransition::Advanced { from, to } | SpreadTransition::Retreated { from, to } =
            transition
        {
            log::debug!("flow: spread {} -> {}", from, to);
            self.pending_focus = None;
            self.emit_diagnostic(FlowDiagnostic::SpreadChanged { from, to });
            self.publish();
        }
        transition
    }

    fn emit_diagnostic(&self, diagnostic: FlowDiagnostic) {
        let Some(sink) = &self.diagnostic_sink else {
            return;
        };
        if let Ok(mut sink) = sink.lock() {
            sink(diagnostic);
        }
    }

    fn publish(&self) {
        let Some(sink) = &self.publish_sink else {
            return;
        };
        if let Ok(mut sink) = sink.lock() {
            sink(&self.view());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::CharBudgetOracle;

    fn filler(len: usize) -> String {
        (0..len)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect()
    }

    fn controller(len: usize, per_page: usize) -> TextFlowController {
        TextFlowController::with_oracle(
            filler(len),
            FlowOptions::default(),
            CharBudgetOracle::new(per_page),
        )
    }

    fn collect_diagnostics(
        controller: &mut TextFlowController,
    ) -> Arc<Mutex<Vec<FlowDiagnostic>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        controller.set_diagnostic_sink(move |diagnostic| {
            sink.lock().expect("diagnostics lock").push(diagnostic);
        });
        seen
    }

    #[test]
    fn paginates_on_construction() {
        let flow = controller(500, 120);
        assert_eq!(flow.cuts().as_slice(), &[120, 240, 360, 480, 500]);
        assert_eq!(flow.visible_text(Side::Left).chars().count(), 120);
        assert_eq!(flow.visible_range(Side::Right), 120..240);
    }

    #[test]
    fn without_oracle_buffer_is_one_page() {
        let flow = TextFlowController::new(filler(50), FlowOptions::default());
        assert_eq!(flow.cuts().as_slice(), &[50]);
        assert_eq!(flow.visible_text(Side::Right), "");
    }

    #[test]
    fn edit_within_page_keeps_spread() {
        let mut flow = controller(100, 120);
        let outcome = flow.apply_edit(Side::Left, "hello", 5);
        assert_eq!(flow.full_text(), "hello");
        assert_eq!(outcome.transition, SpreadTransition::Stayed);
        assert_eq!(
            outcome.focus.target,
            FocusTarget {
                side: Side::Left,
                local_offset: 5
            }
        );
        assert_eq!(flow.take_pending_focus(), Some(outcome.focus));
        assert_eq!(flow.take_pending_focus(), None);
    }

    #[test]
    fn caret_past_edited_text_is_clamped_locally() {
        let mut flow = controller(10, 120);
        let outcome = flow.apply_edit(Side::Left, "abc", 99);
        assert_eq!(outcome.focus.global_offset, 3);
    }

    #[test]
    fn overflowing_right_page_advances_spread() {
        let mut flow = controller(240, 120);
        let mut page = flow.visible_text(Side::Right).to_string();
        page.push('!');
        let outcome = flow.apply_edit(Side::Right, &page, 121);
        assert_eq!(flow.cuts().as_slice(), &[120, 240, 241]);
        assert_eq!(outcome.transition, SpreadTransition::Advanced { from: 0, to: 2 });
        assert_eq!(
            outcome.focus.target,
            FocusTarget {
                side: Side::Left,
                local_offset: 1
            }
        );
        assert_eq!(flow.spread_start(), 2);
    }

    #[test]
    fn oracle_failure_keeps_reconciled_cuts() {
        struct Failing;
        impl MeasurementOracle for Failing {
            fn fits(&self, _: &str, _: &ViewportGeometry) -> Result<bool, MeasureError> {
                Err(MeasureError::failed("surface gone"))
            }
        }

        let mut flow = controller(300, 120);
        let seen = collect_diagnostics(&mut flow);
        assert!(!flow.attach_oracle(Failing));
        assert_eq!(flow.cuts().as_slice(), &[120, 240, 300]);

        let outcome = flow.apply_edit(Side::Left, "x", 1);
        assert!(!outcome.repaginated);
        assert_eq!(flow.buffer_len(), 181);
        assert_eq!(flow.cuts().as_slice(), &[120, 181]);
        let seen = seen.lock().expect("diagnostics lock");
        assert!(seen
            .iter()
            .all(|d| matches!(d, FlowDiagnostic::StaleOracle { .. })));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn detached_oracle_reports_unavailable() {
        let mut flow = controller(50, 120);
        let seen = collect_diagnostics(&mut flow);
        assert!(flow.detach_oracle().is_some());
        flow.apply_edit(Side::Left, "short", 5);
        assert_eq!(flow.cuts().as_slice(), &[5]);
        assert_eq!(
            seen.lock().expect("diagnostics lock").as_slice(),
            &[FlowDiagnostic::StaleOracle {
                reason: MeasureError::Unavailable
            }]
        );
    }

    #[test]
    fn degenerate_pages_are_reported() {
        struct NothingFits;
        impl MeasurementOracle for NothingFits {
            fn fits(&self, text: &str, _: &ViewportGeometry) -> Result<bool, MeasureError> {
                Ok(text.is_empty())
            }
        }

        let mut flow = TextFlowController::new("abc", FlowOptions::default());
        let seen = collect_diagnostics(&mut flow);
        flow.attach_oracle(NothingFits);
        assert_eq!(flow.cuts().as_slice(), &[1, 2, 3]);
        let seen = seen.lock().expect("diagnostics lock");
        assert_eq!(
            seen[..3],
            [
                FlowDiagnostic::DegenerateFit {
                    page_index: 0,
                    offset: 0
                },
                FlowDiagnostic::DegenerateFit {
                    page_index: 1,
                    offset: 1
                },
                FlowDiagnostic::DegenerateFit {
                    page_index: 2,
                    offset: 2
                },
            ]
        );
    }

    #[test]
    fn manual_navigation_drops_pending_focus() {
        let mut flow = controller(500, 120);
        let page = flow.visible_text(Side::Left).to_string();
        flow.apply_edit(Side::Left, &page, 0);
        assert!(flow.pending_focus().is_some());
        assert_eq!(
            flow.next_spread(),
            SpreadTransition::Advanced { from: 0, to: 2 }
        );
        assert!(flow.pending_focus().is_none());
        assert_eq!(flow.set_spread(5), SpreadTransition::Advanced { from: 2, to: 4 });
        assert_eq!(flow.visible_text(Side::Left).chars().count(), 20);
        assert_eq!(flow.visible_text(Side::Right), "");
        assert_eq!(flow.prev_spread(), SpreadTransition::Retreated { from: 4, to: 2 });
    }

    #[test]
    fn publish_sink_sees_every_change() {
        let mut flow = controller(130, 120);
        let published = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&published);
        flow.set_publish_sink(move |view| {
            sink.lock().expect("publish lock").push(view.to_snapshot());
        });
        flow.apply_edit(Side::Right, "", 0);
        flow.next_spread();
        let published = published.lock().expect("publish lock");
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].cuts, vec![120]);
        assert_eq!(published[0].full_text.len(), 120);
        assert_eq!(published[1].spread_start, 2);
    }

    #[test]
    fn unchanged_viewport_skips_repagination() {
        let mut flow = controller(10, 120);
        let same = flow.viewport().clone();
        assert!(!flow.set_viewport(same));
        let mut taller = flow.viewport().clone();
        taller.content_height += 10.0;
        assert!(flow.set_viewport(taller));
    }

    #[test]
    fn replace_buffer_clamps_pending_focus() {
        let mut flow = controller(100, 120);
        flow.apply_edit(Side::Left, &filler(100), 90);
        let seen = collect_diagnostics(&mut flow);
        flow.replace_buffer("tiny");
        let pending = flow.pending_focus().copied().expect("focus kept");
        assert_eq!(pending.global_offset, 4);
        assert_eq!(pending.target.local_offset, 4);
        assert!(seen
            .lock()
            .expect("diagnostics lock")
            .contains(&FlowDiagnostic::FocusClamped {
                requested: 90,
                buffer_len: 4
            }));
    }

    #[test]
    fn attaching_oracle_reresolves_pending_focus() {
        let mut flow = controller(200, 120);
        flow.detach_oracle();
        flow.apply_edit(Side::Left, &filler(120), 10);
        let stale = flow.pending_focus().copied().expect("focus pending");
        assert_eq!(stale.target, FocusTarget { side: Side::Left, local_offset: 10 });

        assert!(flow.attach_oracle(CharBudgetOracle::new(5)));
        let pending = flow.pending_focus().copied().expect("focus kept");
        assert_eq!(pending.target, FocusTarget { side: Side::Right, local_offset: 5 });
        assert_eq!(pending.page_index, 1);
        assert_eq!(pending.global_offset, 10);
        assert_eq!(pending.generation, stale.generation);

        assert!(flow.attach_oracle(CharBudgetOracle::new(2)));
        assert!(flow.pending_focus().is_none());
    }

    #[test]
    fn snapshot_serializes_published_fields() {
        let flow = controller(5, 120);
        let json = serde_json::to_value(flow.snapshot()).expect("serialize snapshot");
        assert_eq!(json["full_text"], "abcde");
        assert_eq!(json["cuts"], serde_json::json!([5]));
        assert_eq!(json["spread_start"], 0);
    }
}
