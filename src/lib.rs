//! Paginated text flow for two-page notebook spreads.
//!
//! A single logical buffer is split into page-sized slices by asking a
//! [`MeasurementOracle`] whether candidate text fits. Pages are shown two at
//! a time; edits made on either visible page are written back into the
//! buffer, the buffer is re-paginated, and the caret follows the text onto
//! whichever page now holds it.
//!
//! ```
//! use pageflow::{CharBudgetOracle, FlowOptions, Side, TextFlowController};
//!
//! let text = "x".repeat(500);
//! let flow = TextFlowController::with_oracle(text, FlowOptions::default(), CharBudgetOracle::new(120));
//! assert_eq!(flow.cuts().as_slice(), &[120, 240, 360, 480, 500]);
//! assert_eq!(flow.visible_text(Side::Right).len(), 120);
//! ```
//!
//! All offsets are counted in characters (Unicode scalar values).

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod controller;
pub mod cursor;
pub mod error;
pub mod measure;
pub mod paginate;
pub mod spread;
pub mod text;
pub mod viewport;
pub mod wrap;

pub use controller::{
    EditOutcome, FlowDiagnostic, FlowOptions, FlowSnapshot, FlowView, FocusRequest, SharedOracle,
    TextFlowController,
};
pub use cursor::{resolve_focus, to_global, to_local, CursorResolution, FocusTarget, Side};
pub use error::MeasureError;
pub use measure::{
    CharBudgetOracle, HeightMeasurer, HeightOracle, MeasurementOracle, MonospaceMeasurer,
};
pub use paginate::{compute_cuts, CutList, Pagination, PaginationEngine};
pub use spread::{spread_start_for, AdvancePolicy, SpreadNavigator, SpreadTransition};
pub use text::FlowBuffer;
pub use viewport::{FontSpec, ViewportGeometry};
pub use wrap::RowBreaker;
