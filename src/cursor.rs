use serde::{Deserialize, Serialize};

use crate::paginate::CutList;
use crate::spread::{spread_start_for, AdvancePolicy};

/// One half of a spread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Page index of this side in the spread starting at `spread_start`.
    pub fn page_index(self, spread_start: usize) -> usize {
        match self {
            Self::Left => spread_start,
            Self::Right => spread_start + 1,
        }
    }

    /// Side a page is shown on.
    pub fn of_page(page_index: usize) -> Self {
        if page_index % 2 == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Where the caret should land after an edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTarget {
    pub side: Side,
    /// Caret offset within the side's page, in characters.
    pub local_offset: usize,
}

/// Placement of a global caret relative to the visible spread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorResolution {
    /// The caret is on the current spread.
    Stay(FocusTarget),
    /// The caret moved to a page after the current spread.
    Advance {
        page_index: usize,
        /// Spreads to move forward.
        spreads: usize,
    },
    /// The caret moved to a page before the current spread.
    Retreat {
        page_index: usize,
        /// Spreads to move back.
        spreads: usize,
    },
}

/// Global buffer offset of a caret at `local_offset` on `side`.
///
/// The side's page start comes from `cuts`, which must be the list the side
/// was rendered from. An edit only rewrites text from its own page start on,
/// so the pre-edit list is still valid for this after splicing.
pub fn to_global(side: Side, local_offset: usize, cuts: &CutList, spread_start: usize) -> usize {
    cuts.page_start(side.page_index(spread_start)) + local_offset
}

/// Place `global` relative to the spread at `spread_start`, breaking
/// boundary ties toward the earlier page.
pub fn to_local(global: usize, cuts: &CutList, spread_start: usize) -> CursorResolution {
    resolve_focus(global, cuts, spread_start, AdvancePolicy::OnOverflow)
}

/// Place `global` relative to the spread at `spread_start`.
///
/// Only offsets before the left page's start retreat; the start itself stays
/// on the left page unless that page is empty. Offsets past the buffer
/// resolve into the last page, and a `Stay` local offset is always clamped to
/// `0..=page_len`.
pub fn resolve_focus(
    global: usize,
    cuts: &CutList,
    spread_start: usize,
    policy: AdvancePolicy,
) -> CursorResolution {
    // The start of a non-empty left page belongs to that page, whatever
    // page the previous boundary closes.
    if global == cuts.page_start(spread_start) && cuts.page_len(spread_start) > 0 {
        return CursorResolution::Stay(FocusTarget {
            side: Side::Left,
            local_offset: 0,
        });
    }
    let page_index = match policy {
        AdvancePolicy::OnOverflow => cuts.page_of(global),
        AdvancePolicy::RightFirst => cuts.page_starting_at_or_containing(global),
    };
    let target_spread = spread_start_for(page_index);
    if target_spread < spread_start {
        return CursorResolution::Retreat {
            page_index,
            spreads: (spread_start - target_spread) / 2,
        };
    }
    if target_spread > spread_start {
        return CursorResolution::Advance {
            page_index,
            spreads: (target_spread - spread_start) / 2,
        };
    }
    CursorResolution::Stay(focus_on_page(global, cuts, page_index))
}

/// Caret placement for `global` on a page already known to hold it, clamped
/// to `0..=page_len`.
pub fn focus_on_page(global: usize, cuts: &CutList, page_index: usize) -> FocusTarget {
    let local_offset = global
        .saturating_sub(cuts.page_start(page_index))
        .min(cuts.page_len(page_index));
    FocusTarget {
        side: Side::of_page(page_index),
        local_offset,
    }
}
