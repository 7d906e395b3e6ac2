use serde::{Deserialize, Serialize};

/// How a caret sitting exactly on a page boundary is placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvancePolicy {
    /// A boundary caret stays at the end of the page it closes; the spread
    /// only advances once the caret is past the right page.
    #[default]
    OnOverflow,
    /// A boundary caret moves to the start of the following page when that
    /// page exists, so typing that spills off a right page flips the spread
    /// right away. Meant for layouts whose first page is a cover or index.
    RightFirst,
}

/// Outcome of a navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpreadTransition {
    Stayed,
    Advanced { from: usize, to: usize },
    Retreated { from: usize, to: usize },
}

impl SpreadTransition {
    fn between(from: usize, to: usize) -> Self {
        match to.cmp(&from) {
            core::cmp::Ordering::Equal => Self::Stayed,
            core::cmp::Ordering::Greater => Self::Advanced { from, to },
            core::cmp::Ordering::Less => Self::Retreated { from, to },
        }
    }

    pub fn changed(self) -> bool {
        !matches!(self, Self::Stayed)
    }
}

/// Left page index of the spread showing `page_index`.
pub fn spread_start_for(page_index: usize) -> usize {
    page_index & !1
}

/// Tracks the visible two-page spread.
///
/// `spread_start` is always even: page `spread_start` is on the left and
/// `spread_start + 1` on the right. Navigation forward is unbounded; blank
/// spreads past the content are valid and fill as text is typed into them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpreadNavigator {
    spread_start: usize,
    policy: AdvancePolicy,
}

impl SpreadNavigator {
    pub fn new(policy: AdvancePolicy) -> Self {
        Self {
            spread_start: 0,
            policy,
        }
    }

    pub fn spread_start(&self) -> usize {
        self.spread_start
    }

    pub fn left_page(&self) -> usize {
        self.spread_start
    }

    pub fn right_page(&self) -> usize {
        self.spread_start + 1
    }

    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: AdvancePolicy) {
        self.policy = policy;
    }

    pub fn contains_page(&self, page_index: usize) -> bool {
        spread_start_for(page_index) == self.spread_start
    }

    pub fn can_prev(&self) -> bool {
        self.spread_start > 0
    }

    /// Show the next spread.
    pub fn next(&mut self) -> SpreadTransition {
        self.jump(self.spread_start.saturating_add(2))
    }

    /// Show the previous spread; stays put on the first one.
    pub fn prev(&mut self) -> SpreadTransition {
        self.jump(self.spread_start.saturating_sub(2))
    }

    /// Show the spread containing `page_index` (odd indices round down).
    pub fn show_page(&mut self, page_index: usize) -> SpreadTransition {
        self.jump(spread_start_for(page_index))
    }

    /// Step forward until `target_page` is on screen.
    ///
    /// A large paste can push the caret several spreads ahead, hence the
    /// loop.
    pub fn auto_advance(&mut self, target_page: usize) -> SpreadTransition {
        let from = self.spread_start;
        while target_page > self.right_page() {
            self.next();
        }
        let transition = SpreadTransition::between(from, self.spread_start);
        if transition.changed() {
            log::debug!(
                "spread: auto-advance {} -> {} for page {}",
                from,
                self.spread_start,
                target_page
            );
        }
        transition
    }

    /// Step back to bring `target_page` on screen.
    ///
    /// Editing from the start of a page only ever crosses into the previous
    /// spread, which is a single `prev()`. A target further back (after an
    /// external buffer replacement) jumps straight to its spread.
    pub fn auto_retreat(&mut self, target_page: usize) -> SpreadTransition {
        let from = self.spread_start;
        if target_page >= self.spread_start {
            return SpreadTransition::Stayed;
        }
        if spread_start_for(target_page) + 2 == self.spread_start {
            self.prev();
        } else {
            self.show_page(target_page);
        }
        log::debug!(
            "spread: auto-retreat {} -> {} for page {}",
            from,
            self.spread_start,
            target_page
        );
        SpreadTransition::between(from, self.spread_start)
    }

    fn jump(&mut self, spread_start: usize) -> SpreadTransition {
        let from = self.spread_start;
        self.spread_start = spread_start_for(spread_start);
        SpreadTransition::between(from, self.spread_start)
    }
}
