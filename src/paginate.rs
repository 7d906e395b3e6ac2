use core::ops::Range;

use crate::error::MeasureError;
use crate::measure::MeasurementOracle;
use crate::text::CharIndex;
use crate::viewport::ViewportGeometry;

/// First probe length, in characters, when no previous page length is known.
const INITIAL_PROBE_CHARS: usize = 64;

/// Ordered page boundaries over a buffer.
///
/// `cuts[i]` is the exclusive end offset of page `i`, so page `i` covers
/// `cuts[i - 1]..cuts[i]` (page 0 starts at 0). The list is never empty,
/// strictly increasing after the first entry, and its last entry equals the
/// buffer length. An empty buffer is represented by `[0]`: a single, empty
/// first page.
///
/// Pages past the content (the blank pages of a spread beyond the text) are
/// answered as empty ranges anchored at the buffer end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CutList {
    cuts: Vec<usize>,
}

impl Default for CutList {
    fn default() -> Self {
        Self { cuts: vec![0] }
    }
}

impl CutList {
    /// Validate raw offsets.
    ///
    /// Returns `None` unless `offsets` is non-empty and strictly increasing.
    /// A lone `0` is accepted for the empty buffer.
    pub fn from_offsets(offsets: Vec<usize>) -> Option<Self> {
        if offsets.is_empty() {
            return None;
        }
        if offsets.windows(2).any(|pair| pair[0] >= pair[1]) {
            return None;
        }
        if offsets.len() > 1 && offsets[0] == 0 {
            return None;
        }
        Some(Self { cuts: offsets })
    }

    /// Number of pages holding content (at least one).
    pub fn page_count(&self) -> usize {
        self.cuts.len()
    }

    /// Buffer length the list partitions.
    pub fn total_len(&self) -> usize {
        self.cuts.last().copied().unwrap_or(0)
    }

    /// Raw offsets.
    pub fn as_slice(&self) -> &[usize] {
        &self.cuts
    }

    pub fn page_start(&self, page_index: usize) -> usize {
        match page_index {
            0 => 0,
            _ => self
                .cuts
                .get(page_index - 1)
                .copied()
                .unwrap_or_else(|| self.total_len()),
        }
    }

    pub fn page_end(&self, page_index: usize) -> usize {
        self.cuts
            .get(page_index)
            .copied()
            .unwrap_or_else(|| self.total_len())
    }

    /// Character range of `page_index`.
    pub fn page_range(&self, page_index: usize) -> Range<usize> {
        self.page_start(page_index)..self.page_end(page_index)
    }

    pub fn page_len(&self, page_index: usize) -> usize {
        self.page_end(page_index) - self.page_start(page_index)
    }

    /// Page containing `offset`.
    ///
    /// An offset sitting exactly on a boundary belongs to the page it ends.
    /// Offsets past the buffer resolve to the last page.
    pub fn page_of(&self, offset: usize) -> usize {
        self.cuts
            .partition_point(|&cut| cut < offset)
            .min(self.cuts.len() - 1)
    }

    /// Like [`page_of`](Self::page_of), but an offset on a boundary belongs to
    /// the page it starts, when that page exists.
    pub fn page_starting_at_or_containing(&self, offset: usize) -> usize {
        self.cuts
            .partition_point(|&cut| cut <= offset)
            .min(self.cuts.len() - 1)
    }

    /// Page ranges in order.
    pub fn iter_pages(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.cuts.len()).map(move |idx| self.page_range(idx))
    }

    /// Adapt the list to a buffer of `len` characters without measuring.
    ///
    /// Earlier boundaries are kept; the last page absorbs growth and
    /// boundaries past `len` are dropped.
    pub fn reconcile(&mut self, len: usize) {
        self.cuts.pop();
        self.cuts.retain(|&cut| cut < len);
        self.cuts.push(len);
    }
}

/// Result of one pagination pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// Computed page boundaries.
    pub cuts: CutList,
    /// Oracle queries issued.
    pub oracle_calls: usize,
    /// Pages that were forced to a single character because nothing fit.
    pub degenerate_pages: Vec<usize>,
}

/// Splits a buffer into page-sized slices using a measurement oracle.
///
/// Every pass recomputes from offset 0; nothing is patched incrementally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaginationEngine {
    viewport: ViewportGeometry,
}

impl PaginationEngine {
    pub fn new(viewport: ViewportGeometry) -> Self {
        Self { viewport }
    }

    pub fn viewport(&self) -> &ViewportGeometry {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: ViewportGeometry) {
        self.viewport = viewport;
    }

    /// Compute page boundaries for `text`.
    ///
    /// Each page takes the longest prefix of the remaining text the oracle
    /// accepts. The search gallops (doubling from the previous page's
    /// length) and then bisects, so each page costs O(log N) oracle calls on
    /// slices close to a page in size. A page that cannot hold even one
    /// character is forced to one character so the pass always terminates.
    pub fn compute_cuts<O>(&self, text: &str, oracle: &O) -> Result<Pagination, MeasureError>
    where
        O: MeasurementOracle + ?Sized,
    {
        let index = CharIndex::new(text);
        let total = index.char_len();
        let first_viewport = self.viewport.for_page(0);
        let rest_viewport = self.viewport.for_page(1);

        let mut cuts = Vec::with_capacity(8);
        let mut degenerate_pages = Vec::new();
        let mut oracle_calls = 0usize;
        let mut start = 0usize;
        let mut probe = INITIAL_PROBE_CHARS;

        loop {
            let page_index = cuts.len();
            let viewport = if page_index == 0 {
                &first_viewport
            } else {
                &rest_viewport
            };
            let mut end = fill_page(&index, start, probe, viewport, oracle, &mut oracle_calls)?;
            if end == start && start < total {
                end = start + 1;
                degenerate_pages.push(page_index);
                log::debug!(
                    "pagination: nothing fits page {} at offset {}, forcing one character",
                    page_index,
                    start
                );
            }
            log::trace!("pagination: page {} = {}..{}", page_index, start, end);
            cuts.push(end);
            if end >= total {
                break;
            }
            probe = end - start;
            start = end;
        }

        log::debug!(
            "pagination: {} chars -> {} pages ({} oracle calls)",
            total,
            cuts.len(),
            oracle_calls
        );
        Ok(Pagination {
            cuts: CutList { cuts },
            oracle_calls,
            degenerate_pages,
        })
    }
}

/// Compute page boundaries for `text` in `viewport`.
pub fn compute_cuts<O>(
    text: &str,
    viewport: &ViewportGeometry,
    oracle: &O,
) -> Result<CutList, MeasureError>
where
    O: MeasurementOracle + ?Sized,
{
    PaginationEngine::new(viewport.clone())
        .compute_cuts(text, oracle)
        .map(|pagination| pagination.cuts)
}

/// Largest `end` in `start..=len` whose slice fits. The empty slice is
/// assumed to fit.
fn fill_page<O>(
    index: &CharIndex<'_>,
    start: usize,
    probe: usize,
    viewport: &ViewportGeometry,
    oracle: &O,
    calls: &mut usize,
) -> Result<usize, MeasureError>
where
    O: MeasurementOracle + ?Sized,
{
    let total = index.char_len();
    if start >= total {
        return Ok(total);
    }
    let mut fits = |end: usize| {
        *calls += 1;
        oracle.fits(index.slice(start..end), viewport)
    };

    // Gallop: `lo` always fits, the first failing probe bounds the search.
    let mut lo = start;
    let mut step = probe.max(1);
    let mut hi = loop {
        let candidate = start.saturating_add(step).min(total);
        if !fits(candidate)? {
            break candidate - 1;
        }
        lo = candidate;
        if candidate == total {
            return Ok(total);
        }
        step = step.saturating_mul(2);
    };

    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if fits(mid)? {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(lo)
}
