//! Cross-page "select N rows".
//!
//! The first N records counted from the start of the current page are
//! selected. When the current page holds fewer than N, later pages are
//! fetched one after another, never in parallel, until enough records have
//! been gathered or the source runs out.

use crate::api::models::Artwork;
use crate::core::page_loader::PageState;
use crate::core::selection::{Selection, parse_count};
use crate::core::source::PageSource;
use crate::error::FetchError;

/// What a parsed count asks for, given the page in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionPlan {
    /// The current page already holds enough records.
    Immediate(Selection),
    /// Later pages must be fetched.
    FetchForward(ForwardFetch),
}

/// Starting point of the forward-fetch loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardFetch {
    pub seed: Vec<Artwork>,
    pub remaining: usize,
    pub next_page: usize,
    pub total_records: u64,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccumulationOutcome {
    /// All requested records were gathered.
    Complete,
    /// The source ran out first (empty page or total reached).
    Exhausted,
    /// A fetch failed; the records gathered before it are kept.
    Aborted(FetchError),
}

/// Result of a forward fetch. Partial progress is always carried.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulation {
    pub records: Vec<Artwork>,
    pub pages_fetched: usize,
    pub outcome: AccumulationOutcome,
}

impl Accumulation {
    pub fn into_selection(self) -> Selection {
        Selection::from_records(self.records)
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.outcome, AccumulationOutcome::Aborted(_))
    }
}

/// Decide how `count` is satisfied from `page`
pub fn plan_selection(page: &PageState, count: usize, page_size: usize) -> SelectionPlan {
    if count <= page.len() {
        return SelectionPlan::Immediate(Selection::from_records(
            page.records.iter().take(count).cloned(),
        ));
    }

    SelectionPlan::FetchForward(ForwardFetch {
        seed: page.records.clone(),
        remaining: count - page.len(),
        next_page: page.page_index + 1,
        total_records: page.total_records,
        page_size,
    })
}

/// Run the forward-fetch loop.
///
/// Stops when nothing remains, when a fetched page is empty, when the next
/// page would start at or past `total_records`, or at the first error.
pub async fn fetch_forward(source: &dyn PageSource, plan: ForwardFetch) -> Accumulation {
    let ForwardFetch {
        seed: mut records,
        mut remaining,
        mut next_page,
        total_records,
        page_size,
    } = plan;
    let mut pages_fetched = 0;

    while remaining > 0 {
        let offset = (next_page as u64).saturating_mul(page_size as u64);
        if offset >= total_records {
            return Accumulation {
                records,
                pages_fetched,
                outcome: AccumulationOutcome::Exhausted,
            };
        }

        let page = match source.fetch_page(next_page, page_size).await {
            Ok(page) => page,
            Err(e) => {
                log::error!("Fetching error: {} ({})", e, e.endpoint());
                return Accumulation {
                    records,
                    pages_fetched,
                    outcome: AccumulationOutcome::Aborted(e),
                };
            }
        };
        pages_fetched += 1;

        if page.is_empty() {
            return Accumulation {
                records,
                pages_fetched,
                outcome: AccumulationOutcome::Exhausted,
            };
        }

        let take = remaining.min(page.len());
        records.extend(page.records.into_iter().take(take));
        remaining -= take;
        next_page += 1;

        log::debug!(
            "Accumulated {} records after page {} ({} remaining)",
            records.len(),
            next_page - 1,
            remaining
        );
    }

    Accumulation {
        records,
        pages_fetched,
        outcome: AccumulationOutcome::Complete,
    }
}

/// Outcome of a "select N" request made against a loaded page.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectCountResult {
    /// Input was not a positive integer; nothing changes.
    Invalid,
    /// Served from the current page.
    Immediate(Selection),
    /// Served by fetching forward.
    Fetched(Accumulation),
}

impl SelectCountResult {
    /// The picker closes on every completion except invalid input and an
    /// aborted forward fetch
    pub fn closes_picker(&self) -> bool {
        match self {
            SelectCountResult::Invalid => false,
            SelectCountResult::Immediate(_) => true,
            SelectCountResult::Fetched(accumulation) => !accumulation.is_aborted(),
        }
    }
}

/// One-shot selection against a page already in memory.
pub struct SelectionAccumulator<'a> {
    source: &'a dyn PageSource,
    page_size: usize,
}

impl<'a> SelectionAccumulator<'a> {
    pub fn new(source: &'a dyn PageSource, page_size: usize) -> Self {
        Self { source, page_size }
    }

    pub async fn select_count(&self, page: &PageState, input: &str) -> SelectCountResult {
        let Some(count) = parse_count(input) else {
            log::debug!("Ignoring selection count input {:?}", input);
            return SelectCountResult::Invalid;
        };

        match plan_selection(page, count, self.page_size) {
            SelectionPlan::Immediate(selection) => SelectCountResult::Immediate(selection),
            SelectionPlan::FetchForward(plan) => {
                SelectCountResult::Fetched(fetch_forward(self.source, plan).await)
            }
        }
    }
}
