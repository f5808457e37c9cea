use crate::model::{BooleanFilter, FilterState, SortOption, Token};
use crate::source::FetchStatus;

/// User-initiated actions, serialized into the screen event loop.
#[derive(Debug, Clone)]
pub enum UiCommand {
    ToggleFilter(BooleanFilter),
    SetPriceThreshold(f64),
    ResetFilters,
    SetSort(SortOption),
    ResetSort,
    LoadMore,
    /// Pull-to-refresh or retry after a fetch failure.
    Refresh,
}

/// Snapshot of everything a list view needs to render one frame.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub visible: Vec<Token>,
    pub total_processed: usize,
    pub displayed_count: usize,
    pub has_more: bool,
    pub is_loading_more: bool,
    pub filters: FilterState,
    pub active_filter_count: usize,
    pub sort: SortOption,
    pub fetch_status: FetchStatus,
}

/// Events emitted by the screen loop for a UI shell to render.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ListUpdated(ListSnapshot),
    /// A user-requested preferences reset could not clear storage.
    ResetFailed(String),
}
