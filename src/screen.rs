use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::config::Config;
use crate::event::{AppEvent, ListSnapshot, UiCommand};
use crate::model::{BooleanFilter, FilterState, SortOption, Token};
use crate::pipeline::{active_filter_count, process_tokens, Paginator};
use crate::simulator::PriceSimulator;
use crate::source::{FetchState, FetchStatus, TokenSource};
use crate::store::{KeyValueStore, PreferenceStore};

/// Single logical owner of all screen state.
///
/// Every mutation goes through one of the entry points below, and the run
/// loop serializes them, so there is no shared-state locking anywhere in the
/// pipeline. The processed (filtered, sorted, paginated) list is a derived
/// view recomputed on demand.
pub struct TokenListScreen<S: KeyValueStore> {
    tokens: Vec<Token>,
    filters: FilterState,
    sort: SortOption,
    paginator: Paginator,
    simulator: PriceSimulator,
    prefs: PreferenceStore<S>,
    fetch_status: FetchStatus,
    seen_generation: u64,
}

impl<S: KeyValueStore> TokenListScreen<S> {
    pub fn new(config: &Config, prefs: PreferenceStore<S>) -> Self {
        let filters = prefs.load_filters();
        let sort = prefs.load_sort();
        Self {
            tokens: Vec::new(),
            filters,
            sort,
            paginator: Paginator::new(config.pagination.page_size),
            simulator: PriceSimulator::new(config.simulation.clone()),
            prefs,
            fetch_status: FetchStatus::Loading,
            seen_generation: 0,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    /// Absorb the latest source snapshot. Returns true when it carried a
    /// fresh full list, which is the signal to restart the simulation timer
    /// so the walk never compounds on top of a stale token set.
    pub fn on_fetch_state(&mut self, state: &FetchState) -> bool {
        self.fetch_status = state.status.clone();
        if state.generation != self.seen_generation {
            self.seen_generation = state.generation;
            self.tokens = state.tokens.clone();
            true
        } else {
            false
        }
    }

    /// Apply one simulation tick to the working copy.
    pub fn on_sim_tick(&mut self) {
        if let Some(updated) = self.simulator.tick(&self.tokens) {
            self.tokens = updated;
        }
    }

    pub fn toggle_filter(&mut self, filter: BooleanFilter) {
        self.filters.toggle(filter);
        self.prefs.save_filters(&self.filters);
    }

    pub fn set_price_threshold(&mut self, threshold: f64) {
        self.filters.set_price_threshold(threshold);
        self.prefs.save_filters(&self.filters);
    }

    /// Reset filters to defaults and clear the persisted copy. The clear
    /// failure propagates: a reset the user asked for must be confirmable.
    pub fn reset_filters(&mut self) -> anyhow::Result<()> {
        self.filters = self.prefs.default_filters();
        self.prefs.clear_filters()
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        self.prefs.save_sort(sort);
    }

    pub fn reset_sort(&mut self) -> anyhow::Result<()> {
        self.sort = SortOption::default();
        self.prefs.reset_sort()
    }

    /// Returns true when a load-more actually started.
    pub fn begin_load_more(&mut self) -> bool {
        let total = self.processed().len();
        self.paginator.begin_load_more(total)
    }

    pub fn finish_load_more(&mut self) {
        let total = self.processed().len();
        self.paginator.finish_load_more(total);
    }

    /// Filtered and sorted view of the working copy.
    pub fn processed(&self) -> Vec<Token> {
        process_tokens(&self.tokens, &self.filters, self.sort)
    }

    /// Current render snapshot. Recomputes the pipeline and lets the
    /// paginator observe the processed identity (a filter or sort change
    /// snaps the window back to the first page).
    pub fn snapshot(&mut self) -> ListSnapshot {
        let processed = self.processed();
        self.paginator.observe(&processed);
        let total = processed.len();
        ListSnapshot {
            visible: self.paginator.visible(&processed).to_vec(),
            total_processed: total,
            displayed_count: self.paginator.displayed_count(total),
            has_more: self.paginator.has_more(total),
            is_loading_more: self.paginator.is_loading_more(),
            filters: self.filters,
            active_filter_count: active_filter_count(&self.filters),
            sort: self.sort,
            fetch_status: self.fetch_status.clone(),
        }
    }
}

/// Drive a screen until shutdown: interleaves source snapshots, the
/// simulation interval (recreated whenever a fresh list arrives), user
/// commands, and the deferred load-more completion. Emits an updated
/// `ListSnapshot` after every state change.
pub async fn run_screen<S: KeyValueStore>(
    mut screen: TokenListScreen<S>,
    source: TokenSource,
    config: Config,
    mut commands: mpsc::Receiver<UiCommand>,
    events: mpsc::Sender<AppEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut source_state = source.state();
    let sim_period = config.simulation.interval();
    let mut sim_interval = tokio::time::interval_at(Instant::now() + sim_period, sim_period);
    let load_more_delay = std::time::Duration::from_millis(config.pagination.load_more_delay_ms);
    let mut load_more_at: Option<Instant> = None;

    // Initial (loading) snapshot so the shell can render immediately.
    emit(&events, &mut screen).await;

    loop {
        let load_more_deadline = load_more_at;
        tokio::select! {
            changed = source_state.changed() => {
                if changed.is_err() {
                    tracing::debug!("token source dropped, stopping screen loop");
                    return;
                }
                let state = source_state.borrow_and_update().clone();
                if screen.on_fetch_state(&state) {
                    // Fresh list: restart the walk from real data.
                    sim_interval = tokio::time::interval_at(
                        Instant::now() + sim_period,
                        sim_period,
                    );
                }
                emit(&events, &mut screen).await;
            }
            _ = sim_interval.tick() => {
                screen.on_sim_tick();
                emit(&events, &mut screen).await;
            }
            _ = tokio::time::sleep_until(load_more_deadline.unwrap_or_else(Instant::now)),
                if load_more_deadline.is_some() =>
            {
                load_more_at = None;
                screen.finish_load_more();
                emit(&events, &mut screen).await;
            }
            command = commands.recv() => {
                let Some(command) = command else {
                    tracing::debug!("command channel closed, stopping screen loop");
                    return;
                };
                handle_command(
                    command,
                    &mut screen,
                    &source,
                    &events,
                    load_more_delay,
                    &mut load_more_at,
                ).await;
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    tracing::debug!("screen loop shutting down");
                    return;
                }
            }
        }
    }
}

async fn handle_command<S: KeyValueStore>(
    command: UiCommand,
    screen: &mut TokenListScreen<S>,
    source: &TokenSource,
    events: &mpsc::Sender<AppEvent>,
    load_more_delay: std::time::Duration,
    load_more_at: &mut Option<Instant>,
) {
    match command {
        UiCommand::ToggleFilter(filter) => screen.toggle_filter(filter),
        UiCommand::SetPriceThreshold(threshold) => screen.set_price_threshold(threshold),
        UiCommand::ResetFilters => {
            if let Err(e) = screen.reset_filters() {
                tracing::error!(error = %e, "filter reset failed");
                let _ = events.send(AppEvent::ResetFailed(e.to_string())).await;
            }
        }
        UiCommand::SetSort(sort) => screen.set_sort(sort),
        UiCommand::ResetSort => {
            if let Err(e) = screen.reset_sort() {
                tracing::error!(error = %e, "sort reset failed");
                let _ = events.send(AppEvent::ResetFailed(e.to_string())).await;
            }
        }
        UiCommand::LoadMore => {
            if screen.begin_load_more() {
                *load_more_at = Some(Instant::now() + load_more_delay);
            }
        }
        UiCommand::Refresh => source.refetch(),
    }
    emit(events, screen).await;
}

async fn emit<S: KeyValueStore>(events: &mpsc::Sender<AppEvent>, screen: &mut TokenListScreen<S>) {
    let _ = events.send(AppEvent::ListUpdated(screen.snapshot())).await;
}
