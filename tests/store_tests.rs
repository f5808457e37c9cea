use token_screener::error::AppError;
use token_screener::model::{FilterState, SortOption};
use token_screener::store::{
    KeyValueStore, PreferenceStore, SqliteStore, FILTER_STATE_KEY, SORT_OPTION_KEY,
};

fn prefs() -> PreferenceStore<SqliteStore> {
    PreferenceStore::new(SqliteStore::open_in_memory().expect("in-memory sqlite"))
}

/// Store stub whose writes and deletes always fail, for the error-policy
/// paths.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Err(AppError::Unknown("disk unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::Unknown("disk unavailable".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), AppError> {
        Err(AppError::Unknown("disk unavailable".to_string()))
    }
}

#[test]
/// Verifies the documented defaults with no prior save: filters
/// {false,false,false,0.01} and market_cap_desc sort.
fn load_without_prior_save_returns_defaults() {
    let prefs = prefs();
    let filters = prefs.load_filters();
    assert!(!filters.is_new);
    assert!(!filters.is_pro);
    assert!(!filters.price_above_threshold);
    assert!((filters.price_threshold - 0.01).abs() < f64::EPSILON);
    assert_eq!(prefs.load_sort(), SortOption::MarketCapDesc);
}

#[test]
/// Verifies the filter round-trip: load after save returns the saved state.
fn filters_round_trip() {
    let prefs = prefs();
    let saved = FilterState {
        is_new: true,
        is_pro: false,
        price_above_threshold: true,
        price_threshold: 0.25,
    };
    prefs.save_filters(&saved);
    assert_eq!(prefs.load_filters(), saved);
}

#[test]
/// Verifies the sort round-trip and that reset removes the stored key.
fn sort_round_trip_and_reset() {
    let prefs = prefs();
    prefs.save_sort(SortOption::VolumeDesc);
    assert_eq!(prefs.load_sort(), SortOption::VolumeDesc);

    prefs.reset_sort().expect("reset must succeed");
    assert_eq!(prefs.load_sort(), SortOption::MarketCapDesc);
}

#[test]
/// Verifies clear_filters removes the stored state so the next load falls
/// back to defaults.
fn clear_filters_restores_defaults() {
    let prefs = prefs();
    prefs.save_filters(&FilterState {
        is_pro: true,
        ..FilterState::default()
    });
    prefs.clear_filters().expect("clear must succeed");
    assert_eq!(prefs.load_filters(), FilterState::default());
}

#[test]
/// Verifies malformed persisted JSON is absorbed: load warns and returns
/// defaults instead of erroring outward.
fn malformed_filter_json_degrades_to_defaults() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set(FILTER_STATE_KEY, "{not json").unwrap();
    let prefs = PreferenceStore::new(store);
    assert_eq!(prefs.load_filters(), FilterState::default());
}

#[test]
/// Verifies partial persisted shapes merge over defaults field by field.
fn partial_filter_json_merges_over_defaults() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .set(FILTER_STATE_KEY, r#"{"is_new": true, "price_threshold": 0.5}"#)
        .unwrap();
    let prefs = PreferenceStore::new(store);
    let filters = prefs.load_filters();
    assert!(filters.is_new);
    assert!(!filters.is_pro);
    assert!(!filters.price_above_threshold);
    assert!((filters.price_threshold - 0.5).abs() < f64::EPSILON);
}

#[test]
/// Verifies a persisted sort value outside the known enumeration is treated
/// as corrupt: discarded, default restored.
fn unknown_persisted_sort_is_discarded() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set(SORT_OPTION_KEY, "liquidity_desc").unwrap();
    let prefs = PreferenceStore::new(store);
    assert_eq!(prefs.load_sort(), SortOption::MarketCapDesc);
}

#[test]
/// Verifies the error policy split: loads and saves absorb storage
/// failures, while clear/reset surface them to the caller.
fn broken_store_absorbs_rw_but_surfaces_clear() {
    let prefs = PreferenceStore::new(BrokenStore);

    // Load failures degrade to defaults, save failures are swallowed.
    assert_eq!(prefs.load_filters(), FilterState::default());
    assert_eq!(prefs.load_sort(), SortOption::MarketCapDesc);
    prefs.save_filters(&FilterState::default());
    prefs.save_sort(SortOption::PriceAsc);

    // The user asked for a reset; failure must be visible.
    assert!(prefs.clear_filters().is_err());
    assert!(prefs.reset_sort().is_err());
}

#[test]
/// Verifies the raw key-value layer round-trips and overwrites in place.
fn sqlite_store_upserts() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "v1").unwrap();
    assert_eq!(store.get("k").unwrap(), Some("v1".to_string()));
    store.set("k", "v2").unwrap();
    assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}
