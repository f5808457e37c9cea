use token_screener::model::{FilterState, Token};
use token_screener::pipeline::{active_filter_count, filter_tokens};

fn token(address: &str, price: Option<f64>, is_new: bool, is_pro: bool) -> Token {
    Token {
        token_address: address.to_string(),
        token_symbol: address.to_uppercase(),
        price_usd: price,
        is_new,
        is_pro,
        ..Token::default()
    }
}

fn sample_tokens() -> Vec<Token> {
    vec![
        token("a", Some(0.005), false, false),
        token("b", Some(0.5), true, false),
        token("c", None, true, true),
        token("d", Some(2.0), false, true),
        token("e", Some(0.02), true, true),
    ]
}

#[test]
/// Verifies the unconditional invariant: tokens without a price never pass,
/// even with every toggle off.
fn priceless_tokens_always_excluded() {
    let filtered = filter_tokens(&sample_tokens(), &FilterState::default());
    assert_eq!(filtered.len(), 4);
    assert!(filtered.iter().all(|t| t.price_usd.is_some()));
    assert!(!filtered.iter().any(|t| t.token_address == "c"));
}

#[test]
/// Verifies the is_new predicate: when enabled, only new-flagged (and
/// priced) tokens survive.
fn is_new_toggle_keeps_only_new_tokens() {
    let filters = FilterState {
        is_new: true,
        ..FilterState::default()
    };
    let filtered = filter_tokens(&sample_tokens(), &filters);
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|t| t.is_new && t.price_usd.is_some()));
}

#[test]
/// Verifies the is_pro predicate in combination with is_new: predicates are
/// conjunctive.
fn toggles_combine_conjunctively() {
    let filters = FilterState {
        is_new: true,
        is_pro: true,
        ..FilterState::default()
    };
    let filtered = filter_tokens(&sample_tokens(), &filters);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].token_address, "e");
}

#[test]
/// Verifies the price threshold predicate: only consulted when enabled, and
/// inclusive of the boundary value.
fn threshold_applies_only_when_enabled() {
    let mut filters = FilterState::default();
    filters.price_threshold = 0.02;
    let filtered = filter_tokens(&sample_tokens(), &filters);
    assert_eq!(filtered.len(), 4, "disabled threshold must not filter");

    filters.price_above_threshold = true;
    let filtered = filter_tokens(&sample_tokens(), &filters);
    let addresses: Vec<&str> = filtered.iter().map(|t| t.token_address.as_str()).collect();
    assert_eq!(addresses, vec!["b", "d", "e"]);
}

#[test]
/// Verifies filter idempotence: applying the same filter twice equals
/// applying it once.
fn filtering_is_idempotent() {
    let filters = FilterState {
        is_pro: true,
        price_above_threshold: true,
        price_threshold: 0.01,
        ..FilterState::default()
    };
    let once = filter_tokens(&sample_tokens(), &filters);
    let twice = filter_tokens(&once, &filters);
    assert_eq!(once, twice);
}

#[test]
/// Verifies order preservation: the filter never reorders survivors.
fn filter_preserves_input_order() {
    let filtered = filter_tokens(&sample_tokens(), &FilterState::default());
    let addresses: Vec<&str> = filtered.iter().map(|t| t.token_address.as_str()).collect();
    assert_eq!(addresses, vec!["a", "b", "d", "e"]);
}

#[test]
/// Verifies the active-filter badge count: boolean toggles count, the
/// numeric threshold value does not.
fn active_filter_count_counts_toggles_only() {
    assert_eq!(active_filter_count(&FilterState::default()), 0);

    let filters = FilterState {
        is_new: true,
        price_above_threshold: true,
        price_threshold: 123.0,
        ..FilterState::default()
    };
    assert_eq!(active_filter_count(&filters), 2);

    let all = FilterState {
        is_new: true,
        is_pro: true,
        price_above_threshold: true,
        ..FilterState::default()
    };
    assert_eq!(active_filter_count(&all), 3);
}
