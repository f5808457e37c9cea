use crate::model::{FilterState, Token};

/// Order-preserving predicate filter.
///
/// A token with no price is excluded unconditionally; the remaining
/// predicates apply only when their toggle is enabled.
pub fn filter_tokens(tokens: &[Token], filters: &FilterState) -> Vec<Token> {
    tokens
        .iter()
        .filter(|token| passes(token, filters))
        .cloned()
        .collect()
}

fn passes(token: &Token, filters: &FilterState) -> bool {
    let price = match token.price_usd {
        Some(p) => p,
        None => return false,
    };
    if filters.is_new && !token.is_new {
        return false;
    }
    if filters.is_pro && !token.is_pro {
        return false;
    }
    if filters.price_above_threshold && price < filters.price_threshold {
        return false;
    }
    true
}

/// How many of the three boolean toggles are on. The threshold value itself
/// does not count, only its enablement.
pub fn active_filter_count(filters: &FilterState) -> usize {
    [
        filters.is_new,
        filters.is_pro,
        filters.price_above_threshold,
    ]
    .into_iter()
    .filter(|enabled| *enabled)
    .count()
}
