pub mod filter;
pub mod paginate;
pub mod sort;

pub use filter::{active_filter_count, filter_tokens};
pub use paginate::Paginator;
pub use sort::sort_tokens;

use crate::model::{FilterState, SortOption, Token};

/// Full processing pass: predicate filter, then ordering. Pagination is
/// applied by the caller against the processed list.
pub fn process_tokens(tokens: &[Token], filters: &FilterState, sort: SortOption) -> Vec<Token> {
    sort_tokens(filter_tokens(tokens, filters), sort)
}
