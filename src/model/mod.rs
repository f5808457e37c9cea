pub mod filter;
pub mod sort;
pub mod token;

pub use filter::{BooleanFilter, FilterState};
pub use sort::SortOption;
pub use token::{TimeSeriesData, Token, TokenList};
