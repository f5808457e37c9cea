use std::cmp::Ordering;

use crate::model::{SortOption, Token};

/// Stable sort under the given option. Absent values order last regardless
/// of direction, so a descending price sort still pushes unpriced tokens to
/// the bottom rather than the top.
pub fn sort_tokens(mut tokens: Vec<Token>, option: SortOption) -> Vec<Token> {
    tokens.sort_by(comparator(option));
    tokens
}

fn comparator(option: SortOption) -> impl Fn(&Token, &Token) -> Ordering {
    move |a, b| match option {
        SortOption::PriceAsc => cmp_option_f64(a.price_usd, b.price_usd, Direction::Asc),
        SortOption::PriceDesc => cmp_option_f64(a.price_usd, b.price_usd, Direction::Desc),
        SortOption::MarketCapAsc => {
            cmp_option_f64(a.market_cap_usd, b.market_cap_usd, Direction::Asc)
        }
        SortOption::MarketCapDesc => {
            cmp_option_f64(a.market_cap_usd, b.market_cap_usd, Direction::Desc)
        }
        SortOption::SymbolAsc => cmp_symbol(a, b, Direction::Asc),
        SortOption::SymbolDesc => cmp_symbol(a, b, Direction::Desc),
        SortOption::VolumeDesc => cmp_option_f64(a.volume_h24(), b.volume_h24(), Direction::Desc),
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Asc,
    Desc,
}

fn cmp_option_f64(a: Option<f64>, b: Option<f64>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        }
        // Absent last, independent of direction.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive symbol comparison; empty symbol counts as absent.
fn cmp_symbol(a: &Token, b: &Token, direction: Direction) -> Ordering {
    match (a.sortable_symbol(), b.sortable_symbol()) {
        (Some(a), Some(b)) => {
            let ord = a.to_lowercase().cmp(&b.to_lowercase());
            match direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
