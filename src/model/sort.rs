use std::fmt;
use std::str::FromStr;

/// Closed set of orderings the list supports. The wire/persisted form is the
/// snake_case name; anything else read back from storage is treated as
/// corrupt and replaced with the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    PriceAsc,
    PriceDesc,
    MarketCapAsc,
    #[default]
    MarketCapDesc,
    SymbolAsc,
    SymbolDesc,
    VolumeDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 7] = [
        SortOption::MarketCapDesc,
        SortOption::MarketCapAsc,
        SortOption::PriceDesc,
        SortOption::PriceAsc,
        SortOption::VolumeDesc,
        SortOption::SymbolAsc,
        SortOption::SymbolDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::MarketCapAsc => "market_cap_asc",
            SortOption::MarketCapDesc => "market_cap_desc",
            SortOption::SymbolAsc => "symbol_asc",
            SortOption::SymbolDesc => "symbol_desc",
            SortOption::VolumeDesc => "volume_desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::MarketCapDesc => "Market Cap (High to Low)",
            SortOption::MarketCapAsc => "Market Cap (Low to High)",
            SortOption::PriceDesc => "Price (High to Low)",
            SortOption::PriceAsc => "Price (Low to High)",
            SortOption::VolumeDesc => "Volume (24h)",
            SortOption::SymbolAsc => "Symbol (A-Z)",
            SortOption::SymbolDesc => "Symbol (Z-A)",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price_asc" => Ok(SortOption::PriceAsc),
            "price_desc" => Ok(SortOption::PriceDesc),
            "market_cap_asc" => Ok(SortOption::MarketCapAsc),
            "market_cap_desc" => Ok(SortOption::MarketCapDesc),
            "symbol_asc" => Ok(SortOption::SymbolAsc),
            "symbol_desc" => Ok(SortOption::SymbolDesc),
            "volume_desc" => Ok(SortOption::VolumeDesc),
            _ => Err(()),
        }
    }
}
