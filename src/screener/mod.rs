pub mod rest;

pub use rest::ScreenerRestClient;
