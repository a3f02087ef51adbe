//! Property data, rent comparables and portfolio loading

mod data;
pub mod loader;

pub use data::{average_comp_rent, select_rent, PropertyFacts, RentComp, RentSource, SavedProperty};
pub use loader::{load_default_portfolio, load_portfolio, load_portfolio_from_reader};
