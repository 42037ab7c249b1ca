//! LoyaltyPlus: seed catalogs for a loyalty program and the pure derivations
//! (filters, sorts, totals, tier progress) a dashboard draws from them.

pub mod actions;
pub mod catalog;
pub mod dashboard;
pub mod display;
pub mod errors;
pub mod state;
pub mod views;

pub use actions::{Acknowledgement, ActionOutcome, Rejection};
pub use catalog::{Catalog, CatalogSource, JsonFileSource, SeedCatalog};
pub use dashboard::{Dashboard, DashboardConfig, Tab, ViewState};
pub use errors::{CatalogError, ConfigError, SelectorError};
