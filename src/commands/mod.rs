//! CLI command implementations.

pub mod new_listings;
pub mod product;
pub mod search;

pub use new_listings::NewListingsCommand;
pub use product::ProductCommand;
pub use search::SearchCommand;
