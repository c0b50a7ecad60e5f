pub mod catalog;
pub mod client;
pub mod error;
pub mod normalize;
pub mod session;
pub mod types;

pub use catalog::fetch_snapshot;
pub use client::StorefrontClient;
pub use error::ScraperError;
pub use session::{negotiate, SessionContext, CATEGORY};
