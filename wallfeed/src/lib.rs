pub mod api;
pub mod cancel;
pub mod error;
pub mod models;
pub mod render;
pub mod resolver;

pub use error::{FeedError, Result};
pub use resolver::{HydratedFeed, Resolver, RunStats};
