//! The search-filter core: state model, experience presets, and the URL
//! query-string contract of the results page. Everything in here is pure
//! and synchronous; the HTTP layer calls in at the edges.

pub mod config;
pub mod decode;
pub mod encode;
pub mod labels;
pub mod state;

pub use decode::from_query;
pub use encode::to_query_string;
pub use state::{resolve, FilterOverrides, FilterState};
