//! Database models, derived results, and view state.

pub mod daily_metric;
pub mod pagination;
pub mod post;
pub mod schema;
pub mod summary;
pub mod time_range;
pub mod view_state;
