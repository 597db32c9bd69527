pub mod context;
pub mod services;
pub mod time;
pub mod utils;

pub use context::ProjectionContext;
pub use time::{Clock, FixedClock, SystemClock};
