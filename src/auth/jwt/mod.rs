//! JWT token operations

mod handler;
pub mod types;

pub use types::{Claims, Clock, JwtHandler, SystemClock};
