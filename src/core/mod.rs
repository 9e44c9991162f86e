pub mod batch;
pub mod dates;
pub mod dispatch;
pub mod math;
pub mod strings;

pub use crate::utils::error::Result;
