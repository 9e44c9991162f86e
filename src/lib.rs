//! String, date and number theory utilities.
//!
//! The typed functions live in [`core::strings`], [`core::dates`] and
//! [`core::math`] and are re-exported here. [`Operation`] invokes them with
//! loosely typed JSON arguments, and [`BatchEngine`] runs TOML batch files.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::batch_config::BatchConfig;
pub use core::batch::BatchEngine;
pub use core::dates::{add_days, days_between, format_date, is_weekend, parse_date};
pub use core::dispatch::{Operation, OperationGroup};
pub use core::math::{factorial, fibonacci, gcd, is_prime};
pub use core::strings::{capitalize, count, reverse, truncate};
pub use utils::error::{ErrorCategory, Result, UtilError};
