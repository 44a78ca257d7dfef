//! Leveled key/value logger.
//!
//! Records are built with chained calls and written as one JSON object per
//! line by a terminal call:
//!
//! ```
//! use cgiroute_rs::{Level, Logger};
//!
//! let mut logger = Logger::new(Level::Info, Vec::new());
//! logger.level(Level::Warn).key("db").msg("slow query").val("ms", 1200).log().unwrap();
//! ```

mod error;
mod level;
mod structured;

// Re-export public items
pub use error::Error;
pub use level::Level;
pub use structured::Logger;
