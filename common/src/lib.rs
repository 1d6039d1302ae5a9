//! Shift Roster Common Library
//!
//! 桌面端和驱动共用的纯逻辑（不做任何IO）

pub mod date;
pub mod error;
pub mod name;
pub mod progress;
pub mod roster;
pub mod types;

pub use date::{date_stamp, iso_date_serial, serial_to_date};
pub use error::{Error, Result};
pub use name::extract_name;
pub use progress::Progress;
pub use roster::{count_valid_rows, plan_jobs};
pub use types::{CellValue, RenderJob, RosterRow, ShiftNames};
