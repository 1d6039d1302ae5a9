//! 排班表处理
//!
//! 读取排班表（Excel），把每天的白班・夜班姓名填进图像模板，按日期导出图片。
//!
//! ```text
//! sheet::read_roster ──▶ plan_jobs ──▶ render::render_jobs ──▶ Editor (bridge进程)
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod render;
pub mod sheet;

pub use shift_roster_common as common;
