//! 排班表的型定义
//!
//! - CellValue: 从表格读出的单元格值
//! - RosterRow: 表格中的一行（日期・白班・夜班）
//! - RenderJob: 可以出图的一行（两个姓名都抽取成功）

use crate::date::date_stamp;
use chrono::NaiveDate;
use std::fmt;

/// 单元格值
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// 日期格式的单元格（保留Excel序号）
    DateTime(f64),
    /// `#N/A` 等错误值
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, "<空>"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(n) => write!(f, "日期({n})"),
            CellValue::Error(e) => write!(f, "{e}"),
        }
    }
}

/// 排班表的一行（无表头，A列=日期序号，B列=白班，C列=夜班）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterRow {
    /// 表格中的行号（从1开始）
    pub row: usize,
    pub date: CellValue,
    pub day_shift: CellValue,
    pub night_shift: CellValue,
}

/// 白班・夜班的姓名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftNames {
    pub day_shift: String,
    pub night_shift: String,
}

/// 出图任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub row: usize,
    pub date: NaiveDate,
    pub day_shift: String,
    pub night_shift: String,
}

impl RenderJob {
    /// 输出文件名（不含扩展名）
    pub fn file_stem(&self) -> String {
        date_stamp(self.date)
    }
}
