//! 错误类型定义

use thiserror::Error;

/// 共通错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("第{row}行{column}列不是文本单元格: {found}")]
    NonTextCell {
        row: usize,
        column: &'static str,
        found: String,
    },

    #[error("第{row}行的日期序号无法解析: {value}")]
    InvalidDateSerial { row: usize, value: String },

    #[error("日期序号超出范围: {0}")]
    DateOutOfRange(i64),
}

/// Result类型别名
pub type Result<T> = std::result::Result<T, Error>;
