//! 班次单元格中的姓名抽取
//!
//! 单元格格式示例: `张 三（13800138000）`
//! - 姓名: 1〜9个汉字，最多三段，段间可有空格
//! - 紧跟全角括号包围的11位号码

use regex::Regex;

lazy_static::lazy_static! {
    static ref NAME_RE: Regex = Regex::new(
        r"\s*([\x{4e00}-\x{9fa5}]{1,3}\s*[\x{4e00}-\x{9fa5}]{0,3}\s*[\x{4e00}-\x{9fa5}]{0,3})（\d{11}）"
    ).unwrap();
}

/// 从单元格文本中抽取姓名
///
/// 只返回第一个匹配。去掉首尾空白和中间的空格。
/// 没有匹配时返回 `None`，不会报错。
///
/// # Examples
/// ```
/// use shift_roster_common::extract_name;
///
/// assert_eq!(extract_name("张 三（12345678901）").as_deref(), Some("张三"));
/// assert_eq!(extract_name("张三"), None);
/// ```
pub fn extract_name(cell: &str) -> Option<String> {
    let captures = NAME_RE.captures(cell)?;
    let name = captures.get(1)?.as_str().trim().replace(' ', "");
    Some(name)
}
