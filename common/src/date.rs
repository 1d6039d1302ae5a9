//! Excel日期序号的换算
//!
//! 基准日为 1899-12-30（序号1 = 1899-12-31）。
//! 1900年闰年问题导致的两天偏移已经包含在基准日里。

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate, TimeDelta};

/// Excel日期序号的基准日
pub fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("1899-12-30 is a valid date")
}

/// 日期序号 → 日历日期
pub fn serial_to_date(serial: i64) -> Result<NaiveDate> {
    TimeDelta::try_days(serial)
        .and_then(|delta| excel_epoch().checked_add_signed(delta))
        .ok_or(Error::DateOutOfRange(serial))
}

/// ISO日期文字（`YYYY-MM-DD`，可带`T`之后的时间）→ 日期序号
///
/// ODS的日期单元格以这种形式保存。时间部分舍去。
pub fn iso_date_serial(text: &str) -> Option<i64> {
    let date_part = text.trim().split('T').next()?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    Some(date.signed_duration_since(excel_epoch()).num_days())
}

/// 输出文件名用的日期戳（YYYYMMDD）
pub fn date_stamp(date: NaiveDate) -> String {
    format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_serial_one_is_last_day_of_1899() {
        assert_eq!(serial_to_date(1).unwrap(), ymd(1899, 12, 31));
    }

    #[test]
    fn test_serial_zero_is_epoch() {
        assert_eq!(serial_to_date(0).unwrap(), ymd(1899, 12, 30));
    }

    #[test]
    fn test_serial_2023_new_year() {
        assert_eq!(serial_to_date(44927).unwrap(), ymd(2023, 1, 1));
    }

    #[test]
    fn test_serial_after_fake_leap_day() {
        // 1900-03-01 在Excel中是61
        assert_eq!(serial_to_date(61).unwrap(), ymd(1900, 3, 1));
    }

    #[test]
    fn test_negative_serial() {
        assert_eq!(serial_to_date(-1).unwrap(), ymd(1899, 12, 29));
    }

    #[test]
    fn test_serial_out_of_range() {
        assert_eq!(
            serial_to_date(i64::MAX),
            Err(Error::DateOutOfRange(i64::MAX))
        );
    }

    #[test]
    fn test_iso_date_serial() {
        assert_eq!(iso_date_serial("2023-01-01"), Some(44927));
        assert_eq!(iso_date_serial("2023-01-02T08:30:00"), Some(44928));
        assert_eq!(iso_date_serial("1899-12-31"), Some(1));
    }

    #[test]
    fn test_iso_date_serial_rejects_other_text() {
        assert_eq!(iso_date_serial("明天"), None);
        assert_eq!(iso_date_serial("2023/01/01"), None);
        assert_eq!(iso_date_serial(""), None);
    }

    #[test]
    fn test_iso_date_serial_roundtrips_with_serial_to_date() {
        let serial = iso_date_serial("2024-02-29").unwrap();
        assert_eq!(serial_to_date(serial).unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_date_stamp_zero_padded() {
        assert_eq!(date_stamp(ymd(2023, 1, 5)), "20230105");
        assert_eq!(date_stamp(ymd(2024, 12, 31)), "20241231");
    }
}
