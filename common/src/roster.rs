//! 行校验与出图任务生成
//!
//! 进度条的分母（有效行数）和逐行处理使用同一个判定 `RosterRow::to_job`，
//! 两边不会出现不一致。

use crate::date::serial_to_date;
use crate::error::{Error, Result};
use crate::name::extract_name;
use crate::types::{CellValue, RenderJob, RosterRow, ShiftNames};

const DAY_SHIFT_COLUMN: &str = "B";
const NIGHT_SHIFT_COLUMN: &str = "C";

impl RosterRow {
    /// 抽取白班・夜班姓名
    ///
    /// - 空单元格 → 无姓名（跳过该行）
    /// - 文本以外的单元格 → 错误
    /// - 白班没有姓名时不再检查夜班
    pub fn shift_names(&self) -> Result<Option<ShiftNames>> {
        let Some(day_shift) = cell_name(&self.day_shift, self.row, DAY_SHIFT_COLUMN)? else {
            return Ok(None);
        };
        let Some(night_shift) = cell_name(&self.night_shift, self.row, NIGHT_SHIFT_COLUMN)? else {
            return Ok(None);
        };
        Ok(Some(ShiftNames {
            day_shift,
            night_shift,
        }))
    }

    /// A列的日期序号（小数部分舍去）
    pub fn date_serial(&self) -> Result<i64> {
        let serial = match &self.date {
            CellValue::Int(n) => Some(*n),
            CellValue::Float(n) | CellValue::DateTime(n) => truncate_serial(*n),
            CellValue::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        serial.ok_or_else(|| Error::InvalidDateSerial {
            row: self.row,
            value: self.date.to_string(),
        })
    }

    /// 两个姓名都有时生成出图任务，否则返回 `None`
    ///
    /// 日期只在姓名有效时解析。
    pub fn to_job(&self) -> Result<Option<RenderJob>> {
        let Some(names) = self.shift_names()? else {
            return Ok(None);
        };
        let date = serial_to_date(self.date_serial()?)?;
        Ok(Some(RenderJob {
            row: self.row,
            date,
            day_shift: names.day_shift,
            night_shift: names.night_shift,
        }))
    }
}

fn cell_name(cell: &CellValue, row: usize, column: &'static str) -> Result<Option<String>> {
    match cell {
        CellValue::Empty => Ok(None),
        CellValue::Text(text) => Ok(extract_name(text)),
        other => Err(Error::NonTextCell {
            row,
            column,
            found: other.to_string(),
        }),
    }
}

fn truncate_serial(value: f64) -> Option<i64> {
    if value.is_finite() && value.abs() < i64::MAX as f64 {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

/// 全部行 → 出图任务（保持表格顺序，无效行跳过）
pub fn plan_jobs(rows: &[RosterRow]) -> Result<Vec<RenderJob>> {
    let mut jobs = Vec::new();
    for row in rows {
        if let Some(job) = row.to_job()? {
            jobs.push(job);
        }
    }
    Ok(jobs)
}

/// 有效行数（进度条的分母）
pub fn count_valid_rows(rows: &[RosterRow]) -> Result<usize> {
    Ok(plan_jobs(rows)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(index: usize, date: CellValue, day: CellValue, night: CellValue) -> RosterRow {
        RosterRow {
            row: index,
            date,
            day_shift: day,
            night_shift: night,
        }
    }

    #[test]
    fn test_valid_row_becomes_job() {
        let r = row(
            1,
            CellValue::Int(44927),
            "张 三（12345678901）".into(),
            "李四（10987654321）".into(),
        );
        let job = r.to_job().unwrap().unwrap();
        assert_eq!(job.date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(job.day_shift, "张三");
        assert_eq!(job.night_shift, "李四");
        assert_eq!(job.row, 1);
    }

    #[test]
    fn test_blank_night_cell_is_skipped() {
        let r = row(
            2,
            CellValue::Int(44928),
            "张三（12345678901）".into(),
            CellValue::Empty,
        );
        assert_eq!(r.to_job().unwrap(), None);
    }

    #[test]
    fn test_night_cell_without_phone_is_skipped() {
        let r = row(
            2,
            CellValue::Int(44928),
            "张三（12345678901）".into(),
            "李四".into(),
        );
        assert_eq!(r.to_job().unwrap(), None);
    }

    #[test]
    fn test_numeric_shift_cell_is_error() {
        let r = row(
            5,
            CellValue::Int(44928),
            CellValue::Int(42),
            "李四（10987654321）".into(),
        );
        assert!(matches!(
            r.to_job(),
            Err(Error::NonTextCell { row: 5, column: "B", .. })
        ));
    }

    #[test]
    fn test_night_cell_not_checked_when_day_missing() {
        let r = row(
            5,
            CellValue::Int(44928),
            CellValue::Empty,
            CellValue::Float(3.0),
        );
        assert_eq!(r.to_job().unwrap(), None);
    }

    #[test]
    fn test_date_not_checked_for_skipped_row() {
        let r = row(4, "合计".into(), "备注".into(), CellValue::Empty);
        assert_eq!(r.to_job().unwrap(), None);
    }

    #[test]
    fn test_invalid_date_on_valid_row_is_error() {
        let r = row(
            4,
            "明天".into(),
            "张三（12345678901）".into(),
            "李四（10987654321）".into(),
        );
        assert!(matches!(
            r.to_job(),
            Err(Error::InvalidDateSerial { row: 4, .. })
        ));
    }

    #[test]
    fn test_date_serial_variants() {
        let mut r = RosterRow::default();
        r.date = CellValue::Float(44927.75);
        assert_eq!(r.date_serial().unwrap(), 44927);
        r.date = CellValue::DateTime(44927.0);
        assert_eq!(r.date_serial().unwrap(), 44927);
        r.date = CellValue::Text(" 44927 ".to_string());
        assert_eq!(r.date_serial().unwrap(), 44927);
        r.date = CellValue::Float(f64::NAN);
        assert!(r.date_serial().is_err());
        r.date = CellValue::Empty;
        assert!(r.date_serial().is_err());
    }

    #[test]
    fn test_plan_jobs_keeps_row_order_and_matches_count() {
        let rows = vec![
            row(1, CellValue::Int(44927), "张三（12345678901）".into(), "李四（10987654321）".into()),
            row(2, CellValue::Int(44928), "王五（12345678901）".into(), CellValue::Empty),
            row(3, CellValue::Int(44929), "赵六（12345678901）".into(), "孙七（10987654321）".into()),
            RosterRow { row: 4, ..Default::default() },
        ];
        let jobs = plan_jobs(&rows).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].row, 1);
        assert_eq!(jobs[1].row, 3);
        assert_eq!(count_valid_rows(&rows).unwrap(), jobs.len());
    }

    #[test]
    fn test_plan_jobs_empty() {
        assert!(plan_jobs(&[]).unwrap().is_empty());
    }
}
