//! 排班表（Excel）的读取
//!
//! 第一个工作表，无表头，A/B/C 三列按绝对位置读取。

use crate::error::{Result, RosterError};
use calamine::{open_workbook_auto, Data, Reader};
use shift_roster_common::{iso_date_serial, CellValue, RosterRow};
use std::path::Path;
use tracing::info;

const DATE_COLUMN: u32 = 0;
const DAY_SHIFT_COLUMN: u32 = 1;
const NIGHT_SHIFT_COLUMN: u32 = 2;

/// 读取排班表的全部行
pub fn read_roster(path: &Path) -> Result<Vec<RosterRow>> {
    if !path.exists() {
        return Err(RosterError::FileNotFound(path.display().to_string()));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| RosterError::Sheet(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RosterError::EmptyWorkbook(path.display().to_string()))?
        .map_err(|e| RosterError::Sheet(e.to_string()))?;

    let (Some((start_row, _)), Some((end_row, _))) = (range.start(), range.end()) else {
        info!(path = %path.display(), "排班表为空");
        return Ok(Vec::new());
    };

    let cell = |row: u32, column: u32| {
        range
            .get_value((row, column))
            .map(to_cell_value)
            .unwrap_or_default()
    };

    let rows: Vec<RosterRow> = (start_row..=end_row)
        .map(|row| RosterRow {
            row: row as usize + 1,
            date: cell(row, DATE_COLUMN),
            day_shift: cell(row, DAY_SHIFT_COLUMN),
            night_shift: cell(row, NIGHT_SHIFT_COLUMN),
        })
        .collect();

    info!(path = %path.display(), rows = rows.len(), "排班表读取完成");
    Ok(rows)
}

fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        // ODS的日期单元格
        Data::DateTimeIso(s) => match iso_date_serial(s) {
            Some(serial) => CellValue::DateTime(serial as f64),
            None => CellValue::Text(s.clone()),
        },
        Data::Int(n) => CellValue::Int(*n),
        Data::Float(n) => CellValue::Float(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let result = read_roster(Path::new("/nonexistent/排班表.xlsx"));
        assert!(matches!(result, Err(RosterError::FileNotFound(_))));
    }

    #[test]
    fn test_cell_value_conversion() {
        assert_eq!(to_cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(to_cell_value(&Data::Int(3)), CellValue::Int(3));
        assert_eq!(
            to_cell_value(&Data::String("张三（12345678901）".into())),
            CellValue::Text("张三（12345678901）".into())
        );
        assert_eq!(to_cell_value(&Data::Float(1.5)), CellValue::Float(1.5));
    }

    #[test]
    fn test_iso_date_cell_becomes_serial() {
        assert_eq!(
            to_cell_value(&Data::DateTimeIso("2023-01-01".into())),
            CellValue::DateTime(44927.0)
        );
        assert_eq!(
            to_cell_value(&Data::DateTimeIso("2023-01-01T09:00:00".into())),
            CellValue::DateTime(44927.0)
        );
    }

    #[test]
    fn test_time_only_iso_cell_stays_text() {
        assert_eq!(
            to_cell_value(&Data::DateTimeIso("09:00:00".into())),
            CellValue::Text("09:00:00".into())
        );
    }
}
