// Excel/ODS report import (calamine)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use countboard_stats::{CellValue, ParsedUpload, RawRow};

/// Import one worksheet (`sheet`, or the first one) as an upload.
///
/// The first row with any non-blank cell is the header. Blank header cells get
/// `__EMPTY_<col>` names so their values are still addressable.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<ParsedUpload, String> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| format!("Failed to open Excel file: {}", e))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| "Excel file contains no sheets".to_string())?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    let mut rows = range.rows().skip_while(|row| row.iter().all(is_blank));

    let Some(header) = rows.next() else {
        log::info!("sheet '{sheet_name}' is empty");
        return Ok(ParsedUpload::default());
    };

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell_value(cell).as_text() {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => format!("__EMPTY_{idx}"),
        })
        .collect();

    let mut data = Vec::new();
    for row in rows {
        let record: RawRow = columns
            .iter()
            .zip(row.iter())
            .filter(|(_, cell)| !is_blank(cell))
            .map(|(col, cell)| (col.clone(), cell_value(cell)))
            .collect();
        if !record.is_empty() {
            data.push(record);
        }
    }

    log::debug!("sheet '{sheet_name}': {} columns, {} rows", columns.len(), data.len());
    Ok(ParsedUpload::new(columns, data))
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Serial day number, 1900 date system
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
    }
}
