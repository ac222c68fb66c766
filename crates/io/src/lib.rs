// File I/O: report uploads in, snapshots and reports out

pub mod csv;
pub mod email;
pub mod export;
pub mod json;
pub mod store;
pub mod xlsx;

use std::path::Path;

use countboard_stats::ParsedUpload;

/// Import an uploaded report, choosing the reader by file extension.
pub fn import(path: &Path) -> Result<ParsedUpload, String> {
    import_with_sheet(path, None)
}

/// Like [`import`], reading `sheet` when the file is a workbook. Other
/// formats ignore the sheet name.
pub fn import_with_sheet(path: &Path, sheet: Option<&str>) -> Result<ParsedUpload, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let upload = match ext.as_str() {
        "csv" | "txt" => csv::import(path)?,
        "tsv" => csv::import_tsv(path)?,
        "json" => json::import(path)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => xlsx::import(path, sheet)?,
        other => return Err(format!("unsupported file type '.{other}' ({})", path.display())),
    };

    log::info!(
        "imported {}: {} columns, {} rows",
        path.display(),
        upload.columns.len(),
        upload.data.len()
    );
    Ok(upload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    #[test]
    fn sheet_name_ignored_for_delimited_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cc.csv");
        std::fs::write(&path, "Branch,%CountComp\n1951 - PT. APL MEDAN,1\n").unwrap();

        let upload = import_with_sheet(&path, Some("Data")).unwrap();
        assert_eq!(upload.columns, vec!["Branch", "%CountComp"]);
        assert_eq!(upload.data.len(), 1);
    }

    #[test]
    fn sheet_name_selects_workbook_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ira.xlsx");
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name("Notes").unwrap().write_string(0, 0, "ignore me").unwrap();
        let sheet = workbook.add_worksheet().set_name("Data").unwrap();
        sheet.write_string(0, 0, "Plant").unwrap();
        sheet.write_string(0, 1, "%IRALine").unwrap();
        sheet.write_number(1, 0, 1951).unwrap();
        sheet.write_number(1, 1, 1).unwrap();
        workbook.save(&path).unwrap();

        let upload = import_with_sheet(&path, Some("Data")).unwrap();
        assert_eq!(upload.columns, vec!["Plant", "%IRALine"]);
        assert!(import_with_sheet(&path, Some("Missing")).is_err());
    }
}
