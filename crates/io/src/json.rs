// JSON upload import: `{"columns": [...], "data": [{...}, ...]}`

use std::collections::BTreeSet;
use std::path::Path;

use countboard_stats::ParsedUpload;

pub fn import(path: &Path) -> Result<ParsedUpload, String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    import_from_str(&content)
}

/// Parse an upload; when `columns` is absent it is rebuilt from the row keys.
pub fn import_from_str(content: &str) -> Result<ParsedUpload, String> {
    let mut upload: ParsedUpload =
        serde_json::from_str(content).map_err(|e| format!("invalid upload JSON: {e}"))?;

    if upload.columns.is_empty() {
        let keys: BTreeSet<&str> = upload.data.iter().flat_map(|r| r.columns()).collect();
        upload.columns = keys.into_iter().map(str::to_string).collect();
    }

    Ok(upload)
}
