//! Excel section state

use serde_json::Value;

use super::types::LineInput;

pub const TABLE_TYPES: &[&str] = &[
    "process_tracking",
    "technical_evaluation",
    "commercial_comparison",
    "supplier_evaluation",
    "savings_analysis",
    "questions_answers",
];

pub const PREVIEW_LIMIT: usize = 20;
pub const PREVIEW_IDLE: &str = "Select a data type to display";
pub const PREVIEW_EMPTY: &str = "No data available for this type";

pub fn table_type_label(table_type: &str) -> &str {
    match table_type {
        "process_tracking" => "Process tracking",
        "technical_evaluation" => "Technical evaluation",
        "commercial_comparison" => "Commercial comparison",
        "supplier_evaluation" => "Supplier evaluation",
        "savings_analysis" => "Savings analysis",
        "questions_answers" => "Questions & answers",
        other => other,
    }
}

/// First rows of an imported table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Records the server returned
    pub total: usize,
}

impl DataPreview {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// "Showing 20 of N records" once rows were cut
    pub fn truncation_note(&self) -> Option<String> {
        (self.total > PREVIEW_LIMIT)
            .then(|| format!("Showing {} of {} records", PREVIEW_LIMIT, self.total))
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => "-".to_string(),
        Some(Value::String(s)) if s.is_empty() => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Build the preview from a `{data: [...]}` body
pub fn decode_preview(body: &Value) -> Result<DataPreview, String> {
    let items = match body.get("data") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return Ok(DataPreview::default()),
        Some(_) => return Err("unexpected data payload".to_string()),
    };

    let columns: Vec<String> = match items.first() {
        Some(Value::Object(first)) => first
            .keys()
            .filter(|k| k.as_str() != "id" && k.as_str() != "upload_date")
            .cloned()
            .collect(),
        Some(_) => return Err("unexpected row shape".to_string()),
        None => Vec::new(),
    };

    let rows = items
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|item| columns.iter().map(|c| cell_text(item.get(c))).collect())
        .collect();

    Ok(DataPreview {
        columns,
        rows,
        total: items.len(),
    })
}

/// Which part of the Excel section has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExcelField {
    /// Table type for template download and preview
    #[default]
    DataType,
    UploadType,
    UploadPath,
}

impl ExcelField {
    pub fn next(&self) -> Self {
        match self {
            ExcelField::DataType => ExcelField::UploadType,
            ExcelField::UploadType => ExcelField::UploadPath,
            ExcelField::UploadPath => ExcelField::DataType,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExcelModel {
    pub data_type: Option<&'static str>,
    pub upload_type: Option<&'static str>,
    pub upload_path: LineInput,
    pub focus: ExcelField,
    pub preview: Option<Result<DataPreview, String>>,
    pub preview_loading: bool,
}

impl ExcelModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step the focused type selector; `None` sits before the first option
    pub fn cycle_type(&mut self) {
        let slot = match self.focus {
            ExcelField::DataType => &mut self.data_type,
            ExcelField::UploadType => &mut self.upload_type,
            ExcelField::UploadPath => return,
        };
        *slot = crate::logic::ui::cycle_option(TABLE_TYPES, *slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preview_drops_id_and_upload_date() {
        let body = json!({"data": [
            {"id": 1, "process_number": "P-1", "status": "", "amount": 0, "upload_date": "2025-01-01"},
            {"id": 2, "process_number": "P-2", "status": "open", "amount": 50, "upload_date": "2025-01-01"}
        ]});
        let preview = decode_preview(&body).unwrap();
        assert_eq!(preview.columns, vec!["process_number", "status", "amount"]);
        assert_eq!(preview.rows[0], vec!["P-1", "-", "-"]);
        assert_eq!(preview.rows[1], vec!["P-2", "open", "50"]);
        assert_eq!(preview.truncation_note(), None);
    }

    #[test]
    fn test_preview_caps_rows() {
        let items: Vec<Value> = (0..25).map(|i| json!({"id": i, "name": format!("n{}", i)})).collect();
        let preview = decode_preview(&json!({ "data": items })).unwrap();
        assert_eq!(preview.rows.len(), PREVIEW_LIMIT);
        assert_eq!(preview.total, 25);
        assert_eq!(preview.truncation_note().as_deref(), Some("Showing 20 of 25 records"));
    }

    #[test]
    fn test_empty_preview() {
        assert!(decode_preview(&json!({"data": []})).unwrap().is_empty());
        assert!(decode_preview(&json!({})).unwrap().is_empty());
        assert!(decode_preview(&json!({"data": 3})).is_err());
    }

    #[test]
    fn test_cycle_type_follows_focus() {
        let mut model = ExcelModel::new();
        model.cycle_type();
        assert_eq!(model.data_type, Some("process_tracking"));
        model.focus = ExcelField::UploadType;
        model.cycle_type();
        model.cycle_type();
        assert_eq!(model.upload_type, Some("technical_evaluation"));
        assert_eq!(model.data_type, Some("process_tracking"));
    }
}
