//! Record forms
//!
//! A form keeps the JSON value the server returned for every field. When the
//! edit buffer still shows that value unchanged, the original value is sent
//! back as-is, so opening and saving a record never alters it.

use serde_json::{Map, Number, Value};

use super::entities::{
    EntityKind, BID_STATUSES, DOCUMENT_TYPES, PROCESS_STATUSES, PROCESS_TYPES, SUPPLIER_STATUSES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Whole number, empty → null
    Integer,
    /// Integer or decimal, empty → null
    Number,
    /// Date-time text, empty → null
    DateTime,
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { key, label, kind }
}

const PROCESS_FIELDS: &[FieldSpec] = &[
    field("process_number", "Number", FieldKind::Text),
    field("title", "Title", FieldKind::Text),
    field("description", "Description", FieldKind::Text),
    field("process_type", "Type", FieldKind::Choice(PROCESS_TYPES)),
    field("status", "Status", FieldKind::Choice(PROCESS_STATUSES)),
    field("budget", "Budget", FieldKind::Number),
    field("start_date", "Start date", FieldKind::DateTime),
    field("end_date", "End date", FieldKind::DateTime),
    field("notes", "Notes", FieldKind::Text),
];

const SUPPLIER_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text),
    field("contact_person", "Contact", FieldKind::Text),
    field("email", "Email", FieldKind::Text),
    field("phone", "Phone", FieldKind::Text),
    field("address", "Address", FieldKind::Text),
    field("rut", "RUT", FieldKind::Text),
    field("status", "Status", FieldKind::Choice(SUPPLIER_STATUSES)),
    field("notes", "Notes", FieldKind::Text),
];

const BID_FIELDS: &[FieldSpec] = &[
    field("process_id", "Process ID", FieldKind::Integer),
    field("supplier_id", "Supplier ID", FieldKind::Integer),
    field("bid_amount", "Amount", FieldKind::Number),
    field("technical_score", "Technical", FieldKind::Number),
    field("commercial_score", "Commercial", FieldKind::Number),
    field("status", "Status", FieldKind::Choice(BID_STATUSES)),
    field("notes", "Notes", FieldKind::Text),
];

const DOCUMENT_FIELDS: &[FieldSpec] = &[
    field("document_type", "Type", FieldKind::Choice(DOCUMENT_TYPES)),
    field("description", "Description", FieldKind::Text),
];

/// Editable fields of an entity, empty for entities without a form
pub fn form_fields(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::Process => PROCESS_FIELDS,
        EntityKind::Supplier => SUPPLIER_FIELDS,
        EntityKind::Bid => BID_FIELDS,
        EntityKind::Document => DOCUMENT_FIELDS,
        EntityKind::Alert => &[],
    }
}

/// How a JSON value shows up in an edit buffer
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// A field that could not be turned into JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub key: &'static str,
    pub message: String,
}

fn parse_field(spec: &FieldSpec, text: &str) -> Result<Value, FieldError> {
    let trimmed = text.trim();
    let invalid = |what: &str| FieldError {
        key: spec.key,
        message: format!("{} must be {}", spec.label, what),
    };

    match spec.kind {
        FieldKind::Text => Ok(Value::String(text.to_string())),
        FieldKind::Choice(options) => {
            if options.contains(&trimmed) {
                Ok(Value::String(trimmed.to_string()))
            } else {
                Err(invalid(&format!("one of: {}", options.join(", "))))
            }
        }
        FieldKind::Integer => {
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            trimmed
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .map_err(|_| invalid("a whole number"))
        }
        FieldKind::Number => {
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(Value::Number(n.into()));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid("a number"))
        }
        FieldKind::DateTime => {
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            if crate::logic::formatting::parse_timestamp(trimmed).is_some() {
                Ok(Value::String(trimmed.to_string()))
            } else {
                Err(invalid("a date (YYYY-MM-DD or YYYY-MM-DDTHH:MM)"))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub spec: FieldSpec,
    pub buffer: String,
    /// Value received from the server, `None` for new records
    pub original: Option<Value>,
}

impl FormField {
    fn blank(spec: FieldSpec) -> Self {
        let buffer = match spec.kind {
            FieldKind::Choice(options) => options.first().copied().unwrap_or("").to_string(),
            _ => String::new(),
        };
        Self {
            spec,
            buffer,
            original: None,
        }
    }

    fn from_value(spec: FieldSpec, value: Value) -> Self {
        Self {
            spec,
            buffer: display_value(&value),
            original: Some(value),
        }
    }

    /// Buffer still shows what the server sent
    pub fn is_unchanged(&self) -> bool {
        self.original
            .as_ref()
            .is_some_and(|original| display_value(original) == self.buffer)
    }

    pub fn to_value(&self) -> Result<Value, FieldError> {
        match &self.original {
            Some(original) if self.is_unchanged() => Ok(original.clone()),
            _ => parse_field(&self.spec, &self.buffer),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.spec.kind, FieldKind::Choice(_))
    }

    /// Step a choice field through its options
    pub fn cycle(&mut self, forward: bool) {
        if let FieldKind::Choice(options) = self.spec.kind {
            if let Some(next) = crate::logic::ui::cycle_value(options, &self.buffer, forward) {
                self.buffer = next.to_string();
            }
        }
    }
}

/// Create or edit form of one record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordForm {
    pub kind: EntityKind,
    /// `None` when creating
    pub record_id: Option<u64>,
    pub fields: Vec<FormField>,
    pub focus: usize,
    /// Record is still being fetched for editing
    pub loading: bool,
}

impl RecordForm {
    pub fn new_record(kind: EntityKind) -> Self {
        Self {
            kind,
            record_id: None,
            fields: form_fields(kind).iter().copied().map(FormField::blank).collect(),
            focus: 0,
            loading: false,
        }
    }

    /// Placeholder shown while the record is fetched
    pub fn pending_edit(kind: EntityKind, record_id: u64) -> Self {
        Self {
            loading: true,
            record_id: Some(record_id),
            ..Self::new_record(kind)
        }
    }

    /// Fill the form from a fetched record
    pub fn populate(&mut self, record: &Value) {
        self.fields = form_fields(self.kind)
            .iter()
            .copied()
            .map(|spec| {
                let value = record.get(spec.key).cloned().unwrap_or(Value::Null);
                FormField::from_value(spec, value)
            })
            .collect();
        self.loading = false;
        self.focus = 0;
    }

    pub fn is_edit(&self) -> bool {
        self.record_id.is_some()
    }

    pub fn title(&self) -> String {
        match self.record_id {
            Some(id) => format!("Edit {} #{}", self.kind.noun(), id),
            None => format!("New {}", self.kind.noun()),
        }
    }

    pub fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_previous(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// JSON body to submit, or the first field that does not parse
    pub fn payload(&self) -> Result<Value, FieldError> {
        let mut body = Map::new();
        for field in &self.fields {
            body.insert(field.spec.key.to_string(), field.to_value()?);
        }
        Ok(Value::Object(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn process_record() -> Value {
        json!({
            "id": 12,
            "process_number": "LIC-2025-012",
            "title": "Servicio de aseo",
            "description": null,
            "process_type": "large_tender",
            "status": "evaluation",
            "budget": 15000000.5,
            "start_date": "2025-01-10T09:00:00",
            "end_date": null,
            "created_date": "2025-01-01T00:00:00",
            "notes": ""
        })
    }

    #[test]
    fn test_unchanged_process_round_trips() {
        let record = process_record();
        let mut form = RecordForm::pending_edit(EntityKind::Process, 12);
        form.populate(&record);

        let payload = form.payload().unwrap();
        for spec in form_fields(EntityKind::Process) {
            assert_eq!(payload[spec.key], record[spec.key], "field {}", spec.key);
        }
    }

    #[test]
    fn test_unchanged_integer_budget_stays_integer() {
        let record = json!({"budget": 2500000, "status": "draft", "process_type": "simple_purchase"});
        let mut form = RecordForm::new_record(EntityKind::Process);
        form.populate(&record);
        let payload = form.payload().unwrap();
        assert_eq!(payload["budget"], json!(2500000));
        assert!(payload["budget"].is_i64());
    }

    #[test]
    fn test_unknown_choice_value_survives_unchanged() {
        let record = json!({"name": "ACME", "status": "suspended"});
        let mut form = RecordForm::new_record(EntityKind::Supplier);
        form.populate(&record);
        assert_eq!(form.payload().unwrap()["status"], json!("suspended"));
    }

    #[test]
    fn test_edited_number_is_parsed() {
        let mut form = RecordForm::new_record(EntityKind::Process);
        form.populate(&process_record());
        let budget = form.fields.iter_mut().find(|f| f.spec.key == "budget").unwrap();
        budget.buffer = "1200".to_string();
        assert_eq!(form.payload().unwrap()["budget"], json!(1200));

        let budget = form.fields.iter_mut().find(|f| f.spec.key == "budget").unwrap();
        budget.buffer = "".to_string();
        assert_eq!(form.payload().unwrap()["budget"], Value::Null);
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let mut form = RecordForm::new_record(EntityKind::Bid);
        form.fields[0].buffer = "seven".to_string();
        let err = form.payload().unwrap_err();
        assert_eq!(err.key, "process_id");
        assert!(err.message.contains("whole number"));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let mut form = RecordForm::new_record(EntityKind::Process);
        let end = form.fields.iter_mut().find(|f| f.spec.key == "end_date").unwrap();
        end.buffer = "next friday".to_string();
        assert_eq!(form.payload().unwrap_err().key, "end_date");
    }

    #[test]
    fn test_new_record_defaults() {
        let form = RecordForm::new_record(EntityKind::Process);
        let payload = form.payload().unwrap();
        assert_eq!(payload["process_type"], json!("simple_purchase"));
        assert_eq!(payload["status"], json!("draft"));
        assert_eq!(payload["budget"], Value::Null);
        assert_eq!(payload["title"], json!(""));
        assert!(!form.is_edit());
    }

    #[test]
    fn test_choice_cycle() {
        let mut form = RecordForm::new_record(EntityKind::Supplier);
        let status = form.fields.iter_mut().find(|f| f.spec.key == "status").unwrap();
        status.cycle(true);
        assert_eq!(status.buffer, "inactive");
        status.cycle(false);
        status.cycle(false);
        assert_eq!(status.buffer, "blacklisted");
    }

    #[test]
    fn test_alerts_have_no_form() {
        assert!(form_fields(EntityKind::Alert).is_empty());
    }
}
