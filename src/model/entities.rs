//! List entities
//!
//! Each paginated section lists one entity. `EntityKind` carries the
//! per-entity wiring (path, items key, columns, filters); the `Entity` trait
//! turns one decoded record into a table row.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::sections::Section;
use crate::api::{Alert, Bid, Document, Process, Supplier};
use crate::logic::formatting::{
    format_date, format_datetime, format_file_size, format_optional_currency,
    format_optional_number, or_dash,
};
use crate::logic::pagination::{build_pager, Pager};

pub const PROCESS_TYPES: &[&str] = &["simple_purchase", "large_tender"];
pub const PROCESS_STATUSES: &[&str] = &["draft", "active", "evaluation", "completed", "cancelled"];
pub const SUPPLIER_STATUSES: &[&str] = &["active", "inactive", "blacklisted"];
pub const BID_STATUSES: &[&str] = &["submitted", "evaluated", "awarded", "rejected"];
pub const DOCUMENT_TYPES: &[&str] = &[
    "tender_specs",
    "technical_proposal",
    "commercial_proposal",
    "contract",
];
pub const ALERT_STATUSES: &[&str] = &["active", "dismissed", "resolved"];
pub const ALERT_PRIORITIES: &[&str] = &["low", "medium", "high", "critical"];

/// A filter control of a list section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub key: &'static str,
    pub label: &'static str,
    /// Fixed values to cycle through; empty means free text
    pub options: &'static [&'static str],
}

impl FilterSpec {
    pub fn is_text(&self) -> bool {
        self.options.is_empty()
    }
}

const SEARCH: FilterSpec = FilterSpec {
    key: "search",
    label: "Search",
    options: &[],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Process,
    Supplier,
    Bid,
    Document,
    Alert,
}

impl EntityKind {
    pub fn section(&self) -> Section {
        match self {
            EntityKind::Process => Section::Processes,
            EntityKind::Supplier => Section::Suppliers,
            EntityKind::Bid => Section::Bids,
            EntityKind::Document => Section::Documents,
            EntityKind::Alert => Section::Alerts,
        }
    }

    /// Collection path under the API prefix
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Process => "/processes",
            EntityKind::Supplier => "/suppliers",
            EntityKind::Bid => "/bids",
            EntityKind::Document => "/documents",
            EntityKind::Alert => "/alerts",
        }
    }

    pub fn record_path(&self, id: u64) -> String {
        format!("{}/{}", self.path(), id)
    }

    /// Key holding the rows in a list response
    pub fn items_key(&self) -> &'static str {
        match self {
            EntityKind::Process => "processes",
            EntityKind::Supplier => "suppliers",
            EntityKind::Bid => "bids",
            EntityKind::Document => "documents",
            EntityKind::Alert => "alerts",
        }
    }

    /// Singular noun for notices ("Process saved")
    pub fn noun(&self) -> &'static str {
        match self {
            EntityKind::Process => "process",
            EntityKind::Supplier => "supplier",
            EntityKind::Bid => "bid",
            EntityKind::Document => "document",
            EntityKind::Alert => "alert",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Process => "Process",
            EntityKind::Supplier => "Supplier",
            EntityKind::Bid => "Bid",
            EntityKind::Document => "Document",
            EntityKind::Alert => "Alert",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Process => &["Number", "Title", "Type", "Status", "Budget", "End date"],
            EntityKind::Supplier => &["Name", "Contact", "Email", "Phone", "RUT", "Status"],
            EntityKind::Bid => &["Process", "Supplier", "Amount", "Technical", "Commercial", "Status"],
            EntityKind::Document => &["File", "Type", "Process", "Supplier", "Size", "Uploaded"],
            EntityKind::Alert => &["Title", "Type", "Priority", "Status", "Process", "Created"],
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            EntityKind::Process => "No processes found",
            EntityKind::Supplier => "No suppliers found",
            EntityKind::Bid => "No bids found",
            EntityKind::Document => "No documents found",
            EntityKind::Alert => "No alerts found",
        }
    }

    pub fn filters(&self) -> &'static [FilterSpec] {
        match self {
            EntityKind::Process => &[
                SEARCH,
                FilterSpec {
                    key: "status",
                    label: "Status",
                    options: PROCESS_STATUSES,
                },
                FilterSpec {
                    key: "process_type",
                    label: "Type",
                    options: PROCESS_TYPES,
                },
            ],
            EntityKind::Supplier => &[
                SEARCH,
                FilterSpec {
                    key: "status",
                    label: "Status",
                    options: SUPPLIER_STATUSES,
                },
            ],
            EntityKind::Bid => &[FilterSpec {
                key: "status",
                label: "Status",
                options: BID_STATUSES,
            }],
            EntityKind::Document => &[FilterSpec {
                key: "document_type",
                label: "Type",
                options: DOCUMENT_TYPES,
            }],
            EntityKind::Alert => &[
                FilterSpec {
                    key: "status",
                    label: "Status",
                    options: ALERT_STATUSES,
                },
                FilterSpec {
                    key: "priority",
                    label: "Priority",
                    options: ALERT_PRIORITIES,
                },
            ],
        }
    }

    pub fn has_search(&self) -> bool {
        self.filters().iter().any(FilterSpec::is_text)
    }

    pub fn can_create(&self) -> bool {
        matches!(
            self,
            EntityKind::Process | EntityKind::Supplier | EntityKind::Bid
        )
    }

    pub fn can_edit(&self) -> bool {
        !matches!(self, EntityKind::Alert)
    }

    pub fn can_delete(&self) -> bool {
        !matches!(self, EntityKind::Alert)
    }

    /// Decode one list response into rows for this entity
    pub fn decode_page(&self, body: &Value) -> Result<Page, String> {
        match self {
            EntityKind::Process => decode_page::<Process>(body),
            EntityKind::Supplier => decode_page::<Supplier>(body),
            EntityKind::Bid => decode_page::<Bid>(body),
            EntityKind::Document => decode_page::<Document>(body),
            EntityKind::Alert => decode_page::<Alert>(body),
        }
    }
}

/// A record that can be shown as a list row
pub trait Entity: DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> u64;

    /// Display cells, one per `KIND.columns()` entry
    fn cells(&self) -> Vec<String>;
}

/// Process type as shown to the user
pub fn process_type_label(process_type: &str) -> &'static str {
    if process_type == "simple_purchase" {
        "Simple purchase"
    } else {
        "Large tender"
    }
}

impl Entity for Process {
    const KIND: EntityKind = EntityKind::Process;

    fn id(&self) -> u64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.process_number.clone(),
            self.title.clone(),
            process_type_label(&self.process_type).to_string(),
            self.status.clone(),
            format_optional_currency(self.budget),
            format_date(self.end_date.as_deref()),
        ]
    }
}

impl Entity for Supplier {
    const KIND: EntityKind = EntityKind::Supplier;

    fn id(&self) -> u64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(self.contact_person.as_deref()),
            or_dash(self.email.as_deref()),
            or_dash(self.phone.as_deref()),
            or_dash(self.rut.as_deref()),
            self.status.clone(),
        ]
    }
}

impl Entity for Bid {
    const KIND: EntityKind = EntityKind::Bid;

    fn id(&self) -> u64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            or_dash(self.process_title.as_deref()),
            or_dash(self.supplier_name.as_deref()),
            format_optional_currency(self.bid_amount),
            format_optional_number(self.technical_score.filter(|s| *s != 0.0)),
            format_optional_number(self.commercial_score.filter(|s| *s != 0.0)),
            self.status.clone(),
        ]
    }
}

impl Entity for Document {
    const KIND: EntityKind = EntityKind::Document;

    fn id(&self) -> u64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.original_filename.clone(),
            or_dash(self.document_type.as_deref()),
            or_dash(self.process_title.as_deref()),
            or_dash(self.supplier_name.as_deref()),
            format_file_size(self.file_size),
            format_datetime(self.upload_date.as_deref()),
        ]
    }
}

impl Entity for Alert {
    const KIND: EntityKind = EntityKind::Alert;

    fn id(&self) -> u64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.alert_type.clone(),
            self.priority.clone(),
            self.status.clone(),
            or_dash(self.process_title.as_deref()),
            format_date(self.created_date.as_deref()),
        ]
    }
}

/// One rendered table row
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: u64,
    pub cells: Vec<String>,
}

/// Decoded list response
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub rows: Vec<Row>,
    pub current_page: u32,
    pub pages: u32,
    pub total: u64,
}

fn read_u64(body: &Value, key: &str) -> Option<u64> {
    body.get(key).and_then(Value::as_u64)
}

/// Decode a `{<items>, current_page, pages, total}` list response
pub fn decode_page<T: Entity>(body: &Value) -> Result<Page, String> {
    let items = body
        .get(T::KIND.items_key())
        .or_else(|| body.get("items"))
        .cloned()
        .unwrap_or(Value::Array(Vec::new()));

    let items: Vec<T> = match items {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other)
            .map_err(|e| format!("malformed {} list: {}", T::KIND.noun(), e))?,
    };

    let rows = items
        .iter()
        .map(|item| Row {
            id: item.id(),
            cells: item.cells(),
        })
        .collect::<Vec<_>>();

    let pages = read_u64(body, "pages").unwrap_or(0) as u32;
    let current_page = read_u64(body, "current_page").unwrap_or(1).max(1) as u32;
    let total = read_u64(body, "total").unwrap_or(rows.len() as u64);

    Ok(Page {
        rows,
        current_page,
        pages,
        total,
    })
}

/// Last rendered content of a list section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionTable {
    pub rows: Vec<Row>,
    pub current_page: u32,
    pub pages: u32,
    pub total: u64,
    pub selected: Option<usize>,
    /// A response has been rendered at least once
    pub loaded: bool,
    /// A fetch is in flight
    pub loading: bool,
}

impl SectionTable {
    /// Replace the rendered rows with a fresh page
    pub fn apply_page(&mut self, page: Page) {
        self.rows = page.rows;
        self.current_page = page.current_page;
        self.pages = page.pages;
        self.total = page.total;
        self.loaded = true;
        self.loading = false;
        self.selected = match self.selected {
            _ if self.rows.is_empty() => None,
            Some(idx) => Some(idx.min(self.rows.len() - 1)),
            None => Some(0),
        };
    }

    /// The fixed empty-state message replaces the table
    pub fn is_empty_state(&self) -> bool {
        self.loaded && (self.pages == 0 || self.rows.is_empty())
    }

    /// Pager for the rendered page, hidden for the empty state
    pub fn pager(&self) -> Option<Pager> {
        if self.is_empty_state() {
            return None;
        }
        build_pager(self.current_page, self.pages)
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.selected.and_then(|idx| self.rows.get(idx))
    }
}
