//! Dashboard aggregate
//!
//! One composite payload fans out to independent renderers. Each decoder
//! below looks only at its own sub-object: `None` means the sub-object is
//! absent, `Some(Err(..))` that it is present but unreadable. Neither stops
//! the other renderers.

use serde::Deserialize;
use serde_json::Value;

use super::charts::{ChartKind, Dataset, Series};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counters {
    pub total_processes: u64,
    pub total_suppliers: u64,
    pub total_bids: u64,
    pub active_alerts: u64,
    pub total_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecentProcess {
    #[serde(default)]
    pub process_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriorityCount {
    pub priority: String,
    pub count: u64,
}

#[derive(Deserialize)]
struct StatusCount {
    status: String,
    count: f64,
}

#[derive(Deserialize)]
struct ProcessSaving {
    #[serde(default)]
    process_title: String,
    saving: f64,
}

#[derive(Deserialize)]
struct SupplierActivity {
    supplier_name: String,
    #[serde(default)]
    bid_count: f64,
    #[serde(default)]
    awarded_count: f64,
}

#[derive(Deserialize)]
struct MonthPoint {
    month: String,
    count: f64,
}

/// Rendered dashboard widgets; charts live in the chart board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardModel {
    pub counters: Option<Counters>,
    pub recent_processes: Option<Vec<RecentProcess>>,
    pub alert_priorities: Option<Vec<PriorityCount>>,
    pub loading: bool,
}

fn sub_array<T: for<'de> Deserialize<'de>>(value: &Value) -> Result<Vec<T>, String> {
    serde_json::from_value(value.clone()).map_err(|e| e.to_string())
}

/// Counter tiles; absent numbers count as zero
pub fn counters(body: &Value) -> Option<Result<Counters, String>> {
    let counters = body.get("counters")?;
    if !counters.is_object() {
        return Some(Err("counters is not an object".to_string()));
    }

    let int = |key: &str| counters.get(key).and_then(Value::as_f64).unwrap_or(0.0) as u64;
    Some(Ok(Counters {
        total_processes: int("total_processes"),
        total_suppliers: int("total_suppliers"),
        total_bids: int("total_bids"),
        active_alerts: int("active_alerts"),
        total_savings: counters
            .get("total_savings")
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
    }))
}

pub fn status_chart(body: &Value) -> Option<Result<Dataset, String>> {
    let raw = body.get("process_status_distribution")?;
    Some(sub_array::<StatusCount>(raw).map(|items| {
        Dataset::single(
            ChartKind::Doughnut,
            "Processes",
            items.into_iter().map(|i| (i.status, i.count)).collect(),
        )
    }))
}

fn short_title(title: &str) -> String {
    if title.chars().count() > 20 {
        format!("{}...", title.chars().take(20).collect::<String>())
    } else {
        title.to_string()
    }
}

/// Top ten savings by process
pub fn savings_chart(body: &Value) -> Option<Result<Dataset, String>> {
    let raw = body.get("savings_data")?.get("savings_by_process")?;
    Some(sub_array::<ProcessSaving>(raw).map(|items| {
        Dataset::single(
            ChartKind::Bar,
            "Savings ($)",
            items
                .into_iter()
                .take(10)
                .map(|i| (short_title(&i.process_title), i.saving))
                .collect(),
        )
    }))
}

/// Bids and awarded bids per supplier
pub fn suppliers_chart(body: &Value) -> Option<Result<Dataset, String>> {
    let raw = body.get("top_suppliers")?;
    Some(sub_array::<SupplierActivity>(raw).map(|items| {
        let labels = items.iter().map(|i| i.supplier_name.clone()).collect();
        Dataset {
            kind: ChartKind::Bar,
            labels,
            series: vec![
                Series {
                    label: "Bids".to_string(),
                    values: items.iter().map(|i| i.bid_count).collect(),
                },
                Series {
                    label: "Awarded".to_string(),
                    values: items.iter().map(|i| i.awarded_count).collect(),
                },
            ],
        }
    }))
}

pub fn trends_chart(body: &Value) -> Option<Result<Dataset, String>> {
    let raw = body.get("monthly_trends")?;
    Some(sub_array::<MonthPoint>(raw).map(|items| {
        Dataset::single(
            ChartKind::Line,
            "Processes created",
            items.into_iter().map(|i| (i.month, i.count)).collect(),
        )
    }))
}

pub fn recent_processes(body: &Value) -> Option<Result<Vec<RecentProcess>, String>> {
    let raw = body.get("recent_processes")?;
    if raw.is_null() {
        return Some(Ok(Vec::new()));
    }
    Some(sub_array(raw))
}

pub fn alert_priorities(body: &Value) -> Option<Result<Vec<PriorityCount>, String>> {
    let raw = body.get("alert_priority_distribution")?;
    if raw.is_null() {
        return Some(Ok(Vec::new()));
    }
    Some(sub_array(raw))
}
