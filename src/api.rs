use anyhow::{Context, Result};
use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Failure of a call to the procurement API
///
/// Only two kinds exist: the server could not be reached (or answered with
/// something unreadable), or it answered with a non-success status and a
/// structured `{error}` payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("{message}")]
    Application {
        status: u16,
        message: String,
        /// Extra validation messages some endpoints attach (`validation_errors`)
        details: Vec<String>,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(crate::logic::errors::describe_transport(&err))
    }
}

/// Helper function to deserialize null as empty vector
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Process {
    pub id: u64,
    pub process_number: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub process_type: String, // "simple_purchase", "large_tender"
    pub status: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Supplier {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub rut: Option<String>,
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Bid {
    pub id: u64,
    #[serde(default)]
    pub process_id: Option<u64>,
    #[serde(default)]
    pub supplier_id: Option<u64>,
    #[serde(default)]
    pub bid_amount: Option<f64>,
    #[serde(default)]
    pub technical_score: Option<f64>,
    #[serde(default)]
    pub commercial_score: Option<f64>,
    #[serde(default)]
    pub total_score: Option<f64>,
    pub status: String,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub process_title: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Document {
    pub id: u64,
    pub original_filename: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub process_title: Option<String>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub title: String,
    pub alert_type: String, // "deadline", "missing_document", "process_expired"
    pub priority: String,
    pub status: String,
    #[serde(default)]
    pub process_title: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AlertStats {
    #[serde(default)]
    pub by_status: HashMap<String, u64>,
}

impl AlertStats {
    /// Number of active alerts, 0 when the server omits it
    pub fn active(&self) -> u64 {
        self.by_status.get("active").copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EvaluationCriterion {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub weight: f64,
    pub criteria_type: String, // "technical", "commercial", "financial"
    #[serde(default)]
    pub max_score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BidRanking {
    pub ranking_position: u32,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub bid_amount: Option<f64>,
    #[serde(default)]
    pub technical_score: Option<f64>,
    #[serde(default)]
    pub commercial_score: Option<f64>,
    #[serde(default)]
    pub financial_score: Option<f64>,
    #[serde(default)]
    pub weighted_total_score: Option<f64>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Minimal process reference used by selectors (evaluation, calendar, reports)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProcessOption {
    pub id: u64,
    pub process_number: String,
    pub title: String,
}

impl ProcessOption {
    pub fn label(&self) -> String {
        format!("{} - {}", self.process_number, self.title)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EventProps {
    #[serde(default)]
    pub process_id: Option<u64>,
    #[serde(default)]
    pub process_number: Option<String>,
    #[serde(default)]
    pub milestone_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_overdue: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(rename = "extendedProps", default)]
    pub props: EventProps,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Milestone {
    pub id: String,
    #[serde(default)]
    pub process_id: Option<u64>,
    #[serde(default)]
    pub process_number: Option<String>,
    pub milestone_type: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CalendarStats {
    #[serde(default)]
    pub upcoming_count: u64,
    #[serde(default)]
    pub overdue_count: u64,
    #[serde(default)]
    pub total_milestones: u64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MonthCount {
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct TrendsResponse {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    data: Vec<MonthCount>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FinancialAnalysis {
    #[serde(default)]
    pub average_amount: Option<f64>,
    #[serde(default)]
    pub lowest_bid: Option<f64>,
    #[serde(default)]
    pub highest_bid: Option<f64>,
    #[serde(default)]
    pub savings_vs_budget: Option<f64>,
    #[serde(default)]
    pub savings_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ScoreSummary {
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub highest_score: Option<f64>,
    #[serde(default)]
    pub lowest_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Analysis {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_bids: Option<u64>,
    #[serde(default)]
    pub financial_analysis: Option<FinancialAnalysis>,
    #[serde(default)]
    pub technical_analysis: Option<ScoreSummary>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProcessAnalysis {
    pub process: ProcessOption,
    #[serde(default)]
    pub analysis: Analysis,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ImportReport {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub validation_warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    validation_errors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AuthStatus {
    #[serde(default)]
    authenticated: bool,
}

/// Binary payload returned by export/download endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedFile {
    /// Filename suggested by the server via Content-Disposition
    pub suggested_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ProcurementClient {
    base_url: String,
    client: Client,
}

impl ProcurementClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into an `ApiError::Application`
    async fn application_error(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => ApiError::Application {
                status,
                message: body
                    .error
                    .or(body.message)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
                details: body.validation_errors,
            },
            Err(_) => ApiError::Application {
                status,
                message: format!("HTTP {}", status),
                details: Vec::new(),
            },
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::application_error(response).await);
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Transport(format!("malformed response: {}", e)))
    }

    /// GET a JSON document
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;

        Self::read_json(response).await
    }

    /// Send a JSON body (or none) with the given method and decode the reply
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::read_json(response).await
    }

    pub async fn alert_stats(&self) -> Result<AlertStats, ApiError> {
        self.get("/alerts/stats", &[]).await
    }

    pub async fn process_options(&self) -> Result<Vec<ProcessOption>, ApiError> {
        #[derive(Deserialize)]
        struct Options {
            #[serde(default, deserialize_with = "deserialize_null_default")]
            processes: Vec<ProcessOption>,
        }

        let query = [("per_page".to_string(), "100".to_string())];
        let options: Options = self.get("/processes", &query).await?;
        Ok(options.processes)
    }

    pub async fn process_bids(&self, process_id: u64) -> Result<Vec<Bid>, ApiError> {
        #[derive(Deserialize)]
        struct Bids {
            #[serde(default, deserialize_with = "deserialize_null_default")]
            bids: Vec<Bid>,
        }

        let query = [("process_id".to_string(), process_id.to_string())];
        let bids: Bids = self.get("/bids", &query).await?;
        Ok(bids.bids)
    }

    pub async fn process_trends(&self) -> Result<Vec<MonthCount>, ApiError> {
        let trends: TrendsResponse = self.get("/reports/chart/process-trends", &[]).await?;
        Ok(trends.data)
    }

    /// Fetch a binary file, keeping the server-suggested filename if any
    pub async fn download(&self, path: &str) -> Result<DownloadedFile, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;

        if !response.status().is_success() {
            return Err(Self::application_error(response).await);
        }

        let suggested_name = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(crate::logic::files::content_disposition_filename);

        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedFile {
            suggested_name,
            bytes,
        })
    }

    /// Upload a workbook as multipart form data (`file`, `table_type`)
    pub async fn upload_workbook(
        &self,
        file_path: &Path,
        table_type: &str,
    ) -> Result<ImportReport, ApiError> {
        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|e| ApiError::Transport(format!("cannot read {}: {}", file_path.display(), e)))?;

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.xlsx".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("table_type", table_type.to_string());

        let response = self
            .client
            .post(self.url("/excel/upload"))
            .multipart(form)
            .send()
            .await?;

        Self::read_json(response).await
    }

    /// Open a session with the configured credentials
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.send(Method::POST, "/auth/login", Some(&body)).await?;
        Ok(())
    }

    pub async fn is_authenticated(&self) -> Result<bool, ApiError> {
        let status: AuthStatus = self.get("/auth/check", &[]).await?;
        Ok(status.authenticated)
    }
}
