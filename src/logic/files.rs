//! Download naming
//!
//! Decides where a downloaded file lands and what it is called. The server's
//! `Content-Disposition` filename always wins over the locally built name.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Output format of a per-process report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Pdf,
    Excel,
}

impl ReportFormat {
    fn path_segment(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "excel",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "PDF",
            ReportFormat::Excel => "Excel",
        }
    }
}

/// Every binary resource the console can download
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DownloadTarget {
    ProcessesExport,
    SuppliersExport,
    ProcessReport { process_id: u64, format: ReportFormat },
    Template { table_type: String },
    Document { document_id: u64 },
}

impl DownloadTarget {
    /// API path, relative to the configured base URL
    pub fn path(&self) -> String {
        match self {
            DownloadTarget::ProcessesExport => "/reports/export/processes".to_string(),
            DownloadTarget::SuppliersExport => "/reports/export/suppliers".to_string(),
            DownloadTarget::ProcessReport { process_id, format } => {
                format!("/export/process/{}/{}", process_id, format.path_segment())
            }
            DownloadTarget::Template { table_type } => {
                format!("/excel/templates/{}", urlencoding::encode(table_type))
            }
            DownloadTarget::Document { document_id } => {
                format!("/documents/{}/download", document_id)
            }
        }
    }

    /// Name used when the server does not suggest one
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use tenderdesk::logic::files::{DownloadTarget, ReportFormat};
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    /// assert_eq!(DownloadTarget::ProcessesExport.fallback_name(today), "processes_2025-03-07.xlsx");
    /// assert_eq!(
    ///     DownloadTarget::ProcessReport { process_id: 4, format: ReportFormat::Pdf }.fallback_name(today),
    ///     "process_4_2025-03-07.pdf"
    /// );
    /// ```
    pub fn fallback_name(&self, today: NaiveDate) -> String {
        let date = today.format("%Y-%m-%d");
        match self {
            DownloadTarget::ProcessesExport => format!("processes_{}.xlsx", date),
            DownloadTarget::SuppliersExport => format!("suppliers_{}.xlsx", date),
            DownloadTarget::ProcessReport { process_id, format } => {
                format!("process_{}_{}.{}", process_id, date, format.extension())
            }
            DownloadTarget::Template { table_type } => format!("template_{}.xlsx", table_type),
            DownloadTarget::Document { document_id } => format!("document_{}", document_id),
        }
    }

    /// Exports run under the busy overlay, single-file downloads do not
    pub fn holds_busy(&self) -> bool {
        matches!(
            self,
            DownloadTarget::ProcessesExport
                | DownloadTarget::SuppliersExport
                | DownloadTarget::ProcessReport { .. }
        )
    }

    /// Wording for notices: (failure prefix, action in progress, success text)
    pub fn wording(&self) -> (String, String, String) {
        match self {
            DownloadTarget::ProcessesExport => (
                "Error exporting processes".to_string(),
                "exporting processes".to_string(),
                "Processes exported".to_string(),
            ),
            DownloadTarget::SuppliersExport => (
                "Error exporting suppliers".to_string(),
                "exporting suppliers".to_string(),
                "Suppliers exported".to_string(),
            ),
            DownloadTarget::ProcessReport { format, .. } => (
                format!("Error exporting {}", format.label()),
                format!("exporting {}", format.label()),
                format!("{} exported", format.label()),
            ),
            DownloadTarget::Template { .. } => (
                "Error downloading template".to_string(),
                "downloading template".to_string(),
                "Template downloaded".to_string(),
            ),
            DownloadTarget::Document { .. } => (
                "Error downloading document".to_string(),
                "downloading document".to_string(),
                "Document downloaded".to_string(),
            ),
        }
    }
}

/// Reduce a suggested name to its final path component
///
/// Returns `None` for names that are empty or only navigate (`.`, `..`).
pub fn final_component(name: &str) -> Option<String> {
    name.rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .map(str::to_string)
}

/// Extract the filename from a `Content-Disposition` header value
///
/// `filename*` (RFC 5987, percent-encoded) is preferred over `filename`.
///
/// # Examples
/// ```
/// use tenderdesk::logic::files::content_disposition_filename;
///
/// assert_eq!(
///     content_disposition_filename("attachment; filename=\"oferta.pdf\"").as_deref(),
///     Some("oferta.pdf")
/// );
/// assert_eq!(
///     content_disposition_filename("attachment; filename*=UTF-8''informe%20final.pdf").as_deref(),
///     Some("informe final.pdf")
/// );
/// assert_eq!(content_disposition_filename("inline"), None);
/// ```
pub fn content_disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();

        if key == "filename*" {
            let encoded = match value.splitn(3, '\'').nth(2) {
                Some(rest) => rest,
                None => value,
            };
            extended = urlencoding::decode(encoded.trim_matches('"'))
                .ok()
                .map(|decoded| decoded.into_owned());
        } else if key == "filename" {
            plain = Some(value.trim_matches('"').to_string());
        }
    }

    extended
        .or(plain)
        .and_then(|name| final_component(&name))
}

/// Final file name: server suggestion first, local fallback otherwise
pub fn resolve_file_name(
    target: &DownloadTarget,
    suggested: Option<&str>,
    today: NaiveDate,
) -> String {
    suggested
        .and_then(final_component)
        .unwrap_or_else(|| target.fallback_name(today))
}

/// First path in `dir` for `name` that `exists` reports as free
///
/// Collisions get a ` (n)` suffix before the extension.
pub fn available_path(dir: &Path, name: &str, exists: impl Fn(&Path) -> bool) -> PathBuf {
    let candidate = dir.join(name);
    if !exists(&candidate) {
        return candidate;
    }

    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    let mut n = 1;
    loop {
        let numbered = match extension {
            Some(ext) => format!("{} ({}).{}", stem, n, ext),
            None => format!("{} ({})", stem, n),
        };
        let candidate = dir.join(numbered);
        if !exists(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
