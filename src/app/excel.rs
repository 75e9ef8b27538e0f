//! Excel coordinator

use std::path::PathBuf;

use serde_json::Value;

use crate::api::{ApiError, ImportReport};
use crate::log_debug;
use crate::logic::errors::failure_notice;
use crate::logic::files::DownloadTarget;
use crate::model::excel::decode_preview;
use crate::model::Severity;
use crate::services::api::ApiRequest;
use crate::App;

impl App {
    /// Refresh the preview of the selected data type, if any
    pub fn load_excel(&mut self) {
        if self.model.excel.data_type.is_some() {
            self.load_excel_preview();
        }
    }

    pub fn cycle_excel_type(&mut self) {
        let before = self.model.excel.data_type;
        self.model.excel.cycle_type();
        if self.model.excel.data_type != before {
            match self.model.excel.data_type {
                Some(_) => self.load_excel_preview(),
                None => self.model.excel.preview = None,
            }
        }
    }

    pub fn load_excel_preview(&mut self) {
        let Some(table_type) = self.model.excel.data_type else {
            return;
        };
        self.model.excel.preview_loading = true;
        let _ = self.send_request(ApiRequest::ExcelData {
            table_type: table_type.to_string(),
        });
    }

    pub(crate) fn apply_excel_data(&mut self, table_type: &str, result: Result<Value, ApiError>) {
        if self.model.excel.data_type != Some(table_type) {
            log_debug(&format!("DEBUG [Excel]: dropped preview for {}", table_type));
            return;
        }
        self.model.excel.preview_loading = false;
        self.model.excel.preview = Some(match result {
            Ok(body) => decode_preview(&body),
            Err(e) => Err(failure_notice("Error loading data", "loading data", &e)),
        });
    }

    pub fn download_template(&mut self) {
        match self.model.excel.data_type {
            Some(table_type) => self.start_download(DownloadTarget::Template {
                table_type: table_type.to_string(),
            }),
            None => self.notify("Select a table type", Severity::Warning),
        }
    }

    pub fn upload_workbook(&mut self) {
        let path = self.model.excel.upload_path.buffer.trim().to_string();
        if path.is_empty() {
            self.notify("Select an Excel file", Severity::Warning);
            return;
        }
        let Some(table_type) = self.model.excel.upload_type else {
            self.notify("Select the table type", Severity::Warning);
            return;
        };

        let _ = self.send_request(ApiRequest::ExcelUpload {
            path: PathBuf::from(path),
            table_type: table_type.to_string(),
        });
    }

    pub(crate) fn apply_excel_upload(&mut self, result: Result<ImportReport, ApiError>) {
        match result {
            Ok(report) => {
                let message = if report.message.is_empty() {
                    "File uploaded".to_string()
                } else {
                    report.message
                };
                self.notify(message, Severity::Success);
                self.model.excel.upload_path.clear();

                if !report.validation_warnings.is_empty() {
                    self.notify(
                        format!("Warnings: {}", report.validation_warnings.join(", ")),
                        Severity::Warning,
                    );
                }
                self.load_excel();
            }
            Err(e) => {
                self.notify_failure("Error processing file", "uploading file", &e);
                if let ApiError::Application { details, .. } = &e {
                    if !details.is_empty() {
                        self.notify(
                            format!("Validation errors: {}", details.join(", ")),
                            Severity::Danger,
                        );
                    }
                }
            }
        }
    }
}
