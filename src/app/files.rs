//! Downloads
//!
//! Files land in the download directory under the server-suggested name, or
//! a locally built one. Existing files are never overwritten.

use std::path::PathBuf;

use crate::api::{ApiError, DownloadedFile};
use crate::log_debug;
use crate::logic::files::{available_path, resolve_file_name, DownloadTarget, ReportFormat};
use crate::model::{Section, Severity};
use crate::services::api::ApiRequest;
use crate::App;

impl App {
    pub fn start_download(&mut self, target: DownloadTarget) {
        let _ = self.send_request(ApiRequest::Download { target });
    }

    /// Export the active list section (processes or suppliers)
    pub fn export_active_list(&mut self) {
        match self.model.active_section() {
            Section::Processes => self.start_download(DownloadTarget::ProcessesExport),
            Section::Suppliers => self.start_download(DownloadTarget::SuppliersExport),
            _ => {}
        }
    }

    /// Per-process report for the selected process row
    pub fn export_selected_process(&mut self, format: ReportFormat) {
        if !self.model.view.is_active(Section::Processes) {
            return;
        }
        let Some(process_id) = self
            .model
            .table(Section::Processes)
            .and_then(|t| t.selected_row())
            .map(|row| row.id)
        else {
            return;
        };
        self.start_download(DownloadTarget::ProcessReport { process_id, format });
    }

    pub fn download_selected_document(&mut self) {
        if !self.model.view.is_active(Section::Documents) {
            return;
        }
        if let Some(document_id) = self
            .model
            .table(Section::Documents)
            .and_then(|t| t.selected_row())
            .map(|row| row.id)
        {
            self.start_download(DownloadTarget::Document { document_id });
        }
    }

    fn write_download(&self, target: &DownloadTarget, file: &DownloadedFile) -> std::io::Result<PathBuf> {
        let name = resolve_file_name(target, file.suggested_name.as_deref(), crate::app::today());
        std::fs::create_dir_all(&self.download_dir)?;
        let path = available_path(&self.download_dir, &name, |p| p.exists());
        std::fs::write(&path, &file.bytes)?;
        Ok(path)
    }

    pub(crate) fn apply_download(
        &mut self,
        target: DownloadTarget,
        result: Result<DownloadedFile, ApiError>,
    ) {
        let (failed, doing, done) = target.wording();

        let file = match result {
            Ok(file) => file,
            Err(e) => {
                self.notify_failure(&failed, &doing, &e);
                return;
            }
        };

        match self.write_download(&target, &file) {
            Ok(path) => {
                log_debug(&format!("DEBUG [Files]: wrote {} bytes to {}", file.bytes.len(), path.display()));
                self.notify(format!("{}: {}", done, path.display()), Severity::Success);
            }
            Err(e) => {
                self.notify(format!("{}: cannot write file ({})", failed, e), Severity::Danger);
            }
        }
    }
}
