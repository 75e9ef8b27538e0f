//! Record forms and deletion
//!
//! Mutations share one shape: busy overlay up, request, notice, close the
//! form, reload the current page of the list, overlay down. The worker
//! releases the overlay on every exit path.

use serde_json::Value;

use crate::api::ApiError;
use crate::log_debug;
use crate::model::forms::RecordForm;
use crate::model::ui::ConfirmDelete;
use crate::model::{EntityKind, Severity};
use crate::services::api::ApiRequest;
use crate::App;

impl App {
    fn active_entity(&self) -> Option<EntityKind> {
        self.model.active_section().entity()
    }

    fn selected_record(&self) -> Option<(EntityKind, u64, String)> {
        let kind = self.active_entity()?;
        let row = self.model.table(kind.section())?.selected_row()?;
        let label = row.cells.first().cloned().unwrap_or_default();
        Some((kind, row.id, label))
    }

    /// Open an empty form for the active list section
    pub fn open_create_form(&mut self) {
        let Some(kind) = self.active_entity() else {
            return;
        };
        if !kind.can_create() {
            self.notify(
                format!("New {}s cannot be created from the console", kind.noun()),
                Severity::Info,
            );
            return;
        }
        self.model.ui.form = Some(RecordForm::new_record(kind));
    }

    /// Open the edit form for the selected row and fetch the record
    pub fn open_edit_form(&mut self) {
        let Some((kind, id, _)) = self.selected_record() else {
            return;
        };
        if !kind.can_edit() {
            return;
        }
        self.model.ui.form = Some(RecordForm::pending_edit(kind, id));
        let _ = self.send_request(ApiRequest::FetchRecord { kind, id });
    }

    pub(crate) fn apply_record(&mut self, kind: EntityKind, id: u64, result: Result<Value, ApiError>) {
        let waiting = self
            .model
            .ui
            .form
            .as_ref()
            .is_some_and(|f| f.kind == kind && f.record_id == Some(id) && f.loading);

        if !waiting {
            log_debug(&format!("DEBUG [Records]: dropped {} {} for a closed form", kind.noun(), id));
            return;
        }

        match result {
            Ok(record) => {
                if let Some(form) = self.model.ui.form.as_mut() {
                    form.populate(&record);
                }
            }
            Err(e) => {
                self.model.ui.form = None;
                self.notify_failure(
                    &format!("Error loading {}", kind.noun()),
                    &format!("loading {}", kind.noun()),
                    &e,
                );
            }
        }
    }

    pub fn close_form(&mut self) {
        self.model.ui.form = None;
    }

    /// Validate the open form and send it
    pub fn submit_form(&mut self) {
        let Some(form) = self.model.ui.form.as_ref() else {
            return;
        };
        if form.loading {
            return;
        }

        let kind = form.kind;
        let id = form.record_id;
        match form.payload() {
            Ok(payload) => {
                let _ = self.send_request(ApiRequest::SaveRecord { kind, id, payload });
            }
            Err(e) => self.notify(e.message, Severity::Warning),
        }
    }

    pub(crate) fn apply_saved(
        &mut self,
        kind: EntityKind,
        id: Option<u64>,
        result: Result<Value, ApiError>,
    ) {
        match result {
            Ok(_) => {
                let verb = if id.is_some() { "updated" } else { "created" };
                self.notify(format!("{} {}", kind.title(), verb), Severity::Success);

                if self
                    .model
                    .ui
                    .form
                    .as_ref()
                    .is_some_and(|f| f.kind == kind && f.record_id == id)
                {
                    self.model.ui.form = None;
                }
                self.reload_list(kind.section());
            }
            Err(e) => self.notify_failure(
                &format!("Error saving {}", kind.noun()),
                &format!("saving {}", kind.noun()),
                &e,
            ),
        }
    }

    /// Ask for confirmation before deleting the selected row
    pub fn request_delete(&mut self) {
        let Some((kind, id, label)) = self.selected_record() else {
            return;
        };
        if !kind.can_delete() {
            return;
        }
        self.model.ui.confirm_delete = Some(ConfirmDelete { kind, id, label });
    }

    /// Answer the delete prompt; declining sends nothing
    pub fn answer_delete(&mut self, accepted: bool) {
        let Some(confirm) = self.model.ui.confirm_delete.take() else {
            return;
        };
        if accepted {
            let _ = self.send_request(ApiRequest::DeleteRecord {
                kind: confirm.kind,
                id: confirm.id,
            });
        }
    }

    pub(crate) fn apply_deleted(&mut self, kind: EntityKind, result: Result<Value, ApiError>) {
        match result {
            Ok(_) => {
                self.notify(format!("{} deleted", kind.title()), Severity::Success);
                self.reload_list(kind.section());
            }
            Err(e) => self.notify_failure(
                &format!("Error deleting {}", kind.noun()),
                &format!("deleting {}", kind.noun()),
                &e,
            ),
        }
    }
}
