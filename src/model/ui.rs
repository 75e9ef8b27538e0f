//! UI Model
//!
//! Dialogs, popups and text entry state shared by every section.

use std::time::{Duration, Instant};

use super::entities::EntityKind;
use super::forms::RecordForm;
use super::sections::Section;

/// Quiet period after the last search keystroke before the list reloads
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Vim command state (for 'gg' double-key)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VimCommandState {
    #[default]
    None,
    WaitingForSecondG,
}

/// Where typed characters go
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Editing the active section's search filter
    Search,
    /// Editing the Excel upload path
    UploadPath,
}

/// Record waiting for the user to confirm its deletion
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmDelete {
    pub kind: EntityKind,
    pub id: u64,
    pub label: String,
}

/// Read-only popup (calendar event details)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailPopup {
    pub title: String,
    pub lines: Vec<String>,
    /// Process the "view process" action jumps to
    pub process_id: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct UiModel {
    pub vim_mode: bool,
    pub vim_command_state: VimCommandState,

    pub input_mode: InputMode,

    pub confirm_delete: Option<ConfirmDelete>,

    /// Open create/edit form
    pub form: Option<RecordForm>,

    pub detail: Option<DetailPopup>,

    /// Section whose search reload is waiting out the debounce
    pub pending_search: Option<(Section, Instant)>,

    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            vim_mode,
            vim_command_state: VimCommandState::None,
            input_mode: InputMode::Normal,
            confirm_delete: None,
            form: None,
            detail: None,
            pending_search: None,
            should_quit: false,
        }
    }

    pub fn has_modal(&self) -> bool {
        self.confirm_delete.is_some()
            || self.form.is_some()
            || self.detail.is_some()
            || self.input_mode != InputMode::Normal
    }

    pub fn close_all_modals(&mut self) {
        self.confirm_delete = None;
        self.form = None;
        self.detail = None;
        self.input_mode = InputMode::Normal;
    }

    /// Restart the search debounce for `section`
    pub fn schedule_search(&mut self, section: Section, now: Instant) {
        self.pending_search = Some((section, now + SEARCH_DEBOUNCE));
    }

    /// Take the pending search once its quiet period is over
    pub fn take_due_search(&mut self, now: Instant) -> Option<Section> {
        match self.pending_search {
            Some((section, due)) if now >= due => {
                self.pending_search = None;
                Some(section)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_model_creation() {
        let model = UiModel::new(true);
        assert!(model.vim_mode);
        assert!(!model.should_quit);
        assert!(!model.has_modal());
    }

    #[test]
    fn test_close_all_modals() {
        let mut model = UiModel::new(false);
        model.confirm_delete = Some(ConfirmDelete {
            kind: EntityKind::Supplier,
            id: 3,
            label: "ACME".to_string(),
        });
        model.input_mode = InputMode::Search;
        assert!(model.has_modal());

        model.close_all_modals();
        assert!(!model.has_modal());
    }

    #[test]
    fn test_search_debounce_restarts_on_each_keystroke() {
        let mut model = UiModel::new(false);
        let t0 = Instant::now();
        model.schedule_search(Section::Processes, t0);
        model.schedule_search(Section::Processes, t0 + Duration::from_millis(300));

        assert_eq!(model.take_due_search(t0 + Duration::from_millis(600)), None);
        assert_eq!(
            model.take_due_search(t0 + Duration::from_millis(800)),
            Some(Section::Processes)
        );
        assert_eq!(model.take_due_search(t0 + Duration::from_millis(900)), None);
    }
}
