//! Keyboard Input Handler
//!
//! Modal layers get the key first (busy overlay, delete prompt, form,
//! popup, text entry), then global keys, then the active section's keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::logic::files::ReportFormat;
use crate::model::excel::ExcelField;
use crate::model::ui::{InputMode, VimCommandState};
use crate::model::Section;
use crate::App;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.model.ui.should_quit = true;
        return;
    }

    // The overlay blocks input while a mutation is running
    if app.model.busy.is_visible() {
        return;
    }

    if app.model.ui.confirm_delete.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_delete(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_delete(false),
            _ => {}
        }
        return;
    }

    if app.model.ui.form.is_some() {
        handle_form_key(app, key);
        return;
    }

    if app.model.ui.detail.is_some() {
        match key.code {
            KeyCode::Char('v') => app.view_detail_process(),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => app.model.ui.detail = None,
            _ => {}
        }
        return;
    }

    match app.model.ui.input_mode {
        InputMode::Search => {
            match key.code {
                KeyCode::Enter => app.finish_search(true),
                KeyCode::Esc => app.finish_search(false),
                KeyCode::Backspace => app.edit_search(|text| {
                    text.pop();
                }),
                KeyCode::Char(ch) => app.edit_search(|text| text.push(ch)),
                _ => {}
            }
            return;
        }
        InputMode::UploadPath => {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => app.model.ui.input_mode = InputMode::Normal,
                KeyCode::Backspace => app.model.excel.upload_path.backspace(),
                KeyCode::Char(ch) => app.model.excel.upload_path.push(ch),
                _ => {}
            }
            return;
        }
        InputMode::Normal => {}
    }

    let waiting_for_g = app.model.ui.vim_command_state == VimCommandState::WaitingForSecondG;
    app.model.ui.vim_command_state = VimCommandState::None;

    match key.code {
        KeyCode::Char('q') => {
            app.model.ui.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.next_section();
            return;
        }
        KeyCode::BackTab => {
            app.previous_section();
            return;
        }
        KeyCode::Char(ch @ '0'..='9') => {
            let index = match ch.to_digit(10) {
                Some(0) => 9,
                Some(n) => n as usize - 1,
                None => return,
            };
            if let Some(section) = Section::ALL.get(index) {
                app.activate(*section);
            }
            return;
        }
        KeyCode::Esc => {
            let section = app.model.active_section();
            app.model.notices.dismiss_latest(section);
            return;
        }
        KeyCode::Char('g') if app.model.ui.vim_mode => {
            if waiting_for_g {
                jump(app, true);
            } else {
                app.model.ui.vim_command_state = VimCommandState::WaitingForSecondG;
            }
            return;
        }
        KeyCode::Char('G') if app.model.ui.vim_mode => {
            jump(app, false);
            return;
        }
        _ => {}
    }

    match app.model.active_section() {
        Section::Dashboard => {
            if key.code == KeyCode::Char('r') {
                app.refresh_dashboard();
            }
        }
        Section::Processes
        | Section::Suppliers
        | Section::Bids
        | Section::Documents
        | Section::Alerts => handle_list_key(app, key),
        Section::Evaluation => handle_evaluation_key(app, key),
        Section::Calendar => handle_calendar_key(app, key),
        Section::Excel => handle_excel_key(app, key),
        Section::Reports => handle_reports_key(app, key),
    }
}

/// Vertical movement, honoring vim keys when enabled
fn vertical(app: &App, code: KeyCode) -> Option<isize> {
    match code {
        KeyCode::Up => Some(-1),
        KeyCode::Down => Some(1),
        KeyCode::Char('k') if app.model.ui.vim_mode => Some(-1),
        KeyCode::Char('j') if app.model.ui.vim_mode => Some(1),
        _ => None,
    }
}

/// Horizontal movement, honoring vim keys when enabled
fn horizontal(app: &App, code: KeyCode) -> Option<i32> {
    match code {
        KeyCode::Left | KeyCode::PageUp => Some(-1),
        KeyCode::Right | KeyCode::PageDown => Some(1),
        KeyCode::Char('h') if app.model.ui.vim_mode => Some(-1),
        KeyCode::Char('l') if app.model.ui.vim_mode => Some(1),
        _ => None,
    }
}

/// Jump to the first or last entry of the active list
fn jump(app: &mut App, first: bool) {
    let delta = if first { isize::MIN / 2 } else { isize::MAX / 2 };
    match app.model.active_section() {
        Section::Evaluation => app.move_evaluation_picker(delta),
        Section::Reports => app.move_reports_picker(delta),
        Section::Calendar => app.move_calendar_selection(delta),
        _ => app.move_row_selection(delta),
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    if let Some(delta) = vertical(app, key.code) {
        app.move_row_selection(delta);
        return;
    }
    if let Some(delta) = horizontal(app, key.code) {
        app.change_page(delta);
        return;
    }

    let section = app.model.active_section();
    match (section, key.code) {
        (_, KeyCode::Home) => jump(app, true),
        (_, KeyCode::End) => jump(app, false),
        (_, KeyCode::Char('r')) => app.reload_list(section),
        (_, KeyCode::Char('/')) => app.start_search(),
        (_, KeyCode::Char('f')) => app.cycle_list_filter(0),
        (_, KeyCode::Char('F')) => app.cycle_list_filter(1),
        (_, KeyCode::Char('c')) => app.clear_list_filters(),

        (Section::Alerts, KeyCode::Char('d')) => app.dismiss_selected_alert(),
        (Section::Alerts, KeyCode::Char('R')) => app.resolve_selected_alert(),
        (Section::Alerts, KeyCode::Char('C')) => app.check_deadlines(),

        (_, KeyCode::Char('n')) => app.open_create_form(),
        (_, KeyCode::Char('e')) | (_, KeyCode::Enter) => app.open_edit_form(),
        (_, KeyCode::Delete) | (_, KeyCode::Char('D')) => app.request_delete(),

        (Section::Processes, KeyCode::Char('x')) | (Section::Suppliers, KeyCode::Char('x')) => {
            app.export_active_list()
        }
        (Section::Processes, KeyCode::Char('P')) => app.export_selected_process(ReportFormat::Pdf),
        (Section::Processes, KeyCode::Char('X')) => {
            app.export_selected_process(ReportFormat::Excel)
        }
        (Section::Documents, KeyCode::Char('d')) => app.download_selected_document(),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.close_form();
        return;
    }
    if key.code == KeyCode::Enter
        || (key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        app.submit_form();
        return;
    }

    let Some(form) = app.model.ui.form.as_mut() else {
        return;
    };
    if form.loading {
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Left | KeyCode::Right => {
            if let Some(field) = form.focused_mut() {
                field.cycle(key.code == KeyCode::Right);
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = form.focused_mut() {
                if !field.is_choice() {
                    field.buffer.pop();
                }
            }
        }
        KeyCode::Char(ch) => {
            if let Some(field) = form.focused_mut() {
                if field.is_choice() {
                    if ch == ' ' {
                        field.cycle(true);
                    }
                } else {
                    field.buffer.push(ch);
                }
            }
        }
        _ => {}
    }
}

fn handle_evaluation_key(app: &mut App, key: KeyEvent) {
    if let Some(delta) = vertical(app, key.code) {
        app.move_evaluation_picker(delta);
        return;
    }
    match key.code {
        KeyCode::Enter => app.select_picked_process(),
        KeyCode::Backspace => app.deselect_evaluation_process(),
        KeyCode::Char('p') => app.cycle_evaluation_focus(),
        KeyCode::Char('R') => app.generate_ranking(),
        KeyCode::Char('r') => app.load_evaluation(),
        _ => {}
    }
}

fn handle_calendar_key(app: &mut App, key: KeyEvent) {
    if let Some(delta) = vertical(app, key.code) {
        app.move_calendar_selection(delta);
        return;
    }
    match horizontal(app, key.code) {
        Some(d) if d < 0 => {
            app.calendar_previous_month();
            return;
        }
        Some(_) => {
            app.calendar_next_month();
            return;
        }
        None => {}
    }
    match key.code {
        KeyCode::Enter => app.open_event_detail(),
        KeyCode::Char('t') => app.calendar_today(),
        KeyCode::Char('f') => app.model.calendar.cycle_filter(),
        KeyCode::Char('F') => {
            app.model.calendar.filter_focus = app.model.calendar.filter_focus.next();
        }
        KeyCode::Char('a') => app.apply_calendar_filters(),
        KeyCode::Char('r') => app.refresh_calendar(),
        _ => {}
    }
}

fn handle_excel_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Down => {
            app.model.excel.focus = app.model.excel.focus.next();
        }
        KeyCode::Enter | KeyCode::Char(' ') => match app.model.excel.focus {
            ExcelField::DataType => app.cycle_excel_type(),
            ExcelField::UploadType => app.model.excel.cycle_type(),
            ExcelField::UploadPath => app.model.ui.input_mode = InputMode::UploadPath,
        },
        KeyCode::Char('t') => app.download_template(),
        KeyCode::Char('u') => app.upload_workbook(),
        KeyCode::Char('r') => app.load_excel_preview(),
        _ => {}
    }
}

fn handle_reports_key(app: &mut App, key: KeyEvent) {
    if let Some(delta) = vertical(app, key.code) {
        app.move_reports_picker(delta);
        return;
    }
    match key.code {
        KeyCode::Enter => app.generate_analysis(),
        KeyCode::Char('r') => app.load_reports(),
        _ => {}
    }
}
