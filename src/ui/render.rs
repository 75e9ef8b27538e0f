use crate::App;
use ratatui::Frame;

use super::{
    calendar, dashboard, dialogs, evaluation, excel, layout, legend, nav_bar, reports,
    status_bar, table, toast,
};
use crate::model::ui::InputMode;
use crate::model::Section;

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let model = &app.model;
    let section = model.active_section();

    let legend_mode = legend::LegendMode::from_ui(&model.ui);
    let legend_height =
        legend::calculate_legend_height(size.width, section, model.ui.vim_mode, legend_mode);
    let notice_count = model.notices.visible(section).count();
    let layout_info = layout::calculate_layout(size, notice_count, legend_height);

    let badge = model.badge.label();
    nav_bar::render_nav_bar(f, layout_info.nav_area, section, badge.as_deref());

    toast::render_notices(f, layout_info.notice_area, model.notices.visible(section));

    let body = layout_info.body_area;
    match section {
        Section::Dashboard => dashboard::render_dashboard(f, body, &model.dashboard, &app.charts),
        Section::Evaluation => evaluation::render_evaluation(f, body, &model.evaluation),
        Section::Calendar => calendar::render_calendar(
            f,
            body,
            &model.calendar,
            &app.calendar_widget,
            crate::app::today(),
        ),
        Section::Excel => excel::render_excel(
            f,
            body,
            &model.excel,
            model.ui.input_mode == InputMode::UploadPath,
        ),
        Section::Reports => reports::render_reports(f, body, &model.reports, &app.charts),
        Section::Processes
        | Section::Suppliers
        | Section::Bids
        | Section::Documents
        | Section::Alerts => {
            if let (Some(kind), Some(rows)) = (section.entity(), model.table(section)) {
                let filters = table::filter_summary(kind, |key| {
                    model.view.filter(section, key).to_string()
                });
                table::render_list_section(
                    f,
                    body,
                    kind,
                    rows,
                    filters,
                    model.ui.input_mode == InputMode::Search,
                );
            }
        }
    }

    legend::render_legend(
        f,
        layout_info.legend_area,
        section,
        model.ui.vim_mode,
        legend_mode,
    );

    let list = model.table(section);
    let pager = list.and_then(|t| t.pager());
    let total = list.filter(|t| t.loaded).map(|t| t.total);
    status_bar::render_status_bar(
        f,
        layout_info.status_area,
        &model.connection,
        pager.as_ref(),
        total,
    );

    if let Some(form) = &model.ui.form {
        dialogs::render_form(f, form);
    }

    if let Some(detail) = &model.ui.detail {
        dialogs::render_detail(f, detail);
    }

    if let Some(confirm) = &model.ui.confirm_delete {
        dialogs::render_delete_confirmation(f, confirm);
    }

    if model.busy.is_visible() {
        dialogs::render_busy(f);
    }
}
