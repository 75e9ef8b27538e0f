use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, GraphType, Paragraph},
    Frame,
};

use crate::model::charts::{Canvas, ChartKind, Dataset};

const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

/// Segment lines of a doughnut: label, share and a proportional bar
pub fn segment_lines(dataset: &Dataset, bar_width: usize) -> Vec<Line<'static>> {
    let segments = dataset.segments();
    let total: f64 = segments.iter().map(|(_, v)| v).sum();

    segments
        .into_iter()
        .enumerate()
        .map(|(idx, (label, value))| {
            let share = if total > 0.0 { value / total } else { 0.0 };
            let filled = (share * bar_width as f64).round() as usize;
            Line::from(vec![
                Span::styled("█".repeat(filled), Style::default().fg(PALETTE[idx % PALETTE.len()])),
                Span::raw(format!(" {} {} ({:.0}%)", label, value, share * 100.0)),
            ])
        })
        .collect()
}

fn render_bars(f: &mut Frame, area: Rect, dataset: &Dataset, block: Block) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let per_label = dataset.series.len().max(1) + 1;
    let bar_width = (inner_width / (dataset.labels.len().max(1) * per_label)).clamp(1, 8) as u16;

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .group_gap(1);

    for (idx, label) in dataset.labels.iter().enumerate() {
        let bars: Vec<Bar> = dataset
            .series
            .iter()
            .enumerate()
            .map(|(series_idx, series)| {
                let value = series.values.get(idx).copied().unwrap_or(0.0);
                Bar::default()
                    .value(value.max(0.0).round() as u64)
                    .style(Style::default().fg(PALETTE[series_idx % PALETTE.len()]))
            })
            .collect();
        let short: String = label.chars().take(bar_width as usize * per_label).collect();
        chart = chart.data(BarGroup::default().label(Line::from(short)).bars(&bars));
    }

    f.render_widget(chart, area);
}

fn render_line(f: &mut Frame, area: Rect, dataset: &Dataset, block: Block) {
    let series_points: Vec<Vec<(f64, f64)>> = dataset
        .series
        .iter()
        .map(|s| s.values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect())
        .collect();

    let max_y = series_points
        .iter()
        .flatten()
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let max_x = dataset.labels.len().saturating_sub(1).max(1) as f64;

    let datasets = dataset
        .series
        .iter()
        .zip(series_points.iter())
        .enumerate()
        .map(|(idx, (series, points))| {
            ratatui::widgets::Dataset::default()
                .name(series.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(PALETTE[idx % PALETTE.len()]))
                .data(points)
        })
        .collect::<Vec<_>>();

    let x_labels = match (dataset.labels.first(), dataset.labels.last()) {
        (Some(first), Some(last)) => vec![Span::raw(first.clone()), Span::raw(last.clone())],
        _ => Vec::new(),
    };

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(Axis::default().bounds([0.0, max_x]).labels(x_labels))
        .y_axis(
            Axis::default()
                .bounds([0.0, max_y])
                .labels(vec![Span::raw("0"), Span::raw(format!("{:.0}", max_y))]),
        );

    f.render_widget(chart, area);
}

/// Draw the chart instance of `canvas`, or a placeholder when it has none
pub fn render_chart(f: &mut Frame, area: Rect, canvas: Canvas, dataset: Option<&Dataset>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", canvas.title()))
        .border_style(Style::default().fg(Color::Cyan));

    let Some(dataset) = dataset.filter(|d| !d.is_empty()) else {
        f.render_widget(
            Paragraph::new(Span::styled("No data", Style::default().fg(Color::DarkGray)))
                .block(block),
            area,
        );
        return;
    };

    match dataset.kind {
        ChartKind::Doughnut => {
            let bar_width = (area.width as usize).saturating_sub(30).clamp(1, 30);
            f.render_widget(Paragraph::new(segment_lines(dataset, bar_width)).block(block), area);
        }
        ChartKind::Bar => render_bars(f, area, dataset, block),
        ChartKind::Line => render_line(f, area, dataset, block),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_lines_show_share() {
        let data = Dataset::single(
            ChartKind::Doughnut,
            "Processes",
            vec![("active".to_string(), 3.0), ("draft".to_string(), 1.0)],
        );
        let lines = segment_lines(&data, 8);
        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(first, "██████ active 3 (75%)");
    }
}
