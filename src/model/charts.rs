//! Chart capability
//!
//! Charts are stateful instances owned one per canvas. The coordinator only
//! hands datasets to a `ChartBackend` and keeps the returned surface; before a
//! canvas is drawn again its previous surface is disposed.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Drawing areas that host a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Canvas {
    ProcessStatus,
    Savings,
    TopSuppliers,
    MonthlyTrends,
    ReportTrends,
}

impl Canvas {
    pub fn title(&self) -> &'static str {
        match self {
            Canvas::ProcessStatus => "Processes by status",
            Canvas::Savings => "Savings by process",
            Canvas::TopSuppliers => "Top suppliers",
            Canvas::MonthlyTrends => "Monthly trends",
            Canvas::ReportTrends => "Process trends",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl Dataset {
    /// Dataset with one series built from `(label, value)` points
    pub fn single(kind: ChartKind, series_label: &str, points: Vec<(String, f64)>) -> Self {
        let (labels, values) = points.into_iter().unzip();
        Self {
            kind,
            labels,
            series: vec![Series {
                label: series_label.to_string(),
                values,
            }],
        }
    }

    /// `(label, value)` pairs of the first series
    pub fn segments(&self) -> Vec<(String, f64)> {
        match self.series.first() {
            Some(series) => self
                .labels
                .iter()
                .cloned()
                .zip(series.values.iter().copied())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A live chart instance
pub trait ChartSurface {
    fn canvas(&self) -> Canvas;
    fn dataset(&self) -> &Dataset;
    /// Release the instance; it must not be used afterwards
    fn dispose(self: Box<Self>);
}

/// Something that can turn a dataset into a live chart
pub trait ChartBackend {
    fn render(&mut self, canvas: Canvas, dataset: Dataset) -> Box<dyn ChartSurface>;
}

/// Backend whose surfaces are drawn by the terminal renderer every frame
#[derive(Debug, Default)]
pub struct TerminalCharts {
    live: Arc<AtomicUsize>,
}

impl TerminalCharts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter of instances created and not yet disposed
    pub fn live_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.live)
    }
}

struct TerminalChart {
    canvas: Canvas,
    dataset: Dataset,
    live: Arc<AtomicUsize>,
}

impl ChartSurface for TerminalChart {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn dispose(self: Box<Self>) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ChartBackend for TerminalCharts {
    fn render(&mut self, canvas: Canvas, dataset: Dataset) -> Box<dyn ChartSurface> {
        self.live.fetch_add(1, Ordering::SeqCst);
        Box::new(TerminalChart {
            canvas,
            dataset,
            live: Arc::clone(&self.live),
        })
    }
}

/// Chart instances keyed by canvas
pub struct ChartBoard {
    backend: Box<dyn ChartBackend>,
    instances: BTreeMap<Canvas, Box<dyn ChartSurface>>,
}

impl fmt::Debug for ChartBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartBoard")
            .field("canvases", &self.instances.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ChartBoard {
    pub fn new(backend: Box<dyn ChartBackend>) -> Self {
        Self {
            backend,
            instances: BTreeMap::new(),
        }
    }

    /// Draw `dataset` on `canvas`, disposing the previous instance first
    pub fn render(&mut self, canvas: Canvas, dataset: Dataset) {
        self.dispose(canvas);
        let surface = self.backend.render(canvas, dataset);
        self.instances.insert(canvas, surface);
    }

    pub fn dispose(&mut self, canvas: Canvas) {
        if let Some(previous) = self.instances.remove(&canvas) {
            crate::log_debug(&format!("DEBUG [Charts]: disposing {:?}", previous.canvas()));
            previous.dispose();
        }
    }

    pub fn dataset(&self, canvas: Canvas) -> Option<&Dataset> {
        self.instances.get(&canvas).map(|surface| surface.dataset())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> Dataset {
        Dataset::single(
            ChartKind::Bar,
            "count",
            (0..n).map(|i| (format!("m{}", i), i as f64)).collect(),
        )
    }

    #[test]
    fn test_rerender_disposes_previous_instance() {
        let backend = TerminalCharts::new();
        let live = backend.live_counter();
        let mut board = ChartBoard::new(Box::new(backend));

        for n in 1..5 {
            board.render(Canvas::MonthlyTrends, dataset(n));
            assert_eq!(live.load(Ordering::SeqCst), 1);
        }
        assert_eq!(board.dataset(Canvas::MonthlyTrends).unwrap().labels.len(), 4);
    }

    #[test]
    fn test_canvases_are_independent() {
        let backend = TerminalCharts::new();
        let live = backend.live_counter();
        let mut board = ChartBoard::new(Box::new(backend));

        board.render(Canvas::ProcessStatus, dataset(2));
        board.render(Canvas::Savings, dataset(3));
        board.render(Canvas::ProcessStatus, dataset(1));

        assert_eq!(live.load(Ordering::SeqCst), 2);
        assert_eq!(board.len(), 2);

        board.dispose(Canvas::Savings);
        board.dispose(Canvas::Savings);
        assert_eq!(live.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_segments() {
        let data = Dataset::single(
            ChartKind::Doughnut,
            "Processes",
            vec![("active".to_string(), 3.0), ("draft".to_string(), 2.0)],
        );
        assert_eq!(
            data.segments(),
            vec![("active".to_string(), 3.0), ("draft".to_string(), 2.0)]
        );
    }
}
