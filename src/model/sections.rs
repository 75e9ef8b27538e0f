//! Sections and view state
//!
//! `ViewState` is the single owner of which section is active, which page
//! each list section shows and which filters it applies. All mutation goes
//! through its methods.

use std::collections::{BTreeMap, HashMap};

use super::entities::EntityKind;

/// Top-level sections, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Dashboard,
    Processes,
    Suppliers,
    Bids,
    Evaluation,
    Documents,
    Alerts,
    Calendar,
    Excel,
    Reports,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Dashboard,
        Section::Processes,
        Section::Suppliers,
        Section::Bids,
        Section::Evaluation,
        Section::Documents,
        Section::Alerts,
        Section::Calendar,
        Section::Excel,
        Section::Reports,
    ];

    /// Stable identifier used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Processes => "processes",
            Section::Suppliers => "suppliers",
            Section::Bids => "bids",
            Section::Evaluation => "evaluation",
            Section::Documents => "documents",
            Section::Alerts => "alerts",
            Section::Calendar => "calendar",
            Section::Excel => "excel",
            Section::Reports => "reports",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Processes => "Processes",
            Section::Suppliers => "Suppliers",
            Section::Bids => "Bids",
            Section::Evaluation => "Evaluation",
            Section::Documents => "Documents",
            Section::Alerts => "Alerts",
            Section::Calendar => "Calendar",
            Section::Excel => "Excel",
            Section::Reports => "Reports",
        }
    }

    /// Look a section up by name, `None` for anything unknown
    pub fn from_name(name: &str) -> Option<Section> {
        let name = name.trim().to_ascii_lowercase();
        Section::ALL.iter().copied().find(|s| s.name() == name)
    }

    /// Entity listed by this section, if it is a paginated list section
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            Section::Processes => Some(EntityKind::Process),
            Section::Suppliers => Some(EntityKind::Supplier),
            Section::Bids => Some(EntityKind::Bid),
            Section::Documents => Some(EntityKind::Document),
            Section::Alerts => Some(EntityKind::Alert),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        Section::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Section {
        Section::ALL[(self.index() + 1) % Section::ALL.len()]
    }

    pub fn previous(&self) -> Section {
        Section::ALL[(self.index() + Section::ALL.len() - 1) % Section::ALL.len()]
    }
}

/// Process-wide view state
#[derive(Clone, Debug)]
pub struct ViewState {
    active: Section,
    pages: HashMap<Section, u32>,
    filters: HashMap<Section, BTreeMap<String, String>>,
    /// Generation per section; responses carrying an older ticket are stale
    tickets: HashMap<Section, u64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            active: Section::Dashboard,
            pages: HashMap::new(),
            filters: HashMap::new(),
            tickets: HashMap::new(),
        }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active == section
    }

    /// Record `section` as the only visible one
    pub fn activate(&mut self, section: Section) {
        self.active = section;
    }

    /// Current page of a section, 1 when never paged
    pub fn page(&self, section: Section) -> u32 {
        self.pages.get(&section).copied().unwrap_or(1)
    }

    pub fn set_page(&mut self, section: Section, page: u32) {
        self.pages.insert(section, page.max(1));
    }

    pub fn filters(&self, section: Section) -> BTreeMap<String, String> {
        self.filters.get(&section).cloned().unwrap_or_default()
    }

    pub fn filter(&self, section: Section, key: &str) -> &str {
        self.filters
            .get(&section)
            .and_then(|f| f.get(key))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_filter(&mut self, section: Section, key: &str, value: &str) {
        self.filters
            .entry(section)
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Start a new fetch generation for `section` and return its ticket
    pub fn next_ticket(&mut self, section: Section) -> u64 {
        let ticket = self.tickets.entry(section).or_insert(0);
        *ticket += 1;
        *ticket
    }

    /// Whether a response for `section` tagged with `ticket` may still render
    pub fn is_current(&self, section: Section, ticket: u64) -> bool {
        self.active == section && self.tickets.get(&section).copied() == Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Section::from_name("suppliers"), Some(Section::Suppliers));
        assert_eq!(Section::from_name(" Calendar "), Some(Section::Calendar));
        assert_eq!(Section::from_name("settings"), None);
        assert_eq!(Section::from_name(""), None);
    }

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Section::Reports.next(), Section::Dashboard);
        assert_eq!(Section::Dashboard.previous(), Section::Reports);
        assert_eq!(Section::Bids.next(), Section::Evaluation);
    }

    #[test]
    fn test_list_sections() {
        let lists: Vec<_> = Section::ALL.iter().filter(|s| s.entity().is_some()).collect();
        assert_eq!(lists.len(), 5);
        assert!(Section::Evaluation.entity().is_none());
    }

    #[test]
    fn test_default_page_is_one() {
        let mut view = ViewState::new();
        assert_eq!(view.page(Section::Bids), 1);
        view.set_page(Section::Bids, 0);
        assert_eq!(view.page(Section::Bids), 1);
        view.set_page(Section::Bids, 4);
        assert_eq!(view.page(Section::Bids), 4);
        assert_eq!(view.page(Section::Suppliers), 1);
    }

    #[test]
    fn test_stale_ticket_is_not_current() {
        let mut view = ViewState::new();
        view.activate(Section::Processes);
        let first = view.next_ticket(Section::Processes);
        let second = view.next_ticket(Section::Processes);
        assert!(!view.is_current(Section::Processes, first));
        assert!(view.is_current(Section::Processes, second));

        view.activate(Section::Suppliers);
        assert!(!view.is_current(Section::Processes, second));
    }

    #[test]
    fn test_filters_per_section() {
        let mut view = ViewState::new();
        view.set_filter(Section::Processes, "search", "paper");
        assert_eq!(view.filter(Section::Processes, "search"), "paper");
        assert_eq!(view.filter(Section::Suppliers, "search"), "");
        assert_eq!(view.filters(Section::Processes).len(), 1);
    }
}
