//! Notification surface
//!
//! Notices belong to the section that was active when they were raised and
//! are only drawn there. They expire after five seconds unless the user
//! dismissed them first.

use std::time::{Duration, Instant};

use super::sections::Section;

pub const NOTICE_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
    pub section: Section,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a notice at the top of `section`
    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        section: Section,
        now: Instant,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.insert(
            0,
            Notice {
                id,
                message: message.into(),
                severity,
                created_at: now,
                section,
            },
        );
        id
    }

    /// Remove a notice if it is still present
    pub fn dismiss(&mut self, id: u64) -> bool {
        match self.notices.iter().position(|n| n.id == id) {
            Some(idx) => {
                self.notices.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Dismiss the newest notice of `section`, if any
    pub fn dismiss_latest(&mut self, section: Section) -> bool {
        let latest = self.visible(section).next().map(|n| n.id);
        match latest {
            Some(id) => self.dismiss(id),
            None => false,
        }
    }

    /// Drop every notice older than the TTL; returns how many were removed
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.notices.len();
        self.notices
            .retain(|n| now.saturating_duration_since(n.created_at) < NOTICE_TTL);
        before - self.notices.len()
    }

    /// Notices drawn inside `section`, newest first
    pub fn visible(&self, section: Section) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(move |n| n.section == section)
    }

    pub fn all(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
