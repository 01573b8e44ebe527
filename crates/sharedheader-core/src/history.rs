use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectCause {
    /// A horizontal swipe settled.
    Settle,
    /// The pager owner selected a page programmatically.
    External,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub timestamp: DateTime<Utc>,
    pub index: usize,
    pub cause: SelectCause,
}

impl SelectionRecord {
    pub fn new(index: usize, cause: SelectCause) -> Self {
        Self {
            timestamp: Utc::now(),
            index,
            cause,
        }
    }
}

/// Bounded log of selection changes, oldest first.
#[derive(Debug, Clone)]
pub struct SelectionLog {
    records: VecDeque<SelectionRecord>,
    capacity: usize,
}

impl SelectionLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, index: usize, cause: SelectCause) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(SelectionRecord::new(index, cause));
    }

    pub fn records(&self) -> Vec<SelectionRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn last(&self) -> Option<&SelectionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SelectionLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
