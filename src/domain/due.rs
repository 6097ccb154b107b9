use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BillStatus;

/// Where a bill stands relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueState {
    /// Pending and the due date has passed
    Overdue,
    /// Pending and due today
    DueToday,
    /// Pending and due in the future
    Upcoming,
    /// Paid; the due date no longer matters
    Settled,
}

impl DueState {
    pub fn classify(due_date: NaiveDate, status: BillStatus, today: NaiveDate) -> Self {
        if status == BillStatus::Paid {
            return DueState::Settled;
        }

        match due_date.cmp(&today) {
            std::cmp::Ordering::Less => DueState::Overdue,
            std::cmp::Ordering::Equal => DueState::DueToday,
            std::cmp::Ordering::Greater => DueState::Upcoming,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DueState::Overdue => "overdue",
            DueState::DueToday => "due today",
            DueState::Upcoming => "upcoming",
            DueState::Settled => "settled",
        }
    }
}

impl std::fmt::Display for DueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
