use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Bill, Cents, DueState};

/// Counts and totals of a bill list, grouped by due state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueSummary {
    pub as_of: NaiveDate,
    pub overdue: usize,
    pub due_today: usize,
    pub upcoming: usize,
    pub settled: usize,
    pub overdue_total: Cents,
    pub pending_total: Cents,
    pub paid_total: Cents,
}

impl DueSummary {
    pub fn from_bills(bills: &[Bill], today: NaiveDate) -> Self {
        let mut summary = DueSummary {
            as_of: today,
            overdue: 0,
            due_today: 0,
            upcoming: 0,
            settled: 0,
            overdue_total: 0,
            pending_total: 0,
            paid_total: 0,
        };

        for bill in bills {
            match bill.due_state(today) {
                DueState::Overdue => {
                    summary.overdue += 1;
                    summary.overdue_total += bill.amount_cents;
                    summary.pending_total += bill.amount_cents;
                }
                DueState::DueToday => {
                    summary.due_today += 1;
                    summary.pending_total += bill.amount_cents;
                }
                DueState::Upcoming => {
                    summary.upcoming += 1;
                    summary.pending_total += bill.amount_cents;
                }
                DueState::Settled => {
                    summary.settled += 1;
                    summary.paid_total += bill.amount_cents;
                }
            }
        }

        summary
    }

    pub fn pending(&self) -> usize {
        self.overdue + self.due_today + self.upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillStatus, Recurrence};
    use chrono::Duration;

    fn bill(id: i64, amount_cents: Cents, due_date: NaiveDate, status: BillStatus) -> Bill {
        Bill {
            id,
            name: format!("bill-{id}"),
            amount_cents,
            due_date,
            recurrence: Recurrence::Single,
            status,
        }
    }

    #[test]
    fn test_summary_groups_by_state() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let bills = vec![
            bill(1, 1000, today - Duration::days(3), BillStatus::Pending),
            bill(2, 2000, today, BillStatus::Pending),
            bill(3, 3000, today + Duration::days(3), BillStatus::Pending),
            bill(4, 4000, today - Duration::days(3), BillStatus::Paid),
        ];

        let summary = DueSummary::from_bills(&bills, today);
        assert_eq!(summary.overdue, 1);
        assert_eq!(summary.due_today, 1);
        assert_eq!(summary.upcoming, 1);
        assert_eq!(summary.settled, 1);
        assert_eq!(summary.pending(), 3);
        assert_eq!(summary.overdue_total, 1000);
        assert_eq!(summary.pending_total, 6000);
        assert_eq!(summary.paid_total, 4000);
    }

    #[test]
    fn test_empty_summary() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let summary = DueSummary::from_bills(&[], today);
        assert_eq!(summary.pending(), 0);
        assert_eq!(summary.pending_total, 0);
    }
}
