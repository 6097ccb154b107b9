use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{
    Cents, DueState, ValidationError, add_years, format_cents, parse_cents, parse_user_date,
};

/// Store-assigned row id.
pub type BillId = i64;

/// Number of rows generated by a monthly add request.
pub const MONTHLY_OCCURRENCES: i64 = 12;

/// Monthly rows are spaced by a fixed number of days, not by calendar months.
pub const MONTHLY_STEP_DAYS: i64 = 30;

/// Number of rows generated by an annual add request.
pub const ANNUAL_OCCURRENCES: i32 = 5;

/// How a bill was generated. Kept on every row for display and editing;
/// rows generated together are not linked to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    Single,
    Monthly,
    Annual,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Single => "single",
            Recurrence::Monthly => "monthly",
            Recurrence::Annual => "annual",
        }
    }

    /// Due dates of every row an add request with this recurrence produces.
    pub fn due_dates(&self, first: NaiveDate) -> Result<Vec<NaiveDate>, ValidationError> {
        let out_of_range = || ValidationError::DateOutOfRange(first.to_string());
        match self {
            Recurrence::Single => Ok(vec![first]),
            Recurrence::Monthly => (0..MONTHLY_OCCURRENCES)
                .map(|i| {
                    first
                        .checked_add_signed(Duration::days(MONTHLY_STEP_DAYS * i))
                        .ok_or_else(out_of_range)
                })
                .collect(),
            Recurrence::Annual => (0..ANNUAL_OCCURRENCES)
                .map(|i| add_years(first, i).ok_or_else(out_of_range))
                .collect(),
        }
    }
}

impl std::str::FromStr for Recurrence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Recurrence::Single),
            "monthly" => Ok(Recurrence::Monthly),
            "annual" => Ok(Recurrence::Annual),
            _ => Err(ValidationError::InvalidRecurrence(s.to_string())),
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Paid,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Paid => "paid",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            BillStatus::Pending => BillStatus::Paid,
            BillStatus::Paid => BillStatus::Pending,
        }
    }
}

impl std::str::FromStr for BillStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BillStatus::Pending),
            "paid" => Ok(BillStatus::Paid),
            _ => Err(ValidationError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single payable entry as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub name: String,
    pub amount_cents: Cents,
    pub due_date: NaiveDate,
    pub recurrence: Recurrence,
    pub status: BillStatus,
}

impl Bill {
    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }

    pub fn due_state(&self, today: NaiveDate) -> DueState {
        DueState::classify(self.due_date, self.status, today)
    }
}

/// Parse a user-typed amount into cents, rejecting negative values.
pub fn parse_amount(input: &str) -> Result<Cents, ValidationError> {
    let cents =
        parse_cents(input).map_err(|_| ValidationError::InvalidAmount(input.to_string()))?;
    if cents < 0 {
        return Err(ValidationError::NegativeAmount(format_cents(cents)));
    }
    Ok(cents)
}

/// Validated user input for adding or editing a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillDraft {
    pub name: String,
    pub amount_cents: Cents,
    pub due_date: NaiveDate,
    pub recurrence: Recurrence,
}

impl BillDraft {
    pub fn new(
        name: impl Into<String>,
        amount_cents: Cents,
        due_date: NaiveDate,
        recurrence: Recurrence,
    ) -> Result<Self, ValidationError> {
        let draft = Self {
            name: name.into().trim().to_string(),
            amount_cents,
            due_date,
            recurrence,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Build a draft from raw text: amount as a decimal, date as `DD/MM/YYYY`.
    pub fn parse(
        name: &str,
        amount: &str,
        due_date: &str,
        recurrence: &str,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let amount_cents = parse_amount(amount)?;
        let due_date = parse_user_date(due_date)?;
        let recurrence = recurrence.parse()?;
        Self::new(name, amount_cents, due_date, recurrence)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.amount_cents < 0 {
            return Err(ValidationError::NegativeAmount(format_cents(
                self.amount_cents,
            )));
        }
        Ok(())
    }

    /// Due dates of the rows this draft expands into.
    pub fn due_dates(&self) -> Result<Vec<NaiveDate>, ValidationError> {
        self.recurrence.due_dates(self.due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_recurrence_roundtrip() {
        for r in [Recurrence::Single, Recurrence::Monthly, Recurrence::Annual] {
            let parsed: Recurrence = r.as_str().parse().unwrap();
            assert_eq!(r, parsed);
        }
        assert_eq!("Monthly".parse::<Recurrence>(), Ok(Recurrence::Monthly));
        assert!("weekly".parse::<Recurrence>().is_err());
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(BillStatus::default(), BillStatus::Pending);
        assert_eq!(BillStatus::Pending.toggled(), BillStatus::Paid);
        assert_eq!(BillStatus::Paid.toggled(), BillStatus::Pending);
        assert_eq!("PAID".parse::<BillStatus>(), Ok(BillStatus::Paid));
    }

    #[test]
    fn test_single_expands_to_one_date() {
        let dates = Recurrence::Single.due_dates(date(2025, 3, 15)).unwrap();
        assert_eq!(dates, vec![date(2025, 3, 15)]);
    }

    #[test]
    fn test_monthly_uses_fixed_thirty_day_steps() {
        let start = date(2025, 1, 31);
        let dates = Recurrence::Monthly.due_dates(start).unwrap();

        assert_eq!(dates.len(), 12);
        assert_eq!(dates[0], start);
        assert_eq!(dates[1], date(2025, 3, 2));
        for pair in dates.windows(2) {
            assert_eq!((pair[1] - pair[0]).num_days(), 30);
        }
        assert_eq!(dates[11], start + Duration::days(330));
    }

    #[test]
    fn test_annual_keeps_month_and_day() {
        let dates = Recurrence::Annual.due_dates(date(2025, 3, 15)).unwrap();
        assert_eq!(
            dates,
            vec![
                date(2025, 3, 15),
                date(2026, 3, 15),
                date(2027, 3, 15),
                date(2028, 3, 15),
                date(2029, 3, 15),
            ]
        );
    }

    #[test]
    fn test_annual_from_leap_day() {
        let dates = Recurrence::Annual.due_dates(date(2024, 2, 29)).unwrap();
        assert_eq!(dates[1], date(2025, 2, 28));
        assert_eq!(dates[4], date(2028, 2, 29));
    }

    #[test]
    fn test_draft_parse() {
        let draft = BillDraft::parse("  Rent ", "1200,50", "05/04/2025", "monthly").unwrap();
        assert_eq!(draft.name, "Rent");
        assert_eq!(draft.amount_cents, 120050);
        assert_eq!(draft.due_date, date(2025, 4, 5));
        assert_eq!(draft.recurrence, Recurrence::Monthly);
    }

    #[test]
    fn test_draft_parse_rejects_bad_input() {
        assert_eq!(
            BillDraft::parse("", "10", "05/04/2025", "single"),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            BillDraft::parse("Water", "ten", "05/04/2025", "single"),
            Err(ValidationError::InvalidAmount("ten".into()))
        );
        assert_eq!(
            BillDraft::parse("Water", "-10", "05/04/2025", "single"),
            Err(ValidationError::NegativeAmount("-10.00".into()))
        );
        assert_eq!(
            BillDraft::parse("Water", "10", "2025-04-05", "single"),
            Err(ValidationError::InvalidDate("2025-04-05".into()))
        );
        assert!(matches!(
            BillDraft::parse("Water", "10", "05/04/2025", "weekly"),
            Err(ValidationError::InvalidRecurrence(_))
        ));
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        assert!(BillDraft::new("Free trial", 0, date(2025, 1, 1), Recurrence::Single).is_ok());
    }
}
