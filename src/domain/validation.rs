use thiserror::Error;

/// Input rejected before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Bill name must not be empty")]
    EmptyName,

    #[error("Invalid amount '{0}'. Use a number such as '50.00' or '50'")]
    InvalidAmount(String),

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),

    #[error("Invalid date '{0}'. Use DD/MM/YYYY")]
    InvalidDate(String),

    #[error("Invalid recurrence '{0}'. Valid values: single, monthly, annual")]
    InvalidRecurrence(String),

    #[error("Invalid status '{0}'. Valid values: pending, paid")]
    InvalidStatus(String),

    #[error("Start date {start} is after end date {end}")]
    InvalidRange { start: String, end: String },

    #[error("Due date {0} is out of range for this recurrence")]
    DateOutOfRange(String),
}
