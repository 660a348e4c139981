use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cycle;
use crate::errors::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "Unpaid",
            Self::Pending => "Pending",
            Self::Paid => "Paid",
        }
    }

    /// Unknown strings decode to `Unpaid`, the state every new cycle
    /// starts in.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "paid" => Self::Paid,
            "pending" => Self::Pending,
            _ => Self::Unpaid,
        }
    }

    pub fn all() -> &'static [PaymentStatus] {
        &[Self::Unpaid, Self::Pending, Self::Paid]
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked card with its currently active billing cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: Option<i64>,
    pub nickname: String,
    pub statement_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub due_amount: Decimal,
    pub credit_limit: Decimal,
    pub remarks: String,
    pub created_at: NaiveDate,
}

impl CardRecord {
    pub fn new(
        nickname: String,
        statement_date: NaiveDate,
        due_date: NaiveDate,
        status: PaymentStatus,
    ) -> Self {
        Self {
            id: None,
            nickname,
            statement_date,
            due_date,
            status,
            due_amount: Decimal::ZERO,
            credit_limit: Decimal::ZERO,
            remarks: String::new(),
            created_at: chrono::Utc::now().date_naive(),
        }
    }

    /// Day of month the statement closes, read off the active statement
    /// date.
    pub fn statement_day(&self) -> u32 {
        self.statement_date.day()
    }

    /// Grace period in days between statement and due date, read off the
    /// active pair.
    pub fn payment_offset_days(&self) -> i64 {
        (self.due_date - self.statement_date).num_days()
    }

    /// Whether the active cycle has lapsed as of `today`. The statement
    /// day itself still belongs to the current cycle.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        cycle::is_stale(self.statement_date, today)
    }

    pub fn validate(&self) -> Result<()> {
        cycle::validate_date_order(self.statement_date, self.due_date)
    }

    /// Advance a lapsed cycle to its next statement/due pair, resetting the
    /// payment state for the fresh cycle. Returns whether anything changed.
    pub fn roll_forward(&mut self, today: NaiveDate) -> Result<bool> {
        if !self.is_stale(today) {
            return Ok(false);
        }
        let next = cycle::next_cycle(self.statement_day(), self.payment_offset_days(), today)?;
        self.statement_date = next.statement_date;
        self.due_date = next.due_date;
        self.status = PaymentStatus::Unpaid;
        self.due_amount = Decimal::ZERO;
        Ok(true)
    }
}
