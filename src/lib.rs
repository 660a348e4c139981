//! Local-only tracker for credit card billing cycles.
//!
//! Each card stores its active statement/due date pair plus payment state
//! for that cycle. Reads through [`Database::list_cards`] catch lapsed
//! cycles up to the caller's date and persist the advance, so the store is
//! always current as of the last time somebody looked at it. There are no
//! background jobs, and the date arithmetic in [`cycle`] never consults the
//! clock itself.
//!
//! ```
//! use cardcycle::{CardRecord, Database, PaymentStatus};
//! use chrono::NaiveDate;
//!
//! # fn main() -> cardcycle::Result<()> {
//! let mut db = Database::open_in_memory()?;
//!
//! let statement = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
//! let due = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
//! let card = CardRecord::new("Freedom".into(), statement, due, PaymentStatus::Unpaid);
//! db.insert_card(&card)?;
//!
//! // Five days past the statement date: the cycle rolls forward on read.
//! let today = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
//! let cards = db.list_cards(today)?;
//! assert_eq!(cards[0].statement_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
//! # Ok(())
//! # }
//! ```

pub mod cycle;
pub mod db;
pub mod errors;
pub mod models;

pub use cycle::NextCycle;
pub use db::{Database, StatusSummary};
pub use errors::{Error, Result};
pub use models::{CardRecord, PaymentStatus};
