mod schema;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::cycle;
use crate::errors::{Error, Result};
use crate::models::{CardRecord, PaymentStatus};

/// Card counts bucketed by payment status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub total: i64,
    pub unpaid: i64,
    pub pending: i64,
    pub paid: i64,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        tracing::debug!("Opened card store at {}", path.display());
        Ok(db)
    }

    /// Ephemeral store, used by tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Conventional on-disk location for the card store, creating the data
    /// directory if it does not exist yet.
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = directories::ProjectDirs::from("com", "cardcycle", "CardCycle")
            .ok_or(Error::DataDir)?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        Ok(data_dir.join("cardcycle.db"))
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Cards ─────────────────────────────────────────────────

    pub fn insert_card(&self, card: &CardRecord) -> Result<i64> {
        card.validate()?;
        self.conn.execute(
            "INSERT INTO cards (nickname, statement_date, due_date, payment_status, due_amount, credit_limit, remarks, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                card.nickname,
                card.statement_date,
                card.due_date,
                card.status.as_str(),
                card.due_amount.to_string(),
                card.credit_limit.to_string(),
                card.remarks,
                card.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// The stored row, exactly as written. Does not advance lapsed cycles;
    /// use `list_cards` for the caught-up view.
    pub fn get_card(&self, id: i64) -> Result<Option<CardRecord>> {
        let result = self.conn.query_row(
            "SELECT id, nickname, statement_date, due_date, payment_status, due_amount, credit_limit, remarks, created_at
             FROM cards WHERE id = ?1",
            params![id],
            |row| {
                let amount_str: String = row.get(5)?;
                let limit_str: String = row.get(6)?;
                Ok(CardRecord {
                    id: Some(row.get(0)?),
                    nickname: row.get(1)?,
                    statement_date: row.get(2)?,
                    due_date: row.get(3)?,
                    status: PaymentStatus::parse(&row.get::<_, String>(4)?),
                    due_amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                    credit_limit: Decimal::from_str(&limit_str).unwrap_or_default(),
                    remarks: row.get(7)?,
                    created_at: row.get(8)?,
                })
            },
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Every card, caught up to `today`. Lapsed cycles are advanced and the
    /// new statement/due pair persisted before the rows are returned, so two
    /// calls on the same day see the same state. A card whose next cycle
    /// cannot be computed is returned as stored and skipped with a warning
    /// rather than failing the whole listing.
    pub fn list_cards(&mut self, today: NaiveDate) -> Result<Vec<CardRecord>> {
        let tx = self.conn.transaction()?;
        let mut cards = {
            let mut stmt = tx.prepare(
                "SELECT id, nickname, statement_date, due_date, payment_status, due_amount, credit_limit, remarks, created_at
                 FROM cards ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| {
                let amount_str: String = row.get(5)?;
                let limit_str: String = row.get(6)?;
                Ok(CardRecord {
                    id: Some(row.get(0)?),
                    nickname: row.get(1)?,
                    statement_date: row.get(2)?,
                    due_date: row.get(3)?,
                    status: PaymentStatus::parse(&row.get::<_, String>(4)?),
                    due_amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                    credit_limit: Decimal::from_str(&limit_str).unwrap_or_default(),
                    remarks: row.get(7)?,
                    created_at: row.get(8)?,
                })
            })?;
            rows.collect::<std::result::Result<Vec<_>, _>>()?
        };

        let mut rolled = 0;
        for card in &mut cards {
            match card.roll_forward(today) {
                Ok(true) => {
                    tx.execute(
                        "UPDATE cards SET statement_date = ?1, due_date = ?2, payment_status = ?3, due_amount = ?4
                         WHERE id = ?5",
                        params![
                            card.statement_date,
                            card.due_date,
                            card.status.as_str(),
                            card.due_amount.to_string(),
                            card.id,
                        ],
                    )?;
                    rolled += 1;
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(
                        "Skipping cycle advance for card {}: {e}",
                        card.id.unwrap_or_default()
                    );
                }
            }
        }

        tx.commit()?;
        if rolled > 0 {
            tracing::debug!("Advanced {rolled} lapsed card cycles");
        }
        Ok(cards)
    }

    /// What `list_cards` would return for `today`, without writing anything
    /// back. Lapsed cycles are advanced in memory only.
    pub fn preview_cards(&self, today: NaiveDate) -> Result<Vec<CardRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, nickname, statement_date, due_date, payment_status, due_amount, credit_limit, remarks, created_at
             FROM cards ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(5)?;
            let limit_str: String = row.get(6)?;
            Ok(CardRecord {
                id: Some(row.get(0)?),
                nickname: row.get(1)?,
                statement_date: row.get(2)?,
                due_date: row.get(3)?,
                status: PaymentStatus::parse(&row.get::<_, String>(4)?),
                due_amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                credit_limit: Decimal::from_str(&limit_str).unwrap_or_default(),
                remarks: row.get(7)?,
                created_at: row.get(8)?,
            })
        })?;
        let mut cards: Vec<CardRecord> = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        for card in &mut cards {
            if let Err(e) = card.roll_forward(today) {
                tracing::warn!(
                    "Skipping cycle advance for card {}: {e}",
                    card.id.unwrap_or_default()
                );
            }
        }

        Ok(cards)
    }

    /// Replace the core fields of a card. `due_amount` is only written when
    /// given; otherwise the stored amount stays.
    pub fn update_card(
        &self,
        id: i64,
        nickname: &str,
        statement_date: NaiveDate,
        due_date: NaiveDate,
        status: PaymentStatus,
        due_amount: Option<Decimal>,
    ) -> Result<()> {
        cycle::validate_date_order(statement_date, due_date)?;
        let changed = if let Some(amount) = due_amount {
            self.conn.execute(
                "UPDATE cards SET nickname = ?1, statement_date = ?2, due_date = ?3, payment_status = ?4, due_amount = ?5
                 WHERE id = ?6",
                params![
                    nickname,
                    statement_date,
                    due_date,
                    status.as_str(),
                    amount.to_string(),
                    id,
                ],
            )?
        } else {
            self.conn.execute(
                "UPDATE cards SET nickname = ?1, statement_date = ?2, due_date = ?3, payment_status = ?4
                 WHERE id = ?5",
                params![nickname, statement_date, due_date, status.as_str(), id],
            )?
        };
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    pub fn update_card_details(&self, id: i64, credit_limit: Decimal, remarks: &str) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE cards SET credit_limit = ?1, remarks = ?2 WHERE id = ?3",
            params![credit_limit.to_string(), remarks, id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    /// Deleting an id that is already gone is not an error.
    pub fn delete_card(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM cards WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub fn card_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?)
    }

    /// Counts over the rows as stored. Call [`Database::list_cards`] first
    /// if lapsed cycles should be rolled before counting.
    pub fn status_summary(&self) -> Result<StatusSummary> {
        let mut stmt = self
            .conn
            .prepare("SELECT payment_status, COUNT(*) FROM cards GROUP BY payment_status")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut summary = StatusSummary::default();
        for row in rows {
            let (status, count) = row?;
            summary.total += count;
            match PaymentStatus::parse(&status) {
                PaymentStatus::Unpaid => summary.unpaid += count,
                PaymentStatus::Pending => summary.pending += count,
                PaymentStatus::Paid => summary.paid += count,
            }
        }
        Ok(summary)
    }
}
