pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS cards (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    nickname        TEXT NOT NULL,
    statement_date  TEXT NOT NULL,
    due_date        TEXT NOT NULL,
    payment_status  TEXT NOT NULL DEFAULT 'Unpaid',
    due_amount      TEXT NOT NULL DEFAULT '0',
    credit_limit    TEXT NOT NULL DEFAULT '0',
    remarks         TEXT NOT NULL DEFAULT '',
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cards_due_date ON cards(due_date);
CREATE INDEX IF NOT EXISTS idx_cards_status ON cards(payment_status);

"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[
    // Future migrations go here:
    // (1, "ALTER TABLE cards ADD COLUMN issuer TEXT NOT NULL DEFAULT '';"),
];
