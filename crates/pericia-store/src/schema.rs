use rusqlite::Connection;

/// Relational schema. Flag columns are integers (`fl_ajg` nullable so the
/// Misto member round-trips); date columns are canonical `YYYY-MM-DD` text.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS pericia (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    processo      TEXT NOT NULL DEFAULT '',
    autor         TEXT NOT NULL DEFAULT '',
    reu           TEXT NOT NULL DEFAULT '',
    cidade        TEXT NOT NULL DEFAULT '',
    status        TEXT,
    descricao     TEXT NOT NULL DEFAULT '',
    valor_causa   REAL NOT NULL DEFAULT 0,
    fl_ajg        INTEGER,
    fl_tipo       INTEGER NOT NULL DEFAULT 0,
    valor_cobrado REAL NOT NULL DEFAULT 0,
    data_inicio   TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS honorarios (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    proc_id   INTEGER NOT NULL REFERENCES pericia(id),
    descricao TEXT NOT NULL DEFAULT '',
    valor     REAL NOT NULL DEFAULT 0,
    data      TEXT NOT NULL DEFAULT '',
    dtins     TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS pagamentos (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    proc_id          INTEGER NOT NULL REFERENCES pericia(id),
    descricao        TEXT NOT NULL DEFAULT '',
    valor_depositado REAL NOT NULL DEFAULT 0,
    imposto_retido   REAL NOT NULL DEFAULT 0,
    valor_total      REAL NOT NULL DEFAULT 0,
    data             TEXT NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS idx_honorarios_proc_id ON honorarios(proc_id);
CREATE INDEX IF NOT EXISTS idx_pagamentos_proc_id ON pagamentos(proc_id);
";

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
