#![forbid(unsafe_code)]
//! Process repository over a relational connection.
//!
//! Every operation opens one connection, runs its statements and releases
//! the connection on return — success or error. All statements are
//! parameterized; user-supplied free text never reaches SQL by
//! interpolation. Write inputs are validated before any statement runs, so
//! an invalid date can never half-apply.

mod error;
mod schema;
mod write;

use pericia_model::{
    FeeProposal, HonorarioRow, JudicialProcess, PagamentoRow, Payment, PericiaRow,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use tracing::{debug, warn};

pub use error::StoreError;
pub use schema::{init_schema, SCHEMA_SQL};
pub use write::{FeeWrite, PaymentWrite, ProcessDraft};

pub const CRATE_NAME: &str = "pericia-store";

/// List views are bounded to the most recent rows.
pub const LIST_LIMIT: usize = 200;

const PROCESS_COLUMNS: &str =
    "id, processo, autor, reu, cidade, status, descricao, valor_causa, fl_ajg, fl_tipo, \
     valor_cobrado, data_inicio";
const FEE_COLUMNS: &str = "id, proc_id, descricao, valor, data, dtins";
const PAYMENT_COLUMNS: &str =
    "id, proc_id, descricao, valor_depositado, imposto_retido, valor_total, data";

/// Where the database lives. `None` means storage was never configured,
/// which the repository reports as [`StoreError::Unavailable`] so callers
/// can fall back to mock data.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub db_path: Option<PathBuf>,
}

impl StoreConfig {
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
        }
    }

    #[must_use]
    pub fn unconfigured() -> Self {
        Self::default()
    }
}

pub struct ProcessStore {
    config: StoreConfig,
}

impl ProcessStore {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.db_path.is_some()
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let Some(path) = &self.config.db_path else {
            return Err(StoreError::Unavailable(String::from(
                "banco de dados não configurado",
            )));
        };
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(conn)
    }

    /// Creates the schema when it is missing. Called once at startup by
    /// binaries that own a configured database file.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        init_schema(&conn).map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    /// Most-recent-first listing, bounded to [`LIST_LIMIT`] rows. Child
    /// collections are not loaded here; the synthetic charged-value proposal
    /// from the row mapping stands in for list views.
    pub fn list_processes(&self) -> Result<Vec<JudicialProcess>, StoreError> {
        let conn = self.connect()?;
        let sql = format!("SELECT {PROCESS_COLUMNS} FROM pericia ORDER BY id DESC LIMIT ?1");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![LIST_LIMIT as i64], read_pericia_row)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rows = rows.len(), "processos listados");
        Ok(rows.into_iter().map(PericiaRow::into_process).collect())
    }

    /// One process with its fee proposals and payments.
    pub fn fetch_process(&self, id: i64) -> Result<JudicialProcess, StoreError> {
        let conn = self.connect()?;
        fetch_process_with_children(&conn, id)
    }

    /// Inserts a new process and returns it as stored; the authoritative id
    /// comes from the database.
    pub fn insert_process(&self, draft: &ProcessDraft) -> Result<JudicialProcess, StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO pericia (processo, autor, reu, cidade, status, descricao, valor_causa, \
             fl_ajg, fl_tipo, valor_cobrado, data_inicio) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                draft.process_number,
                draft.plaintiff,
                draft.defendant,
                draft.city,
                draft.status,
                draft.description,
                draft.case_value,
                draft.justice_flag,
                draft.pericia_flag,
                draft.charged_value,
                draft.start_date,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, "processo criado");
        fetch_process_with_children(&conn, id)
    }

    /// Updates a process. Zero affected rows is a not-found condition even
    /// though the statement itself succeeded.
    pub fn update_process(
        &self,
        id: i64,
        draft: &ProcessDraft,
    ) -> Result<JudicialProcess, StoreError> {
        let conn = self.connect()?;
        let affected = conn.execute(
            "UPDATE pericia SET processo = ?1, autor = ?2, reu = ?3, cidade = ?4, status = ?5, \
             descricao = ?6, valor_causa = ?7, fl_ajg = ?8, fl_tipo = ?9, valor_cobrado = ?10, \
             data_inicio = ?11 WHERE id = ?12",
            params![
                draft.process_number,
                draft.plaintiff,
                draft.defendant,
                draft.city,
                draft.status,
                draft.description,
                draft.case_value,
                draft.justice_flag,
                draft.pericia_flag,
                draft.charged_value,
                draft.start_date,
                id,
            ],
        )?;
        if affected == 0 {
            warn!(id, "atualização não encontrou o processo");
            return Err(StoreError::NotFound);
        }
        fetch_process_with_children(&conn, id)
    }

    pub fn list_fees(&self, proc_id: i64) -> Result<Vec<FeeProposal>, StoreError> {
        let conn = self.connect()?;
        read_fees(&conn, proc_id)
    }

    pub fn insert_fee(&self, proc_id: i64, input: &FeeWrite) -> Result<FeeProposal, StoreError> {
        let write = input.validated()?;
        let conn = self.connect()?;
        ensure_process_exists(&conn, proc_id)?;
        conn.execute(
            "INSERT INTO honorarios (proc_id, descricao, valor, data, dtins) \
             VALUES (?1, ?2, ?3, ?4, CURRENT_TIMESTAMP)",
            params![proc_id, write.source, write.amount, write.date],
        )?;
        let id = conn.last_insert_rowid();
        fetch_fee(&conn, id)
    }

    pub fn update_fee(
        &self,
        proc_id: i64,
        fee_id: i64,
        input: &FeeWrite,
    ) -> Result<FeeProposal, StoreError> {
        let write = input.validated()?;
        let conn = self.connect()?;
        let affected = conn.execute(
            "UPDATE honorarios SET descricao = ?1, valor = ?2, data = ?3 \
             WHERE id = ?4 AND proc_id = ?5",
            params![write.source, write.amount, write.date, fee_id, proc_id],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        fetch_fee(&conn, fee_id)
    }

    pub fn delete_fee(&self, proc_id: i64, fee_id: i64) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let affected = conn.execute(
            "DELETE FROM honorarios WHERE id = ?1 AND proc_id = ?2",
            params![fee_id, proc_id],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    pub fn list_payments(&self, proc_id: i64) -> Result<Vec<Payment>, StoreError> {
        let conn = self.connect()?;
        read_payments(&conn, proc_id)
    }

    pub fn insert_payment(
        &self,
        proc_id: i64,
        input: &PaymentWrite,
    ) -> Result<Payment, StoreError> {
        let write = input.validated()?;
        let conn = self.connect()?;
        ensure_process_exists(&conn, proc_id)?;
        conn.execute(
            "INSERT INTO pagamentos (proc_id, descricao, valor_depositado, imposto_retido, \
             valor_total, data) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                proc_id,
                write.source,
                write.amount,
                write.taxes,
                write.total,
                write.date
            ],
        )?;
        let id = conn.last_insert_rowid();
        fetch_payment(&conn, id)
    }

    pub fn update_payment(
        &self,
        proc_id: i64,
        payment_id: i64,
        input: &PaymentWrite,
    ) -> Result<Payment, StoreError> {
        let write = input.validated()?;
        let conn = self.connect()?;
        let affected = conn.execute(
            "UPDATE pagamentos SET descricao = ?1, valor_depositado = ?2, imposto_retido = ?3, \
             valor_total = ?4, data = ?5 WHERE id = ?6 AND proc_id = ?7",
            params![
                write.source,
                write.amount,
                write.taxes,
                write.total,
                write.date,
                payment_id,
                proc_id
            ],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        fetch_payment(&conn, payment_id)
    }

    pub fn delete_payment(&self, proc_id: i64, payment_id: i64) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let affected = conn.execute(
            "DELETE FROM pagamentos WHERE id = ?1 AND proc_id = ?2",
            params![payment_id, proc_id],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn fetch_process_with_children(
    conn: &Connection,
    id: i64,
) -> Result<JudicialProcess, StoreError> {
    let sql = format!("SELECT {PROCESS_COLUMNS} FROM pericia WHERE id = ?1 LIMIT 1");
    let row = conn
        .query_row(&sql, params![id], read_pericia_row)
        .optional()?
        .ok_or(StoreError::NotFound)?;

    // The real child rows replace the synthetic charged-value proposal the
    // row mapping produces for list views.
    let mut process = row.into_process();
    process.fees_charged = read_fees(conn, id)?;
    process.fees_received = read_payments(conn, id)?;
    Ok(process)
}

fn ensure_process_exists(conn: &Connection, proc_id: i64) -> Result<(), StoreError> {
    conn.query_row(
        "SELECT id FROM pericia WHERE id = ?1 LIMIT 1",
        params![proc_id],
        |row| row.get::<_, i64>(0),
    )
    .optional()?
    .map(|_| ())
    .ok_or(StoreError::NotFound)
}

fn read_fees(conn: &Connection, proc_id: i64) -> Result<Vec<FeeProposal>, StoreError> {
    let sql =
        format!("SELECT {FEE_COLUMNS} FROM honorarios WHERE proc_id = ?1 ORDER BY data DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![proc_id], read_honorario_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows.into_iter().map(HonorarioRow::into_fee_proposal).collect())
}

fn read_payments(conn: &Connection, proc_id: i64) -> Result<Vec<Payment>, StoreError> {
    let sql = format!(
        "SELECT {PAYMENT_COLUMNS} FROM pagamentos WHERE proc_id = ?1 ORDER BY data DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![proc_id], read_pagamento_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows.into_iter().map(PagamentoRow::into_payment).collect())
}

fn fetch_fee(conn: &Connection, id: i64) -> Result<FeeProposal, StoreError> {
    let sql = format!("SELECT {FEE_COLUMNS} FROM honorarios WHERE id = ?1 LIMIT 1");
    let row = conn
        .query_row(&sql, params![id], read_honorario_row)
        .optional()?
        .ok_or(StoreError::NotFound)?;
    Ok(row.into_fee_proposal())
}

fn fetch_payment(conn: &Connection, id: i64) -> Result<Payment, StoreError> {
    let sql = format!("SELECT {PAYMENT_COLUMNS} FROM pagamentos WHERE id = ?1 LIMIT 1");
    let row = conn
        .query_row(&sql, params![id], read_pagamento_row)
        .optional()?
        .ok_or(StoreError::NotFound)?;
    Ok(row.into_payment())
}

// Row readers tolerate loosely-typed columns: a money or date column that
// does not convert reads as NULL and takes the mapping's defined fallback.

fn opt_f64(row: &Row<'_>, idx: usize) -> Option<f64> {
    row.get(idx).unwrap_or(None)
}

fn opt_i64(row: &Row<'_>, idx: usize) -> Option<i64> {
    row.get(idx).unwrap_or(None)
}

fn opt_text(row: &Row<'_>, idx: usize) -> Option<String> {
    row.get(idx).unwrap_or(None)
}

fn read_pericia_row(row: &Row<'_>) -> rusqlite::Result<PericiaRow> {
    Ok(PericiaRow {
        id: row.get(0)?,
        processo: opt_text(row, 1),
        autor: opt_text(row, 2),
        reu: opt_text(row, 3),
        cidade: opt_text(row, 4),
        status: opt_text(row, 5),
        descricao: opt_text(row, 6),
        valor_causa: opt_f64(row, 7),
        fl_ajg: opt_i64(row, 8),
        fl_tipo: opt_i64(row, 9),
        valor_cobrado: opt_f64(row, 10),
        data_inicio: opt_text(row, 11),
    })
}

fn read_honorario_row(row: &Row<'_>) -> rusqlite::Result<HonorarioRow> {
    Ok(HonorarioRow {
        id: row.get(0)?,
        proc_id: row.get(1)?,
        descricao: opt_text(row, 2),
        valor: opt_f64(row, 3),
        data: opt_text(row, 4),
        dtins: opt_text(row, 5),
    })
}

fn read_pagamento_row(row: &Row<'_>) -> rusqlite::Result<PagamentoRow> {
    Ok(PagamentoRow {
        id: row.get(0)?,
        proc_id: row.get(1)?,
        descricao: opt_text(row, 2),
        valor_depositado: opt_f64(row, 3),
        imposto_retido: opt_f64(row, 4),
        valor_total: opt_f64(row, 5),
        data: opt_text(row, 6),
    })
}
