#![forbid(unsafe_code)]
//! Domain SSOT for the perícia back-office.
//!
//! Everything downstream (store, server, client, CLI) depends on the types
//! here; nothing here performs I/O. Storage row shapes and their total
//! mapping into the domain live in [`row`] so the coercion rules are testable
//! without a database.

mod date;
mod process;
mod report;
mod row;
mod status;

pub use date::{iso_date_or_empty, normalize_date, parse_iso_date, DateError, ISO_DATE_FORMAT};
pub use process::{
    mask_process_number, FeeProposal, JudicialProcess, JusticeType, Payment, PericiaType,
    NEW_PROCESS_ID, PROCESS_NUMBER_MAX_DIGITS,
};
pub use report::{annual_report, AnnualReport, MonthReport, MONTH_NAMES};
pub use row::{HonorarioRow, PagamentoRow, PericiaRow};
pub use status::ProcessStatus;

pub const CRATE_NAME: &str = "pericia-model";
