use crate::error::StoreError;
use chrono::Local;
use pericia_model::{mask_process_number, normalize_date, JudicialProcess, ISO_DATE_FORMAT};
use serde::Deserialize;

/// Validated write shape for the `pericia` table, derived from an incoming
/// process body. Building the draft is the only write path, so an invalid
/// start date is rejected before any SQL runs.
#[derive(Debug, Clone)]
pub struct ProcessDraft {
    pub process_number: String,
    pub plaintiff: String,
    pub defendant: String,
    pub city: String,
    pub status: String,
    pub description: String,
    pub case_value: f64,
    pub justice_flag: Option<i64>,
    pub pericia_flag: i64,
    pub charged_value: f64,
    pub start_date: String,
}

impl ProcessDraft {
    pub fn from_body(body: &JudicialProcess) -> Result<Self, StoreError> {
        let start_date = normalize_date(&body.start_date)
            .map_err(|_| StoreError::InvalidInput(String::from("Data de início inválida")))?;
        Ok(Self {
            process_number: canonical_process_number(&body.process_number),
            plaintiff: body.plaintiff.clone(),
            defendant: body.defendant.clone(),
            city: body.city.clone(),
            status: body.status.as_str().to_string(),
            description: body.description.clone(),
            case_value: body.case_value,
            justice_flag: body.justice_type.to_flag().map(i64::from),
            pericia_flag: i64::from(body.pericia_type.to_flag()),
            charged_value: body.latest_fee_amount().unwrap_or(0.0),
            start_date,
        })
    }
}

/// Incoming body for a fee proposal write.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeeWrite {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug)]
pub(crate) struct FeeValues {
    pub source: String,
    pub amount: f64,
    pub date: String,
}

impl FeeWrite {
    pub(crate) fn validated(&self) -> Result<FeeValues, StoreError> {
        Ok(FeeValues {
            source: required_source(&self.source)?,
            amount: self.amount,
            date: normalized_or_today(&self.date)?,
        })
    }
}

/// Incoming body for a payment write. `total` defaults to `amount - taxes`
/// when the client omits it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentWrite {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub taxes: f64,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub date: String,
}

pub(crate) struct PaymentValues {
    pub source: String,
    pub amount: f64,
    pub taxes: f64,
    pub total: f64,
    pub date: String,
}

impl PaymentWrite {
    pub(crate) fn validated(&self) -> Result<PaymentValues, StoreError> {
        Ok(PaymentValues {
            source: required_source(&self.source)?,
            amount: self.amount,
            taxes: self.taxes,
            total: self.total.unwrap_or(self.amount - self.taxes),
            date: normalized_or_today(&self.date)?,
        })
    }
}

/// A case number typed as bare digits is stored in its masked CNJ form;
/// anything already formatted (or legacy numbering) passes through as-is.
fn canonical_process_number(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return mask_process_number(trimmed);
    }
    trimmed.to_string()
}

fn required_source(source: &str) -> Result<String, StoreError> {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput(String::from("Origem inválida")));
    }
    Ok(trimmed.to_string())
}

/// Child dates default to the current day when omitted; anything present
/// must normalize or the write is rejected.
fn normalized_or_today(date: &str) -> Result<String, StoreError> {
    if date.trim().is_empty() {
        return Ok(Local::now()
            .date_naive()
            .format(ISO_DATE_FORMAT)
            .to_string());
    }
    normalize_date(date).map_err(|e| StoreError::InvalidInput(e.to_string()))
}
