use crate::date::parse_iso_date;
use crate::status::ProcessStatus;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Sentinel id for a process that has not been persisted yet. The
/// authoritative id is assigned by storage on first save.
pub const NEW_PROCESS_ID: &str = "new";

/// Upper bound of digits in a formatted case number (CNJ numbering).
pub const PROCESS_NUMBER_MAX_DIGITS: usize = 20;

/// Who carries the expert's fees.
///
/// Storage keeps a single nullable flag: `1` is AJG, `0` is Particular and
/// `NULL` is Misto, so all three members round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JusticeType {
    #[serde(rename = "AJG")]
    Ajg,
    Particular,
    Misto,
}

impl JusticeType {
    #[must_use]
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Ajg,
            Some(false) => Self::Particular,
            None => Self::Misto,
        }
    }

    #[must_use]
    pub fn to_flag(self) -> Option<bool> {
        match self {
            Self::Ajg => Some(true),
            Self::Particular => Some(false),
            Self::Misto => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ajg => "AJG",
            Self::Particular => "Particular",
            Self::Misto => "Misto",
        }
    }
}

impl Default for JusticeType {
    fn default() -> Self {
        Self::Particular
    }
}

impl Display for JusticeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of examination: on-site or documents-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PericiaType {
    Local,
    Documental,
}

impl PericiaType {
    #[must_use]
    pub fn from_flag(flag: bool) -> Self {
        if flag { Self::Local } else { Self::Documental }
    }

    #[must_use]
    pub fn to_flag(self) -> bool {
        matches!(self, Self::Local)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Documental => "Documental",
        }
    }
}

impl Default for PericiaType {
    fn default() -> Self {
        Self::Documental
    }
}

impl Display for PericiaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fee amount proposed to the parties on a given date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeeProposal {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: f64,
}

/// A payment received for a process. `total` is the net amount after
/// withheld taxes (`amount - taxes` by convention).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub taxes: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub source: String,
}

/// One legal case under expert examination, with its child collections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudicialProcess {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub process_number: String,
    #[serde(default)]
    pub plaintiff: String,
    #[serde(default)]
    pub defendant: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub status: ProcessStatus,
    #[serde(default)]
    pub justice_type: JusticeType,
    #[serde(default)]
    pub pericia_type: PericiaType,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub case_value: f64,
    #[serde(default)]
    pub fees_charged: Vec<FeeProposal>,
    #[serde(default)]
    pub fees_received: Vec<Payment>,
    #[serde(default)]
    pub description: String,
}

impl JudicialProcess {
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_empty() || self.id == NEW_PROCESS_ID
    }

    /// Amount of the most recently dated fee proposal, if any. This is what
    /// storage keeps as the process's charged value.
    #[must_use]
    pub fn latest_fee_amount(&self) -> Option<f64> {
        self.fees_charged
            .iter()
            .max_by_key(|fee| parse_iso_date(&fee.date))
            .map(|fee| fee.amount)
    }
}

/// Masks a case number as digits are typed: `NNNNNNN-NN.NNNN.N.NN.NNNN`.
/// Non-digits are discarded and input is capped at
/// [`PROCESS_NUMBER_MAX_DIGITS`] digits.
#[must_use]
pub fn mask_process_number(value: &str) -> String {
    let digits: String = value
        .chars()
        .filter(char::is_ascii_digit)
        .take(PROCESS_NUMBER_MAX_DIGITS)
        .collect();

    let mut out = String::with_capacity(digits.len() + 5);
    for (index, digit) in digits.chars().enumerate() {
        match index {
            7 => out.push('-'),
            9 | 13 | 14 | 16 => out.push('.'),
            _ => {}
        }
        out.push(digit);
    }
    out
}
