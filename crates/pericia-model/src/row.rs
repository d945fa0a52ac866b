use crate::date::iso_date_or_empty;
use crate::process::{FeeProposal, JudicialProcess, JusticeType, Payment, PericiaType};
use crate::status::ProcessStatus;

/// Row shape of the `pericia` table. Column names keep the Portuguese
/// schema; numeric and flag columns are optional because legacy rows carry
/// NULLs freely.
#[derive(Debug, Clone, Default)]
pub struct PericiaRow {
    pub id: i64,
    pub processo: Option<String>,
    pub autor: Option<String>,
    pub reu: Option<String>,
    pub cidade: Option<String>,
    pub status: Option<String>,
    pub descricao: Option<String>,
    pub valor_causa: Option<f64>,
    pub fl_ajg: Option<i64>,
    pub fl_tipo: Option<i64>,
    pub valor_cobrado: Option<f64>,
    pub data_inicio: Option<String>,
}

/// Row shape of the `honorarios` (fee proposal) table.
#[derive(Debug, Clone, Default)]
pub struct HonorarioRow {
    pub id: i64,
    pub proc_id: i64,
    pub descricao: Option<String>,
    pub valor: Option<f64>,
    pub data: Option<String>,
    pub dtins: Option<String>,
}

/// Row shape of the `pagamentos` (payment) table.
#[derive(Debug, Clone, Default)]
pub struct PagamentoRow {
    pub id: i64,
    pub proc_id: i64,
    pub descricao: Option<String>,
    pub valor_depositado: Option<f64>,
    pub imposto_retido: Option<f64>,
    pub valor_total: Option<f64>,
    pub data: Option<String>,
}

fn flag_to_bool(flag: Option<i64>) -> Option<bool> {
    flag.map(|value| value != 0)
}

impl PericiaRow {
    /// Total row→domain mapping. Every coercion branch has a defined output:
    /// unknown status defaults, NULL money is zero, unparseable dates become
    /// empty strings, and the nullable AJG flag carries the Misto member.
    ///
    /// When the charged-value column is positive, a single synthetic fee
    /// proposal is derived from it so list views can show the charged amount
    /// without the `honorarios` table; a full fetch replaces it with the
    /// real child rows.
    #[must_use]
    pub fn into_process(self) -> JudicialProcess {
        let start_date = iso_date_or_empty(self.data_inicio.as_deref().unwrap_or(""));
        let valor_cobrado = self.valor_cobrado.unwrap_or(0.0);
        let fees_charged = if valor_cobrado > 0.0 {
            vec![FeeProposal {
                id: format!("{}-vc", self.id),
                date: start_date.clone(),
                amount: valor_cobrado,
            }]
        } else {
            Vec::new()
        };

        JudicialProcess {
            id: self.id.to_string(),
            process_number: self.processo.unwrap_or_default(),
            plaintiff: self.autor.unwrap_or_default(),
            defendant: self.reu.unwrap_or_default(),
            city: self.cidade.unwrap_or_default(),
            status: ProcessStatus::from_db(self.status.as_deref()),
            justice_type: JusticeType::from_flag(flag_to_bool(self.fl_ajg)),
            pericia_type: PericiaType::from_flag(flag_to_bool(self.fl_tipo).unwrap_or(false)),
            start_date,
            case_value: self.valor_causa.unwrap_or(0.0),
            fees_charged,
            fees_received: Vec::new(),
            description: self.descricao.unwrap_or_default(),
        }
    }
}

impl HonorarioRow {
    /// The proposal date falls back to the insert timestamp when the `data`
    /// column is empty.
    #[must_use]
    pub fn into_fee_proposal(self) -> FeeProposal {
        let date = {
            let from_data = iso_date_or_empty(self.data.as_deref().unwrap_or(""));
            if from_data.is_empty() {
                iso_date_or_empty(self.dtins.as_deref().unwrap_or(""))
            } else {
                from_data
            }
        };
        FeeProposal {
            id: self.id.to_string(),
            date,
            amount: self.valor.unwrap_or(0.0),
        }
    }
}

impl PagamentoRow {
    #[must_use]
    pub fn into_payment(self) -> Payment {
        Payment {
            id: self.id.to_string(),
            date: iso_date_or_empty(self.data.as_deref().unwrap_or("")),
            amount: self.valor_depositado.unwrap_or(0.0),
            taxes: self.imposto_retido.unwrap_or(0.0),
            total: self.valor_total.unwrap_or(0.0),
            source: self.descricao.unwrap_or_default(),
        }
    }
}
