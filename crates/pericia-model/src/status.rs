use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Workflow state of a judicial process.
///
/// The storage column is free text; [`ProcessStatus::from_db`] is the only
/// way a stored value enters the domain, so an unknown or empty column can
/// never leak past this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStatus {
    #[serde(rename = "Enviar Proposta")]
    EnviarProposta,
    #[serde(rename = "Atraso")]
    Atraso,
    #[serde(rename = "Aguardando Resposta")]
    AguardandoResposta,
    #[serde(rename = "Elaboração Laudo")]
    ElaboracaoLaudo,
    #[serde(rename = "Perícia Marcada")]
    PericiaMarcada,
    #[serde(rename = "Aguardando Pagamento")]
    AguardandoPagamento,
    #[serde(rename = "Arquivado")]
    Arquivado,
}

impl ProcessStatus {
    pub const ALL: [Self; 7] = [
        Self::EnviarProposta,
        Self::Atraso,
        Self::AguardandoResposta,
        Self::ElaboracaoLaudo,
        Self::PericiaMarcada,
        Self::AguardandoPagamento,
        Self::Arquivado,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnviarProposta => "Enviar Proposta",
            Self::Atraso => "Atraso",
            Self::AguardandoResposta => "Aguardando Resposta",
            Self::ElaboracaoLaudo => "Elaboração Laudo",
            Self::PericiaMarcada => "Perícia Marcada",
            Self::AguardandoPagamento => "Aguardando Pagamento",
            Self::Arquivado => "Arquivado",
        }
    }

    /// Total mapping from the free-text status column. Unknown and empty
    /// values normalize to the default instead of failing the row.
    #[must_use]
    pub fn from_db(raw: Option<&str>) -> Self {
        let trimmed = raw.unwrap_or("").trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == trimmed)
            .unwrap_or_default()
    }
}

impl Default for ProcessStatus {
    fn default() -> Self {
        Self::ElaboracaoLaudo
    }
}

impl Display for ProcessStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_member_round_trips_through_its_display_string() {
        for status in ProcessStatus::ALL {
            assert_eq!(ProcessStatus::from_db(Some(status.as_str())), status);
        }
    }

    #[test]
    fn unknown_and_empty_status_normalize_to_default() {
        assert_eq!(
            ProcessStatus::from_db(Some("Em Andamento")),
            ProcessStatus::ElaboracaoLaudo
        );
        assert_eq!(
            ProcessStatus::from_db(Some("   ")),
            ProcessStatus::ElaboracaoLaudo
        );
        assert_eq!(ProcessStatus::from_db(None), ProcessStatus::ElaboracaoLaudo);
    }

    #[test]
    fn stored_value_with_padding_is_trimmed_before_matching() {
        assert_eq!(
            ProcessStatus::from_db(Some(" Arquivado ")),
            ProcessStatus::Arquivado
        );
    }

    #[test]
    fn serde_uses_display_strings() {
        let json = serde_json::to_string(&ProcessStatus::PericiaMarcada).expect("serialize");
        assert_eq!(json, "\"Perícia Marcada\"");
        let back: ProcessStatus = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, ProcessStatus::PericiaMarcada);
    }
}
