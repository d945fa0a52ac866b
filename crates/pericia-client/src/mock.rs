use pericia_model::{
    FeeProposal, JudicialProcess, JusticeType, Payment, PericiaType, ProcessStatus,
};
use std::sync::Mutex;

/// In-memory stand-in for the process API, used when storage is unreachable.
///
/// Owned by the service instance — never a module-level singleton — so tests
/// and disconnected environments get independent datasets.
pub struct MockStore {
    processes: Mutex<Vec<JudicialProcess>>,
}

impl MockStore {
    #[must_use]
    pub fn new(seed: Vec<JudicialProcess>) -> Self {
        Self {
            processes: Mutex::new(seed),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The demo dataset shown when no backend is reachable.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(demo_processes())
    }

    #[must_use]
    pub fn list(&self) -> Vec<JudicialProcess> {
        self.processes.lock().expect("mock store lock").clone()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<JudicialProcess> {
        self.processes
            .lock()
            .expect("mock store lock")
            .iter()
            .find(|process| process.id == id)
            .cloned()
    }

    #[must_use]
    pub fn payments_of(&self, id: &str) -> Vec<Payment> {
        self.find(id)
            .map(|process| process.fees_received)
            .unwrap_or_default()
    }

    pub fn insert(&self, process: JudicialProcess) {
        self.processes.lock().expect("mock store lock").push(process);
    }

    /// Replaces the process with the same id; a miss is a no-op.
    pub fn replace(&self, process: &JudicialProcess) {
        let mut processes = self.processes.lock().expect("mock store lock");
        if let Some(slot) = processes.iter_mut().find(|p| p.id == process.id) {
            *slot = process.clone();
        }
    }
}

fn fee(id: &str, date: &str, amount: f64) -> FeeProposal {
    FeeProposal {
        id: id.into(),
        date: date.into(),
        amount,
    }
}

fn payment(id: &str, date: &str, amount: f64, source: &str) -> Payment {
    Payment {
        id: id.into(),
        date: date.into(),
        amount,
        taxes: 0.0,
        total: amount,
        source: source.into(),
    }
}

#[allow(clippy::too_many_lines)]
fn demo_processes() -> Vec<JudicialProcess> {
    vec![
        JudicialProcess {
            id: "1".into(),
            process_number: "001/2023-A".into(),
            plaintiff: "João da Silva".into(),
            defendant: "Empresa de Telefonia S.A.".into(),
            city: "Porto Alegre".into(),
            status: ProcessStatus::ElaboracaoLaudo,
            justice_type: JusticeType::Particular,
            pericia_type: PericiaType::Documental,
            start_date: "2023-01-15".into(),
            case_value: 50000.0,
            fees_charged: vec![fee("fc1", "2023-01-10", 5000.0)],
            fees_received: vec![payment("fr1", "2023-02-01", 2500.0, "Adiantamento")],
            description: "Perícia técnica para avaliação de falhas na prestação de serviço de internet.".into(),
        },
        JudicialProcess {
            id: "2".into(),
            process_number: "002/2023-B".into(),
            plaintiff: "Maria Oliveira".into(),
            defendant: "Construtora Predial Ltda.".into(),
            city: "Canoas".into(),
            status: ProcessStatus::AguardandoPagamento,
            justice_type: JusticeType::Particular,
            pericia_type: PericiaType::Local,
            start_date: "2022-11-20".into(),
            case_value: 120000.0,
            fees_charged: vec![fee("fc2", "2022-11-15", 8000.0)],
            fees_received: vec![
                payment("fr2", "2022-12-01", 4000.0, "Primeira parcela"),
                payment("fr3", "2023-01-05", 4000.0, "Segunda parcela"),
            ],
            description: "Laudo pericial sobre vícios construtivos em imóvel residencial.".into(),
        },
        JudicialProcess {
            id: "3".into(),
            process_number: "003/2024-C".into(),
            plaintiff: "Carlos Pereira".into(),
            defendant: "Banco Financeiro S.A.".into(),
            city: "São Leopoldo".into(),
            status: ProcessStatus::EnviarProposta,
            justice_type: JusticeType::Ajg,
            pericia_type: PericiaType::Documental,
            start_date: "2024-02-10".into(),
            case_value: 75000.0,
            fees_charged: vec![
                fee("fc3", "2024-02-05", 6000.0),
                fee("fc4", "2024-02-08", 6500.0),
            ],
            fees_received: Vec::new(),
            description: "Análise de contratos bancários e juros abusivos.".into(),
        },
        JudicialProcess {
            id: "4".into(),
            process_number: "004/2021-D".into(),
            plaintiff: "Ana Costa".into(),
            defendant: "Seguradora Confiança".into(),
            city: "Novo Hamburgo".into(),
            status: ProcessStatus::Arquivado,
            justice_type: JusticeType::Particular,
            pericia_type: PericiaType::Local,
            start_date: "2021-06-30".into(),
            case_value: 30000.0,
            fees_charged: vec![fee("fc5", "2021-06-20", 3000.0)],
            fees_received: vec![payment("fr4", "2021-07-15", 3000.0, "Pagamento integral")],
            description: "Avaliação de danos em veículo sinistrado.".into(),
        },
        JudicialProcess {
            id: "5".into(),
            process_number: "005/2024-E".into(),
            plaintiff: "Roberto Dias".into(),
            defendant: "Companhia de Energia Elétrica".into(),
            city: "Gravataí".into(),
            status: ProcessStatus::Atraso,
            justice_type: JusticeType::Ajg,
            pericia_type: PericiaType::Local,
            start_date: "2024-01-05".into(),
            case_value: 25000.0,
            fees_charged: vec![fee("fc6", "2024-01-10", 2500.0)],
            fees_received: Vec::new(),
            description: "Perícia em medidor de energia com suspeita de irregularidade.".into(),
        },
        JudicialProcess {
            id: "6".into(),
            process_number: "006/2023-F".into(),
            plaintiff: "Fernanda Lima".into(),
            defendant: "Administradora de Condomínios".into(),
            city: "Porto Alegre".into(),
            status: ProcessStatus::AguardandoResposta,
            justice_type: JusticeType::Particular,
            pericia_type: PericiaType::Documental,
            start_date: "2023-12-01".into(),
            case_value: 15000.0,
            fees_charged: vec![fee("fc7", "2023-12-05", 1800.0)],
            fees_received: Vec::new(),
            description: "Análise de prestação de contas do condomínio.".into(),
        },
        JudicialProcess {
            id: "7".into(),
            process_number: "007/2024-G".into(),
            plaintiff: "Lucas Martins".into(),
            defendant: "Oficina Mecânica Express".into(),
            city: "Canoas".into(),
            status: ProcessStatus::PericiaMarcada,
            justice_type: JusticeType::Ajg,
            pericia_type: PericiaType::Local,
            start_date: "2024-03-15".into(),
            case_value: 8000.0,
            fees_charged: vec![fee("fc8", "2024-03-20", 1500.0)],
            fees_received: vec![payment("fr5", "2024-03-25", 750.0, "Adiantamento")],
            description: "Verificação de reparos realizados em motor de veículo.".into(),
        },
    ]
}
