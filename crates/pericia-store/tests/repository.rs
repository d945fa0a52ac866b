use pericia_model::{
    FeeProposal, JudicialProcess, JusticeType, PericiaType, ProcessStatus,
};
use pretty_assertions::assert_eq;
use pericia_store::{
    FeeWrite, PaymentWrite, ProcessDraft, ProcessStore, StoreConfig, StoreError,
};
use rusqlite::Connection;
use tempfile::TempDir;

fn temp_store() -> (TempDir, ProcessStore) {
    let dir = TempDir::new().expect("tempdir");
    let store = ProcessStore::new(StoreConfig::from_path(dir.path().join("pericia.sqlite")));
    store.ensure_schema().expect("schema");
    (dir, store)
}

fn raw_connection(dir: &TempDir) -> Connection {
    Connection::open(dir.path().join("pericia.sqlite")).expect("open raw connection")
}

fn body(justice: JusticeType) -> JudicialProcess {
    JudicialProcess {
        id: String::from("new"),
        process_number: String::from("5050706-41.2022.8.21.0010"),
        plaintiff: String::from("João da Silva"),
        defendant: String::from("Companhia de Energia Elétrica S.A."),
        city: String::from("Porto Alegre"),
        status: ProcessStatus::AguardandoResposta,
        justice_type: justice,
        pericia_type: PericiaType::Local,
        start_date: String::from("2023-10-26"),
        case_value: 15000.0,
        fees_charged: vec![FeeProposal {
            id: String::from("fc1"),
            date: String::from("2023-10-20"),
            amount: 3500.0,
        }],
        fees_received: Vec::new(),
        description: String::from("Medição de consumo de energia"),
    }
}

fn draft(justice: JusticeType) -> ProcessDraft {
    ProcessDraft::from_body(&body(justice)).expect("valid draft")
}

#[test]
fn unconfigured_store_signals_unavailable_not_empty() {
    let store = ProcessStore::new(StoreConfig::unconfigured());
    assert!(matches!(
        store.list_processes(),
        Err(StoreError::Unavailable(_))
    ));
    assert!(matches!(
        store.fetch_process(1),
        Err(StoreError::Unavailable(_))
    ));
}

#[test]
fn configured_empty_database_lists_zero_processes() {
    let (_dir, store) = temp_store();
    let processes = store.list_processes().expect("list");
    assert!(processes.is_empty());
}

#[test]
fn insert_then_fetch_round_trips_the_process() {
    let (_dir, store) = temp_store();
    let created = store
        .insert_process(&draft(JusticeType::Ajg))
        .expect("insert");
    assert_ne!(created.id, "new");

    let id: i64 = created.id.parse().expect("numeric id");
    let fetched = store.fetch_process(id).expect("fetch");
    assert_eq!(fetched.process_number, "5050706-41.2022.8.21.0010");
    assert_eq!(fetched.plaintiff, "João da Silva");
    assert_eq!(fetched.status, ProcessStatus::AguardandoResposta);
    assert_eq!(fetched.justice_type, JusticeType::Ajg);
    assert_eq!(fetched.pericia_type, PericiaType::Local);
    assert_eq!(fetched.start_date, "2023-10-26");
    assert_eq!(fetched.case_value, 15000.0);
}

#[test]
fn justice_type_round_trips_for_all_three_members() {
    let (_dir, store) = temp_store();
    for justice in [JusticeType::Ajg, JusticeType::Particular, JusticeType::Misto] {
        let created = store.insert_process(&draft(justice)).expect("insert");
        let id: i64 = created.id.parse().expect("numeric id");
        let fetched = store.fetch_process(id).expect("fetch");
        assert_eq!(fetched.justice_type, justice);
    }
}

#[test]
fn listing_is_most_recent_first() {
    let (_dir, store) = temp_store();
    let first = store
        .insert_process(&draft(JusticeType::Particular))
        .expect("insert");
    let second = store
        .insert_process(&draft(JusticeType::Particular))
        .expect("insert");
    let listed = store.list_processes().expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[test]
fn unknown_stored_status_normalizes_to_default_on_read() {
    let (dir, store) = temp_store();
    let created = store
        .insert_process(&draft(JusticeType::Particular))
        .expect("insert");
    let id: i64 = created.id.parse().expect("numeric id");

    raw_connection(&dir)
        .execute(
            "UPDATE pericia SET status = ?1 WHERE id = ?2",
            rusqlite::params!["Em Andamento", id],
        )
        .expect("seed unknown status");

    let fetched = store.fetch_process(id).expect("fetch");
    assert_eq!(fetched.status, ProcessStatus::ElaboracaoLaudo);
}

#[test]
fn update_of_missing_row_is_not_found_even_though_sql_succeeds() {
    let (_dir, store) = temp_store();
    assert!(matches!(
        store.update_process(9999, &draft(JusticeType::Particular)),
        Err(StoreError::NotFound)
    ));
}

#[test]
fn invalid_start_date_never_reaches_the_write() {
    let (dir, _store) = temp_store();
    let mut invalid = body(JusticeType::Particular);
    invalid.start_date = String::from("not-a-date");
    assert!(matches!(
        ProcessDraft::from_body(&invalid),
        Err(StoreError::InvalidInput(_))
    ));

    let count: i64 = raw_connection(&dir)
        .query_row("SELECT COUNT(*) FROM pericia", [], |row| row.get(0))
        .expect("count");
    assert_eq!(count, 0);
}

#[test]
fn update_rewrites_the_row_and_returns_children() {
    let (_dir, store) = temp_store();
    let created = store
        .insert_process(&draft(JusticeType::Particular))
        .expect("insert");
    let id: i64 = created.id.parse().expect("numeric id");

    let mut changed = body(JusticeType::Ajg);
    changed.city = String::from("Canoas");
    changed.status = ProcessStatus::AguardandoPagamento;
    let updated = store
        .update_process(id, &ProcessDraft::from_body(&changed).expect("draft"))
        .expect("update");
    assert_eq!(updated.city, "Canoas");
    assert_eq!(updated.status, ProcessStatus::AguardandoPagamento);
    assert_eq!(updated.justice_type, JusticeType::Ajg);
}

#[test]
fn fee_proposals_crud_against_the_parent_process() {
    let (_dir, store) = temp_store();
    let created = store
        .insert_process(&draft(JusticeType::Particular))
        .expect("insert");
    let id: i64 = created.id.parse().expect("numeric id");

    let fee = store
        .insert_fee(
            id,
            &FeeWrite {
                source: String::from("Proposta inicial"),
                amount: 2500.0,
                date: String::from("2024-01-10"),
            },
        )
        .expect("insert fee");
    assert_eq!(fee.amount, 2500.0);
    assert_eq!(fee.date, "2024-01-10");

    let later = store
        .insert_fee(
            id,
            &FeeWrite {
                source: String::from("Proposta revisada"),
                amount: 3000.0,
                date: String::from("2024-02-01"),
            },
        )
        .expect("insert fee");

    let fees = store.list_fees(id).expect("list fees");
    assert_eq!(fees.len(), 2);
    assert_eq!(fees[0].id, later.id);

    let fee_id: i64 = fee.id.parse().expect("numeric fee id");
    let updated = store
        .update_fee(
            id,
            fee_id,
            &FeeWrite {
                source: String::from("Proposta corrigida"),
                amount: 2600.0,
                date: String::from("2024-01-12"),
            },
        )
        .expect("update fee");
    assert_eq!(updated.amount, 2600.0);

    store.delete_fee(id, fee_id).expect("delete fee");
    assert!(matches!(
        store.delete_fee(id, fee_id),
        Err(StoreError::NotFound)
    ));
    assert_eq!(store.list_fees(id).expect("list fees").len(), 1);
}

#[test]
fn fee_for_missing_process_is_not_found() {
    let (_dir, store) = temp_store();
    assert!(matches!(
        store.insert_fee(
            42,
            &FeeWrite {
                source: String::from("Proposta"),
                amount: 100.0,
                date: String::from("2024-01-01"),
            },
        ),
        Err(StoreError::NotFound)
    ));
}

#[test]
fn payments_crud_and_total_defaulting() {
    let (_dir, store) = temp_store();
    let created = store
        .insert_process(&draft(JusticeType::Particular))
        .expect("insert");
    let id: i64 = created.id.parse().expect("numeric id");

    let payment = store
        .insert_payment(
            id,
            &PaymentWrite {
                source: String::from("Primeira parcela"),
                amount: 1000.0,
                taxes: 100.0,
                total: None,
                date: String::from("2024-03-10"),
            },
        )
        .expect("insert payment");
    assert_eq!(payment.total, 900.0);
    assert_eq!(payment.date, "2024-03-10");

    let payment_id: i64 = payment.id.parse().expect("numeric payment id");
    let updated = store
        .update_payment(
            id,
            payment_id,
            &PaymentWrite {
                source: String::from("Primeira parcela"),
                amount: 1000.0,
                taxes: 50.0,
                total: Some(950.0),
                date: String::from("2024-03-11"),
            },
        )
        .expect("update payment");
    assert_eq!(updated.taxes, 50.0);
    assert_eq!(updated.total, 950.0);

    let fetched = store.fetch_process(id).expect("fetch");
    assert_eq!(fetched.fees_received.len(), 1);
    assert_eq!(fetched.fees_received[0].total, 950.0);

    store.delete_payment(id, payment_id).expect("delete payment");
    assert!(matches!(
        store.update_payment(
            id,
            payment_id,
            &PaymentWrite {
                source: String::from("x"),
                amount: 1.0,
                taxes: 0.0,
                total: None,
                date: String::from("2024-01-01"),
            },
        ),
        Err(StoreError::NotFound)
    ));
}

#[test]
fn blank_payment_source_is_invalid_input() {
    let (_dir, store) = temp_store();
    let created = store
        .insert_process(&draft(JusticeType::Particular))
        .expect("insert");
    let id: i64 = created.id.parse().expect("numeric id");
    assert!(matches!(
        store.insert_payment(
            id,
            &PaymentWrite {
                source: String::new(),
                amount: 10.0,
                taxes: 0.0,
                total: None,
                date: String::from("2024-01-01"),
            },
        ),
        Err(StoreError::InvalidInput(_))
    ));
}
