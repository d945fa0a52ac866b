#![forbid(unsafe_code)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use pericia_client::ProcessService;
use pericia_model::{annual_report, JudicialProcess};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pericia")]
#[command(about = "Consulta processos de perícia e relatórios de pagamentos")]
struct Cli {
    /// Base URL of the back-office API.
    #[arg(long, env = "PERICIA_API_BASE_URL", default_value = "http://localhost:3000")]
    base_url: String,
    /// Emit JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List processes (falls back to the demo dataset offline).
    List,
    /// Show one process with fee proposals and payments.
    Show { id: String },
    /// Annual report of payments received.
    Report { year: i32 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let service = ProcessService::with_demo_fallback(cli.base_url.clone());

    match cli.command {
        Commands::List => {
            let processes = service.get_processes().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&processes)?);
            } else {
                print_process_table(&processes);
            }
        }
        Commands::Show { id } => {
            let process = service
                .get_process_by_id(&id)
                .await?
                .with_context(|| format!("processo {id} não encontrado"))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&process)?);
            } else {
                print_process(&process);
            }
        }
        Commands::Report { year } => {
            let processes = service.get_processes().await;
            let report = annual_report(year, &processes);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
    }
    Ok(())
}

fn print_process_table(processes: &[JudicialProcess]) {
    if processes.is_empty() {
        println!("nenhum processo");
        return;
    }
    for process in processes {
        println!(
            "{:>6}  {:<28}  {:<22}  {}",
            process.id,
            process.process_number,
            process.status.as_str(),
            process.plaintiff
        );
    }
}

fn print_process(process: &JudicialProcess) {
    println!("Processo {}", process.process_number);
    println!("  Autor:     {}", process.plaintiff);
    println!("  Réu:       {}", process.defendant);
    println!("  Cidade:    {}", process.city);
    println!("  Status:    {}", process.status);
    println!("  Justiça:   {}", process.justice_type);
    println!("  Perícia:   {}", process.pericia_type);
    println!("  Início:    {}", process.start_date);
    println!("  Valor da causa: R$ {:.2}", process.case_value);
    if !process.fees_charged.is_empty() {
        println!("  Honorários propostos:");
        for fee in &process.fees_charged {
            println!("    {}  R$ {:.2}", fee.date, fee.amount);
        }
    }
    if !process.fees_received.is_empty() {
        println!("  Pagamentos recebidos:");
        for payment in &process.fees_received {
            println!(
                "    {}  R$ {:.2} (líquido R$ {:.2})  {}",
                payment.date, payment.amount, payment.total, payment.source
            );
        }
    }
}

fn print_report(report: &pericia_model::AnnualReport) {
    println!("Relatório de pagamentos — {}", report.year);
    if report.months.is_empty() {
        println!("  nenhum pagamento no ano");
        return;
    }
    for month in &report.months {
        println!("  {}", month.month_name);
        for payment in &month.payments {
            println!(
                "    {}  R$ {:.2}  {}",
                payment.date, payment.total, payment.source
            );
        }
        println!(
            "    Subtotal: R$ {:.2} (bruto R$ {:.2}, impostos R$ {:.2})",
            month.net_total, month.gross_total, month.taxes_total
        );
    }
    println!("  Total anual: R$ {:.2}", report.grand_total);
}
