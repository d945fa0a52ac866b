#![forbid(unsafe_code)]

use pericia_server::{build_router, AppState, ServerConfig};
use tokio::net::TcpListener;
use tokio::signal::{self, unix::SignalKind};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env();
    if let Err(reason) = config.validate_startup() {
        error!(%reason, "configuração inválida");
        return std::process::ExitCode::FAILURE;
    }
    if !config.auth_configured() {
        warn!("login não configurado; páginas protegidas ficarão inacessíveis");
    }

    let port = config.port;
    let state = AppState::new(config);

    if state.store.is_configured() {
        match state.store.ensure_schema() {
            Ok(()) => info!("esquema do banco verificado"),
            // The 204 fallback path covers an unreachable database at
            // request time; startup keeps going.
            Err(e) => warn!(error = %e, "banco configurado mas inacessível"),
        }
    } else {
        warn!("PERICIA_DB ausente; API responderá 204 para acionar o fallback dos clientes");
    }

    let app = build_router(state);
    let address = format!("0.0.0.0:{port}");
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%address, error = %e, "falha ao abrir a porta");
            return std::process::ExitCode::FAILURE;
        }
    };
    info!(%address, "servidor no ar");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "servidor encerrou com erro");
        return std::process::ExitCode::FAILURE;
    }
    info!("servidor encerrado");
    std::process::ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C recebido, encerrando");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("SIGTERM recebido, encerrando");
            }
            Err(e) => {
                error!(error = %e, "falha ao instalar handler de SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
