use std::net::SocketAddr;

use anyhow::Context;
use tasklist_server::{
    app_state::AppState, data_access::data_context::DataContext, map_routes, settings::Settings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // ── Settings ───────────────────────────────────────────────
    let settings = Settings::load().context("Failed to load settings")?;

    // ── Storage ────────────────────────────────────────────────
    let data_context = DataContext::new(&settings.database_path)
        .with_context(|| format!("Failed to open database {}", settings.database_path))?;

    if data_context
        .ensure_default_user(&settings.default_admin_username, &settings.default_admin_password)
        .context("Failed to seed default user")?
    {
        tracing::info!(username = %settings.default_admin_username, "created default superuser");
    }

    // ── Router ─────────────────────────────────────────────────
    let addr: SocketAddr = format!("{}:{}", settings.tcp_socket_binding, settings.tcp_socket_port)
        .parse()
        .context("Invalid tcp_socket_binding / tcp_socket_port")?;
    let api_prefix = settings.api_prefix.clone();
    let app = map_routes(AppState::new(data_context, settings));

    // ── Start ──────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "server running");
    tracing::info!("  Tasks page: http://{addr}/tasks/");
    tracing::info!("  Task API:   http://{addr}{api_prefix}/");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

#[cfg(not(feature = "profile-console"))]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tasklist_server=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[cfg(feature = "profile-console")]
fn init_tracing() {
    console_subscriber::init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
