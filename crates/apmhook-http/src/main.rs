//! apmhook demo server.
//!
//! Serves a few pages behind the instrumentation middleware and exposes the
//! in-process agent on `/metrics`.

use tracing_subscriber::{fmt, EnvFilter};

use apmhook_http::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "apmhook.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::ApmState::from_config(&cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "apmhook demo starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
