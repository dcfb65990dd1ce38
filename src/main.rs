use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medview_run::{AppState, router};

/// Entry point for the MedView development API server.
///
/// Serves the REST collaborator interface the viewer expects, backed by an
/// in-memory store seeded with demo patients and the bundled diagnosis list.
///
/// # Environment Variables
/// - `MEDVIEW_ADDR`: bind address (default: "0.0.0.0:3000")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medview=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDVIEW_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting MedView dev API on {}", addr);

    let state = AppState::seeded()?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
