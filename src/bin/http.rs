#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use rab_scheduler::{Project, http_api, load_project_from_json};
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let addr: SocketAddr = std::env::var("RAB_SCHEDULER_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let project = match std::env::var("RAB_SCHEDULER_PROJECT") {
        Ok(path) => {
            tracing::info!(%path, "loading project");
            load_project_from_json(&path)?
        }
        Err(_) => Project::new(),
    };

    tracing::info!(%addr, "rab-scheduler HTTP API listening");
    http_api::serve(addr, project).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
