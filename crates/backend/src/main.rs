pub mod routes;
pub mod shared;
pub mod system;

use anyhow::Context;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let addr = config.server.socket_addr()?;
    let dist_dir = shared::config::resolve_dist_dir(&config);
    tracing::info!(
        "Serving {} from {}",
        config.frontend.base_path(),
        dist_dir.display()
    );
    if !dist_dir.join("index.html").exists() {
        tracing::warn!(
            "index.html not found in {}; build the frontend first",
            dist_dir.display()
        );
    }

    let app = routes::router(&config.frontend, &dist_dir);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!("Port {} is already in use", addr.port());
            } else {
                tracing::error!("Failed to bind to {}: {}", addr, e);
            }
            return Err(e).with_context(|| format!("cannot bind {addr}"));
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
