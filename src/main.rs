use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::{error, info};

use registrar::logging::{init_tracing, shutdown_tracer};
use registrar::metrics::{init_metrics, metrics_app};
use registrar::registrar_config::ServerConfig;
use registrar::router::init_router_with_rate_limits;
use registrar::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let metrics_handle = init_metrics();
    let server = ServerConfig::from_env();
    let state = init_app_state().await?;

    if server.seed_on_startup {
        match registrar_cli::seeder::seed_bootstrap(state.store.as_ref(), &server.seed_accounts)
            .await
        {
            Ok(summary) => info!(
                admin_id = summary.admin_id,
                hod_id = summary.hod_id,
                department_id = summary.department_id,
                created = summary.created,
                "Bootstrap accounts ready"
            ),
            Err(e) => error!(error = %e.error, "Failed to seed bootstrap accounts"),
        }
    }

    let mut app = init_router_with_rate_limits(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
