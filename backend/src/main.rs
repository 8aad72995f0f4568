//! Backend entry-point: loads configuration, prepares the database and serves
//! HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use feedback_board::config::AppConfig;
use feedback_board::inbound::http::health::HealthState;
use feedback_board::inbound::http::session_config::{BuildMode, session_settings_from_env};
use feedback_board::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::load_from_iter(std::env::args_os())
        .wrap_err("failed to load configuration")?;
    let database_url = config.database_url()?.to_owned();
    let bind_addr = config.bind_addr()?;

    if config.run_migrations() {
        let applied = run_pending_migrations(&database_url)
            .await
            .wrap_err("failed to run database migrations")?;
        info!(applied, "schema up to date");
    }

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(config.db_max_connections()?),
    )
    .await
    .wrap_err("failed to build database pool")?;

    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(session, bind_addr, pool),
    )?;
    info!(%bind_addr, "feedback board listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}
