//! Backend entry-point: loads settings, picks adapters and serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use unblock::domain::catalog::verify_catalogs;
use unblock::inbound::http::health::HealthState;
use unblock::inbound::http::session_config::{BuildMode, session_settings_from_env};
use unblock::outbound::identity::TokenInfoIdentityVerifier;
use unblock::outbound::persistence::{DbPool, PoolConfig};
use unblock::outbound::push::HttpPushTransport;
use unblock::settings::AppSettings;

/// Application bootstrap.
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

    verify_catalogs().wrap_err("catalog tables are inconsistent")?;

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load settings")?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .wrap_err("invalid session configuration")?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(session, bind_addr);

    if let Some(url) = settings.database_url() {
        let pool_config = PoolConfig::new(url).with_max_size(settings.db_max_connections()?);
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    if let Some(endpoint) = settings.push_endpoint()? {
        info!(%endpoint, "delivering notifications through the push gateway");
        let transport = HttpPushTransport::new(endpoint, settings.push_timeout()?)
            .wrap_err("failed to build push client")?;
        config = config.with_push_transport(Arc::new(transport));
    }

    if let Some(endpoint) = settings.identity_endpoint()? {
        info!(%endpoint, "verifying logins against the identity provider");
        let verifier = TokenInfoIdentityVerifier::new(endpoint, settings.identity_timeout()?)
            .wrap_err("failed to build identity client")?;
        config = config.with_identity_verifier(Arc::new(verifier));
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");
    server.await?;
    Ok(())
}
