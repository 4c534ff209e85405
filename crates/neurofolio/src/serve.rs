//! `neurofolio serve`: the contact relay HTTP server.

use std::time::Duration;

use color_eyre::eyre::WrapErr;
use neurofolio_config::{RelayConfig, env};
use neurofolio_relay::{DeliveryConfig, RelayState, router};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Delivery settings for the relay's email client.
pub fn delivery_config(relay: &RelayConfig) -> DeliveryConfig {
    DeliveryConfig {
        service_id: relay.emailjs.service_id.clone(),
        template_id: relay.emailjs.template_id.clone(),
        public_key: relay.emailjs.public_key.clone(),
        endpoint: relay.endpoint.clone(),
        site_url: relay.site_url.clone(),
        to_name: relay.to_name.clone(),
        timeout: Duration::from_secs(relay.timeout_secs),
    }
}

/// Serve until Ctrl-C.
pub fn run(relay: &RelayConfig) -> color_eyre::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(serve(relay))
}

async fn serve(relay: &RelayConfig) -> color_eyre::Result<()> {
    let delivery = delivery_config(relay);
    if !delivery.is_configured() {
        warn!(
            "contact submissions will fail until {}, {} and {} are set",
            env::SERVICE_ID,
            env::TEMPLATE_ID,
            env::PUBLIC_KEY
        );
    }

    let app = router(RelayState::emailjs(delivery));
    let listener = TcpListener::bind(&relay.addr)
        .await
        .wrap_err_with(|| format!("failed to bind {}", relay.addr))?;
    info!(
        addr = %listener.local_addr()?,
        site_url = relay.site_url.as_deref().unwrap_or("-"),
        "contact relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
