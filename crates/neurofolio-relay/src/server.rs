use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    middleware,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::contact::{ContactForm, validate};
use crate::email::{DeliveryConfig, EmailJsClient, EmailSender};
use crate::error::RelayError;
use crate::guard::screen;

pub const CONTACT_PATH: &str = "/api/contact";
pub const HEALTH_PATH: &str = "/api/health";

/// Validates submissions and hands them to an [`EmailSender`].
#[derive(Clone)]
pub struct ContactRelay {
    sender: Arc<dyn EmailSender>,
}

impl ContactRelay {
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }

    /// Validate `form` and deliver it. The blocking send runs on the
    /// blocking pool and is awaited to completion.
    pub async fn submit(&self, form: ContactForm) -> Result<(), RelayError> {
        let message = validate(&form).map_err(RelayError::Invalid)?;
        let sender = Arc::clone(&self.sender);
        tokio::task::spawn_blocking(move || sender.send(&message)).await??;
        Ok(())
    }
}

/// Shared state for the relay router.
#[derive(Clone)]
pub struct RelayState {
    pub config: Arc<DeliveryConfig>,
    pub relay: ContactRelay,
}

impl RelayState {
    pub fn new(config: DeliveryConfig, sender: Arc<dyn EmailSender>) -> Self {
        Self {
            config: Arc::new(config),
            relay: ContactRelay::new(sender),
        }
    }

    /// State that delivers through EmailJS.
    pub fn emailjs(config: DeliveryConfig) -> Self {
        let sender = Arc::new(EmailJsClient::new(config.clone()));
        Self::new(config, sender)
    }
}

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route(CONTACT_PATH, post(contact))
        .route(HEALTH_PATH, get(health))
        .layer(middleware::from_fn_with_state(state.clone(), screen))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn contact(State(state): State<RelayState>, body: Bytes) -> Result<Json<Value>, RelayError> {
    // Parsed by hand so a malformed body gets the generic failure response.
    // Well-formed JSON of the wrong shape is a validation failure instead.
    let body: Value = serde_json::from_slice(&body).inspect_err(|err| {
        warn!(error = %err, "unparseable contact body");
    })?;

    let outcome = match ContactForm::from_json(body) {
        Ok(form) => state.relay.submit(form).await,
        Err(errors) => Err(RelayError::Invalid(errors)),
    };
    match outcome {
        Ok(()) => {
            info!("contact form delivered");
            Ok(Json(json!({ "success": true })))
        }
        Err(RelayError::Invalid(errors)) => {
            info!(fields = ?errors.keys().collect::<Vec<_>>(), "contact form rejected");
            Err(RelayError::Invalid(errors))
        }
        Err(err) => {
            error!(error = %err, "contact form delivery failed");
            Err(err)
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
