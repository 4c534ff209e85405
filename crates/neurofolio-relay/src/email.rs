//! Outbound delivery through the EmailJS REST API.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::contact::ContactMessage;
use crate::error::DeliveryError;

/// Origin sent upstream when no site URL is configured.
const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Settings for the email service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    /// Send endpoint.
    pub endpoint: String,
    /// Public URL of the site.
    pub site_url: Option<String>,
    /// Recipient display name.
    pub to_name: String,
    /// Timeout for the whole request.
    pub timeout: Duration,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            service_id: None,
            template_id: None,
            public_key: None,
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".to_string(),
            site_url: None,
            to_name: "Portfolio Owner".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl DeliveryConfig {
    /// Whether all identifiers needed to deliver mail are present.
    pub fn is_configured(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|id| id.as_deref().is_some_and(|v| !v.is_empty()))
    }

    /// Value of the `Origin` header sent upstream.
    pub fn origin(&self) -> &str {
        self.site_url.as_deref().unwrap_or(DEFAULT_ORIGIN)
    }
}

/// Request body expected by EmailJS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailPayload {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

/// Values substituted into the email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub subject: String,
    pub to_name: String,
    pub reply_to: String,
}

impl EmailPayload {
    /// Build the payload for `message`, or fail if identifiers are missing.
    pub fn build(config: &DeliveryConfig, message: &ContactMessage) -> Result<Self, DeliveryError> {
        let (Some(service_id), Some(template_id), Some(user_id)) = (
            config.service_id.clone(),
            config.template_id.clone(),
            config.public_key.clone(),
        ) else {
            return Err(DeliveryError::NotConfigured);
        };

        Ok(Self {
            service_id,
            template_id,
            user_id,
            template_params: TemplateParams {
                from_name: message.name.clone(),
                from_email: message.email.clone(),
                message: message.message.clone(),
                subject: format!("Portfolio Contact from {}", message.name),
                to_name: config.to_name.clone(),
                reply_to: message.email.clone(),
            },
        })
    }
}

/// Something that can deliver a contact message.
///
/// Implementations block; async callers run them on the blocking pool.
pub trait EmailSender: Send + Sync {
    fn send(&self, message: &ContactMessage) -> Result<(), DeliveryError>;
}

/// Delivers messages through the EmailJS REST API. One attempt per message.
#[derive(Debug)]
pub struct EmailJsClient {
    config: DeliveryConfig,
    agent: ureq::Agent,
}

impl EmailJsClient {
    pub fn new(config: DeliveryConfig) -> Self {
        // Non-2xx statuses come back as responses so the body can be logged.
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { config, agent }
    }
}

impl EmailSender for EmailJsClient {
    fn send(&self, message: &ContactMessage) -> Result<(), DeliveryError> {
        let payload = EmailPayload::build(&self.config, message).inspect_err(|_| {
            warn!("missing EmailJS configuration");
        })?;

        debug!(
            service_id = %payload.service_id,
            template_id = %payload.template_id,
            from = %payload.template_params.from_email,
            "sending contact email"
        );

        let mut response = self
            .agent
            .post(&self.config.endpoint)
            .header("Origin", self.config.origin())
            .send_json(&payload)?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        debug!(status, body = %body, "email service responded");

        if status == 200 {
            info!(from = %payload.template_params.from_email, "contact email sent");
            Ok(())
        } else {
            warn!(status, body = %body, "email service rejected message");
            Err(DeliveryError::Rejected { status, body })
        }
    }
}
