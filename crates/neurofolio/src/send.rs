//! `neurofolio send`: submit a message to a running relay.

use std::collections::BTreeMap;
use std::time::Duration;

use color_eyre::eyre::{WrapErr, bail};
use neurofolio_relay::CONTACT_PATH;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Relay reply body. Which fields are present depends on the status.
#[derive(Debug, Default, Deserialize)]
struct Reply {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

/// What happened to a submission.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Invalid(BTreeMap<String, Vec<String>>),
    Failed(String),
}

/// Interpret a relay response.
fn interpret(ok: bool, body: &str) -> Outcome {
    let reply: Reply = serde_json::from_str(body).unwrap_or_default();
    if ok {
        Outcome::Sent
    } else if !reply.errors.is_empty() {
        Outcome::Invalid(reply.errors)
    } else {
        Outcome::Failed(
            reply
                .message
                .unwrap_or_else(|| "Something went wrong. Please try again.".to_string()),
        )
    }
}

/// POST the form to the relay at `base_url`.
pub fn submit(
    base_url: &str,
    name: &str,
    email: &str,
    message: &str,
) -> color_eyre::Result<Outcome> {
    let base = base_url.trim_end_matches('/');
    let endpoint = format!("{base}{CONTACT_PATH}");
    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .http_status_as_error(false)
        .build()
        .new_agent();

    debug!(endpoint = %endpoint, "submitting contact form");
    let mut response = agent
        .post(&endpoint)
        .header("Origin", base)
        .send_json(json!({ "name": name, "email": email, "message": message }))
        .wrap_err("Network error. Please check your connection and try again.")?;

    let ok = response.status().is_success();
    let body = response.body_mut().read_to_string()?;
    debug!(status = response.status().as_u16(), "relay responded");
    Ok(interpret(ok, &body))
}

/// Submit and print the outcome. Fails when the message was not sent.
pub fn run(base_url: &str, name: String, email: String, message: String) -> color_eyre::Result<()> {
    match submit(base_url, &name, &email, &message)? {
        Outcome::Sent => {
            println!("Success: Thanks for your message! I'll get back to you soon.");
            Ok(())
        }
        Outcome::Invalid(errors) => {
            eprintln!("Error: Please correct the errors in the form.");
            for (field, messages) in &errors {
                eprintln!("  {field}: {}", messages.join("; "));
            }
            bail!("message was not sent")
        }
        Outcome::Failed(reason) => {
            eprintln!("Error: {reason}");
            bail!("message was not sent")
        }
    }
}
