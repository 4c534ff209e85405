//! Contact form relay.
//!
//! Validates contact submissions, forwards them to a transactional email API,
//! and exposes the whole thing as an axum router.
//!
//! ## Endpoints
//!
//! | Method | Path           | Responses                                        |
//! |--------|----------------|--------------------------------------------------|
//! | POST   | `/api/contact` | 200 sent, 400 field errors, 403 foreign origin, 500 failure |
//! | GET    | `/api/health`  | 200 liveness                                     |

mod contact;
mod email;
mod error;
mod guard;
mod server;

pub use contact::{
    ContactForm, ContactMessage, EMAIL_MAX_CHARS, FORM_KEY, FieldErrors, FieldValue,
    MESSAGE_MAX_CHARS, NAME_MAX_CHARS, is_valid_email, validate,
};
pub use email::{DeliveryConfig, EmailJsClient, EmailSender, EmailPayload, TemplateParams};
pub use error::{DeliveryError, RelayError};
pub use server::{CONTACT_PATH, ContactRelay, HEALTH_PATH, RelayState, router};
