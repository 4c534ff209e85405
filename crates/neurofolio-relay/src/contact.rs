//! Contact form validation and sanitization.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// Longest name forwarded, in UTF-16 code units.
pub const NAME_MAX_CHARS: usize = 100;
/// Longest email address forwarded, in UTF-16 code units.
pub const EMAIL_MAX_CHARS: usize = 100;
/// Longest message forwarded, in UTF-16 code units.
pub const MESSAGE_MAX_CHARS: usize = 5000;

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

/// Key for errors about the body as a whole.
pub const FORM_KEY: &str = "form";

/// Shape check for email addresses. Leading dots and `..` are rejected
/// separately because the regex engine has no lookahead.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email pattern is valid")
});

/// A submitted field: text, or a JSON value of some other type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Other(Value),
}

/// Raw contact form as submitted. Any field may be missing or mistyped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<FieldValue>,
    #[serde(default)]
    pub email: Option<FieldValue>,
    #[serde(default)]
    pub message: Option<FieldValue>,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(FieldValue::Text(name.into())),
            email: Some(FieldValue::Text(email.into())),
            message: Some(FieldValue::Text(message.into())),
        }
    }

    /// Read a form from a parsed JSON body. Anything but an object is a
    /// validation failure under [`FORM_KEY`].
    pub fn from_json(body: Value) -> Result<Self, FieldErrors> {
        if !body.is_object() {
            let mut errors = FieldErrors::new();
            push(&mut errors, FORM_KEY, &format!("Expected object, received {}", kind(&body)));
            return Err(errors);
        }
        serde_json::from_value(body).map_err(|err| {
            let mut errors = FieldErrors::new();
            push(&mut errors, FORM_KEY, &err.to_string());
            errors
        })
    }
}

/// A validated, trimmed and length-capped contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Validation messages keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

/// Validate a submission and sanitize it for delivery.
///
/// Every failing field is reported, not only the first. Lengths are counted
/// in UTF-16 code units, as browsers count them.
pub fn validate(form: &ContactForm) -> Result<ContactMessage, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = text(&mut errors, "name", &form.name);
    if name.is_some_and(|name| utf16_len(name) < NAME_MIN_CHARS) {
        push(&mut errors, "name", "Name must be at least 2 characters");
    }

    let email = text(&mut errors, "email", &form.email);
    if email.is_some_and(|email| !is_valid_email(email)) {
        push(&mut errors, "email", "Invalid email address");
    }

    let message = text(&mut errors, "message", &form.message);
    if message.is_some_and(|message| utf16_len(message) < MESSAGE_MIN_CHARS) {
        push(&mut errors, "message", "Message must be at least 10 characters");
    }

    match (name, email, message) {
        (Some(name), Some(email), Some(message)) if errors.is_empty() => Ok(ContactMessage {
            name: cap(name.trim(), NAME_MAX_CHARS),
            email: cap(email.trim(), EMAIL_MAX_CHARS),
            message: cap(message.trim(), MESSAGE_MAX_CHARS),
        }),
        _ => Err(errors),
    }
}

/// Whether `email` looks like a deliverable address.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_PATTERN.is_match(email)
}

/// The field's text, or `None` after recording why there is none.
fn text<'a>(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &'a Option<FieldValue>,
) -> Option<&'a str> {
    match value {
        Some(FieldValue::Text(text)) => Some(text.as_str()),
        Some(FieldValue::Other(other)) => {
            push(errors, field, &format!("Expected string, received {}", kind(other)));
            None
        }
        None => {
            push(errors, field, "Required");
            None
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Longest prefix of `text` within `max` UTF-16 code units. Surrogate pairs
/// are never split.
fn cap(text: &str, max: usize) -> String {
    let mut units = 0;
    text.chars()
        .take_while(|c| {
            units += c.len_utf16();
            units <= max
        })
        .collect()
}

fn push(errors: &mut FieldErrors, field: &'static str, message: &str) {
    errors.entry(field).or_default().push(message.to_string());
}
