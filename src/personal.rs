//! Personal info for the home page.
//!
//! The owner's name, headline, social links and consultation offer live in
//! a remote key-value service so they can change without a rebuild of the
//! content. The build reads them once through a [`KeyValueSource`]; any
//! key the source doesn't supply falls back to `[personal]` in
//! `config.toml`.
//!
//! ## Remote format
//!
//! [`HttpSource`] accepts either a flat object or the same object wrapped
//! in `entries`:
//!
//! ```text
//! {"name": "Jane Doe", "github": "https://github.com/jane"}
//! {"entries": {"name": "Jane Doe", "github": "https://github.com/jane"}}
//! ```
//!
//! Numbers and booleans are stringified; nulls, arrays and objects are
//! skipped.
//!
//! A failed fetch never fails the build: [`load_personal_info`] logs a
//! warning and uses the defaults.

use crate::config::{PersonalDefaults, RemoteConfig};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use ureq::Agent;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP error: {status} - {body}")]
    Http { status: u16, body: String },
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Unexpected response format: {0}")]
    Format(String),
}

impl From<serde_json::Error> for RemoteError {
    fn from(e: serde_json::Error) -> Self {
        RemoteError::Json(e.to_string())
    }
}

impl From<ureq::Error> for RemoteError {
    fn from(e: ureq::Error) -> Self {
        RemoteError::Http {
            status: 0,
            body: e.to_string(),
        }
    }
}

/// Owner details rendered on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub youtube: Option<String>,
    pub consultation_link: Option<String>,
    pub consultation_price: Option<String>,
}

impl PersonalInfo {
    /// Combine fetched entries with per-field defaults.
    ///
    /// A remote value wins when it is present and not blank. Optional
    /// fields that end up blank are `None`.
    pub fn resolve(entries: &HashMap<String, String>, defaults: &PersonalDefaults) -> Self {
        let pick = |key: &str, fallback: &str| -> String {
            entries
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback.trim())
                .to_string()
        };
        let optional = |key: &str, fallback: &str| Some(pick(key, fallback)).filter(|v| !v.is_empty());

        Self {
            name: pick("name", &defaults.name),
            title: pick("title", &defaults.title),
            linkedin: optional("linkedin", &defaults.linkedin),
            github: optional("github", &defaults.github),
            youtube: optional("youtube", &defaults.youtube),
            consultation_link: optional("consultation_link", &defaults.consultation_link),
            consultation_price: optional("consultation_price", &defaults.consultation_price),
        }
    }

    /// Info built from `[personal]` alone.
    pub fn from_defaults(defaults: &PersonalDefaults) -> Self {
        Self::resolve(&HashMap::new(), defaults)
    }

    /// Social profile links that are set, labelled for display.
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub", &self.github),
            ("LinkedIn", &self.linkedin),
            ("YouTube", &self.youtube),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|u| (label, u)))
        .collect()
    }
}

/// Somewhere personal-info key-value pairs can be read from.
pub trait KeyValueSource {
    fn fetch(&self) -> Result<HashMap<String, String>, RemoteError>;
}

/// Fixed entries. Used offline and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub HashMap<String, String>);

impl KeyValueSource for StaticSource {
    fn fetch(&self) -> Result<HashMap<String, String>, RemoteError> {
        Ok(self.0.clone())
    }
}

/// Blocking JSON fetch from a key-value endpoint.
pub struct HttpSource {
    agent: Agent,
    url: String,
    token: Option<String>,
}

impl HttpSource {
    pub fn new(url: &str, token: Option<String>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            url: url.to_string(),
            token,
        }
    }

    /// Source for `[remote]`, or `None` when no URL is configured.
    pub fn from_config(remote: &RemoteConfig) -> Option<Self> {
        let url = remote.url.as_deref().filter(|u| !u.trim().is_empty())?;
        Some(Self::new(
            url,
            remote.token.clone(),
            Duration::from_secs(remote.timeout_secs),
        ))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl KeyValueSource for HttpSource {
    fn fetch(&self) -> Result<HashMap<String, String>, RemoteError> {
        tracing::debug!(url = %self.url, "fetching personal info");

        let mut request = self.agent.get(&self.url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        let response = request.call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_string());
            return Err(RemoteError::Http {
                status,
                body: error_body,
            });
        }

        let body: Value = body_reader.read_json()?;
        parse_entries(body)
    }
}

/// Flatten a response body into string entries.
pub fn parse_entries(body: Value) -> Result<HashMap<String, String>, RemoteError> {
    let object = match body {
        Value::Object(mut map) => match map.remove("entries") {
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                map.insert("entries".to_string(), other);
                map
            }
            None => map,
        },
        other => {
            return Err(RemoteError::Format(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            )));
        }
    };

    Ok(object
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key, value))
        })
        .collect())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read personal info from `source`, falling back to `defaults`.
pub fn load_personal_info(source: &dyn KeyValueSource, defaults: &PersonalDefaults) -> PersonalInfo {
    match source.fetch() {
        Ok(entries) => {
            tracing::info!(keys = entries.len(), "personal info fetched");
            PersonalInfo::resolve(&entries, defaults)
        }
        Err(e) => {
            tracing::warn!(error = %e, "personal info fetch failed, using config defaults");
            PersonalInfo::from_defaults(defaults)
        }
    }
}
