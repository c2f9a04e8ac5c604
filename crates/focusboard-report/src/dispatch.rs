//! Outbound delivery of exported payloads

use crate::error::DispatchError;
use focusboard_core::Config;
use reqwest::multipart::{Form, Part};
use std::future::Future;

/// Exported payload attached to an outbound message
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub to: String,
    pub from: Option<String>,
    pub subject: String,
    pub body: String,
    pub attachment: Attachment,
}

/// Collaborator that delivers one message.
///
/// Implementations report every failure; retrying is left to the caller.
pub trait Mailer {
    fn send(
        &self,
        message: &OutboundMessage,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

/// Mailer posting messages to an HTTP relay as multipart form data
pub struct RelayMailer {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl RelayMailer {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, DispatchError> {
        let url = config
            .relay_url
            .as_deref()
            .ok_or(DispatchError::NotConfigured("relay_url"))?;
        let token = config
            .relay_token
            .as_deref()
            .ok_or(DispatchError::NotConfigured("FOCUSBOARD_RELAY_TOKEN"))?;
        Ok(Self::new(url, token))
    }

    fn form(message: &OutboundMessage) -> Result<Form, DispatchError> {
        let part = Part::bytes(message.attachment.bytes.clone())
            .file_name(message.attachment.filename.clone())
            .mime_str(&message.attachment.content_type)
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        let mut form = Form::new()
            .text("to", message.to.clone())
            .text("subject", message.subject.clone())
            .text("body", message.body.clone());
        if let Some(from) = &message.from {
            form = form.text("from", from.clone());
        }
        Ok(form.part("attachment", part))
    }
}

impl Mailer for RelayMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DispatchError> {
        let form = Self::form(message)?;

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    DispatchError::Connection(e.to_string())
                } else {
                    DispatchError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DispatchError::AuthenticationRejected {
                status: status.as_u16(),
            });
        }
        let body = response.text().await.unwrap_or_default();
        Err(DispatchError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Reject addresses that cannot possibly be delivered
pub fn validate_destination(address: &str) -> Result<(), DispatchError> {
    let invalid = || DispatchError::InvalidDestination(address.to_string());

    if address.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = address.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Hand a message to `mailer` once; failures are logged and returned
pub async fn dispatch<M: Mailer>(mailer: &M, message: &OutboundMessage) -> Result<(), DispatchError> {
    validate_destination(&message.to)?;

    match mailer.send(message).await {
        Ok(()) => {
            tracing::info!(
                to = %message.to,
                attachment = %message.attachment.filename,
                bytes = message.attachment.bytes.len(),
                "dispatched report"
            );
            Ok(())
        }
        Err(e) => {
            tracing::warn!(to = %message.to, error = %e, "dispatch failed");
            Err(e)
        }
    }
}
