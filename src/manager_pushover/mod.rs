pub mod models;

use std::fs::File;
use std::path::Path;
use std::time::Duration;
use log::info;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use thiserror::Error;
use crate::config::Pushover as PushoverParameters;
use crate::manager_pushover::models::MessageResponse;

/// Anything that can deliver a notification with an optional image
pub trait Notifier {
    /// Sends a message
    ///
    /// # Arguments
    ///
    /// * 'message' - message body
    /// * 'title' - message title
    /// * 'attachment' - optional path to an image to attach
    fn send_message(&self, message: &str, title: &str, attachment: Option<&Path>) -> Result<(), PushoverError>;
}

pub struct Pushover {
    client: Client,
    endpoint: String,
    user_key: String,
    api_token: String,
}

impl Pushover {
    /// Returns a new instance of the Pushover struct
    ///
    /// # Arguments
    ///
    /// * 'config' - Pushover credentials and endpoint
    pub fn new(config: &PushoverParameters) -> Result<Self, PushoverError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(
            Self {
                client,
                endpoint: config.endpoint.clone(),
                user_key: config.user_key.clone(),
                api_token: config.api_token.clone(),
            }
        )
    }

    /// Builds the multipart form for a message
    ///
    /// # Arguments
    ///
    /// * 'message' - message body
    /// * 'title' - message title
    /// * 'attachment' - optional open image file and its file name
    fn form(&self, message: &str, title: &str, attachment: Option<(File, String)>) -> Result<Form, PushoverError> {
        let form = Form::new()
            .text("token", self.api_token.clone())
            .text("user", self.user_key.clone())
            .text("message", message.to_string())
            .text("title", title.to_string());

        match attachment {
            Some((file, file_name)) => {
                let part = Part::reader(file)
                    .file_name(file_name)
                    .mime_str("image/png")?;
                Ok(form.part("attachment", part))
            },
            None => Ok(form),
        }
    }
}

impl Notifier for Pushover {
    fn send_message(&self, message: &str, title: &str, attachment: Option<&Path>) -> Result<(), PushoverError> {
        // The file handle is owned by the form and closed once the request is done
        let attachment = match attachment {
            Some(path) => {
                let file = File::open(&path)
                    .map_err(|e| PushoverError::AttachmentError(format!("{}: {}", path.display(), e)))?;
                let file_name = path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "attachment.png".to_string());
                Some((file, file_name))
            },
            None => None,
        };

        let form = self.form(message, title, attachment)?;

        let response = self.client
            .post(&self.endpoint)
            .multipart(form)
            .send()?;

        let status = response.status();
        let json = response.text()?;
        let request = check_response(status.is_success(), &json)?;

        info!("notification sent, request: {}", request);

        Ok(())
    }
}

/// Checks the reply from Pushover and returns the request id on success
///
/// # Arguments
///
/// * 'http_ok' - whether the HTTP status was a success
/// * 'json' - the response body
fn check_response(http_ok: bool, json: &str) -> Result<String, PushoverError> {
    let response: MessageResponse = serde_json::from_str(json)
        .map_err(|e| PushoverError::ParseError(format!("{}: {}", e, json)))?;

    if !http_ok || response.status != 1 {
        return Err(PushoverError::RejectedError(response.errors.join(", ")));
    }

    Ok(response.request.unwrap_or_default())
}

/// Error depicting errors that occur while sending notifications
///
#[derive(Debug, Error)]
pub enum PushoverError {
    #[error("AttachmentError: {0}")]
    AttachmentError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("RejectedError: {0}")]
    RejectedError(String),
    #[error("NetworkError: {0}")]
    NetworkError(#[from] reqwest::Error),
}
