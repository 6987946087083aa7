// src/services/email.rs
use std::sync::Arc;

use tracing::instrument;

use crate::dtos::email::SendEmailRequest;
use crate::error::ApiError;
use crate::http::ApiClient;

const ENDPOINT: &str = "/api/v1/email";

#[derive(Clone)]
pub struct EmailService {
    client: Arc<ApiClient>,
}

impl EmailService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Send staff invitation emails on behalf of an admin.
    #[instrument(skip(self), fields(count = emails.len()))]
    pub async fn send_invites(&self, emails: &[String], admin_id: &str) -> Result<(), ApiError> {
        let body = SendEmailRequest {
            emails: emails.to_vec(),
            admin_id: admin_id.to_string(),
        };
        let _: serde_json::Value = self.client.post(&format!("{ENDPOINT}/send"), &body).await?;
        Ok(())
    }
}
