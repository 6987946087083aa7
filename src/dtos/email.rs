// src/dtos/email.rs
use serde::Serialize;

/// Body of `POST /email/send` (staff invitation emails).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub emails: Vec<String>,
    pub admin_id: String,
}
