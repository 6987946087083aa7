// src/services/auth.rs
//! Authentication flows against the admin/staff/common endpoints.
//!
//! Successful login/register calls store the returned token in the shared
//! session context so every other service picks it up.

use std::sync::Arc;

use tracing::instrument;

use crate::dtos::auth::{
    ChangePasswordRequest, LoginRequest, LogoutRequest, RegisterAdminRequest,
    RegisterStaffRequest, ResetPasswordRequest,
};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::models::user::{AuthResponse, User};

const ADMIN: &str = "/api/v1/admin";
const STAFF: &str = "/api/v1/staff";
const COMMON: &str = "/api/v1/common";

#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn store_token(&self, response: &AuthResponse) {
        let token = response
            .refresh_token
            .clone()
            .unwrap_or_else(|| response.token.clone());
        self.client.session().set_token(token);
    }

    #[instrument(skip(self, password))]
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.client.post(&format!("{ADMIN}/login"), &body).await?;
        self.store_token(&response);
        Ok(response)
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn admin_register(
        &self,
        input: &RegisterAdminRequest,
    ) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.client.post(&format!("{ADMIN}/register"), input).await?;
        self.store_token(&response);
        Ok(response)
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn staff_register(
        &self,
        input: &RegisterStaffRequest,
    ) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.client.post(&format!("{STAFF}/register"), input).await?;
        self.store_token(&response);
        Ok(response)
    }

    /// Log out. The local token is dropped even when the remote call fails.
    #[instrument(skip(self))]
    pub async fn logout(&self, role: &str) -> Result<(), ApiError> {
        let body = LogoutRequest {
            role: role.to_string(),
        };
        let result: Result<serde_json::Value, ApiError> =
            self.client.post(&format!("{COMMON}/logout"), &body).await;
        self.client.session().clear();
        result.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get(&format!("{COMMON}/me"), &[]).await
    }

    #[instrument(skip(self, token, password))]
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), ApiError> {
        let body = ResetPasswordRequest {
            token: token.to_string(),
            password: password.to_string(),
        };
        let _: serde_json::Value = self
            .client
            .post(&format!("{COMMON}/reset-password"), &body)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        let _: serde_json::Value = self
            .client
            .patch(&format!("{COMMON}/change-password"), &body)
            .await?;
        Ok(())
    }
}
