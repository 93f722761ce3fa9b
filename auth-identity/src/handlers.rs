// Operation boundary for the identity service.
// Transports call these and receive an `Outcome`; no error escapes.

use crate::{models::*, outcome::Outcome, service::IdentityService};
use std::sync::Arc;

pub struct IdentityHandlers {
    service: Arc<IdentityService>,
}

impl IdentityHandlers {
    pub fn new(service: Arc<IdentityService>) -> Self {
        Self { service }
    }

    pub async fn register(&self, request: RegisterRequest) -> Outcome<AuthPayload> {
        Outcome::from_result("register", self.service.register_user(request).await)
    }

    pub async fn login(&self, request: LoginRequest) -> Outcome<AuthPayload> {
        let result = self.service.authenticate(&request.email, &request.password).await;
        Outcome::from_result("login", result)
    }

    pub async fn update_profile(&self, request: UpdateProfileRequest) -> Outcome<AuthPayload> {
        let result = self.service.update_profile(&request.token, request.changes).await;
        Outcome::from_result("update_profile", result)
    }

    pub async fn change_password(&self, request: ChangePasswordRequest) -> Outcome<MessagePayload> {
        let result = self.service
            .change_password(request)
            .await
            .map(|()| MessagePayload::new("Password updated successfully"));
        Outcome::from_result("change_password", result)
    }

    pub async fn current_profile(&self, token: &str) -> Outcome<ProfileView> {
        Outcome::from_result("current_profile", self.service.current_profile(token).await)
    }
}
