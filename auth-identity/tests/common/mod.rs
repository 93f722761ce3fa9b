#![allow(dead_code)]

use auth_identity::password::BcryptPasswordHasher;
use auth_identity::repository::InMemoryUserRepository;
use auth_identity::token::JwtTokenProvider;
use auth_identity::*;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config() -> IdentityConfig {
    IdentityConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..Default::default()
    }
}

pub struct TestContext {
    pub store: Arc<InMemoryUserRepository>,
    pub service: Arc<IdentityService>,
    pub handlers: IdentityHandlers,
}

/// Handlers over an in-memory store with a cheap bcrypt cost
pub fn create_test_context() -> TestContext {
    let config = test_config();
    let store = Arc::new(InMemoryUserRepository::new());
    let service = Arc::new(IdentityService::new(
        store.clone(),
        Arc::new(BcryptPasswordHasher::new(4)),
        Arc::new(JwtTokenProvider::new(&config)),
        config,
    ));
    let handlers = IdentityHandlers::new(service.clone());

    TestContext { store, service, handlers }
}

pub fn register_request(email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Ada".to_string(),
        email: email.to_string(),
        goal: "run a marathon".to_string(),
        profile_img: "ada.png".to_string(),
        password: password.to_string(),
    }
}

pub fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn change_password_request(token: &str, old: &str, new: &str, confirm: &str) -> ChangePasswordRequest {
    ChangePasswordRequest {
        token: token.to_string(),
        old_password: old.to_string(),
        new_password: new.to_string(),
        confirm_new_password: confirm.to_string(),
    }
}

/// Register and return the issued token
pub async fn register(ctx: &TestContext, email: &str, password: &str) -> String {
    ctx.handlers
        .register(register_request(email, password))
        .await
        .into_payload()
        .expect("registration should succeed")
        .token
}
