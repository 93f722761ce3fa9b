use crate::{
    config::*, error::*, models::*, password::*, repository::*, token::*,
};
use logger_redacted::redact_email;
use std::sync::Arc;
use tracing::{info, warn};

/// Identity operations over an injected store and primitives.
///
/// Each operation is a short validation pipeline ending in at most one store
/// mutation. Failures come back as [`IdentityError`]; turning them into
/// outcomes is the job of [`IdentityHandlers`](crate::handlers::IdentityHandlers).
pub struct IdentityService {
    user_repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenProvider>,
    config: IdentityConfig,
}

impl IdentityService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenProvider>,
        config: IdentityConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
            config,
        }
    }

    /// Build the default primitives (JWT tokens, configured hasher) around a store
    pub fn from_config(user_repo: Arc<dyn UserRepository>, config: IdentityConfig) -> Result<Self> {
        config.validate()?;
        let hasher = hasher_from_config(&config);
        let tokens: Arc<dyn TokenProvider> = Arc::new(JwtTokenProvider::new(&config));
        Ok(Self::new(user_repo, hasher, tokens, config))
    }

    #[tracing::instrument(name = "identity.register", skip_all)]
    pub async fn register_user(&self, request: RegisterRequest) -> Result<AuthPayload> {
        let email = self.normalize_email(&request.email);

        // Read-then-write: the store's own uniqueness check catches a lost race
        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!(email = %redact_email(&email), "Registration refused, email taken");
            return Err(IdentityError::EmailAlreadyInUse);
        }

        let password_digest = self.hash_password(&request.password).await?;

        let user = self.user_repo
            .create(NewUser {
                email,
                name: request.name,
                goal: request.goal,
                profile_img: request.profile_img,
                password_digest,
            })
            .await?;

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, email = %redact_email(&user.email), "User registered");

        Ok(AuthPayload {
            profile: ProfileView::from(&user),
            token,
        })
    }

    #[tracing::instrument(name = "identity.authenticate", skip_all)]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthPayload> {
        let email = self.normalize_email(email);

        let user = self.user_repo.find_by_email(&email).await?
            .ok_or(IdentityError::UserNotFound)?;

        // Only reached with a record in hand
        if !self.verify_password(password, &user.password_digest).await? {
            warn!(user_id = %user.id, "Login refused, wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, "User authenticated");

        Ok(AuthPayload {
            profile: ProfileView::from(&user),
            token,
        })
    }

    #[tracing::instrument(name = "identity.update_profile", skip_all)]
    pub async fn update_profile(&self, token: &str, mut changes: ProfileChanges) -> Result<AuthPayload> {
        let user = self.resolve_token(token).await?;

        if let Some(email) = changes.email.take() {
            let email = self.normalize_email(&email);
            self.ensure_email_free_for(&user, &email).await?;
            changes.email = Some(email);
        }

        let updated = if changes.is_empty() {
            user
        } else {
            self.user_repo
                .update_by_id(user.id, UserUpdate::from(changes))
                .await?
                .ok_or(IdentityError::SubjectNotFound)?
        };

        let token = self.issue_token(&updated)?;
        info!(user_id = %updated.id, "Profile updated");

        Ok(AuthPayload {
            profile: ProfileView::from(&updated),
            token,
        })
    }

    #[tracing::instrument(name = "identity.change_password", skip_all)]
    pub async fn change_password(&self, request: ChangePasswordRequest) -> Result<()> {
        // Checked before the token on purpose: a mismatch is invalid input
        // whatever the caller's identity
        if request.new_password != request.confirm_new_password {
            return Err(IdentityError::PasswordConfirmationMismatch);
        }

        let user = self.resolve_token(&request.token).await?;

        if !self.verify_password(&request.old_password, &user.password_digest).await? {
            warn!(user_id = %user.id, "Password change refused, wrong password");
            return Err(IdentityError::InvalidCredentials);
        }

        let password_digest = self.hash_password(&request.new_password).await?;
        self.user_repo
            .update_by_id(user.id, UserUpdate::password(password_digest))
            .await?
            .ok_or(IdentityError::SubjectNotFound)?;

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    /// Profile of the token's subject
    #[tracing::instrument(name = "identity.current_profile", skip_all)]
    pub async fn current_profile(&self, token: &str) -> Result<ProfileView> {
        let user = self.resolve_token(token).await?;
        Ok(ProfileView::from(&user))
    }

    /// Verify a token and load the record it names.
    ///
    /// A valid token whose record is gone is treated as an identity that is
    /// no longer valid, not as a lookup miss.
    pub async fn resolve_token(&self, token: &str) -> Result<User> {
        let subject = self.tokens.verify(token).map_err(|e| {
            warn!(reason = %e, "Token rejected");
            IdentityError::from(e)
        })?;

        self.user_repo
            .find_by_id(subject.user_id())
            .await?
            .ok_or(IdentityError::SubjectNotFound)
    }

    async fn ensure_email_free_for(&self, user: &User, email: &str) -> Result<()> {
        let others = self.user_repo.list_all().await?;
        let taken = others
            .iter()
            .any(|other| other.id != user.id && other.email == email);

        if taken {
            warn!(user_id = %user.id, email = %redact_email(email), "Email change refused, email taken");
            return Err(IdentityError::EmailAlreadyInUse);
        }
        Ok(())
    }

    fn normalize_email(&self, email: &str) -> String {
        if self.config.normalize_email {
            email.trim().to_lowercase()
        } else {
            email.to_string()
        }
    }

    fn issue_token(&self, user: &User) -> Result<String> {
        Ok(self.tokens.issue(&Subject::new(user.id))?)
    }

    async fn hash_password(&self, password: &str) -> Result<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| IdentityError::InternalError(e.into()))?
    }

    async fn verify_password(&self, password: &str, digest: &str) -> Result<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let digest = digest.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| IdentityError::InternalError(e.into()))?
    }
}
