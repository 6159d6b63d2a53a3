use tracing::{error, info, instrument, warn};

use crate::domain::{Email, NewUser, User, UserId, UserPatch};
use crate::error::StoreError;
use crate::store::SharedUserStore;
use crate::user_actor::UserError;

/// Raw registration form input.
#[derive(Debug, Clone, Default)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Registration and profile maintenance. Who the current user is stays the
/// caller's business; every operation takes an explicit id.
#[derive(Clone)]
pub struct UserDirectory {
    users: SharedUserStore,
}

impl UserDirectory {
    pub fn new(users: SharedUserStore) -> Self {
        Self { users }
    }

    #[instrument(skip(self, signup), fields(email = %signup.email))]
    pub async fn register(&self, signup: Signup) -> Result<UserId, UserError> {
        let email = Email::parse(&signup.email)?;
        let name = signup.name.trim();
        if name.is_empty() {
            return Err(UserError::Validation("name must not be empty".into()));
        }

        // Uniqueness is checked here rather than in the actor; two concurrent
        // registrations with one address can both pass.
        if self.users.find_by_email(&email).await?.is_some() {
            warn!("Email already registered");
            return Err(UserError::AlreadyExists(email.to_string()));
        }

        let id = self
            .users
            .insert(NewUser {
                name: name.to_string(),
                email,
                phone: signup.phone.trim().to_string(),
                address: signup.address.trim().to_string(),
            })
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to register user");
                e
            })?;
        info!(user_id = %id, "User registered");
        Ok(id)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn user(&self, id: UserId) -> Result<User, UserError> {
        self.users.get(id).await?.ok_or(UserError::NotFound(id))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let email = Email::parse(email)?;
        Ok(self.users.find_by_email(&email).await?)
    }

    #[instrument(skip(self, patch), fields(user_id = %id))]
    pub async fn update_profile(&self, id: UserId, patch: UserPatch) -> Result<User, UserError> {
        if patch.is_empty() {
            return Err(UserError::Validation("nothing to update".into()));
        }

        match self.users.update(id, patch).await {
            Ok(user) => {
                info!("Profile updated");
                Ok(user)
            }
            Err(StoreError::NotFound { .. }) => Err(UserError::NotFound(id)),
            Err(StoreError::Rejected(reason)) => Err(UserError::Validation(reason)),
            Err(e) => {
                error!(error = %e, "Failed to update profile");
                Err(e.into())
            }
        }
    }
}
