use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::actor_framework::{Filter, ResourceClient};
use crate::domain::{Email, NewUser, User, UserId, UserPatch};
use crate::error::StoreError;
use crate::store::UserStore;

const ENTITY: &str = "user";

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, "user", user);

#[async_trait]
impl UserStore for UserClient {
    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, user: NewUser) -> Result<UserId, StoreError> {
        debug!("Sending request");
        self.inner
            .create(user)
            .await
            .map_err(|e| StoreError::from_framework(ENTITY, e))
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.get_user(id).await
    }

    #[instrument(skip(self), fields(email = %email))]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        debug!("Sending request");
        let wanted = email.normalized();
        let matches = self
            .inner
            .list(Filter::new(move |user: &User| user.email.normalized() == wanted))
            .await
            .map_err(|e| StoreError::from_framework(ENTITY, e))?;
        Ok(matches.into_iter().next())
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: UserId, patch: UserPatch) -> Result<User, StoreError> {
        debug!("Sending request");
        self.inner
            .update(id, patch)
            .await
            .map_err(|e| StoreError::from_framework(ENTITY, e))
    }
}
