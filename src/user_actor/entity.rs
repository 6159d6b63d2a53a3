use chrono::Utc;

use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{NewUser, User, UserId, UserPatch};

impl Entity for User {
    type Id = UserId;
    type CreateParams = NewUser;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &UserId {
        &self.id
    }

    /// Creates a new User stamped with the current time.
    fn from_create_params(id: UserId, params: NewUser) -> Result<Self, FrameworkError> {
        if params.name.trim().is_empty() {
            return Err(FrameworkError::Rejected("name is required".into()));
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            phone: params.phone,
            address: params.address,
            created_at: Utc::now(),
        })
    }

    /// Updates the user's profile fields. The email is the account key and is
    /// not editable here.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), FrameworkError> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(FrameworkError::Rejected("name cannot be blank".into()));
            }
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), FrameworkError> {
        Ok(())
    }
}
