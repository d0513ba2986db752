use std::sync::Arc;

use tracing::info;

use flock_db::Database;
use flock_db::models::UserRow;
use flock_types::api::UpdateProfileRequest;
use flock_types::models::{Principal, Profile};

use crate::convert;
use crate::error::{SocialError, SocialResult};

const MAX_BIO_LEN: usize = 500;

#[derive(Clone)]
pub struct Profiles {
    db: Arc<Database>,
}

impl Profiles {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn profile(&self, principal: &Principal) -> SocialResult<Profile> {
        let row = self
            .db
            .get_user_by_id(&principal.id.to_string())?
            .ok_or(SocialError::NotFound("User"))?;
        self.build(row)
    }

    /// Absent fields stay as they are. An empty `email` or `profile_picture`
    /// clears it.
    pub fn update(
        &self,
        principal: &Principal,
        req: UpdateProfileRequest,
    ) -> SocialResult<Profile> {
        let email = req.email.as_deref().map(str::trim);
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            validate_email(email)?;
        }
        if let Some(bio) = req.bio.as_deref() {
            if bio.chars().count() > MAX_BIO_LEN {
                return Err(SocialError::Validation(format!(
                    "Bio must be at most {} characters.",
                    MAX_BIO_LEN
                )));
            }
        }

        let id = principal.id.to_string();
        if !self
            .db
            .update_profile(&id, email, req.bio.as_deref(), req.profile_picture.as_deref())?
        {
            return Err(SocialError::NotFound("User"));
        }
        info!("{} updated their profile", principal.username);

        self.profile(principal)
    }

    fn build(&self, row: UserRow) -> SocialResult<Profile> {
        Ok(Profile {
            id: convert::uuid(&row.id, "user id"),
            followers_count: self.db.count_followers(&row.id)?,
            following_count: self.db.count_following(&row.id)?,
            created_at: convert::timestamp(&row.created_at, "user created_at"),
            username: row.username,
            email: row.email,
            bio: row.bio,
            profile_picture: row.profile_picture,
        })
    }
}

/// Shape check only: one `@` with something on both sides.
pub fn validate_email(email: &str) -> SocialResult<()> {
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(SocialError::Validation("Enter a valid email address.".into())),
    }
}
