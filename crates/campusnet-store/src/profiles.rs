//! Profile documents under `Profiles/`.

use crate::{DocumentDb, StoreError};
use campusnet_domain::api::ProfileUpdate;
use campusnet_domain::ids::UserId;
use campusnet_domain::{Profile, TreePath};

fn profile_path(user: &UserId) -> Result<TreePath, StoreError> {
    Ok(TreePath::new(["Profiles".to_string(), user.to_string()])?)
}

/// Typed view over the profiles subtree
pub struct ProfileStore<'a> {
    db: &'a mut DocumentDb,
}

impl<'a> ProfileStore<'a> {
    /// Borrow the store for profile operations
    pub fn new(db: &'a mut DocumentDb) -> Self {
        Self { db }
    }

    /// Fetch a profile; absent profiles are `Ok(None)`
    pub fn get(&self, user: &UserId) -> Result<Option<Profile>, StoreError> {
        let path = profile_path(user)?;
        match self.db.get(&path)? {
            Some(doc) => serde_json::from_value(doc.value)
                .map(Some)
                .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string())),
            None => Ok(None),
        }
    }

    /// Fetch a profile that must exist
    pub fn require(&self, user: &UserId) -> Result<Profile, StoreError> {
        self.get(user)?
            .ok_or_else(|| StoreError::NotFound(format!("Profiles/{}", user)))
    }

    /// Write a profile document as-is
    pub fn upsert(&mut self, profile: &Profile) -> Result<(), StoreError> {
        self.db
            .put(&profile_path(&profile.user_id)?, serde_json::to_value(profile)?)?;
        Ok(())
    }

    /// Apply a partial update to an existing profile and return the result
    pub fn apply_update(
        &mut self,
        user: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Profile, StoreError> {
        let mut profile = self.require(user)?;

        if let Some(display_name) = &update.display_name {
            profile.display_name = display_name.clone();
        }
        if let Some(avatar_url) = &update.avatar_url {
            profile.avatar_url = avatar_url.clone();
        }
        if let Some(bio) = &update.bio {
            profile.bio = bio.clone();
        }
        if let Some(gender) = &update.gender {
            profile.gender = gender.clone();
        }
        if let Some(birthday) = &update.birthday {
            profile.birthday = birthday.clone();
        }
        if let Some(department_id) = &update.department_id {
            profile.department_id = department_id.clone();
        }
        if let Some(major_id) = &update.major_id {
            profile.major_id = major_id.clone();
        }
        if let Some(class_id) = &update.class_id {
            profile.class_id = class_id.clone();
        }

        self.upsert(&profile)?;
        Ok(profile)
    }

    /// Profiles matching a search query, sorted by display name
    ///
    /// Matches case-insensitively on display name or student number; an
    /// empty query returns everyone, as the original search screen did.
    pub fn search(&self, query: &str) -> Result<Vec<Profile>, StoreError> {
        let base = TreePath::new(["Profiles".to_string()])?;
        let mut profiles = Vec::new();
        for (path, doc) in self.db.subtree(&base)? {
            let profile: Profile = serde_json::from_value(doc.value)
                .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string()))?;
            if profile.matches(query) {
                profiles.push(profile);
            }
        }
        profiles.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(profiles)
    }
}
