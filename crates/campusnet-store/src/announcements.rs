//! Announcements and per-user read/pin activity.

use crate::{now_millis, DocumentDb, StoreError};
use campusnet_domain::announcement::{ActivityState, Announcement, PinMark, ReadMark};
use campusnet_domain::ids::{AnnouncementId, UserId};
use campusnet_domain::TreePath;

fn announcement_path(
    announcer: &UserId,
    announcement: &AnnouncementId,
) -> Result<TreePath, StoreError> {
    Ok(TreePath::new([
        "Announcements".to_string(),
        announcer.to_string(),
        announcement.to_string(),
    ])?)
}

fn read_path(user: &UserId, announcement: &AnnouncementId) -> Result<TreePath, StoreError> {
    Ok(TreePath::new([
        "Activity".to_string(),
        user.to_string(),
        "Reads".to_string(),
        announcement.to_string(),
    ])?)
}

fn pin_path(user: &UserId, announcement: &AnnouncementId) -> Result<TreePath, StoreError> {
    Ok(TreePath::new([
        "Activity".to_string(),
        user.to_string(),
        "Pins".to_string(),
        announcement.to_string(),
    ])?)
}

/// Typed view over announcements and activity state
pub struct AnnouncementBoard<'a> {
    db: &'a mut DocumentDb,
}

impl<'a> AnnouncementBoard<'a> {
    /// Borrow the store for announcement operations
    pub fn new(db: &'a mut DocumentDb) -> Self {
        Self { db }
    }

    /// Publish an announcement
    pub fn publish(
        &mut self,
        announcer: &UserId,
        title: String,
        content: String,
        audience: String,
    ) -> Result<Announcement, StoreError> {
        let announcement = Announcement {
            announcement_id: AnnouncementId::new(),
            announcer_id: *announcer,
            title,
            content,
            audience,
            created_at: now_millis(),
        };
        self.db.put(
            &announcement_path(announcer, &announcement.announcement_id)?,
            serde_json::to_value(&announcement)?,
        )?;
        Ok(announcement)
    }

    /// Fetch one announcement
    pub fn get(
        &self,
        announcer: &UserId,
        announcement: &AnnouncementId,
    ) -> Result<Announcement, StoreError> {
        let path = announcement_path(announcer, announcement)?;
        let doc = self
            .db
            .get(&path)?
            .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
        serde_json::from_value(doc.value)
            .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string()))
    }

    /// Every announcement from every announcer, newest first
    pub fn list_all(&self) -> Result<Vec<Announcement>, StoreError> {
        let base = TreePath::new(["Announcements".to_string()])?;
        let mut announcements = Vec::new();
        for (path, doc) in self.db.subtree(&base)? {
            if path.depth() != 3 {
                continue;
            }
            let announcement: Announcement = serde_json::from_value(doc.value)
                .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string()))?;
            announcements.push(announcement);
        }
        announcements.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.announcement_id.cmp(&a.announcement_id))
        });
        Ok(announcements)
    }

    /// Mark an announcement read for a user
    ///
    /// Write-once semantics: the marker is always set to true, re-reading
    /// never flips it back.
    pub fn mark_read(
        &mut self,
        user: &UserId,
        announcement: &AnnouncementId,
    ) -> Result<(), StoreError> {
        self.db.put(
            &read_path(user, announcement)?,
            serde_json::to_value(ReadMark { read: true })?,
        )?;
        Ok(())
    }

    /// Toggle the pin state; returns the new state
    pub fn toggle_pin(
        &mut self,
        user: &UserId,
        announcement: &AnnouncementId,
    ) -> Result<bool, StoreError> {
        let path = pin_path(user, announcement)?;
        let pinned = match self.db.get(&path)? {
            Some(doc) => serde_json::from_value::<PinMark>(doc.value)
                .unwrap_or_default()
                .pinned,
            None => false,
        };
        let new_state = !pinned;
        self.db.put(
            &path,
            serde_json::to_value(PinMark { pinned: new_state })?,
        )?;
        Ok(new_state)
    }

    /// Read/pin state of one announcement for a user
    pub fn state_for(
        &self,
        user: &UserId,
        announcement: &AnnouncementId,
    ) -> Result<ActivityState, StoreError> {
        let read = match self.db.get(&read_path(user, announcement)?)? {
            Some(doc) => serde_json::from_value::<ReadMark>(doc.value)
                .unwrap_or_default()
                .read,
            None => false,
        };
        let pinned = match self.db.get(&pin_path(user, announcement)?)? {
            Some(doc) => serde_json::from_value::<PinMark>(doc.value)
                .unwrap_or_default()
                .pinned,
            None => false,
        };
        Ok(ActivityState { read, pinned })
    }

    /// Number of announcements the user has not read, for the header badge
    pub fn unread_count(&self, user: &UserId) -> Result<u32, StoreError> {
        let mut unread = 0;
        for announcement in self.list_all()? {
            if !self.state_for(user, &announcement.announcement_id)?.read {
                unread += 1;
            }
        }
        Ok(unread)
    }
}
