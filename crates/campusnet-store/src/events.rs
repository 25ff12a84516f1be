//! Campus events for the home carousel.

use crate::{now_millis, DocumentDb, StoreError};
use campusnet_domain::ids::{EventId, UserId};
use campusnet_domain::Event;
use campusnet_domain::TreePath;

fn event_path(organizer: &UserId, event: &EventId) -> Result<TreePath, StoreError> {
    Ok(TreePath::new([
        "Events".to_string(),
        organizer.to_string(),
        event.to_string(),
    ])?)
}

/// Typed view over the events subtree
pub struct EventCalendar<'a> {
    db: &'a mut DocumentDb,
}

impl<'a> EventCalendar<'a> {
    /// Borrow the store for event operations
    pub fn new(db: &'a mut DocumentDb) -> Self {
        Self { db }
    }

    /// Publish an event
    pub fn publish(
        &mut self,
        organizer: &UserId,
        title: String,
        image_url: String,
        location: String,
        starts_at: u64,
    ) -> Result<Event, StoreError> {
        let event = Event {
            event_id: EventId::new(),
            organizer_id: *organizer,
            title,
            image_url,
            location,
            starts_at,
            created_at: now_millis(),
        };
        self.db.put(
            &event_path(organizer, &event.event_id)?,
            serde_json::to_value(&event)?,
        )?;
        Ok(event)
    }

    /// Every event from every organizer, soonest first
    pub fn list_all(&self) -> Result<Vec<Event>, StoreError> {
        let base = TreePath::new(["Events".to_string()])?;
        let mut events = Vec::new();
        for (path, doc) in self.db.subtree(&base)? {
            if path.depth() != 3 {
                continue;
            }
            let event: Event = serde_json::from_value(doc.value)
                .map_err(|e| StoreError::InvalidData(path.to_string(), e.to_string()))?;
            events.push(event);
        }
        events.sort_by(|a, b| {
            a.starts_at
                .cmp(&b.starts_at)
                .then_with(|| a.event_id.cmp(&b.event_id))
        });
        Ok(events)
    }
}
