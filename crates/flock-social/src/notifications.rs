use std::sync::Arc;

use uuid::Uuid;

use flock_db::Database;
use flock_types::models::{NotificationView, Principal};

use crate::convert;
use crate::error::{SocialError, SocialResult};

/// Read side of the notifications written by `Interactions::like`.
#[derive(Clone)]
pub struct Notifications {
    db: Arc<Database>,
}

impl Notifications {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// The principal's notifications, newest first.
    pub fn list(
        &self,
        principal: &Principal,
        unread_only: bool,
    ) -> SocialResult<Vec<NotificationView>> {
        let rows = self
            .db
            .list_notifications(&principal.id.to_string(), unread_only)?;
        Ok(rows.into_iter().map(convert::notification_view).collect())
    }

    /// Someone else's notification is reported as missing, not forbidden.
    pub fn mark_read(&self, principal: &Principal, id: Uuid) -> SocialResult<NotificationView> {
        self.db
            .mark_notification_read(&id.to_string(), &principal.id.to_string())?
            .map(convert::notification_view)
            .ok_or(SocialError::NotFound("Notification"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{post, social, user};

    #[test]
    fn mark_read_filters_unread() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        let p1 = post(&social, &bob, "p1");
        let p2 = post(&social, &bob, "p2");
        social.interactions.like(&alice, p1.id).unwrap();
        social.interactions.like(&alice, p2.id).unwrap();

        let all = social.notifications.list(&bob, false).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].target_id, p2.id);

        let marked = social.notifications.mark_read(&bob, all[0].id).unwrap();
        assert!(marked.read);

        let unread = social.notifications.list(&bob, true).unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].target_id, p1.id);
    }

    #[test]
    fn cannot_mark_others_notifications() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        let p = post(&social, &bob, "p");
        social.interactions.like(&alice, p.id).unwrap();

        let note_id = social.notifications.list(&bob, false).unwrap()[0].id;
        let err = social.notifications.mark_read(&alice, note_id).unwrap_err();
        assert!(matches!(err, SocialError::NotFound("Notification")));
    }
}
