// Process notifications - messages tied to a user or role recipient

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::step::UserRole;

/// Who a notification is addressed to: one user, or everyone holding a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    User(String),
    Role(UserRole),
}

/// Category tag for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Assignment,
    ProcessUpdate,
    ApprovalRequest,
    System,
}

/// A message created as a side effect of process actions.
///
/// Mutated only to flip the read flag; flipping twice is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessNotification {
    pub id: Uuid,
    pub recipient: Recipient,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,

    /// Optional deep link into the consuming UI
    pub link: Option<String>,
}

impl ProcessNotification {
    pub fn new<T, M>(recipient: Recipient, kind: NotificationKind, title: T, message: M) -> Self
    where
        T: Into<String>,
        M: Into<String>,
    {
        ProcessNotification {
            id: Uuid::new_v4(),
            recipient,
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: Utc::now(),
            link: None,
        }
    }

    pub fn with_link<L: Into<String>>(mut self, link: L) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Whether this notification is addressed to the given user id or role
    pub fn addressed_to(&self, user_id: &str, role: UserRole) -> bool {
        match &self.recipient {
            Recipient::User(id) => id == user_id,
            Recipient::Role(r) => *r == role,
        }
    }
}
