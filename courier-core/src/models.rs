//! Resource structs for notifications, audiences, targets, and templates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four resource kinds courier exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Notification,
    Audience,
    Target,
    Template,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Notification => "notification",
            ResourceKind::Audience => "audience",
            ResourceKind::Target => "target",
            ResourceKind::Template => "template",
        }
    }

    /// Plural path segment used in canonical URIs (e.g. `/targets/{uuid}`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceKind::Notification => "notifications",
            ResourceKind::Audience => "audiences",
            ResourceKind::Target => "targets",
            ResourceKind::Template => "templates",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery state of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    #[default]
    Pending,
    Sending,
    Delivered,
    Failed,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Sending => "sending",
            NotificationStatus::Delivered => "delivered",
            NotificationStatus::Failed => "failed",
        }
    }
}

/// A person (or device) a notification can be delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub uuid: String,

    pub name: String,

    /// E.164-style phone number, stored verbatim.
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

/// A reusable message template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub uuid: String,

    pub name: String,

    /// Message body with `{placeholder}` slots.
    pub body: String,
}

/// A named group of targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audience {
    pub uuid: String,

    pub name: String,

    /// Uuids of the member targets, in membership order.
    #[serde(default)]
    pub members: Vec<String>,
}

/// A request to deliver a template to an audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub uuid: String,

    /// Uuid of the audience to deliver to.
    pub audience: String,

    /// Uuid of the template to render.
    pub template: String,

    #[serde(default)]
    pub status: NotificationStatus,
}

impl Target {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }
}

impl Template {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            name: name.into(),
            body: body.into(),
        }
    }
}

impl Audience {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }
}

impl Notification {
    pub fn new(audience: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            audience: audience.into(),
            template: template.into(),
            status: NotificationStatus::Pending,
        }
    }
}

/// One page of a resource listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// Number of items skipped before this page.
    pub skip: usize,

    /// Requested page size (the page may hold fewer items).
    pub take: usize,

    /// Total item count across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
