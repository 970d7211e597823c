use serde::{Deserialize, Deserializer, Serialize};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::domain::timestamp;

pub const MAX_NOTIFICATION_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: i64,
    pub notification: String,
    #[serde(with = "timestamp")]
    pub send_at: PrimitiveDateTime,
}

/// Validated data fields of a record, as written by create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFields {
    pub user_id: i64,
    pub notification: String,
    pub send_at: PrimitiveDateTime,
}

impl NotificationFields {
    pub fn into_notification(self, id: Uuid) -> Notification {
        Notification {
            id,
            user_id: self.user_id,
            notification: self.notification,
            send_at: self.send_at,
        }
    }
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPatch {
    pub notification: Option<String>,
    pub send_at: Option<PrimitiveDateTime>,
}

impl NotificationPatch {
    pub fn is_empty(&self) -> bool {
        self.notification.is_none() && self.send_at.is_none()
    }

    pub fn apply_to(self, record: &mut Notification) {
        if let Some(notification) = self.notification {
            record.notification = notification;
        }
        if let Some(send_at) = self.send_at {
            record.send_at = send_at;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_fields(self) -> Vec<FieldError> {
        self.0
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Body of `POST /notifications` and `PUT /notifications/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationPayload {
    pub user_id: Option<i64>,
    pub notification: Option<String>,
    pub send_at: Option<String>,
}

impl NotificationPayload {
    pub fn validate(self) -> Result<NotificationFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let user_id = match self.user_id {
            Some(user_id) if user_id >= 1 => Some(user_id),
            Some(_) => {
                errors.push("user_id", "must be greater than or equal to 1");
                None
            }
            None => {
                errors.push("user_id", "field required");
                None
            }
        };

        let notification = match self.notification {
            Some(text) => check_notification(&mut errors, text),
            None => {
                errors.push("notification", "field required");
                None
            }
        };

        let send_at = match self.send_at {
            Some(raw) => check_send_at(&mut errors, &raw),
            None => {
                errors.push("send_at", "field required");
                None
            }
        };

        match (user_id, notification, send_at) {
            (Some(user_id), Some(notification), Some(send_at)) => {
                errors.into_result(|| NotificationFields {
                    user_id,
                    notification,
                    send_at,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Body of `PATCH /notifications/:id`.
///
/// The outer `Option` tracks presence, the inner one an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationPatchPayload {
    #[serde(default, deserialize_with = "present")]
    pub notification: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub send_at: Option<Option<String>>,
}

impl NotificationPatchPayload {
    pub fn validate(self) -> Result<NotificationPatch, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let notification = match self.notification {
            Some(Some(text)) => check_notification(&mut errors, text),
            Some(None) => {
                errors.push("notification", "may not be null");
                None
            }
            None => None,
        };

        let send_at = match self.send_at {
            Some(Some(raw)) => check_send_at(&mut errors, &raw),
            Some(None) => {
                errors.push("send_at", "may not be null");
                None
            }
            None => None,
        };

        errors.into_result(|| NotificationPatch {
            notification,
            send_at,
        })
    }
}

fn check_notification(errors: &mut ValidationErrors, text: String) -> Option<String> {
    let chars = text.chars().count();
    if chars == 0 {
        errors.push("notification", "must not be empty");
        None
    } else if chars > MAX_NOTIFICATION_CHARS {
        errors.push(
            "notification",
            format!("must be at most {} characters", MAX_NOTIFICATION_CHARS),
        );
        None
    } else {
        Some(text)
    }
}

fn check_send_at(errors: &mut ValidationErrors, raw: &str) -> Option<PrimitiveDateTime> {
    match timestamp::parse(raw) {
        Ok(send_at) => Some(send_at),
        Err(err) => {
            errors.push("send_at", err.to_string());
            None
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
