use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Users, as assigned by the inventory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An operator known to the inventory service.
///
/// Users are loaded once at startup and never modified by this application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a User with no recorded creation time (the Unix epoch).
    ///
    /// # Arguments
    /// * `id` - Server-assigned identifier
    /// * `username` - Login name shown in the operator picker
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: String::new(),
            full_name: String::new(),
            created_at: DateTime::UNIX_EPOCH,
        }
    }
}

// The service emits either RFC 3339 or zone-less ISO timestamps; the latter are taken as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_user_from_service_json() {
        let json = r#"[{
            "id": 1,
            "username": "ana",
            "email": "ana@example.com",
            "fullName": "Ana Petrovic",
            "createdAt": "2024-03-01T08:15:00Z"
        }]"#;

        let users: Vec<User> = serde_json::from_str(json).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, UserId(1));
        assert_eq!(users[0].username, "ana");
        assert_eq!(users[0].full_name, "Ana Petrovic");
        assert_eq!(users[0].created_at.year(), 2024);
    }

    #[test]
    fn test_zone_less_timestamp_is_utc() {
        let json = r#"{"id": 2, "username": "marko", "createdAt": "2024-03-01T08:15:30.123456"}"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.created_at.hour(), 8);
        assert_eq!(user.created_at.second(), 30);
        assert!(user.email.is_empty());
    }

    #[test]
    fn test_garbage_timestamp_is_rejected() {
        let json = r#"{"id": 2, "username": "marko", "createdAt": "yesterday"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }
}
