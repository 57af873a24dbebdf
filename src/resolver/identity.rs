//! Identity strategy: the scanned text names a user that was loaded at startup.

use async_trait::async_trait;
use tracing::debug;

use crate::model::User;

use super::{Resolution, ScanResolutionError, ScanResolver};

/// Matches the payload against the loaded users.
///
/// Numeric id equality is tried first, then username equality; the first match wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl IdentityResolver {
    pub fn find<'a>(payload: &str, users: &'a [User]) -> Option<&'a User> {
        let payload = payload.trim();
        let by_id = payload
            .parse::<i64>()
            .ok()
            .and_then(|id| users.iter().find(|u| u.id.0 == id));
        by_id.or_else(|| users.iter().find(|u| u.username == payload))
    }
}

#[async_trait]
impl ScanResolver for IdentityResolver {
    async fn resolve(
        &self,
        payload: &str,
        users: &[User],
    ) -> Result<Resolution, ScanResolutionError> {
        let user = Self::find(payload, users)
            .ok_or_else(|| ScanResolutionError::UnknownIdentity(payload.trim().to_string()))?;
        debug!(id = %user.id, username = %user.username, "Identity resolved");
        Ok(Resolution::User(user.clone()))
    }
}
