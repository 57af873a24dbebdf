//! Endpoint strategy: the scanned text is the address of a product record.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::clients::InventoryService;
use crate::model::{ScannedProduct, User};

use super::{Resolution, ScanResolutionError, ScanResolver};

/// Rewrites a scanned payload into the `http` endpoint to fetch.
///
/// The deployment is an internal network, so whatever scheme the QR code carries is
/// replaced by `http`. A payload without a leading scheme is taken as host and path, even
/// when `://` shows up later in it (a query parameter holding another URL, say).
///
/// # Errors
///
/// Returns [`ScanResolutionError::InvalidPayload`] when no usable URL remains.
pub fn normalize_endpoint(payload: &str) -> Result<Url, ScanResolutionError> {
    let payload = payload.trim();
    let rest = strip_scheme(payload);
    if rest.is_empty() {
        return Err(ScanResolutionError::InvalidPayload(payload.to_string()));
    }

    let url = Url::parse(&format!("http://{rest}"))
        .map_err(|e| ScanResolutionError::InvalidPayload(format!("{payload}: {e}")))?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(ScanResolutionError::InvalidPayload(payload.to_string())),
    }
}

/// Drops a leading `scheme://`, where a scheme is an ASCII letter followed by letters,
/// digits, `+`, `-` or `.`.
fn strip_scheme(payload: &str) -> &str {
    let Some((scheme, rest)) = payload.split_once("://") else {
        return payload;
    };
    let mut chars = scheme.chars();
    let leading = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if leading {
        rest
    } else {
        payload
    }
}

/// Fetches the scanned product through the inventory service.
#[derive(Clone)]
pub struct EndpointResolver {
    inventory: Arc<dyn InventoryService>,
}

impl EndpointResolver {
    pub fn new(inventory: Arc<dyn InventoryService>) -> Self {
        Self { inventory }
    }
}

#[async_trait]
impl ScanResolver for EndpointResolver {
    #[instrument(skip(self, _users))]
    async fn resolve(
        &self,
        payload: &str,
        _users: &[User],
    ) -> Result<Resolution, ScanResolutionError> {
        let endpoint = normalize_endpoint(payload)?;
        debug!(%endpoint, "Fetching scanned product");

        let record = self
            .inventory
            .fetch_product_at(&endpoint)
            .await
            .inspect_err(|e| warn!(%endpoint, error = %e, "Scanned product lookup failed"))?;

        Ok(Resolution::Product(ScannedProduct::new(record, endpoint)))
    }
}
