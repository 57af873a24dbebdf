//! # Inventory Client
//!
//! Read and write access to the remote inventory service.
//!
//! [`InventoryService`] is the seam the rest of the crate depends on;
//! [`HttpInventoryClient`] is the `reqwest`-backed implementation. Tests substitute
//! [`MockInventory`](crate::clients::mock::MockInventory).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ServiceConfig;
use crate::model::{Product, User, UserId};

use super::error::ServiceError;

const USERS_PATH: &str = "api/users";
const USER_ID_HEADER: &str = "User-Id";

/// Operations the workflow needs from the inventory service.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Fetch every operator, in server order.
    async fn list_users(&self) -> Result<Vec<User>, ServiceError>;

    /// Fetch one product from an endpoint taken from a scan.
    async fn fetch_product_at(&self, endpoint: &Url) -> Result<Product, ServiceError>;

    /// Replace the product at `endpoint` with `product`.
    ///
    /// `acting_user` is attached for auditing. When it is `None` the implementation falls
    /// back to a configured sentinel identity rather than refusing the write.
    async fn update_product_at(
        &self,
        endpoint: &Url,
        product: &Product,
        acting_user: Option<UserId>,
    ) -> Result<(), ServiceError>;
}

/// HTTP client for the inventory service.
#[derive(Clone)]
pub struct HttpInventoryClient {
    inner: Arc<HttpInventoryClientInner>,
}

struct HttpInventoryClientInner {
    client: reqwest::Client,
    users_url: Url,
    fallback_user_id: UserId,
}

impl HttpInventoryClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base address cannot be extended with the users path or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let users_url = config
            .base_url
            .join(USERS_PATH)
            .map_err(|e| ServiceError::Network(format!("invalid service address: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpInventoryClientInner {
                client,
                users_url,
                fallback_user_id: config.fallback_user_id,
            }),
        })
    }

    pub fn users_url(&self) -> &Url {
        &self.inner.users_url
    }
}

#[async_trait]
impl InventoryService for HttpInventoryClient {
    #[instrument(skip_all, fields(url = %self.inner.users_url))]
    async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        let response = self
            .inner
            .client
            .get(self.inner.users_url.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "User list request failed");
            return Err(ServiceError::Network(format!(
                "user list request answered {status}"
            )));
        }

        let body = response.bytes().await?;
        let users: Vec<User> = serde_json::from_slice(&body)?;
        debug!(count = users.len(), "Users loaded");
        Ok(users)
    }

    #[instrument(skip_all, fields(%endpoint))]
    async fn fetch_product_at(&self, endpoint: &Url) -> Result<Product, ServiceError> {
        let response = self.inner.client.get(endpoint.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Product request failed");
            return Err(ServiceError::NotFound {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let product: Product = serde_json::from_slice(&body)?;
        debug!(id = %product.id, stock = product.stock_quantity, "Product loaded");
        Ok(product)
    }

    #[instrument(skip_all, fields(%endpoint, id = %product.id, stock = product.stock_quantity))]
    async fn update_product_at(
        &self,
        endpoint: &Url,
        product: &Product,
        acting_user: Option<UserId>,
    ) -> Result<(), ServiceError> {
        let acting_user = acting_user.unwrap_or_else(|| {
            warn!(
                fallback = %self.inner.fallback_user_id,
                "No acting user, attributing update to fallback identity"
            );
            self.inner.fallback_user_id
        });

        let response = self
            .inner
            .client
            .put(endpoint.clone())
            .header(USER_ID_HEADER, acting_user.to_string())
            .json(product)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(%acting_user, "Product updated");
            Ok(())
        } else {
            warn!(status = status.as_u16(), "Update rejected");
            Err(ServiceError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
