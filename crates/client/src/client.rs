//! The REST client.

use reqwest::{Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;
use url::Url;

use storedash_core::{
    CategoryId, ColorId, GENERIC_ERROR_MESSAGE, Product, STORE_CONFLICT_MESSAGE, SizeId, Store,
    StoreId, StoreInput, Validate,
};

use crate::endpoint::{Endpoint, Products, WritableEndpoint};
use crate::error::ClientError;

/// Header carrying the caller's identity, as trusted by the server.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-user-id";

/// Storefront product filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category_id: Option<CategoryId>,
    pub color_id: Option<ColorId>,
    pub size_id: Option<SizeId>,
    pub is_featured: Option<bool>,
}

impl ProductQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.category_id {
            pairs.push(("categoryId", id.to_string()));
        }
        if let Some(id) = self.color_id {
            pairs.push(("colorId", id.to_string()));
        }
        if let Some(id) = self.size_id {
            pairs.push(("sizeId", id.to_string()));
        }
        if let Some(featured) = self.is_featured {
            pairs.push(("isFeatured", featured.to_string()));
        }
        pairs
    }
}

/// Client for the per-store REST API.
///
/// Every call is a single request: no retries, no batching and no
/// client-side timeout. Write payloads are validated locally with the same
/// schema the server uses before anything is sent.
///
/// # Example
///
/// ```rust,ignore
/// let client = DashboardClient::new("http://localhost:3000")?.with_owner("user_123");
/// let sizes = client.list::<Sizes>(store_id).await?;
/// ```
#[derive(Clone)]
pub struct DashboardClient {
    client: reqwest::Client,
    /// API origin; the path always ends with `/`.
    base: Url,
    identity_header: String,
    owner: Option<String>,
}

impl DashboardClient {
    /// Create an anonymous client. Anonymous clients can only call the public
    /// read endpoints.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Url` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base,
            identity_header: DEFAULT_IDENTITY_HEADER.to_string(),
            owner: None,
        })
    }

    /// Act as `owner` on every request.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Send the identity in `header` instead of [`DEFAULT_IDENTITY_HEADER`].
    #[must_use]
    pub fn with_identity_header(mut self, header: impl Into<String>) -> Self {
        self.identity_header = header.into();
        self
    }

    /// The owner this client acts as, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve an API path such as `api/stores`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Url` if the path cannot be joined.
    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    fn collection_url<E: Endpoint>(&self, store_id: StoreId) -> Result<Url, ClientError> {
        self.url(&format!("api/{store_id}/{}", E::KIND.path()))
    }

    fn item_url<E: Endpoint>(&self, store_id: StoreId, id: &E::Id) -> Result<Url, ClientError> {
        self.url(&format!("api/{store_id}/{}/{id}", E::KIND.path()))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.owner {
            Some(owner) => builder.header(self.identity_header.as_str(), owner.as_str()),
            None => builder,
        }
    }

    /// Send and turn non-success statuses into errors.
    async fn send(builder: RequestBuilder, conflict: &str) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %body, "Request failed");
        Err(ClientError::from_response(status.as_u16(), &body, conflict))
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = Self::send(self.request(Method::GET, url), GENERIC_ERROR_MESSAGE).await?;
        Ok(response.json().await?)
    }

    async fn write<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T, ClientError> {
        let builder = self.request(method, url).json(body);
        let response = Self::send(builder, GENERIC_ERROR_MESSAGE).await?;
        Ok(response.json().await?)
    }

    // =========================================================================
    // Per-store resources
    // =========================================================================

    /// List every record of `E` in the store.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for an unknown store, or a transport
    /// error.
    #[instrument(skip(self), fields(kind = %E::KIND))]
    pub async fn list<E: Endpoint>(&self, store_id: StoreId) -> Result<Vec<E::Entity>, ClientError> {
        self.fetch(self.collection_url::<E>(store_id)?).await
    }

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the store or record is unknown.
    #[instrument(skip(self, id), fields(kind = %E::KIND, id = %id))]
    pub async fn get<E: Endpoint>(
        &self,
        store_id: StoreId,
        id: E::Id,
    ) -> Result<E::Entity, ClientError> {
        self.fetch(self.item_url::<E>(store_id, &id)?).await
    }

    /// List products with storefront filters.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for an unknown store.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        store_id: StoreId,
        query: &ProductQuery,
    ) -> Result<Vec<Product>, ClientError> {
        let mut url = self.collection_url::<Products>(store_id)?;
        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.fetch(url).await
    }

    /// Create a record. The payload is validated before sending.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` without any request when the payload
    /// is invalid, `ClientError::InvalidReference` when it references a
    /// record outside the store.
    #[instrument(skip(self, input), fields(kind = %E::KIND))]
    pub async fn create<E: WritableEndpoint>(
        &self,
        store_id: StoreId,
        input: &E::Input,
    ) -> Result<E::Entity, ClientError> {
        input.validate()?;
        self.write(Method::POST, self.collection_url::<E>(store_id)?, input)
            .await
    }

    /// Replace a record's fields. The payload is validated before sending.
    ///
    /// # Errors
    ///
    /// As [`Self::create`], plus `ClientError::NotFound` for an unknown record.
    #[instrument(skip(self, id, input), fields(kind = %E::KIND, id = %id))]
    pub async fn update<E: WritableEndpoint>(
        &self,
        store_id: StoreId,
        id: E::Id,
        input: &E::Input,
    ) -> Result<E::Entity, ClientError> {
        input.validate()?;
        self.write(Method::PATCH, self.item_url::<E>(store_id, &id)?, input)
            .await
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Conflict` carrying the kind's conflict message
    /// when other records still reference this one.
    #[instrument(skip(self, id), fields(kind = %E::KIND, id = %id))]
    pub async fn delete<E: WritableEndpoint>(
        &self,
        store_id: StoreId,
        id: E::Id,
    ) -> Result<(), ClientError> {
        let url = self.item_url::<E>(store_id, &id)?;
        Self::send(
            self.request(Method::DELETE, url),
            &E::KIND.conflict_message(),
        )
        .await?;
        Ok(())
    }

    // =========================================================================
    // Stores
    // =========================================================================

    /// The caller's stores.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` without an owner.
    #[instrument(skip(self))]
    pub async fn list_stores(&self) -> Result<Vec<Store>, ClientError> {
        self.fetch(self.url("api/stores")?).await
    }

    /// One of the caller's stores.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for unknown and foreign stores alike.
    #[instrument(skip(self))]
    pub async fn get_store(&self, store_id: StoreId) -> Result<Store, ClientError> {
        self.fetch(self.url(&format!("api/stores/{store_id}"))?)
            .await
    }

    /// Create a store.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for a blank name.
    #[instrument(skip(self))]
    pub async fn create_store(&self, name: &str) -> Result<Store, ClientError> {
        let input = StoreInput::new(name);
        input.validate()?;
        self.write(Method::POST, self.url("api/stores")?, &input)
            .await
    }

    /// Rename a store.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for a blank name,
    /// `ClientError::NotFound` for unknown and foreign stores.
    #[instrument(skip(self))]
    pub async fn rename_store(&self, store_id: StoreId, name: &str) -> Result<Store, ClientError> {
        let input = StoreInput::new(name);
        input.validate()?;
        self.write(
            Method::PATCH,
            self.url(&format!("api/stores/{store_id}"))?,
            &input,
        )
        .await
    }

    /// Delete a store.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Conflict` while the store still has products or
    /// categories.
    #[instrument(skip(self))]
    pub async fn delete_store(&self, store_id: StoreId) -> Result<(), ClientError> {
        let url = self.url(&format!("api/stores/{store_id}"))?;
        Self::send(self.request(Method::DELETE, url), STORE_CONFLICT_MESSAGE).await?;
        Ok(())
    }
}

impl std::fmt::Debug for DashboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardClient")
            .field("base", &self.base.as_str())
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}
