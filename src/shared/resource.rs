//! CRUD plumbing shared by every catalog collection.
//!
//! One `ResourceService` talks to one upstream collection (`/brands`,
//! `/coupons`, ...). Reads go through the query cache under the collection's
//! key; writes go straight to the catalog service and then invalidate every
//! cached read of the collection, stats included.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::core::error::Result;
use crate::core::session::Session;
use crate::modules::catalog_api::CatalogClient;
use crate::shared::query_cache::{QueryCache, QueryKey};

pub struct ResourceService {
    client: Arc<CatalogClient>,
    cache: Arc<QueryCache>,
    /// Upstream collection path, e.g. "/brands"
    path: &'static str,
    /// Cache key prefix, e.g. "brands"
    key: &'static str,
}

impl ResourceService {
    pub fn new(
        client: Arc<CatalogClient>,
        cache: Arc<QueryCache>,
        path: &'static str,
        key: &'static str,
    ) -> Self {
        Self {
            client,
            cache,
            path,
            key,
        }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Root cache key of this collection
    pub fn key(&self) -> QueryKey {
        QueryKey::new([self.key])
    }

    /// Upstream path of one item; the id is percent-encoded
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, urlencoding::encode(id))
    }

    /// Full collection (`GET /<collection>`), cached
    pub async fn list<T>(&self, session: &Session) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let items = self
            .cache
            .get_or_fetch(&session.scope(), self.key().child("list"), || {
                self.client.get(self.path, session.token(), Vec::new())
            })
            .await?;
        Ok(items)
    }

    /// One item (`GET /<collection>/{id}`), cached
    pub async fn get<T>(&self, session: &Session, id: &str) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let path = self.item_path(id);
        let item = self
            .cache
            .get_or_fetch(
                &session.scope(),
                self.key().child("detail").child(id),
                || self.client.get(&path, session.token(), Vec::new()),
            )
            .await?;
        Ok(item)
    }

    /// Backend-defined statistics (`GET /<collection>/stats`), cached
    pub async fn stats(&self, session: &Session) -> Result<Value> {
        let path = format!("{}/stats", self.path);
        let stats = self
            .cache
            .get_or_fetch(&session.scope(), self.key().child("stats"), || {
                self.client.get(&path, session.token(), Vec::new())
            })
            .await?;
        Ok(stats)
    }

    pub async fn create<T, B>(&self, session: &Session, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let created = self.client.post(self.path, session.token(), body).await?;
        tracing::info!("Created item in {}", self.path);
        self.invalidate().await;
        Ok(created)
    }

    pub async fn update<T, B>(&self, session: &Session, id: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let updated = self
            .client
            .put(&self.item_path(id), session.token(), body)
            .await?;
        tracing::info!("Updated {} in {}", id, self.path);
        self.invalidate().await;
        Ok(updated)
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<()> {
        let _: Value = self
            .client
            .delete(&self.item_path(id), session.token())
            .await?;
        tracing::info!("Deleted {} from {}", id, self.path);
        self.invalidate().await;
        Ok(())
    }

    /// Drop cached reads affected by a write to this collection
    pub async fn invalidate(&self) {
        let dropped = self.cache.invalidate(&self.key()).await;
        tracing::debug!("Invalidated {} cached reads under {}", dropped, self.key());
    }
}
