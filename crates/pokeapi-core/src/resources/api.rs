//! Cache-fronted request builders shared by every resource kind.

use std::fmt;
use std::sync::Arc;

use crate::cache::{cache_key, CacheLike};
use crate::error::Result;
use crate::pagination::{self, Page, PageStream};
use crate::transport::{RequestOptions, Transport};
use crate::validate::maybe_validate;

use super::{IdOrName, NamedResource, Resource};

pub const DEFAULT_LIST_LIMIT: u32 = 20;
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Options for a single-resource lookup.
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    pub request: RequestOptions,
    /// Overrides the client-wide validation toggle for this call.
    pub validate: Option<bool>,
}

impl From<RequestOptions> for GetOptions {
    fn from(request: RequestOptions) -> Self {
        Self {
            request,
            validate: None,
        }
    }
}

/// `limit`/`offset` for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub limit: u32,
    pub offset: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

/// Get, list and iterate one resource kind.
pub struct ResourceApi<R> {
    transport: Transport,
    cache: Option<Arc<dyn CacheLike<R>>>,
    validate: bool,
}

impl<R> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            cache: self.cache.clone(),
            validate: self.validate,
        }
    }
}

impl<R> fmt::Debug for ResourceApi<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceApi")
            .field("transport", &self.transport)
            .field("cached", &self.cache.is_some())
            .field("validate", &self.validate)
            .finish()
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new(transport: Transport, cache: Option<Arc<dyn CacheLike<R>>>, validate: bool) -> Self {
        Self {
            transport,
            cache,
            validate,
        }
    }

    /// Fetch one resource by id or name, served from the cache when present.
    pub async fn get(&self, id_or_name: impl Into<IdOrName>, options: &GetOptions) -> Result<R> {
        let id_or_name = id_or_name.into();
        let key = cache_key(R::KIND, &id_or_name);
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            tracing::debug!(%key, "cache hit");
            return Ok(hit);
        }

        let path = format!("/{}/{}/", R::KIND, id_or_name);
        let raw: R = self.transport.get(&path, &options.request).await?;
        let value = maybe_validate(raw, options.validate.unwrap_or(self.validate))?;

        if let Some(cache) = &self.cache {
            cache.set(&key, value.clone());
        }
        Ok(value)
    }

    /// Fetch a single page of links.
    pub async fn list(
        &self,
        params: ListParams,
        options: &RequestOptions,
    ) -> Result<Page<NamedResource>> {
        let target = pagination::page_target(&self.collection(), params.limit, params.offset);
        self.transport.get(&target, options).await
    }

    /// Lazily walk every page from offset 0, `page_size` links per request.
    pub fn iterate(&self, page_size: u32, options: RequestOptions) -> PageStream<NamedResource> {
        let first = pagination::page_target(&self.collection(), page_size, 0);
        pagination::iterate(self.transport.clone(), first, options)
    }

    fn collection(&self) -> String {
        format!("/{}", R::KIND)
    }
}
