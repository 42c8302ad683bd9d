use futures::stream::{self, StreamExt};
use log::{debug, error, info};

use crate::aggregator::assign_favorite_categories;
use crate::api::ApiClient;
use crate::api::internal::user::UserInternal;
use crate::config::Config;
use crate::error::Result;
use crate::geocoder::{CountryResolver, UNKNOWN_COUNTRY};
use crate::models::{Cart, User};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub page_size: u32,
    pub geocode_concurrency: usize,
    pub thumbnail_prefix: String,
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            geocode_concurrency: config.geocoder.concurrency,
            thumbnail_prefix: config.thumbnail_prefix.clone(),
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub users: usize,
    pub carts: usize,
    pub unknown_countries: usize,
    pub users_without_cart: usize,
}

impl RunSummary {
    fn new(users: &[User], carts: &[Cart]) -> Self {
        Self {
            users: users.len(),
            carts: carts.len(),
            unknown_countries: users
                .iter()
                .filter(|u| u.country == UNKNOWN_COUNTRY)
                .count(),
            users_without_cart: users
                .iter()
                .filter(|u| u.favorite_category.is_none())
                .count(),
        }
    }
}

/// fetch → enrich → aggregate → persist, in a single pass.
#[derive(Debug, Clone)]
pub struct Pipeline<A: ApiClient, R: CountryResolver, S: Storage> {
    api_client: A,
    resolver: R,
    storage: S,
    options: PipelineOptions,
}

impl<A: ApiClient, R: CountryResolver, S: Storage> Pipeline<A, R, S> {
    pub fn new(api_client: A, resolver: R, storage: S, options: PipelineOptions) -> Self {
        Pipeline {
            api_client,
            resolver,
            storage,
            options,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn run(&self) -> Result<RunSummary> {
        info!("Starting pipeline run");
        let mut users = self.fetch_users().await?;
        let carts = self.fetch_carts().await?;

        assign_favorite_categories(&mut users, &carts, &self.options.thumbnail_prefix);
        let summary = RunSummary::new(&users, &carts);
        debug!("{summary:?}");

        self.storage.save_users(&users).await.map_err(|e| {
            error!("Failed to persist users: {e}");
            e
        })?;
        info!("Pipeline run finished, {} users persisted", summary.users);
        Ok(summary)
    }

    /// Walks the paginated users listing until `skip + limit` passes the
    /// reported total, enriching every page as it arrives.
    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        let limit = self.options.page_size;
        let mut skip: u64 = 0;
        let mut all_users = Vec::new();
        loop {
            let page = self.api_client.users_page(limit, skip).await.map_err(|e| {
                error!("Failed to fetch users at skip {skip}: {e}");
                e
            })?;
            let total = page.total;
            let users = self.enrich_users(page.users).await;
            info!("fetched {} users at skip {skip}, total {total}", users.len());
            all_users.extend(users);

            if skip + u64::from(limit) > total {
                break;
            }
            skip += u64::from(limit);
        }
        info!("Fetched {} users in total", all_users.len());
        Ok(all_users)
    }

    // lookups run concurrently but `buffered` yields them in input order
    async fn enrich_users(&self, users: Vec<UserInternal>) -> Vec<User> {
        let resolver = &self.resolver;
        stream::iter(users)
            .map(|user| async move {
                let country = resolver.resolve_country(user.lat(), user.lng()).await;
                user.into_user(country)
            })
            .buffered(self.options.geocode_concurrency.max(1))
            .collect()
            .await
    }

    pub async fn fetch_carts(&self) -> Result<Vec<Cart>> {
        let carts = self.api_client.carts().await.map_err(|e| {
            error!("Failed to fetch carts: {e}");
            e
        })?;
        info!("Fetched {} carts", carts.len());
        Ok(carts)
    }
}
