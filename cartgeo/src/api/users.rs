#![allow(async_fn_in_trait)]
use log::{debug, info};
use serde::Deserialize;

use super::ApiClientImpl;
use super::internal::user::UserInternal;
use crate::error::Result;

/// One page of the users listing, records still un-enriched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersPage {
    pub(crate) users: Vec<UserInternal>,
    #[serde(default)]
    pub total: u64,
}

impl UsersPage {
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

pub trait UsersApi {
    async fn users_page(&self, limit: u32, skip: u64) -> Result<UsersPage>;
}

impl UsersApi for ApiClientImpl {
    async fn users_page(&self, limit: u32, skip: u64) -> Result<UsersPage> {
        info!("getting users, limit: {limit}, skip: {skip}");
        let mut url = self.users_url.clone();
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip.to_string());
        let page = self.get_json::<UsersPage>(url).await?;
        debug!("got {} users, total reported: {}", page.len(), page.total);
        Ok(page)
    }
}
