pub mod carts;
pub(crate) mod internal;
pub mod users;

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Result;

pub use carts::CartsApi;
pub use users::{UsersApi, UsersPage};

pub trait ApiClient: users::UsersApi + carts::CartsApi + Send + Sync + Clone {}

/// Client for the dummyjson style listing endpoints.
#[derive(Debug, Clone)]
pub struct ApiClientImpl {
    client: Client,
    users_url: Url,
    carts_url: Url,
}

impl ApiClientImpl {
    pub fn new(client: Client, users_url: Url, carts_url: Url) -> Self {
        ApiClientImpl {
            client,
            users_url,
            carts_url,
        }
    }

    // body is decoded separately so a bad payload surfaces as a JSON error,
    // not as a transport error
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let text = response.text().await?;
        Ok(serde_json::from_str::<T>(&text)?)
    }
}

impl ApiClient for ApiClientImpl {}
