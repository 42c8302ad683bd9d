#![allow(async_fn_in_trait)]
use log::{debug, info};
use serde::Deserialize;

use super::ApiClientImpl;
use crate::error::Result;
use crate::models::Cart;

#[derive(Debug, Clone, Deserialize)]
struct CartsSucc {
    #[serde(default)]
    carts: Vec<Cart>,
}

pub trait CartsApi {
    async fn carts(&self) -> Result<Vec<Cart>>;
}

impl CartsApi for ApiClientImpl {
    async fn carts(&self) -> Result<Vec<Cart>> {
        info!("getting carts");
        let CartsSucc { carts } = self.get_json::<CartsSucc>(self.carts_url.clone()).await?;
        debug!("got {} carts", carts.len());
        Ok(carts)
    }
}
