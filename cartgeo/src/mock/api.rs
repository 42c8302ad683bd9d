//! Test mock for the listing endpoints
use std::sync::{Arc, Mutex};

use crate::{
    api::{
        ApiClient, CartsApi, UsersApi, UsersPage,
        internal::user::{AddressInternal, CoordinatesInternal, UserInternal},
    },
    error::Result,
    models::Cart,
};

#[derive(Debug, Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<UserInternal>,
    total: Option<u64>,
    carts: Vec<Cart>,
    requested_skips: Vec<u64>,
}

impl MockApi {
    pub fn new() -> Self {
        Default::default()
    }

    /// Serves `n` generated users, reporting `n` as the total.
    pub fn with_users(n: u64) -> Self {
        let api = Self::new();
        api.set_users((1..=n as i64).map(create_raw_user).collect());
        api
    }

    pub fn set_users(&self, users: Vec<UserInternal>) {
        self.inner.lock().unwrap().users = users;
    }

    /// Overrides the reported total, which otherwise equals the number of users.
    pub fn set_total(&self, total: u64) {
        self.inner.lock().unwrap().total = Some(total);
    }

    pub fn set_carts(&self, carts: Vec<Cart>) {
        self.inner.lock().unwrap().carts = carts;
    }

    pub fn requested_skips(&self) -> Vec<u64> {
        self.inner.lock().unwrap().requested_skips.clone()
    }
}

pub fn create_raw_user(id: i64) -> UserInternal {
    UserInternal {
        id,
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        age: 18 + id % 50,
        gender: if id % 2 == 0 { "male" } else { "female" }.to_string(),
        email: format!("user{id}@x.dummyjson.com"),
        address: AddressInternal {
            coordinates: CoordinatesInternal {
                lat: id as f64,
                lng: -(id as f64),
            },
        },
    }
}

impl UsersApi for MockApi {
    async fn users_page(&self, limit: u32, skip: u64) -> Result<UsersPage> {
        let mut inner = self.inner.lock().unwrap();
        inner.requested_skips.push(skip);
        let users = inner
            .users
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        let total = inner.total.unwrap_or(inner.users.len() as u64);
        Ok(UsersPage { users, total })
    }
}

impl CartsApi for MockApi {
    async fn carts(&self) -> Result<Vec<Cart>> {
        Ok(self.inner.lock().unwrap().carts.clone())
    }
}

impl ApiClient for MockApi {}
