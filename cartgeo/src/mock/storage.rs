//! Test mock for storage
use std::sync::{Arc, Mutex};

use crate::{error::Result, models::User, storage::Storage};

#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    batches: Arc<Mutex<Vec<Vec<User>>>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn saved_batches(&self) -> Vec<Vec<User>> {
        self.batches.lock().unwrap().clone()
    }
}

impl Storage for MockStorage {
    async fn save_users(&self, users: &[User]) -> Result<()> {
        self.batches.lock().unwrap().push(users.to_vec());
        Ok(())
    }
}
