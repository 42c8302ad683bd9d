//! Deterministic country resolver for tests
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::geocoder::{CountryResolver, UNKNOWN_COUNTRY};

#[derive(Debug, Clone, Default)]
pub struct StubResolver {
    countries: Arc<Mutex<Vec<((f64, f64), String)>>>,
    calls: Arc<AtomicUsize>,
}

impl StubResolver {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_country(self, lat: f64, lng: f64, country: &str) -> Self {
        self.countries
            .lock()
            .unwrap()
            .push(((lat, lng), country.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CountryResolver for StubResolver {
    async fn resolve_country(&self, lat: f64, lng: f64) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.countries
            .lock()
            .unwrap()
            .iter()
            .find(|(coords, _)| *coords == (lat, lng))
            .map(|(_, country)| country.clone())
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string())
    }
}
