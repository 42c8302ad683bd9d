pub mod aggregator;
pub mod api;
pub mod builder;
pub mod config;
pub mod error;
pub mod geocoder;
pub mod models;
pub mod pipeline;
pub mod storage;

#[cfg(test)]
pub mod mock;
