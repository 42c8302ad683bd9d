#![allow(async_fn_in_trait)]
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::GeocoderConfig;
use crate::error::Result;

/// Country assigned when a lookup fails for any reason.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Resolves coordinates to a country name.
///
/// Implementations never fail: every error is folded into [`UNKNOWN_COUNTRY`].
pub trait CountryResolver: Send + Sync {
    async fn resolve_country(&self, lat: f64, lng: f64) -> String;
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    components: Components,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Components {
    country: Option<String>,
}

/// Reverse geocoding through the OpenCage `geocode/v1/json` endpoint.
#[derive(Debug, Clone)]
pub struct OpenCageResolver {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl OpenCageResolver {
    pub fn new(client: Client, config: &GeocoderConfig) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: Url::parse(&config.url)?,
            api_key: config.api_key.clone(),
        })
    }

    async fn lookup(&self, lat: f64, lng: f64) -> Result<Option<String>> {
        let mut url = self.endpoint.clone();
        // the space is form-encoded as `+`, giving q=<lat>+<lng>
        url.query_pairs_mut()
            .append_pair("q", &format!("{lat} {lng}"))
            .append_pair("key", &self.api_key);
        // strip the url from errors, it carries the api key
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.without_url())?;
        let text = response.text().await.map_err(|e| e.without_url())?;
        let response = serde_json::from_str::<GeocodeResponse>(&text)?;
        Ok(response
            .results
            .into_iter()
            .next()
            .and_then(|r| r.components.country))
    }
}

impl CountryResolver for OpenCageResolver {
    async fn resolve_country(&self, lat: f64, lng: f64) -> String {
        match self.lookup(lat, lng).await {
            Ok(Some(country)) => {
                debug!("({lat}, {lng}) resolved to {country}");
                country
            }
            Ok(None) => {
                warn!("no country found for ({lat}, {lng})");
                UNKNOWN_COUNTRY.to_string()
            }
            Err(e) => {
                warn!("geocoding ({lat}, {lng}) failed: {e}");
                UNKNOWN_COUNTRY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod local_tests {
    use std::path::{Path, PathBuf};

    use mockito::{Matcher, Server, ServerGuard};

    use super::*;

    fn get_test_data_path(file_name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/data/")
            .join(file_name)
    }

    fn create_resolver(server: &ServerGuard) -> OpenCageResolver {
        let config = GeocoderConfig {
            url: format!("{}/geocode/v1/json", server.url()),
            api_key: "test_key".to_string(),
            concurrency: 1,
        };
        OpenCageResolver::new(Client::new(), &config).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_country() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/geocode/v1/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "52.520008 13.404954".into()),
                Matcher::UrlEncoded("key".into(), "test_key".into()),
            ]))
            .with_status(200)
            .with_body_from_file(get_test_data_path("geocode.json"))
            .create_async()
            .await;

        let resolver = create_resolver(&server);
        let country = resolver.resolve_country(52.520008, 13.404954).await;
        assert_eq!(country, "Germany");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_country_component() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/geocode/v1/json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body_from_file(get_test_data_path("geocode_ocean.json"))
            .create_async()
            .await;

        let resolver = create_resolver(&server);
        assert_eq!(
            resolver.resolve_country(-77.16213, -92.084824).await,
            UNKNOWN_COUNTRY
        );
    }

    #[tokio::test]
    async fn test_empty_results() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/geocode/v1/json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results": [], "total_results": 0}"#)
            .create_async()
            .await;

        let resolver = create_resolver(&server);
        assert_eq!(resolver.resolve_country(0.0, 0.0).await, UNKNOWN_COUNTRY);
    }

    #[tokio::test]
    async fn test_failures_fall_back_to_unknown() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/geocode/v1/json")
            .match_query(Matcher::UrlEncoded("q".into(), "1 1".into()))
            .with_status(401)
            .with_body(r#"{"status": {"code": 401, "message": "invalid API key"}}"#)
            .create_async()
            .await;
        let _mock = server
            .mock("GET", "/geocode/v1/json")
            .match_query(Matcher::UrlEncoded("q".into(), "2 2".into()))
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;
        let _mock = server
            .mock("GET", "/geocode/v1/json")
            .match_query(Matcher::UrlEncoded("q".into(), "3 3".into()))
            .with_status(200)
            .with_body(r#"{"results": "nope"}"#)
            .create_async()
            .await;

        let resolver = create_resolver(&server);
        assert_eq!(resolver.resolve_country(1.0, 1.0).await, UNKNOWN_COUNTRY);
        assert_eq!(resolver.resolve_country(2.0, 2.0).await, UNKNOWN_COUNTRY);
        assert_eq!(resolver.resolve_country(3.0, 3.0).await, UNKNOWN_COUNTRY);
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let config = GeocoderConfig {
            url: "http://127.0.0.1:9/geocode/v1/json".to_string(),
            api_key: "test_key".to_string(),
            concurrency: 1,
        };
        let resolver = OpenCageResolver::new(Client::new(), &config).unwrap();
        assert_eq!(resolver.resolve_country(10.0, 20.0).await, UNKNOWN_COUNTRY);
    }
}
