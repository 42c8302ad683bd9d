use log::info;
use reqwest::Client;
use url::Url;

use crate::{
    api::ApiClientImpl,
    config::Config,
    error::{Context, Result},
    geocoder::OpenCageResolver,
    pipeline::{Pipeline, PipelineOptions},
    storage::{CsvStorage, DbStorage, SqlStatements, StorageImpl},
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub type DefaultPipeline = Pipeline<ApiClientImpl, OpenCageResolver, StorageImpl>;

pub struct PipelineBuilder {
    config: Config,
}

impl PipelineBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn build(self) -> Result<DefaultPipeline> {
        info!("PipelineBuilder: Building pipeline...");
        let config = self.config;
        config.validate()?;

        let http_client = Client::builder().user_agent(USER_AGENT).build()?;
        info!("HTTP client created");

        let users_url = Url::parse(&config.users_url).context("users_url")?;
        let carts_url = Url::parse(&config.carts_url).context("carts_url")?;
        let api_client = ApiClientImpl::new(http_client.clone(), users_url, carts_url);
        let resolver = OpenCageResolver::new(http_client, &config.geocoder)?;
        info!("ApiClient and resolver initialized");

        let statements = SqlStatements::load(&config.sql_dir).await?;
        let storage = StorageImpl::new(
            CsvStorage::new(config.csv_path(), config.csv_mode),
            DbStorage::new(config.db_path(), statements),
        );
        info!("Storage initialized, output dir {}", config.output_dir.display());

        Ok(Pipeline::new(
            api_client,
            resolver,
            storage,
            PipelineOptions::from(&config),
        ))
    }
}
