use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use url::Url;

use crate::error::{Context, Error, Result};

pub const API_KEY_ENV: &str = "API_KEY";
pub const PAGE_SIZE_ENV: &str = "CARTGEO_PAGE_SIZE";
pub const GEOCODE_CONCURRENCY_ENV: &str = "CARTGEO_GEOCODE_CONCURRENCY";
pub const OUTPUT_DIR_ENV: &str = "CARTGEO_OUTPUT_DIR";
pub const CSV_MODE_ENV: &str = "CARTGEO_CSV_MODE";

const CONFIG_FILE_NAME: &str = "cartgeo.json";

/// How the CSV sink treats an existing output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvMode {
    /// Append rows, writing the header only into a new or empty file.
    #[default]
    Append,
    /// Truncate the file and write a single header.
    Overwrite,
}

impl std::str::FromStr for CsvMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append" => Ok(CsvMode::Append),
            "overwrite" => Ok(CsvMode::Overwrite),
            other => Err(Error::Config(format!("unknown csv mode: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub url: String,
    /// Required. Usually supplied through the `API_KEY` environment variable.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Upper bound of lookups in flight at once.
    pub concurrency: usize,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: "https://api.opencagedata.com/geocode/v1/json".to_string(),
            api_key: String::new(),
            concurrency: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub users_url: String,
    pub carts_url: String,
    pub page_size: u32,
    pub thumbnail_prefix: String,
    pub geocoder: GeocoderConfig,
    pub output_dir: PathBuf,
    pub csv_file_name: String,
    pub csv_mode: CsvMode,
    pub db_file_name: String,
    pub sql_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users_url: "https://dummyjson.com/users".to_string(),
            carts_url: "https://dummyjson.com/carts".to_string(),
            page_size: 100,
            thumbnail_prefix: "https://cdn.dummyjson.com/products/images/".to_string(),
            geocoder: Default::default(),
            output_dir: PathBuf::from("results"),
            csv_file_name: "users_data.csv".to_string(),
            csv_mode: Default::default(),
            db_file_name: "results.db".to_string(),
            sql_dir: PathBuf::from("sql"),
        }
    }
}

impl Config {
    /// Builds the configuration from defaults, an optional JSON file, a `.env`
    /// file and the process environment, in that order of precedence (last wins).
    ///
    /// An explicitly given `path` must exist; otherwise `./cartgeo.json` and
    /// `<config dir>/cartgeo/config.json` are tried and silently skipped when
    /// absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match find_config_file(path)? {
            Some(path) => {
                info!("load config from: {}", path.display());
                let content = fs::read_to_string(&path).context("reading config file")?;
                from_str::<Config>(&content).context("parsing config file")?
            }
            None => {
                debug!("no config file found, using defaults");
                Config::default()
            }
        };

        load_dotenv();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overrides fields from environment style key lookups.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV) {
            debug!("api key set from {API_KEY_ENV}");
            self.geocoder.api_key = key;
        }
        if let Some(size) = lookup(PAGE_SIZE_ENV) {
            self.page_size = size
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("{PAGE_SIZE_ENV}: {e}")))?;
            debug!("page size set to {} from env", self.page_size);
        }
        if let Some(n) = lookup(GEOCODE_CONCURRENCY_ENV) {
            self.geocoder.concurrency = n
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("{GEOCODE_CONCURRENCY_ENV}: {e}")))?;
            debug!(
                "geocode concurrency set to {} from env",
                self.geocoder.concurrency
            );
        }
        if let Some(dir) = lookup(OUTPUT_DIR_ENV) {
            self.output_dir = PathBuf::from(dir);
            debug!("output dir set to {} from env", self.output_dir.display());
        }
        if let Some(mode) = lookup(CSV_MODE_ENV) {
            self.csv_mode = mode.parse()?;
            debug!("csv mode set to {:?} from env", self.csv_mode);
        }
        Ok(())
    }

    /// Fails on anything that would only blow up halfway through a run.
    pub fn validate(&self) -> Result<()> {
        if self.geocoder.api_key.trim().is_empty() {
            return Err(Error::Config(format!(
                "geocoder api key must be set, export {API_KEY_ENV} or put it in a .env file"
            )));
        }
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be greater than 0".to_string()));
        }
        if self.geocoder.concurrency == 0 {
            return Err(Error::Config(
                "geocoder.concurrency must be greater than 0".to_string(),
            ));
        }
        Url::parse(&self.users_url).context("users_url")?;
        Url::parse(&self.carts_url).context("carts_url")?;
        Url::parse(&self.geocoder.url).context("geocoder.url")?;
        Ok(())
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(&self.csv_file_name)
    }

    pub fn db_path(&self) -> PathBuf {
        self.output_dir.join(&self.db_file_name)
    }
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("no .env file found"),
        Err(e) => warn!("failed to load .env file: {e}"),
    }
}

// 依次在预设路径中查找配置文件
fn find_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(Some(path.to_path_buf()))
        } else {
            Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )))
        };
    }

    let paths = [
        std::env::current_dir()?.join(CONFIG_FILE_NAME),
        dirs::config_dir()
            .unwrap_or_default()
            .join("cartgeo/config.json"),
    ];

    Ok(paths.into_iter().find(|p| p.is_file()))
}
