//! Dataset Loader Module
//! Validates dataset requests, builds the remote URL and loads the CSV using Polars.

use log::{debug, info, warn};
use polars::prelude::*;
use serde::Deserialize;
use std::io::Cursor;
use thiserror::Error;

use super::registry::{resolve_pathogen, Cutoff, DatasetType};

pub const DEFAULT_BASE_URL: &str = "https://chempfn-data.s3.eu-central-1.amazonaws.com";
pub const DEFAULT_FOLDER: &str = "data/new_processing";

/// Rows sampled by the CSV reader when inferring column types.
const INFER_SCHEMA_ROWS: usize = 10000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Invalid pathogen: {0}")]
    InvalidPathogen(String),
    #[error("Invalid dataset_type: {0}")]
    InvalidDatasetType(String),
    #[error("Invalid cutoff: {0}")]
    InvalidCutoff(String),
    #[error("Failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Invalid loader config: {0}")]
    Config(#[from] serde_json::Error),
}

/// A validated dataset request. Built once, consumed to form one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetRequest {
    pub pathogen: &'static str,
    pub cutoff: Cutoff,
    pub dataset_type: DatasetType,
}

impl DatasetRequest {
    /// Validate raw inputs in the order pathogen, dataset_type, cutoff.
    ///
    /// The first invalid field is reported with the value as the caller passed it.
    pub fn new(pathogen: &str, cutoff: &str, dataset_type: &str) -> Result<Self, LoaderError> {
        let code = resolve_pathogen(pathogen).ok_or_else(|| {
            warn!("Rejected pathogen {pathogen:?}");
            LoaderError::InvalidPathogen(pathogen.to_string())
        })?;
        let dataset_type = DatasetType::from_label(dataset_type).ok_or_else(|| {
            warn!("Rejected dataset_type {dataset_type:?}");
            LoaderError::InvalidDatasetType(dataset_type.to_string())
        })?;
        let cutoff = Cutoff::from_token(cutoff).ok_or_else(|| {
            warn!("Rejected cutoff {cutoff:?}");
            LoaderError::InvalidCutoff(cutoff.to_string())
        })?;

        Ok(Self {
            pathogen: code,
            cutoff,
            dataset_type,
        })
    }

    /// Remote file name, e.g. `ecoli_org_all_hc.csv`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.csv",
            self.pathogen,
            self.dataset_type.token(),
            self.cutoff.token()
        )
    }
}

/// Where datasets live on the remote host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub base_url: String,
    pub folder: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            folder: DEFAULT_FOLDER.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, LoaderError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Retrieves the raw bytes behind a URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, LoaderError>;
}

/// One blocking, unauthenticated HTTPS GET per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, LoaderError> {
        let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
        Ok(bytes.to_vec())
    }
}

/// Locates antimicrobial datasets on the remote store and loads them with Polars.
pub struct DatasetLoader<F: Fetch = HttpFetcher> {
    config: LoaderConfig,
    fetcher: F,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self::with_fetcher(config, HttpFetcher)
    }
}

impl<F: Fetch> DatasetLoader<F> {
    pub fn with_fetcher(config: LoaderConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Full URL of a validated request.
    pub fn url_for(&self, request: &DatasetRequest) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.folder.trim_matches('/'),
            request.pathogen,
            request.file_name()
        )
    }

    /// Validate the inputs and return the URL they point at, without fetching.
    pub fn locate(
        &self,
        pathogen: &str,
        cutoff: &str,
        dataset_type: &str,
    ) -> Result<String, LoaderError> {
        let request = DatasetRequest::new(pathogen, cutoff, dataset_type)?;
        Ok(self.url_for(&request))
    }

    /// Validate the inputs, fetch the matching CSV and parse it.
    pub fn load(
        &self,
        pathogen: &str,
        cutoff: &str,
        dataset_type: &str,
    ) -> Result<DataFrame, LoaderError> {
        let request = DatasetRequest::new(pathogen, cutoff, dataset_type)?;
        self.load_request(&request)
    }

    /// Load the high-cutoff organism dataset for a pathogen.
    pub fn load_default(&self, pathogen: &str) -> Result<DataFrame, LoaderError> {
        self.load(
            pathogen,
            Cutoff::default().token(),
            DatasetType::default().label(),
        )
    }

    pub fn load_request(&self, request: &DatasetRequest) -> Result<DataFrame, LoaderError> {
        let url = self.url_for(request);
        debug!("Fetching dataset from {url}");

        let bytes = self.fetcher.fetch(&url)?;
        let df = parse_csv(bytes)?;

        info!(
            "Loaded {} ({} rows x {} columns)",
            request.file_name(),
            df.height(),
            df.width()
        );
        Ok(df)
    }
}

/// Parse CSV bytes with a header row, letting Polars infer column types.
pub fn parse_csv(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const SAMPLE_CSV: &str = "smiles,activity,label\nCCO,1.5,1\nCCN,0.2,0\nc1ccccc1,3.25,1\n";

    /// Serves a fixed body and records the requested URLs.
    struct StubFetcher {
        body: &'static str,
        requested: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        fn new(body: &'static str) -> Self {
            Self {
                body,
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl Fetch for StubFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, LoaderError> {
            self.requested.borrow_mut().push(url.to_string());
            Ok(self.body.as_bytes().to_vec())
        }
    }

    fn stub_loader(body: &'static str) -> DatasetLoader<StubFetcher> {
        DatasetLoader::with_fetcher(LoaderConfig::default(), StubFetcher::new(body))
    }

    #[test]
    fn test_locate_organism_high_cutoff() {
        let url = DatasetLoader::new()
            .locate("Escherichia coli", "hc", "organism")
            .unwrap();
        assert_eq!(
            url,
            "https://chempfn-data.s3.eu-central-1.amazonaws.com/data/new_processing/ecoli/ecoli_org_all_hc.csv"
        );
    }

    #[test]
    fn test_locate_mic_low_cutoff_from_code() {
        let url = DatasetLoader::new().locate("ecoli", "lc", "mic").unwrap();
        assert!(url.ends_with("/ecoli/ecoli_MIC_lc.csv"));
    }

    #[test]
    fn test_name_and_code_give_same_url() {
        let loader = DatasetLoader::new();
        for (name, code) in crate::data::registry::PATHOGENS {
            for dataset_type in DatasetType::ALL {
                for cutoff in Cutoff::ALL {
                    let by_name = loader
                        .locate(name, cutoff.token(), dataset_type.label())
                        .unwrap();
                    let by_code = loader
                        .locate(code, cutoff.token(), dataset_type.label())
                        .unwrap();
                    assert_eq!(by_name, by_code);
                }
            }
        }
    }

    #[test]
    fn test_case_variants_resolve_identically() {
        let loader = DatasetLoader::new();
        let urls: Vec<String> = ["Escherichia Coli", "escherichia coli", "ESCHERICHIA COLI"]
            .iter()
            .map(|p| loader.locate(p, "HC", "Organism").unwrap())
            .collect();
        assert!(urls.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_unknown_pathogen_is_named() {
        let err = DatasetLoader::new()
            .locate("Unknown-Bug", "hc", "organism")
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidPathogen(ref p) if p == "Unknown-Bug"));
        assert_eq!(err.to_string(), "Invalid pathogen: Unknown-Bug");
    }

    #[test]
    fn test_unknown_dataset_type_and_cutoff_are_named() {
        let loader = DatasetLoader::new();
        let err = loader.locate("ecoli", "hc", "org_all").unwrap_err();
        assert!(matches!(err, LoaderError::InvalidDatasetType(ref d) if d == "org_all"));

        let err = loader.locate("ecoli", "mid", "mic").unwrap_err();
        assert!(matches!(err, LoaderError::InvalidCutoff(ref c) if c == "mid"));
    }

    #[test]
    fn test_pathogen_is_reported_before_other_fields() {
        let err = DatasetLoader::new()
            .locate("unknown-bug", "nope", "nothing")
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidPathogen(ref p) if p == "unknown-bug"));

        let err = DatasetLoader::new()
            .locate("ecoli", "nope", "nothing")
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidDatasetType(_)));
    }

    #[test]
    fn test_config_trims_slashes() {
        let config = LoaderConfig {
            base_url: "http://localhost:9000/".to_string(),
            folder: "/datasets/".to_string(),
        };
        let url = DatasetLoader::with_config(config)
            .locate("saureus", "lc", "all")
            .unwrap();
        assert_eq!(url, "http://localhost:9000/datasets/saureus/saureus_all_lc.csv");
    }

    #[test]
    fn test_config_from_json_keeps_defaults() -> anyhow::Result<()> {
        let config = LoaderConfig::from_json(r#"{"folder": "data/raw"}"#)?;
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.folder, "data/raw");

        assert!(matches!(
            LoaderConfig::from_json("{not json"),
            Err(LoaderError::Config(_))
        ));
        Ok(())
    }

    #[test]
    fn test_load_fetches_one_url_and_parses() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let loader = stub_loader(SAMPLE_CSV);

        let df = loader.load("Klebsiella pneumoniae", "lc", "activity")?;
        assert_eq!(df.shape(), (3, 3));
        assert_eq!(df.column("activity")?.dtype(), &DataType::Float64);
        assert_eq!(df.column("label")?.dtype(), &DataType::Int64);
        assert_eq!(df.column("smiles")?.dtype(), &DataType::String);

        let requested = loader.fetcher.requested.borrow();
        assert_eq!(requested.len(), 1);
        assert!(requested[0].ends_with("/kpneumoniae/kpneumoniae_Activity_lc.csv"));
        Ok(())
    }

    #[test]
    fn test_load_default_uses_high_cutoff_organism() -> anyhow::Result<()> {
        let loader = stub_loader(SAMPLE_CSV);
        loader.load_default("mtuberculosis")?;

        let requested = loader.fetcher.requested.borrow();
        assert!(requested[0].ends_with("/mtuberculosis/mtuberculosis_org_all_hc.csv"));
        Ok(())
    }

    #[test]
    fn test_invalid_input_skips_fetch() {
        let loader = stub_loader(SAMPLE_CSV);
        assert!(loader.load("unknown-bug", "hc", "organism").is_err());
        assert!(loader.fetcher.requested.borrow().is_empty());
    }

    #[test]
    fn test_malformed_csv_propagates_parse_error() {
        let loader = stub_loader("a,b\n1,2\n3,4,5,6\n");
        let err = loader.load("ecoli", "hc", "organism").unwrap_err();
        assert!(matches!(err, LoaderError::Csv(_)));
    }
}
