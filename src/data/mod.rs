//! Data module - dataset lookup tables, remote CSV loading and model limits

mod limits;
mod loader;
mod registry;

pub use limits::{LimitsError, ModelLimits, MAX_FEATURES, MAX_INPUT_ROWS};
pub use loader::{
    parse_csv, DatasetLoader, DatasetRequest, Fetch, HttpFetcher, LoaderConfig, LoaderError,
    DEFAULT_BASE_URL, DEFAULT_FOLDER,
};
pub use registry::{
    pathogen_codes, pathogen_names, resolve_pathogen, Cutoff, DatasetType, PATHOGENS,
};
