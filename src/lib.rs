//! AMR Datasets - antimicrobial dataset locator & loader
//!
//! Resolves a pathogen, dataset type and cutoff to a CSV on the remote store and
//! loads it into a Polars `DataFrame`.

pub mod data;

pub use data::{
    Cutoff, DatasetLoader, DatasetRequest, DatasetType, LoaderConfig, LoaderError, ModelLimits,
};
