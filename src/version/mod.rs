// file: src/version/mod.rs
// description: version module exports and public api
// reference: internal module structure

mod manifest;
mod target;

pub use manifest::ManifestClient;
pub use target::{ReleaseTarget, ReleaseType};
