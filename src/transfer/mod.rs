// file: src/transfer/mod.rs
// description: transfer module exports and public api
// reference: internal module structure

mod fetch;

pub use fetch::{Fetcher, HttpFetcher};
