//! Helpers around the reactor core: tabular export of results.
pub mod export;
