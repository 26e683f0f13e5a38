pub mod config;
pub mod logging;

pub mod batch;
pub mod control;
pub mod features;
pub mod history;
pub mod ingest;
pub mod scorer;
