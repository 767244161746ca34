pub mod config;
pub mod logging;

pub mod checksum;
pub mod fetch;
pub mod image_db;
pub mod ingest;
pub mod storage;
pub mod submission;
pub mod url_model;
