pub mod config;
pub mod downloader;
pub mod error;
pub mod fetcher;
pub mod guesser;
pub mod models;
pub mod resolver;
pub mod storage;
pub mod traits;
pub mod utils;
