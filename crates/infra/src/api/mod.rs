//! Backend REST store adapter

mod client;

pub use client::BackendApiClient;
