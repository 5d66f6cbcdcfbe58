//! HTTP plumbing shared by the REST and AI adapters

mod client;

pub use client::{HttpClient, HttpClientBuilder};
