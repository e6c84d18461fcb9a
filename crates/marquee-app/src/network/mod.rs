//! Network operations
//!
//! HTTP client shared by catalog sources.

pub mod client;

pub use client::HttpClient;
