//! Storage module for product images
//!
//! Provides a MinIO/S3-compatible client that uploads images under a public
//! prefix and serves them by direct URL.

mod minio_client;
mod sigv4;

pub use minio_client::MinIOClient;
