//! cs-s3: S3 SDK adapter for the csync CLI
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate, plus the provider factory that maps a
//! provider identifier to endpoint configuration. It is the only crate
//! that directly depends on the AWS SDK.

pub mod client;
pub mod provider;

pub use client::S3Client;
pub use provider::Provider;
