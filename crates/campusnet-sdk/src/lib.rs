//! CampusNet Rust SDK
//!
//! Client library for the CampusNet social service.
//!
//! # Example
//!
//! ```no_run
//! use campusnet_sdk::CampusClient;
//!
//! # async fn example() -> Result<(), campusnet_sdk::SdkError> {
//! let mut client = CampusClient::new("http://localhost:8080");
//! client.login("an@campus.edu", "s3cret").await?;
//!
//! for entry in client.feed().await? {
//!     println!("{}: {}", entry.author_name, entry.post.content);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;

pub use client::CampusClient;
pub use error::SdkError;
