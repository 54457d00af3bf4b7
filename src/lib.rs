//! # Unisphere REST Client
//!
//! A Rust client for the Unisphere for PowerMax/VMAX management REST API.
//! This library provides the generic resource dispatcher every call rides on
//! and the completion tracker for operations the array accepts
//! asynchronously.
//!
//! ## Features
//!
//! - **Resource Dispatcher**: Generic get/create/modify/delete against any
//!   hierarchical array resource, with uniform status-code classification
//! - **Job Tracker**: Bounded, fixed-interval polling of asynchronous jobs,
//!   with optional cancellation
//! - **Type Safety**: Validated array identifiers and a typed job-status
//!   vocabulary
//! - **Error Handling**: Transport failures, backend rejections, and job
//!   outcomes are distinct types, never sentinel values
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use unisphere::{
//!     api::{wait_for_job, RestClient},
//!     array_id::ArrayId,
//!     config::ClientConfig,
//!     uri::ResourceAddress,
//! };
//! use serde_json::json;
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new(
//!     Url::parse("https://unisphere.example.com:8443/univmax/restapi")?,
//!     "smc",
//!     "smc",
//! );
//! let client = RestClient::new(config)?;
//!
//! let array = ArrayId::new("000197800123")?;
//! let address = ResourceAddress::new("91", "sloprovisioning", &array, "storagegroup");
//! let response = client.create_resource(
//!     &address,
//!     &json!({ "storageGroupId": "SG1", "srpId": "SRP_1" }),
//! )?;
//!
//! // A 202 means the array accepted the call asynchronously; wait it out.
//! wait_for_job(&client, "POST storagegroup resource", &response, client.poll_budget())?;
//! # Ok(())
//! # }
//! ```

/// Resource dispatcher, transport session, job tracker, and API types
pub mod api;

/// Type-safe Symmetrix array identifier handling and validation
pub mod array_id;

/// Explicit client configuration, no process-wide state
pub mod config;

/// Shared request-failure error carrying operation, status, and message
pub mod errors;

/// Pure composition of hierarchical resource paths
pub mod uri;
