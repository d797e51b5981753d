//! Data Transfer Objects
//!
//! Response types for the JSON endpoints. The update request body is
//! `ControlInput` itself.

use serde::Serialize;

use crate::filter::ChartPayload;

/// Response to a control change
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Replacement for the filtered chart
    pub payload: ChartPayload,
    /// Request correlation ID
    pub request_id: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status, always "healthy" once serving
    pub status: String,
    /// Number of rows in the sales table
    pub rows: usize,
    /// Number of categories in the sales table
    pub categories: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
