//! Shared types and models for the Stock Report Platform
//!
//! This crate contains types shared between the layout engine and the
//! callers that supply stock records and consume generated reports.

pub mod models;

pub use models::*;
