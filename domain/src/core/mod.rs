//! Core domain concepts shared across all subdomains.
//!
//! - [`error`] - configuration, parse and transcript errors
//! - [`string`] - small text helpers used when presenting turns

pub mod error;
pub mod string;
