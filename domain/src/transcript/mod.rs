//! Transcript domain

pub mod entities;
pub mod filename;
pub mod recorder;
