//! Response parsing domain.
//!
//! Pure text processing: no I/O, no session state.

pub mod parser;
