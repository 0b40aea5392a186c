//! Integration tests
//!
//! Drive the full router over an in-memory database.

mod api;
