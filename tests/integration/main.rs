//! Integration tests for the link tracker
//!
//! These tests use wiremock to serve pages and exercise extraction and batch
//! processing end-to-end over real HTTP connections.

mod extract_tests;
mod tracker_tests;
