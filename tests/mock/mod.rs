//! Mock-based tests for both check groups.
//!
//! These tests use wiremock to stand in for the AKC page and the Petfinder
//! API, so the whole fetch-parse-check path runs without network access.
