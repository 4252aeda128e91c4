//! Tests for the guard chain and its strategies

mod jwks_tests;
