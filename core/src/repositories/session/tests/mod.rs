//! Tests for refresh session repositories

mod memory_tests;
