//! Patch builder integration tests
//!
//! Tests for diff lowering (one operation per changed path, element-level list patches)
//! and the lock set/delete patches.

mod update_tests;
