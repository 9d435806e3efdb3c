//! Scenario tests for boxmodel-core
//!
//! This module contains tests for:
//! - Style files composed over base styles, end to end
//! - Interaction state machine invariants over random signal sequences
//! - Window controller: query binding, timers, keyboard, styles, persistence
//! - The async driver loop

// Test modules use exact float comparisons and test-specific casts
#![allow(clippy::float_cmp, clippy::cast_possible_truncation)]

mod driver_tests;
mod fixtures;
mod statemachine_tests;
