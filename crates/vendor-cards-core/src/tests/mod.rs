//! Test module for vendor-cards-core
//!
//! This module contains tests for:
//! - Gallery selection, ordering, truncation and projection
//! - Store loading, saving and failure reporting
//! - Embedding directives rendered end to end
//! - Detail-view toggle sequences against a rendered gallery
//! - Configuration loading and defaults
//! - Property tests for the query and toggle invariants

// Test modules use id casts from loop counters
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

mod shortcode_tests;
