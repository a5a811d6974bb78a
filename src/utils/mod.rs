//! Utility functions.
//!
//! This module provides text helpers for fitting values into fixed-width
//! report cells and for embedding the report in HTML.

pub mod text;
