//! # Hustle Core
//!
//! Shared, I/O-free logic for Proof of Hustle: data models, the
//! contribution streak calculator, chart shaping, and the fallback data
//! generators used when a live fetch fails.
//!
//! This crate contains no tokio, HTTP, or filesystem dependencies.

pub mod chart;
pub mod mock;
pub mod models;
pub mod streak;
