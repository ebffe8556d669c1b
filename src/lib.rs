//! Daily restaurant recommendation service.
//!
//! The core is a quota-based stratified sampling engine (`sampling`): per
//! user, filter out already-seen restaurants, split the rest by the user's
//! home zone, draw against a home-zone quota with backfill, and shuffle.
//! Everything around it is warehouse plumbing (`store`), run orchestration
//! (`pipeline`), and a pluggable ranking-model seam (`ranking`).

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod ranking;
pub mod sampling;
pub mod store;
