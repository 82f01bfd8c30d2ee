// src/lib.rs

//! Campaign digest library
//!
//! Discovers campaign links on a fixed set of seed pages, keeps the genuine
//! ones, and publishes them as affiliate-tagged digest articles.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
