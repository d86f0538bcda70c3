// src/lib.rs

//! Lectern Library
//!
//! Harvests recorded-lecture series from a university video portal and
//! correlates them against the official course catalogue.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
