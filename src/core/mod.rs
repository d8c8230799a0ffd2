// src/core/mod.rs

pub mod analytics;
pub mod generator;
pub mod knowledge;
