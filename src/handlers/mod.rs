// src/handlers/mod.rs

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod quiz;
