// src/handlers/mod.rs

pub mod sanitize;
