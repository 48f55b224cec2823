// src/services/mod.rs
pub mod backend;
pub mod extract;
pub mod hosted;
pub mod local;
pub mod relay;
