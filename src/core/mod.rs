//! Configuration and the record types shared by every stage

pub mod config;
pub mod models;
