//! RS Lang client library
//!
//! Word catalogue access, the per-user annotation store and the
//! synchronizer that keeps it in step with the remote service.

pub mod api;
pub mod app;
pub mod card;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
