//! Integration test modules

mod config;
mod generation;
mod session_flow;
