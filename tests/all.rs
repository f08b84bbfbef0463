//! Integration tests for the `valentine` binary's crates.
//!
//! Config loading, the Gemini client against a mock server, and whole
//! sessions driven through the engine. Modules live in `suite/`.

mod common;
mod suite;
