//! Desktop bootstrap for the GitButler client.
//!
//! Everything that needs to see the adapters and the application layer at
//! the same time lives here: configuration loading, tracing and crash
//! reporting setup, dependency wiring and the `load` entry point.

pub mod bootstrap;
