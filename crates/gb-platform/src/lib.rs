//! Platform capabilities backed by the host OS.

pub mod paths;

pub use paths::DirsPlatformPaths;
