//! ---
//! pprz_section: "01-core-functionality"
//! pprz_subsection: "module"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Shared configuration primitives."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
//! Shared primitives for the pprz message toolkit.
//! This crate exposes configuration loading consumed by the binaries and the
//! logging bootstrap.

pub mod config;

pub use config::{LoadedToolConfig, LogFormat, LoggingConfig, ToolConfig};
