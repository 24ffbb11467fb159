//! reconf-lib: build configuration and reparse coordination for generated
//! build systems.
//!
//! This crate provides:
//! - `config`: configuration items and key-unique, sorted configuration sets
//! - `kit`: immutable toolchain and platform snapshots
//! - `build_config`: the persistent state of one (project, kit, variant)
//! - `reparse`: the event-driven coordinator deciding when the generator runs
//! - `artifacts`: run targets, deployment data and build type detection

pub mod artifacts;
pub mod build_config;
pub mod config;
pub mod consts;
pub mod environment;
pub mod kit;
pub mod platform;
pub mod reparse;
pub mod settings;
