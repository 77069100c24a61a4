// YouTube Downloader - platform/mod.rs
//
// Platform abstraction layer: host identity, well-known locations, OS open
// actions, external process probing, and config.toml loading.
// Dependencies: standard library, util, directories/open/which crates.
// Must NOT depend on: core, app.

pub mod config;
pub mod identity;
pub mod launch;
pub mod paths;
pub mod probe;
