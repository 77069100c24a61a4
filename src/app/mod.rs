// YouTube Downloader - app/mod.rs
//
// Application layer: tool availability, persisted settings, download
// preflight.
// Dependencies: core, platform, util.

pub mod plan;
pub mod settings;
pub mod tool;
