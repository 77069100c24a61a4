// YouTube Downloader - core/mod.rs
//
// Core domain logic: quality presets, input validation, cookie options.
// Dependencies: standard library, util, regex, tempfile (write checks).
// Must NOT depend on: platform, app.

pub mod cookies;
pub mod quality;
pub mod validate;
