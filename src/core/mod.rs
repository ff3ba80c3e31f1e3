// wfh-tracker - core/mod.rs
//
// Core business logic layer: the project model, time formatting, and the
// import/export pipeline. Pure logic over in-memory data and `Write` sinks;
// no filesystem paths, no platform dependencies.

pub mod export;
pub mod import;
pub mod model;
pub mod time_format;
