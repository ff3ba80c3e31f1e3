// wfh-tracker - app/mod.rs
//
// Application layer: the stateful project store, the timer controller, and
// storage persistence.
// Dependencies: core layer.

pub mod storage;
pub mod store;
pub mod timer;
