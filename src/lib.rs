// Library target for integration tests and criterion benchmarks.
// The binary entry point is main.rs and re-declares the same module tree.
#![allow(dead_code)]

pub mod config;
pub mod content;
pub mod engine;
pub mod generator;
pub mod keyboard;
pub mod session;

mod app;
mod event;
mod ui;
