//! SOS Light library.
//!
//! Exposes the signal scheduler, navigation helpers, the diary and the
//! hexagonal service core for integration testing.  The binary in
//! `main.rs` wires the host adapters around them.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod diary;
pub mod drivers;
pub mod error;
pub mod nav;
pub mod runtime;
pub mod signal;
