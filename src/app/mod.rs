//! Core modules for the staged progress widget.
//!
//! # Module Organization
//!
//! - [`staged_progress`] - Stage model, renderer, animation driver and widget
//! - [`config`] - File-backed widget configuration
//! - [`error`] - Errors surfaced to integrators
//! - [`demo`] - eframe demo application

pub mod config;
pub mod demo;
pub mod error;
pub mod staged_progress;

pub use demo::DemoApp;
