//! Stage Progress - animated staged progress indicator for egui
//!
//! A horizontal indicator that draws one marker per stage of a linear process
//! (created → processed → sent → completed) and animates the transition when
//! the current stage changes: the foreground line slides to the new stage, the
//! new marker grows and takes its color, and the old one shrinks back to the
//! inactive color.
//!
//! # Architecture Overview
//!
//! - **Stage Model** ([`app::staged_progress::StageSet`]): ordered stages with labels and optional colors
//! - **Renderer** ([`app::staged_progress::TransitionRenderer`]): pure scene computation, painted with egui's `Painter`
//! - **Animation** ([`app::staged_progress::AnimationDriver`]): eased progress driven by frame time
//! - **Widget** ([`app::staged_progress::StagedProgress`]): state holder with subscriptions and teardown
//! - **Configuration** ([`app::config::StagedProgressConfig`]): TOML-backed timing, dimensions and palette
//!
//! The [`DemoApp`] binary shows the widget for a four-stage order lifecycle.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub use app::DemoApp;
