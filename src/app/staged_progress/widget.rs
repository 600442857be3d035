//! Staged Progress Widget
//!
//! A single long-lived holder for the stage set, the transition state, the
//! animation driver and the renderer.
//!
//! ## Layout
//!
//! ```text
//! ----o---------O=========o---------o----   canvas (fixed height)
//!  Created  Processed    Sent   Completed   label row
//! ```
//!
//! Changing the stage restarts the driver; every tick and every stage change
//! is published to subscribers and the widget keeps requesting repaints until
//! the transition settles.

#![warn(clippy::all, rust_2018_idioms)]

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use egui::{Color32, Label, Response, Sense, Ui, Vec2};
use tracing::{debug, warn};

use super::animation::{AnimationDriver, Easing};
use super::renderer::{Palette, RenderStyle, StageScene, TransitionRenderer, TransitionState};
use super::stages::{StageId, StageSet};
use crate::app::config::StagedProgressConfig;
use crate::app::error::StageError;

/// Horizontal staged progress indicator
///
/// ```rust,ignore
/// let mut progress = StagedProgress::new(
///     Order::Created,
///     [(Order::Created, "Created"), (Order::Sent, "Sent")],
/// )?
/// .with_colors([(Order::Sent, Color32::GREEN)]);
///
/// progress.set_stage(Order::Sent)?;
/// ui.add(&mut progress);
/// ```
pub struct StagedProgress<S: StageId> {
    stages: StageSet<S>,
    current_id: S,
    previous_id: Option<S>,
    state: TransitionState,
    driver: AnimationDriver,
    renderer: TransitionRenderer,
    subscribers: Vec<Sender<TransitionState>>,
    /// Last render error, kept so a persistent error is logged once
    last_error: Option<StageError>,
    /// Context of the last frame shown, woken on stage changes
    ctx: Option<egui::Context>,
    disposed: bool,
}

impl<S: StageId> StagedProgress<S> {
    /// Create a widget showing `current_stage`, settled
    ///
    /// `stage_labels` defines the stages and their order.
    pub fn new<L, T>(current_stage: S, stage_labels: L) -> Result<Self, StageError>
    where
        L: IntoIterator<Item = (S, T)>,
        T: Into<String>,
    {
        Self::from_stage_set(current_stage, StageSet::from_labels(stage_labels))
    }

    /// Create a widget from an already built stage set
    pub fn from_stage_set(current_stage: S, stages: StageSet<S>) -> Result<Self, StageError> {
        if stages.is_empty() {
            return Err(StageError::NoStages);
        }
        let current = stages.require_index(current_stage)?;

        debug!(
            "Staged progress created with {} stages at {:?}",
            stages.len(),
            current_stage
        );

        Ok(Self {
            stages,
            current_id: current_stage,
            previous_id: None,
            state: TransitionState::settled(current),
            driver: AnimationDriver::default(),
            renderer: TransitionRenderer::default(),
            subscribers: Vec::new(),
            last_error: None,
            ctx: None,
            disposed: false,
        })
    }

    /// Assign display colors; stages left out use the palette's active color
    pub fn with_colors<C>(mut self, stage_colors: C) -> Self
    where
        C: IntoIterator<Item = (S, Color32)>,
    {
        let labels: Vec<(S, String)> = self
            .stages
            .iter()
            .map(|stage| (stage.id, stage.label.clone()))
            .collect();
        let existing: Vec<(S, Color32)> = self
            .stages
            .iter()
            .filter_map(|stage| stage.color.map(|color| (stage.id, color)))
            .collect();

        self.stages = StageSet::new(labels, existing.into_iter().chain(stage_colors));
        self
    }

    /// Set transition duration (default 450 ms)
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.driver.set_duration(duration);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.driver.set_easing(easing);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.renderer.set_palette(palette);
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.renderer.set_style(style);
        self
    }

    /// Apply duration, easing, palette and dimensions from a config
    pub fn with_config(mut self, config: &StagedProgressConfig) -> Self {
        self.apply_config(config);
        self
    }

    /// Apply a config to a live widget; stage and transition state are kept
    pub fn apply_config(&mut self, config: &StagedProgressConfig) {
        self.driver.set_duration(config.animation_duration());
        self.driver.set_easing(config.easing);
        self.renderer.set_palette(config.palette());
        self.renderer.set_style(config.render_style());
    }

    pub fn stages(&self) -> &StageSet<S> {
        &self.stages
    }

    pub fn current_stage(&self) -> S {
        self.current_id
    }

    /// Stage shown before the current one, `None` until the first change
    pub fn previous_stage(&self) -> Option<S> {
        self.previous_id
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    pub fn animation_duration(&self) -> Duration {
        self.driver.duration()
    }

    pub fn renderer(&self) -> &TransitionRenderer {
        &self.renderer
    }

    /// Move to `stage`
    ///
    /// Returns `Ok(true)` when a transition started. Setting the stage that is
    /// already current is a no-op. A change during a transition restarts it
    /// with the currently displayed stage as the new previous stage.
    pub fn set_stage(&mut self, stage: S) -> Result<bool, StageError> {
        let index = self.stages.require_index(stage)?;

        if index == self.state.current {
            return Ok(false);
        }
        if self.disposed {
            warn!("Ignoring stage change to {:?} on disposed widget", stage);
            return Ok(false);
        }

        debug!(
            "Stage change {:?} -> {:?} (progress was {:.3})",
            self.current_id, stage, self.state.progress
        );

        self.previous_id = Some(self.current_id);
        self.current_id = stage;
        self.state = TransitionState {
            previous: Some(self.state.current),
            current: index,
            progress: 0.0,
        };
        self.driver.restart();
        self.notify();

        // The change may come from outside a frame
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }

        Ok(true)
    }

    /// Receive every state change from now on
    ///
    /// The channel disconnects when the widget is disposed or dropped.
    pub fn subscribe(&mut self) -> Receiver<TransitionState> {
        let (sender, receiver) = channel();
        if self.disposed {
            debug!("Subscription on disposed widget is already closed");
        } else {
            self.subscribers.push(sender);
        }
        receiver
    }

    /// Advance the animation to frame time `now` (seconds)
    pub fn tick(&mut self, now: f64) -> TransitionState {
        if self.disposed || !self.driver.is_animating() {
            return self.state;
        }

        let progress = self.driver.tick(now);
        if progress != self.state.progress {
            self.state.progress = progress;
            self.notify();
        }

        self.state
    }

    /// Scene for the current state on a canvas `width` units wide
    pub fn scene_for_width(&self, width: f32) -> Result<StageScene, StageError> {
        self.renderer.scene(width, &self.stages, &self.state)
    }

    /// Stop the animation and release all subscribers
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.driver.stop();
        self.state.progress = 1.0;
        self.subscribers.clear();
        self.ctx = None;
        debug!("Staged progress disposed at {:?}", self.current_id);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn notify(&mut self) {
        let state = self.state;
        self.subscribers.retain(|sender| sender.send(state).is_ok());
    }

    /// Render the indicator into the available width
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        if self.ctx.is_none() && !self.disposed {
            self.ctx = Some(ui.ctx().clone());
        }
        self.tick(ui.input(|i| i.time));

        let style = self.renderer.style();
        let width = ui.available_width();
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(width, style.canvas_height), Sense::hover());

        let scene = match self.scene_for_width(width) {
            Ok(scene) => {
                self.last_error = None;
                scene
            }
            Err(err) => {
                if self.last_error.as_ref() != Some(&err) {
                    warn!("Cannot render staged progress: {}", err);
                    self.last_error = Some(err.clone());
                }
                ui.colored_label(ui.visuals().error_fg_color, err.to_string());
                return response;
            }
        };

        if ui.is_rect_visible(rect) {
            scene.paint(ui.painter(), rect.min);
        }

        ui.add_space(style.label_gap);
        ui.scope(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.columns(scene.labels.len(), |columns| {
                for (column, cell) in columns.iter_mut().zip(&scene.labels) {
                    column.vertical_centered(|ui| {
                        ui.add(Label::new(cell.text.as_str()).truncate());
                    });
                }
            });
        });

        if self.driver.is_animating() {
            ui.ctx().request_repaint();
        }

        response
    }
}

impl<S: StageId> egui::Widget for &mut StagedProgress<S> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui)
    }
}

impl<S: StageId> Drop for StagedProgress<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
