//! Transition Renderer
//!
//! Pure mapping from (canvas width, stage set, transition state) to a
//! [`StageScene`]: the lines, markers and label cells that make up one frame
//! of the indicator. The scene is computed in canvas-local coordinates and
//! painted separately, so geometry can be checked without a UI context.
//!
//! ## Layout
//!
//! ```text
//!  seg = width / stage_count
//!  |<- seg ->|<- seg ->|<- seg ->|<- seg ->|
//!  ----o---------o=========O---------o----   offset_y = height / 2
//!   Created  Processed    Sent   Completed   one label cell per segment
//! ```
//!
//! Markers sit at segment centers. The foreground line ends at the current
//! stage's center, except for the last stage where it runs to the right edge
//! of the canvas while the last marker stays centered in its segment.

#![warn(clippy::all, rust_2018_idioms)]

use egui::{Color32, Painter, Pos2, Rangef, Stroke, Vec2};

use super::color::lerp_color;
use super::stages::{StageId, StageSet};
use crate::app::error::StageError;

/// Material grey 500
pub const DEFAULT_INACTIVE_COLOR: Color32 = Color32::from_rgb(0x9E, 0x9E, 0x9E);
/// Material blue 500
pub const DEFAULT_ACTIVE_COLOR: Color32 = Color32::from_rgb(0x21, 0x96, 0xF3);
pub const DEFAULT_CANVAS_HEIGHT: f32 = 18.0;
pub const DEFAULT_LINE_WIDTH: f32 = 4.0;
pub const DEFAULT_LABEL_GAP: f32 = 4.0;

/// Where the indicator is in a transition between two stages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionState {
    /// Stage shown before the current one; `None` until the first change
    pub previous: Option<usize>,
    /// Stage being transitioned to
    pub current: usize,
    /// Transition completion, 0.0 at the start and 1.0 when settled
    pub progress: f32,
}

impl TransitionState {
    /// Settled state at mount: no previous stage, no transition in flight
    pub fn settled(current: usize) -> Self {
        Self {
            previous: None,
            current,
            progress: 1.0,
        }
    }

    /// Same transition at a different progress value
    pub fn at_progress(self, progress: f32) -> Self {
        Self { progress, ..self }
    }

    pub fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Colors used for everything that is not a stage's own color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Background line and idle markers
    pub inactive: Color32,
    /// Fallback for stages with no color of their own
    pub active: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            inactive: DEFAULT_INACTIVE_COLOR,
            active: DEFAULT_ACTIVE_COLOR,
        }
    }
}

/// Fixed dimensions of the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub canvas_height: f32,
    pub line_width: f32,
    /// Vertical space between the canvas and the label row
    pub label_gap: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            line_width: DEFAULT_LINE_WIDTH,
            label_gap: DEFAULT_LABEL_GAP,
        }
    }
}

/// A horizontal line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineShape {
    pub from: Pos2,
    pub to: Pos2,
    pub color: Color32,
}

/// A stage marker circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerShape {
    pub index: usize,
    pub center: Pos2,
    pub radius: f32,
    pub color: Color32,
}

/// Horizontal extent of one stage's label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCell {
    pub index: usize,
    pub x_range: Rangef,
    pub text: String,
}

/// Everything needed to draw one frame, in canvas-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct StageScene {
    pub size: Vec2,
    pub line_width: f32,
    pub background: LineShape,
    pub foreground: LineShape,
    /// In ascending stage order, which is also paint order
    pub markers: Vec<MarkerShape>,
    pub labels: Vec<LabelCell>,
}

impl StageScene {
    /// Paint lines and markers with the canvas' top-left corner at `origin`
    ///
    /// Labels are not painted here; they are laid out as widgets by the caller.
    pub fn paint(&self, painter: &Painter, origin: Pos2) {
        let offset = origin.to_vec2();

        for line in [&self.background, &self.foreground] {
            painter.line_segment(
                [line.from + offset, line.to + offset],
                Stroke::new(self.line_width, line.color),
            );
        }

        for marker in &self.markers {
            painter.circle_filled(marker.center + offset, marker.radius, marker.color);
        }
    }

    pub fn marker(&self, index: usize) -> Option<&MarkerShape> {
        self.markers.get(index)
    }
}

/// Computes scenes for a fixed palette and style
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransitionRenderer {
    palette: Palette,
    style: RenderStyle,
}

impl TransitionRenderer {
    pub fn new(palette: Palette, style: RenderStyle) -> Self {
        Self { palette, style }
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn set_style(&mut self, style: RenderStyle) {
        self.style = style;
    }

    /// Marker radius for a stage that is neither current nor previous
    pub fn base_radius(&self) -> f32 {
        self.style.canvas_height / 2.0
    }

    /// Extra radius a fully active marker gains
    pub fn radius_boost(&self) -> f32 {
        self.base_radius() / 4.0
    }

    /// Compute the scene for `state` on a canvas `width` units wide
    pub fn scene<S: StageId>(
        &self,
        width: f32,
        stages: &StageSet<S>,
        state: &TransitionState,
    ) -> Result<StageScene, StageError> {
        let count = stages.len();
        if count == 0 {
            return Err(StageError::NoStages);
        }
        if !width.is_finite() || width < 0.0 {
            return Err(StageError::InvalidCanvas(width));
        }
        check_index(state.current, count)?;
        if let Some(previous) = state.previous {
            check_index(previous, count)?;
        }

        let Palette { inactive, active } = self.palette;
        let height = self.style.canvas_height;
        let offset_y = height / 2.0;
        let base_radius = self.base_radius();
        let boost = self.radius_boost();
        let segment = width / count as f32;
        let t = state.progress.clamp(0.0, 1.0);

        let current = state.current;
        let current_color = stages.color_of(current, active);
        // A previous stage without a color of its own fades from neutral
        let previous_color = state
            .previous
            .and_then(|previous| stages.own_color(previous))
            .unwrap_or(inactive);

        let line_from = line_end_x(segment, state.previous.unwrap_or(0), count);
        let line_to = line_end_x(segment, current, count);
        let foreground = LineShape {
            from: Pos2::new(0.0, offset_y),
            to: Pos2::new(egui::lerp(line_from..=line_to, t).clamp(0.0, width), offset_y),
            color: lerp_color(previous_color, current_color, t),
        };

        let background = LineShape {
            from: Pos2::new(0.0, offset_y),
            to: Pos2::new(width, offset_y),
            color: inactive,
        };

        let markers = (0..count)
            .map(|i| {
                let (radius, color) = if i == current {
                    (
                        base_radius + boost * t,
                        lerp_color(inactive, stages.color_of(i, active), t),
                    )
                } else if Some(i) == state.previous {
                    (
                        base_radius + boost * (1.0 - t),
                        lerp_color(previous_color, inactive, t),
                    )
                } else if i < current {
                    (base_radius, lerp_color(previous_color, current_color, t))
                } else {
                    (base_radius, inactive)
                };

                MarkerShape {
                    index: i,
                    center: Pos2::new(center_x(segment, i), offset_y),
                    radius,
                    color,
                }
            })
            .collect();

        let labels = stages
            .iter()
            .map(|stage| {
                let left = segment * stage.index as f32;
                LabelCell {
                    index: stage.index,
                    x_range: Rangef::new(left, left + segment),
                    text: stage.label.clone(),
                }
            })
            .collect();

        Ok(StageScene {
            size: Vec2::new(width, height),
            line_width: self.style.line_width,
            background,
            foreground,
            markers,
            labels,
        })
    }
}

fn check_index(index: usize, len: usize) -> Result<(), StageError> {
    if index < len {
        Ok(())
    } else {
        Err(StageError::StageIndexOutOfRange { index, len })
    }
}

/// Horizontal center of stage `index`'s segment
pub fn center_x(segment: f32, index: usize) -> f32 {
    segment * index as f32 + segment / 2.0
}

/// Where the foreground line ends when stage `index` is reached
pub fn line_end_x(segment: f32, index: usize, count: usize) -> f32 {
    if index + 1 == count {
        segment * index as f32 + segment
    } else {
        center_x(segment, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_stages() -> StageSet<u8> {
        StageSet::from_labels([(0, "Created"), (1, "Processed"), (2, "Sent"), (3, "Completed")])
    }

    #[test]
    fn test_center_and_line_end() {
        assert_eq!(center_x(100.0, 0), 50.0);
        assert_eq!(center_x(100.0, 3), 350.0);
        assert_eq!(line_end_x(100.0, 1, 4), 150.0);
        assert_eq!(line_end_x(100.0, 3, 4), 400.0);
        assert_eq!(line_end_x(100.0, 0, 1), 100.0);
    }

    #[test]
    fn test_settled_scene() {
        let renderer = TransitionRenderer::default();
        let scene = renderer
            .scene(400.0, &four_stages(), &TransitionState::settled(1))
            .unwrap();

        assert_eq!(scene.size, Vec2::new(400.0, 18.0));
        assert_eq!(scene.background.to.x, 400.0);
        assert_eq!(scene.background.color, DEFAULT_INACTIVE_COLOR);
        assert_eq!(scene.foreground.to.x, 150.0);
        assert_eq!(scene.foreground.color, DEFAULT_ACTIVE_COLOR);

        let active = scene.marker(1).unwrap();
        assert_eq!(active.radius, 9.0 + 2.25);
        assert_eq!(active.color, DEFAULT_ACTIVE_COLOR);

        let passed = scene.marker(0).unwrap();
        assert_eq!(passed.radius, 9.0);
        assert_eq!(passed.color, DEFAULT_ACTIVE_COLOR);

        let upcoming = scene.marker(2).unwrap();
        assert_eq!(upcoming.color, DEFAULT_INACTIVE_COLOR);
    }

    #[test]
    fn test_last_stage_line_reaches_edge_but_marker_is_centered() {
        let renderer = TransitionRenderer::default();
        let scene = renderer
            .scene(400.0, &four_stages(), &TransitionState::settled(3))
            .unwrap();

        assert_eq!(scene.foreground.to.x, 400.0);
        assert_eq!(scene.marker(3).unwrap().center.x, 350.0);
    }

    #[test]
    fn test_markers_in_ascending_order() {
        let renderer = TransitionRenderer::default();
        let scene = renderer
            .scene(200.0, &four_stages(), &TransitionState::settled(2))
            .unwrap();

        let indices: Vec<usize> = scene.markers.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(scene.markers.windows(2).all(|w| w[0].center.x < w[1].center.x));
    }

    #[test]
    fn test_label_cells_split_width_evenly() {
        let renderer = TransitionRenderer::default();
        let scene = renderer
            .scene(400.0, &four_stages(), &TransitionState::settled(0))
            .unwrap();

        assert_eq!(scene.labels.len(), 4);
        assert_eq!(scene.labels[2].x_range, Rangef::new(200.0, 300.0));
        assert_eq!(scene.labels[2].text, "Sent");
    }

    #[test]
    fn test_rejects_empty_stage_set() {
        let renderer = TransitionRenderer::default();
        let empty = StageSet::<u8>::from_labels(Vec::<(u8, &str)>::new());

        assert_eq!(
            renderer.scene(100.0, &empty, &TransitionState::settled(0)),
            Err(StageError::NoStages)
        );
    }

    #[test]
    fn test_rejects_out_of_range_indices() {
        let renderer = TransitionRenderer::default();
        let stages = four_stages();

        assert_eq!(
            renderer.scene(100.0, &stages, &TransitionState::settled(4)),
            Err(StageError::StageIndexOutOfRange { index: 4, len: 4 })
        );

        let state = TransitionState {
            previous: Some(9),
            current: 1,
            progress: 0.5,
        };
        assert_eq!(
            renderer.scene(100.0, &stages, &state),
            Err(StageError::StageIndexOutOfRange { index: 9, len: 4 })
        );
    }

    #[test]
    fn test_rejects_invalid_width() {
        let renderer = TransitionRenderer::default();
        let stages = four_stages();
        let state = TransitionState::settled(0);

        assert!(matches!(
            renderer.scene(-1.0, &stages, &state),
            Err(StageError::InvalidCanvas(_))
        ));
        assert!(matches!(
            renderer.scene(f32::NAN, &stages, &state),
            Err(StageError::InvalidCanvas(_))
        ));
    }

    #[test]
    fn test_uncolored_previous_stage_falls_back_to_inactive() {
        let renderer = TransitionRenderer::default();
        let stages = StageSet::new(
            [(0u8, "a"), (1, "b"), (2, "c")],
            [(1u8, Color32::RED)],
        );
        let state = TransitionState {
            previous: Some(0),
            current: 1,
            progress: 0.5,
        };

        let scene = renderer.scene(300.0, &stages, &state).unwrap();
        let grey_to_red = lerp_color(DEFAULT_INACTIVE_COLOR, Color32::RED, 0.5);
        assert_eq!(scene.foreground.color, grey_to_red);
        assert_eq!(scene.marker(0).unwrap().color, DEFAULT_INACTIVE_COLOR);
        assert_eq!(scene.marker(1).unwrap().color, grey_to_red);
    }

    #[test]
    fn test_colored_previous_stage_fades_from_its_own_color() {
        let renderer = TransitionRenderer::default();
        let stages = StageSet::new(
            [(0u8, "a"), (1, "b"), (2, "c")],
            [(0u8, Color32::GREEN)],
        );
        let state = TransitionState {
            previous: Some(0),
            current: 2,
            progress: 0.0,
        };

        let scene = renderer.scene(300.0, &stages, &state).unwrap();
        assert_eq!(scene.foreground.color, Color32::GREEN);
        assert_eq!(scene.marker(0).unwrap().color, Color32::GREEN);
        // Passed stage 1 starts from the previous stage's color
        assert_eq!(scene.marker(1).unwrap().color, Color32::GREEN);
    }

    #[test]
    fn test_custom_style_scales_radii() {
        let renderer = TransitionRenderer::new(
            Palette::default(),
            RenderStyle {
                canvas_height: 32.0,
                ..RenderStyle::default()
            },
        );

        assert_eq!(renderer.base_radius(), 16.0);
        assert_eq!(renderer.radius_boost(), 4.0);
    }
}
