//! Stage Model
//!
//! An ordered, immutable set of stages built from caller-supplied label and
//! color mappings. The label mapping is authoritative: it defines how many
//! stages exist and the left-to-right order in which they are drawn.
//!
//! ```text
//! labels: [(Created, "Created"), (Processed, "Processed"), (Sent, "Sent")]
//! colors: [(Sent, GREEN)]
//!
//! index  id         label        color
//! 0      Created    "Created"    None  -> palette active color
//! 1      Processed  "Processed"  None  -> palette active color
//! 2      Sent       "Sent"       GREEN
//! ```

#![warn(clippy::all, rust_2018_idioms)]

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use egui::Color32;
use tracing::debug;

use crate::app::error::StageError;

/// Identifier for a stage in a caller-defined, closed set of stages
///
/// Blanket-implemented for any small copyable key, typically a fieldless enum.
pub trait StageId: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> StageId for T {}

/// One stage of a linear process
#[derive(Debug, Clone, PartialEq)]
pub struct Stage<S> {
    /// Position in declaration order
    pub index: usize,
    /// Caller's identifier for the stage
    pub id: S,
    /// Display text, empty when no label was supplied
    pub label: String,
    /// Display color; `None` falls back to the palette's active color, or to
    /// the inactive color while the stage is fading out as the previous stage
    pub color: Option<Color32>,
}

/// Ordered set of stages, immutable once built
#[derive(Debug, Clone)]
pub struct StageSet<S: StageId> {
    stages: Vec<Stage<S>>,
    index_by_id: HashMap<S, usize>,
}

impl<S: StageId> StageSet<S> {
    /// Build a stage set from label and color mappings
    ///
    /// Iteration order of `labels` defines rendering order. A repeated id keeps
    /// its first position and takes the later label. Colors for ids without a
    /// label are ignored. Construction never fails; an empty label mapping
    /// produces an empty set, which the renderer rejects.
    pub fn new<L, C, T>(labels: L, colors: C) -> Self
    where
        L: IntoIterator<Item = (S, T)>,
        T: Into<String>,
        C: IntoIterator<Item = (S, Color32)>,
    {
        let mut stages: Vec<Stage<S>> = Vec::new();
        let mut index_by_id: HashMap<S, usize> = HashMap::new();

        for (id, label) in labels {
            let label = label.into();
            if let Some(&index) = index_by_id.get(&id) {
                debug!("Stage {:?} listed twice, keeping position {}", id, index);
                stages[index].label = label;
                continue;
            }

            let index = stages.len();
            index_by_id.insert(id, index);
            stages.push(Stage {
                index,
                id,
                label,
                color: None,
            });
        }

        for (id, color) in colors {
            match index_by_id.get(&id) {
                Some(&index) => stages[index].color = Some(color),
                None => debug!("Ignoring color for unlabeled stage {:?}", id),
            }
        }

        Self {
            stages,
            index_by_id,
        }
    }

    /// Build a stage set with labels only
    pub fn from_labels<L, T>(labels: L) -> Self
    where
        L: IntoIterator<Item = (S, T)>,
        T: Into<String>,
    {
        Self::new(labels, std::iter::empty())
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Stage<S>> {
        self.stages.get(index)
    }

    /// Index of the stage with identifier `id`
    pub fn index_of(&self, id: S) -> Option<usize> {
        self.index_by_id.get(&id).copied()
    }

    /// Index of `id`, or an `UnknownStage` error
    pub fn require_index(&self, id: S) -> Result<usize, StageError> {
        self.index_of(id)
            .ok_or_else(|| StageError::UnknownStage(format!("{:?}", id)))
    }

    /// Stages in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Stage<S>> {
        self.stages.iter()
    }

    /// Display color for the stage at `index`, resolving unset colors to `fallback`
    pub fn color_of(&self, index: usize, fallback: Color32) -> Color32 {
        self.own_color(index).unwrap_or(fallback)
    }

    /// Color the stage at `index` was configured with, if any
    pub fn own_color(&self, index: usize) -> Option<Color32> {
        self.stages.get(index).and_then(|stage| stage.color)
    }

    /// Labels in declaration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|stage| stage.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Order {
        Created,
        Processed,
        Sent,
        Completed,
    }

    fn order_labels() -> Vec<(Order, &'static str)> {
        vec![
            (Order::Created, "Created"),
            (Order::Processed, "Processed"),
            (Order::Sent, "Sent"),
            (Order::Completed, "Completed"),
        ]
    }

    #[test]
    fn test_label_order_defines_indices() {
        let set = StageSet::from_labels(order_labels());

        assert_eq!(set.len(), 4);
        assert_eq!(set.index_of(Order::Created), Some(0));
        assert_eq!(set.index_of(Order::Completed), Some(3));
        assert_eq!(
            set.labels().collect::<Vec<_>>(),
            vec!["Created", "Processed", "Sent", "Completed"]
        );
    }

    #[test]
    fn test_missing_colors_fall_back() {
        let set = StageSet::new(
            order_labels().into_iter().take(3),
            [(Order::Sent, Color32::GREEN)],
        );

        assert_eq!(set.color_of(0, Color32::BLUE), Color32::BLUE);
        assert_eq!(set.color_of(1, Color32::BLUE), Color32::BLUE);
        assert_eq!(set.color_of(2, Color32::BLUE), Color32::GREEN);
    }

    #[test]
    fn test_own_color_is_none_without_entry() {
        let set = StageSet::new(order_labels(), [(Order::Processed, Color32::RED)]);

        assert_eq!(set.own_color(0), None);
        assert_eq!(set.own_color(1), Some(Color32::RED));
        assert_eq!(set.own_color(9), None);
    }

    #[test]
    fn test_colors_without_labels_are_ignored() {
        let set = StageSet::new(
            [(Order::Created, "Created")],
            [(Order::Completed, Color32::RED)],
        );

        assert_eq!(set.len(), 1);
        assert_eq!(set.index_of(Order::Completed), None);
        assert!(matches!(
            set.require_index(Order::Completed),
            Err(StageError::UnknownStage(_))
        ));
    }

    #[test]
    fn test_duplicate_id_keeps_first_position() {
        let set = StageSet::from_labels([
            (Order::Created, "New"),
            (Order::Sent, "Sent"),
            (Order::Created, "Created"),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).map(|s| s.label.as_str()), Some("Created"));
        assert_eq!(set.index_of(Order::Sent), Some(1));
    }

    #[test]
    fn test_empty_labels_allowed() {
        let set = StageSet::<Order>::from_labels(Vec::<(Order, String)>::new());
        assert!(set.is_empty());
        assert!(set.get(0).is_none());
    }

    #[test]
    fn test_empty_label_text() {
        let set = StageSet::from_labels([(Order::Created, ""), (Order::Processed, "Processed")]);
        assert_eq!(set.get(0).map(|s| s.label.as_str()), Some(""));
    }
}
