//! UI tests for the staged progress widget running inside an egui test harness.

use std::time::Duration;

use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;

use stage_progress::app::staged_progress::StagedProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Delivery {
    Ordered,
    Packed,
    Shipped,
}

fn delivery_progress() -> StagedProgress<Delivery> {
    StagedProgress::new(
        Delivery::Ordered,
        [
            (Delivery::Ordered, "Ordered"),
            (Delivery::Packed, "Packed"),
            (Delivery::Shipped, "Shipped"),
        ],
    )
    .unwrap()
}

#[test]
fn test_renders_one_label_per_stage() {
    let mut harness = Harness::new_ui_state(
        |ui, progress: &mut StagedProgress<Delivery>| {
            ui.add(progress);
        },
        delivery_progress(),
    );

    harness.step();

    harness.get_by_label("Ordered");
    harness.get_by_label("Packed");
    harness.get_by_label("Shipped");
}

#[test]
fn test_stage_change_settles_across_frames() {
    let mut harness = Harness::new_ui_state(
        |ui, progress: &mut StagedProgress<Delivery>| {
            ui.add(progress);
        },
        delivery_progress().with_animation_duration(Duration::ZERO),
    );

    harness.step();
    assert!(!harness.state().is_animating());

    assert!(harness.state_mut().set_stage(Delivery::Shipped).unwrap());
    assert!(harness.state().is_animating());

    harness.step();
    let state = harness.state().state();
    assert_eq!(state.previous, Some(0));
    assert_eq!(state.current, 2);
    assert_eq!(state.progress, 1.0);
    assert!(!harness.state().is_animating());
}

#[test]
fn test_widget_in_harness_keeps_labels_while_animating() {
    let mut harness = Harness::new_ui_state(
        |ui, progress: &mut StagedProgress<Delivery>| {
            ui.add(progress);
        },
        delivery_progress().with_animation_duration(Duration::from_secs(60)),
    );

    harness.state_mut().set_stage(Delivery::Packed).unwrap();
    harness.step();
    harness.step();

    assert!(harness.state().is_animating());
    assert!(harness.state().state().progress < 1.0);
    harness.get_by_label("Packed");
}
