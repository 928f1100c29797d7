use std::cell::Cell;
use std::rc::Rc;

use approx::assert_relative_eq;
use glam::DVec2;
use globe_plot::core::CollectionKind;
use globe_plot::{
    InputFeedback, Key, MemoryViewer, PlotCommand, PlotController, PlotError, PlotFeatureOptions,
    PlotId, PlotIntent, PlotLifecycle, PlotOptions, PlotOutcome, PointerButton, ScopeError,
};

const TRIANGLE: [[f64; 2]; 3] = [[500.0, 300.0], [600.0, 300.0], [600.0, 400.0]];
/// Innerhalb des Dreiecks, abseits aller Punkte
const INSIDE: [f64; 2] = [585.0, 320.0];
/// Weit weg von jeder Form
const EMPTY: [f64; 2] = [100.0, 650.0];

fn setup() -> (Rc<MemoryViewer>, PlotController) {
    let viewer = Rc::new(MemoryViewer::new());
    let controller = PlotController::new(viewer.clone(), PlotOptions::default());
    (viewer, controller)
}

fn at([x, y]: [f64; 2]) -> DVec2 {
    DVec2::new(x, y)
}

fn send(controller: &mut PlotController, intent: PlotIntent) -> InputFeedback {
    controller
        .handle_intent(intent)
        .expect("Intent sollte ohne Fehler durchlaufen")
}

fn click(controller: &mut PlotController, position: [f64; 2]) -> InputFeedback {
    send(
        controller,
        PlotIntent::Click {
            button: PointerButton::Left,
            position: at(position),
        },
    )
}

fn total_graphics(viewer: &MemoryViewer) -> usize {
    CollectionKind::ALL.iter().map(|kind| viewer.count(*kind)).sum()
}

/// Zweites Dreieck rechts neben `TRIANGLE`
const OTHER_TRIANGLE: [[f64; 2]; 3] = [[800.0, 300.0], [900.0, 300.0], [900.0, 400.0]];
const INSIDE_OTHER: [f64; 2] = [885.0, 320.0];

/// Definiert ein Dreieck und wählt es ab; liefert die Plot-ID.
fn committed_triangle(controller: &mut PlotController) -> PlotId {
    committed_polygon(controller, TRIANGLE)
}

fn committed_polygon(controller: &mut PlotController, vertices: [[f64; 2]; 3]) -> PlotId {
    let session = controller
        .operate(PlotFeatureOptions::new("polygon"))
        .expect("operate sollte gelingen");
    for position in vertices {
        click(controller, position);
    }
    controller
        .set_current(None)
        .expect("Abwählen sollte gelingen");
    assert_eq!(
        session.completion.outcome(),
        Some(PlotOutcome::Committed(session.plot))
    );
    session.plot
}

#[test]
fn test_three_clicks_then_deselect_commits_polygon() {
    let (_viewer, mut controller) = setup();
    let session = controller
        .operate(PlotFeatureOptions::new("polygon"))
        .expect("operate sollte gelingen");
    assert_eq!(controller.current(), Some(session.plot));
    assert!(!session.completion.is_resolved());

    for position in TRIANGLE {
        let feedback = click(&mut controller, position);
        assert!(feedback.consumed, "Klick während der Definition wird verbraucht");
    }
    assert_eq!(controller.packable().map(|p| p.len()), Some(3));

    controller.set_current(None).expect("Abwählen");
    let outcome = pollster::block_on(session.completion.clone());
    assert_eq!(outcome, PlotOutcome::Committed(session.plot));

    let feature = controller.plot(session.plot).expect("Plot bleibt verwaltet");
    assert_eq!(feature.lifecycle(), PlotLifecycle::Committed);
    assert!(!feature.is_active());
    assert_eq!(feature.tracked(CollectionKind::Entities), 1);
    assert!(controller.packable().is_none());
}

#[test]
fn test_two_clicks_then_deselect_discards_polygon() {
    let (viewer, mut controller) = setup();
    let session = controller
        .operate(PlotFeatureOptions::new("polygon"))
        .expect("operate sollte gelingen");
    click(&mut controller, TRIANGLE[0]);
    click(&mut controller, TRIANGLE[1]);
    assert!(total_graphics(&viewer) > 0);

    controller.set_current(None).expect("Abwählen");

    assert_eq!(
        pollster::block_on(session.completion),
        PlotOutcome::Discarded(session.plot)
    );
    assert_eq!(controller.plots().count(), 0);
    assert_eq!(total_graphics(&viewer), 0, "Scene ist vollständig aufgeräumt");
}

#[test]
fn test_right_click_completes_only_with_enough_vertices() {
    let (_viewer, mut controller) = setup();
    let session = controller
        .operate(PlotFeatureOptions::new("polygon"))
        .expect("operate sollte gelingen");
    let right_click = |position| PlotIntent::Click {
        button: PointerButton::Right,
        position,
    };

    click(&mut controller, TRIANGLE[0]);
    click(&mut controller, TRIANGLE[1]);
    let feedback = send(&mut controller, right_click(at(TRIANGLE[1])));
    assert!(!feedback.consumed);
    assert!(!session.completion.is_resolved());

    click(&mut controller, TRIANGLE[2]);
    let feedback = send(&mut controller, right_click(at(TRIANGLE[2])));
    assert!(feedback.consumed);
    assert_eq!(
        session.completion.outcome(),
        Some(PlotOutcome::Committed(session.plot))
    );
    // bleibt aktuell, aber nicht mehr in Definition
    assert_eq!(controller.current(), Some(session.plot));
    assert!(!controller.state().is_defining());
}

#[test]
fn test_click_selects_plot_and_miss_clears_current() {
    let (_viewer, mut controller) = setup();
    let id = committed_triangle(&mut controller);
    assert_eq!(controller.current(), None);

    let feedback = click(&mut controller, INSIDE);
    assert!(feedback.consumed);
    assert_eq!(controller.current(), Some(id));
    assert!(controller.plot(id).expect("Plot").is_active());

    click(&mut controller, EMPTY);
    assert_eq!(controller.current(), None);
    assert!(!controller.plot(id).expect("Plot").is_active());
}

#[test]
fn test_click_switches_current_between_idle_plots() {
    let (_viewer, mut controller) = setup();
    let first = committed_polygon(&mut controller, TRIANGLE);
    let second = committed_polygon(&mut controller, OTHER_TRIANGLE);

    click(&mut controller, INSIDE);
    assert_eq!(controller.current(), Some(first));

    click(&mut controller, INSIDE_OTHER);
    assert_eq!(controller.current(), Some(second));
    assert!(controller.plot(second).expect("Plot").is_active());
    assert!(!controller.plot(first).expect("Plot").is_active());

    click(&mut controller, INSIDE);
    assert_eq!(controller.current(), Some(first));
    assert!(!controller.plot(second).expect("Plot").is_active());
    assert_eq!(controller.plots().count(), 2);
}

#[test]
fn test_operating_second_plot_commits_defining_first() {
    let (_viewer, mut controller) = setup();
    let first = controller
        .operate(PlotFeatureOptions::new("polygon"))
        .expect("operate sollte gelingen");
    for position in TRIANGLE {
        click(&mut controller, position);
    }

    let second = controller
        .operate(PlotFeatureOptions::new("polygon"))
        .expect("operate sollte gelingen");

    assert_eq!(
        first.completion.outcome(),
        Some(PlotOutcome::Committed(first.plot))
    );
    assert_eq!(controller.current(), Some(second.plot));
    assert!(controller.state().is_defining());

    // unvollständiger zweiter Plot wird beim Wechsel verworfen
    click(&mut controller, OTHER_TRIANGLE[0]);
    click(&mut controller, OTHER_TRIANGLE[1]);
    controller.operate(first.plot).expect("operate auf bestehendem Plot");

    assert_eq!(
        second.completion.outcome(),
        Some(PlotOutcome::Discarded(second.plot))
    );
    assert_eq!(controller.current(), Some(first.plot));
    assert!(controller.plot(second.plot).is_none());
    assert_eq!(
        controller.plot(first.plot).expect("Plot").lifecycle(),
        PlotLifecycle::Committed
    );
}

#[test]
fn test_defining_blocks_selection() {
    let (_viewer, mut controller) = setup();
    let first = committed_triangle(&mut controller);
    let second = controller
        .operate(PlotFeatureOptions::new("polyline"))
        .expect("operate sollte gelingen");

    click(&mut controller, INSIDE);

    assert_eq!(controller.current(), Some(second.plot));
    assert_ne!(controller.current(), Some(first));
    assert_eq!(controller.packable().map(|p| p.len()), Some(1));
}

#[test]
fn test_current_changed_is_raised_on_every_switch() {
    let (_viewer, mut controller) = setup();
    let switches = Rc::new(Cell::new(0));
    let counter = switches.clone();
    controller.on_current_changed(move |_| counter.set(counter.get() + 1));

    let id = committed_triangle(&mut controller);
    assert_eq!(switches.get(), 2, "operate + Abwählen");

    click(&mut controller, INSIDE);
    click(&mut controller, INSIDE);
    assert_eq!(switches.get(), 3, "erneute Auswahl desselben Plots ist kein Wechsel");
    assert_eq!(controller.current(), Some(id));
}

#[test]
fn test_interval_drag_inserts_single_vertex_and_swallows_click() {
    let (viewer, mut controller) = setup();
    let id = committed_triangle(&mut controller);
    click(&mut controller, INSIDE);

    // Mittelpunkt zwischen Vertex 0 und 1
    let feedback = send(
        &mut controller,
        PlotIntent::PointerDown {
            button: PointerButton::Left,
            position: DVec2::new(550.0, 300.0),
        },
    );
    assert!(feedback.consumed);
    assert_eq!(feedback.cursor.as_deref(), Some("crosshair"));

    let feedback = send(
        &mut controller,
        PlotIntent::PointerMove {
            position: DVec2::new(550.0, 250.0),
        },
    );
    assert!(feedback.camera_locked);
    send(
        &mut controller,
        PlotIntent::PointerMove {
            position: DVec2::new(550.0, 240.0),
        },
    );
    send(
        &mut controller,
        PlotIntent::PointerUp {
            button: PointerButton::Left,
            position: DVec2::new(550.0, 240.0),
        },
    );
    assert!(!controller.camera_locked());

    let feedback = click(&mut controller, [550.0, 240.0]);
    assert!(feedback.consumed);
    assert_eq!(
        controller.command_log().entries().last(),
        Some(&PlotCommand::SwallowClick)
    );
    assert_eq!(controller.current(), Some(id), "Klick nach Drag ändert nichts");

    let positions = controller.packable().expect("Snapshot").positions.clone();
    assert_eq!(positions.len(), 4, "genau ein Vertex eingefügt");
    let inserted = viewer.project(positions[1]).expect("projizierbar");
    assert_relative_eq!(inserted.x, 550.0, epsilon = 1e-6);
    assert_relative_eq!(inserted.y, 240.0, epsilon = 1e-6);
}

#[test]
fn test_arrow_key_nudges_selected_control_point() {
    let (viewer, mut controller) = setup();
    let id = committed_triangle(&mut controller);
    click(&mut controller, INSIDE);

    // Kontrollpunkt 0 greifen und ohne Bewegung loslassen
    for intent in [
        PlotIntent::PointerDown {
            button: PointerButton::Left,
            position: at(TRIANGLE[0]),
        },
        PlotIntent::PointerUp {
            button: PointerButton::Left,
            position: at(TRIANGLE[0]),
        },
    ] {
        send(&mut controller, intent);
    }
    assert!(controller.state().pointer.selected.is_some());

    let feedback = send(&mut controller, PlotIntent::KeyPressed { key: Key::ArrowUp });
    assert!(feedback.consumed, "behandelte Pfeiltaste wird verbraucht");

    let moved = controller
        .plot(id)
        .expect("Plot")
        .value_at(0.0)
        .positions[0];
    let screen = viewer.project(moved).expect("projizierbar");
    assert_relative_eq!(screen.x, TRIANGLE[0][0], epsilon = 1e-6);
    assert!(screen.y < TRIANGLE[0][1], "Pfeil hoch schiebt nach Norden");

    let feedback = send(
        &mut controller,
        PlotIntent::KeyPressed {
            key: Key::from_name("a"),
        },
    );
    assert!(!feedback.consumed);
}

#[test]
fn test_cancel_discards_defining_plot() {
    let (viewer, mut controller) = setup();
    let session = controller
        .operate(PlotFeatureOptions::new("polygon"))
        .expect("operate sollte gelingen");
    click(&mut controller, TRIANGLE[0]);
    click(&mut controller, TRIANGLE[1]);

    assert!(controller.cancel().expect("cancel"));
    assert_eq!(
        session.completion.outcome(),
        Some(PlotOutcome::Cancelled(session.plot))
    );
    assert_eq!(controller.current(), None);
    assert_eq!(controller.plots().count(), 0);
    assert_eq!(total_graphics(&viewer), 0);

    assert!(!controller.cancel().expect("cancel ohne Definition"));
}

#[test]
fn test_escape_cancels_definition() {
    let (_viewer, mut controller) = setup();
    let session = controller
        .operate(PlotFeatureOptions::new("polyline"))
        .expect("operate sollte gelingen");

    let feedback = send(&mut controller, PlotIntent::KeyPressed { key: Key::Escape });

    assert!(feedback.consumed);
    assert_eq!(
        session.completion.outcome(),
        Some(PlotOutcome::Cancelled(session.plot))
    );
}

#[test]
fn test_remove_releases_plot_once() {
    let (viewer, mut controller) = setup();
    let id = committed_triangle(&mut controller);
    click(&mut controller, INSIDE);

    assert!(controller.remove(id).expect("remove"));
    assert_eq!(controller.current(), None);
    assert_eq!(controller.plots().count(), 0);
    assert_eq!(total_graphics(&viewer), 0);

    assert!(!controller.remove(id).expect("remove"));
}

#[test]
fn test_operate_existing_committed_plot_does_not_redefine() {
    let (_viewer, mut controller) = setup();
    let id = committed_triangle(&mut controller);

    let session = controller.operate(id).expect("operate auf bestehendem Plot");

    assert_eq!(controller.current(), Some(id));
    assert!(!controller.state().is_defining());
    assert_eq!(
        session.completion.outcome(),
        Some(PlotOutcome::Committed(id))
    );
}

#[test]
fn test_operate_without_scene_fails_without_tracking() {
    let viewer = Rc::new(MemoryViewer::detached());
    let mut controller = PlotController::new(viewer, PlotOptions::default());

    let result = controller.operate(PlotFeatureOptions::new("polygon"));

    assert_eq!(
        result.err(),
        Some(PlotError::Scope(ScopeError::Unbound("entities")))
    );
    assert_eq!(controller.plots().count(), 0);
    assert_eq!(controller.current(), None);
}

#[test]
fn test_unknown_scheme_and_unknown_plot_are_reported() {
    let (_viewer, mut controller) = setup();

    assert_eq!(
        controller
            .operate(PlotFeatureOptions::new("ellipse"))
            .err(),
        Some(PlotError::UnknownScheme("ellipse".to_string()))
    );
    assert_eq!(
        controller.set_current(Some(PlotId(9999))),
        Err(PlotError::UnknownPlot(PlotId(9999)))
    );
}
