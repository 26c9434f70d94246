//! Console and viewer tests
//!
//! Tests for:
//! - Scene editing through console commands
//! - Error text instead of failures on bad input
//! - Key routing between viewer and console
//! - Frame rendering through the draw recorder

use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;
use mio_viewer::app::{Key, MouseButtons, Viewer, ViewerAction, ViewerSettings};
use mio_viewer::console::Modifiers;
use mio_viewer::errors::CommandError;
use mio_viewer::render::DrawRecorder;
use mio_viewer::scene::NodeRef;

// ============================================================================
// Helpers
// ============================================================================

fn viewer() -> Viewer {
    let settings = ViewerSettings {
        asset_dirs: vec![PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")],
        ..ViewerSettings::default()
    };
    Viewer::new(settings)
}

fn last_line(viewer: &Viewer) -> String {
    viewer.console.screen.lines().last().map(ToString::to_string).unwrap_or_default()
}

fn type_line(viewer: &mut Viewer, line: &str) {
    for c in line.chars() {
        viewer.key(Key::Char(c), Modifiers::empty());
    }
    viewer.key(Key::Enter, Modifiers::empty());
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn script_builds_attached_scene() {
    let mut viewer = viewer();
    viewer.run_script(
        "armature hero biped.iqe\n\
         object sword sword.iqe\n\
         light lamp sun\n\
         attach sword hero hand.R\n\
         attach lamp hero head\n\
         move hero 1 0 0\n",
    )
    .unwrap();

    let scene = &mut viewer.scene;
    assert_eq!(scene.len(), 3);
    let Some(NodeRef::Object(sword)) = scene.find("sword") else {
        panic!("sword missing");
    };
    scene.resolve();
    let world = scene.world_transform(sword).unwrap();
    assert_eq!(world.w_axis.truncate(), Vec3::new(0.5, 0.0, 1.75));
}

#[test]
fn show_prints_world_matrix() {
    let mut viewer = viewer();
    viewer.run_script("light lamp\nmove lamp 1 2 3\n=lamp\n").unwrap();
    let lines = viewer.console.screen.lines();
    let rows = &lines[lines.len() - 4..];
    assert!(rows[0].trim_end().ends_with("1.000"));
    assert!(rows[1].trim_end().ends_with("2.000"));
    assert!(rows[2].trim_end().ends_with("3.000"));
}

#[test]
fn errors_are_printed_not_raised() {
    let mut viewer = viewer();
    let err = viewer.run_command("armature hero missing.iqe").unwrap_err();
    assert!(matches!(err, CommandError::AssetLoad(_)));
    assert!(last_line(&viewer).contains("not found"), "{}", last_line(&viewer));

    viewer.run_script("armature hero biped.iqe\nlight lamp\n").unwrap();
    viewer.run_command("attach lamp hero tail").unwrap_err();
    assert!(last_line(&viewer).contains("Unknown bone 'tail'"));

    viewer.run_command("attach hero lamp root").unwrap_err();
    assert!(last_line(&viewer).contains("armature"));

    viewer.run_command("light lamp").unwrap_err();
    assert!(last_line(&viewer).contains("already exists"));

    viewer.run_command("teleport lamp").unwrap_err();
    assert!(last_line(&viewer).contains("Unknown command"));
    assert_eq!(viewer.scene.len(), 2);
}

#[test]
fn skinned_mesh_auto_attach() {
    let mut viewer = viewer();
    viewer.run_script("armature hero biped.iqe\nobject tail tail.json\nattach tail hero\n").unwrap();
    let Some(NodeRef::Object(tail)) = viewer.scene.find("tail") else {
        panic!("tail missing");
    };
    let map = viewer.scene.object(tail).unwrap().skin_bone_map().unwrap().to_vec();
    assert_eq!(map, vec![Some(0), Some(2), None]);
}

#[test]
fn list_and_bones_describe_scene() {
    let mut viewer = viewer();
    viewer.run_script("armature hero biped.iqe\nobject sword sword.iqe\nattach sword hero hand.R\nlist\n").unwrap();
    assert_eq!(last_line(&viewer), "object   sword -> hero:hand.R");

    viewer.run_command("bones hero").unwrap();
    assert_eq!(last_line(&viewer), "  4 hand.R (parent 2)");
}

#[test]
fn remove_detaches_children() {
    let mut viewer = viewer();
    viewer.run_script("armature hero biped.iqe\nlight lamp\nattach lamp hero head\nremove hero\n").unwrap();
    let lamp = viewer.scene.find("lamp").unwrap();
    assert!(viewer.scene.node(lamp).unwrap().attachment().is_none());
    assert!(viewer.scene.find("hero").is_none());
}

#[test]
fn script_stops_at_first_asset_load_failure() {
    let mut viewer = viewer();
    let err = viewer
        .run_script("light lamp
teleport lamp
armature hero missing.iqe
light later
")
        .unwrap_err();
    assert!(matches!(err, CommandError::AssetLoad(_)));
    assert!(viewer.scene.find("lamp").is_some());
    assert!(viewer.scene.find("later").is_none());
    assert!(viewer.console.screen.lines().iter().any(|l| l.contains("Unknown command")));
}

#[test]
fn run_command_returns_command_output() {
    let mut viewer = viewer();
    viewer.run_command("light lamp").unwrap();
    let output = viewer.run_command("list").unwrap();
    assert_eq!(output.len(), 1);
    assert!(output[0].contains("lamp"));
    assert_eq!(last_line(&viewer), output[0]);
}

// ============================================================================
// Key Routing
// ============================================================================

#[test]
fn backtick_toggles_console() {
    let mut viewer = viewer();
    assert!(!viewer.console_visible());
    viewer.key(Key::Char('`'), Modifiers::empty());
    assert!(viewer.console_visible());

    // While the console is open, 'q' is text, not quit.
    assert_eq!(viewer.key(Key::Char('q'), Modifiers::empty()), ViewerAction::Continue);
    assert_eq!(viewer.console.editor.text(), "q");

    viewer.key(Key::Char('`'), Modifiers::empty());
    assert_eq!(viewer.key(Key::Char('q'), Modifiers::empty()), ViewerAction::Quit);
}

#[test]
fn typed_commands_run_on_enter() {
    let mut viewer = viewer();
    viewer.key(Key::Char('`'), Modifiers::empty());
    type_line(&mut viewer, "light lamp");
    assert!(viewer.scene.find("lamp").is_some());
    assert!(viewer.console.screen.lines().contains(&"> light lamp"));
}

#[test]
fn fullscreen_keys() {
    let mut viewer = viewer();
    assert_eq!(viewer.key(Key::Char('f'), Modifiers::empty()), ViewerAction::ToggleFullscreen);
    assert!(viewer.is_fullscreen());

    viewer.key(Key::Char('`'), Modifiers::empty());
    assert_eq!(viewer.key(Key::Enter, Modifiers::ALT), ViewerAction::ToggleFullscreen);
    assert!(!viewer.is_fullscreen());
    assert_eq!(viewer.key(Key::Escape, Modifiers::empty()), ViewerAction::Continue);
    assert_eq!(viewer.key(Key::F4, Modifiers::ALT), ViewerAction::Quit);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn render_frame_draws_objects() {
    let mut viewer = viewer();
    viewer.run_script("armature hero biped.iqe\nobject sword sword.iqe\nobject tail tail.json\nlight lamp\n").unwrap();

    let mut recorder = DrawRecorder::new();
    assert_eq!(viewer.render_frame(&mut recorder), 2);
    assert_eq!(recorder.frames(), 1);
    assert_eq!(recorder.clear_color(), [0.05, 0.05, 0.05, 1.0]);
    assert_eq!(viewer.timer.frame_count, 1);

    let view = viewer.camera.view_matrix();
    assert!(recorder.calls().iter().all(|c| c.model_view == view * glam::Mat4::IDENTITY));
}

#[test]
fn fixed_step_frames_advance_the_clock_exactly() {
    let mut viewer = viewer();
    viewer.run_script("armature hero biped.iqe\nobject sword sword.iqe\n").unwrap();

    let mut recorder = DrawRecorder::new();
    let step = Duration::from_millis(16);
    assert_eq!(viewer.render_frame_after(&mut recorder, step), 1);
    assert_eq!(viewer.render_frame_after(&mut recorder, step), 1);
    assert_eq!(recorder.frames(), 2);
    assert_eq!(viewer.timer.frame_count, 2);
    assert_eq!(viewer.timer.elapsed, Duration::from_millis(32));
    assert_eq!(viewer.timer.delta, step);
}

#[test]
fn mouse_drag_orbits_camera() {
    let mut viewer = viewer();
    let before = viewer.camera.view_matrix();
    viewer.mouse_button(MouseButtons::LEFT, true, 100.0, 100.0);
    viewer.mouse_motion(110.0, 100.0);
    viewer.mouse_button(MouseButtons::LEFT, false, 110.0, 100.0);

    assert!((viewer.camera.yaw - 357.0).abs() < 1e-4);
    assert_ne!(viewer.camera.view_matrix(), before);
}
