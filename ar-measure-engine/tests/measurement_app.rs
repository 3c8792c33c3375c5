use approx::assert_relative_eq;
use ar_measure_engine::measurement::{
    HitTargetTracker, HitTestResult, MeasurementState, PolygonMeasurement, TargetPose,
};
use ar_measure_engine::rpc::web_rpc::{IncomingRpcMessage, WebRpcInterface, WebRpcPlugin};
use ar_measure_engine::tools::tool_manager::{
    CommandSource, FrameHitResults, MeasureCommand, MeasureCommandEvent, MeasurementChanged,
    MeasurementPlugin, SessionEndedEvent,
};
use bevy::math::DVec3;
use bevy::prelude::*;

fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(MeasurementPlugin)
        .add_plugins(WebRpcPlugin);
    app.update();
    app
}

fn hits_at(x: f64, y: f64, z: f64) -> FrameHitResults {
    FrameHitResults {
        hits: vec![HitTestResult::new(TargetPose::from_position(DVec3::new(x, y, z)))],
    }
}

fn command(command: MeasureCommand) -> MeasureCommandEvent {
    MeasureCommandEvent {
        command,
        source: CommandSource::Pointer,
    }
}

fn measurement(app: &App) -> &PolygonMeasurement {
    app.world().resource::<PolygonMeasurement>()
}

/// Run the frame without `PostUpdate`, which flushes the outgoing queues.
fn update_before_flush(app: &mut App) {
    app.world_mut().run_schedule(Update);
}

fn outgoing(app: &App) -> &WebRpcInterface {
    app.world().resource::<WebRpcInterface>()
}

fn rpc(app: &mut App, json: &str) {
    app.world_mut().send_event(IncomingRpcMessage {
        content: json.to_string(),
    });
}

#[test]
fn square_measured_frame_by_frame() {
    let mut app = headless_app();

    for (x, z) in [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)] {
        app.world_mut().send_event(hits_at(x, 0.0, z));
        app.world_mut().send_event(command(MeasureCommand::PlacePoint));
        app.update();
    }

    let engine = measurement(&app);
    assert_eq!(engine.point_count(), 4);
    assert_relative_eq!(engine.area().unwrap(), 4.0);
    assert_eq!(engine.outline().map(<[_]>::len), Some(5));
}

#[test]
fn place_without_surface_changes_nothing() {
    let mut app = headless_app();
    app.world_mut().send_event(command(MeasureCommand::PlacePoint));
    app.update();

    assert_eq!(measurement(&app).state(), MeasurementState::Empty);
    let changes = app.world().resource::<Events<MeasurementChanged>>();
    assert_eq!(changes.iter_current_update_events().count(), 0);
}

#[test]
fn empty_frame_disables_placement() {
    let mut app = headless_app();
    app.world_mut().send_event(hits_at(1.0, 0.0, 1.0));
    app.update();
    app.world_mut().send_event(FrameHitResults::default());
    app.world_mut().send_event(command(MeasureCommand::PlacePoint));
    app.update();

    assert_eq!(measurement(&app).point_count(), 0);
}

#[test]
fn target_persists_across_frames_without_delivery() {
    let mut app = headless_app();
    app.world_mut().send_event(hits_at(1.0, 0.0, 1.0));
    app.update();
    app.update();
    app.world_mut().send_event(command(MeasureCommand::PlacePoint));
    app.update();

    assert_eq!(measurement(&app).points()[0].to_array(), [1.0, 0.0, 1.0]);
}

#[test]
fn session_end_applies_before_commands() {
    let mut app = headless_app();
    app.world_mut().send_event(hits_at(1.0, 0.0, 1.0));
    app.update();

    app.world_mut().send_event(SessionEndedEvent);
    app.world_mut().send_event(command(MeasureCommand::PlacePoint));
    app.update();

    assert!(app.world().resource::<HitTargetTracker>().current_target().is_none());
    assert_eq!(measurement(&app).point_count(), 0);
}

#[test]
fn later_targets_do_not_move_placed_points() {
    let mut app = headless_app();
    app.world_mut().send_event(hits_at(1.0, 0.0, 1.0));
    app.world_mut().send_event(command(MeasureCommand::PlacePoint));
    app.update();
    app.world_mut().send_event(hits_at(5.0, 0.0, 5.0));
    app.update();

    assert_eq!(measurement(&app).points()[0].to_array(), [1.0, 0.0, 1.0]);
}

#[test]
fn triangle_then_reset_over_rpc() {
    let mut app = headless_app();

    for position in ["[0.0, 0.0, 0.0]", "[4.0, 0.0, 0.0]", "[0.0, 0.0, 3.0]"] {
        rpc(
            &mut app,
            &format!(
                r#"{{"jsonrpc":"2.0","method":"frame_hit_results","params":{{"hits":[{{"position":{position}}}]}}}}"#
            ),
        );
        rpc(&mut app, r#"{"jsonrpc":"2.0","method":"place_point","id":7}"#);
        app.update();
    }

    assert_relative_eq!(measurement(&app).area().unwrap(), 6.0);

    let changes = app.world().resource::<Events<MeasurementChanged>>();
    let last = changes.iter_current_update_events().last().unwrap();
    assert_eq!(last.0.point_count, 3);

    rpc(&mut app, r#"{"jsonrpc":"2.0","method":"reset"}"#);
    app.update();

    let engine = measurement(&app);
    assert_eq!(engine.point_count(), 0);
    assert!(engine.area().is_none());
    assert!(engine.outline().is_none());
}

#[test]
fn malformed_rpc_is_dropped() {
    let mut app = headless_app();
    rpc(&mut app, "{ not json");
    rpc(
        &mut app,
        r#"{"jsonrpc":"2.0","method":"frame_hit_results","params":{"hits":[{"position":[1.0]}]},"id":1}"#,
    );
    rpc(&mut app, r#"{"jsonrpc":"2.0","method":"place_point","id":2}"#);
    app.update();

    assert_eq!(measurement(&app).point_count(), 0);
}

#[test]
fn rejected_hit_frame_counts_as_no_surface() {
    let mut app = headless_app();
    rpc(
        &mut app,
        r#"{"jsonrpc":"2.0","method":"frame_hit_results","params":{"hits":[{"position":[1.0,0.0,1.0]}]}}"#,
    );
    app.update();
    assert!(app.world().resource::<HitTargetTracker>().has_target());

    rpc(
        &mut app,
        r#"{"jsonrpc":"2.0","method":"frame_hit_results","params":{"hits":[{"position":[1.0]}]}}"#,
    );
    rpc(&mut app, r#"{"jsonrpc":"2.0","method":"place_point","id":2}"#);
    app.update();

    assert!(app.world().resource::<HitTargetTracker>().current_target().is_none());
    assert_eq!(measurement(&app).point_count(), 0);
}

#[test]
fn host_receives_updates_and_answers() {
    let mut app = headless_app();
    rpc(
        &mut app,
        r#"{"jsonrpc":"2.0","method":"frame_hit_results","params":{"hits":[{"position":[1.0,0.0,2.0]}]}}"#,
    );
    update_before_flush(&mut app);

    // Notifications are applied but never answered.
    assert!(outgoing(&app).pending_responses().is_empty());
    assert!(outgoing(&app).pending_notifications().is_empty());
    app.update();

    rpc(&mut app, r#"{"jsonrpc":"2.0","method":"place_point","id":1}"#);
    rpc(&mut app, r#"{"jsonrpc":"2.0","method":"get_measurement","id":2}"#);
    update_before_flush(&mut app);

    let notifications = outgoing(&app).pending_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].method, "measurement_updated");
    assert_eq!(notifications[0].params["point_count"], 1);
    assert_eq!(notifications[0].params["state"], "open");
    assert_eq!(notifications[0].params["markers"][0][2], 2.0);

    let responses = outgoing(&app).pending_responses();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].id, Some(serde_json::json!(1)));
    assert_eq!(responses[0].result.as_ref().unwrap()["success"], true);
    assert!(responses[0].error.is_none());

    // The query is answered before the same frame's placement applies.
    assert_eq!(responses[1].id, Some(serde_json::json!(2)));
    let snapshot = responses[1].result.as_ref().unwrap();
    assert_eq!(snapshot["point_count"], 0);
    assert_eq!(snapshot["state"], "empty");
    assert!(snapshot["area"].is_null());

    app.update();
    assert!(outgoing(&app).pending_notifications().is_empty());
    assert!(outgoing(&app).pending_responses().is_empty());

    rpc(&mut app, r#"{"jsonrpc":"2.0","method":"session_ended"}"#);
    update_before_flush(&mut app);

    let notifications = outgoing(&app).pending_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].method, "session_state_changed");
    assert_eq!(notifications[0].params["active"], false);
    assert_eq!(notifications[0].params["has_target"], false);
    assert!(outgoing(&app).pending_responses().is_empty());
}
