use crate::measurement::{HitTargetTracker, HitTestResult, MeasurementSnapshot, PolygonMeasurement};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Commands the user can issue against the measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureCommand {
    PlacePoint,
    Reset,
}

impl MeasureCommand {
    /// Convert string identifier to command for RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "place_point" | "place-point" => Some(Self::PlacePoint),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlacePoint => "place_point",
            Self::Reset => "reset",
        }
    }
}

/// Where a command came from, kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Rpc,
    Keyboard,
    Pointer,
}

/// Fire-and-forget user command.
#[derive(Event, Debug, Clone, Copy)]
pub struct MeasureCommandEvent {
    pub command: MeasureCommand,
    pub source: CommandSource,
}

/// Ranked hit-test candidates for the current frame, best first.
#[derive(Event, Debug, Clone, Default)]
pub struct FrameHitResults {
    pub hits: Vec<HitTestResult>,
}

/// The AR platform ended the session.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SessionEndedEvent;

/// Emitted once per applied mutation with the recomputed state.
#[derive(Event, Debug, Clone)]
pub struct MeasurementChanged(pub MeasurementSnapshot);

/// Frame ordering for the measurement pipeline.
///
/// Commands are fully applied before anything in `Present` reads the engine,
/// so overlay geometry and numeric readouts always describe the same state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MeasureSet {
    /// Platform adapters producing hit results, session and command events.
    Platform,
    /// Tracker refresh from this frame's hit results.
    Ingest,
    /// Session lifecycle and user commands applied to the engine.
    Commands,
    /// Readers of the fresh snapshot.
    Present,
}

pub struct MeasurementPlugin;

impl Plugin for MeasurementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HitTargetTracker>()
            .init_resource::<PolygonMeasurement>()
            .add_event::<FrameHitResults>()
            .add_event::<SessionEndedEvent>()
            .add_event::<MeasureCommandEvent>()
            .add_event::<MeasurementChanged>()
            .configure_sets(
                Update,
                (
                    MeasureSet::Platform,
                    MeasureSet::Ingest,
                    MeasureSet::Commands,
                    MeasureSet::Present,
                )
                    .chain(),
            )
            .add_systems(Startup, log_measurement_changes)
            .add_systems(Update, ingest_hit_results.in_set(MeasureSet::Ingest))
            .add_systems(
                Update,
                (handle_session_events, handle_measure_commands)
                    .chain()
                    .in_set(MeasureSet::Commands),
            );
    }
}

fn log_measurement_changes(mut measurement: ResMut<PolygonMeasurement>) {
    measurement.subscribe(Box::new(|snapshot| match snapshot.area {
        Some(area) => debug!(
            "Measurement recomputed: {} points, area {:.6}",
            snapshot.point_count, area
        ),
        None => debug!(
            "Measurement recomputed: {} points, no area",
            snapshot.point_count
        ),
    }));
}

/// Refresh the tracker from the latest hit results delivered this frame.
/// Frames without a delivery keep the previous target.
pub fn ingest_hit_results(
    mut events: EventReader<FrameHitResults>,
    mut tracker: ResMut<HitTargetTracker>,
) {
    if let Some(frame) = events.read().last() {
        tracker.update_from_frame(&frame.hits);
    }
}

pub fn handle_session_events(
    mut events: EventReader<SessionEndedEvent>,
    mut tracker: ResMut<HitTargetTracker>,
) {
    if events.read().count() > 0 {
        tracker.end_session();
        info!("AR session ended; target cleared");
    }
}

/// Apply queued commands in arrival order against the current target.
pub fn handle_measure_commands(
    mut events: EventReader<MeasureCommandEvent>,
    tracker: Res<HitTargetTracker>,
    mut measurement: ResMut<PolygonMeasurement>,
    mut changed: EventWriter<MeasurementChanged>,
) {
    for event in events.read() {
        match event.command {
            MeasureCommand::PlacePoint => {
                if !measurement.place_point(tracker.current_target()) {
                    debug!("Place point via {:?} ignored: no surface target", event.source);
                    continue;
                }

                if let Some(point) = measurement.points().last() {
                    info!(
                        "Added point {} at ({:.3}, {:.3}, {:.3}) via {:?}",
                        measurement.point_count(),
                        point.x(),
                        point.y(),
                        point.z(),
                        event.source
                    );
                }
            }
            MeasureCommand::Reset => {
                measurement.reset();
                info!("Measurement reset via {:?}", event.source);
            }
        }

        changed.write(MeasurementChanged(measurement.snapshot()));
    }
}

/// Keyboard and pointer shortcuts (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_measure_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut commands: EventWriter<MeasureCommandEvent>,
    mut session: EventWriter<SessionEndedEvent>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        commands.write(MeasureCommandEvent {
            command: MeasureCommand::PlacePoint,
            source: CommandSource::Keyboard,
        });
    }

    if mouse.just_pressed(MouseButton::Left) {
        commands.write(MeasureCommandEvent {
            command: MeasureCommand::PlacePoint,
            source: CommandSource::Pointer,
        });
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        commands.write(MeasureCommandEvent {
            command: MeasureCommand::Reset,
            source: CommandSource::Keyboard,
        });
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        session.write(SessionEndedEvent);
    }
}

/// Placeholder system for WASM builds where the host page drives input over RPC.
#[cfg(target_arch = "wasm32")]
pub fn handle_measure_keyboard_shortcuts() {}
