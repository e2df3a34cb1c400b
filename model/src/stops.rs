use chrono::Duration;
use geo::Point;
use serde::Serialize;
use thiserror::Error;

use crate::{TrackId, Trajectory, TrajectoryCollection};

/// How far back from a trajectory's last fix to look, and how much total movement inside that
/// window still counts as standing still. The tolerance is in the same units as the positions.
#[derive(Clone, Copy, Debug)]
pub struct StopConfig {
    stop_duration: Duration,
    distance_tolerance: f64,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("stop_duration must be a positive number of hours, got {0}")]
    StopDuration(f64),
    #[error("distance_tolerance must be non-negative, got {0}")]
    DistanceTolerance(f64),
}

impl StopConfig {
    pub fn new(stop_duration_hours: f64, distance_tolerance: f64) -> Result<Self, ConfigError> {
        if !stop_duration_hours.is_finite() || stop_duration_hours <= 0.0 {
            return Err(ConfigError::StopDuration(stop_duration_hours));
        }
        if !distance_tolerance.is_finite() || distance_tolerance < 0.0 {
            return Err(ConfigError::DistanceTolerance(distance_tolerance));
        }
        Ok(Self {
            stop_duration: Duration::milliseconds((stop_duration_hours * 3_600_000.0) as i64),
            distance_tolerance,
        })
    }

    pub fn stop_duration(&self) -> Duration {
        self.stop_duration
    }

    pub fn distance_tolerance(&self) -> f64 {
        self.distance_tolerance
    }
}

/// A track that's currently stationary, and where it is. The location is always the trajectory's
/// final recorded fix.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StopRecord {
    pub track_id: TrackId,
    pub location: Point<f64>,
}

/// Has this entity moved less than the tolerance over the trailing window? The window is measured
/// back from the trajectory's own last fix, not from the current wall-clock time. A track without
/// at least 2 fixes inside the window can't be classified and counts as not stopped.
pub fn is_stopped(trajectory: &Trajectory, config: &StopConfig) -> bool {
    // A window reaching back past the representable range just covers the whole trajectory
    let earliest_time = trajectory
        .end_time()
        .checked_sub_signed(config.stop_duration())
        .unwrap_or_else(|| trajectory.start_time());
    match trajectory.segment_between(earliest_time, trajectory.end_time()) {
        Ok(segment) => segment.length() <= config.distance_tolerance(),
        Err(err) => {
            warn!("Not classifying {:?}: {}", trajectory.id(), err);
            false
        }
    }
}

/// Finds every track that's currently stationary, in the collection's own order.
pub fn collect_stops(collection: &TrajectoryCollection, config: &StopConfig) -> Vec<StopRecord> {
    collection
        .trajectories()
        .iter()
        .filter(|trajectory| is_stopped(trajectory, config))
        .map(|trajectory| StopRecord {
            track_id: trajectory.id().clone(),
            location: trajectory.last_position(),
        })
        .collect()
}
