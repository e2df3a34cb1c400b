#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod segment;
mod stops;
pub mod telemetry;
mod trajectory;

use std::collections::BTreeSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use self::segment::{InsufficientDataError, Segment};
pub use self::stops::{collect_stops, is_stopped, ConfigError, StopConfig, StopRecord};
pub use self::trajectory::Trajectory;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackId(pub String);

/// All of the tracked entities being watched, keyed by unique `TrackId`. Iteration order is the
/// order trajectories were originally supplied in.
#[derive(Clone, Serialize, Deserialize)]
pub struct TrajectoryCollection {
    trajectories: Vec<Trajectory>,
}

impl TrajectoryCollection {
    pub fn new(trajectories: Vec<Trajectory>) -> Result<Self> {
        let mut seen: BTreeSet<&TrackId> = BTreeSet::new();
        for trajectory in &trajectories {
            if !seen.insert(trajectory.id()) {
                bail!("Duplicate trajectory for {:?}", trajectory.id());
            }
        }
        Ok(Self { trajectories })
    }

    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    pub fn get(&self, id: &TrackId) -> Option<&Trajectory> {
        self.trajectories.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }
}
