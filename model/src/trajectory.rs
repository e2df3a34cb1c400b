use anyhow::Result;
use chrono::NaiveDateTime;
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::TrackId;

/// The time-ordered position history of one tracked entity. Positions are in whatever coordinate
/// reference the input data used; nothing here converts units.
#[derive(Clone, Serialize, Deserialize)]
pub struct Trajectory {
    id: TrackId,
    inner: Vec<(Point<f64>, NaiveDateTime)>,
}

impl Trajectory {
    pub fn new(id: TrackId, raw: Vec<(Point<f64>, NaiveDateTime)>) -> Result<Self> {
        if raw.is_empty() {
            bail!("Trajectory {:?} has no points", id);
        }
        for pair in raw.windows(2) {
            if pair[0].1 >= pair[1].1 {
                bail!(
                    "Trajectory {:?} input out-of-order: {} then {}",
                    id,
                    pair[0].1,
                    pair[1].1
                );
            }
        }
        Ok(Self { id, inner: raw })
    }

    pub fn id(&self) -> &TrackId {
        &self.id
    }

    pub fn points(&self) -> &[(Point<f64>, NaiveDateTime)] {
        &self.inner
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.inner[0].1
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.inner.last().unwrap().1
    }

    /// The most recently recorded fix.
    pub fn last_position(&self) -> Point<f64> {
        self.inner.last().unwrap().0
    }
}
