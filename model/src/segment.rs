use chrono::NaiveDateTime;
use geo::{Distance, Euclidean, Point};
use thiserror::Error;

use crate::{TrackId, Trajectory};

/// A contiguous slice of a trajectory's points whose timestamps fall in a closed time interval.
#[derive(Debug)]
pub struct Segment<'a> {
    points: &'a [(Point<f64>, NaiveDateTime)],
}

/// A time window covered too few fixes to measure movement. Recoverable; callers decide what a
/// track with not enough recent data means.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("trajectory {track:?} only has {found} points between {start} and {end}; need at least 2")]
pub struct InsufficientDataError {
    pub track: TrackId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub found: usize,
}

impl Trajectory {
    /// Restricts the trajectory to points with `start <= timestamp <= end`. The bounds don't have
    /// to line up with recorded fixes.
    pub fn segment_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Segment<'_>, InsufficientDataError> {
        debug_assert!(start <= end);

        // Timestamps are strictly increasing, so binary search for the window
        let points = self.points();
        let lo = points.partition_point(|(_, t)| *t < start);
        let hi = points.partition_point(|(_, t)| *t <= end);

        if hi - lo < 2 {
            return Err(InsufficientDataError {
                track: self.id().clone(),
                start,
                end,
                found: hi - lo,
            });
        }
        Ok(Segment {
            points: &points[lo..hi],
        })
    }
}

impl Segment<'_> {
    pub fn points(&self) -> &[(Point<f64>, NaiveDateTime)] {
        self.points
    }

    /// Total path length between consecutive points, in the same units as the positions.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| Euclidean.distance(pair[0].0, pair[1].0))
            .sum()
    }
}
