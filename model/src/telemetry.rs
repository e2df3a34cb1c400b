use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDateTime;
use geo::Point;
use serde::Deserialize;

use crate::{TrackId, Trajectory, TrajectoryCollection};

/// Parses Movebank-style CSV of telemetry fixes. Coordinates are kept exactly as they appear in
/// the input; downstream tolerances have to use the same units.
pub fn load<R: std::io::Read>(reader: R) -> Result<TrajectoryCollection> {
    // Read raw data
    let mut data_per_track: BTreeMap<TrackId, Vec<(Point<f64>, NaiveDateTime)>> = BTreeMap::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Fix = rec?;

        let time = NaiveDateTime::parse_from_str(&rec.timestamp, "%Y-%m-%d %H:%M:%S%.f")?;
        let pos = Point::new(rec.longitude, rec.latitude);

        data_per_track
            .entry(rec.track)
            .or_insert_with(Vec::new)
            .push((pos, time));
    }

    // Calculate trajectories. Receivers sometimes upload fixes out of order or repeat a
    // timestamp, so tidy each track up first.
    let mut trajectories = Vec::new();
    for (track, mut raw_pts) in data_per_track {
        raw_pts.sort_by_key(|(_, t)| *t);
        raw_pts.dedup_by_key(|(_, t)| *t);
        trajectories.push(Trajectory::new(track, raw_pts)?);
    }
    TrajectoryCollection::new(trajectories)
}

#[derive(Deserialize)]
struct Fix {
    #[serde(rename = "individual-local-identifier")]
    track: TrackId,
    #[serde(rename = "timestamp")]
    timestamp: String,
    #[serde(rename = "location-lat")]
    latitude: f64,
    #[serde(rename = "location-long")]
    longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "individual-local-identifier,timestamp,location-lat,location-long\n";

    #[test]
    fn groups_fixes_per_track() {
        let input = format!(
            "{HEADER}\
             buffalo-1,2023-01-01 01:00:00,10.0,20.0\n\
             buffalo-2,2023-01-01 01:00:00,30.0,40.0\n\
             buffalo-1,2023-01-01 02:00:00,10.5,20.5\n"
        );
        let collection = load(input.as_bytes()).unwrap();
        assert_eq!(collection.len(), 2);

        let first = collection.get(&TrackId("buffalo-1".to_string())).unwrap();
        assert_eq!(first.points().len(), 2);
        // Longitude is x, latitude is y
        assert_eq!(first.last_position(), Point::new(20.5, 10.5));

        let second = collection.get(&TrackId("buffalo-2".to_string())).unwrap();
        assert_eq!(second.points().len(), 1);
    }

    #[test]
    fn sorts_and_dedupes_fixes() {
        let input = format!(
            "{HEADER}\
             rhino-7,2023-01-01 03:00:00,1.0,3.0\n\
             rhino-7,2023-01-01 01:00:00,1.0,1.0\n\
             rhino-7,2023-01-01 01:00:00,9.0,9.0\n\
             rhino-7,2023-01-01 02:00:00,1.0,2.0\n"
        );
        let collection = load(input.as_bytes()).unwrap();
        let trajectory = collection.get(&TrackId("rhino-7".to_string())).unwrap();
        let xs: Vec<f64> = trajectory.points().iter().map(|(pos, _)| pos.x()).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn accepts_fractional_seconds() {
        let input = format!("{HEADER}elk-3,2023-01-01 01:00:00.500,5.0,6.0\n");
        let collection = load(input.as_bytes()).unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn rejects_malformed_rows() {
        let input = format!("{HEADER}elk-3,yesterday,5.0,6.0\n");
        assert!(load(input.as_bytes()).is_err());

        let input = format!("{HEADER}elk-3,2023-01-01 01:00:00,north,6.0\n");
        assert!(load(input.as_bytes()).is_err());
    }
}
