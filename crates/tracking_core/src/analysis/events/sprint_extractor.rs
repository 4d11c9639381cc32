//! # Sprint Extractor
//!
//! Detects discrete high-intensity efforts in a cleaned speed series.
//!
//! ## Algorithm
//! 1. Scan the speed series frame by frame
//! 2. A sprint starts when speed >= entry threshold (25.2 km/h)
//! 3. It continues while speed >= exit threshold (19.8 km/h)
//! 4. Segments shorter than the minimum duration (0.5 s) are dropped
//!
//! A player sprinting continuously for 3 s yields one event here, where the
//! player card's block count reports 3.

use crate::config::SprintSegmentConfig;
use crate::models::DerivedSeries;
use serde::{Deserialize, Serialize};

/// A detected sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprintEvent {
    /// First frame of the segment
    pub start_frame: usize,
    /// Last frame of the segment (inclusive)
    pub end_frame: usize,
    /// Segment length in seconds
    pub duration_s: f64,
    /// Distance covered during the sprint in meters
    pub distance_m: f64,
    /// Peak speed in km/h
    pub max_speed_kmh: f64,
    /// Mean speed in km/h
    pub avg_speed_kmh: f64,
}

impl SprintEvent {
    pub fn frames(&self) -> usize {
        self.end_frame - self.start_frame + 1
    }
}

/// Movement intensity split for one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementIntensity {
    /// Total distance covered in meters
    pub total_distance_m: f64,
    /// Distance at or above the sprint entry speed
    pub sprint_distance_m: f64,
    /// Distance at or above the exit (high intensity) speed
    pub high_intensity_distance_m: f64,
    /// Number of sprint segments
    pub sprint_count: u32,
    /// Sprint distance as ratio of total distance
    pub sprint_ratio: f64,
    /// High intensity distance as ratio of total distance
    pub high_intensity_ratio: f64,
}

/// Internal accumulator for one open segment.
struct SprintBuilder {
    start: usize,
    end: usize,
    distance: f64,
    max_speed: f64,
    speed_sum: f64,
}

impl SprintBuilder {
    fn new(frame: usize, distance: f64, speed: f64) -> Self {
        Self {
            start: frame,
            end: frame,
            distance,
            max_speed: speed,
            speed_sum: speed,
        }
    }

    fn add(&mut self, frame: usize, distance: f64, speed: f64) {
        self.end = frame;
        self.distance += distance;
        self.max_speed = self.max_speed.max(speed);
        self.speed_sum += speed;
    }

    fn build(self, dt: f64, min_duration_s: f64) -> Option<SprintEvent> {
        let frames = self.end - self.start + 1;
        let duration_s = frames as f64 * dt;
        if duration_s + 1e-9 < min_duration_s {
            return None;
        }
        Some(SprintEvent {
            start_frame: self.start,
            end_frame: self.end,
            duration_s,
            distance_m: self.distance,
            max_speed_kmh: self.max_speed,
            avg_speed_kmh: self.speed_sum / frames as f64,
        })
    }
}

/// Extract sprint segments from a derived series sampled every `dt` seconds.
pub fn extract_sprints(
    series: &DerivedSeries,
    dt: f64,
    cfg: &SprintSegmentConfig,
) -> Vec<SprintEvent> {
    let mut sprints = Vec::new();
    let mut current: Option<SprintBuilder> = None;

    for (frame, (&distance, &speed)) in series.distance.iter().zip(&series.speed).enumerate() {
        current = match current.take() {
            Some(mut builder) if speed >= cfg.exit_kmh => {
                builder.add(frame, distance, speed);
                Some(builder)
            }
            Some(builder) => {
                sprints.extend(builder.build(dt, cfg.min_duration_s));
                None
            }
            None if speed >= cfg.entry_kmh => Some(SprintBuilder::new(frame, distance, speed)),
            None => None,
        };
    }
    if let Some(builder) = current {
        sprints.extend(builder.build(dt, cfg.min_duration_s));
    }

    sprints
}

/// Distance split by intensity plus the segment sprint count.
pub fn movement_intensity(
    series: &DerivedSeries,
    dt: f64,
    cfg: &SprintSegmentConfig,
) -> MovementIntensity {
    let mut metrics = MovementIntensity::default();
    for (&d, &s) in series.distance.iter().zip(&series.speed) {
        metrics.total_distance_m += d;
        if s >= cfg.entry_kmh {
            metrics.sprint_distance_m += d;
        }
        if s >= cfg.exit_kmh {
            metrics.high_intensity_distance_m += d;
        }
    }
    metrics.sprint_count = extract_sprints(series, dt, cfg).len() as u32;
    if metrics.total_distance_m > 0.0 {
        metrics.sprint_ratio = metrics.sprint_distance_m / metrics.total_distance_m;
        metrics.high_intensity_ratio =
            metrics.high_intensity_distance_m / metrics.total_distance_m;
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.04;

    fn series(speed: Vec<f64>) -> DerivedSeries {
        let distance = speed.iter().map(|s| s / 3.6 * DT).collect();
        DerivedSeries::new(distance, speed).unwrap()
    }

    #[test]
    fn test_threshold_constants() {
        let cfg = SprintSegmentConfig::default();
        assert!(cfg.entry_kmh > cfg.exit_kmh);
        assert!(cfg.exit_kmh > 0.0);
    }

    #[test]
    fn test_sustained_sprint_is_one_event() {
        // 3 s at 28 km/h
        let mut speed = vec![10.0; 20];
        speed.extend(vec![28.0; 75]);
        speed.extend(vec![10.0; 20]);
        let sprints = extract_sprints(&series(speed), DT, &SprintSegmentConfig::default());

        assert_eq!(sprints.len(), 1);
        let sprint = &sprints[0];
        assert_eq!(sprint.start_frame, 20);
        assert_eq!(sprint.end_frame, 94);
        assert_eq!(sprint.frames(), 75);
        assert!((sprint.duration_s - 3.0).abs() < 1e-9);
        assert!((sprint.max_speed_kmh - 28.0).abs() < 1e-9);
        assert!((sprint.distance_m - 75.0 * 28.0 / 3.6 * DT).abs() < 1e-9);
    }

    #[test]
    fn test_short_burst_is_rejected() {
        // 10 frames = 0.4 s
        let mut speed = vec![10.0; 20];
        speed.extend(vec![27.0; 10]);
        speed.extend(vec![10.0; 20]);
        assert!(extract_sprints(&series(speed), DT, &SprintSegmentConfig::default()).is_empty());
    }

    #[test]
    fn test_hysteresis_keeps_segment_open() {
        // dips to 22 km/h stay inside the sprint; 15 km/h ends it
        let mut speed = vec![26.0; 10];
        speed.extend(vec![22.0; 10]);
        speed.extend(vec![26.0; 10]);
        speed.extend(vec![15.0; 5]);
        speed.extend(vec![26.0; 15]);
        let sprints = extract_sprints(&series(speed), DT, &SprintSegmentConfig::default());

        assert_eq!(sprints.len(), 2);
        assert_eq!(sprints[0].frames(), 30);
        assert!((sprints[0].avg_speed_kmh - (26.0 * 20.0 + 22.0 * 10.0) / 30.0).abs() < 1e-9);
        // open segment at the end of the sequence is closed
        assert_eq!(sprints[1].end_frame, 49);
    }

    #[test]
    fn test_never_reaching_entry_speed() {
        let sprints = extract_sprints(&series(vec![22.0; 100]), DT, &SprintSegmentConfig::default());
        assert!(sprints.is_empty());
    }

    #[test]
    fn test_movement_intensity() {
        let mut speed = vec![10.0; 50];
        speed.extend(vec![22.0; 25]);
        speed.extend(vec![27.0; 25]);
        let metrics = movement_intensity(&series(speed), DT, &SprintSegmentConfig::default());

        assert_eq!(metrics.sprint_count, 1);
        assert!(metrics.sprint_distance_m > 0.0);
        assert!(metrics.high_intensity_distance_m > metrics.sprint_distance_m);
        assert!(metrics.sprint_ratio < metrics.high_intensity_ratio);
        assert!(metrics.high_intensity_ratio <= 1.0);

        let still = movement_intensity(&series(vec![0.0; 10]), DT, &SprintSegmentConfig::default());
        assert_eq!(still, MovementIntensity::default());
    }
}
