use checkin_tracker_lib::{
    check_in::CheckIn,
    distance::{great_circle_distance, DistanceUnit},
};
use chrono::NaiveDate;

/// Legs at or below this are GPS noise and excluded from daily accounting.
pub const DAILY_DISTANCE_FLOOR_MILES: f64 = 0.01;

/// Noise floor for the all-time cumulative distance.
pub const TRIP_DISTANCE_FLOOR_MILES: f64 = 0.05;

#[derive(Debug, Default)]
struct Totals {
    trip_distance: f64,
    daily_distance: f64,
    daily_moving_time: f64,
}

impl Totals {
    fn accumulate_trip(&mut self, distance: f64) {
        if distance > TRIP_DISTANCE_FLOOR_MILES {
            self.trip_distance += distance;
        }
    }

    fn accumulate_daily(&mut self, distance: f64, elapsed_seconds: f64) {
        if distance > DAILY_DISTANCE_FLOOR_MILES {
            self.daily_distance += distance;
            self.daily_moving_time += elapsed_seconds;
        }
    }

    fn close_day(&mut self, date: NaiveDate) -> DailySummary {
        let summary = DailySummary {
            date,
            distance: self.daily_distance,
            moving_time_seconds: self.daily_moving_time,
        };

        self.daily_distance = 0.0;
        self.daily_moving_time = 0.0;

        summary
    }
}

/// Aggregated distance and moving time for one calendar day, in statute miles.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub distance: f64,
    pub moving_time_seconds: f64,
}

impl DailySummary {
    /// Average speed over the day's moving time, in mph.
    /// A day without qualifying movement reports 0.
    pub fn average_speed(&self) -> f64 {
        if self.moving_time_seconds > 0.0 {
            self.distance / (self.moving_time_seconds / 3600.0)
        } else {
            0.0
        }
    }
}

/// What one check-in contributed to the report.
pub struct StepResult {
    /// Summary of the previous day, present when this check-in crossed a day boundary.
    pub closed_day: Option<DailySummary>,
    /// Distance from the previous check-in, 0 for the first record.
    pub leg_distance: f64,
    /// Cumulative trip distance after this check-in.
    pub trip_distance: f64,
}

/// Consumes an ordered check-in stream and maintains the running totals.
/// Starts empty and tracks from the first record onwards.
#[derive(Default)]
pub struct TripAccumulator {
    previous: Option<CheckIn>,
    totals: Totals,
}

impl TripAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next check-in, in log order.
    pub fn record(&mut self, check_in: CheckIn) -> StepResult {
        let mut closed_day = None;
        let mut leg_distance = 0.0;

        if let Some(previous) = self.previous {
            leg_distance = great_circle_distance(
                previous.position,
                check_in.position,
                DistanceUnit::StatuteMiles,
            );
            let elapsed_seconds =
                (check_in.timestamp - previous.timestamp).num_milliseconds() as f64 / 1000.0;

            if previous.timestamp.date() != check_in.timestamp.date() {
                closed_day = Some(self.totals.close_day(previous.timestamp.date()));
            }

            // A leg that crosses a day boundary counts towards the new day
            self.totals.accumulate_daily(leg_distance, elapsed_seconds);
            self.totals.accumulate_trip(leg_distance);
        }

        self.previous = Some(check_in);

        StepResult {
            closed_day,
            leg_distance,
            trip_distance: self.totals.trip_distance,
        }
    }

    /// Closes the still-open day at end of input.
    /// Returns None if no check-in was ever recorded.
    pub fn finish(mut self) -> Option<DailySummary> {
        self.previous
            .map(|last| self.totals.close_day(last.timestamp.date()))
    }
}
