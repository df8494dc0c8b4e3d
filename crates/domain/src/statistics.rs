use std::fmt;

use chrono::{DateTime, Datelike, Days, NaiveTime, TimeZone};

use crate::WorkoutLog;

/// Upper bound of the displayed streak.
pub const STREAK_CAP: usize = 7;

/// Divisor of the displayed weekly average.
pub const AVERAGE_WEEKS: usize = 4;

/// Number of workouts shown as recent on the dashboard.
pub const RECENT_WORKOUTS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_workouts: usize,
    pub this_week_workouts: usize,
    pub streak: usize,
    pub weekly_average: String,
}

impl DashboardStats {
    #[must_use]
    pub fn new<Tz: TimeZone>(workout_logs: &[WorkoutLog], now: &DateTime<Tz>) -> Self {
        let total_workouts = workout_logs.len();
        let this_week_workouts = this_week_workouts(workout_logs, now);
        Self {
            total_workouts,
            this_week_workouts,
            streak: streak(this_week_workouts),
            weekly_average: weekly_average(total_workouts),
        }
    }
}

/// Sunday 00:00:00 of the week containing `now`, in the time zone of `now`.
///
/// If midnight does not exist on that day due to a time zone transition, the
/// first existing instant of the day is used.
#[must_use]
pub fn start_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let date = now.date_naive() - Days::new(u64::from(now.weekday().num_days_from_sunday()));
    let timezone = now.timezone();
    (0..24)
        .filter_map(|hour| {
            let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
            timezone
                .from_local_datetime(&date.and_time(time))
                .earliest()
        })
        .next()
        .unwrap_or_else(|| now.clone())
}

/// Number of workouts since the start of the current week.
#[must_use]
pub fn this_week_workouts<Tz: TimeZone>(workout_logs: &[WorkoutLog], now: &DateTime<Tz>) -> usize {
    let start = start_of_week(now);
    workout_logs.iter().filter(|w| w.date >= start).count()
}

/// Displayed streak, which is the number of workouts this week capped at a
/// week's number of days rather than a count of consecutive days.
#[must_use]
pub fn streak(this_week_workouts: usize) -> usize {
    this_week_workouts.min(STREAK_CAP)
}

/// Displayed number of workouts per week, with one decimal rounded half up.
#[must_use]
pub fn weekly_average(total_workouts: usize) -> String {
    if total_workouts == 0 {
        return String::from("0");
    }
    let tenths = (total_workouts * 10 + AVERAGE_WEEKS / 2) / AVERAGE_WEEKS;
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Most recent workouts of a history that is ordered newest first.
#[must_use]
pub fn recent_workouts(workout_logs: &[WorkoutLog], limit: usize) -> &[WorkoutLog] {
    &workout_logs[..limit.min(workout_logs.len())]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    #[must_use]
    pub fn at(hour: u32) -> Self {
        match hour {
            0..12 => Greeting::Morning,
            12..18 => Greeting::Afternoon,
            _ => Greeting::Evening,
        }
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Greeting::Morning => "Good morning",
                Greeting::Afternoon => "Good afternoon",
                Greeting::Evening => "Good evening",
            }
        )
    }
}
