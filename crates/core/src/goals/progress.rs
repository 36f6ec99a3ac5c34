//! Progress calculator and status transition policy.
//!
//! Pure functions over goal values and dates. Malformed inputs degrade to a
//! safe default (0% progress) instead of erroring; the store never persists
//! a progress value outside `[0, 100]`.

use chrono::NaiveDate;

use super::goals_model::{GoalDirection, GoalStatus};

/// Computes the progress percentage for a numeric goal.
///
/// Returns 0 when any of the three values is absent or non-finite (custom
/// goals without numeric targets never auto-compute progress). When the
/// start already meets the target (`start == target`) the goal counts as
/// fully achieved. The result is clamped to `[0, 100]`.
pub fn progress_percentage(
    direction: GoalDirection,
    start_value: Option<f64>,
    target_value: Option<f64>,
    current_value: Option<f64>,
) -> f64 {
    let (start, target, current) = match (start_value, target_value, current_value) {
        (Some(s), Some(t), Some(c)) if s.is_finite() && t.is_finite() && c.is_finite() => {
            (s, t, c)
        }
        _ => return 0.0,
    };

    let (initial_diff, current_diff) = match direction {
        GoalDirection::Decrease => (start - target, start - current),
        GoalDirection::Increase | GoalDirection::Maintain => (target - start, current - start),
    };

    if initial_diff > 0.0 {
        (current_diff / initial_diff * 100.0).clamp(0.0, 100.0)
    } else if initial_diff == 0.0 {
        // Start already meets the target.
        100.0
    } else {
        0.0
    }
}

/// Days until the target date, never negative.
pub fn days_remaining(target_date: NaiveDate, today: NaiveDate) -> i64 {
    (target_date - today).num_days().max(0)
}

/// Derives the status of an existing goal after a recomputation point.
///
/// `Completed` is terminal: a goal never un-completes when its current value
/// regresses. `Expired` is not: extending the target date on a recompute
/// brings the goal back to `InProgress`. `NotStarted` survives until a
/// progress-bearing update promotes the goal (see
/// [`GoalService`](super::GoalService)).
pub fn derive_status(
    previous: GoalStatus,
    progress: f64,
    target_date: NaiveDate,
    today: NaiveDate,
) -> GoalStatus {
    if previous == GoalStatus::Completed || progress >= 100.0 {
        return GoalStatus::Completed;
    }
    if target_date < today {
        return GoalStatus::Expired;
    }
    match previous {
        GoalStatus::NotStarted => GoalStatus::NotStarted,
        _ => GoalStatus::InProgress,
    }
}

/// Status assigned at creation.
///
/// `NotStarted` only when the caller supplied no current value beyond the
/// start value; it is unreachable once the goal has been updated.
pub fn initial_status(
    progress: f64,
    start_value: Option<f64>,
    current_value: Option<f64>,
    target_date: NaiveDate,
    today: NaiveDate,
) -> GoalStatus {
    if progress >= 100.0 {
        return GoalStatus::Completed;
    }
    if target_date < today {
        return GoalStatus::Expired;
    }
    match (current_value, start_value) {
        (None, _) => GoalStatus::NotStarted,
        (Some(c), Some(s)) if c == s => GoalStatus::NotStarted,
        _ => GoalStatus::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn decrease_goal_boundaries() {
        let p = |current| {
            progress_percentage(
                GoalDirection::Decrease,
                Some(85.0),
                Some(75.0),
                Some(current),
            )
        };
        assert_eq!(p(85.0), 0.0);
        assert_eq!(p(75.0), 100.0);
        assert!((p(82.5) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn increase_goal_boundaries() {
        let p = |current| {
            progress_percentage(
                GoalDirection::Increase,
                Some(50.0),
                Some(100.0),
                Some(current),
            )
        };
        assert_eq!(p(50.0), 0.0);
        assert_eq!(p(100.0), 100.0);
        assert_eq!(p(75.0), 50.0);
    }

    #[test]
    fn overshoot_is_clamped() {
        let p = progress_percentage(
            GoalDirection::Decrease,
            Some(85.0),
            Some(75.0),
            Some(60.0),
        );
        assert_eq!(p, 100.0);

        // Moving away from the target clamps at 0 rather than going negative.
        let p = progress_percentage(
            GoalDirection::Decrease,
            Some(85.0),
            Some(75.0),
            Some(90.0),
        );
        assert_eq!(p, 0.0);
    }

    #[test]
    fn missing_values_degrade_to_zero() {
        assert_eq!(
            progress_percentage(GoalDirection::Decrease, Some(85.0), None, Some(80.0)),
            0.0
        );
        assert_eq!(
            progress_percentage(GoalDirection::Decrease, Some(85.0), Some(75.0), None),
            0.0
        );
        assert_eq!(
            progress_percentage(GoalDirection::Increase, None, Some(75.0), Some(80.0)),
            0.0
        );
        assert_eq!(
            progress_percentage(
                GoalDirection::Increase,
                Some(f64::NAN),
                Some(75.0),
                Some(80.0)
            ),
            0.0
        );
    }

    #[test]
    fn start_meeting_target_counts_as_achieved() {
        assert_eq!(
            progress_percentage(GoalDirection::Decrease, Some(75.0), Some(75.0), Some(75.0)),
            100.0
        );
    }

    #[test]
    fn target_worse_than_start_yields_zero() {
        // Decrease goal whose target is above the start.
        assert_eq!(
            progress_percentage(GoalDirection::Decrease, Some(75.0), Some(85.0), Some(70.0)),
            0.0
        );
    }

    #[test]
    fn days_remaining_never_negative() {
        let today = date(2026, 8, 6);
        assert_eq!(days_remaining(date(2026, 8, 16), today), 10);
        assert_eq!(days_remaining(today, today), 0);
        assert_eq!(days_remaining(date(2026, 8, 1), today), 0);
    }

    #[test]
    fn completed_is_terminal() {
        let today = date(2026, 8, 6);
        let future = date(2026, 12, 31);
        // Regressed progress after completion stays completed.
        assert_eq!(
            derive_status(GoalStatus::Completed, 40.0, future, today),
            GoalStatus::Completed
        );
        // Even past the target date.
        assert_eq!(
            derive_status(GoalStatus::Completed, 40.0, date(2026, 1, 1), today),
            GoalStatus::Completed
        );
    }

    #[test]
    fn past_target_date_expires_incomplete_goals() {
        let today = date(2026, 8, 6);
        assert_eq!(
            derive_status(GoalStatus::InProgress, 40.0, date(2026, 8, 1), today),
            GoalStatus::Expired
        );
        // Reaching 100 wins over expiry.
        assert_eq!(
            derive_status(GoalStatus::InProgress, 100.0, date(2026, 8, 1), today),
            GoalStatus::Completed
        );
    }

    #[test]
    fn extending_target_date_unexpires() {
        let today = date(2026, 8, 6);
        assert_eq!(
            derive_status(GoalStatus::Expired, 40.0, date(2026, 9, 1), today),
            GoalStatus::InProgress
        );
    }

    #[test]
    fn not_started_until_touched() {
        let today = date(2026, 8, 6);
        let future = date(2026, 12, 31);
        assert_eq!(
            derive_status(GoalStatus::NotStarted, 0.0, future, today),
            GoalStatus::NotStarted
        );
        assert_eq!(
            initial_status(0.0, Some(85.0), None, future, today),
            GoalStatus::NotStarted
        );
        assert_eq!(
            initial_status(0.0, Some(85.0), Some(85.0), future, today),
            GoalStatus::NotStarted
        );
        assert_eq!(
            initial_status(25.0, Some(85.0), Some(82.5), future, today),
            GoalStatus::InProgress
        );
    }

    proptest! {
        #[test]
        fn progress_always_within_bounds(
            start in -1e6f64..1e6,
            target in -1e6f64..1e6,
            current in -1e6f64..1e6,
        ) {
            for direction in [
                GoalDirection::Increase,
                GoalDirection::Decrease,
                GoalDirection::Maintain,
            ] {
                let p = progress_percentage(
                    direction,
                    Some(start),
                    Some(target),
                    Some(current),
                );
                prop_assert!((0.0..=100.0).contains(&p));
            }
        }

        #[test]
        fn endpoints_are_exact(start in -1e6f64..1e6, target in -1e6f64..1e6) {
            prop_assume!((target - start).abs() > 1e-6);
            let direction = if target < start {
                GoalDirection::Decrease
            } else {
                GoalDirection::Increase
            };
            let at_start =
                progress_percentage(direction, Some(start), Some(target), Some(start));
            let at_target =
                progress_percentage(direction, Some(start), Some(target), Some(target));
            prop_assert_eq!(at_start, 0.0);
            prop_assert_eq!(at_target, 100.0);
        }
    }
}
