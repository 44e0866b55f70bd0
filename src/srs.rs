use chrono::{Duration, NaiveDate};

use crate::error::Error;
use crate::models::ReviewRecord;

/// Floor for the ease factor. The clamp is part of SM-2, not an error case.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Calculates the next scheduling record from a quality rating.
///
/// Quality:
/// 5 - Perfect response
/// 4 - Correct response after a hesitation
/// 3 - Correct response recalled with serious difficulty
/// 2 - Incorrect response; the correct one seemed easy to recall
/// 1 - Incorrect response; the correct one remembered
/// 0 - Complete blackout.
///
/// `prior` is `None` for an item that was never rated; defaults are resolved
/// here and nowhere else. `today` is injected so scheduling stays a pure
/// date-in/date-out computation.
pub fn next_record(
    prior: Option<&ReviewRecord>,
    quality: u8,
    today: NaiveDate,
) -> Result<ReviewRecord, Error> {
    if quality > 5 {
        return Err(Error::InvalidQuality(quality));
    }

    let base = match prior {
        Some(record) => record.clone(),
        None => ReviewRecord::fresh(today),
    };

    let mut repetitions = base.repetitions;
    let mut interval_days = base.interval_days;

    if quality >= 3 {
        // Correct. Interval grows by the ease factor the item *entered* the
        // review with; the ease update below applies to the next round.
        repetitions += 1;
        interval_days = match repetitions {
            1 => 1,
            2 => 6,
            _ => (interval_days as f64 * base.ease_factor).round() as u32,
        };
    } else {
        // Lapse: streak and interval reset.
        repetitions = 0;
        interval_days = 1;
    }

    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
    let q = quality as f64;
    let ease_factor =
        (base.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02))).max(MIN_EASE_FACTOR);

    // Every rated item waits at least a day; anything else is a bug here.
    debug_assert!(interval_days >= 1);

    Ok(ReviewRecord {
        repetitions,
        ease_factor,
        interval_days,
        due_date: today + Duration::days(interval_days as i64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn rejects_quality_above_five() {
        assert!(matches!(
            next_record(None, 6, day()),
            Err(Error::InvalidQuality(6))
        ));
    }

    #[test]
    fn first_success_from_no_history() {
        let rec = next_record(None, 4, day()).unwrap();
        assert_eq!(rec.repetitions, 1);
        assert_eq!(rec.interval_days, 1);
        assert_eq!(rec.due_date, day() + Duration::days(1));
        assert!((rec.ease_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn second_success_jumps_to_six_days() {
        let prior = ReviewRecord {
            repetitions: 1,
            ease_factor: 2.5,
            interval_days: 1,
            due_date: day(),
        };
        let rec = next_record(Some(&prior), 3, day()).unwrap();
        assert_eq!(rec.repetitions, 2);
        assert_eq!(rec.interval_days, 6);
    }

    #[test]
    fn third_success_multiplies_by_prior_ease() {
        let prior = ReviewRecord {
            repetitions: 2,
            ease_factor: 2.5,
            interval_days: 6,
            due_date: day(),
        };
        let rec = next_record(Some(&prior), 4, day()).unwrap();
        assert_eq!(rec.repetitions, 3);
        // round(6 * 2.5) = 15, using the ease factor before its own update
        assert_eq!(rec.interval_days, 15);
        assert_eq!(rec.due_date, day() + Duration::days(15));
    }

    #[test]
    fn lapse_resets_regardless_of_prior() {
        let prior = ReviewRecord {
            repetitions: 7,
            ease_factor: 2.8,
            interval_days: 120,
            due_date: day(),
        };
        for quality in 0..3 {
            let rec = next_record(Some(&prior), quality, day()).unwrap();
            assert_eq!(rec.repetitions, 0);
            assert_eq!(rec.interval_days, 1);
            assert_eq!(rec.due_date, day() + Duration::days(1));
        }
    }

    #[test]
    fn ease_factor_never_drops_below_floor() {
        let mut record = None;
        for _ in 0..10 {
            let next = next_record(record.as_ref(), 0, day()).unwrap();
            record = Some(next);
        }
        let ef = record.unwrap().ease_factor;
        assert!(ef >= MIN_EASE_FACTOR);
        assert!((ef - MIN_EASE_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn floor_holds_for_every_quality() {
        for quality in 0..=5 {
            let prior = ReviewRecord {
                repetitions: 1,
                ease_factor: MIN_EASE_FACTOR,
                interval_days: 1,
                due_date: day(),
            };
            let rec = next_record(Some(&prior), quality, day()).unwrap();
            assert!(rec.ease_factor >= MIN_EASE_FACTOR);
        }
    }

    #[test]
    fn does_not_mutate_prior() {
        let prior = ReviewRecord {
            repetitions: 2,
            ease_factor: 2.5,
            interval_days: 6,
            due_date: day(),
        };
        let before = prior.clone();
        let _ = next_record(Some(&prior), 5, day()).unwrap();
        assert_eq!(prior, before);
    }

    #[test]
    fn perfect_then_lapse_end_to_end() {
        // Never-seen item rated 5.
        let first = next_record(None, 5, day()).unwrap();
        assert_eq!(first.repetitions, 1);
        assert_eq!(first.interval_days, 1);
        assert!((first.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(first.due_date, day() + Duration::days(1));

        // Rated 2 the next day: 2.6 + (0.1 - 3*(0.08 + 3*0.02)) = 2.28.
        let next_day = day() + Duration::days(1);
        let second = next_record(Some(&first), 2, next_day).unwrap();
        assert_eq!(second.repetitions, 0);
        assert_eq!(second.interval_days, 1);
        assert!((second.ease_factor - 2.28).abs() < 1e-9);
        assert_eq!(second.due_date, next_day + Duration::days(1));
    }

    #[test]
    fn interval_grows_across_a_good_streak() {
        let mut record: Option<ReviewRecord> = None;
        for i in 0..5 {
            let next = next_record(record.as_ref(), 4, day()).unwrap();
            match i {
                0 => assert_eq!(next.interval_days, 1),
                1 => assert_eq!(next.interval_days, 6),
                _ => assert!(next.interval_days > 6),
            }
            record = Some(next);
        }
        assert!(record.unwrap().interval_days > 30);
    }
}
