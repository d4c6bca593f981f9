use crate::confidence::Confidence;

pub const MIN_INTERVAL_DAYS: i64 = 1;
pub const MAX_INTERVAL_DAYS: i64 = 180;

const GROWTH_BASE: f64 = 1.3;
const GROWTH_PER_WEIGHT: f64 = 0.4;

/// Interval in days after the very first rating, before any review has
/// happened.
pub fn base_interval(confidence: Confidence) -> i64 {
    match confidence {
        Confidence::Confused => 1,
        Confidence::Struggled => 2,
        Confidence::Understood => 4,
        Confidence::Confident => 7,
        Confidence::Mastered => 14,
    }
}

/// Multiplier applied to the previous interval on a successful review.
pub fn growth_factor(confidence: Confidence) -> f64 {
    GROWTH_BASE + GROWTH_PER_WEIGHT * confidence.weight() as f64
}

/// Next review interval in days.
///
/// The first rating (`times_reviewed == 0`) uses the per-level base
/// interval and ignores `previous_interval_days`. After that, a
/// `Confused` rating resets to one day; every other level grows the
/// previous interval by its weight-derived factor, rounded up to a
/// whole day and capped at [`MAX_INTERVAL_DAYS`].
pub fn next_interval(
    confidence: Confidence,
    times_reviewed: u32,
    previous_interval_days: i64,
) -> i64 {
    next_interval_capped(
        confidence,
        times_reviewed,
        previous_interval_days,
        MAX_INTERVAL_DAYS,
    )
}

/// [`next_interval`] with a caller-chosen ceiling, for deployments that
/// tune `REVIEW_MAX_INTERVAL_DAYS`.
pub fn next_interval_capped(
    confidence: Confidence,
    times_reviewed: u32,
    previous_interval_days: i64,
    max_days: i64,
) -> i64 {
    let max_days = max_days.max(MIN_INTERVAL_DAYS);

    if times_reviewed == 0 {
        return base_interval(confidence).clamp(MIN_INTERVAL_DAYS, max_days);
    }

    if confidence == Confidence::Confused {
        return MIN_INTERVAL_DAYS;
    }

    let previous = previous_interval_days.max(MIN_INTERVAL_DAYS) as f64;
    let grown = (previous * growth_factor(confidence)).ceil() as i64;
    grown.clamp(MIN_INTERVAL_DAYS, max_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rating_uses_base_intervals() {
        assert_eq!(next_interval(Confidence::Confused, 0, 0), 1);
        assert_eq!(next_interval(Confidence::Struggled, 0, 0), 2);
        assert_eq!(next_interval(Confidence::Understood, 0, 0), 4);
        assert_eq!(next_interval(Confidence::Confident, 0, 0), 7);
        assert_eq!(next_interval(Confidence::Mastered, 0, 0), 14);
    }

    #[test]
    fn first_rating_ignores_previous_interval() {
        assert_eq!(next_interval(Confidence::Confident, 0, 90), 7);
    }

    #[test]
    fn confused_resets_regardless_of_history() {
        assert_eq!(next_interval(Confidence::Confused, 1, 30), 1);
        assert_eq!(next_interval(Confidence::Confused, 12, 180), 1);
    }

    #[test]
    fn growth_rounds_up_to_whole_days() {
        // 7 * 2.9 = 20.3
        assert_eq!(next_interval(Confidence::Mastered, 2, 7), 21);
        // 7 * 2.5 = 17.5
        assert_eq!(next_interval(Confidence::Confident, 1, 7), 18);
        // 10 * 1.7 = 17
        assert_eq!(next_interval(Confidence::Struggled, 3, 10), 17);
        // 10 * 2.1 = 21
        assert_eq!(next_interval(Confidence::Understood, 3, 10), 21);
    }

    #[test]
    fn growth_is_capped() {
        assert_eq!(next_interval(Confidence::Mastered, 5, 180), 180);
        assert_eq!(next_interval(Confidence::Struggled, 8, 179), 180);
    }

    #[test]
    fn degenerate_previous_interval_is_clamped() {
        // A previous interval below one day still grows from one day.
        assert_eq!(next_interval(Confidence::Understood, 1, 0), 3);
        assert_eq!(next_interval(Confidence::Confident, 1, -5), 3);
    }

    #[test]
    fn custom_cap_applies_to_every_path() {
        assert_eq!(next_interval_capped(Confidence::Mastered, 0, 0, 10), 10);
        assert_eq!(next_interval_capped(Confidence::Mastered, 1, 9, 10), 10);
        assert_eq!(next_interval_capped(Confidence::Confused, 4, 9, 10), 1);
    }
}
