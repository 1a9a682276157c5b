use crate::domain::{Placement, PointSchedule};

/// Looks up the points for a raw placement value.
///
/// Values outside {1, 2, 3, 5, 7} yield 0.
pub fn points_for(placement: i64, schedule: &PointSchedule) -> i32 {
    Placement::try_from(placement)
        .map(|p| schedule.points(p))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> PointSchedule {
        PointSchedule {
            points_place_1: 10,
            points_place_2: 7,
            points_place_3: 4,
            points_place_5: 2,
            points_place_7: 1,
        }
    }

    #[test]
    fn test_valid_placements() {
        let schedule = schedule();
        assert_eq!(points_for(1, &schedule), 10);
        assert_eq!(points_for(2, &schedule), 7);
        assert_eq!(points_for(3, &schedule), 4);
        assert_eq!(points_for(5, &schedule), 2);
        assert_eq!(points_for(7, &schedule), 1);
    }

    #[test]
    fn test_invalid_placements_score_zero() {
        let schedule = schedule();
        for placement in [0, 4, 6, 8, -1, i64::MAX] {
            assert_eq!(points_for(placement, &schedule), 0);
        }
    }
}
