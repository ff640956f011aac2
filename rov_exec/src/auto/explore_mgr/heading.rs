//! # Heading selection
//!
//! Chooses the direction to resume in from a sweep of the range sensor.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use rand::{seq::SliceRandom, Rng};

use crate::auto::per::ScanSample;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Relative heading meaning "turn around", selected when nothing ahead is clear.
pub const REVERSE_HEADING_DEG: i32 = -180;

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Select the bearing with the most clearance.
///
/// Bearings sharing the maximum range are chosen between uniformly at random. If the sweep is
/// empty or its best range is below `min_clearance` the reversal heading is returned.
pub fn select_heading<R: Rng + ?Sized>(scan: &[ScanSample], min_clearance: f64, rng: &mut R) -> i32 {
    let max_range = scan
        .iter()
        .map(|s| s.range)
        .fold(std::f64::NEG_INFINITY, f64::max);

    if scan.is_empty() || max_range < min_clearance {
        return REVERSE_HEADING_DEG;
    }

    let best: Vec<i32> = scan
        .iter()
        .filter(|s| s.range == max_range)
        .map(|s| s.bearing_deg)
        .collect();

    best.choose(rng).copied().unwrap_or(REVERSE_HEADING_DEG)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn scan(samples: &[(i32, f64)]) -> Vec<ScanSample> {
        samples
            .iter()
            .map(|&(bearing_deg, range)| ScanSample { bearing_deg, range })
            .collect()
    }

    #[test]
    fn test_unique_max() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = scan(&[(-20, 40.0), (0, 20.0), (20, 80.0)]);

        for _ in 0..10 {
            assert_eq!(select_heading(&s, 30.0, &mut rng), 20);
        }
    }

    #[test]
    fn test_ties() {
        let mut rng = StdRng::seed_from_u64(42);
        let s = scan(&[(-90, 255.0), (-40, 100.0), (0, 255.0), (50, 255.0), (90, 12.0)]);

        let mut seen = Vec::new();
        for _ in 0..200 {
            let h = select_heading(&s, 30.0, &mut rng);
            assert!([-90, 0, 50].contains(&h), "picked {}", h);
            if !seen.contains(&h) {
                seen.push(h);
            }
        }

        // Not simply the first maximum seen
        assert_eq!(seen.len(), 3);

        // Same seed, same choices
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(select_heading(&s, 30.0, &mut a), select_heading(&s, 30.0, &mut b));
        }
    }

    #[test]
    fn test_reverse() {
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(select_heading(&[], 30.0, &mut rng), REVERSE_HEADING_DEG);

        let s = scan(&[(-10, 29.9), (0, 5.0), (10, 12.0)]);
        assert_eq!(select_heading(&s, 30.0, &mut rng), REVERSE_HEADING_DEG);

        // Exactly the clearance is enough
        let s = scan(&[(-10, 30.0), (0, 5.0)]);
        assert_eq!(select_heading(&s, 30.0, &mut rng), -10);
    }
}
