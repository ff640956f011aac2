//! Utility maths functions
//!
//! Angles in the rover software are carried in degrees. The functions here
//! keep them inside their canonical ranges.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Wrap an angle in degrees into the range [0, 360).
pub fn wrap_360<T>(value: T) -> T
where
    T: Float
{
    let full: T = T::from(360.0).unwrap();

    let r = rem_euclid(value, full);

    // rem_euclid can round up to exactly `full` for tiny negative inputs
    if r >= full { T::zero() } else { r }
}

/// Wrap an angle in degrees into the range (-180, 180].
pub fn wrap_180<T>(value: T) -> T
where
    T: Float
{
    let half: T = T::from(180.0).unwrap();
    let full: T = T::from(360.0).unwrap();

    let r = wrap_360(value);

    if r > half { r - full } else { r }
}

/// Get the signed angular distance in degrees needed to rotate from `a` to
/// `b`, taking the shortest way round.
pub fn get_ang_dist_deg<T>(a: T, b: T) -> T
where
    T: Float
{
    wrap_180(b - a)
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wrap_360() {
        assert_eq!(wrap_360(0f64), 0f64);
        assert_eq!(wrap_360(360f64), 0f64);
        assert_eq!(wrap_360(-90f64), 270f64);
        assert_eq!(wrap_360(725f64), 5f64);
        assert_eq!(wrap_360(-720f64), 0f64);

        for i in -2000..2000 {
            let w = wrap_360(i as f64 * 0.77);
            assert!(w >= 0.0 && w < 360.0, "{} out of range", w);
        }

        let tiny = wrap_360(-1e-20f64);
        assert!(tiny >= 0.0 && tiny < 360.0);
    }

    #[test]
    fn test_wrap_180() {
        assert_eq!(wrap_180(180f64), 180f64);
        assert_eq!(wrap_180(-180f64), 180f64);
        assert_eq!(wrap_180(190f64), -170f64);
        assert_eq!(wrap_180(-10f64), -10f64);
        assert_eq!(wrap_180(350f64), -10f64);
    }

    #[test]
    fn test_get_ang_dist_deg() {
        assert_eq!(get_ang_dist_deg(10f64, 20f64), 10f64);
        assert_eq!(get_ang_dist_deg(20f64, 10f64), -10f64);
        assert_eq!(get_ang_dist_deg(350f64, 10f64), 20f64);
        assert_eq!(get_ang_dist_deg(10f64, 350f64), -20f64);
        assert_eq!(get_ang_dist_deg(0f64, 360f64), 0f64);
    }
}
