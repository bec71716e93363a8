use gridpass_core::Coord;

/// Fixed-point scale of all search scores: one step is `SCALE` units.
pub const SCALE: i64 = 100;

/// Euclidean distance between two coordinates in hundredths, rounded half
/// away from zero.
#[inline]
pub fn euclidean_centi(a: Coord, b: Coord) -> i64 {
    ((a.distance_sq(b) as f64).sqrt() * SCALE as f64).round() as i64
}
