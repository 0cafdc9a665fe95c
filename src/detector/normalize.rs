/// Fraction of the floor-to-threshold distance treated as deadzone.
const DEADZONE_FRACTION: f64 = 0.35;
/// Upper bound on where the visual range starts, as a fraction of threshold.
const MAX_START_FRACTION: f64 = 0.65;

/// Map a smoothed level onto [0, 1].
///
/// Levels at or below the deadzone edge read 0 and levels at or above the
/// threshold read 1, linear in between. `noise_floor` is ignored while
/// `calibrating` is set.
pub fn visual_level(
    smoothed_level: f64,
    noise_floor: f64,
    calibrating: bool,
    threshold: f64,
    epsilon: f64,
) -> f64 {
    let floor_ref = if calibrating { 0.0 } else { noise_floor };
    let visual_start = (floor_ref + DEADZONE_FRACTION * (threshold - floor_ref))
        .min(threshold * MAX_START_FRACTION);
    let denom = (threshold - visual_start).max(epsilon);
    let level = (smoothed_level - visual_start) / denom;

    // NaN compares false on both sides and lands on 0.
    if level >= 1.0 {
        1.0
    } else if level > 0.0 {
        level
    } else {
        0.0
    }
}
