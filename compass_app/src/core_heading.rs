use std::f64::consts::PI;

use bmx055::Vector3;

/// Compass bearing from the horizontal magnetic field components, in degrees
/// within [0, 360). 0° points along the sensor x-axis, increasing toward +y.
///
/// The vertical component is ignored and no tilt or iron compensation is
/// applied. A zero field yields 0° via the atan2 convention.
pub fn compute_heading(field: &Vector3) -> f64 {
    let mut heading = (field.y as f64).atan2(field.x as f64);
    if heading < 0.0 {
        heading += 2.0 * PI;
    }
    heading.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mag(x: f32, y: f32) -> Vector3 {
        Vector3 { x, y, z: 0.0 }
    }

    #[test]
    fn cardinal_points() {
        assert_eq!(compute_heading(&mag(1.0, 0.0)), 0.0);
        assert!((compute_heading(&mag(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((compute_heading(&mag(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((compute_heading(&mag(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn negative_raw_angles_shift_into_range_once() {
        // atan2 yields -45° raw; a single 360° shift lands at 315°.
        assert!((compute_heading(&mag(1.0, -1.0)) - 315.0).abs() < 1e-9);
    }

    #[test]
    fn heading_stays_in_range_all_the_way_around() {
        for deg in 0..360 {
            let a = (deg as f64).to_radians();
            let h = compute_heading(&mag(a.cos() as f32, a.sin() as f32));
            assert!((0.0..360.0).contains(&h), "{deg}° gave {h}");
        }
    }

    #[test]
    fn zero_field_propagates_the_atan2_convention() {
        assert_eq!(compute_heading(&mag(0.0, 0.0)), 0.0);
    }
}
