//! Easing functions over normalized time `[0, 1]`
//!
//! Transitions take an [`Easing`] value directly; names are only resolved
//! when reading configuration files.

use crate::error::{Result, TableauError};

/// Maps normalized time `t` to eased progress `t'`
pub type Easing = fn(f32) -> f32;

pub fn linear(t: f32) -> f32 {
    t
}

pub fn quad_in(t: f32) -> f32 {
    t * t
}

pub fn quad_out(t: f32) -> f32 {
    t * (2.0 - t)
}

pub fn quad_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

pub fn cubic_in(t: f32) -> f32 {
    t * t * t
}

pub fn cubic_out(t: f32) -> f32 {
    let u = t - 1.0;
    u * u * u + 1.0
}

pub fn sine_in_out(t: f32) -> f32 {
    -0.5 * ((std::f32::consts::PI * t).cos() - 1.0)
}

pub fn back_out(t: f32) -> f32 {
    const S: f32 = 1.70158;
    let u = t - 1.0;
    u * u * ((S + 1.0) * u + S) + 1.0
}

/// Resolve an easing function from its config name
pub fn by_name(name: &str) -> Result<Easing> {
    let f: Easing = match name {
        "linear" => linear,
        "quad_in" => quad_in,
        "quad_out" => quad_out,
        "quad_in_out" => quad_in_out,
        "cubic_in" => cubic_in,
        "cubic_out" => cubic_out,
        "sine_in_out" => sine_in_out,
        "back_out" => back_out,
        other => return Err(TableauError::UnknownEasing(other.to_string())),
    };
    Ok(f)
}

/// Linear interpolation between two floats
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easings_hit_endpoints() {
        let all: [Easing; 8] = [
            linear,
            quad_in,
            quad_out,
            quad_in_out,
            cubic_in,
            cubic_out,
            sine_in_out,
            back_out,
        ];
        for f in all {
            assert!(f(0.0).abs() < 1e-5);
            assert!((f(1.0) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn by_name_resolves_known() {
        let f = by_name("quad_out").unwrap();
        assert!((f(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn by_name_rejects_unknown() {
        assert!(matches!(
            by_name("bounce_sideways"),
            Err(TableauError::UnknownEasing(_))
        ));
    }

    #[test]
    fn lerp_endpoints() {
        assert!((lerp(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }
}
