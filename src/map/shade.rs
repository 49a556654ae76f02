/// An RGB color triple for country shading.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fallback color for countries absent from the life-expectancy table.
pub const NO_DATA: Rgb = Rgb::new(150, 150, 150);

/// Input range of the encoder (years of life expectancy).
const DOMAIN: (f64, f64) = (40.0, 90.0);
/// Output range of the brightness channel.
const RANGE: (f64, f64) = (10.0, 255.0);

/// Linear brightness level for a life-expectancy value.
/// [40, 90] maps to [10, 255]; out-of-range inputs extrapolate rather than
/// clamp, and the result truncates toward zero.
#[inline]
pub fn color_level(life_exp: f64) -> i32 {
    let t = (life_exp - DOMAIN.0) / (DOMAIN.1 - DOMAIN.0);
    (RANGE.0 + t * (RANGE.1 - RANGE.0)) as i32
}

/// Encode a life-expectancy value as a display color.
/// Low values shade red-orange, high values shade blue; missing data is a
/// neutral gray. Channels saturate at the u8 boundary when the level
/// extrapolates past it.
pub fn shade(life_exp: Option<f64>) -> Rgb {
    match life_exp {
        Some(v) => {
            let level = color_level(v);
            Rgb::new(channel(255 - level), 100, channel(level))
        }
        None => NO_DATA,
    }
}

#[inline]
fn channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midrange_value() {
        // 65 yrs: level = 10 + 0.5 * 245 = 132.5, truncated to 132
        assert_eq!(color_level(65.0), 132);
        assert_eq!(shade(Some(65.0)), Rgb::new(123, 100, 132));
    }

    #[test]
    fn test_domain_endpoints() {
        assert_eq!(shade(Some(40.0)), Rgb::new(245, 100, 10));
        assert_eq!(shade(Some(90.0)), Rgb::new(0, 100, 255));
    }

    #[test]
    fn test_missing_data_is_gray() {
        assert_eq!(shade(None), Rgb::new(150, 150, 150));
    }

    #[test]
    fn test_extrapolates_outside_domain() {
        // The mapping itself does not clamp
        assert_eq!(color_level(100.0), 304);
        assert_eq!(color_level(30.0), -39);
        // Channels saturate only at the u8 boundary
        assert_eq!(shade(Some(100.0)), Rgb::new(0, 100, 255));
        assert_eq!(shade(Some(30.0)), Rgb::new(255, 100, 0));
    }

    #[test]
    fn test_truncates_toward_zero() {
        // 64 yrs: 10 + 0.48 * 245 = 127.6 -> 127
        assert_eq!(color_level(64.0), 127);
    }
}
