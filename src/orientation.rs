//! Screen orientation handling for pen coordinate transforms.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Screen orientation relative to the default portrait mode (buttons at top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Portrait mode (buttons at top, no rotation).
    Portrait,
    /// Landscape with buttons on the right side (90° clockwise).
    #[default]
    LandscapeRight,
    /// Landscape with buttons on the left side (90° counter-clockwise).
    LandscapeLeft,
    /// Inverted portrait (buttons at bottom, 180° rotation).
    Inverted,
}

impl Orientation {
    /// Transform pen coordinates from device space to output space.
    /// Pen is natively landscape-oriented (LandscapeRight = identity).
    pub fn transform_pen(&self, x: i32, y: i32, x_max: i32, y_max: i32) -> (i32, i32) {
        match self {
            // LandscapeRight: native pen orientation, no transform
            Orientation::LandscapeRight => (x, y),
            // Portrait: swap X/Y and flip what becomes Y
            Orientation::Portrait => (y, x_max - x),
            // LandscapeLeft: invert both axes
            Orientation::LandscapeLeft => (x_max - x, y_max - y),
            // Inverted: swap X/Y and flip what becomes X
            Orientation::Inverted => (y_max - y, x),
        }
    }

    /// Transform tilt values to match the orientation.
    /// Tilt follows pen orientation (LandscapeRight is native).
    pub fn transform_tilt(&self, tilt_x: i32, tilt_y: i32) -> (i32, i32) {
        match self {
            // LandscapeRight: native, no transform
            Orientation::LandscapeRight => (tilt_x, tilt_y),
            // Portrait: swap tilt axes, negate new Y
            Orientation::Portrait => (tilt_y, -tilt_x),
            // LandscapeLeft: invert both
            Orientation::LandscapeLeft => (-tilt_x, -tilt_y),
            // Inverted: swap and negate new X
            Orientation::Inverted => (-tilt_y, tilt_x),
        }
    }

    /// Get output dimensions for pen after rotation.
    /// Pen is natively landscape-oriented (x > y in raw coords).
    pub fn pen_output_dimensions(&self, x_max: i32, y_max: i32) -> (i32, i32) {
        match self {
            // LandscapeRight/Left: native pen orientation, keep dimensions
            Orientation::LandscapeRight | Orientation::LandscapeLeft => (x_max, y_max),
            // Portrait/Inverted: swap dimensions
            Orientation::Portrait | Orientation::Inverted => (y_max, x_max),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::LandscapeRight => write!(f, "landscape-right"),
            Orientation::LandscapeLeft => write!(f, "landscape-left"),
            Orientation::Inverted => write!(f, "inverted"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape-right" | "landscaperight" | "landscape_right" => Ok(Orientation::LandscapeRight),
            "landscape-left" | "landscapeleft" | "landscape_left" => Ok(Orientation::LandscapeLeft),
            "inverted" => Ok(Orientation::Inverted),
            _ => Err(format!(
                "Invalid orientation '{}'. Valid values: portrait, landscape-right, landscape-left, inverted",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pen_transform() {
        let (x_max, y_max) = (200, 100);
        assert_eq!(Orientation::LandscapeRight.transform_pen(10, 20, x_max, y_max), (10, 20));
        assert_eq!(Orientation::Portrait.transform_pen(10, 20, x_max, y_max), (20, 190));
        assert_eq!(Orientation::LandscapeLeft.transform_pen(10, 20, x_max, y_max), (190, 80));
        assert_eq!(Orientation::Inverted.transform_pen(10, 20, x_max, y_max), (80, 10));
    }

    #[test]
    fn test_tilt_follows_pen() {
        assert_eq!(Orientation::LandscapeRight.transform_tilt(3, -4), (3, -4));
        assert_eq!(Orientation::Portrait.transform_tilt(3, -4), (-4, -3));
        assert_eq!(Orientation::LandscapeLeft.transform_tilt(3, -4), (-3, 4));
    }

    #[test]
    fn test_output_dimensions() {
        assert_eq!(Orientation::LandscapeLeft.pen_output_dimensions(200, 100), (200, 100));
        assert_eq!(Orientation::Inverted.pen_output_dimensions(200, 100), (100, 200));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("portrait".parse::<Orientation>().unwrap(), Orientation::Portrait);
        assert_eq!("landscape_left".parse::<Orientation>().unwrap(), Orientation::LandscapeLeft);
        assert!("sideways".parse::<Orientation>().is_err());
    }
}
