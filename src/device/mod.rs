mod rm2;
mod rmpp;

pub use rm2::RM2;
pub use rmpp::RMPP;

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Device-specific parameters for decoding pen input.
#[derive(Debug, Clone, Copy)]
pub struct DeviceProfile {
    pub name: &'static str,

    // Raw input_event size on the device (bytes)
    pub input_event_size: usize,

    // Pen digitizer ranges
    pub pen_x_max: i32,
    pub pen_y_max: i32,
    pub pen_pressure_max: i32,
    pub pen_tilt_range: i32,
}

impl DeviceProfile {
    /// Output surface size after rotating the digitizer.
    pub fn output_dimensions(&self, orientation: crate::orientation::Orientation) -> (i32, i32) {
        orientation.pen_output_dimensions(self.pen_x_max, self.pen_y_max)
    }
}

/// Supported tablet models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceKind {
    #[default]
    Rm2,
    Rmpp,
}

impl DeviceKind {
    pub fn profile(self) -> &'static DeviceProfile {
        match self {
            DeviceKind::Rm2 => &RM2,
            DeviceKind::Rmpp => &RMPP,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Rm2 => write!(f, "rm2"),
            DeviceKind::Rmpp => write!(f, "rmpp"),
        }
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rm2" | "remarkable2" | "remarkable-2" => Ok(DeviceKind::Rm2),
            "rmpp" | "paper-pro" | "paperpro" => Ok(DeviceKind::Rmpp),
            _ => Err(format!("Invalid device '{}'. Valid values: rm2, rmpp", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::Orientation;

    #[test]
    fn test_profiles() {
        assert_eq!(DeviceKind::Rm2.profile().input_event_size, 16);
        assert_eq!(DeviceKind::Rmpp.profile().input_event_size, 24);
        assert_eq!("Paper-Pro".parse::<DeviceKind>().unwrap(), DeviceKind::Rmpp);
        assert!("kindle".parse::<DeviceKind>().is_err());
    }

    #[test]
    fn test_output_dimensions_follow_orientation() {
        let rm2 = DeviceKind::Rm2.profile();
        assert_eq!(rm2.output_dimensions(Orientation::LandscapeRight), (20967, 15725));
        assert_eq!(rm2.output_dimensions(Orientation::Portrait), (15725, 20967));
    }
}
