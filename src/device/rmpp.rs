use super::DeviceProfile;

/// reMarkable Paper Pro device profile.
///
/// aarch64, so input_event records carry a 16-byte timeval.
pub const RMPP: DeviceProfile = DeviceProfile {
    name: "reMarkable Paper Pro",

    // 64-bit ARM input_event struct size
    input_event_size: 24,

    pen_x_max: 11180,
    pen_y_max: 15340,
    pen_pressure_max: 4096,
    pen_tilt_range: 9000,

};
