//! Build-time constants shared by every frontend.

use embedded_graphics::pixelcolor::BinaryColor;

pub type ColorType = BinaryColor;

/// Panel size in pixels (SSD1306 128x32).
pub const WIDTH: u32 = 128;
pub const HEIGHT: u32 = 32;

/// Highest addressable pixel on each axis. Used as the mapper's extent.
pub const USABLE_WIDTH: u32 = WIDTH - 1;
pub const USABLE_HEIGHT: u32 = HEIGHT - 1;

/// Farthest distance the sensors report reliably, in centimeters.
pub const MAX_RANGE_CM: u32 = 400;

/// Show raw distances and mapped coordinates on screen.
pub const DEBUG_MODE: bool = false;

/// Length of one motion counting window.
pub const MOTION_PERIOD_MS: u32 = 1000;

/// A window latches motion when it saw strictly more edges than this.
pub const MOTION_THRESHOLD: u32 = 1;

/// Upper bound on a single echo measurement, matching Arduino's `pulseIn` default.
pub const PULSE_TIMEOUT_US: u64 = 1_000_000;

pub const DISPLAY_I2C_ADDR: u8 = 0x3C;
