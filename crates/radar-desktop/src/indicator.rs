use std::sync::atomic::{AtomicBool, Ordering};

use radar_core::indicator::IndicatorTrait;

/// Stand-in for the motion LED. Every transition is logged.
#[derive(Default)]
pub struct DesktopIndicator {
    lit: AtomicBool,
}

impl IndicatorTrait for DesktopIndicator {
    fn set(&self, lit: bool) {
        if self.lit.swap(lit, Ordering::Relaxed) != lit {
            log::info!("LED {}", if lit { "on" } else { "off" });
        }
    }
}
