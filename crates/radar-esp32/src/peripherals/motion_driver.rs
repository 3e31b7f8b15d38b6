//! Motion input and indicator LED.
//!
//! The PIR line raises a GPIO interrupt on every falling edge, which bumps
//! the latch counter. An esp_timer callback closes the counting window once
//! per `MOTION_PERIOD_MS` and lights the LED when the window latched. The main
//! loop turns the LED back off when it consumes the latch.
//!
//! The HAL disables a GPIO interrupt each time it fires. A dedicated
//! `pir_rearm` thread owns the pin and re-enables it as soon as the ISR
//! notifies it, so edge counting never waits on the main loop (a ping can
//! block for a full second on a dead echo line).

use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use esp_idf_hal::delay::BLOCK;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, InterruptType, Output, PinDriver, Pull};
use esp_idf_hal::task::notification::Notification;
use esp_idf_svc::sys::EspError;
use esp_idf_svc::timer::{EspTaskTimerService, EspTimer};

use radar_core::consts;
use radar_core::indicator::IndicatorTrait;
use radar_core::motion::MotionLatch;

use super::MotionPeripherals;

/// Indicator LED shared between the timer task and the main loop
pub struct LedIndicator {
    pin: Mutex<PinDriver<'static, AnyOutputPin, Output>>,
}

impl LedIndicator {
    pub fn new(pin: AnyOutputPin) -> Result<Self, EspError> {
        let mut pin = PinDriver::output(pin)?;
        pin.set_low()?;
        Ok(Self { pin: Mutex::new(pin) })
    }
}

impl IndicatorTrait for LedIndicator {
    fn set(&self, lit: bool) {
        let Ok(mut pin) = self.pin.lock() else {
            log::error!("LED mutex poisoned");
            return;
        };
        let result = if lit { pin.set_high() } else { pin.set_low() };
        if let Err(e) = result {
            log::warn!("LED write failed: {}", e);
        }
    }
}

pub struct MotionDriver {
    indicator: Arc<LedIndicator>,
    _rearm_thread: JoinHandle<()>,
    _timer: EspTimer<'static>,
}

impl MotionDriver {
    /// Hook the PIR interrupt and the period timer up to `latch`.
    pub fn new(
        peripherals: MotionPeripherals,
        latch: &'static MotionLatch,
    ) -> anyhow::Result<Self> {
        let indicator = Arc::new(LedIndicator::new(peripherals.led)?);

        let mut pir = PinDriver::input(peripherals.pir)?;
        pir.set_pull(Pull::Up)?;
        pir.set_interrupt_type(InterruptType::NegEdge)?;

        let rearm_thread = thread::Builder::new()
            .name("pir_rearm".to_string())
            .stack_size(4096)
            .spawn(move || {
                if let Err(e) = pir_rearm_thread(pir, latch) {
                    log::error!("PIR interrupt stopped: {}", e);
                }
            })?;

        let timer_indicator = Arc::clone(&indicator);
        let timer = EspTaskTimerService::new()?.timer(move || {
            latch.on_period(&*timer_indicator);
        })?;
        timer.every(Duration::from_millis(consts::MOTION_PERIOD_MS as u64))?;

        log::info!(
            "MotionDriver initialized (window {} ms, threshold > {})",
            consts::MOTION_PERIOD_MS,
            consts::MOTION_THRESHOLD
        );

        Ok(Self {
            indicator,
            _rearm_thread: rearm_thread,
            _timer: timer,
        })
    }

    pub fn indicator(&self) -> &LedIndicator {
        &self.indicator
    }
}

/// Owns the PIR pin. The ISR counts the edge and wakes this thread, which
/// re-enables the interrupt for the next one.
fn pir_rearm_thread(
    mut pir: PinDriver<'static, AnyIOPin, Input>,
    latch: &'static MotionLatch,
) -> Result<(), EspError> {
    // the notification targets the task that creates it
    let notification = Notification::new();
    let notifier = notification.notifier();

    // SAFETY: the callback only touches an atomic counter and a task
    // notification, both ISR safe
    unsafe {
        pir.subscribe(move || {
            latch.record_edge();
            notifier.notify_and_yield(NonZeroU32::MIN);
        })?;
    }

    loop {
        pir.enable_interrupt()?;
        notification.wait(BLOCK);
    }
}
