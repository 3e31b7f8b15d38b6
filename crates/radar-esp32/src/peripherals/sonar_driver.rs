use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{AnyInputPin, AnyOutputPin, Input, Output, PinDriver};
use esp_idf_svc::sys::EspError;
use esp_idf_svc::systime::EspSystemTime;

use radar_core::engine::reading_or_zero;
use radar_core::input::{Input as EngineInput, Wall};
use radar_core::ranger::{EchoRanger, MicrosClock};

use super::{SonarPeripherals, SonarPins};

/// Microsecond clock backed by the ESP high resolution timer
#[derive(Clone, Copy)]
pub struct EspClock;

impl MicrosClock for EspClock {
    fn now_us(&self) -> u64 {
        EspSystemTime.now().as_micros() as u64
    }
}

type Sonar<'d> = EchoRanger<
    PinDriver<'d, AnyOutputPin, Output>,
    PinDriver<'d, AnyInputPin, Input>,
    Ets,
    EspClock,
>;

/// Drives the four ultrasonic sensors.
///
/// Sensors are pinged one after another, never in parallel, so one sensor's
/// burst can't be picked up as another's echo.
pub struct SonarDriver<'d> {
    sonars: [Sonar<'d>; 4],
}

impl<'d> SonarDriver<'d> {
    pub fn new(peripherals: SonarPeripherals) -> Result<Self, EspError> {
        // array order has to match Wall::ALL
        let sonars = [
            Self::sonar(peripherals.front)?,
            Self::sonar(peripherals.back)?,
            Self::sonar(peripherals.right)?,
            Self::sonar(peripherals.left)?,
        ];

        log::info!("SonarDriver initialized with {} sensors", sonars.len());

        Ok(Self { sonars })
    }

    fn sonar(pins: SonarPins) -> Result<Sonar<'d>, EspError> {
        let mut trigger = PinDriver::output(pins.trigger)?;
        trigger.set_low()?;
        let echo = PinDriver::input(pins.echo)?;
        Ok(EchoRanger::new(trigger, echo, Ets, EspClock))
    }

    /// Ping every sensor in turn and store the readings in the engine input.
    pub fn apply_to_input(&mut self, input: &mut EngineInput) {
        for (wall, sonar) in Wall::ALL.into_iter().zip(self.sonars.iter_mut()) {
            let cm = reading_or_zero(wall, sonar.measure());
            input.set_distance(wall, cm);
        }
    }
}
