mod display_driver;
mod motion_driver;
mod sonar_driver;

pub use display_driver::DisplayDriver;
pub use motion_driver::MotionDriver;
pub use sonar_driver::SonarDriver;

use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin};
use esp_idf_hal::i2c::I2C0;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::sys::EspError;

pub struct SystemPeripherals {
    pub sonars: SonarPeripherals,
    pub motion: MotionPeripherals,
    pub display: DisplayI2cPeripherals,
}

/// One HC-SR04 trigger/echo pair
pub struct SonarPins {
    pub trigger: AnyOutputPin,
    pub echo: AnyInputPin,
}

/// Sensor pairs in measurement order
pub struct SonarPeripherals {
    pub front: SonarPins, // GPIO4 / GPIO5
    pub back: SonarPins,  // GPIO6 / GPIO7
    pub right: SonarPins, // GPIO15 / GPIO16
    pub left: SonarPins,  // GPIO17 / GPIO18
}

pub struct MotionPeripherals {
    /// PIR output, falling edge = trigger (GPIO2). IO pin so the pull-up can be set.
    pub pir: AnyIOPin,
    /// Indicator LED, active high (GPIO13)
    pub led: AnyOutputPin,
}

/// SSD1306 128x32 on I2C0
pub struct DisplayI2cPeripherals {
    pub i2c: I2C0,
    pub sda: AnyIOPin, // GPIO8
    pub scl: AnyIOPin, // GPIO9
}

impl SystemPeripherals {
    pub fn take() -> Result<Self, EspError> {
        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;

        Ok(SystemPeripherals {
            sonars: SonarPeripherals {
                front: SonarPins {
                    trigger: pins.gpio4.into(),
                    echo: pins.gpio5.into(),
                },
                back: SonarPins {
                    trigger: pins.gpio6.into(),
                    echo: pins.gpio7.into(),
                },
                right: SonarPins {
                    trigger: pins.gpio15.into(),
                    echo: pins.gpio16.into(),
                },
                left: SonarPins {
                    trigger: pins.gpio17.into(),
                    echo: pins.gpio18.into(),
                },
            },
            motion: MotionPeripherals {
                pir: pins.gpio2.into(),
                led: pins.gpio13.into(),
            },
            display: DisplayI2cPeripherals {
                i2c: peripherals.i2c0,
                sda: pins.gpio8.into(),
                scl: pins.gpio9.into(),
            },
        })
    }
}
