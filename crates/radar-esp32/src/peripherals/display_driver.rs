use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::prelude::*;
use esp_idf_svc::sys::EspError;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

use radar_core::consts;

use super::DisplayI2cPeripherals;

pub type Oled = Ssd1306<
    I2CInterface<I2cDriver<'static>>,
    DisplaySize128x32,
    BufferedGraphicsMode<DisplaySize128x32>,
>;

/// SSD1306 128x32 panel in buffered graphics mode.
///
/// Frames are composed in the driver's RAM buffer; `present()` pushes the
/// whole buffer to the panel in one transfer.
pub struct DisplayDriver {
    display: Oled,
}

impl DisplayDriver {
    pub fn new(peripherals: DisplayI2cPeripherals) -> anyhow::Result<Self> {
        let i2c = Self::i2c(peripherals)?;
        let interface = I2CDisplayInterface::new_custom_address(i2c, consts::DISPLAY_I2C_ADDR);
        let mut display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        display
            .init()
            .map_err(|e| anyhow::anyhow!("SSD1306 init failed: {:?}", e))?;

        log::info!(
            "Display initialized ({}x{} @ 0x{:02X})",
            consts::WIDTH,
            consts::HEIGHT,
            consts::DISPLAY_I2C_ADDR
        );

        Ok(Self { display })
    }

    fn i2c(peripherals: DisplayI2cPeripherals) -> Result<I2cDriver<'static>, EspError> {
        let config = I2cConfig::new().baudrate(400.kHz().into());
        I2cDriver::new(peripherals.i2c, peripherals.sda, peripherals.scl, &config)
    }

    /// Draw target for the next frame
    pub fn target(&mut self) -> &mut Oled {
        &mut self.display
    }

    pub fn present(&mut self) -> anyhow::Result<()> {
        self.display
            .flush()
            .map_err(|e| anyhow::anyhow!("SSD1306 flush failed: {:?}", e))
    }
}
