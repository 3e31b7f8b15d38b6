use esp_idf_hal::delay::FreeRtos;

use radar_core::engine::Engine;
use radar_core::motion::MotionLatch;

mod peripherals;

use peripherals::{DisplayDriver, MotionDriver, SonarDriver, SystemPeripherals};

/// Shared by the PIR interrupt, the period timer and the main loop
static MOTION: MotionLatch = MotionLatch::new();

/// Idle time per frame so the idle task can feed the task watchdog
const FRAME_YIELD_MS: u32 = 1;

fn main() {
    // It is necessary to call this function once. Otherwise, some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("Radar ESP32 starting...");

    if let Err(e) = run() {
        log::error!("Radar stopped: {:?}", e);
    }
}

fn run() -> anyhow::Result<()> {
    let peripherals = SystemPeripherals::take()?;

    let mut display = DisplayDriver::new(peripherals.display)?;
    let mut sonars = SonarDriver::new(peripherals.sonars)?;
    let motion = MotionDriver::new(peripherals.motion, &MOTION)?;

    let mut engine = Engine::new();
    log::info!("Engine initialized, entering main loop");

    let mut frame_count = 0u32;

    loop {
        sonars.apply_to_input(engine.input_mut());
        engine.update(&MOTION, motion.indicator());

        if engine.frame().motion_marker {
            log::info!("Motion detected");
        }

        engine
            .render(display.target())
            .map_err(|e| anyhow::anyhow!("render failed: {:?}", e))?;
        display.present()?;

        if frame_count % 100 == 0 {
            let frame = engine.frame();
            log::debug!(
                "frame {}: distances {:?} coords {:?}, {} motion edges pending",
                frame_count,
                frame.distances,
                frame.coords,
                MOTION.pending_edges()
            );
        }
        frame_count = frame_count.wrapping_add(1);

        FreeRtos::delay_ms(FRAME_YIELD_MS);
    }
}
