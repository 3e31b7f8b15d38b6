use std::sync::Arc;
use std::thread;
use std::time::Duration;

use embedded_graphics::prelude::Size;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{
    BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use radar_core::consts;
use radar_core::engine::Engine;
use radar_core::input::Wall;
use radar_core::motion::MotionLatch;

use crate::indicator::DesktopIndicator;
use crate::mock_sonar::MockSonars;

mod indicator;
mod log_capture;
mod mock_sonar;

static MOTION: MotionLatch = MotionLatch::new();

/// Runs the periodic motion window on its own thread, standing in for the
/// hardware timer callback.
fn spawn_motion_timer(indicator: Arc<DesktopIndicator>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("motion_timer".to_string())
        .spawn(move || loop {
            thread::sleep(Duration::from_millis(consts::MOTION_PERIOD_MS as u64));
            MOTION.on_period(&*indicator);
        })?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    log_capture::init();

    let mut display =
        SimulatorDisplay::<consts::ColorType>::new(Size::new(consts::WIDTH, consts::HEIGHT));
    let settings = OutputSettingsBuilder::new()
        .theme(BinaryColorTheme::OledBlue)
        .scale(4)
        .pixel_spacing(1)
        .build();

    let mut window = Window::new("radar-desktop", &settings);
    window.set_max_fps(30);
    let mut engine = Engine::new();
    let mut sonars = MockSonars::default();
    let indicator = Arc::new(DesktopIndicator::default());
    window.update(&display);

    spawn_motion_timer(indicator.clone())?;

    log::info!("f/b/r/l select a sensor, w/s move its wall, t sticks its echo");
    log::info!("m pulses the motion input, g toggles the debug overlay");

    'running: loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => {
                    break 'running;
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => match keycode {
                    Keycode::F => sonars.select(Wall::Front),
                    Keycode::B => sonars.select(Wall::Back),
                    Keycode::R => sonars.select(Wall::Right),
                    Keycode::L => sonars.select(Wall::Left),
                    Keycode::W => sonars.adjust(true),
                    Keycode::S => sonars.adjust(false),
                    Keycode::T if !repeat => sonars.toggle_stuck(),
                    Keycode::G if !repeat => engine.toggle_debug(),
                    Keycode::M if !repeat => MOTION.record_edge(),
                    _ => (),
                },
                _ => (),
            }
        }

        sonars.apply_to_input(engine.input_mut());
        engine.update(&MOTION, &*indicator);
        engine.render(&mut display)?;
        window.update(&display);
    }

    Ok(())
}
