use embedded_graphics::prelude::DrawTarget;

use crate::{
    consts,
    indicator::IndicatorTrait,
    input::{Input, Wall},
    mapper,
    motion::MotionLatch,
    ranger::RangerError,
    render::Frame,
};

pub struct Engine {
    input: Input,
    frame: Frame,
    debug: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            input: Input::new(),
            frame: Frame::default(),
            debug: consts::DEBUG_MODE,
        }
    }

    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = consts::ColorType>,
    {
        self.frame.draw(target)
    }

    /// Map the latest readings and consume a pending motion latch.
    pub fn update(&mut self, latch: &MotionLatch, indicator: &dyn IndicatorTrait) {
        let distances = self.input.distances();
        let coords = mapper::map_all(distances, consts::MAX_RANGE_CM);
        let motion_marker = latch.consume(indicator);

        log::trace!("distances {:?} -> {:?}", distances, coords);

        self.frame = Frame {
            distances,
            coords,
            motion_marker,
            debug: self.debug,
        };
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
        log::info!("debug overlay {}", if self.debug { "on" } else { "off" });
    }
}

/// Turn a ranger result into the reading that gets drawn. A missing echo
/// reads as 0 cm, which is what the sensor's platform timeout produces.
pub fn reading_or_zero<E: core::fmt::Debug>(
    wall: Wall,
    result: Result<u32, RangerError<E>>,
) -> u32 {
    match result {
        Ok(cm) => cm,
        Err(RangerError::Timeout) => {
            log::debug!("{} sensor: no echo", wall.name());
            0
        }
        Err(e) => {
            log::warn!("{} sensor: {}", wall.name(), e);
            0
        }
    }
}
