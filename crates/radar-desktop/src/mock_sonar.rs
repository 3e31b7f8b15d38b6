use radar_core::{
    consts,
    input::{Input, Wall},
};

/// Step applied per key press, in centimeters.
pub const STEP_CM: u32 = 10;

/// Upper bound for simulated readings. Past the sensor range so lines can
/// be pushed off screen.
pub const SIM_MAX_CM: u32 = consts::MAX_RANGE_CM * 2;

// Keyboard-driven stand-in for the four ultrasonic sensors
#[derive(Clone, Debug)]
pub struct MockSonars {
    distances: [u32; 4],
    selected: Wall,
    stuck: [bool; 4],
}

impl Default for MockSonars {
    fn default() -> Self {
        Self {
            distances: [consts::MAX_RANGE_CM / 2; 4],
            selected: Wall::Front,
            stuck: [false; 4],
        }
    }
}

impl MockSonars {
    pub fn select(&mut self, wall: Wall) {
        self.selected = wall;
        log::info!(
            "selected {} sensor ({} cm)",
            wall.name(),
            self.distances[wall as usize]
        );
    }

    pub fn adjust(&mut self, increase: bool) {
        let d = &mut self.distances[self.selected as usize];
        *d = if increase {
            (*d + STEP_CM).min(SIM_MAX_CM)
        } else {
            d.saturating_sub(STEP_CM)
        };
        log::debug!("{} sensor -> {} cm", self.selected.name(), *d);
    }

    /// Simulate an echo line that never answers on the selected sensor.
    pub fn toggle_stuck(&mut self) {
        let stuck = &mut self.stuck[self.selected as usize];
        *stuck = !*stuck;
        log::info!(
            "{} sensor echo {}",
            self.selected.name(),
            if *stuck { "stuck" } else { "restored" }
        );
    }

    /// Sample every sensor in measurement order. A stuck echo reads as 0 cm,
    /// the same as a timed out ping on hardware.
    pub fn apply_to_input(&self, input: &mut Input) {
        for wall in Wall::ALL {
            let idx = wall as usize;
            let cm = if self.stuck[idx] { 0 } else { self.distances[idx] };
            input.set_distance(wall, cm);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_is_bounded() {
        let mut sonars = MockSonars::default();
        sonars.select(Wall::Left);
        for _ in 0..200 {
            sonars.adjust(true);
        }
        let mut input = Input::new();
        sonars.apply_to_input(&mut input);
        assert_eq!(input.distances()[Wall::Left as usize], SIM_MAX_CM);

        for _ in 0..200 {
            sonars.adjust(false);
        }
        sonars.apply_to_input(&mut input);
        assert_eq!(input.distances()[Wall::Left as usize], 0);
        assert_eq!(input.distances()[Wall::Front as usize], consts::MAX_RANGE_CM / 2);
    }

    #[test]
    fn test_stuck_sensor_reads_zero() {
        let mut sonars = MockSonars::default();
        sonars.select(Wall::Back);
        sonars.toggle_stuck();

        let mut input = Input::new();
        sonars.apply_to_input(&mut input);
        assert_eq!(input.distances()[Wall::Back as usize], 0);
        assert_eq!(input.distances()[Wall::Right as usize], consts::MAX_RANGE_CM / 2);
    }
}
