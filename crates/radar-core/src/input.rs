#[derive(Debug)]
pub struct Input {
    distances: [u32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    Front = 0,
    Back,
    Right,
    Left,
}

impl Wall {
    /// Measurement order used by every frontend.
    pub const ALL: [Wall; 4] = [Wall::Front, Wall::Back, Wall::Right, Wall::Left];

    pub fn name(&self) -> &'static str {
        match self {
            Wall::Front => "front",
            Wall::Back => "back",
            Wall::Right => "right",
            Wall::Left => "left",
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self { distances: [0; 4] }
    }

    pub fn set_distance(&mut self, wall: Wall, cm: u32) {
        self.distances[wall as usize] = cm;
    }

    pub fn distances(&self) -> [u32; 4] {
        self.distances
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}
