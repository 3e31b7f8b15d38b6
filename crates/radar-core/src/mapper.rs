//! Distance to screen coordinate mapping.
//!
//! Each wall is drawn as a line that starts at its own screen edge when the
//! wall is at maximum range and slides towards the center as it gets closer.
//! Front and back share the vertical axis, right and left the horizontal one.

use crate::{consts, input::Wall};

/// Mapped line positions for one frame. Values may fall outside the panel
/// when a reading exceeds the maximum range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coordinates {
    pub front: i32,
    pub back: i32,
    pub right: i32,
    pub left: i32,
}

/// Center row/column each wall converges on. Front and right sit on the
/// center line, back and left one pixel before it.
pub const FRONT_ORIGIN: i32 = consts::HEIGHT as i32 / 2;
pub const BACK_ORIGIN: i32 = FRONT_ORIGIN - 1;
pub const RIGHT_ORIGIN: i32 = consts::WIDTH as i32 / 2;
pub const LEFT_ORIGIN: i32 = RIGHT_ORIGIN - 1;

/// `floor(d / range * extent / 2 + 0.5)`.
pub fn offset(distance_cm: u32, max_range_cm: u32, extent: u32) -> i32 {
    if max_range_cm == 0 {
        return 0;
    }
    let half_extent = extent as f32 / 2.0;
    let scaled = distance_cm as f32 / max_range_cm as f32 * half_extent + 0.5;
    // non-negative, so truncation is floor
    scaled as i32
}

pub fn map_wall(wall: Wall, distance_cm: u32, max_range_cm: u32) -> i32 {
    match wall {
        Wall::Front => FRONT_ORIGIN - offset(distance_cm, max_range_cm, consts::USABLE_HEIGHT),
        Wall::Back => BACK_ORIGIN + offset(distance_cm, max_range_cm, consts::USABLE_HEIGHT),
        Wall::Right => RIGHT_ORIGIN + offset(distance_cm, max_range_cm, consts::USABLE_WIDTH),
        Wall::Left => LEFT_ORIGIN - offset(distance_cm, max_range_cm, consts::USABLE_WIDTH),
    }
}

pub fn map_all(distances: [u32; 4], max_range_cm: u32) -> Coordinates {
    let at = |wall: Wall| map_wall(wall, distances[wall as usize], max_range_cm);
    Coordinates {
        front: at(Wall::Front),
        back: at(Wall::Back),
        right: at(Wall::Right),
        left: at(Wall::Left),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: u32 = consts::MAX_RANGE_CM;

    #[test]
    fn test_zero_distance_sits_on_origin() {
        assert_eq!(map_wall(Wall::Front, 0, R), 16);
        assert_eq!(map_wall(Wall::Back, 0, R), 15);
        assert_eq!(map_wall(Wall::Right, 0, R), 64);
        assert_eq!(map_wall(Wall::Left, 0, R), 63);
    }

    #[test]
    fn test_max_range_reaches_edges() {
        assert_eq!(offset(R, R, consts::USABLE_HEIGHT), 16);
        assert_eq!(map_wall(Wall::Front, R, R), 0);
        assert_eq!(map_wall(Wall::Back, R, R), 31);
        assert_eq!(map_wall(Wall::Right, R, R), 128);
        assert_eq!(map_wall(Wall::Left, R, R), -1);
    }

    #[test]
    fn test_half_range() {
        // 0.5 * 15.5 + 0.5 = 8.25
        assert_eq!(map_wall(Wall::Front, 200, R), 8);
        // 0.5 * 63.5 + 0.5 = 32.25
        assert_eq!(map_wall(Wall::Right, 200, R), 96);
    }

    #[test]
    fn test_monotonic_towards_center() {
        for wall in Wall::ALL {
            let origin = map_wall(wall, 0, R);
            let mut prev_gap = 0;
            for d in 0..=R {
                let gap = (map_wall(wall, d, R) - origin).abs();
                assert!(gap >= prev_gap, "{} not monotonic at {} cm", wall.name(), d);
                prev_gap = gap;
            }
        }
    }

    #[test]
    fn test_beyond_range_is_not_clamped() {
        assert!(map_wall(Wall::Front, 800, R) < 0);
        assert!(map_wall(Wall::Right, 800, R) > consts::WIDTH as i32);
    }

    #[test]
    fn test_map_all() {
        let coords = map_all([0, R, 200, 0], R);
        assert_eq!(
            coords,
            Coordinates { front: 16, back: 31, right: 96, left: 63 }
        );
    }
}
