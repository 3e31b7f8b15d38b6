use core::fmt::Write as _;

use embedded_graphics::{
    Drawable as _, Pixel,
    mono_font::{MonoTextStyle, MonoTextStyleBuilder, ascii::FONT_5X7},
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point, Primitive},
    primitives::{Line, PrimitiveStyle},
    text::{Baseline, Text},
};

use crate::{consts, input::Wall, mapper::Coordinates};

/// Column of each raw distance readout in debug mode, in `Wall::ALL` order.
const DEBUG_DISTANCE_X: [i32; 4] = [0, 30, 60, 90];
const DEBUG_DISTANCE_Y: i32 = 20;
const DEBUG_COORDS_POS: Point = Point::new(0, 10);
const MOTION_MARKER_POS: Point = Point::new(0, 0);
const RANGE_LABEL_POS: Point = Point::new(116, 25);
const CENTER_PIXEL: Point = Point::new(63, 15);

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub distances: [u32; 4],
    pub coords: Coordinates,
    pub motion_marker: bool,
    pub debug: bool,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            distances: [0; 4],
            coords: Coordinates::default(),
            motion_marker: false,
            debug: consts::DEBUG_MODE,
        }
    }
}

impl Frame {
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = consts::ColorType>,
    {
        target.clear(BinaryColor::Off)?;

        let text_style = MonoTextStyleBuilder::new()
            .font(&FONT_5X7)
            .text_color(BinaryColor::On)
            .build();

        if self.debug {
            self.draw_debug(target, text_style)?;
        }

        let line_style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        let (w, h) = (consts::WIDTH as i32, consts::HEIGHT as i32);

        for y in [self.coords.front, self.coords.back] {
            Line::new(Point::new(0, y), Point::new(w, y))
                .into_styled(line_style)
                .draw(target)?;
        }
        for x in [self.coords.right, self.coords.left] {
            Line::new(Point::new(x, 0), Point::new(x, h))
                .into_styled(line_style)
                .draw(target)?;
        }

        if self.motion_marker {
            Text::with_baseline("+", MOTION_MARKER_POS, text_style, Baseline::Top).draw(target)?;
        }

        let mut label = heapless::String::<8>::new();
        let _ = write!(label, "{}M", consts::MAX_RANGE_CM / 100);
        Text::with_baseline(label.as_str(), RANGE_LABEL_POS, text_style, Baseline::Top)
            .draw(target)?;

        Pixel(CENTER_PIXEL, BinaryColor::On).draw(target)?;

        Ok(())
    }

    fn draw_debug<D>(
        &self,
        target: &mut D,
        style: MonoTextStyle<'_, BinaryColor>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = consts::ColorType>,
    {
        for (wall, x) in Wall::ALL.iter().zip(DEBUG_DISTANCE_X) {
            let mut text = heapless::String::<12>::new();
            let _ = write!(text, "{}", self.distances[*wall as usize]);
            let pos = Point::new(x, DEBUG_DISTANCE_Y);
            Text::with_baseline(text.as_str(), pos, style, Baseline::Top).draw(target)?;
        }

        let c = &self.coords;
        let mut text = heapless::String::<48>::new();
        let _ = write!(text, "{} {} {} {}", c.front, c.back, c.right, c.left);
        Text::with_baseline(text.as_str(), DEBUG_COORDS_POS, style, Baseline::Top).draw(target)?;

        Ok(())
    }
}
