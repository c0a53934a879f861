//! The scene drawn on the registered display: one screen holding labels

use embedded_graphics::mono_font::iso_8859_15::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

/// Convert a 24-bit `0xRRGGBB` value to the panel color format
pub fn color_hex(rgb: u32) -> Rgb565 {
    let [_, r, g, b] = rgb.to_be_bytes();
    Rgb565::from(Rgb888::new(r, g, b))
}

/// Anchor of a widget inside the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    TopLeft,
    Center,
}

/// A line of text in the 10x20 ISO-8859-15 font
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    color: Rgb565,
    align: Align,
    offset: Point,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Label {
            text: text.into(),
            color: Rgb565::BLACK,
            align: Align::TopLeft,
            offset: Point::zero(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn with_text_color(mut self, color: Rgb565) -> Self {
        self.color = color;
        self
    }

    /// Place the label at `align`, shifted by (`x_ofs`, `y_ofs`)
    pub fn aligned(mut self, align: Align, x_ofs: i32, y_ofs: i32) -> Self {
        self.align = align;
        self.offset = Point::new(x_ofs, y_ofs);
        self
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let size = target.bounding_box().size;
        let (w, h) = (size.width as i32, size.height as i32);

        let (anchor, alignment, baseline) = match self.align {
            Align::TopLeft => (Point::zero(), Alignment::Left, Baseline::Top),
            Align::Center => (Point::new(w / 2, h / 2), Alignment::Center, Baseline::Middle),
        };

        let character_style = MonoTextStyle::new(&FONT_10X20, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();

        Text::with_text_style(&self.text, anchor + self.offset, character_style, text_style)
            .draw(target)?;
        Ok(())
    }
}

/// Background plus the labels drawn on top of it, back to front
#[derive(Debug, Clone)]
pub struct Screen {
    background: Rgb565,
    labels: Vec<Label>,
}

impl Default for Screen {
    fn default() -> Self {
        Screen {
            background: Rgb565::WHITE,
            labels: Vec::new(),
        }
    }
}

impl Screen {
    pub fn set_bg_color(&mut self, color: Rgb565) {
        self.background = color;
    }

    pub fn bg_color(&self) -> Rgb565 {
        self.background
    }

    pub fn add_label(&mut self, label: Label) {
        self.labels.push(label);
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Paint the whole screen into `target`
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.clear(self.background)?;
        for label in &self.labels {
            label.draw(target)?;
        }
        Ok(())
    }
}
