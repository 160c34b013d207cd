//! Page-sized drawing surfaces in template pixel space
//!
//! A surface is the blank template raster plus an ordered list of vector
//! draw commands. Coordinates use the raster convention: origin at the top
//! left, y growing downwards.

use image::{Rgb, RgbImage, imageops};

/// Which of the two loaded fonts a text command uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    Label,
    Coordinate,
}

/// Point of the text box that sits on the command's (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Right edge, top of the ascender
    RightTop,
    /// Horizontal and vertical middle
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled square with its top-left corner at (x, y)
    FillSquare {
        x: f32,
        y: f32,
        size: f32,
        color: Rgb<u8>,
    },
    /// Single line of text anchored at (x, y)
    Text {
        text: String,
        x: f32,
        y: f32,
        anchor: TextAnchor,
        font: FontRole,
        size: f32,
        color: Rgb<u8>,
        /// Drawn rotated by 180° about the anchor
        upside_down: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    background: RgbImage,
    commands: Vec<DrawCommand>,
}

impl Surface {
    pub fn new(background: RgbImage) -> Self {
        Self {
            background,
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.background.width()
    }

    pub fn height(&self) -> u32 {
        self.background.height()
    }

    pub fn background(&self) -> &RgbImage {
        &self.background
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn fill_square(&mut self, x: f32, y: f32, size: f32, color: Rgb<u8>) {
        self.commands.push(DrawCommand::FillSquare { x, y, size, color });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        anchor: TextAnchor,
        font: FontRole,
        size: f32,
        color: Rgb<u8>,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            x,
            y,
            anchor,
            font,
            size,
            color,
            upside_down: false,
        });
    }

    /// Turn the whole page by 180° about its center, the way a sheet looks
    /// after being flipped over its long edge and held up to the light.
    pub fn rotated_180(self) -> Self {
        let width = self.width() as f32;
        let height = self.height() as f32;
        let background = imageops::rotate180(&self.background);

        let commands = self
            .commands
            .into_iter()
            .map(|command| match command {
                DrawCommand::FillSquare { x, y, size, color } => DrawCommand::FillSquare {
                    x: width - x - size,
                    y: height - y - size,
                    size,
                    color,
                },
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    anchor,
                    font,
                    size,
                    color,
                    upside_down,
                } => DrawCommand::Text {
                    text,
                    x: width - x,
                    y: height - y,
                    anchor,
                    font,
                    size,
                    color,
                    upside_down: !upside_down,
                },
            })
            .collect();

        Self {
            background,
            commands,
        }
    }
}

/// Turn a portrait template into landscape (90° counter-clockwise).
pub fn orient_landscape(template: RgbImage) -> RgbImage {
    if template.height() > template.width() {
        imageops::rotate270(&template)
    } else {
        template
    }
}
