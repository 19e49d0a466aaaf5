use crate::error::{Chip8Error, Result};

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;
pub const PIXEL_COUNT: usize = WIDTH * HEIGHT;

/// Handles the graphics state of the `Chip8`.
///
/// Pixels are stored row-major in a flat buffer, pixel `(x, y)`
/// lives at `y * WIDTH + x`.
#[derive(Clone, Copy)]
pub struct GraphicsBuffer {
    vram: [bool; PIXEL_COUNT],
}

impl Default for GraphicsBuffer {
    fn default() -> Self {
        Self {
            vram: [false; PIXEL_COUNT],
        }
    }
}

impl GraphicsBuffer {
    /// Create a new empty `GraphicsBuffer`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a byte as one sprite row with its top left corner at `(x, y)`.
    ///
    /// Coordinates wrap around both edges of the screen. Each set bit is
    /// XORed into the buffer, most significant bit leftmost.
    /// Returns whether any lit pixel was turned off.
    pub fn draw_byte(&mut self, x: usize, y: usize, data: u8) -> bool {
        let row = (y % HEIGHT) * WIDTH;

        let mut collision = false;
        // iterate bits
        for b in 0..8 {
            if data & (0x80 >> b) == 0 {
                continue;
            }
            let pos = row + (x + b) % WIDTH;
            collision |= self.vram[pos];
            self.vram[pos] = !self.vram[pos];
        }
        collision
    }

    /// Returns whether the pixel at `(x, y)` is lit.
    pub fn pixel_at(&self, x: usize, y: usize) -> Result<bool> {
        if x >= WIDTH {
            return Err(Chip8Error::OutOfBounds {
                what: "framebuffer x",
                position: x,
                limit: WIDTH,
            });
        }
        if y >= HEIGHT {
            return Err(Chip8Error::OutOfBounds {
                what: "framebuffer y",
                position: y,
                limit: HEIGHT,
            });
        }
        Ok(self.vram[y * WIDTH + x])
    }

    /// The whole buffer, row-major.
    pub fn pixels(&self) -> &[bool; PIXEL_COUNT] {
        &self.vram
    }

    /// Iterate over the rows of the buffer from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels().chunks_exact(WIDTH)
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> usize {
        self.pixels().iter().filter(|lit| **lit).count()
    }

    /// Turn every pixel off.
    #[inline]
    pub fn clear(&mut self) {
        self.vram = [false; PIXEL_COUNT];
    }
}
