// Window + software drawing utilities.
// What lives here:
// 1) A frameless, shaped window that shows the face.
// 2) Anti-aliased ellipses for the eyes.
// 3) A tiny 5x7 bitmap font for the context menu.

use crate::error::Error;
use crate::types::{FaceImage, FrameBuffer, Mask, Point, Pos, Size};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Fully opaque black, the pupil color.
pub const BLACK: u32 = 0xFF_00_00_00;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a borderless window sized to the face image.
    /// `origin` places it on screen; `None` leaves placement to the OS.
    pub fn new(
        title: &str,
        width: usize,
        height: usize,
        topmost: bool,
        origin: Option<Pos>,
    ) -> Result<Self, Error> {
        let options = WindowOptions {
            borderless: true,
            title: false,
            resize: false,
            topmost,
            transparency: true,
            none: true,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        // Keeps the event pump from spinning; the cursor timer is paced separately.
        window.set_target_fps(60);
        if let Some(origin) = origin {
            window.set_position(origin.x as isize, origin.y as isize);
        }
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Process window events without pushing a new frame.
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Returns false when the window was closed by the OS.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    /// Mouse position in window pixel coordinates, `None` while outside the window.
    pub fn mouse_pos(&self) -> Option<Pos> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| Pos::new(x.floor() as i32, y.floor() as i32))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    pub fn right_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Right)
    }

    /// Top-left corner of the window in screen coordinates.
    pub fn position(&self) -> Pos {
        let (x, y) = self.window.get_position();
        Pos::new(x as i32, y as i32)
    }

    pub fn set_position(&mut self, origin: Pos) {
        self.window.set_position(origin.x as isize, origin.y as isize);
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

/* ---------- Software drawing: pixels, ellipses, rectangles ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Mix `color` over the pixel at (x,y) by `coverage` in [0,1]. Result is opaque.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32, coverage: f32) {
    if coverage >= 1.0 {
        put_pixel(fb, x, y, color | 0xFF_00_00_00);
        return;
    }
    if x < 0 || y < 0 || x as usize >= fb.width || y as usize >= fb.height {
        return;
    }
    let idx = y as usize * fb.width + x as usize;
    let old = fb.pixels[idx];

    let mix = |shift: u32| -> u32 {
        let o = ((old >> shift) & 0xFF) as f32;
        let c = ((color >> shift) & 0xFF) as f32;
        ((o + (c - o) * coverage).round().clamp(0.0, 255.0) as u32) << shift
    };
    fb.pixels[idx] = 0xFF_00_00_00 | mix(16) | mix(8) | mix(0);
}

// Subsamples per pixel edge for ellipse anti-aliasing (4x4 = 16 samples).
const AA_SUB: u32 = 4;

/// Fill an ellipse centered at `center` with bounding box `size`, anti-aliased.
/// Pixel (x,y) covers the square [x, x+1) x [y, y+1).
pub fn fill_ellipse(fb: &mut FrameBuffer, center: Point, size: Size, color: u32) {
    let rx = size.width / 2.0;
    let ry = size.height / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }

    let x0 = (center.x - rx).floor() as i32;
    let x1 = (center.x + rx).ceil() as i32;
    let y0 = (center.y - ry).floor() as i32;
    let y1 = (center.y + ry).ceil() as i32;
    let step = 1.0 / AA_SUB as f32;

    for y in y0..y1 {
        for x in x0..x1 {
            let mut hits = 0u32;
            for sy in 0..AA_SUB {
                let py = y as f32 + (sy as f32 + 0.5) * step;
                let dy = (py - center.y) / ry;
                for sx in 0..AA_SUB {
                    let px = x as f32 + (sx as f32 + 0.5) * step;
                    let dx = (px - center.x) / rx;
                    if dx * dx + dy * dy <= 1.0 {
                        hits += 1;
                    }
                }
            }
            if hits > 0 {
                blend_pixel(fb, x, y, color, hits as f32 / (AA_SUB * AA_SUB) as f32);
            }
        }
    }
}

/// Solid axis-aligned rectangle, clipped to the framebuffer.
pub fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    for py in y..y + h {
        for px in x..x + w {
            put_pixel(fb, px, py, color);
        }
    }
}

/// One-pixel rectangle outline.
pub fn stroke_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    if w <= 0 || h <= 0 {
        return;
    }
    fill_rect(fb, x, y, w, 1, color);
    fill_rect(fb, x, y + h - 1, w, 1, color);
    fill_rect(fb, x, y, 1, h, color);
    fill_rect(fb, x + w - 1, y, 1, h, color);
}

/// Copy the face image to the top-left of the framebuffer.
pub fn blit_face(fb: &mut FrameBuffer, image: &FaceImage) {
    let w = image.width.min(fb.width);
    let h = image.height.min(fb.height);
    for y in 0..h {
        let src = &image.pixels[y * image.width..y * image.width + w];
        fb.pixels[y * fb.width..y * fb.width + w].copy_from_slice(src);
    }
}

/// Make everything outside the shape fully transparent and everything
/// inside fully opaque.
pub fn apply_mask(fb: &mut FrameBuffer, mask: &Mask) {
    for y in 0..fb.height {
        for x in 0..fb.width {
            let idx = y * fb.width + x;
            let inside = x < mask.width && y < mask.height && mask.opaque[y * mask.width + x];
            fb.pixels[idx] = if inside { fb.pixels[idx] | 0xFF_00_00_00 } else { 0 };
        }
    }
}

/* ---------- 5x7 bitmap font (uppercase letters for the menu) ---------- */

/// Width of one glyph cell including the 1-pixel spacing.
pub const GLYPH_ADVANCE: i32 = 6;
pub const GLYPH_HEIGHT: i32 = 7;

/// Return a 5x7 glyph bitmap. Lowercase maps to uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        _ => None,
    }
}

/// Draw a single 5x7 character with its top-left at (x,y).
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; unknown characters leave a gap.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += GLYPH_ADVANCE;
    }
}
