// The right-click menu, drawn by hand inside the window:
// one checkable row per face, a separator, then "Quit".

use crate::draw::{draw_text_5x7, fill_rect, stroke_rect, GLYPH_ADVANCE, GLYPH_HEIGHT};
use crate::types::{FrameBuffer, Pos};

const PAD: i32 = 3;
const BORDER: i32 = 1;
const ROW_H: i32 = GLYPH_HEIGHT + 2;
const SEPARATOR_H: i32 = 5;
const CHECK_W: i32 = 8; // column left of the text holding the check mark

const MENU_BG: u32 = 0xFF_F0_F0_F0;
const MENU_EDGE: u32 = 0xFF_80_80_80;
const MENU_TEXT: u32 = 0xFF_00_00_00;
const HIGHLIGHT: u32 = 0xFF_33_66_CC;
const HIGHLIGHT_TEXT: u32 = 0xFF_FF_FF_FF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Face(&'static str),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Item(MenuItem),
    Separator,
}

impl Row {
    fn height(self) -> i32 {
        match self {
            Row::Item(_) => ROW_H,
            Row::Separator => SEPARATOR_H,
        }
    }
}

pub struct ContextMenu {
    origin: Pos, // top-left, window-local
    width: i32,
    height: i32,
    rows: Vec<Row>,
    checked: &'static str,
    hovered: Option<usize>, // row index
}

impl ContextMenu {
    /// Lay out the menu at `at`, shifted so it stays inside a `bounds`-sized window
    /// where possible.
    pub fn new<I>(faces: I, checked: &'static str, at: Pos, bounds: (usize, usize)) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        let mut rows: Vec<Row> = faces.into_iter().map(|n| Row::Item(MenuItem::Face(n))).collect();
        rows.push(Row::Separator);
        rows.push(Row::Item(MenuItem::Quit));

        let longest = rows
            .iter()
            .map(|r| match r {
                Row::Item(MenuItem::Face(n)) => n.chars().count(),
                Row::Item(MenuItem::Quit) => "Quit".len(),
                Row::Separator => 0,
            })
            .max()
            .unwrap_or(0) as i32;

        let width = 2 * (BORDER + PAD) + CHECK_W + longest * GLYPH_ADVANCE;
        let height = 2 * (BORDER + PAD) + rows.iter().map(|r| r.height()).sum::<i32>();

        let origin = Pos::new(
            at.x.min(bounds.0 as i32 - width).max(0),
            at.y.min(bounds.1 as i32 - height).max(0),
        );

        Self { origin, width, height, rows, checked, hovered: None }
    }

    pub fn contains(&self, local: Pos) -> bool {
        let p = local - self.origin;
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Row index under `local`, if any.
    fn row_at(&self, local: Pos) -> Option<usize> {
        if !self.contains(local) {
            return None;
        }
        let mut top = self.origin.y + BORDER + PAD;
        for (i, row) in self.rows.iter().enumerate() {
            let bottom = top + row.height();
            if local.y >= top && local.y < bottom {
                return Some(i);
            }
            top = bottom;
        }
        None
    }

    /// Item under `local`; separator and padding yield nothing.
    pub fn item_at(&self, local: Pos) -> Option<MenuItem> {
        match self.row_at(local).map(|i| self.rows[i]) {
            Some(Row::Item(item)) => Some(item),
            _ => None,
        }
    }

    /// Track the highlighted row. Returns true when it changed.
    pub fn hover(&mut self, local: Pos) -> bool {
        let next = self
            .row_at(local)
            .filter(|&i| matches!(self.rows[i], Row::Item(_)));
        let changed = next != self.hovered;
        self.hovered = next;
        changed
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        let Pos { x: ox, y: oy } = self.origin;
        fill_rect(fb, ox, oy, self.width, self.height, MENU_BG);
        stroke_rect(fb, ox, oy, self.width, self.height, MENU_EDGE);

        let inner_x = ox + BORDER;
        let inner_w = self.width - 2 * BORDER;
        let mut top = oy + BORDER + PAD;

        for (i, row) in self.rows.iter().enumerate() {
            match row {
                Row::Separator => {
                    fill_rect(fb, inner_x + PAD, top + SEPARATOR_H / 2, inner_w - 2 * PAD, 1, MENU_EDGE);
                }
                Row::Item(item) => {
                    let text_color = if self.hovered == Some(i) {
                        fill_rect(fb, inner_x, top, inner_w, ROW_H, HIGHLIGHT);
                        HIGHLIGHT_TEXT
                    } else {
                        MENU_TEXT
                    };
                    let label = match item {
                        MenuItem::Face(name) => {
                            if *name == self.checked {
                                fill_rect(fb, inner_x + PAD + 1, top + 3, 3, 3, text_color);
                            }
                            *name
                        }
                        MenuItem::Quit => "Quit",
                    };
                    draw_text_5x7(fb, inner_x + PAD + CHECK_W, top + 1, label, text_color);
                }
            }
            top += row.height();
        }
    }
}
