// The face widget: everything that happens between "the cursor moved" and
// "the eyes were repainted", with no window attached. The host loop feeds
// it `Event`s and carries out the `Action`s it returns.

use crate::assets::{Face, FaceLibrary};
use crate::draw::{apply_mask, blit_face};
use crate::error::Error;
use crate::eye::Eye;
use crate::menu::{ContextMenu, MenuItem};
use crate::types::{FrameBuffer, Point, Pos};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The window is on screen with its top-left at `origin`.
    Shown { origin: Pos },
    /// The window's top-left as the OS currently reports it.
    Moved { origin: Pos },
    /// Periodic cursor sample, screen coordinates.
    Tick { cursor: Pos },
    SelectFace(String),
    PrimaryPress { local: Pos, screen: Pos },
    /// Primary button held while the pointer moves.
    PrimaryDrag { screen: Pos },
    PrimaryRelease,
    SecondaryPress { local: Pos },
    /// Pointer moved inside the window (only matters while the menu is open).
    Hover { local: Pos },
    /// Close the menu without picking anything.
    Dismiss,
}

/// What the host has to do to the real window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MoveWindow(Pos),
    FaceChanged { title: &'static str, width: usize, height: usize },
    Quit,
}

pub struct FaceWidget<'a> {
    library: &'a FaceLibrary,
    current: usize,
    eyes: [Eye; 2],
    cursor: Pos,      // last sampled cursor, screen coordinates
    origin: Pos,      // window top-left, screen coordinates
    drag_anchor: Pos, // press point minus origin
    dragging: bool,
    visible: bool,
    dirty: bool,
    repaint_requests: u64, // coalesced or not
    menu: Option<ContextMenu>,
}

impl<'a> FaceWidget<'a> {
    /// Start with the face picked by `select`, which receives the number of
    /// faces and returns an index.
    pub fn new<F>(library: &'a FaceLibrary, cursor: Pos, select: F) -> Result<Self, Error>
    where
        F: FnOnce(usize) -> usize,
    {
        if library.is_empty() {
            return Err(Error::UnknownFace("<no faces loaded>".into()));
        }
        let start = select(library.len()).min(library.len() - 1);
        let face = library.get(start);

        let mut widget = Self {
            library,
            current: start,
            eyes: face.preset.eyes.map(Eye::from),
            cursor,
            origin: Pos::default(),
            drag_anchor: Pos::default(),
            dragging: false,
            visible: false,
            dirty: false,
            repaint_requests: 0,
            menu: None,
        };
        widget.request_repaint();
        tracing::info!(face = face.preset.name, "starting face");
        Ok(widget)
    }

    pub fn face(&self) -> &'a Face {
        self.library.get(self.current)
    }

    pub fn origin(&self) -> Pos {
        self.origin
    }

    pub fn needs_paint(&self) -> bool {
        self.dirty
    }

    /// The cursor as seen from inside the window.
    fn local_cursor(&self) -> Point {
        (self.cursor - self.origin).to_point()
    }

    fn request_repaint(&mut self) {
        self.repaint_requests += 1;
        self.dirty = true;
    }

    fn request_repaint_if_visible(&mut self) {
        if self.visible {
            self.request_repaint();
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Result<Option<Action>, Error> {
        match event {
            Event::Shown { origin } => {
                self.visible = true;
                self.origin = origin;
                self.request_repaint();
                Ok(None)
            }
            Event::Moved { origin } => {
                // Our own drag is ahead of what the OS reports back.
                if !self.dragging && origin != self.origin {
                    self.origin = origin;
                    self.request_repaint_if_visible();
                }
                Ok(None)
            }
            Event::Tick { cursor } => {
                if cursor != self.cursor {
                    self.cursor = cursor;
                    self.request_repaint_if_visible();
                }
                Ok(None)
            }
            Event::SelectFace(name) => self.select_face(&name).map(Some),
            Event::PrimaryPress { local, screen } => self.primary_press(local, screen),
            Event::PrimaryDrag { screen } => {
                if !self.dragging {
                    return Ok(None);
                }
                self.origin = screen - self.drag_anchor;
                // The window moved under the cursor, so the eyes look elsewhere.
                self.request_repaint_if_visible();
                Ok(Some(Action::MoveWindow(self.origin)))
            }
            Event::PrimaryRelease => {
                self.dragging = false;
                Ok(None)
            }
            Event::SecondaryPress { local } => {
                // Cut-away pixels belong to whatever is behind the window.
                if !self.face().mask.contains(local) {
                    return Ok(None);
                }
                self.dragging = false;
                let face = self.face();
                self.menu = Some(ContextMenu::new(
                    self.library.names(),
                    face.preset.name,
                    local,
                    (face.image.width, face.image.height),
                ));
                self.request_repaint_if_visible();
                Ok(None)
            }
            Event::Hover { local } => {
                let changed = self.menu.as_mut().is_some_and(|m| m.hover(local));
                if changed {
                    self.request_repaint_if_visible();
                }
                Ok(None)
            }
            Event::Dismiss => {
                self.close_menu();
                Ok(None)
            }
        }
    }

    fn primary_press(&mut self, local: Pos, screen: Pos) -> Result<Option<Action>, Error> {
        let Some(menu) = &self.menu else {
            if self.face().mask.contains(local) {
                self.drag_anchor = screen - self.origin;
                self.dragging = true;
            }
            return Ok(None);
        };

        let (item, inside) = (menu.item_at(local), menu.contains(local));
        match item {
            Some(MenuItem::Face(name)) => {
                self.close_menu();
                self.select_face(name).map(Some)
            }
            Some(MenuItem::Quit) => {
                tracing::info!("quit requested from menu");
                self.close_menu();
                Ok(Some(Action::Quit))
            }
            // Separator and padding keep the menu open.
            None if inside => Ok(None),
            None => {
                self.close_menu();
                Ok(None)
            }
        }
    }

    fn close_menu(&mut self) {
        if self.menu.take().is_some() {
            self.request_repaint_if_visible();
        }
    }

    fn select_face(&mut self, name: &str) -> Result<Action, Error> {
        let index = self
            .library
            .index_of(name)
            .ok_or_else(|| Error::UnknownFace(name.to_string()))?;
        self.current = index;

        let face = self.library.get(index);
        self.eyes = face.preset.eyes.map(Eye::from);
        self.request_repaint_if_visible();
        tracing::info!(face = face.preset.name, "face switched");

        Ok(Action::FaceChanged {
            title: face.preset.name,
            width: face.image.width,
            height: face.image.height,
        })
    }

    /// Draw the face, both eyes and the open menu. `fb` must match the face size.
    pub fn paint(&mut self, fb: &mut FrameBuffer) {
        let face = self.face();
        fb.pixels.fill(0);
        blit_face(fb, &face.image);

        let pointer = self.local_cursor();
        for eye in &self.eyes {
            eye.render(pointer, fb);
        }

        apply_mask(fb, &face.mask);
        if let Some(menu) = &self.menu {
            menu.render(fb);
        }
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BLACK;
    use crate::eye::PUPIL_SIZE;
    use crate::faces::PRESETS;
    use crate::types::FaceImage;

    const W: usize = 130;
    const H: usize = 120;
    const BG: u32 = 0xFF_FF_FF_FF;
    const SKIN: u32 = 0xFF_E0_B0_90;

    // White frame around a skin-colored face covering x,y in 10..W-10.
    fn synthetic_face() -> FaceImage {
        let mut pixels = vec![BG; W * H];
        for y in 10..H - 10 {
            for x in 10..W - 10 {
                pixels[y * W + x] = SKIN;
            }
        }
        FaceImage { width: W, height: H, pixels }
    }

    fn library() -> FaceLibrary {
        FaceLibrary::from_images(PRESETS.iter().map(|p| (p, synthetic_face())))
    }

    fn eva(library: &FaceLibrary) -> FaceWidget<'_> {
        let mut w = FaceWidget::new(library, Pos::new(0, 0), |_| 0).expect("library has faces");
        w.handle_event(Event::SelectFace("Eva".into())).expect("Eva preset");
        w
    }

    const ORIGIN: Pos = Pos::new(100, 200);

    fn shown(library: &FaceLibrary) -> FaceWidget<'_> {
        let mut w = eva(library);
        w.handle_event(Event::Shown { origin: ORIGIN }).unwrap();
        w
    }

    fn pupil_centers(w: &FaceWidget<'_>) -> [Point; 2] {
        let pointer = w.local_cursor();
        w.eyes.map(|eye| eye.pupil_center(pointer))
    }

    fn eye_center(eye: &Eye) -> Pos {
        Pos::new(eye.center.x as i32, eye.center.y as i32)
    }

    #[test]
    fn selector_picks_starting_face() {
        let lib = library();
        let w = FaceWidget::new(&lib, Pos::default(), |n| {
            assert_eq!(n, 5);
            4
        })
        .unwrap();
        assert_eq!(w.face().preset.name, "Sebastian");
        assert!(w.needs_paint());
    }

    #[test]
    fn unknown_face_is_an_error_before_showing() {
        let lib = library();
        let mut w = eva(&lib);
        assert!(matches!(
            w.handle_event(Event::SelectFace("Nobody".into())),
            Err(Error::UnknownFace(_))
        ));
        assert_eq!(w.face().preset.name, "Eva");
    }

    #[test]
    fn empty_library_is_rejected() {
        let lib = FaceLibrary::from_images(Vec::new());
        assert!(FaceWidget::new(&lib, Pos::default(), |_| 0).is_err());
    }

    #[test]
    fn cursor_on_each_eye_center_centers_that_pupil() {
        let lib = library();
        let mut w = shown(&lib);
        for i in 0..2 {
            let eye = w.eyes[i];
            w.handle_event(Event::Tick { cursor: ORIGIN + eye_center(&eye) }).unwrap();
            assert_eq!(pupil_centers(&w)[i], eye.center);
        }
    }

    #[test]
    fn far_right_cursor_pins_both_pupils() {
        let lib = library();
        let mut w = shown(&lib);
        let first = w.eyes[0];
        let cursor = ORIGIN + eye_center(&first) + Pos::new(1000, 0);
        w.handle_event(Event::Tick { cursor }).unwrap();

        for (eye, pupil) in w.eyes.iter().zip(pupil_centers(&w)) {
            let bound = (eye.size.width - PUPIL_SIZE.width) / 2.0;
            assert!((pupil.x - eye.center.x - bound).abs() < 1e-3, "{pupil:?}");
            assert!((pupil.y - eye.center.y).abs() < 1e-3);
        }
    }

    #[test]
    fn unchanged_cursor_does_not_request_repaint() {
        let lib = library();
        let mut w = shown(&lib);
        w.handle_event(Event::Tick { cursor: Pos::new(5, 5) }).unwrap();
        let before = w.repaint_requests;
        w.handle_event(Event::Tick { cursor: Pos::new(5, 5) }).unwrap();
        w.handle_event(Event::Tick { cursor: Pos::new(5, 5) }).unwrap();
        assert_eq!(w.repaint_requests, before);
    }

    #[test]
    fn hidden_widget_tracks_cursor_without_repainting() {
        let lib = library();
        let mut w = eva(&lib);
        let before = w.repaint_requests;
        w.handle_event(Event::Tick { cursor: Pos::new(40, 40) }).unwrap();
        assert_eq!(w.repaint_requests, before);
        assert_eq!(pupil_centers(&w), w.eyes.map(|e| e.pupil_center(Point::new(40.0, 40.0))));
    }

    #[test]
    fn requests_coalesce_until_paint() {
        let lib = library();
        let mut w = shown(&lib);
        w.handle_event(Event::Tick { cursor: Pos::new(1, 1) }).unwrap();
        w.handle_event(Event::Tick { cursor: Pos::new(2, 2) }).unwrap();
        assert!(w.needs_paint());

        let mut fb = FrameBuffer::new(W, H);
        w.paint(&mut fb);
        assert!(!w.needs_paint());
    }

    #[test]
    fn paint_draws_face_eyes_and_shape() {
        let lib = library();
        let mut w = shown(&lib);
        let eye = w.eyes[0];
        w.handle_event(Event::Tick { cursor: ORIGIN + eye_center(&eye) }).unwrap();

        let mut fb = FrameBuffer::new(W, H);
        w.paint(&mut fb);
        let c = eye_center(&eye);
        assert_eq!(fb.pixels[c.y as usize * W + c.x as usize], BLACK);
        assert_eq!(fb.pixels[0], 0, "background is cut out");
        assert_eq!(fb.pixels[20 * W + 20], SKIN);
    }

    #[test]
    fn face_switch_replaces_eyes_and_repaints_immediately() {
        let lib = library();
        let mut w = shown(&lib);
        let before = w.repaint_requests;

        let action = w.handle_event(Event::SelectFace("Adrian".into())).unwrap();
        assert_eq!(action, Some(Action::FaceChanged { title: "Adrian", width: W, height: H }));
        assert_eq!(w.face().preset.name, "Adrian");
        assert_eq!(w.eyes[1].center, Point::new(74.0, 68.0));
        assert_eq!(w.repaint_requests, before + 1);

        assert!(w.handle_event(Event::SelectFace("Nobody".into())).is_err());
        assert_eq!(w.face().preset.name, "Adrian");
    }

    #[test]
    fn drag_moves_window_by_pointer_delta() {
        let lib = library();
        let mut w = shown(&lib);
        let local = Pos::new(30, 30);
        w.handle_event(Event::PrimaryPress { local, screen: ORIGIN + local }).unwrap();

        let action = w.handle_event(Event::PrimaryDrag { screen: Pos::new(-500, 40) }).unwrap();
        assert_eq!(action, Some(Action::MoveWindow(Pos::new(-530, 10))));
        assert_eq!(w.origin(), Pos::new(-530, 10));

        w.handle_event(Event::PrimaryRelease).unwrap();
        assert_eq!(w.handle_event(Event::PrimaryDrag { screen: Pos::new(0, 0) }).unwrap(), None);
    }

    #[test]
    fn press_on_transparent_area_does_not_drag() {
        let lib = library();
        let mut w = shown(&lib);
        let local = Pos::new(2, 2);
        w.handle_event(Event::PrimaryPress { local, screen: ORIGIN + local }).unwrap();
        assert_eq!(w.handle_event(Event::PrimaryDrag { screen: Pos::new(0, 0) }).unwrap(), None);
    }

    // Menu opened at the window's top-left; rows start below border + padding.
    fn open_menu(w: &mut FaceWidget<'_>) {
        let before = w.repaint_requests;
        w.handle_event(Event::SecondaryPress { local: MENU_AT }).unwrap();
        assert!(w.menu.is_some());
        assert_eq!(w.repaint_requests, before + 1);
    }

    // Inside the face, far enough from the edges that the menu isn't shifted.
    const MENU_AT: Pos = Pos::new(10, 10);

    fn row(i: i32) -> Pos {
        Pos::new(MENU_AT.x + 20, MENU_AT.y + 4 + i * 9 + 4)
    }

    #[test]
    fn menu_pick_switches_face() {
        let lib = library();
        let mut w = shown(&lib);
        open_menu(&mut w);
        let before = w.repaint_requests;
        w.handle_event(Event::Hover { local: row(4) }).unwrap();
        assert_eq!(w.repaint_requests, before + 1);
        // same row again: nothing to redraw
        w.handle_event(Event::Hover { local: row(4) }).unwrap();
        assert_eq!(w.repaint_requests, before + 1);

        let action = w.handle_event(Event::PrimaryPress { local: row(4), screen: Pos::default() }).unwrap();
        assert_eq!(action, Some(Action::FaceChanged { title: "Sebastian", width: W, height: H }));
        assert!(!w.menu.is_some());
    }

    #[test]
    fn menu_quit_and_dismiss() {
        let lib = library();
        let mut w = shown(&lib);
        open_menu(&mut w);
        // 5 faces, then a 5px separator, then Quit
        let quit = Pos::new(MENU_AT.x + 20, MENU_AT.y + 4 + 5 * 9 + 5 + 4);
        let action = w.handle_event(Event::PrimaryPress { local: quit, screen: Pos::default() }).unwrap();
        assert_eq!(action, Some(Action::Quit));

        open_menu(&mut w);
        let mut fb = FrameBuffer::new(W, H);
        w.paint(&mut fb);
        w.handle_event(Event::Dismiss).unwrap();
        assert!(!w.menu.is_some());
        assert!(w.needs_paint());

        open_menu(&mut w);
        let outside = Pos::new(W as i32 - 1, H as i32 - 1);
        assert_eq!(
            w.handle_event(Event::PrimaryPress { local: outside, screen: Pos::default() }).unwrap(),
            None
        );
        assert!(!w.menu.is_some());
    }

    #[test]
    fn right_click_on_transparent_area_opens_nothing() {
        let lib = library();
        let mut w = shown(&lib);
        let before = w.repaint_requests;
        w.handle_event(Event::SecondaryPress { local: Pos::new(2, 2) }).unwrap();
        assert!(w.menu.is_none());
        assert_eq!(w.repaint_requests, before);
    }

    #[test]
    fn os_reported_origin_drives_drag_and_aim() {
        let lib = library();
        let mut w = eva(&lib);
        // shown before the window manager placed the window
        w.handle_event(Event::Shown { origin: Pos::new(0, 0) }).unwrap();
        w.handle_event(Event::Moved { origin: Pos::new(500, 300) }).unwrap();
        assert!(w.needs_paint());

        let eye = w.eyes[0];
        w.handle_event(Event::Tick { cursor: Pos::new(500, 300) + eye_center(&eye) }).unwrap();
        assert_eq!(pupil_centers(&w)[0], eye.center);

        let local = Pos::new(20, 20);
        w.handle_event(Event::PrimaryPress { local, screen: Pos::new(520, 320) }).unwrap();
        let action = w.handle_event(Event::PrimaryDrag { screen: Pos::new(521, 320) }).unwrap();
        assert_eq!(action, Some(Action::MoveWindow(Pos::new(501, 300))));
    }

    #[test]
    fn stale_origin_report_is_ignored_mid_drag() {
        let lib = library();
        let mut w = shown(&lib);
        let local = Pos::new(30, 30);
        w.handle_event(Event::PrimaryPress { local, screen: ORIGIN + local }).unwrap();
        w.handle_event(Event::PrimaryDrag { screen: ORIGIN + local + Pos::new(40, 0) }).unwrap();
        w.handle_event(Event::Moved { origin: ORIGIN }).unwrap();
        assert_eq!(w.origin(), ORIGIN + Pos::new(40, 0));

        w.handle_event(Event::PrimaryRelease).unwrap();
        let before = w.repaint_requests;
        w.handle_event(Event::Moved { origin: ORIGIN + Pos::new(40, 0) }).unwrap();
        assert_eq!(w.repaint_requests, before, "unchanged origin");
    }

    #[test]
    fn drag_re_aims_the_painted_pupils() {
        let lib = library();
        let mut w = shown(&lib);
        let eye = w.eyes[0];
        // cursor sits where the eye center will be after a 15px move right
        let moved = ORIGIN + Pos::new(15, 0);
        w.handle_event(Event::Tick { cursor: moved + eye_center(&eye) }).unwrap();
        assert_ne!(pupil_centers(&w)[0], eye.center);

        let local = Pos::new(30, 30);
        w.handle_event(Event::PrimaryPress { local, screen: ORIGIN + local }).unwrap();
        let mut fb = FrameBuffer::new(W, H);
        w.paint(&mut fb);
        w.handle_event(Event::PrimaryDrag { screen: moved + local }).unwrap();
        assert!(w.needs_paint());
        assert_eq!(w.origin(), moved);
        assert_eq!(pupil_centers(&w)[0], eye.center);

        w.paint(&mut fb);
        let c = eye_center(&eye);
        assert_eq!(fb.pixels[c.y as usize * W + c.x as usize], BLACK);
    }
}
