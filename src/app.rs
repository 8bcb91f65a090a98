// The host loop: owns the real window, paces the cursor timer, turns raw
// mouse/keyboard state into widget events and carries out widget actions.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::assets::FaceLibrary;
use crate::config::Config;
use crate::cursor::CursorSource;
use crate::draw::Drawer;
use crate::error::Error;
use crate::types::{FrameBuffer, Pos};
use crate::widget::{Action, Event, FaceWidget};

/// Everything the widget needs from the outside world, built once in `main`.
pub struct AppContext {
    pub config: Config,
    pub library: FaceLibrary,
}

impl AppContext {
    pub fn load(config: Config) -> Result<Self, Error> {
        let library = FaceLibrary::load(&config.asset_dir)?;
        tracing::info!(faces = library.len(), dir = %config.asset_dir.display(), "faces loaded");
        Ok(Self { config, library })
    }
}

/// Fixed-period timer polled from the loop. The first poll fires immediately.
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next: None }
    }

    pub fn due(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now < next => false,
            _ => {
                self.next = Some(now + self.interval);
                true
            }
        }
    }
}

/// One frame's worth of raw input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSample {
    pub local: Option<Pos>, // None while the pointer is outside the window
    pub screen: Pos,
    pub left: bool,
    pub right: bool,
    pub escape: bool,
}

/// Edge detection over successive `InputSample`s.
#[derive(Default)]
pub struct InputTracker {
    left: bool,
    right: bool,
    last_screen: Pos,
    last_local: Option<Pos>,
}

impl InputTracker {
    pub fn events(&mut self, sample: &InputSample) -> Vec<Event> {
        let mut events = Vec::new();

        if sample.escape {
            events.push(Event::Dismiss);
        }
        if let Some(local) = sample.local {
            if self.last_local != Some(local) {
                events.push(Event::Hover { local });
            }
        }

        match (self.left, sample.left) {
            (false, true) => {
                if let Some(local) = sample.local {
                    events.push(Event::PrimaryPress { local, screen: sample.screen });
                }
            }
            (true, true) if sample.screen != self.last_screen => {
                events.push(Event::PrimaryDrag { screen: sample.screen });
            }
            (true, false) => events.push(Event::PrimaryRelease),
            _ => {}
        }

        if !self.right && sample.right {
            if let Some(local) = sample.local {
                events.push(Event::SecondaryPress { local });
            }
        }

        self.left = sample.left;
        self.right = sample.right;
        self.last_screen = sample.screen;
        self.last_local = sample.local;
        events
    }
}

pub fn run(ctx: &AppContext, cursor: &dyn CursorSource) -> Result<(), Error> {
    let config = &ctx.config;
    let mut rng = rand::thread_rng();
    let mut widget = FaceWidget::new(&ctx.library, cursor.position(), |n| rng.gen_range(0..n))?;
    if let Some(name) = &config.start_face {
        // Hidden still, so this only swaps the face; the window is sized below.
        widget.handle_event(Event::SelectFace(name.clone()))?;
    }

    let face = widget.face();
    let mut drawer = Drawer::new(
        face.preset.name,
        face.image.width,
        face.image.height,
        config.topmost,
        None,
    )?;
    let mut screen = FrameBuffer::new(face.image.width, face.image.height);
    widget.handle_event(Event::Shown { origin: drawer.position() })?;

    let mut ticker = Ticker::new(config.update_interval);
    let mut input = InputTracker::default();

    while drawer.is_open() {
        // The window manager may place or move the window behind our back.
        widget.handle_event(Event::Moved { origin: drawer.position() })?;
        if ticker.due(Instant::now()) {
            widget.handle_event(Event::Tick { cursor: cursor.position() })?;
        }

        let sample = InputSample {
            local: drawer.mouse_pos(),
            screen: cursor.position(),
            left: drawer.left_mouse_down(),
            right: drawer.right_mouse_down(),
            escape: drawer.esc_pressed_once(),
        };

        for event in input.events(&sample) {
            match widget.handle_event(event)? {
                None => {}
                Some(Action::MoveWindow(origin)) => drawer.set_position(origin),
                Some(Action::FaceChanged { title, width, height }) => {
                    if (width, height) == (screen.width, screen.height) {
                        drawer.set_title(title);
                    } else {
                        // minifb windows can't be resized from code; reopen in place.
                        tracing::debug!(width, height, "reopening window for new face size");
                        drawer = Drawer::new(title, width, height, config.topmost, Some(widget.origin()))?;
                        screen = FrameBuffer::new(width, height);
                        widget.handle_event(Event::Moved { origin: drawer.position() })?;
                    }
                }
                Some(Action::Quit) => return Ok(()),
            }
        }

        if widget.needs_paint() {
            widget.paint(&mut screen);
            drawer.present(&screen)?;
        } else {
            drawer.pump();
        }
    }

    tracing::info!("window closed");
    Ok(())
}
