// Where is the mouse on the whole screen?
// minifb only reports the cursor while it is over the window, so the global
// position comes from device_query.

use device_query::{DeviceQuery, DeviceState};

use crate::error::Error;
use crate::types::Pos;

pub trait CursorSource {
    /// Current cursor position in screen coordinates.
    fn position(&self) -> Pos;
}

pub struct DeviceCursor {
    state: DeviceState,
}

impl DeviceCursor {
    /// Fails when there is no display (or no permission) to query.
    pub fn new() -> Result<Self, Error> {
        let state = DeviceState::checked_new()
            .ok_or_else(|| Error::CursorInit("no display available for cursor queries".into()))?;
        Ok(Self { state })
    }
}

impl CursorSource for DeviceCursor {
    fn position(&self) -> Pos {
        let (x, y) = self.state.get_mouse().coords;
        Pos::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_display_is_an_error_not_a_panic() {
        match DeviceCursor::new() {
            Ok(cursor) => {
                let _ = cursor.position();
            }
            Err(err) => assert!(matches!(err, Error::CursorInit(_)), "{err}"),
        }
    }
}
