//! Edge-triggered button state

/// A digital control with press/release edge detection
///
/// `went_down` and `went_up` are only true during the frame in which the
/// transition happened. [`Button::advance_frame`] clears them before the
/// next frame's events are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Button {
    is_down: bool,
    went_down: bool,
    went_up: bool,
}

impl Button {
    /// Creates a button in the up state
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a new physical state
    ///
    /// Repeating the current state (down→down, up→up) leaves the edge flags alone.
    pub fn update(&mut self, down: bool) {
        if !self.is_down && down {
            self.went_down = true;
        } else if self.is_down && !down {
            self.went_up = true;
        }
        self.is_down = down;
    }

    /// Clears the per-frame edge flags
    pub fn advance_frame(&mut self) {
        self.went_down = false;
        self.went_up = false;
    }

    /// Returns true while the button is held
    pub fn is_down(&self) -> bool {
        self.is_down
    }

    /// Returns true if the button was pressed this frame
    pub fn went_down(&self) -> bool {
        self.went_down
    }

    /// Returns true if the button was released this frame
    pub fn went_up(&self) -> bool {
        self.went_up
    }
}
