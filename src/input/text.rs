//! Text input recording for UI widgets

use super::event::{KeyMod, Keycode};

/// One entry in the text input log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInputEvent {
    /// Raw key transition, recorded alongside the button update
    Key {
        pressed: bool,
        repeat: bool,
        symbol: Keycode,
        modifiers: KeyMod,
    },
    /// IME composition update
    Edit {
        text: String,
        caret_start: i32,
        selection_length: i32,
    },
    /// Finished text
    Commit { text: String },
}

/// Append-only log of [`TextInputEvent`]s, gated by a recording switch
///
/// With recording off the log is emptied on every frame advance. With
/// recording on, entries accumulate until the consumer calls
/// [`TextInputLog::clear`].
#[derive(Debug, Clone, Default)]
pub struct TextInputLog {
    events: Vec<TextInputEvent>,
    recording: bool,
}

impl TextInputLog {
    pub fn new(recording: bool) -> Self {
        Self {
            events: Vec::new(),
            recording,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    /// Appends `event` if recording is enabled
    pub fn record(&mut self, event: TextInputEvent) {
        if self.recording {
            self.events.push(event);
        }
    }

    pub fn events(&self) -> &[TextInputEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn advance_frame(&mut self) {
        if !self.recording {
            self.events.clear();
        }
    }
}
