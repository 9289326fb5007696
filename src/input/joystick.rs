//! Joystick containers and the id-keyed device registry

use std::collections::BTreeMap;

use tracing::debug;

use super::axis::{JoystickAxis, JoystickHat};
use super::button::Button;
use super::platform::Platform;

/// Platform-assigned instance id, stable across the device's connection
pub type JoystickId = i32;

/// Opaque platform handle for an open joystick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoystickHandle(pub u64);

/// Control counts reported by the platform when a joystick is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoystickCapabilities {
    pub buttons: usize,
    pub axes: usize,
    pub hats: usize,
}

/// State for one joystick
///
/// Buttons, axes and hats grow on first access by index and never shrink.
#[derive(Debug, Clone, Default)]
pub struct Joystick {
    id: JoystickId,
    handle: Option<JoystickHandle>,
    capabilities: JoystickCapabilities,
    buttons: Vec<Button>,
    axes: Vec<JoystickAxis>,
    hats: Vec<JoystickHat>,
}

impl Joystick {
    pub fn new(id: JoystickId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn id(&self) -> JoystickId {
        self.id
    }

    /// Returns the button at `index`, growing the list if needed
    pub fn get_button(&mut self, index: usize) -> &mut Button {
        if index >= self.buttons.len() {
            self.buttons.resize_with(index + 1, Button::default);
        }
        &mut self.buttons[index]
    }

    pub fn get_axis(&mut self, index: usize) -> &mut JoystickAxis {
        if index >= self.axes.len() {
            self.axes.resize_with(index + 1, JoystickAxis::default);
        }
        &mut self.axes[index]
    }

    pub fn get_hat(&mut self, index: usize) -> &mut JoystickHat {
        if index >= self.hats.len() {
            self.hats.resize_with(index + 1, JoystickHat::default);
        }
        &mut self.hats[index]
    }

    /// Read-only lookup; `None` if the index was never referenced
    pub fn button(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    pub fn axis(&self, index: usize) -> Option<&JoystickAxis> {
        self.axes.get(index)
    }

    pub fn hat(&self, index: usize) -> Option<&JoystickHat> {
        self.hats.get(index)
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn axes(&self) -> &[JoystickAxis] {
        &self.axes
    }

    pub fn hats(&self) -> &[JoystickHat] {
        &self.hats
    }

    /// Resets per-frame state of every sub-element
    pub fn advance_frame(&mut self) {
        self.buttons.iter_mut().for_each(Button::advance_frame);
        self.axes.iter_mut().for_each(JoystickAxis::advance_frame);
        self.hats.iter_mut().for_each(JoystickHat::advance_frame);
    }

    /// Whether a platform handle is currently attached
    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<JoystickHandle> {
        self.handle
    }

    // Capability counts are only meaningful while a handle is attached.
    pub fn num_buttons(&self) -> usize {
        self.handle.map_or(0, |_| self.capabilities.buttons)
    }

    pub fn num_axes(&self) -> usize {
        self.handle.map_or(0, |_| self.capabilities.axes)
    }

    pub fn num_hats(&self) -> usize {
        self.handle.map_or(0, |_| self.capabilities.hats)
    }

    fn attach(&mut self, handle: JoystickHandle, capabilities: JoystickCapabilities) {
        self.handle = Some(handle);
        self.capabilities = capabilities;
    }

    fn detach(&mut self) -> Option<JoystickHandle> {
        self.handle.take()
    }
}

/// All joysticks ever seen, keyed by instance id
///
/// Entries are never evicted, so accumulated state survives a
/// disconnect/reconnect of the same device.
#[derive(Debug, Default)]
pub struct JoystickRegistry {
    joysticks: BTreeMap<JoystickId, Joystick>,
}

impl JoystickRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `id`, creating it on first reference
    pub fn get_or_insert(&mut self, id: JoystickId) -> &mut Joystick {
        self.joysticks.entry(id).or_insert_with(|| Joystick::new(id))
    }

    pub fn get(&self, id: JoystickId) -> Option<&Joystick> {
        self.joysticks.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Joystick> {
        self.joysticks.values()
    }

    pub fn len(&self) -> usize {
        self.joysticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joysticks.is_empty()
    }

    pub fn advance_frame(&mut self) {
        self.joysticks.values_mut().for_each(Joystick::advance_frame);
    }

    /// Closes every open handle, then reopens every connected device
    ///
    /// Enumeration indices shift when devices come and go, so the whole set
    /// is rebuilt; entries are matched back up by instance id.
    pub fn refresh<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        self.close_all(platform);
        self.open_connected(platform);
    }

    fn close_all<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        for joystick in self.joysticks.values_mut() {
            if let Some(handle) = joystick.detach() {
                debug!(joystick.id = joystick.id, "Closing joystick");
                platform.close_joystick(handle);
            }
        }
    }

    fn open_connected<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        for index in 0..platform.joystick_count() {
            let Some(opened) = platform.open_joystick(index) else {
                debug!(index, "Joystick vanished before it could be opened");
                continue;
            };
            debug!(
                joystick.id = opened.id,
                index,
                buttons = opened.capabilities.buttons,
                axes = opened.capabilities.axes,
                hats = opened.capabilities.hats,
                "Opened joystick"
            );
            self.get_or_insert(opened.id)
                .attach(opened.handle, opened.capabilities);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::platform::ScriptedPlatform;

    #[test]
    fn test_lazy_growth_default_constructs_intermediate_slots() {
        let mut joystick = Joystick::new(7);
        joystick.get_button(3).update(true);

        assert_eq!(joystick.buttons().len(), 4);
        assert!(!joystick.buttons()[0].is_down());
        assert!(joystick.buttons()[3].is_down());

        joystick.get_axis(1).update(0.5);
        assert_eq!(joystick.axes().len(), 2);
        assert_eq!(joystick.axis(0).map(|a| a.value()), Some(0.0));
    }

    #[test]
    fn test_lookup_never_shrinks() {
        let mut joystick = Joystick::new(1);
        joystick.get_hat(5);
        joystick.get_hat(2);
        assert_eq!(joystick.hats().len(), 6);
    }

    #[test]
    fn test_read_only_lookup_does_not_grow() {
        let joystick = Joystick::new(1);
        assert!(joystick.button(0).is_none());
        assert!(joystick.axis(10).is_none());
    }

    #[test]
    fn test_advance_frame_forwards_to_elements() {
        let mut joystick = Joystick::new(1);
        joystick.get_button(0).update(true);
        joystick.get_axis(0).update(0.75);
        joystick.advance_frame();

        assert!(!joystick.buttons()[0].went_down());
        assert!(joystick.buttons()[0].is_down());
        assert_eq!(joystick.axes()[0].delta(), 0.0);
    }

    #[test]
    fn test_capabilities_hidden_while_detached() {
        let mut platform = ScriptedPlatform::new();
        let caps = JoystickCapabilities {
            buttons: 12,
            axes: 4,
            hats: 1,
        };
        platform.connect_joystick(42, caps);

        let mut registry = JoystickRegistry::new();
        registry.refresh(&mut platform);
        let joystick = registry.get(42).expect("registered on open");
        assert!(joystick.is_connected());
        assert_eq!(joystick.num_buttons(), 12);
        assert_eq!(joystick.num_axes(), 4);
        assert_eq!(joystick.num_hats(), 1);

        platform.disconnect_joystick(42);
        registry.refresh(&mut platform);
        let joystick = registry.get(42).expect("entry survives disconnect");
        assert!(!joystick.is_connected());
        assert_eq!(joystick.num_buttons(), 0);
    }

    #[test]
    fn test_refresh_preserves_state_across_reconnect() {
        let mut platform = ScriptedPlatform::new();
        platform.connect_joystick(3, JoystickCapabilities::default());

        let mut registry = JoystickRegistry::new();
        registry.refresh(&mut platform);
        registry.get_or_insert(3).get_axis(2).update(-0.5);
        registry.get_or_insert(3).get_button(1).update(true);

        platform.disconnect_joystick(3);
        registry.refresh(&mut platform);
        platform.connect_joystick(3, JoystickCapabilities::default());
        registry.refresh(&mut platform);

        let joystick = registry.get(3).expect("entry kept");
        assert!(joystick.is_connected());
        assert_eq!(joystick.axis(2).map(|a| a.value()), Some(-0.5));
        assert!(joystick.button(1).is_some_and(|b| b.is_down()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_refresh_closes_before_reopening() {
        let mut platform = ScriptedPlatform::new();
        platform.connect_joystick(1, JoystickCapabilities::default());
        platform.connect_joystick(2, JoystickCapabilities::default());

        let mut registry = JoystickRegistry::new();
        registry.refresh(&mut platform);
        assert_eq!(platform.open_handle_count(), 2);

        registry.refresh(&mut platform);
        // Old handles were released before the new ones were taken
        assert_eq!(platform.open_handle_count(), 2);
        assert_eq!(platform.close_calls(), 2);
        assert_eq!(platform.max_open_handles(), 2);
    }
}
