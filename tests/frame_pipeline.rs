//! End-to-end frame processing against a scripted platform

use std::cell::RefCell;
use std::rc::Rc;

use frame_input::InputConfig;
use frame_input::input::axis::hat;
use frame_input::input::{
    ButtonId, InputSystem, JoystickCapabilities, KeyMod, Keycode, LifecycleEvent, PlatformEvent,
    ScriptedPlatform, TextInputEvent, TouchPhase,
};
use glam::{IVec2, Vec2};

const WINDOW: IVec2 = IVec2::new(800, 600);

struct Harness {
    system: InputSystem<ScriptedPlatform>,
    window: IVec2,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    fn with_config(config: InputConfig) -> Self {
        Self {
            system: InputSystem::new(ScriptedPlatform::new().with_time(5_000), &config),
            window: WINDOW,
        }
    }

    fn frame(&mut self, events: impl IntoIterator<Item = PlatformEvent>) {
        self.system.platform_mut().push_events(events);
        self.system.platform_mut().advance_clock(16);
        self.system.advance_frame(&mut self.window);
    }
}

fn key(keycode: Keycode, pressed: bool) -> PlatformEvent {
    PlatformEvent::Key {
        keycode,
        pressed,
        repeat: false,
        modifiers: KeyMod::empty(),
    }
}

fn motion(dx: i32, dy: i32) -> PlatformEvent {
    PlatformEvent::MouseMotion {
        delta: IVec2::new(dx, dy),
        position: IVec2::new(dx, dy),
    }
}

fn touch(phase: TouchPhase, finger: i64, x: f32, y: f32) -> PlatformEvent {
    PlatformEvent::Touch {
        phase,
        finger,
        position: Vec2::new(x, y),
        delta: Vec2::ZERO,
    }
}

#[test]
fn test_mouse_delta_accumulates_within_frame() {
    let mut h = Harness::new();
    h.frame([motion(1, 0), motion(2, 1), motion(0, 3)]);
    assert_eq!(h.system.mouse().delta, IVec2::new(3, 4));

    h.frame([]);
    assert_eq!(h.system.mouse().delta, IVec2::ZERO);
}

#[test]
fn test_press_and_release_in_one_frame() {
    let mut h = Harness::new();
    h.frame([key(Keycode::A, true), key(Keycode::A, false)]);

    let a = h.system.key(Keycode::A);
    assert!(!a.is_down());
    assert!(a.went_down());
    assert!(a.went_up());
}

#[test]
fn test_touch_slots_are_stable_and_reused() {
    let mut h = Harness::new();
    h.frame([
        touch(TouchPhase::Down, 100, 0.5, 0.5),
        touch(TouchPhase::Down, 200, 0.25, 0.75),
    ]);

    let pointers = h.system.pointers();
    assert_eq!(pointers[1].id, 100);
    assert_eq!(pointers[1].position, IVec2::new(400, 300));
    assert_eq!(pointers[2].id, 200);
    assert_eq!(pointers[2].position, IVec2::new(200, 450));
    assert!(h.system.pointer_button(1).went_down());
    assert!(h.system.pointer_button(2).went_down());

    // First finger lifts: its button goes up and slot 1 frees
    h.frame([touch(TouchPhase::Up, 100, 0.5, 0.5)]);
    assert!(h.system.pointer_button(1).went_up());
    assert!(!h.system.pointers()[1].used);
    assert_eq!(h.system.pointers()[1].position, IVec2::new(400, 300));
    assert!(h.system.pointer_button(2).is_down());

    // Second finger keeps slot 2; a new finger takes the freed slot 1
    h.frame([
        touch(TouchPhase::Motion, 200, 0.3, 0.75),
        touch(TouchPhase::Down, 300, 0.1, 0.1),
    ]);
    assert_eq!(h.system.pointers()[2].id, 200);
    assert_eq!(h.system.pointers()[1].id, 300);
    assert!(h.system.pointer_button(1).went_down());
}

#[test]
fn test_touch_never_takes_mouse_slot() {
    let mut h = Harness::new();
    h.frame([touch(TouchPhase::Down, 0, 0.5, 0.5)]);

    assert_eq!(h.system.pointers()[1].id, 0);
    assert!(h.system.pointers()[1].used);
    assert!(!h.system.pointer_button(0).is_down());
}

#[test]
fn test_motion_from_unseen_finger_claims_a_slot_unpressed() {
    let mut h = Harness::new();
    h.frame([touch(TouchPhase::Motion, 77, 0.5, 0.5)]);

    let pointer = h.system.pointers()[1];
    assert!(pointer.used);
    assert_eq!(pointer.id, 77);
    assert_eq!(pointer.position, IVec2::new(400, 300));
    assert!(!h.system.pointer_button(1).is_down());
    assert!(!h.system.pointer_button(1).went_down());

    // A later press of the same finger reuses its slot
    h.frame([touch(TouchPhase::Down, 77, 0.5, 0.5)]);
    assert!(h.system.pointer_button(1).went_down());
    assert!(!h.system.pointers()[2].used);
}

#[test]
fn test_release_of_unknown_finger_changes_nothing() {
    let mut h = Harness::new();
    h.frame([touch(TouchPhase::Down, 5, 0.25, 0.25)]);
    h.frame([touch(TouchPhase::Up, 6, 0.5, 0.5)]);

    let pointers = h.system.pointers();
    assert!(pointers[1].used);
    assert_eq!(pointers[1].id, 5);
    assert_eq!(pointers[1].position, IVec2::new(200, 150));
    assert!(pointers[2..].iter().all(|p| !p.used));
    assert!(h.system.pointer_button(1).is_down());
    assert!(!h.system.pointer_button(1).went_up());
}

#[test]
fn test_resize_scales_later_touches() {
    let mut h = Harness::new();
    h.frame([
        PlatformEvent::WindowResized {
            size: IVec2::new(100, 200),
        },
        touch(TouchPhase::Down, 1, 0.5, 0.5),
    ]);

    assert_eq!(h.window, IVec2::new(100, 200));
    assert_eq!(h.system.pointers()[1].position, IVec2::new(50, 100));
}

#[test]
fn test_text_log_cleared_when_not_recording() {
    let mut h = Harness::new();
    h.frame([PlatformEvent::TextInput {
        text: "a".to_string(),
    }]);
    assert!(h.system.text_input_events().is_empty());
}

#[test]
fn test_text_log_accumulates_while_recording() {
    let mut h = Harness::new();
    h.system.set_record_text_input(true);

    h.frame([
        key(Keycode::H, true),
        PlatformEvent::TextEditing {
            text: "h".to_string(),
            start: 1,
            length: 0,
        },
    ]);
    h.frame([PlatformEvent::TextInput {
        text: "hi".to_string(),
    }]);

    let events = h.system.text_input_events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], TextInputEvent::Key { pressed: true, symbol, .. } if symbol == Keycode::H));
    assert_eq!(
        events[1],
        TextInputEvent::Edit {
            text: "h".to_string(),
            caret_start: 1,
            selection_length: 0,
        }
    );
    assert_eq!(
        events[2],
        TextInputEvent::Commit {
            text: "hi".to_string()
        }
    );

    h.system.clear_text_input_events();
    assert!(h.system.text_input_events().is_empty());
}

#[test]
fn test_lifecycle_callbacks_and_minimized_flag() {
    let mut h = Harness::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    h.system
        .add_app_event_callback(move |event| sink.borrow_mut().push(*event));

    h.frame([]);
    h.frame([PlatformEvent::Lifecycle(LifecycleEvent::WillEnterBackground)]);
    assert!(h.system.minimized());
    assert_eq!(h.system.minimized_frame(), 2);

    h.frame([
        PlatformEvent::Lifecycle(LifecycleEvent::DidEnterForeground),
        PlatformEvent::Lifecycle(LifecycleEvent::Terminating),
    ]);
    assert!(!h.system.minimized());
    assert_eq!(h.system.minimized_frame(), 3);

    assert_eq!(
        *seen.borrow(),
        vec![
            LifecycleEvent::WillEnterBackground,
            LifecycleEvent::DidEnterForeground
        ]
    );
}

#[test]
fn test_joystick_axes_buttons_and_hats() {
    let mut h = Harness::new();
    h.frame([
        PlatformEvent::JoystickAxis {
            joystick: 4,
            axis: 1,
            value: i16::MAX,
        },
        PlatformEvent::JoystickButton {
            joystick: 4,
            button: 2,
            pressed: true,
        },
        PlatformEvent::JoystickHat {
            joystick: 4,
            hat: 0,
            value: hat::RIGHT_UP,
        },
    ]);

    let joystick = h.system.joystick(4).expect("created on first event");
    assert_eq!(joystick.axis(1).map(|a| a.value()), Some(1.0));
    assert_eq!(joystick.axis(0).map(|a| a.value()), Some(0.0));
    assert!(joystick.button(2).is_some_and(|b| b.went_down()));
    assert_eq!(joystick.hat(0).map(|h| h.value()), Some(Vec2::new(1.0, -1.0)));
    assert!(!joystick.is_connected());

    h.frame([PlatformEvent::JoystickAxis {
        joystick: 4,
        axis: 1,
        value: 0,
    }]);
    let axis = *h.system.joystick(4).and_then(|j| j.axis(1)).expect("axis");
    assert_eq!(axis.delta(), -1.0);
}

#[test]
fn test_reconnect_preserves_joystick_state() {
    let mut h = Harness::new();
    let caps = JoystickCapabilities {
        buttons: 8,
        axes: 4,
        hats: 1,
    };
    h.system.platform_mut().connect_joystick(9, caps);
    h.frame([PlatformEvent::JoystickAdded { index: 0 }]);
    assert!(h.system.joystick(9).is_some_and(|j| j.is_connected()));

    h.frame([PlatformEvent::JoystickButton {
        joystick: 9,
        button: 0,
        pressed: true,
    }]);

    h.system.platform_mut().disconnect_joystick(9);
    h.frame([PlatformEvent::JoystickRemoved { joystick: 9 }]);
    let joystick = h.system.joystick(9).expect("entry kept after disconnect");
    assert!(!joystick.is_connected());
    assert_eq!(joystick.num_buttons(), 0);

    h.system.platform_mut().connect_joystick(9, caps);
    h.frame([PlatformEvent::JoystickAdded { index: 0 }]);
    let joystick = h.system.joystick(9).expect("entry");
    assert!(joystick.is_connected());
    assert!(joystick.button(0).is_some_and(|b| b.is_down()));
    assert_eq!(h.system.platform().open_handle_count(), 1);
}

#[test]
fn test_first_frame_delta_and_clock() {
    let mut h = Harness::new();
    h.system.platform_mut().set_time(5_000);
    h.system.advance_frame(&mut h.window);
    assert_eq!(h.system.frame_time_ms(), 16);
    assert_eq!(h.system.time(), 0.0);

    h.frame([]);
    assert_eq!(h.system.frame_time_ms(), 16);
    assert!((h.system.time() - 0.016).abs() < 1e-6);
    assert_eq!(h.system.frames(), 2);
}

#[test]
fn test_headset_trigger_from_another_thread() {
    let mut h = Harness::new();
    let trigger = h.system.headset().trigger_handle();
    std::thread::spawn(move || trigger.fire())
        .join()
        .expect("trigger thread");

    h.frame([]);
    assert!(h.system.headset().triggered());
    h.frame([]);
    assert!(!h.system.headset().triggered());
}

#[test]
fn test_non_left_mouse_buttons_are_distinct_but_trigger_headset() {
    let mut h = Harness::new();
    h.frame([PlatformEvent::MouseButton {
        button: 3,
        pressed: true,
        position: IVec2::new(7, 8),
    }]);

    assert!(h.system.button(ButtonId::Mouse(3)).went_down());
    assert!(!h.system.pointer_button(0).is_down());
    assert!(h.system.headset().triggered());

    // Releases never trigger
    h.frame([PlatformEvent::MouseButton {
        button: 3,
        pressed: false,
        position: IVec2::new(7, 8),
    }]);
    assert!(h.system.button(ButtonId::Mouse(3)).went_up());
    assert!(!h.system.headset().triggered());
}
