//! Opens a window and logs normalized input edges once per frame
//!
//! `input-probe --check` runs the health checks headless instead.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use frame_input::build_info;
use frame_input::config::{InputConfig, WindowConfig};
use frame_input::health;
use frame_input::input::event::{MOUSE_BUTTON_MIDDLE, MOUSE_BUTTON_RIGHT};
use frame_input::input::{ButtonId, InputSystem, Keycode, TextInputEvent, WinitPlatform};
use glam::IVec2;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

/// Keys whose edges are logged
const WATCHED_KEYS: [(Keycode, &str); 7] = [
    (Keycode::SPACE, "space"),
    (Keycode::RETURN, "return"),
    (Keycode::UP, "up"),
    (Keycode::DOWN, "down"),
    (Keycode::LEFT, "left"),
    (Keycode::RIGHT, "right"),
    (Keycode::TAB, "tab"),
];

#[derive(Debug, Parser)]
#[command(name = "input-probe", version, about = "Interactive input probe")]
struct Args {
    /// Run the health checks and exit with their status
    #[arg(long)]
    check: bool,

    /// Configuration profile; defaults to INPUT_PROFILE or "release"
    #[arg(long)]
    profile: Option<String>,
}

struct Probe {
    config: InputConfig,
    window: Option<Arc<Window>>,
    window_size: IVec2,
    input: InputSystem<WinitPlatform>,
}

impl Probe {
    fn new(config: InputConfig) -> Self {
        let mut input = InputSystem::new(WinitPlatform::new(), &config);
        input.add_app_event_callback(|event| info!(?event, "Lifecycle"));

        Self {
            config,
            window: None,
            window_size: IVec2::ZERO,
            input,
        }
    }

    fn log_frame(&mut self) {
        for (keycode, name) in WATCHED_KEYS {
            let key = self.input.key(keycode);
            if key.went_down() {
                info!(key = name, "Key down");
            }
            if key.went_up() {
                info!(key = name, "Key up");
            }
        }

        for (slot, pointer) in self.input.pointers().iter().enumerate() {
            let button = self.input.pointer_button(slot);
            if button.went_down() {
                info!(slot, x = pointer.position.x, y = pointer.position.y, "Pointer down");
            }
            if button.went_up() {
                info!(slot, x = pointer.position.x, y = pointer.position.y, "Pointer up");
            }
        }

        for button in [MOUSE_BUTTON_MIDDLE, MOUSE_BUTTON_RIGHT] {
            if self.input.button(ButtonId::Mouse(button)).went_down() {
                info!(button, "Mouse button down");
            }
        }

        let wheel = self.input.mouse_wheel_delta();
        if wheel != IVec2::ZERO {
            info!(x = wheel.x, y = wheel.y, "Wheel");
        }

        for event in self.input.text_input_events() {
            if let TextInputEvent::Commit { text } = event {
                info!(%text, "Text");
            }
        }
        self.input.clear_text_input_events();

        // Tab toggles relative mouse mode, F1 toggles text input
        if self.input.key(Keycode::TAB).went_down() {
            let enabled = !self.input.relative_mouse_mode();
            self.input.set_relative_mouse_mode(enabled);
        }
        if self.input.key(Keycode::F1).went_down() {
            let recording = !self.input.record_text_input();
            self.input.set_record_text_input(recording);
            if recording {
                self.input.start_text_input();
            } else {
                self.input.stop_text_input();
            }
            info!(recording, "Text input toggled");
        }

        if self.input.headset().triggered() {
            info!("Headset trigger");
        }
    }
}

fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
}

impl ApplicationHandler for Probe {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(window_attributes(&self.config.window)) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created"
                );
                self.window_size = IVec2::new(size.width as i32, size.height as i32);
                let window = Arc::new(window);
                self.input.platform_mut().attach_window(Arc::clone(&window));
                self.window = Some(window);
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.platform_mut().handle_window_event(&event);
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        self.input.platform_mut().handle_device_event(&event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.input.advance_frame(&mut self.window_size);
        self.log_frame();

        if self.input.exit_requested() || self.input.key(Keycode::ESCAPE).went_down() {
            info!(frames = self.input.frames(), "Exiting");
            event_loop.exit();
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.check {
        let report = health::run_all_checks();
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    let config = match &args.profile {
        Some(profile) => InputConfig::load(profile),
        None => InputConfig::load_from_env(),
    }
    .context("failed to load input configuration")?;
    config.validate().map_err(anyhow::Error::msg)?;

    info!(profile = %config.profile, build = %build_info::version_string(), "Starting input probe");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut probe = Probe::new(config);
    event_loop.run_app(&mut probe).context("event loop failed")?;

    Ok(())
}
