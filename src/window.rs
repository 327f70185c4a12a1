//! Windowed host: owns the window and GPU, drives the controller.
//!
//! Frame requests become `Window::request_redraw` calls and are delivered
//! on `RedrawRequested`, so the field animates at the display's refresh
//! cadence. Timeouts live in a [`TimerQueue`] whose clock is the time since
//! the window opened; the event loop sleeps until the next deadline.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::ParticleConfig;
use crate::controller::{SurfaceController, Viewport};
use crate::error::AppError;
use crate::gpu::{FrameBatch, Globals, GpuState};
use crate::input::{Action, Command, InputEvent, InputTranslator};
use crate::scheduler::{FrameId, FrameQueue, FrameScheduler, TimerQueue};
use crate::simulation::Simulation;
use crate::surface::SurfaceDimensions;
use crate::time::FrameTimer;
#[cfg(feature = "egui")]
use crate::{gpu::EguiIntegration, ui::SettingsPanel};

const WINDOW_TITLE: &str = "particlebg";
const WINDOW_WIDTH: f64 = 1280.0;
const WINDOW_HEIGHT: f64 = 720.0;

/// Frame requests that wake the window for a redraw.
struct WindowFrames {
    window: Arc<Window>,
    queue: FrameQueue,
}

impl FrameScheduler for WindowFrames {
    fn request_frame(&mut self) -> FrameId {
        let id = self.queue.request_frame();
        self.window.request_redraw();
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.queue.cancel_frame(id);
    }
}

/// The window's client area in logical pixels.
struct WindowViewport {
    window: Arc<Window>,
}

impl WindowViewport {
    fn logical_size(&self) -> Vec2 {
        let size = self.window.inner_size().to_logical::<f64>(self.window.scale_factor());
        Vec2::new(size.width as f32, size.height as f32)
    }
}

impl Viewport for WindowViewport {
    fn size(&self) -> SurfaceDimensions {
        let size = self.logical_size().round();
        SurfaceDimensions::new(size.x as u32, size.y as u32)
    }
}

type WindowController = SurfaceController<WindowFrames, TimerQueue, WindowViewport>;

struct Running {
    window: Arc<Window>,
    gpu: GpuState,
    controller: WindowController,
    batch: FrameBatch,
    input: InputTranslator,
    timer: FrameTimer,
    #[cfg(feature = "egui")]
    egui: EguiIntegration,
    #[cfg(feature = "egui")]
    panel: SettingsPanel,
}

impl Running {
    fn new(event_loop: &ActiveEventLoop, config: &ParticleConfig) -> Result<Self, AppError> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(event_loop.create_window(attributes)?);
        log::info!(
            "opened {}x{} window (scale factor {})",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        let gpu = pollster::block_on(GpuState::new(window.clone()))?;

        #[cfg(feature = "egui")]
        let egui = EguiIntegration::new(gpu.device(), gpu.format(), &window);

        let frames = WindowFrames {
            window: window.clone(),
            queue: FrameQueue::new(),
        };
        let viewport = WindowViewport {
            window: window.clone(),
        };
        let simulation = Simulation::new(config.clone());
        let mut controller = SurfaceController::new(simulation, frames, TimerQueue::new(), viewport);
        controller.start();

        Ok(Self {
            input: InputTranslator::new(window.scale_factor()),
            window,
            gpu,
            controller,
            batch: FrameBatch::new(),
            timer: FrameTimer::new(),
            #[cfg(feature = "egui")]
            egui,
            #[cfg(feature = "egui")]
            panel: SettingsPanel::new(config),
        })
    }

    /// Handle one window event. Returns `false` when the app should exit.
    fn window_event(&mut self, event: &WindowEvent) -> bool {
        #[cfg(feature = "egui")]
        let ui_consumed = self.egui.on_window_event(&self.window, event) || self.egui.wants_pointer();
        #[cfg(not(feature = "egui"))]
        let ui_consumed = false;

        match event {
            WindowEvent::CloseRequested => return false,
            WindowEvent::Resized(size) => {
                // The swapchain follows the window at once; the field waits
                // for the debounce and is stretched until then.
                self.gpu.resize(*size);
                self.window.request_redraw();
            }
            WindowEvent::RedrawRequested => return self.redraw(),
            _ => {}
        }

        match self.input.translate(event) {
            Some(Action::Input(input)) => {
                let pointer = matches!(
                    input,
                    InputEvent::PointerMoved { .. } | InputEvent::Clicked { .. }
                );
                if !(pointer && ui_consumed) {
                    self.controller.handle_input(input);
                }
            }
            Some(Action::Command(command)) if !ui_consumed => return self.command(command),
            _ => {}
        }
        true
    }

    fn command(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return false,
            Command::TogglePause => {
                self.controller.toggle_pause();
                log::info!(
                    "{}",
                    if self.controller.is_paused() { "paused" } else { "resumed" }
                );
            }
            Command::ToggleSettings => {
                #[cfg(feature = "egui")]
                self.panel.toggle();
                #[cfg(not(feature = "egui"))]
                log::debug!("settings panel requires the `egui` feature");
            }
        }
        true
    }

    fn redraw(&mut self) -> bool {
        for id in self.controller.frames_mut().queue.take_pending() {
            self.controller.on_frame(id, &mut self.batch);
        }

        #[cfg(feature = "egui")]
        let ui_output = {
            let panel = &mut self.panel;
            let mut replaced = None;
            let output = self.egui.run(&self.window, |ctx| {
                if let Some(config) = panel.show(ctx) {
                    replaced = Some(config);
                }
            });
            if let Some(config) = replaced {
                self.controller.set_config(config);
            }
            output
        };

        let simulation = self.controller.simulation();
        let globals = Globals::new(
            simulation.dimensions().as_vec2(),
            self.controller.viewport().logical_size(),
            &simulation.config().background,
            self.gpu.linear_output(),
        );

        self.gpu.upload(&self.batch);

        #[cfg(feature = "egui")]
        let result = {
            let egui = &mut self.egui;
            self.gpu
                .render(&globals, |target| egui.paint(target, &ui_output))
        };
        #[cfg(not(feature = "egui"))]
        let result = self.gpu.render(&globals, |_| {});

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                return false;
            }
            Err(e) => log::warn!("skipping frame: {}", e),
        }

        if let Some(fps) = self.timer.tick(Instant::now()) {
            log::debug!(
                "{:.1} fps, {} particles",
                fps,
                self.controller.simulation().len()
            );
        }
        true
    }

    /// Fire due timeouts and pick how long the loop may sleep.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.timer.elapsed();
        for id in self.controller.timers_mut().advance_to(now) {
            self.controller.on_timer(id);
        }

        match self.controller.timers().next_deadline() {
            Some(deadline) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(self.timer.start() + deadline))
            }
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn shutdown(&mut self) {
        self.controller.teardown();
        log::info!(
            "shutting down after {} frames ({} presented)",
            self.controller.simulation().frame_count(),
            self.timer.frame()
        );
    }
}

/// Winit application wrapping the running state.
pub struct App {
    config: ParticleConfig,
    running: Option<Running>,
    error: Option<AppError>,
}

impl App {
    pub fn new(config: ParticleConfig) -> Self {
        Self {
            config,
            running: None,
            error: None,
        }
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(running) = &mut self.running {
            running.shutdown();
        }
        self.running = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.error.is_some() {
            return;
        }
        match Running::new(event_loop, &self.config) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let keep_running = match &mut self.running {
            Some(running) => running.window_event(&event),
            None => return,
        };
        if !keep_running {
            self.exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(running) = &mut self.running {
            running.about_to_wait(event_loop);
        }
    }
}

/// Open a window and animate `config` until it is closed.
pub fn run(config: ParticleConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
