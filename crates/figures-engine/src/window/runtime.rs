use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::render::DepthTarget;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Outer position of the window; `None` lets the platform decide.
    pub position: Option<LogicalPosition<f64>>,
}

impl Default for RuntimeConfig {
    /// 640x480 in the top-left corner of the screen.
    fn default() -> Self {
        Self {
            title: "projection figures".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            position: Some(LogicalPosition::new(0.0, 0.0)),
        }
    }
}

/// Requests an app can make from a frame callback.
///
/// Commands are buffered and applied after the callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Schedules another redraw. The runtime otherwise redraws only when the
    /// window is exposed or resized.
    pub fn request_redraw(&mut self) {
        self.commands.push(Command::Redraw);
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// Stops the runtime; `err` is returned from [`Runtime::run`].
    pub fn fail(&mut self, err: anyhow::Error) {
        self.commands.push(Command::Fail(err));
    }
}

#[derive(Debug)]
enum Command {
    Redraw,
    Exit,
    Fail(anyhow::Error),
}

/// What a batch of commands asks the event loop to do.
#[derive(Debug, Default, PartialEq, Eq)]
struct Outcome {
    redraw: bool,
    exit: bool,
}

/// Folds `commands` into an [`Outcome`]. The first failure is kept in `error`.
fn fold_commands(commands: Vec<Command>, error: &mut Option<anyhow::Error>) -> Outcome {
    let mut outcome = Outcome::default();
    for cmd in commands {
        match cmd {
            Command::Redraw => outcome.redraw = true,
            Command::Exit => outcome.exit = true,
            Command::Fail(err) => {
                error.get_or_insert(err);
                outcome.exit = true;
            }
        }
    }
    outcome
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and runs `app` until the window closes.
    ///
    /// Window or GPU initialization failures, and failures reported through
    /// [`RuntimeCtx::fail`], are returned after the event loop stops.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            gpu_init,
            app,
            entry: None,
            error: None,
            exit_requested: false,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    depth: DepthTarget,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error.get_or_insert(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        if let Some(position) = self.config.position {
            attrs = attrs.with_position(position);
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            depth: DepthTarget::new(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, commands: Vec<Command>) {
        let outcome = fold_commands(commands, &mut self.error);
        if outcome.exit {
            self.exit_requested = true;
        } else if outcome.redraw {
            if let Some(entry) = &self.entry {
                entry.with_window(|w| w.request_redraw());
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::debug!("window closed");
                self.entry = None;
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                log::debug!("resized to {}x{}", new_size.width, new_size.height);
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::Occluded(false) => entry.with_window(|w| w.request_redraw()),

            WindowEvent::RedrawRequested => {
                let mut runtime_ctx = RuntimeCtx::default();
                let app = &mut self.app;

                let control = entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            window: fields.window,
                        },
                        gpu: fields.gpu,
                        depth: fields.depth,
                        runtime: &mut runtime_ctx,
                    };
                    app.on_frame(&mut ctx)
                });

                if control == AppControl::Exit {
                    runtime_ctx.exit();
                }

                self.apply_commands(event_loop, runtime_ctx.commands);
            }

            _ => {}
        }
    }
}
