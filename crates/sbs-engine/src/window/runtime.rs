use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::monitor::MonitorHandle;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::compositor::{Compositor, Frame};
use crate::config::{ViewerConfig, WindowConfig};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::platform::winit::translate_window_event;
use crate::input::{IntentQueue, KeyMap};
use crate::render::{RenderCtx, RenderTarget, StereoRenderer};
use crate::runloop::RunLoop;
use crate::scene::Scene;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the output window and drives frames until quit.
    ///
    /// Blocks the calling thread. Initialization failures and fatal surface
    /// errors are returned after the event loop exits.
    pub fn run(config: ViewerConfig) -> Result<()> {
        config.validate()?;

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = ViewerState::new(config);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Outcome of one attempt to draw and present.
enum FrameOutcome {
    Presented,
    Skipped,
    Fatal(String),
}

struct ViewerState {
    config: ViewerConfig,

    scene: Scene,
    run_loop: RunLoop,
    compositor: Compositor,
    frame: Frame,
    renderer: StereoRenderer,

    keymap: KeyMap,
    intents: IntentQueue,

    entry: Option<WindowEntry>,
    resize_warned: bool,
    fatal: Option<anyhow::Error>,
}

impl ViewerState {
    fn new(config: ViewerConfig) -> Self {
        let scene = Scene::from_preset(config.scene, config.seed);
        let run_loop = RunLoop::new(config.camera, config.stereo, config.view);
        let compositor = Compositor::new(config.clear);
        let frame = Frame::new(config.window.surface());

        Self {
            config,
            scene,
            run_loop,
            compositor,
            frame,
            renderer: StereoRenderer::new(),
            keymap: KeyMap::default(),
            intents: IntentQueue::new(),
            entry: None,
            resize_warned: false,
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.run_loop.stop();
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = window_attributes(event_loop, &self.config.window);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.config.gpu.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let size = entry.borrow_gpu().surface_size();
        log::info!(
            "window {}x{} ({}x{} per eye), scene: {}, stereo: {}, view: {}",
            size.width,
            size.height,
            size.eye_width(),
            size.height,
            self.config.scene,
            self.run_loop.stereo_mode().name(),
            self.run_loop.view_mode().name(),
        );

        self.entry = Some(entry);
        Ok(())
    }

    /// Applies everything queued since the last frame.
    fn poll_intents(&mut self) {
        if self.intents.is_empty() {
            return;
        }
        self.run_loop.apply_intents(self.intents.drain());
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_intents();

        let Some(ft) = self.run_loop.begin_frame(Instant::now()) else {
            event_loop.exit();
            return;
        };

        self.scene.tick(ft.elapsed, ft.dt);

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let Self {
            scene,
            run_loop,
            compositor,
            frame,
            renderer,
            entry,
            config,
            ..
        } = self;

        let Some(entry) = entry.as_mut() else {
            return;
        };

        let outcome = entry.with_mut(|fields| {
            let gpu = fields.gpu;
            let surface = gpu.surface_size();
            if !surface.is_valid() {
                return FrameOutcome::Skipped;
            }

            compositor.compose_into(
                frame,
                scene,
                run_loop.camera(),
                run_loop.stereo_mode(),
                run_loop.view_mode(),
                surface,
            );

            let mut gpu_frame = match gpu.begin_frame() {
                Ok(f) => f,
                Err(err) => {
                    let reason = err.to_string();
                    return match gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Reconfigured => {
                            log::warn!("surface error ({reason}); reconfigured");
                            FrameOutcome::Skipped
                        }
                        SurfaceErrorAction::SkipFrame => {
                            log::warn!("surface error ({reason}); skipping frame");
                            FrameOutcome::Skipped
                        }
                        SurfaceErrorAction::Fatal => FrameOutcome::Fatal(reason),
                    };
                }
            };

            // RenderTarget borrows the encoder; dropped before submit() takes the frame.
            {
                let rctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), surface);
                let mut target = RenderTarget::new(&mut gpu_frame.encoder, &gpu_frame.view, gpu.depth_view());
                renderer.render_frame(&rctx, &mut target, frame);
            }

            fields.window.pre_present_notify();
            gpu.submit(gpu_frame);
            FrameOutcome::Presented
        });

        match outcome {
            FrameOutcome::Presented => {
                if run_loop.end_frame(Instant::now()).is_some() {
                    let status = run_loop.status();
                    log::info!("{status}");
                    let title = format!("{} | {status}", config.window.title);
                    entry.with_window(|w| w.set_title(&title));
                }
            }
            FrameOutcome::Skipped => {}
            FrameOutcome::Fatal(reason) => {
                self.fail(event_loop, anyhow::anyhow!("fatal surface error: {reason}"));
            }
        }
    }

    fn resize(&mut self) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let new_size = entry.with_window(|w| w.inner_size());
        entry.with_gpu_mut(|gpu| gpu.resize(new_size));

        if new_size != self.config.window.size && !self.resize_warned {
            self.resize_warned = true;
            log::warn!(
                "surface resized to {}x{}; eye aspect stays at {:.4}",
                new_size.width,
                new_size.height,
                self.run_loop.camera().aspect()
            );
        }
    }
}

impl ApplicationHandler for ViewerState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e.context("failed to create output window"));
            return;
        }

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_intents();
        if !self.run_loop.is_running() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; FIFO present paces the loop.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let is_ours = self
            .entry
            .as_ref()
            .is_some_and(|e| e.with_window(|w| w.id()) == window_id);
        if !is_ours {
            return;
        }

        if let Some(intent) = translate_window_event(&event).and_then(|ev| self.keymap.intent_for(&ev)) {
            log::debug!("intent: {intent}");
            self.intents.push(intent);
        }

        match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.resize(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Surface before window.
        self.entry = None;
    }
}

fn window_attributes(event_loop: &ActiveEventLoop, config: &WindowConfig) -> WindowAttributes {
    let mut attrs = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(config.size)
        .with_decorations(config.decorated)
        .with_resizable(config.decorated);

    let monitor = config
        .monitor
        .as_deref()
        .and_then(|wanted| find_monitor(event_loop.available_monitors(), wanted));

    match (monitor, config.position) {
        (Some(m), _) => {
            log::info!("placing window on monitor {:?}", m.name());
            attrs = attrs.with_position(m.position());
        }
        (None, Some(pos)) => {
            if let Some(wanted) = &config.monitor {
                log::warn!("no monitor matching {wanted:?}; using position {},{}", pos.x, pos.y);
            }
            attrs = attrs.with_position(pos);
        }
        (None, None) => {}
    }

    attrs
}

fn find_monitor(mut monitors: impl Iterator<Item = MonitorHandle>, wanted: &str) -> Option<MonitorHandle> {
    monitors.find(|m| monitor_matches(m.name().as_deref(), wanted))
}

/// Case-insensitive substring match on the monitor name.
fn monitor_matches(name: Option<&str>, wanted: &str) -> bool {
    match name {
        Some(name) => name.to_lowercase().contains(&wanted.to_lowercase()),
        None => false,
    }
}
