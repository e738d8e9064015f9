//! Standalone curve window backed by winit.
//!
//! ```no_run
//! # use wcurve::Viewer;
//! # use wcurve::fetch::CurveSource;
//! Viewer::builder()
//!     .with_source(CurveSource::parse("curves/hiv.json"))
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    engine::CurveRenderEngine, error::WCurveError, fetch::CurveSource,
    input::InputEvent, options::Options,
};

/// How often the title bar refreshes its status line.
const TITLE_REFRESH: Duration = Duration::from_millis(500);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    source: Option<CurveSource>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            source: None,
            options: None,
            title: "W-Curve".into(),
        }
    }

    /// Curve to load once the window is up.
    #[must_use]
    pub fn with_source(mut self, source: CurveSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            source: self.source,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that displays W-curves.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    source: Option<CurveSource>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::Viewer`] if the event loop cannot be created
    /// or exits abnormally.
    pub fn run(self) -> Result<(), WCurveError> {
        let event_loop =
            EventLoop::new().map_err(|e| WCurveError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            source: self.source,
            options: Some(self.options),
            title: self.title,
            last_title_refresh: Instant::now(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| WCurveError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<CurveRenderEngine>,
    source: Option<CurveSource>,
    options: Option<Options>,
    title: String,
    last_title_refresh: Instant,
}

/// Translate a winit event into an engine input event.
fn input_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::MouseInput {
            button: MouseButton::Left,
            state,
            ..
        } => Some(InputEvent::PrimaryButton {
            pressed: *state == ElementState::Pressed,
        }),
        WindowEvent::CursorMoved { position, .. } => {
            Some(InputEvent::CursorMoved {
                x: position.x as f32,
                y: position.y as f32,
            })
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
            };
            Some(InputEvent::Scroll { delta })
        }
        WindowEvent::ModifiersChanged(modifiers) => {
            Some(InputEvent::ModifiersChanged {
                shift: modifiers.state().shift_key(),
            })
        }
        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed
                && event.physical_key == PhysicalKey::Code(KeyCode::KeyF) =>
        {
            Some(InputEvent::FitView)
        }
        _ => None,
    }
}

impl ViewerApp {
    fn refresh_title(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &self.engine) else {
            return;
        };
        if self.last_title_refresh.elapsed() < TITLE_REFRESH {
            return;
        }
        self.last_title_refresh = Instant::now();

        let status = match engine.last_outcome() {
            _ if engine.pending_loads() > 0 => "loading".to_owned(),
            Some(outcome) if outcome.is_valid() => {
                format!("{} points", outcome.count)
            }
            Some(_) => "invalid curve".to_owned(),
            None => "no curve".to_owned(),
        };
        window.set_title(&format!(
            "{} | {status} | {:.0} fps",
            self.title,
            engine.fps()
        ));
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let options = self.options.take().unwrap_or_default();
        let engine_result = pollster::block_on(CurveRenderEngine::new(
            window.clone(),
            (inner.width.max(1), inner.height.max(1)),
            options,
        ));
        let mut engine = match engine_result {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Some(source) = self.source.take() {
            if let Err(e) = engine.load_source(&source) {
                log::error!("failed to load {}: {e}", source.location());
            }
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                engine.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                engine.update();
                match engine.render() {
                    Ok(()) => {}
                    Err(
                        wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost,
                    ) => {
                        let inner = window.inner_size();
                        engine.resize(inner.width, inner.height);
                    }
                    Err(e) => log::error!("render error: {e:?}"),
                }
                window.request_redraw();
                self.refresh_title();
            }
            ref other => {
                if let Some(input) = input_event(other) {
                    engine.handle_input(input);
                    window.request_redraw();
                }
            }
        }
    }
}
