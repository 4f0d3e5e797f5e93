use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use glb_viewer::cli::Cli;
use glb_viewer::core::{InputHandler, SurfaceRenderer, TriangleAssembler, WindowContext, WinitInputAdapter};
use glb_viewer::window::Window;
use glb_viewer::{extract_mesh, Document, MeshSelection, SceneState, Viewer};

const WINDOW_TITLE: &str = "GLB Viewer";

// === Application ===

struct App {
    viewer: Viewer,
    input: WinitInputAdapter,
    assembler: TriangleAssembler,
    window: Option<Window>,
    surface: Option<SurfaceRenderer>,
    initial_size: (u32, u32),
    failed: bool,
}

impl App {
    fn new(viewer: Viewer, width: u32, height: u32) -> Self {
        Self {
            viewer,
            input: WinitInputAdapter::new(),
            assembler: TriangleAssembler::new(),
            window: None,
            surface: None,
            initial_size: (width, height),
            failed: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{:#}", err);
        self.failed = true;
        event_loop.exit();
    }

    fn redraw(&mut self) -> Result<()> {
        let (Some(window), Some(surface)) = (&self.window, &mut self.surface) else {
            return Ok(());
        };

        self.viewer.render_frame(&mut self.assembler);
        window.draw(surface, self.assembler.frame())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.initial_size;
        let window = match event_loop.create_window(
            winit::window::Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(width, height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => return self.fail(event_loop, anyhow::Error::new(e).context("Failed to create window")),
        };

        let surface = match SurfaceRenderer::new(window.clone()) {
            Ok(surface) => surface,
            Err(e) => return self.fail(event_loop, e.context("Failed to initialize renderer")),
        };

        let window = Window::new(window);
        let dims = window.dimensions();
        self.viewer.on_resize(dims.width, dims.height);
        window.request_redraw();

        self.window = Some(window);
        self.surface = Some(surface);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    error!("Render error: {:#}", e);
                }
            }
            event => {
                let Some(window) = &self.window else {
                    return;
                };

                if let WindowEvent::Resized(size) = event {
                    if let Some(surface) = &mut self.surface {
                        surface.resize(size.width, size.height);
                    }
                    window.request_redraw();
                }

                self.input.process_event(&event, &mut self.viewer, window);
            }
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    info!("Attempting to load: {}", cli.path.display());

    let document = Document::open(&cli.path)
        .with_context(|| format!("Failed to load GLB file: {}", cli.path.display()))?;
    let mesh = extract_mesh(&document, MeshSelection::default())
        .with_context(|| format!("Model {} has no renderable mesh primitive", cli.path.display()))?;
    let viewer = Viewer::new(SceneState::new(mesh), cli.width, cli.height);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut app = App::new(viewer, cli.width, cli.height);

    info!("Starting main loop - drag with the left mouse button to rotate, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(if app.failed { ExitCode::from(1) } else { ExitCode::SUCCESS })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}
