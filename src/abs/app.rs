//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;
use sdl2::{event::Event, event::WindowEvent, keyboard::Scancode};

use crate::{
    config::WindowConfig,
    error::BootstrapError,
    frame_loop::{Platform, PolledEvents},
};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Fields drop in declaration order, so the GL context goes before the window and SDL itself
/// shuts down last.
pub struct App {
    pub gl: Arc<glow::Context>,
    gl_context: sdl2::video::GLContext,
    event_pump: sdl2::EventPump,
    window: sdl2::video::Window,
    _video_subsystem: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
}

impl App {
    /// Creates a window with a current OpenGL 3.3 core context.
    pub fn new(config: &WindowConfig) -> Result<Self, BootstrapError> {
        let sdl = sdl2::init().map_err(BootstrapError::Init)?;
        let video_subsystem = sdl.video().map_err(BootstrapError::Video)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| BootstrapError::Window(e.to_string()))?;
        let gl_context = window
            .gl_create_context()
            .map_err(BootstrapError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(BootstrapError::Context)?;

        let swap_interval = if config.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(swap_interval) {
            log::warn!("cannot set swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        if version.is_empty() {
            return Err(BootstrapError::Loader(
                "GL_VERSION is empty, function pointers did not load".to_string(),
            ));
        }
        log::info!(
            "created {}x{} window with OpenGL {version}",
            config.width,
            config.height
        );

        let event_pump = sdl.event_pump().map_err(BootstrapError::EventPump)?;

        unsafe {
            gl.viewport(0, 0, config.width as i32, config.height as i32);
        }

        Ok(Self {
            gl: Arc::new(gl),
            gl_context,
            event_pump,
            window,
            _video_subsystem: video_subsystem,
            _sdl: sdl,
        })
    }
}

impl Platform for App {
    fn poll_events(&mut self) -> PolledEvents {
        let mut events = PolledEvents::default();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.close_requested = true,
                Event::Window {
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } => {
                    unsafe {
                        self.gl.viewport(0, 0, width, height);
                    }
                    events.resized = Some((width.max(0) as u32, height.max(0) as u32));
                }
                _ => {}
            }
        }
        events
    }

    fn escape_pressed(&self) -> bool {
        self.event_pump
            .keyboard_state()
            .is_scancode_pressed(Scancode::Escape)
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }

    fn terminate(self) {
        let Self {
            gl,
            gl_context,
            event_pump,
            window,
            _video_subsystem: video_subsystem,
            _sdl: sdl,
        } = self;
        if Arc::strong_count(&gl) > 1 {
            log::warn!("GL function table still shared at shutdown");
        }
        drop(gl);
        drop(gl_context);
        drop(event_pump);
        drop(window);
        drop(video_subsystem);
        drop(sdl);
        log::info!("windowing terminated");
    }
}
