//! The per-frame loop and the shutdown sequence.
//!
//! The loop is written against the [`Platform`] and [`Renderer`] traits. The SDL application
//! implements the former and the GL scene the latter.

use std::time::{Duration, Instant};

/// Lifecycle of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    Closing,
    Terminated,
}

/// Input gathered from one non-blocking event poll.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PolledEvents {
    /// The OS asked the window to close.
    pub close_requested: bool,
    /// New drawable size, if the window was resized.
    pub resized: Option<(u32, u32)>,
}

/// The windowing collaborator: events, key state and presentation.
pub trait Platform {
    /// Processes pending events without blocking.
    fn poll_events(&mut self) -> PolledEvents;

    /// Whether the Escape key is currently held.
    fn escape_pressed(&self) -> bool;

    /// Presents the back buffer. May wait for vertical sync.
    fn swap_buffers(&mut self);

    /// Shuts the windowing library down.
    fn terminate(self);
}

/// Something that can draw one frame.
pub trait Renderer {
    /// Clears and draws the frame for the given time since the scene started.
    fn render(&mut self, elapsed: Duration);

    /// Adapts to a new drawable size.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Unbinds and deletes every GPU object owned by the renderer.
    fn release(self);
}

/// Drives [`LoopState`] transitions and counts frames.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frames_presented: u64,
    frames_drawn: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Uninitialized,
            frames_presented: 0,
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    fn transition(&mut self, from: LoopState, to: LoopState) -> bool {
        if self.state != from {
            log::warn!("ignoring loop transition {:?} -> {to:?} from {:?}", from, self.state);
            return false;
        }
        log::debug!("frame loop {from:?} -> {to:?}");
        self.state = to;
        true
    }

    pub fn start(&mut self) -> bool {
        self.transition(LoopState::Uninitialized, LoopState::Running)
    }

    /// Sets the close flag. Has no effect unless the loop is running.
    pub fn request_close(&mut self) -> bool {
        self.transition(LoopState::Running, LoopState::Closing)
    }

    pub fn terminate(&mut self) -> bool {
        self.transition(LoopState::Closing, LoopState::Terminated)
    }

    /// Runs frames until the close flag is set.
    ///
    /// Without a renderer nothing is drawn, but events are still polled and buffers swapped so
    /// the window stays responsive and closable.
    pub fn run<P: Platform, R: Renderer>(
        &mut self,
        platform: &mut P,
        mut renderer: Option<&mut R>,
        start: Instant,
    ) {
        if !self.start() {
            return;
        }

        while self.is_running() {
            if let Some(renderer) = renderer.as_deref_mut() {
                renderer.render(start.elapsed());
                self.frames_drawn += 1;
            }

            let events = platform.poll_events();
            if let (Some((width, height)), Some(renderer)) =
                (events.resized, renderer.as_deref_mut())
            {
                renderer.resize(width, height);
            }
            if events.close_requested || platform.escape_pressed() {
                self.request_close();
            }

            platform.swap_buffers();
            self.frames_presented += 1;
        }
    }
}

/// Releases the scene, if one was built, then terminates the platform exactly once.
pub fn shutdown<P: Platform, R: Renderer>(
    mut frame_loop: FrameLoop,
    platform: P,
    renderer: Option<R>,
) -> FrameLoop {
    if frame_loop.state() == LoopState::Running {
        frame_loop.request_close();
    }
    if frame_loop.state() == LoopState::Uninitialized {
        frame_loop.state = LoopState::Closing;
    }

    match renderer {
        Some(renderer) => renderer.release(),
        None => log::debug!("no scene to release"),
    }
    platform.terminate();
    frame_loop.terminate();

    log::info!(
        "shut down after {} frames ({} drawn)",
        frame_loop.frames_presented(),
        frame_loop.frames_drawn()
    );
    frame_loop
}
