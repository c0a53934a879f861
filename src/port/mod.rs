//! Graphics port: binds the widget scene to one panel surface
//!
//! One display is registered per port. Widgets are only touched through
//! [`GraphicsPort::lock`]; [`GraphicsPort::task_handler`] takes the same lock,
//! renders the scene into the back buffer and pushes it to the panel.
//!
//! ```rust,ignore
//! let port = GraphicsPort::init();
//! let display = port.add_display(panel.surface(), board::DISPLAY)?;
//! {
//!     let mut guard = port.lock()?;
//!     if let Some(screen) = guard.screen_active() {
//!         screen.add_label(Label::new("Hello").aligned(Align::Center, 0, 0));
//!     }
//! }
//! loop {
//!     port.task_handler()?;
//! }
//! ```

pub mod framebuffer;
pub mod widgets;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, bail, Result};

use crate::st7789::interface::Surface;
use framebuffer::FrameBuffer;
use widgets::Screen;

/// Scan direction of the registered display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rotation {
    pub swap_xy: bool,
    pub mirror_x: bool,
    pub mirror_y: bool,
}

/// How a surface is registered with the port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub hres: u16,
    pub vres: u16,
    /// Keep two frame buffers and alternate between them
    pub double_buffer: bool,
    pub rotation: Rotation,
    /// Store RGB565 high byte first
    pub swap_bytes: bool,
}

impl DisplayConfig {
    /// Size of one frame buffer in bytes
    pub fn buffer_bytes(&self) -> usize {
        self.hres as usize * self.vres as usize * 2
    }
}

/// Proof of a registered display, given back to [`GraphicsPort::remove_display`]
#[derive(Debug)]
pub struct DisplayHandle(());

struct Display<S> {
    surface: S,
    config: DisplayConfig,
    buffers: Vec<FrameBuffer>,
    back: usize,
    screen: Screen,
    dirty: bool,
}

impl<S: Surface> Display<S> {
    fn flush(&mut self) -> Result<()> {
        let buffer = &mut self.buffers[self.back];
        self.screen
            .render(buffer)
            .unwrap_or_else(|never| match never {});

        self.surface
            .draw_bitmap(
                0,
                0,
                self.config.hres as i32,
                self.config.vres as i32,
                buffer.as_bytes(),
            )
            .map_err(|e| anyhow!("esp_lcd_panel_draw_bitmap failed: {e:?}"))?;

        self.back = (self.back + 1) % self.buffers.len();
        self.dirty = false;
        Ok(())
    }
}

struct PortState<S> {
    display: Option<Display<S>>,
}

/// The rendering loop state shared between the UI code and the main loop
pub struct GraphicsPort<S: Surface> {
    state: Mutex<PortState<S>>,
    running: AtomicBool,
}

impl<S: Surface> GraphicsPort<S> {
    /// Create the port with no display registered
    pub fn init() -> Self {
        log::info!("Initialize graphics port");
        GraphicsPort {
            state: Mutex::new(PortState { display: None }),
            running: AtomicBool::new(true),
        }
    }

    /// Register the one display of this port.
    ///
    /// Applies the rotation to the panel and allocates the frame buffers.
    pub fn add_display(&self, mut surface: S, config: DisplayConfig) -> Result<DisplayHandle> {
        let mut state = self.state()?;
        if state.display.is_some() {
            bail!("A display is already registered");
        }

        let rotation = config.rotation;
        surface
            .swap_xy(rotation.swap_xy)
            .map_err(|e| anyhow!("esp_lcd_panel_swap_xy failed: {e:?}"))?;
        surface
            .mirror(rotation.mirror_x, rotation.mirror_y)
            .map_err(|e| anyhow!("esp_lcd_panel_mirror failed: {e:?}"))?;

        let count = if config.double_buffer { 2 } else { 1 };
        let buffers = (0..count)
            .map(|_| FrameBuffer::new(config.hres as u32, config.vres as u32, config.swap_bytes))
            .collect::<Result<Vec<_>>>()?;
        log::info!(
            "Adding display {}x{}, {} buffer(s) of {} bytes",
            config.hres,
            config.vres,
            count,
            config.buffer_bytes()
        );

        state.display = Some(Display {
            surface,
            config,
            buffers,
            back: 0,
            screen: Screen::default(),
            dirty: true,
        });
        Ok(DisplayHandle(()))
    }

    /// Take the port lock; widgets may only be touched while it is held
    pub fn lock(&self) -> Result<PortGuard<'_, S>> {
        Ok(PortGuard {
            state: self.state()?,
        })
    }

    /// Render and flush pending changes, does nothing while stopped
    pub fn task_handler(&self) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        let mut state = self.state()?;
        match state.display.as_mut() {
            Some(display) if display.dirty => display.flush(),
            _ => Ok(()),
        }
    }

    /// Pause rendering
    pub fn stop(&self) {
        log::info!("Stopping graphics port");
        self.running.store(false, Ordering::SeqCst);
    }

    /// Restart rendering, the next [`Self::task_handler`] redraws everything
    pub fn resume(&self) -> Result<()> {
        log::info!("Resuming graphics port");
        if let Some(display) = self.state()?.display.as_mut() {
            display.dirty = true;
        }
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Unregister the display and give its surface back
    pub fn remove_display(&self, handle: DisplayHandle) -> Result<S> {
        let DisplayHandle(()) = handle;
        let display = self
            .state()?
            .display
            .take()
            .ok_or_else(|| anyhow!("No display registered"))?;
        log::info!("Display removed");
        Ok(display.surface)
    }

    fn state(&self) -> Result<MutexGuard<'_, PortState<S>>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("Graphics port lock poisoned"))
    }
}

/// Scoped access to the widgets, released on drop
pub struct PortGuard<'a, S> {
    state: MutexGuard<'a, PortState<S>>,
}

impl<S> PortGuard<'_, S> {
    /// Active screen of the registered display
    pub fn screen_active(&mut self) -> Option<&mut Screen> {
        let display = self.state.display.as_mut()?;
        display.dirty = true;
        Some(&mut display.screen)
    }
}
