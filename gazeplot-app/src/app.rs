use anyhow::Result;
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use tiny_skia::Pixmap;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

/// Presents one composed overlay in a window until the operator dismisses
/// it. The render is static; redraws only re-copy the composed pixmap.
pub struct Viewer {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    overlay: Pixmap,
    title: String,
    should_exit: bool,
}

impl Viewer {
    pub fn new(overlay: Pixmap, title: String) -> Self {
        Self {
            window: None,
            pixels: None,
            overlay,
            title,
            should_exit: false,
        }
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        println!("Press ESC or close the window to exit.");
        event_loop.run_app(&mut self).map_err(Into::into)
    }

    fn create_window_and_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.overlay.width(), self.overlay.height()));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let physical_size = window.inner_size();

        let surface_texture =
            SurfaceTexture::new(physical_size.width, physical_size.height, window.clone());
        self.pixels = Some(Pixels::new(
            self.overlay.width(),
            self.overlay.height(),
            surface_texture,
        )?);

        window.request_redraw();
        self.window = Some(window);

        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        if let Some(pixels) = self.pixels.as_mut() {
            pixels.frame_mut().copy_from_slice(self.overlay.data());
            pixels.render()?;
        }
        Ok(())
    }

    fn handle_resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        if let Some(pixels) = &mut self.pixels {
            if let Err(e) = pixels.resize_surface(new_size.width, new_size.height) {
                eprintln!("Failed to resize surface: {}", e);
            }
        }
    }

    fn handle_input(&mut self, key: winit::keyboard::PhysicalKey, event_loop: &ActiveEventLoop) {
        use winit::keyboard::{KeyCode, PhysicalKey};
        if let PhysicalKey::Code(KeyCode::Escape) = key {
            self.should_exit = true;
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window_and_surface(event_loop) {
                eprintln!("Failed to create window and surface: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.should_exit = true;
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    eprintln!("Failed to render overlay: {}", e);
                    event_loop.exit();
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() => {
                self.handle_input(event.physical_key, event_loop);
            }
            WindowEvent::Resized(size) => {
                self.handle_resize(size);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
        }
    }
}
