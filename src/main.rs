mod actions;
mod config;
mod gpu;
mod ui;

use guikit::{AudioOutput, Canvas, CursorIcon, Gui, InputEvent, MouseButton, Vec2};
use tao::dpi::LogicalSize;
use tao::event::{ElementState, Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop};
use tao::window::{Window, WindowBuilder};

use crate::config::Config;
use crate::gpu::GpuContext;

/// Everything one window needs. `gpu` is declared before `window` so it drops first.
struct Demo {
    gpu: GpuContext,
    window: Window,
    gui: Gui,
    canvas: Canvas,
    clear: wgpu::Color,
}

impl Demo {
    fn dispatch(&mut self, event: InputEvent) {
        if let Err(e) = self.gui.handle_event(&event, &mut self.canvas) {
            log::error!("Event error: {}", e);
        }
        self.window.set_cursor_icon(match self.canvas.cursor() {
            CursorIcon::Arrow => tao::window::CursorIcon::Default,
            CursorIcon::Hand => tao::window::CursorIcon::Hand,
        });
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.canvas.resize(width as f32, height as f32);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if let Err(e) = self.gui.draw(&mut self.canvas) {
            log::error!("Draw error: {}", e);
        }
        let commands = self.canvas.take_commands();
        self.gpu.render(&commands, self.clear)
    }
}

fn map_button(button: tao::event::MouseButton) -> MouseButton {
    match button {
        tao::event::MouseButton::Left => MouseButton::Left,
        tao::event::MouseButton::Right => MouseButton::Right,
        tao::event::MouseButton::Middle => MouseButton::Middle,
        tao::event::MouseButton::Other(code) => MouseButton::Other(code),
        _ => MouseButton::Other(0),
    }
}

fn clear_color(rgba: [u8; 4]) -> wgpu::Color {
    let channel = |c: u8| c as f64 / 255.0;
    wgpu::Color {
        r: channel(rgba[0]),
        g: channel(rgba[1]),
        b: channel(rgba[2]),
        a: channel(rgba[3]),
    }
}

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            return;
        }
    };

    let event_loop = EventLoop::new();
    let [width, height] = config.window.size;
    let window = match WindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(LogicalSize::new(width, height))
        .build(&event_loop)
    {
        Ok(window) => window,
        Err(e) => {
            log::error!("Failed to create window: {}", e);
            return;
        }
    };

    let size = window.inner_size();
    let gpu = match GpuContext::new(&window, size.width, size.height) {
        Ok(gpu) => gpu,
        Err(e) => {
            log::error!("Failed to initialize GPU: {}", e);
            return;
        }
    };

    let canvas = Canvas::new(size.width as f32, size.height as f32);
    let mut gui = ui::build_gui(&config, canvas.id());

    // The stream stops when this is dropped, so it lives as long as the loop.
    let audio = match AudioOutput::open_default() {
        Ok(output) => {
            gui.set_audio(output.handle());
            Some(output)
        }
        Err(e) => {
            log::warn!("No audio output, widgets stay silent: {}", e);
            None
        }
    };

    let mut demo = Demo {
        gpu,
        window,
        gui,
        canvas,
        clear: clear_color(config.window.background),
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        let _ = &audio;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                demo.canvas.set_pointer(position);
                demo.dispatch(InputEvent::PointerMoved { position });
            }

            Event::WindowEvent {
                event: WindowEvent::CursorLeft { .. },
                ..
            } => {
                demo.canvas.clear_pointer();
                let position = demo.canvas.pointer();
                demo.dispatch(InputEvent::PointerMoved { position });
            }

            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                let button = map_button(button);
                demo.dispatch(match state {
                    ElementState::Pressed => InputEvent::ButtonPressed { button },
                    _ => InputEvent::ButtonReleased { button },
                });
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => {
                demo.resize(size.width, size.height);
            }

            Event::MainEventsCleared => {
                demo.window.request_redraw();
            }

            Event::RedrawRequested(_) => {
                if let Err(e) = demo.render() {
                    log::error!("Render error: {:?}", e);
                    match e {
                        wgpu::SurfaceError::Lost => {
                            let size = demo.window.inner_size();
                            demo.resize(size.width, size.height);
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            *control_flow = ControlFlow::Exit;
                        }
                        _ => {}
                    }
                }
            }

            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                demo.canvas.close();
                demo.dispatch(InputEvent::Closed);
                *control_flow = ControlFlow::Exit;
            }

            _ => (),
        }
    });
}
