//! Player application implementing winit ApplicationHandler

use crate::hud;
use anyhow::Context;
use sparkfall_core::SimConfig;
use sparkfall_render::{PresentPipeline, RenderContext};
use sparkfall_runtime::{command_for_key, AnimationDriver, InputEvent};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

/// Window options chosen on the command line
#[derive(Debug, Clone, Copy)]
pub struct PlayerOptions {
    pub fullscreen: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            fullscreen: false,
            width: 1280,
            height: 720,
        }
    }
}

pub struct PlayerApp {
    config: SimConfig,
    options: PlayerOptions,
    driver: Option<AnimationDriver>,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    present: Option<PresentPipeline>,

    started: Instant,
    cursor: (f64, f64),
    error: Option<anyhow::Error>,
}

impl PlayerApp {
    pub fn new(config: SimConfig, options: PlayerOptions) -> Self {
        Self {
            config,
            options,
            driver: None,
            window: None,
            render_context: None,
            present: None,
            started: Instant::now(),
            cursor: (0.0, 0.0),
            error: None,
        }
    }

    /// Error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Sparkfall")
            .with_inner_size(PhysicalSize::new(self.options.width, self.options.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );
        if self.options.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to initialize rendering")?;
        let present = PresentPipeline::new(&render_context.device, render_context.format());

        let mut config = self.config.clone();
        config.pixel_density = window.scale_factor() as f32;
        let size = window.inner_size();
        let driver = AnimationDriver::new(config, size.width, size.height);

        tracing::info!(
            width = size.width,
            height = size.height,
            density = window.scale_factor(),
            "player started"
        );

        self.window = Some(window);
        self.render_context = Some(render_context);
        self.present = Some(present);
        self.driver = Some(driver);
        Ok(())
    }

    fn push(&mut self, event: InputEvent) {
        if let Some(driver) = &mut self.driver {
            driver.push_event(event);
        }
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    }

    fn tick(&mut self) {
        let Some(driver) = &mut self.driver else {
            return;
        };
        let timestamp = self.started.elapsed().as_secs_f64() * 1000.0;
        driver.tick(timestamp);
        hud::draw_controls(driver);
    }

    fn render(&mut self) {
        let (Some(context), Some(present), Some(driver)) =
            (&mut self.render_context, &mut self.present, &self.driver)
        else {
            return;
        };

        present.upload(&context.device, &context.queue, driver.frame());

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                context.reconfigure();
                return;
            }
            Err(e) => {
                tracing::warn!(error = ?e, "surface error, frame skipped");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });
        present.draw(&mut encoder, &view);
        context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.initialize(event_loop) {
            tracing::error!(error = %err, "player failed to start");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                }
                if new_size.width > 0 && new_size.height > 0 {
                    self.push(InputEvent::Resize {
                        width: new_size.width,
                        height: new_size.height,
                    });
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(driver) = &mut self.driver {
                    driver.set_pixel_density(scale_factor as f32);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(key_code) = event.physical_key else {
                    return;
                };
                match key_code {
                    KeyCode::Escape => event_loop.exit(),
                    KeyCode::F11 => self.toggle_fullscreen(),
                    key => {
                        if let Some(command) = command_for_key(key) {
                            self.push(InputEvent::Command(command));
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.cursor;
                self.push(InputEvent::PointerDown {
                    x: x as f32,
                    y: y as f32,
                });
            }

            WindowEvent::Touch(touch) if touch.phase == TouchPhase::Started => {
                self.push(InputEvent::PointerDown {
                    x: touch.location.x as f32,
                    y: touch.location.y as f32,
                });
            }

            WindowEvent::RedrawRequested => {
                self.tick();
                self.render();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
