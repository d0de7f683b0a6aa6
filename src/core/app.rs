// ============================================
// App - Главный обработчик приложения
// ============================================

use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::systems::{InitSystem, InputAction, InputSystem, RenderSystem, UpdateSystem};

use super::config::DemoConfig;
use super::error::DemoError;
use super::resources::SceneResources;

/// Главное приложение
pub struct App {
    resources: SceneResources,
}

impl App {
    pub fn new(config: DemoConfig) -> Result<Self, DemoError> {
        Ok(Self {
            resources: InitSystem::create_resources(config)?,
        })
    }

    /// Ошибка, остановившая цикл событий
    pub fn take_error(&mut self) -> Option<DemoError> {
        self.resources.fatal.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: DemoError) {
        self.resources.fatal = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DemoError> {
        let window_config = &self.resources.config.window;
        let window_attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(window_config.width, window_config.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        InitSystem::init_rendering(&mut self.resources, window)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resources.window.is_none() {
            if let Err(err) = self.create_window(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.resources.renderer {
                    renderer.resize(physical_size);
                    self.resources.camera.resize(physical_size.width, physical_size.height);
                    self.resources.overlay.resize(renderer.queue(), physical_size.width, physical_size.height);
                }
            }

            WindowEvent::Focused(false) => {
                InputSystem::focus_lost(&mut self.resources);
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(keycode),
                    state,
                    ..
                },
                ..
            } => {
                if let Some(InputAction::Exit) = InputSystem::process_keyboard(&mut self.resources, keycode, state) {
                    event_loop.exit();
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                InputSystem::process_mouse_button(&mut self.resources, button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                InputSystem::process_mouse_wheel(&mut self.resources, delta);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if self.resources.limiter.is_due(now) {
                    self.resources.limiter.mark_frame(now);

                    // Update
                    UpdateSystem::update(&mut self.resources);
                }

                // Render
                RenderSystem::render(&mut self.resources, event_loop);
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            InputSystem::process_mouse_motion(&mut self.resources, delta);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.resources.limiter.is_due(Instant::now()) {
            if let Some(window) = &self.resources.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.resources.limiter.next_deadline()));
    }
}

/// Запуск сцены
pub fn run(config: DemoConfig) -> Result<(), DemoError> {
    println!("=== Controls ===");
    println!("Arrows / WASD - Move marker");
    println!("RMB + Mouse - Orbit camera");
    println!("Mouse wheel - Zoom");
    println!("Escape - Quit");
    println!("================");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
