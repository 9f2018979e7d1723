use crossbeam_channel::Receiver;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

use smooth_slides::config::Config;
use smooth_slides::controller::{Outcome, ScrollHijackController};
use smooth_slides::input::winit as input_map;
use smooth_slides::lock::{PageLock, ScrollAuthority};
use smooth_slides::viewport::Rect;

/// Demo host: simulates the page surrounding the slide strip. Vertical wheel
/// input scrolls a page-offset cell; the strip band's visibility against the
/// window drives controller activation; the render collaborator is the log
/// stream (`translate_x` per frame while the spring is in motion).
pub struct App {
    config: Config,
    window: Option<Arc<Window>>,
    controller: Option<ScrollHijackController>,
    page_y: Arc<Mutex<f32>>,
    /// Host-side edge detection for the visibility threshold, standing in
    /// for an intersection observer's threshold callbacks.
    was_above_threshold: bool,
    epoch: Instant,
    last_frame: Instant,
    config_rx: Option<Receiver<()>>,
    _config_watcher: Option<RecommendedWatcher>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            window: None,
            controller: None,
            page_y: Arc::new(Mutex::new(0.0)),
            was_above_threshold: false,
            epoch: Instant::now(),
            last_frame: Instant::now(),
            config_rx: None,
            _config_watcher: None,
        }
    }

    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn build_controller(&self) -> ScrollHijackController {
        let mut controller = ScrollHijackController::new(
            self.config.strip.total_slides,
            self.config.strip.slide_width,
            self.config.profile.clone(),
            self.config.animation.clone(),
            Box::new(PageLock::new(self.page_y.clone())),
            ScrollAuthority::new(),
        );
        controller.on_slide_change(|index| log::info!("slide -> {index}"));
        controller
    }

    fn window_size(&self) -> Option<(f32, f32)> {
        let window = self.window.as_ref()?;
        let scale = window.scale_factor() as f32;
        let size = window.inner_size();
        Some((size.width as f32 / scale, size.height as f32 / scale))
    }

    /// Visibility ratio of the strip band against the current viewport.
    fn strip_visibility(&self) -> f32 {
        let Some((w, h)) = self.window_size() else {
            return 0.0;
        };
        let strip = Rect::new(
            0.0,
            self.config.strip.strip_top,
            w,
            self.config.strip.strip_height,
        );
        let viewport = Rect::new(0.0, *self.page_y.lock(), w, h);
        strip.visible_ratio(&viewport)
    }

    /// Report visibility to the controller only on threshold crossings, the
    /// way an intersection observer would. Level-triggered reporting would
    /// re-capture immediately after an escape-hatch release.
    fn sync_visibility(&mut self) {
        let ratio = self.strip_visibility();
        let above = ratio >= self.config.profile.activation_threshold;
        if above != self.was_above_threshold {
            self.was_above_threshold = above;
            let page_y = *self.page_y.lock();
            if let Some(controller) = self.controller.as_mut() {
                controller.observe_visibility(ratio, page_y);
            }
        }
    }

    fn scroll_page(&mut self, delta_y: f32) {
        let Some((_, h)) = self.window_size() else {
            return;
        };
        let max = (self.config.strip.page_height - h).max(0.0);
        let mut y = self.page_y.lock();
        *y = (*y - delta_y).clamp(0.0, max);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attrs = WindowAttributes::default()
            .with_title("smooth slides")
            .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 800.0));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));
        self.window = Some(window);
        self.controller = Some(self.build_controller());

        // Config file watcher for hot-reload
        let config_path = Config::config_path();
        let (tx, rx) = crossbeam_channel::bounded::<()>(1);
        let watch_path = config_path.clone();
        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
                if let Ok(event) = res {
                    if (event.kind.is_modify() || event.kind.is_create())
                        && event.paths.iter().any(|p| p == &watch_path)
                    {
                        let _ = tx.try_send(());
                    }
                }
            })
            .ok();
        if let Some(ref mut w) = watcher {
            if let Some(dir) = config_path.parent() {
                let _ = w.watch(dir, RecursiveMode::NonRecursive);
            }
        }
        self.config_rx = Some(rx);
        self._config_watcher = watcher;

        self.sync_visibility();
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let fps = self.config.animation.target_fps.max(1) as u64;
        let frame_interval = Duration::from_millis(1000 / fps);
        if let Some(window) = &self.window {
            if self.last_frame.elapsed() >= frame_interval {
                window.request_redraw();
            }
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

            WindowEvent::Resized(_) => {
                self.sync_visibility();
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scale = self
                    .window
                    .as_ref()
                    .map(|w| w.scale_factor())
                    .unwrap_or(1.0);
                let wheel = input_map::map_scroll(delta, scale);
                let now = self.now();
                let outcome = self
                    .controller
                    .as_mut()
                    .map(|c| c.handle_wheel(wheel, now))
                    .unwrap_or(Outcome::Ignored);
                if outcome != Outcome::Consumed {
                    // default behaviour: the event scrolls the page
                    self.scroll_page(wheel.delta_y);
                    self.sync_visibility();
                }
            }

            WindowEvent::Touch(touch) => {
                let scale = self
                    .window
                    .as_ref()
                    .map(|w| w.scale_factor())
                    .unwrap_or(1.0);
                let touch = input_map::map_touch(&touch, scale);
                let now = self.now();
                if let Some(controller) = self.controller.as_mut() {
                    controller.handle_touch(touch, now);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = input_map::map_key(&event) {
                    let now = self.now();
                    if let Some(controller) = self.controller.as_mut() {
                        controller.handle_key(key, now);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame).as_secs_f32().min(0.05);
                self.last_frame = now;

                // Hot-reload config if the file changed; the controller is
                // rebuilt, and dropping the old one releases any held lock.
                if self
                    .config_rx
                    .as_ref()
                    .map_or(false, |rx| rx.try_recv().is_ok())
                {
                    log::info!("config changed, reloading");
                    self.config = Config::load_or_default();
                    self.controller = Some(self.build_controller());
                    self.was_above_threshold = false;
                    self.sync_visibility();
                }

                let timestamp = self.now();
                if let Some(controller) = self.controller.as_mut() {
                    controller.tick(dt, timestamp);
                    if !controller.is_settled() {
                        log::debug!(
                            "translate_x={:.1} slide={} scrolling={}",
                            controller.translate_x(),
                            controller.current_slide(),
                            controller.is_scrolling()
                        );
                    }
                }
            }

            _ => {}
        }
    }
}
