use std::time::Duration;

use crate::app::camera::{MouseButtons, OrbitCamera};
use crate::app::settings::ViewerSettings;
use crate::assets::AssetCache;
use crate::console::{Console, ConsoleKey, Modifiers};
use crate::errors::CommandError;
use crate::render::Renderer;
use crate::scene::Scene;
use crate::utils::Timer;

/// Key presses delivered by the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    F4,
}

impl Key {
    fn to_console(self) -> Option<ConsoleKey> {
        Some(match self {
            Self::Char(c) => ConsoleKey::Char(c),
            Self::Enter => ConsoleKey::Enter,
            Self::Backspace => ConsoleKey::Backspace,
            Self::Left => ConsoleKey::Left,
            Self::Right => ConsoleKey::Right,
            Self::Home => ConsoleKey::Home,
            Self::End => ConsoleKey::End,
            Self::Up => ConsoleKey::Up,
            Self::Down => ConsoleKey::Down,
            Self::Escape | Self::F4 => return None,
        })
    }
}

/// What the windowing backend should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Continue,
    Quit,
    ToggleFullscreen,
}

/// The interactive viewer: scene, assets, console and camera, driven by
/// input events and [`render_frame`](Self::render_frame) calls from a window
/// backend.
pub struct Viewer {
    pub settings: ViewerSettings,
    pub scene: Scene,
    pub assets: AssetCache,
    pub console: Console,
    pub camera: OrbitCamera,
    pub timer: Timer,

    console_visible: bool,
    fullscreen: bool,
    width: u32,
    height: u32,
}

impl Viewer {
    #[must_use]
    pub fn new(settings: ViewerSettings) -> Self {
        let mut console = Console::new();
        let mut assets = AssetCache::new();
        for dir in &settings.asset_dirs {
            if !dir.is_dir() {
                console.warn(&format!("asset directory {} does not exist", dir.display()));
            }
            assets.register_directory(dir.clone());
        }

        let mut camera = OrbitCamera::new(settings.camera_distance, settings.camera_yaw, settings.camera_pitch);
        camera.fov = settings.fov;
        camera.near = settings.near;
        camera.far = settings.far;

        Self {
            width: settings.width,
            height: settings.height,
            settings,
            scene: Scene::new(),
            assets,
            console,
            camera,
            timer: Timer::new(),
            console_visible: false,
            fullscreen: false,
        }
    }

    #[must_use]
    pub fn console_visible(&self) -> bool {
        self.console_visible
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Runs one console line as if it had been typed. The result is also
    /// printed to the console screen.
    pub fn run_command(&mut self, line: &str) -> Result<Vec<String>, CommandError> {
        self.console.enter(line, &mut self.scene, &self.assets)
    }

    /// Runs every line of a scene-loading script.
    ///
    /// Command errors are printed and the script carries on. An asset load
    /// failure stops the script and is returned.
    pub fn run_script(&mut self, script: &str) -> Result<(), CommandError> {
        for line in script.lines() {
            if let Err(err @ CommandError::AssetLoad(_)) = self.run_command(line) {
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn key(&mut self, key: Key, mods: Modifiers) -> ViewerAction {
        if mods.contains(Modifiers::ALT) {
            match key {
                Key::Enter => return self.toggle_fullscreen(),
                Key::F4 => return ViewerAction::Quit,
                _ => {}
            }
        }
        if key == Key::Char('`') {
            self.console_visible = !self.console_visible;
            return ViewerAction::Continue;
        }

        if self.console_visible {
            if let Some(key) = key.to_console() {
                self.console.key(key, mods, &mut self.scene, &self.assets);
            }
            return ViewerAction::Continue;
        }

        match key {
            Key::Escape | Key::Char('q') => ViewerAction::Quit,
            Key::Char('f') => self.toggle_fullscreen(),
            _ => ViewerAction::Continue,
        }
    }

    fn toggle_fullscreen(&mut self) -> ViewerAction {
        self.fullscreen = !self.fullscreen;
        ViewerAction::ToggleFullscreen
    }

    pub fn mouse_button(&mut self, button: MouseButtons, pressed: bool, x: f32, y: f32) {
        self.camera.mouse_button(button, pressed, x, y);
    }

    pub fn mouse_motion(&mut self, x: f32, y: f32) {
        self.camera.mouse_motion(x, y);
    }

    /// Resolves and draws the scene. Returns the number of objects drawn.
    pub fn render_frame<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        self.timer.tick();
        self.draw_frame(renderer)
    }

    /// Like [`render_frame`](Self::render_frame), but the frame clock moves
    /// forward by exactly `delta` instead of reading the wall clock.
    pub fn render_frame_after<R: Renderer + ?Sized>(&mut self, renderer: &mut R, delta: Duration) -> usize {
        self.timer.advance(delta);
        self.draw_frame(renderer)
    }

    fn draw_frame<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        let projection = self.camera.projection_matrix(self.width, self.height);
        let view = self.camera.view_matrix();

        renderer.begin_frame(self.settings.clear_color);
        let draws = self.scene.draw(&projection, &view, renderer);
        renderer.end_frame();

        log::trace!("Frame {} drew {draws} object(s)", self.timer.frame_count);
        draws
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}
