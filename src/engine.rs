//! The engine context and frame loop.

use std::path::Path;
use std::time::Duration;
use std::time::Instant;

use crate::config;
use crate::config::EngineConfig;
use crate::config::FontData;
use crate::error::Result;
use crate::events::Events;
use crate::gfx::backend::Backend;
use crate::gfx::backend::Event;
use crate::gfx::console::Console;
use crate::gfx::palette::Palette;
use crate::gfx::sprite::Sprites;
use crate::gfx::text::Font;
use crate::gfx::text::TextRenderer;
use crate::gfx::texture::Textures;
use crate::input::Input;
use crate::menu::Command;
use crate::menu::Frame;
use crate::menu::Menus;
use crate::timing::FrameTimer;
use crate::timing::SystemTimer;

/// How often stage timings are logged.
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Owner of everything that lives for the whole program: the backend and its
/// textures, the console, sprites, input state, events and menus.
///
/// Each call to [`Engine::step()`] runs one frame:
/// 1. start a new input frame and drain the backend's events;
/// 2. update every active menu;
/// 3. apply the commands the menus issued;
/// 4. draw the console, then sprites, and present;
/// 5. sleep out the rest of the frame, unless the backend paces itself.
pub struct Engine {
  config: EngineConfig,
  textures: Textures,
  console: Console,
  sprites: Sprites,
  input: Input,
  events: Events,
  menus: Menus,
  commands: Vec<Command>,
  frame_timer: FrameTimer,
  system_timer: SystemTimer,
  quit: bool,
}

impl Engine {
  /// Creates an engine drawing through `backend`, loading the palettes and
  /// font named in `config`.
  pub fn new(config: EngineConfig, backend: Box<dyn Backend>) -> Result<Self> {
    let mut palette = Palette::new();
    for path in &config.palette_paths {
      palette.load(path)?;
    }
    let mut textures = Textures::new(backend, palette);

    let mut font_data: FontData = config::load_json(&config.font_path)?;
    if font_data.png_path.is_relative() {
      if let Some(dir) = config.font_path.parent() {
        font_data.png_path = dir.join(&font_data.png_path);
      }
    }
    let font = Font::load(&font_data, &mut textures)?;

    let mut text = TextRenderer::new(font);
    text.set_size_scale(config.font_scale);
    let mut console = Console::new(text);
    let (w, h) = textures.backend().screen_size();
    console.resize(0, 0, w as i32, h as i32);

    tracing::info!(
      "started {:?}: {}x{} px, {}x{} cells",
      config.title,
      w,
      h,
      console.width(),
      console.height()
    );

    Ok(Self {
      config,
      textures,
      console,
      sprites: Sprites::new(),
      input: Input::new(),
      events: Events::new(),
      menus: Menus::new(),
      commands: Vec::new(),
      frame_timer: FrameTimer::new(),
      system_timer: SystemTimer::new(),
      quit: false,
    })
  }

  /// Loads the init file at `config_path` (creating it if needed) and starts
  /// an engine from it.
  pub fn from_config_file(
    config_path: &Path,
    backend: Box<dyn Backend>,
  ) -> Result<Self> {
    Self::new(EngineConfig::load_or_default(config_path)?, backend)
  }

  #[inline]
  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  #[inline]
  pub fn console(&mut self) -> &mut Console {
    &mut self.console
  }

  #[inline]
  pub fn textures(&mut self) -> &mut Textures {
    &mut self.textures
  }

  #[inline]
  pub fn sprites(&mut self) -> &mut Sprites {
    &mut self.sprites
  }

  #[inline]
  pub fn input(&self) -> &Input {
    &self.input
  }

  #[inline]
  pub fn events(&mut self) -> &mut Events {
    &mut self.events
  }

  #[inline]
  pub fn menus(&mut self) -> &mut Menus {
    &mut self.menus
  }

  #[inline]
  pub fn frame_timer(&self) -> &FrameTimer {
    &self.frame_timer
  }

  #[inline]
  pub fn system_timer(&self) -> &SystemTimer {
    &self.system_timer
  }

  /// Returns whether a quit has been requested.
  #[inline]
  pub fn quitting(&self) -> bool {
    self.quit
  }

  /// Requests that the loop stop before the next frame.
  pub fn quit(&mut self) {
    self.quit = true;
  }

  /// Runs one frame. Returns `false`, without doing anything, once a quit
  /// has been requested.
  pub fn step(&mut self) -> Result<bool> {
    if self.quit {
      return Ok(false);
    }

    let input_timer = self.system_timer.start("input");
    self.input.begin_frame(Instant::now());
    while let Some(event) = self.textures.backend_mut().poll_event()? {
      match event {
        Event::KeyDown {
          code,
          modifiers,
          repeat,
        } => self.input.press(code, modifiers, repeat),
        Event::KeyUp(code) => self.input.release(code),
        Event::Resized(w, h) => {
          tracing::debug!("screen resized to {}x{}", w, h);
          self.console.resize(0, 0, w as i32, h as i32);
        }
        Event::Quit => {
          tracing::info!("quit requested by backend");
          self.quit = true;
        }
      }
    }
    input_timer.finish();

    let menus_timer = self.system_timer.start("menus");
    let mut frame = Frame::new(
      &mut self.console,
      &mut self.input,
      &mut self.sprites,
      &mut self.textures,
      &mut self.events,
      &mut self.commands,
    );
    self.menus.update(&mut frame);
    for command in self.commands.drain(..) {
      if !self.menus.apply(&command)? {
        self.quit = true;
      }
    }
    menus_timer.finish();

    let render_timer = self.system_timer.start("render");
    self.textures.backend_mut().clear();
    self.console.render(&mut self.textures);
    self.sprites.render(&mut self.textures);
    self.textures.backend_mut().present()?;
    render_timer.finish();

    self.system_timer.report(REPORT_INTERVAL);
    if self.config.vsync {
      self.frame_timer.end_frame_unpaced();
    } else {
      self.frame_timer.end_frame(self.config.target_fps);
    }
    Ok(true)
  }

  /// Runs frames until a quit is requested.
  pub fn run(&mut self) -> Result<()> {
    while self.step()? {}
    tracing::info!(
      "stopped after {} frames",
      self.frame_timer.frame_count()
    );
    Ok(())
  }
}
