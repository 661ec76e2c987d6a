//! `curses`-style terminal backend.
//!
//! Note that this module doesn't *actually* use `libcurses`, and merely
//! emulates its behavior at a high level in terms of `crossterm`.
//!
//! The terminal is treated as a screen of `cols * cell_w` by `rows * cell_h`
//! pixels. Draw calls are snapped to the character cells they start in; glyph
//! draws print their glyph in the texture's color mod, and anything else
//! paints its cells' background. Frames are double-buffered, and only cells
//! that changed since the last frame are written out.

use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::io;
use std::mem;
use std::path::Path;
use std::time::Duration;

use crossterm::event as ct;

use crate::error::Error;
use crate::error::Result;
use crate::gfx::backend::Backend;
use crate::gfx::backend::DrawCall;
use crate::gfx::backend::Event;
use crate::gfx::backend::TextureId;
use crate::gfx::texel;
use crate::gfx::texel::colors;
use crate::gfx::texel::Rgb;
use crate::gfx::texel::Texel;
use crate::input::KeyCode;
use crate::input::KeyModifiers;

/// A terminal context.
pub struct Curses<W: io::Write = io::Stdout> {
  w: W,
  cell: (u16, u16),
  dims: (usize, usize),

  front: Vec<Texel>,
  back: Vec<Texel>,
  force_redraw: bool,

  next_id: u32,
  textures: HashMap<TextureId, Rgb>,

  reports_releases: bool,
  pressed_now: HashSet<KeyCode>,
  pressed_before: HashSet<KeyCode>,
  pending: VecDeque<Event>,
  flushing: bool,
}

impl Curses {
  /// Initializes the terminal on `stdout`, treating each character cell as
  /// `cell` pixels.
  pub fn init(cell: (u16, u16)) -> Result<Curses> {
    Curses::with(io::stdout(), cell)
  }
}

impl<W: io::Write> Curses<W> {
  /// Initializes the terminal environment for `w`.
  pub fn with(mut w: W, cell: (u16, u16)) -> Result<Curses<W>> {
    crossterm::execute!(
      w,
      crossterm::terminal::EnterAlternateScreen,
      crossterm::cursor::Hide,
      crossterm::terminal::DisableLineWrap,
    )?;
    crossterm::terminal::enable_raw_mode()?;

    let reports_releases =
      crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
    if reports_releases {
      crossterm::execute!(
        w,
        ct::PushKeyboardEnhancementFlags(
          ct::KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        )
      )?;
    } else {
      tracing::info!("terminal does not report key releases; synthesizing them");
    }

    let (cols, rows) = crossterm::terminal::size()?;
    let cell = (cell.0.max(1), cell.1.max(1));
    let mut curses = Curses {
      w,
      cell,
      dims: (0, 0),
      front: Vec::new(),
      back: Vec::new(),
      force_redraw: true,
      next_id: 0,
      textures: HashMap::new(),
      reports_releases,
      pressed_now: HashSet::new(),
      pressed_before: HashSet::new(),
      pending: VecDeque::new(),
      flushing: false,
    };
    curses.resize(cols, rows);
    Ok(curses)
  }

  /// Returns the terminal size, as `(cols, rows)`.
  pub fn dims(&self) -> (usize, usize) {
    self.dims
  }

  fn resize(&mut self, cols: u16, rows: u16) {
    self.dims = (cols as usize, rows as usize);
    let len = self.dims.0 * self.dims.1;
    self.front = vec![Texel::empty(); len];
    self.back = vec![Texel::empty(); len];
    self.force_redraw = true;
  }

  fn cell_index(&self, col: i64, row: i64) -> Option<usize> {
    let (cols, rows) = self.dims;
    if col < 0 || row < 0 || col as usize >= cols || row as usize >= rows {
      return None;
    }
    Some(row as usize * cols + col as usize)
  }

  /// Translates one `crossterm` event, tracking presses for synthesized
  /// releases.
  fn translate(&mut self, event: ct::Event) -> Option<Event> {
    match event {
      ct::Event::Resize(cols, rows) => {
        self.resize(cols, rows);
        let (w, h) = self.screen_size();
        Some(Event::Resized(w, h))
      }
      ct::Event::Key(ct::KeyEvent {
        code: KeyCode::Char('c'),
        modifiers,
        ..
      }) if modifiers.contains(KeyModifiers::CONTROL) => Some(Event::Quit),
      ct::Event::Key(e) => match e.kind {
        ct::KeyEventKind::Release => Some(Event::KeyUp(e.code)),
        kind => {
          let repeat = if self.reports_releases {
            kind == ct::KeyEventKind::Repeat
          } else {
            let fresh = self.pressed_now.insert(e.code);
            self.pressed_before.contains(&e.code) || !fresh
          };
          Some(Event::KeyDown {
            code: e.code,
            modifiers: e.modifiers,
            repeat,
          })
        }
      },
      _ => None,
    }
  }

  /// Ends a polling batch: any key pressed last batch and not this one is
  /// considered released.
  fn end_batch(&mut self) {
    if self.reports_releases {
      return;
    }

    let now = mem::take(&mut self.pressed_now);
    for &code in self.pressed_before.difference(&now) {
      self.pending.push_back(Event::KeyUp(code));
    }
    self.pressed_before = now;
  }

  /// Clean up whatever mess the terminal made.
  fn cleanup(&mut self) -> io::Result<()> {
    if self.reports_releases {
      crossterm::execute!(self.w, ct::PopKeyboardEnhancementFlags)?;
    }
    crossterm::execute!(
      self.w,
      crossterm::style::ResetColor,
      crossterm::terminal::LeaveAlternateScreen,
      crossterm::cursor::Show,
      crossterm::terminal::EnableLineWrap,
    )?;
    crossterm::terminal::disable_raw_mode()?;
    self.w.flush()
  }
}

fn to_crossterm(color: texel::Color) -> crossterm::style::Color {
  match color {
    texel::Color::Rgb(rgb) => crossterm::style::Color::Rgb {
      r: rgb.red,
      g: rgb.green,
      b: rgb.blue,
    },
    texel::Color::Reset => crossterm::style::Color::Reset,
  }
}

impl<W: io::Write> Backend for Curses<W> {
  fn screen_size(&self) -> (u16, u16) {
    let (cols, rows) = self.dims;
    (
      (cols as u16).saturating_mul(self.cell.0),
      (rows as u16).saturating_mul(self.cell.1),
    )
  }

  fn load_texture(&mut self, path: &Path) -> Result<TextureId> {
    if !path.exists() {
      return Err(Error::MissingTexture(path.to_owned()));
    }

    let id = TextureId(self.next_id);
    self.next_id += 1;
    self.textures.insert(id, colors::WHITE);
    Ok(id)
  }

  fn destroy_texture(&mut self, texture: TextureId) {
    self.textures.remove(&texture);
  }

  fn color_mod(&self, texture: TextureId) -> Rgb {
    self
      .textures
      .get(&texture)
      .copied()
      .unwrap_or(colors::WHITE)
  }

  fn set_color_mod(&mut self, texture: TextureId, color: Rgb) {
    if let Some(c) = self.textures.get_mut(&texture) {
      *c = color;
    }
  }

  fn draw(&mut self, call: DrawCall) {
    let tint = self.color_mod(call.texture);
    let (cw, ch) = (self.cell.0 as i64, self.cell.1 as i64);
    let col = (call.dest.x() as i64).div_euclid(cw);
    let row = (call.dest.y() as i64).div_euclid(ch);

    match call.glyph {
      Some(glyph) => {
        if let Some(idx) = self.cell_index(col, row) {
          self.back[idx] = self.back[idx].with_glyph(glyph).with_fg(tint);
        }
      }
      None => {
        let cols = (call.dest.width() as i64 + cw - 1) / cw;
        let rows = (call.dest.height() as i64 + ch - 1) / ch;
        for r in row..row + rows {
          for c in col..col + cols {
            if let Some(idx) = self.cell_index(c, r) {
              self.back[idx] = self.back[idx].with_bg(tint);
            }
          }
        }
      }
    }
  }

  fn clear(&mut self) {
    for tx in &mut self.back {
      *tx = Texel::empty();
    }
  }

  fn present(&mut self) -> Result<()> {
    use crossterm::style::Colors;

    let cols = self.dims.0.max(1);
    for (i, (new, old)) in self.back.iter().zip(&self.front).enumerate() {
      if !self.force_redraw && new == old {
        continue;
      }

      crossterm::queue!(
        self.w,
        crossterm::cursor::MoveTo((i % cols) as u16, (i / cols) as u16),
        crossterm::style::SetColors(Colors {
          foreground: Some(to_crossterm(new.fg())),
          background: Some(to_crossterm(new.bg())),
        }),
        crossterm::style::Print(new.glyph().unwrap_or(' ')),
      )?;
    }
    self.w.flush()?;

    self.force_redraw = false;
    mem::swap(&mut self.front, &mut self.back);
    Ok(())
  }

  fn poll_event(&mut self) -> Result<Option<Event>> {
    if let Some(e) = self.pending.pop_front() {
      return Ok(Some(e));
    }
    if self.flushing {
      self.flushing = false;
      return Ok(None);
    }

    while ct::poll(Duration::default())? {
      if let Some(e) = self.translate(ct::read()?) {
        return Ok(Some(e));
      }
    }

    self.end_batch();
    match self.pending.pop_front() {
      Some(e) => {
        self.flushing = true;
        Ok(Some(e))
      }
      None => Ok(None),
    }
  }
}

impl<W: io::Write> Drop for Curses<W> {
  fn drop(&mut self) {
    if let Err(e) = self.cleanup() {
      tracing::error!("could not restore terminal: {}", e);
    }
  }
}
