//! Menus and the menu registry.
//!
//! A [`Menu`] is a named screen of the program: a main menu, a settings
//! page, an inventory. Menus are registered once with [`Menus`], and any
//! number of them may be active at a time; every active menu is updated
//! once per frame, in activation order.
//!
//! Menus do not touch the registry directly. Instead, they issue
//! [`Command`]s through the [`Frame`] they are given, and the engine applies
//! them once every menu has been updated.

use std::collections::HashMap;
use std::fmt;

use crate::error::Error;
use crate::error::Result;
use crate::events::Events;
use crate::gfx::console::Console;
use crate::gfx::sprite::Sprites;
use crate::gfx::texture::Textures;
use crate::input::Input;

/// A request from a menu to change which menus run.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Command {
  /// Start updating the named menu, from the next frame on.
  Activate(String),
  /// Stop updating the named menu.
  Deactivate(String),
  /// Stop the engine after this frame.
  Quit,
}

/// Everything a menu may use during one frame.
pub struct Frame<'a> {
  pub console: &'a mut Console,
  pub input: &'a mut Input,
  pub sprites: &'a mut Sprites,
  pub textures: &'a mut Textures,
  pub events: &'a mut Events,
  commands: &'a mut Vec<Command>,
}

impl<'a> Frame<'a> {
  /// Creates a new `Frame`, collecting commands into `commands`.
  pub fn new(
    console: &'a mut Console,
    input: &'a mut Input,
    sprites: &'a mut Sprites,
    textures: &'a mut Textures,
    events: &'a mut Events,
    commands: &'a mut Vec<Command>,
  ) -> Self {
    Self {
      console,
      input,
      sprites,
      textures,
      events,
      commands,
    }
  }

  /// Requests that the named menu be activated.
  pub fn activate(&mut self, name: impl Into<String>) {
    self.commands.push(Command::Activate(name.into()));
  }

  /// Requests that the named menu be deactivated.
  pub fn deactivate(&mut self, name: impl Into<String>) {
    self.commands.push(Command::Deactivate(name.into()));
  }

  /// Requests that the engine stop.
  pub fn quit(&mut self) {
    self.commands.push(Command::Quit);
  }

  /// Returns the commands issued so far this frame.
  pub fn commands(&self) -> &[Command] {
    &self.commands[..]
  }
}

/// A screen of the program.
pub trait Menu {
  /// Returns the menu's unique name.
  fn name(&self) -> &str;

  /// Called on the first frame after each activation, before
  /// [`Menu::update()`].
  fn start(&mut self, _frame: &mut Frame) {}

  /// Called once per frame while active.
  fn update(&mut self, frame: &mut Frame);
}

struct Entry {
  menu: Box<dyn Menu>,
  active: bool,
  started: bool,
}

/// The menu registry.
#[derive(Default)]
pub struct Menus {
  entries: Vec<Entry>,
  by_name: HashMap<String, usize>,
  active: Vec<usize>,
}

impl Menus {
  /// Creates a new, empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `menu`, inactive. Names must be unique.
  pub fn register(&mut self, menu: impl Menu + 'static) -> Result<()> {
    let name = menu.name().to_string();
    if self.by_name.contains_key(&name) {
      tracing::error!("menu {:?} registered twice", name);
      return Err(Error::DuplicateMenu(name));
    }

    tracing::info!("registered menu {:?}", name);
    self.by_name.insert(name, self.entries.len());
    self.entries.push(Entry {
      menu: Box::new(menu),
      active: false,
      started: false,
    });
    Ok(())
  }

  /// Returns how many menus are registered.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns whether no menus are registered.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Returns the names of the active menus, in update order.
  pub fn active(&self) -> Vec<&str> {
    self
      .active
      .iter()
      .map(|&i| self.entries[i].menu.name())
      .collect()
  }

  /// Returns whether the named menu is active.
  pub fn is_active(&self, name: &str) -> Result<bool> {
    Ok(self.entries[self.lookup(name)?].active)
  }

  /// Activates the named menu. Activating an active menu does nothing.
  pub fn activate(&mut self, name: &str) -> Result<()> {
    let idx = self.lookup(name)?;
    let entry = &mut self.entries[idx];
    if entry.active {
      tracing::debug!("menu {:?} is already active", name);
      return Ok(());
    }

    entry.active = true;
    entry.started = false;
    self.active.push(idx);
    Ok(())
  }

  /// Deactivates the named menu. Deactivating an inactive menu does nothing.
  pub fn deactivate(&mut self, name: &str) -> Result<()> {
    let idx = self.lookup(name)?;
    self.entries[idx].active = false;
    self.active.retain(|&i| i != idx);
    Ok(())
  }

  /// Applies a command issued by a menu. Returns `false` for
  /// [`Command::Quit`].
  pub fn apply(&mut self, command: &Command) -> Result<bool> {
    match command {
      Command::Activate(name) => self.activate(name)?,
      Command::Deactivate(name) => self.deactivate(name)?,
      Command::Quit => return Ok(false),
    }
    Ok(true)
  }

  /// Updates every active menu, starting those that were just activated.
  pub fn update(&mut self, frame: &mut Frame) {
    for &idx in &self.active {
      let entry = &mut self.entries[idx];
      if !entry.started {
        entry.started = true;
        entry.menu.start(frame);
      }
      entry.menu.update(frame);
    }
  }

  fn lookup(&self, name: &str) -> Result<usize> {
    match self.by_name.get(name) {
      Some(&idx) => Ok(idx),
      None => {
        tracing::error!("menu {:?} is not registered", name);
        Err(Error::UnknownMenu(name.to_string()))
      }
    }
  }
}

impl fmt::Debug for Menus {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Menus")
      .field("registered", &self.by_name.keys().collect::<Vec<_>>())
      .field("active", &self.active())
      .finish()
  }
}
