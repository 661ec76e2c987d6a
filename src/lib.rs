//! Frost: a small text-and-sprite engine for console-style menus.
//!
//! Programs built on Frost are a set of [`Menu`](menu::Menu)s registered
//! with an [`Engine`](engine::Engine). Each frame, the active menus write
//! text into the engine's [`Console`](gfx::Console), usually by simulating a
//! [`Panel`](ui::Panel) of UI items, and the engine draws it through a
//! [`Backend`](gfx::Backend).

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod geo;
pub mod gfx;
pub mod input;
pub mod logging;
pub mod menu;
pub mod timing;
pub mod ui;

pub use engine::Engine;
pub use error::Error;
pub use error::Result;
