//! Graphics and rendering library.
//!
//! Layered bottom-up: a [`Backend`] owns the screen; [`Textures`] caches
//! textures on top of it and resolves color names; the [`TextRenderer`] and
//! [`Sprites`] issue draws through it; the [`Console`] lays text out on a
//! grid and hands it to the rasterizer.

pub mod backend;
pub mod console;
pub mod curses;
pub mod headless;
pub mod palette;
pub mod sprite;
pub mod texel;
pub mod text;
pub mod texture;

pub use backend::Backend;
pub use backend::DrawCall;
pub use backend::Event;
pub use backend::TextureId;
pub use console::Console;
pub use curses::Curses;
pub use headless::Headless;
pub use palette::Palette;
pub use sprite::SpriteId;
pub use sprite::Sprites;
pub use text::Font;
pub use text::TextRenderer;
pub use texture::Textures;
