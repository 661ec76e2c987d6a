//! Named callbacks.
//!
//! An [`Events`] bus lets one part of a program fire something another part
//! listens for, without either knowing about the other: subscribers register
//! a callback under a string token, and [`Events::invoke()`] runs every
//! callback registered under it, in subscription order.

use std::collections::HashMap;
use std::fmt;

type Callback = Box<dyn FnMut()>;

/// A registry of callbacks keyed by token.
#[derive(Default)]
pub struct Events {
  subscriptions: HashMap<String, Vec<Callback>>,
}

impl Events {
  /// Creates a new, empty `Events`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds `callback` to the callbacks run for `token`.
  pub fn subscribe(
    &mut self,
    token: impl Into<String>,
    callback: impl FnMut() + 'static,
  ) {
    self
      .subscriptions
      .entry(token.into())
      .or_default()
      .push(Box::new(callback));
  }

  /// Drops every callback subscribed to `token`.
  pub fn clear(&mut self, token: &str) {
    self.subscriptions.remove(token);
  }

  /// Returns how many callbacks are subscribed to `token`.
  pub fn subscribers(&self, token: &str) -> usize {
    self.subscriptions.get(token).map_or(0, Vec::len)
  }

  /// Runs every callback subscribed to `token`, returning how many ran.
  pub fn invoke(&mut self, token: &str) -> usize {
    match self.subscriptions.get_mut(token) {
      Some(callbacks) => {
        for cb in callbacks.iter_mut() {
          cb();
        }
        callbacks.len()
      }
      None => {
        tracing::warn!("invoked event {:?} with no subscribers", token);
        0
      }
    }
  }
}

impl fmt::Debug for Events {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let mut map = f.debug_map();
    for (token, callbacks) in &self.subscriptions {
      map.entry(token, &callbacks.len());
    }
    map.finish()
  }
}
