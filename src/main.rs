//! Frost demo: a main menu leading to a settings panel and a page of meters.

use std::cell::Cell;
use std::path::Path;
use std::process;
use std::rc::Rc;

use frost::config::EngineConfig;
use frost::geo::Point;
use frost::geo::Rect;
use frost::gfx::Curses;
use frost::gfx::SpriteId;
use frost::input::KeyCode;
use frost::menu::Frame;
use frost::menu::Menu;
use frost::ui::display;
use frost::ui::Button;
use frost::ui::Choice;
use frost::ui::ColorString;
use frost::ui::FloatVariable;
use frost::ui::IntVariable;
use frost::ui::List;
use frost::ui::Panel;
use frost::ui::Selection;
use frost::ui::SharedColor;
use frost::ui::StringVariable;
use frost::ui::Text;
use frost::ui::TextList;
use frost::Engine;

const CONFIG_PATH: &str = "data/frost.json";

/// Index of the cursor color choice in the settings panel.
const COLOR_CHOICE: usize = 5;

struct MainMenu {
  selection: Selection,
}

impl MainMenu {
  fn new(cursor: SharedColor) -> Self {
    Self {
      selection: Selection::new(
        vec![
          ColorString::new("Settings", "Cyan"),
          ColorString::new("Meters", "Green"),
          ColorString::new("Quit", "Red"),
        ],
        cursor,
      ),
    }
  }
}

impl Menu for MainMenu {
  fn name(&self) -> &str {
    "main"
  }

  fn update(&mut self, frame: &mut Frame) {
    frame.console.add_string("Frost", "Gold");
    frame.console.add_new_line(2);
    self.selection.simulate(frame.console, frame.input);

    match self.selection.take_selected() {
      Some(0) => {
        frame.deactivate("main");
        frame.activate("settings");
      }
      Some(1) => {
        frame.deactivate("main");
        frame.activate("meters");
      }
      Some(_) => {
        frame.events.invoke("quit");
        frame.quit();
      }
      None => {}
    }
  }
}

struct SettingsMenu {
  panel: Panel,
  back: Rc<Cell<bool>>,
}

impl SettingsMenu {
  fn new(cursor: SharedColor) -> Self {
    let back = Rc::new(Cell::new(false));
    let pressed = Rc::clone(&back);

    let mut panel = Panel::new(cursor.clone());
    panel.push(Text::with_color("Settings", "Gold", cursor.clone()));
    panel.push(StringVariable::new("Name", "Frost", "Player", cursor.clone()));
    panel.push(IntVariable::new("Seed", "42", "0", cursor.clone()));
    panel.push(FloatVariable::new("Volume", "0.8", "1.0", cursor.clone()));
    panel.push(TextList::new(
      "Friends",
      vec!["Ann".into(), "Bo".into()],
      cursor.clone(),
    ));
    panel.push(Choice::new(
      "Cursor",
      ["Blue", "Green", "Gold", "Pink"]
        .iter()
        .map(|&c| ColorString::new(c, c))
        .collect(),
      0,
      cursor.clone(),
    ));
    panel.push(List::new(
      "Advanced",
      vec![
        Box::new(IntVariable::new("Retries", "3", "3", cursor.clone())),
        Box::new(List::new(
          "Debug",
          vec![Box::new(Text::new("Nothing here", cursor.clone()))],
          cursor.clone(),
        )),
        Box::new(List::new("Empty", Vec::new(), cursor.clone())),
      ],
      cursor.clone(),
    ));
    panel.push(Button::new("Back", cursor, move || pressed.set(true)));

    Self { panel, back }
  }
}

impl Menu for SettingsMenu {
  fn name(&self) -> &str {
    "settings"
  }

  fn start(&mut self, _: &mut Frame) {
    self.panel.reset();
  }

  fn update(&mut self, frame: &mut Frame) {
    self.panel.simulate(frame.console, frame.input);

    if let Some(color) = self.panel.items()[COLOR_CHOICE].value() {
      if color != self.panel.cursor_color().get() {
        self.panel.cursor_color().set(color);
      }
    }

    if self.back.replace(false) {
      frame.deactivate("settings");
      frame.activate("main");
    }
  }
}

struct MetersMenu {
  value: i64,
  sprite: Option<SpriteId>,
}

impl Menu for MetersMenu {
  fn name(&self) -> &str {
    "meters"
  }

  fn start(&mut self, frame: &mut Frame) {
    let created = frame.sprites.create(
      frame.textures,
      Rect::new(0, 0, 16, 16),
      Point::new(0, 0),
      "data/font.png",
    );
    match created {
      Ok(id) => {
        if frame.sprites.flag_render(id).is_ok() {
          self.sprite = Some(id);
        }
      }
      Err(e) => tracing::warn!("no sprite for the meters page: {}", e),
    }
  }

  fn update(&mut self, frame: &mut Frame) {
    if frame.input.is_available(KeyCode::Up) {
      frame.input.delay_key(KeyCode::Up, 50);
      self.value = (self.value + 1).min(10);
    }
    if frame.input.is_available(KeyCode::Down) {
      frame.input.delay_key(KeyCode::Down, 50);
      self.value = (self.value - 1).max(0);
    }

    let console = &mut *frame.console;
    console.add_string("Meters", "Gold");
    console.add_new_line(2);
    console.add_string("Up/Down to change, Esc to leave", "Gray");
    console.add_new_line(2);
    console.add_string("Value: ", "White");
    display::display_colored_int(
      console,
      self.value,
      0,
      10,
      &["Red", "Orange", "Yellow", "Green"],
    );
    console.add_new_line(1);
    display::display_single_color_meter(console, self.value, 0, 10, "Cyan");
    console.add_new_line(1);
    display::display_multi_color_meter(
      console,
      self.value,
      0,
      10,
      &["Red", "Yellow", "Green"],
    );

    if frame.input.is_available(KeyCode::Esc) {
      frame.input.block_until_released(KeyCode::Esc);
      if let Some(id) = self.sprite.take() {
        if let Err(e) = frame.sprites.delete(id, frame.textures) {
          tracing::warn!("{}", e);
        }
      }
      frame.deactivate("meters");
      frame.activate("main");
    }
  }
}

fn run() -> frost::Result<()> {
  let config = EngineConfig::load_or_default(Path::new(CONFIG_PATH))?;
  frost::logging::init(&config.log_path)?;

  let backend = Curses::init(config.terminal_cell)?;
  let mut engine = Engine::new(config, Box::new(backend))?;

  let cursor = SharedColor::new("Blue");
  engine.menus().register(MainMenu::new(cursor.clone()))?;
  engine.menus().register(SettingsMenu::new(cursor))?;
  engine.menus().register(MetersMenu {
    value: 5,
    sprite: None,
  })?;
  engine
    .events()
    .subscribe("quit", || tracing::info!("leaving the main menu"));

  engine.menus().activate("main")?;
  engine.run()
}

fn main() {
  if let Err(e) = run() {
    tracing::error!("fatal: {}", e);
    eprintln!("frost: {}", e);
    process::exit(1);
  }
}
