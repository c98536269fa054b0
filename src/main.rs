use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;

use theme_switcher::logging::init_logger;
use theme_switcher::models::{Theme, ThemeSettings};
use theme_switcher::services::{EventBus, FileStore, MemoryDocument, ThemeController, ThemeEvent};

// ============================================================================
// Constants
// ============================================================================

const ENV_DATA_DIR: &str = "THEME_SWITCHER_DATA_DIR";
const ENV_LOG_DIR: &str = "THEME_SWITCHER_LOG_DIR";
const SETTINGS_FILE_NAME: &str = "settings.json";

const USAGE: &str = "usage: theme-switcher [current|saved|list|toggle|random|reset|apply <theme>]

  current         theme in effect after page load
  saved           stored theme, empty if nothing is stored yet
  list            every theme, the current one marked with *
  toggle          switch between dark and light
  random          apply a random theme
  reset           remove the stored theme
  apply <theme>   apply and store a theme";

// ============================================================================
// Commands
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Current,
    Saved,
    List,
    Toggle,
    Random,
    Reset,
    Apply(String),
}

impl Command {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut args = args.into_iter();
        let command = match args.next().as_deref() {
            None | Some("current") => Command::Current,
            Some("saved") => Command::Saved,
            Some("list") => Command::List,
            Some("toggle") => Command::Toggle,
            Some("random") => Command::Random,
            Some("reset") => Command::Reset,
            Some("apply") => match args.next() {
                Some(name) => Command::Apply(name),
                None => return Err(format!("missing theme name\n{USAGE}")),
            },
            Some(other) => return Err(format!("unknown command '{other}'\n{USAGE}")),
        };

        if let Some(extra) = args.next() {
            return Err(format!("unexpected argument '{extra}'\n{USAGE}"));
        }
        Ok(command)
    }

    /// Whether the command runs against a loaded page. `saved` and `reset`
    /// only touch storage, so page load must not persist the default first.
    fn loads_page(&self) -> bool {
        !matches!(self, Command::Saved | Command::Reset)
    }
}

fn default_data_dir() -> PathBuf {
    dirs_next::data_dir()
        .map(|dir| dir.join("theme-switcher"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn drain_events(events: &mut broadcast::Receiver<ThemeEvent>) {
    while let Ok(event) = events.try_recv() {
        log::debug!("{} {}", event.event, event.payload);
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = env::var(ENV_DATA_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_data_dir());
    let log_dir = env::var(ENV_LOG_DIR).ok().map(PathBuf::from);

    let settings = ThemeSettings::load(&data_dir.join(SETTINGS_FILE_NAME))?.with_env_overrides();
    init_logger(log_dir.as_deref(), settings.level_filter())?;

    let command = Command::parse(env::args().skip(1))?;
    log::debug!("Data dir: {:?}, command: {:?}", data_dir, command);

    let event_bus = EventBus::new();
    let mut events = event_bus.subscribe();
    let document = MemoryDocument::with_controls(Theme::ALL.iter().map(Theme::as_str));
    let mut controller = ThemeController::new(
        document,
        Arc::new(FileStore::new(&data_dir)),
        Arc::new(event_bus),
        settings,
    );

    // Page load
    if command.loads_page() {
        controller.initialize();
        drain_events(&mut events);
    }

    let (applied, changed) = match command {
        Command::Current => {
            println!("{}", controller.current());
            (true, false)
        }
        Command::Saved => {
            if let Some(saved) = controller.saved_theme() {
                println!("{saved}");
            }
            (true, false)
        }
        Command::Reset => {
            if !controller.forget_saved_theme() {
                return Err("could not remove the stored theme".into());
            }
            (true, false)
        }
        Command::List => {
            let current = controller.current();
            for theme in ThemeController::<MemoryDocument>::available_themes() {
                let marker = if *theme == current { "*" } else { " " };
                println!("{marker} {theme}");
            }
            (true, false)
        }
        Command::Toggle => (controller.toggle(), true),
        Command::Random => (controller.apply_random(), true),
        Command::Apply(name) => (controller.apply(&name, true), true),
    };
    drain_events(&mut events);

    if !applied {
        return Err(format!("theme not applied, current theme is {}", controller.current()).into());
    }
    if changed {
        println!("{}", controller.current());
    }

    Ok(())
}
