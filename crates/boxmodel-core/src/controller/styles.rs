use super::{ControllerEvent, WindowController};
use crate::config::{keys, style_directories};
use crate::style::{Palette, Style, StyleReader, StyleRegistry};
use crate::styles_query::{StyleCommand, StyleItem};
use crate::view::Panel;
use crate::watcher::StyleWatcher;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

impl WindowController {
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    #[must_use]
    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    #[must_use]
    pub fn style_light(&self) -> Option<&str> {
        self.prefs.style_light.as_deref()
    }

    #[must_use]
    pub fn style_dark(&self) -> Option<&str> {
        self.prefs.style_dark.as_deref()
    }

    /// Select the style used in light mode; `None` is the default style.
    /// Returns false if no style of that name exists.
    pub fn set_style_light(&mut self, name: Option<&str>) -> bool {
        self.select_style(false, name)
    }

    /// Select the style used in dark mode; `None` is the default style.
    /// Returns false if no style of that name exists.
    pub fn set_style_dark(&mut self, name: Option<&str>) -> bool {
        self.select_style(true, name)
    }

    fn select_style(&mut self, dark: bool, name: Option<&str>) -> bool {
        if self.prefs.style_for(dark) == name {
            return true;
        }
        self.rescan_styles();
        if let Some(name) = name
            && !self.registry.contains(name)
        {
            warn!("Style does not exist: {name}");
            return false;
        }

        let name = name.map(str::to_string);
        let key = if dark {
            self.prefs.style_dark.clone_from(&name);
            keys::STYLE_DARK
        } else {
            self.prefs.style_light.clone_from(&name);
            keys::STYLE_LIGHT
        };
        match &name {
            Some(n) => self.settings.set_value(key, Value::String(n.clone())),
            None => self.settings.remove(key),
        }

        if dark == self.dark_mode {
            self.apply_style_named(name.as_deref());
        }
        let value = name.map_or(Value::Null, Value::String);
        self.emit(ControllerEvent::PreferenceChanged { key, value });
        true
    }

    /// The system appearance changed.
    pub fn theme_changed(&mut self, dark_mode: bool) {
        if self.dark_mode == dark_mode {
            return;
        }
        info!("Switching to {} mode", if dark_mode { "dark" } else { "light" });
        self.dark_mode = dark_mode;
        self.reload_style();
    }

    /// Apply the style selected for the current mode again.
    pub(super) fn reload_style(&mut self) {
        let name = self.prefs.style_for(self.dark_mode).map(str::to_string);
        self.apply_style_named(name.as_deref());
    }

    /// Read and apply the style `name`. On failure the default style is
    /// applied and a warning is emitted.
    pub fn apply_style_named(&mut self, name: Option<&str>) {
        self.watcher = None;
        let Some(name) = name else {
            self.apply_style(&Style::from_palette(&Palette::system(self.dark_mode)));
            return;
        };

        self.rescan_styles();
        let reader = StyleReader::with_registry(self.registry.clone())
            .default_palette(Palette::system(self.dark_mode));
        match reader.load(name) {
            Ok(loaded) => {
                debug!("Loaded style {name} from {} files", loaded.sources.len());
                self.apply_style(&loaded.style);
                self.watch_style_files(loaded.sources);
            }
            Err(e) => {
                warn!("Failed loading style {name}: {e}");
                self.apply_style(&Style::from_palette(&Palette::system(self.dark_mode)));
                self.emit(ControllerEvent::Warning(format!(
                    "Failed loading style: {name}\n\n{e}"
                )));
                // Pick up the fix once the file is edited
                if let Some(path) = self.registry.path(name).map(Path::to_path_buf) {
                    self.watch_style_files(vec![path]);
                }
            }
        }
    }

    /// Apply `style` to every primitive in one pass.
    pub fn apply_style(&mut self, style: &Style) {
        self.frame.apply_style(style);
        self.input_frame = Panel::new(
            style.input_background_brush.clone(),
            style.input_border_brush.clone(),
            style.input_border_width,
            style.input_border_radius,
        );
        self.input.apply_style(style);
        self.button.apply_style(style);
        if !self.button.visible {
            self.button.color = style.settings_button_color.with_alpha(0);
        }
        self.results.apply_style(style);
        self.actions.apply_style(style);
        self.style = style.clone();
        self.cache.clear();
        self.emit(ControllerEvent::StyleApplied);
    }

    /// Look for added or removed style files.
    pub fn rescan_styles(&mut self) {
        self.registry = StyleRegistry::scan(style_directories(self.locations.as_ref()));
    }

    fn watch_style_files(&mut self, files: Vec<PathBuf>) {
        if !self.watch_styles || files.is_empty() {
            return;
        }
        match StyleWatcher::watch(files, self.tx.clone()) {
            Ok(watcher) => self.watcher = Some(watcher),
            Err(e) => warn!("Cannot watch style files: {e}"),
        }
    }

    /// Style items for the styles query, best match first.
    pub fn style_items(&mut self, query: &str) -> Vec<StyleItem> {
        self.rescan_styles();
        self.styles_handler
            .rank_items(query, &self.registry, self.dark_mode)
    }

    /// Run a styles query item action.
    pub fn perform_style_command(&mut self, command: StyleCommand) {
        match command {
            StyleCommand::UseLight(name) => {
                self.set_style_light(name.as_deref());
            }
            StyleCommand::UseDark(name) => {
                self.set_style_dark(name.as_deref());
            }
            StyleCommand::Open(path) | StyleCommand::Reveal(path) => {
                self.emit(ControllerEvent::OpenPath(path));
            }
        }
    }
}
