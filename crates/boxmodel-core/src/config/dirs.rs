use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::warn;

const APP_NAME: &str = "boxmodel";
const STYLES_DIR: &str = "styles";

/// Base directories that may contain a `styles` subdirectory.
///
/// Ordered from least to most specific; later locations win on name clashes.
pub trait DataLocations {
    fn data_locations(&self) -> Vec<PathBuf>;
}

/// The `styles` subdirectories of `locations` that exist.
pub fn style_directories(locations: &dyn DataLocations) -> Vec<PathBuf> {
    locations
        .data_locations()
        .into_iter()
        .map(|p| p.join(STYLES_DIR))
        .filter(|p| p.is_dir())
        .collect()
}

/// Application directories following the XDG layout
#[derive(Debug, Clone)]
pub struct Directories {
    /// Config directory (~/.config/boxmodel)
    pub config: PathBuf,

    /// Data directory (~/.local/share/boxmodel)
    pub data: PathBuf,

    /// System-wide data directories, least specific first
    pub system_data: Vec<PathBuf>,

    /// Preferences file
    pub settings_file: PathBuf,

    /// Window state file (last position)
    pub state_file: PathBuf,

    /// Input history file
    pub history_file: PathBuf,
}

impl Directories {
    /// Standard per-user paths, falling back to a temporary directory when
    /// the platform reports no home directory.
    #[must_use]
    pub fn new() -> Self {
        let Some(project) = ProjectDirs::from("", "", APP_NAME) else {
            let fallback = std::env::temp_dir().join(APP_NAME);
            warn!(
                "Could not determine project directories, using {}",
                fallback.display()
            );
            return Self::with_base(fallback);
        };

        let config = project.config_dir().to_path_buf();
        let data = project.data_dir().to_path_buf();

        Self {
            settings_file: config.join("settings.json"),
            state_file: data.join("state.json"),
            history_file: data.join("history.json"),
            system_data: Self::system_data_dirs(),
            config,
            data,
        }
    }

    #[must_use]
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            settings_file: base.join("settings.json"),
            state_file: base.join("state.json"),
            history_file: base.join("history.json"),
            system_data: Vec::new(),
            config: base.clone(),
            data: base,
        }
    }

    /// The per-user styles directory (~/.local/share/boxmodel/styles)
    #[must_use]
    pub fn user_styles(&self) -> PathBuf {
        self.data.join(STYLES_DIR)
    }

    #[cfg(target_os = "macos")]
    fn system_data_dirs() -> Vec<PathBuf> {
        vec![PathBuf::from("/Library/Application Support").join(APP_NAME)]
    }

    #[cfg(not(target_os = "macos"))]
    fn system_data_dirs() -> Vec<PathBuf> {
        let xdg = std::env::var("XDG_DATA_DIRS")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
        // XDG lists the most important directory first
        xdg.split(':')
            .filter(|p| !p.is_empty())
            .rev()
            .map(|p| PathBuf::from(p).join(APP_NAME))
            .collect()
    }

    /// Ensure the writable directories exist.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config)?;
        std::fs::create_dir_all(&self.data)?;
        Ok(())
    }
}

impl Default for Directories {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLocations for Directories {
    fn data_locations(&self) -> Vec<PathBuf> {
        let mut locations = self.system_data.clone();
        locations.push(self.data.clone());
        locations
    }
}

impl DataLocations for Vec<PathBuf> {
    fn data_locations(&self) -> Vec<PathBuf> {
        self.clone()
    }
}
