const DOCUMENTATION: &str = r#"# MathAnim editor preferences. You may edit this file, but be aware that formatting and comments will not
# be preserved.

# history_capacity: slots in the undo ring. One fewer edit than this can be undone at a time. Must be at least 2 and at most 10000.

"#;

#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PreferencesError {
    #[error("history capacity must be at least 2, found {}", .0)]
    CapacityTooSmall(usize),
    #[error("history capacity must be at most {}, found {}", Preferences::MAX_HISTORY_CAPACITY, .0)]
    CapacityTooLarge(usize),
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Preferences {
    pub history_capacity: usize,
}
impl Default for Preferences {
    fn default() -> Self {
        Self {
            history_capacity: 100,
        }
    }
}
impl Preferences {
    const FILENAME: &'static str = "history.toml";
    /// Every slot of the ring is allocated up front.
    pub const MAX_HISTORY_CAPACITY: usize = 10_000;
    /// Parse and check preferences. Missing keys are defaulted.
    pub fn from_toml(string: &str) -> anyhow::Result<Self> {
        let preferences: Self = toml::from_str(string)?;
        Ok(preferences.validate()?)
    }
    pub fn validate(self) -> Result<Self, PreferencesError> {
        if self.history_capacity <= 1 {
            Err(PreferencesError::CapacityTooSmall(self.history_capacity))
        } else if self.history_capacity > Self::MAX_HISTORY_CAPACITY {
            Err(PreferencesError::CapacityTooLarge(self.history_capacity))
        } else {
            Ok(self)
        }
    }
    /// Load the user's preferences, or defaults if unavailable.
    /// The flag is true if a file existed but could not be used, in which case it should not be overwritten.
    #[must_use]
    pub fn load_or_default() -> (Self, bool) {
        let Some(mut path) = preferences_dir() else {
            log::warn!("Preferences dir unavailable, defaulting.");
            return (Self::default(), false);
        };
        path.push(Self::FILENAME);
        let string = match std::fs::read_to_string(&path) {
            Ok(string) => string,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return (Self::default(), false);
            }
            Err(e) => {
                log::warn!("Failed to read {path:?}, defaulting: {e}");
                return (Self::default(), true);
            }
        };
        match Self::from_toml(&string) {
            Ok(preferences) => (preferences, false),
            Err(e) => {
                log::warn!("Failed to load {path:?}, defaulting:\n{e:#}");
                (Self::default(), true)
            }
        }
    }
    pub fn save(&self) -> anyhow::Result<()> {
        let mut preferences =
            preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))?;
        // Explicity do *not* create recursively. If not found, the user probably has a good reason.
        // Ignore errors (could already exist). Any real errors will be emitted by file access below.
        let _ = std::fs::DirBuilder::new().create(&preferences);

        preferences.push(Self::FILENAME);
        let string = DOCUMENTATION.to_owned() + &toml::to_string_pretty(self)?;
        std::fs::write(preferences, string)?;
        Ok(())
    }
}
