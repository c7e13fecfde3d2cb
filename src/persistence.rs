//! Persisted client preferences (currently just the theme).

use {
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
};

/// Visual theme. Display-only; has no effect on data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ThemePreference {
    theme: Theme,
}

/// Save the theme preference to a JSON file.
pub fn save_theme(theme: Theme, file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(&ThemePreference { theme })?;
    fs::write(file_path, json)?;

    log::debug!("Saved theme preference ({}) to {}", theme.as_str(), file_path);
    Ok(())
}

/// Load the theme preference, falling back to the default on any
/// missing or unreadable file.
pub fn load_theme(file_path: &str) -> Theme {
    if !Path::new(file_path).exists() {
        log::info!("No existing theme preference found: {}", file_path);
        return Theme::default();
    }

    let loaded = fs::read_to_string(file_path)
        .map_err(|e| e.to_string())
        .and_then(|json| {
            serde_json::from_str::<ThemePreference>(&json).map_err(|e| e.to_string())
        });

    match loaded {
        Ok(pref) => pref.theme,
        Err(e) => {
            log::warn!("Could not read theme preference from {}: {}", file_path, e);
            Theme::default()
        }
    }
}
