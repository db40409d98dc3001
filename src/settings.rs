use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    error,
    info,
    warn,
};

use crate::{
    core::{
        Grade,
        MishuError,
        ReferenceTable,
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grade: u8,
    pub dark_mode: bool,
    /// Replaces the built-in grade table when set and loadable.
    pub reference_table_path: Option<PathBuf>,
    /// Font with Japanese glyphs, tried before the system fonts.
    pub font_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grade: Grade::default().value(),
            dark_mode: true,
            reference_table_path: None,
            font_path: None,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        load_json_or_default(SETTINGS_FILE)
    }

    pub fn save(&self) -> Result<(), MishuError> {
        save_json(self, SETTINGS_FILE)
    }

    /// Saves, logging any failure.
    pub fn save_or_log(&self) {
        if let Err(e) = self.save() {
            error!("Failed to save settings: {}", e);
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::new(self.grade).unwrap_or_else(|e| {
            warn!("Stored grade ignored: {}", e);
            Grade::default()
        })
    }

    pub fn set_grade(&mut self, grade: Grade) {
        self.grade = grade.value();
    }

    /// The configured table, or the built-in one when none is configured or it fails to load.
    pub fn reference_table(&self) -> Result<ReferenceTable, MishuError> {
        if let Some(path) = &self.reference_table_path {
            match ReferenceTable::load(path) {
                Ok(table) => {
                    info!("Using reference table {} ({} kanji)", path.display(), table.len());
                    return Ok(table);
                }
                Err(e) => {
                    warn!(
                        "Failed to load reference table {}: {}. Using the built-in table.",
                        path.display(),
                        e
                    );
                }
            }
        }

        ReferenceTable::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"grade": 4}"#).unwrap();
        assert_eq!(settings.grade().value(), 4);
        assert!(settings.dark_mode);
        assert!(settings.reference_table_path.is_none());
    }

    #[test]
    fn test_out_of_range_grade_falls_back() {
        let settings = Settings { grade: 9, ..Default::default() };
        assert_eq!(settings.grade(), Grade::FIRST);

        let settings = Settings { grade: 0, ..Default::default() };
        assert_eq!(settings.grade(), Grade::FIRST);
    }

    #[test]
    fn test_set_grade() {
        let mut settings = Settings::default();
        settings.set_grade(Grade::LAST);
        assert_eq!(settings.grade, 6);
    }

    #[test]
    fn test_unloadable_table_falls_back_to_builtin() {
        let settings = Settings {
            reference_table_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..Default::default()
        };
        assert_eq!(settings.reference_table().unwrap().len(), 1026);
    }

    #[test]
    fn test_custom_table_is_used() {
        let path = std::env::temp_dir().join(format!("mishu_table_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"1": "山", "2": "", "3": "", "4": "", "5": "", "6": ""}"#).unwrap();
        let settings = Settings { reference_table_path: Some(path.clone()), ..Default::default() };
        let table = settings.reference_table();
        let _ = std::fs::remove_file(&path);
        assert_eq!(table.unwrap().len(), 1);
    }
}
