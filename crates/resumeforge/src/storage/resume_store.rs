//! Persistence of the resume record on top of [`Storage`].

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::Resume;

use super::Storage;

/// Key the record is stored under. Matches a browser `localStorage` dump.
pub const STORAGE_KEY: &str = "resumeData";

/// Saves and loads the single resume record.
#[derive(Debug)]
pub struct ResumeStore {
    storage: Storage,
}

impl ResumeStore {
    /// Wrap an opened store.
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// The underlying key/value store.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Serialize `resume` and store it.
    ///
    /// Returns `false` when the stored JSON was already identical.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn save(&self, resume: &Resume) -> Result<bool> {
        let json = serde_json::to_string(resume)?;
        let written = self.storage.set_item(STORAGE_KEY, &json)?;
        if written {
            debug!("Saved resume ({} bytes)", json.len());
        }
        Ok(written)
    }

    /// Load the saved record.
    ///
    /// Returns `None` when nothing is saved or the saved data does not parse;
    /// the latter is logged and otherwise ignored so callers fall back to a
    /// blank record. Empty sections of a loaded record are padded with one
    /// blank entry.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database read fails.
    pub fn load(&self) -> Result<Option<Resume>> {
        let Some(json) = self.storage.get_item(STORAGE_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Resume>(&json) {
            Ok(mut resume) => {
                resume.ensure_entries();
                Ok(Some(resume))
            }
            Err(e) => {
                warn!("Ignoring unreadable saved resume: {e}");
                Ok(None)
            }
        }
    }

    /// The saved record, or a blank one.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database read fails.
    pub fn load_or_blank(&self) -> Result<Resume> {
        Ok(self.load()?.unwrap_or_else(Resume::blank))
    }

    /// Remove the saved record. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn clear(&self) -> Result<bool> {
        let removed = self.storage.remove_item(STORAGE_KEY)?;
        if removed {
            info!("Cleared saved resume");
        }
        Ok(removed)
    }

    /// Parse `text` as a record and save it, replacing the current one.
    ///
    /// Unlike [`ResumeStore::load`], malformed input is an error here.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if `text` is not a valid record, or a
    /// storage error if saving fails.
    pub fn import_json(&self, text: &str) -> Result<Resume> {
        let mut resume: Resume = serde_json::from_str(text)?;
        resume.ensure_entries();
        self.save(&resume)?;
        info!("Imported resume");
        Ok(resume)
    }

    /// The saved record (or a blank one) as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read or serialization fails.
    pub fn export_json(&self) -> Result<String> {
        let resume = self.load_or_blank()?;
        Ok(serde_json::to_string_pretty(&resume)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::logging::init_test_logging;
    use crate::model::{Education, Experience, Section};

    fn create_test_store() -> ResumeStore {
        ResumeStore::new(Storage::open_in_memory().expect("failed to create test storage"))
    }

    fn sample_resume() -> Resume {
        let mut resume = Resume::blank();
        resume.personal.full_name = Some("Ada Lovelace".to_string());
        resume.personal.email = Some("ada@example.com".to_string());
        resume.personal.summary = Some("Line one\nLine two".to_string());
        resume.education = vec![Education {
            degree: Some("BSc Mathematics".to_string()),
            institution: Some("University of London".to_string()),
            year: Some("1835".to_string()),
            grade: None,
        }];
        resume.experience = vec![
            Experience {
                job_title: Some("Analyst".to_string()),
                company: Some("Analytical Engine Co".to_string()),
                duration: Some("1842 - 1843".to_string()),
                description: Some("Wrote <the> first program & notes".to_string()),
            },
            Experience::default(),
        ];
        resume.skills = vec!["Rust".to_string(), "SQL".to_string()];
        resume
    }

    #[test]
    fn test_load_nothing_saved() {
        let store = create_test_store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let store = create_test_store();
        let resume = sample_resume();

        assert!(store.save(&resume).unwrap());
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded, resume);
    }

    #[test]
    fn test_saving_unchanged_record_is_skipped() {
        let store = create_test_store();
        let resume = sample_resume();

        assert!(store.save(&resume).unwrap());
        assert!(!store.save(&resume).unwrap());
    }

    #[test]
    fn test_saved_json_uses_fixed_key_and_camel_case() {
        let store = create_test_store();
        store.save(&sample_resume()).unwrap();

        assert_eq!(store.storage().keys().unwrap(), vec![STORAGE_KEY]);
        let json = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        assert!(json.contains(r#""fullName":"Ada Lovelace""#));
        assert!(json.contains(r#""jobTitle":"Analyst""#));
        assert!(!json.contains("full_name"));
    }

    #[test]
    fn test_load_ignores_corrupt_data() {
        init_test_logging();
        let store = create_test_store();
        store.storage().set_item(STORAGE_KEY, "{not json").unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(store.load_or_blank().unwrap().is_blank());
    }

    #[test]
    fn test_load_pads_empty_sections() {
        let store = create_test_store();
        store
            .storage()
            .set_item(
                STORAGE_KEY,
                r#"{"personal":{"fullName":"Grace"},"education":[],"skills":["COBOL"]}"#,
            )
            .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.personal.full_name.as_deref(), Some("Grace"));
        assert_eq!(loaded.skills, vec!["COBOL"]);
        for section in Section::ALL {
            assert_eq!(loaded.section(section).len(), 1, "{section}");
        }
    }

    #[test]
    fn test_clear() {
        let store = create_test_store();
        store.save(&sample_resume()).unwrap();

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_import_json() {
        let store = create_test_store();
        let json = serde_json::to_string(&sample_resume()).unwrap();

        let imported = store.import_json(&json).unwrap();
        assert_eq!(imported, sample_resume());
        assert_eq!(store.load().unwrap().unwrap(), imported);
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let store = create_test_store();
        let result = store.import_json("[1, 2, 3]");

        assert!(matches!(result, Err(Error::Json(_))));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_export_json_round_trips_through_import() {
        let source = create_test_store();
        source.save(&sample_resume()).unwrap();
        let exported = source.export_json().unwrap();

        let target = create_test_store();
        let imported = target.import_json(&exported).unwrap();
        assert_eq!(imported, sample_resume());
    }

    #[test]
    fn test_export_json_without_saved_record() {
        let store = create_test_store();
        let json = store.export_json().unwrap();
        let parsed: Resume = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Resume::blank());
    }
}
