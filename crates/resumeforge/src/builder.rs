//! The editing session.
//!
//! [`ResumeBuilder`] owns the record and the current template. Every edit
//! copies a value into the record; rendering is always derived from it.

use tracing::debug;

use crate::error::Result;
use crate::form;
use crate::model::{Resume, Section};
use crate::render::{self, Template};

/// A resume being edited, plus the template it is previewed with.
#[derive(Debug, Clone)]
pub struct ResumeBuilder {
    record: Resume,
    template: Template,
}

impl Default for ResumeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeBuilder {
    /// A blank record with one empty entry per section, using the classic
    /// template.
    #[must_use]
    pub fn new() -> Self {
        Self {
            record: Resume::blank(),
            template: Template::default(),
        }
    }

    /// Adopt an existing record, padding empty sections.
    #[must_use]
    pub fn from_record(mut record: Resume) -> Self {
        record.ensure_entries();
        Self {
            record,
            template: Template::default(),
        }
    }

    /// The record.
    #[must_use]
    pub fn record(&self) -> &Resume {
        &self.record
    }

    /// Take the record out of the builder.
    #[must_use]
    pub fn into_record(self) -> Resume {
        self.record
    }

    /// The selected template.
    #[must_use]
    pub fn template(&self) -> Template {
        self.template
    }

    /// Select the template used by [`ResumeBuilder::preview`].
    pub fn select_template(&mut self, template: Template) {
        debug!("Template {} -> {}", self.template, template);
        self.template = template;
    }

    /// Set a personal field by its form name (`fullName`, `email`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownField`] for an unknown name.
    pub fn set_personal(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        self.record.personal.set_field(field, value)
    }

    /// Add comma-separated skills, skipping blanks and ones already present.
    ///
    /// Returns how many were added.
    pub fn add_skills(&mut self, input: &str) -> usize {
        let before = self.record.skills.len();
        for skill in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !self.record.skills.iter().any(|s| s == skill) {
                self.record.skills.push(skill.to_string());
            }
        }
        self.record.skills.len() - before
    }

    /// Remove a skill. Returns whether it was present.
    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.record.skills.len();
        self.record.skills.retain(|s| s != skill);
        self.record.skills.len() != before
    }

    /// Append a blank entry to `section` and return its index.
    pub fn add_entry(&mut self, section: Section) -> usize {
        self.record.section_mut(section).push_blank()
    }

    /// Remove entry `index` of `section`; later entries move down by one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EntryOutOfRange`] if there is no such entry.
    pub fn remove_entry(&mut self, section: Section, index: usize) -> Result<()> {
        self.record.section_mut(section).remove(index)
    }

    /// Set one field of entry `index` of `section`.
    ///
    /// An index equal to the entry count appends a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownField`] or
    /// [`crate::Error::EntryOutOfRange`].
    pub fn set_entry_field(
        &mut self,
        section: Section,
        index: usize,
        field: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        self.record
            .section_mut(section)
            .set(index, field, value.into())
    }

    /// Number of entries in `section`.
    #[must_use]
    pub fn entry_count(&self, section: Section) -> usize {
        self.record.section(section).len()
    }

    /// Empty the summary.
    pub fn clear_summary(&mut self) {
        self.record.personal.summary = Some(String::new());
    }

    /// Replace `section` with one blank entry.
    pub fn clear_section(&mut self, section: Section) {
        self.record.section_mut(section).reset_to_blank();
    }

    /// Start over with a blank record. The template is kept.
    pub fn reset(&mut self) {
        self.record = Resume::blank();
    }

    /// Render the record with the selected template.
    #[must_use]
    pub fn preview(&self) -> String {
        render::render(&self.record, self.template)
    }

    /// Render the entry editors for `section`.
    #[must_use]
    pub fn form(&self, section: Section) -> String {
        form::render_section(self.record.section(section))
    }
}
