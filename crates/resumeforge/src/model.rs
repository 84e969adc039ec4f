//! Core record types for resumeforge.
//!
//! A [`Resume`] is one flat record: a personal-info group plus four ordered
//! entry collections and a list of skills. The JSON shape uses camelCase keys
//! so that a record saved by the browser version of the builder loads as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Describes one editable field of an entry or of the personal-info group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears in JSON and in the form's `data-field`.
    pub name: &'static str,
    /// Placeholder shown in an empty input.
    pub placeholder: &'static str,
    /// Whether the field is edited as multi-line text.
    pub multiline: bool,
}

impl FieldSpec {
    const fn line(name: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            placeholder,
            multiline: false,
        }
    }

    const fn text(name: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            placeholder,
            multiline: true,
        }
    }
}

/// Returns the value only when it holds visible text.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Personal information: the flat, non-repeating part of the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    /// Full name, shown as the document heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// City, region or country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `LinkedIn` profile link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// GitHub profile link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    /// Professional summary paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl PersonalInfo {
    /// Editable personal fields, in form order.
    pub const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::line("fullName", "Full Name"),
        FieldSpec::line("email", "Email"),
        FieldSpec::line("phone", "Phone"),
        FieldSpec::line("location", "Location"),
        FieldSpec::line("linkedin", "LinkedIn"),
        FieldSpec::line("github", "GitHub"),
        FieldSpec::text("summary", "Professional summary"),
    ];

    /// Get a field's stored value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "fullName" => &self.full_name,
            "email" => &self.email,
            "phone" => &self.phone,
            "location" => &self.location,
            "linkedin" => &self.linkedin,
            "github" => &self.github,
            "summary" => &self.summary,
            _ => return None,
        };
        value.as_deref()
    }

    /// Set a field by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if `name` is not a personal field.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let slot = match name {
            "fullName" => &mut self.full_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "location" => &mut self.location,
            "linkedin" => &mut self.linkedin,
            "github" => &mut self.github,
            "summary" => &mut self.summary,
            _ => return Err(Error::unknown_field("personal", name)),
        };
        *slot = Some(value.into());
        Ok(())
    }

    /// The full name, if one has been entered.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        present(self.full_name.as_ref())
    }

    /// The summary, if one has been entered.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        present(self.summary.as_ref())
    }
}

/// One entry of a repeatable section.
///
/// `HEADLINE` names the field whose presence decides whether the entry is
/// shown in the rendered document at all.
pub trait Entry: Default + Clone + fmt::Debug {
    /// Section this entry kind belongs to.
    const SECTION: Section;
    /// Editable fields, in form order.
    const FIELDS: &'static [FieldSpec];
    /// Field that must be present for the entry to render.
    const HEADLINE: &'static str;

    /// Mutable slot for a field, or `None` if the entry has no such field.
    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>>;

    /// Stored value of a field, or `None` if unset or unknown.
    fn field(&self, name: &str) -> Option<&str>;

    /// The value of a field when it holds visible text.
    fn present(&self, name: &str) -> Option<&str> {
        self.field(name).filter(|v| !v.trim().is_empty())
    }

    /// The headline value, when present.
    fn headline(&self) -> Option<&str> {
        self.present(Self::HEADLINE)
    }

    /// True when no field holds visible text.
    fn is_blank(&self) -> bool {
        Self::FIELDS.iter().all(|f| self.present(f.name).is_none())
    }
}

/// An education entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    /// Degree or qualification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    /// Awarding institution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Year or range of years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Grade or GPA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl Entry for Education {
    const SECTION: Section = Section::Education;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::line("degree", "Degree"),
        FieldSpec::line("institution", "Institution"),
        FieldSpec::line("year", "Year"),
        FieldSpec::line("grade", "Grade/GPA (optional)"),
    ];
    const HEADLINE: &'static str = "degree";

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "degree" => Some(&mut self.degree),
            "institution" => Some(&mut self.institution),
            "year" => Some(&mut self.year),
            "grade" => Some(&mut self.grade),
            _ => None,
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "degree" => self.degree.as_deref(),
            "institution" => self.institution.as_deref(),
            "year" => self.year.as_deref(),
            "grade" => self.grade.as_deref(),
            _ => None,
        }
    }
}

/// A work experience entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    /// Job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Employer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Free-form duration, e.g. "Jan 2020 - Present".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Responsibilities and achievements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entry for Experience {
    const SECTION: Section = Section::Experience;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::line("jobTitle", "Job Title"),
        FieldSpec::line("company", "Company"),
        FieldSpec::line("duration", "Duration (e.g., Jan 2020 - Present)"),
        FieldSpec::text(
            "description",
            "Job description and achievements (optional)",
        ),
    ];
    const HEADLINE: &'static str = "jobTitle";

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "jobTitle" => Some(&mut self.job_title),
            "company" => Some(&mut self.company),
            "duration" => Some(&mut self.duration),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "jobTitle" => self.job_title.as_deref(),
            "company" => self.company.as_deref(),
            "duration" => self.duration.as_deref(),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}

/// A project entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    /// Project title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entry for Project {
    const SECTION: Section = Section::Projects;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::line("title", "Project Title"),
        FieldSpec::text("description", "Brief description of the project"),
    ];
    const HEADLINE: &'static str = "title";

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "title" => Some(&mut self.title),
            "description" => Some(&mut self.description),
            _ => None,
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => self.title.as_deref(),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}

/// An achievement or certification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    /// Achievement text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Entry for Achievement {
    const SECTION: Section = Section::Achievements;
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::line("text", "Achievement or Certification")];
    const HEADLINE: &'static str = "text";

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "text" => Some(&mut self.text),
            _ => None,
        }
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "text" => self.text.as_deref(),
            _ => None,
        }
    }
}

/// The four repeatable sections of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Education entries.
    Education,
    /// Work experience entries.
    Experience,
    /// Project entries.
    Projects,
    /// Achievements and certifications.
    Achievements,
}

impl Section {
    /// All sections, in form order.
    pub const ALL: [Section; 4] = [
        Self::Education,
        Self::Experience,
        Self::Projects,
        Self::Achievements,
    ];

    /// Name used in JSON and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Achievements => "achievements",
        }
    }

    /// CSS class prefix of the form entry editor (`{kind}-entry`).
    #[must_use]
    pub fn entry_kind(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Projects => "project",
            Self::Achievements => "achievement",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "education" => Ok(Self::Education),
            "experience" => Ok(Self::Experience),
            "projects" | "project" => Ok(Self::Projects),
            "achievements" | "achievement" => Ok(Self::Achievements),
            _ => Err(Error::UnknownSection {
                name: s.to_string(),
            }),
        }
    }
}

/// Object-safe view over one section's entries.
///
/// Lets callers address any section by [`Section`] without knowing its entry
/// type.
pub trait EntryList: fmt::Debug {
    /// Section these entries belong to.
    fn section(&self) -> Section;
    /// Field layout of the entries.
    fn fields(&self) -> &'static [FieldSpec];
    /// Number of entries.
    fn len(&self) -> usize;
    /// True when there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Stored value of a field of entry `index`.
    fn value(&self, index: usize, field: &str) -> Option<&str>;
    /// Append a blank entry and return its index.
    fn push_blank(&mut self) -> usize;
    /// Remove entry `index`, shifting later entries down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryOutOfRange`] if `index` is past the end.
    fn remove(&mut self, index: usize) -> Result<()>;
    /// Set a field of entry `index`; `index == len()` appends a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EntryOutOfRange`] for an index past `len()` and
    /// [`Error::UnknownField`] for a field the entry kind lacks.
    fn set(&mut self, index: usize, field: &str, value: String) -> Result<()>;
    /// Replace all entries with a single blank one.
    fn reset_to_blank(&mut self);
}

impl<E: Entry> EntryList for Vec<E> {
    fn section(&self) -> Section {
        E::SECTION
    }

    fn fields(&self) -> &'static [FieldSpec] {
        E::FIELDS
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn value(&self, index: usize, field: &str) -> Option<&str> {
        self.get(index).and_then(|entry| entry.field(field))
    }

    fn push_blank(&mut self) -> usize {
        self.push(E::default());
        Vec::len(self) - 1
    }

    fn remove(&mut self, index: usize) -> Result<()> {
        if index >= Vec::len(self) {
            return Err(Error::EntryOutOfRange {
                section: E::SECTION.as_str(),
                index,
                len: Vec::len(self),
            });
        }
        Vec::remove(self, index);
        Ok(())
    }

    fn set(&mut self, index: usize, field: &str, value: String) -> Result<()> {
        if !E::FIELDS.iter().any(|f| f.name == field) {
            return Err(Error::unknown_field(E::SECTION.as_str(), field));
        }
        let len = Vec::len(self);
        if index > len {
            return Err(Error::EntryOutOfRange {
                section: E::SECTION.as_str(),
                index,
                len,
            });
        }
        if index == len {
            self.push(E::default());
        }
        let slot = self[index]
            .slot_mut(field)
            .ok_or_else(|| Error::unknown_field(E::SECTION.as_str(), field))?;
        *slot = Some(value);
        Ok(())
    }

    fn reset_to_blank(&mut self) {
        self.clear();
        self.push(E::default());
    }
}

/// One resume's data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    /// Personal information.
    pub personal: PersonalInfo,
    /// Education entries.
    pub education: Vec<Education>,
    /// Work experience entries.
    pub experience: Vec<Experience>,
    /// Skills, without duplicates, in insertion order.
    pub skills: Vec<String>,
    /// Project entries.
    pub projects: Vec<Project>,
    /// Achievements and certifications.
    pub achievements: Vec<Achievement>,
}

impl Resume {
    /// An empty record with one blank entry per section, as shown on startup.
    #[must_use]
    pub fn blank() -> Self {
        let mut resume = Self::default();
        resume.ensure_entries();
        resume
    }

    /// Entries of a section.
    #[must_use]
    pub fn section(&self, section: Section) -> &dyn EntryList {
        match section {
            Section::Education => &self.education,
            Section::Experience => &self.experience,
            Section::Projects => &self.projects,
            Section::Achievements => &self.achievements,
        }
    }

    /// Mutable entries of a section.
    pub fn section_mut(&mut self, section: Section) -> &mut dyn EntryList {
        match section {
            Section::Education => &mut self.education,
            Section::Experience => &mut self.experience,
            Section::Projects => &mut self.projects,
            Section::Achievements => &mut self.achievements,
        }
    }

    /// Coerce every empty section to a single blank entry.
    ///
    /// Returns the number of sections that were padded.
    pub fn ensure_entries(&mut self) -> usize {
        let mut padded = 0;
        for section in Section::ALL {
            let entries = self.section_mut(section);
            if entries.is_empty() {
                entries.push_blank();
                padded += 1;
            }
        }
        padded
    }

    /// True when nothing visible has been entered anywhere.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        PersonalInfo::FIELDS
            .iter()
            .all(|f| self.personal.field(f.name).map_or(true, |v| v.trim().is_empty()))
            && self.skills.is_empty()
            && self.education.iter().all(Entry::is_blank)
            && self.experience.iter().all(Entry::is_blank)
            && self.projects.iter().all(Entry::is_blank)
            && self.achievements.iter().all(Entry::is_blank)
    }
}
