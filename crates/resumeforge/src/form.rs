//! Editor view: HTML fragments for the input form.
//!
//! Each section renders one `{kind}-entry` block per entry, numbered by
//! position so `data-index` always matches the entry's index in the record.

use crate::model::{EntryList, FieldSpec, PersonalInfo, Resume, Section};
use crate::render::html::escape;

/// Rows given to multi-line inputs.
const TEXTAREA_ROWS: u8 = 3;

/// Render the entry editors for one section.
///
/// An empty collection still renders one blank editor with index 0, the
/// same way a freshly loaded record is padded.
#[must_use]
pub fn render_section(entries: &dyn EntryList) -> String {
    let section = entries.section();
    let count = entries.len().max(1);

    (0..count)
        .map(|index| render_entry(entries, section, index))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_entry(entries: &dyn EntryList, section: Section, index: usize) -> String {
    let inputs: String = entries
        .fields()
        .iter()
        .map(|spec| field_input(spec, entries.value(index, spec.name), None))
        .collect();

    format!(
        r#"<div class="{kind}-entry" data-index="{index}"><button type="button" class="remove-btn" data-section="{section}" data-index="{index}">×</button>{inputs}</div>"#,
        kind = section.entry_kind(),
    )
}

/// One input (or textarea) for a field, carrying its current value.
fn field_input(spec: &FieldSpec, value: Option<&str>, id: Option<&str>) -> String {
    let value = escape(value.unwrap_or_default());
    let id = id.map(|id| format!(r#" id="{id}""#)).unwrap_or_default();
    if spec.multiline {
        format!(
            r#"<textarea{id} class="{name}" placeholder="{placeholder}" rows="{TEXTAREA_ROWS}" data-field="{name}">{value}</textarea>"#,
            name = spec.name,
            placeholder = escape(spec.placeholder),
        )
    } else {
        format!(
            r#"<input type="text"{id} class="{name}" placeholder="{placeholder}" data-field="{name}" value="{value}">"#,
            name = spec.name,
            placeholder = escape(spec.placeholder),
        )
    }
}

/// Render the personal-information inputs.
#[must_use]
pub fn render_personal(personal: &PersonalInfo) -> String {
    PersonalInfo::FIELDS
        .iter()
        .map(|spec| field_input(spec, personal.field(spec.name), Some(spec.name)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the removable skill tags.
#[must_use]
pub fn render_skill_tags(skills: &[String]) -> String {
    skills
        .iter()
        .map(|skill| {
            let skill = escape(skill);
            format!(
                r#"<span class="skill-tag">{skill} <i class="fas fa-times remove" data-skill="{skill}"></i></span>"#
            )
        })
        .collect()
}

/// Render the whole editor: personal fields, every section, then skills.
#[must_use]
pub fn render_form(resume: &Resume) -> String {
    let mut parts = vec![format!(
        r#"<div class="form-section" data-section="personal">{}</div>"#,
        render_personal(&resume.personal)
    )];
    for section in Section::ALL {
        parts.push(format!(
            r#"<div class="form-section" id="{section}Container">{}</div>"#,
            render_section(resume.section(section))
        ));
    }
    parts.push(format!(
        r#"<div class="skills-tags" id="skillsTags">{}</div>"#,
        render_skill_tags(&resume.skills)
    ));
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Achievement, Education, Experience, Project};

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_empty_section_renders_one_blank_entry() {
        let entries: Vec<Education> = Vec::new();
        let html = render_section(&entries);

        assert_eq!(count(&html, r#"class="education-entry""#), 1);
        assert!(html.contains(r#"data-index="0""#));
        assert!(!html.contains(r#"data-index="1""#));
        assert_eq!(count(&html, r#"value="""#), 4);
    }

    #[test]
    fn test_every_section_kind_pads_when_empty() {
        let mut resume = Resume::default();
        for section in Section::ALL {
            let html = render_section(resume.section(section));
            let marker = format!(r#"class="{}-entry""#, section.entry_kind());
            assert_eq!(count(&html, &marker), 1, "{section}");
        }
        // Rendering pads only the view, not the record.
        assert!(resume.section_mut(Section::Projects).is_empty());
    }

    #[test]
    fn test_indices_are_contiguous() {
        let entries = vec![
            Project {
                title: Some("A".to_string()),
                description: None,
            },
            Project::default(),
            Project {
                title: Some("C".to_string()),
                description: Some("third".to_string()),
            },
        ];
        let html = render_section(&entries);

        for i in 0..3 {
            assert!(html.contains(&format!(r#"<div class="project-entry" data-index="{i}">"#)));
        }
        assert!(!html.contains(r#"data-index="3""#));
        assert!(html.contains(r#"value="C""#));
    }

    #[test]
    fn test_fields_carry_data_field_and_value() {
        let entries = vec![Experience {
            job_title: Some("Engineer".to_string()),
            company: Some("Acme & Sons".to_string()),
            duration: None,
            description: Some("Built <things>".to_string()),
        }];
        let html = render_section(&entries);

        assert!(html.contains(r#"data-field="jobTitle" value="Engineer""#));
        assert!(html.contains(r#"data-field="company" value="Acme &amp; Sons""#));
        assert!(html.contains(r#"data-field="duration" value="""#));
        assert!(html.contains(r#"data-field="description">Built &lt;things&gt;</textarea>"#));
        assert!(html.contains(r#"placeholder="Duration (e.g., Jan 2020 - Present)""#));
    }

    #[test]
    fn test_remove_button_addresses_entry() {
        let entries = vec![Achievement::default(), Achievement::default()];
        let html = render_section(&entries);

        assert!(html.contains(r#"data-section="achievements" data-index="1">×</button>"#));
        assert_eq!(count(&html, "remove-btn"), 2);
    }

    #[test]
    fn test_personal_inputs_have_ids() {
        let personal = PersonalInfo {
            full_name: Some("Ada".to_string()),
            ..PersonalInfo::default()
        };
        let html = render_personal(&personal);

        assert!(html.contains(r#"id="fullName""#));
        assert!(html.contains(r#"value="Ada""#));
        assert!(html.contains(r#"<textarea id="summary""#));
    }

    #[test]
    fn test_skill_tags_escape() {
        let html = render_skill_tags(&["C++".to_string(), "<script>".to_string()]);

        assert_eq!(count(&html, r#"class="skill-tag""#), 2);
        assert!(html.contains(r#"data-skill="&lt;script&gt;""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_skill_tags_empty() {
        assert!(render_skill_tags(&[]).is_empty());
    }

    #[test]
    fn test_render_form_contains_every_section() {
        let html = render_form(&Resume::blank());

        for section in Section::ALL {
            assert!(html.contains(&format!(r#"id="{section}Container""#)));
        }
        assert!(html.contains(r#"id="skillsTags""#));
        assert!(html.contains(r#"id="github""#));
    }
}
