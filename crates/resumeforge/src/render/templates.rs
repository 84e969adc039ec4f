//! The three resume layouts.
//!
//! All layouts share one section order (summary, experience, education,
//! skills, projects, achievements) and differ in titles, icons and a couple
//! of layout choices, captured per layout in a [`Style`].

use crate::model::{Entry, Resume};

use super::html::{div, escape, icon, paragraph};

/// How experience entries lay out their title and company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExperienceLayout {
    /// Title, then company as a subtitle.
    Stacked,
    /// "{title} at {company}" on one line.
    Inline,
}

/// How the skills section lays out its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkillsLayout {
    /// One `skill-item` per skill in a grid.
    Grid,
    /// One paragraph joined by bullets.
    Inline,
}

/// A section heading, optionally preceded by an icon.
#[derive(Debug, Clone, Copy)]
struct Title {
    text: &'static str,
    icon: Option<&'static str>,
}

impl Title {
    const fn plain(text: &'static str) -> Self {
        Self { text, icon: None }
    }

    const fn with_icon(text: &'static str, icon: &'static str) -> Self {
        Self {
            text,
            icon: Some(icon),
        }
    }

    fn render(self) -> String {
        match self.icon {
            Some(class) => format!(
                r#"<div class="section-title">{} {}</div>"#,
                icon(class),
                escape(self.text)
            ),
            None => div("section-title", self.text),
        }
    }
}

/// Presentation choices of one layout.
#[derive(Debug)]
pub(super) struct Style {
    class: &'static str,
    contact_icons: bool,
    summary: Title,
    experience: Title,
    education: Title,
    skills: Title,
    projects: Title,
    achievements: Title,
    experience_layout: ExperienceLayout,
    description_style: Option<&'static str>,
    skills_layout: SkillsLayout,
}

pub(super) const CLASSIC: Style = Style {
    class: "template-classic",
    contact_icons: true,
    summary: Title::plain("Professional Summary"),
    experience: Title::plain("Work Experience"),
    education: Title::plain("Education"),
    skills: Title::plain("Skills"),
    projects: Title::plain("Projects"),
    achievements: Title::plain("Achievements & Certifications"),
    experience_layout: ExperienceLayout::Stacked,
    description_style: Some("margin-top: 0.5rem;"),
    skills_layout: SkillsLayout::Grid,
};

pub(super) const MODERN: Style = Style {
    class: "template-modern",
    contact_icons: true,
    summary: Title::with_icon("About Me", "fas fa-user"),
    experience: Title::with_icon("Experience", "fas fa-briefcase"),
    education: Title::with_icon("Education", "fas fa-graduation-cap"),
    skills: Title::with_icon("Skills", "fas fa-star"),
    projects: Title::with_icon("Projects", "fas fa-project-diagram"),
    achievements: Title::with_icon("Achievements", "fas fa-trophy"),
    experience_layout: ExperienceLayout::Stacked,
    description_style: Some("margin-top: 0.5rem;"),
    skills_layout: SkillsLayout::Grid,
};

pub(super) const MINIMAL: Style = Style {
    class: "template-minimal",
    contact_icons: false,
    summary: Title::plain("Summary"),
    experience: Title::plain("Experience"),
    education: Title::plain("Education"),
    skills: Title::plain("Skills"),
    projects: Title::plain("Projects"),
    achievements: Title::plain("Achievements"),
    experience_layout: ExperienceLayout::Inline,
    description_style: None,
    skills_layout: SkillsLayout::Inline,
};

/// Contact fields in display order, with their icon classes.
const CONTACTS: &[(&str, &str)] = &[
    ("email", "fas fa-envelope"),
    ("phone", "fas fa-phone"),
    ("location", "fas fa-location-dot"),
    ("linkedin", "fab fa-linkedin"),
    ("github", "fab fa-github"),
];

/// Heading shown when no name has been entered.
pub const PLACEHOLDER_NAME: &str = "Your Name";

/// Render `resume` with the given layout.
pub(super) fn render_with(style: &Style, resume: &Resume) -> String {
    let sections: Vec<String> = [
        summary(style, resume),
        experience(style, resume),
        education(style, resume),
        skills(style, resume),
        projects(style, resume),
        achievements(style, resume),
    ]
    .into_iter()
    .flatten()
    .collect();

    format!(
        r#"<div class="resume-template {class}">
{header}
{sections}
</div>"#,
        class = style.class,
        header = header(style, resume),
        sections = sections.join("\n"),
    )
}

fn header(style: &Style, resume: &Resume) -> String {
    let name = resume.personal.display_name().unwrap_or(PLACEHOLDER_NAME);

    let contacts: String = CONTACTS
        .iter()
        .filter_map(|(field, icon_class)| {
            let value = resume
                .personal
                .field(field)
                .filter(|v| !v.trim().is_empty())?;
            Some(if style.contact_icons {
                format!("<span>{} {}</span>", icon(icon_class), escape(value))
            } else {
                format!("<span>{}</span>", escape(value))
            })
        })
        .collect();

    format!(
        r#"<div class="resume-header">
{name}
<div class="resume-contact">{contacts}</div>
</div>"#,
        name = div("resume-name", name),
    )
}

fn section(title: Title, items: &str) -> String {
    format!(
        r#"<div class="resume-section">
{}
{items}
</div>"#,
        title.render()
    )
}

fn item(parts: &[String]) -> String {
    format!(r#"<div class="section-item">{}</div>"#, parts.concat())
}

fn summary(style: &Style, resume: &Resume) -> Option<String> {
    let text = resume.personal.summary()?;
    Some(section(style.summary, &paragraph(text, None)))
}

fn experience(style: &Style, resume: &Resume) -> Option<String> {
    let items: Vec<String> = resume
        .experience
        .iter()
        .filter_map(|exp| {
            let title = exp.headline()?;
            let company = exp.present("company");
            let mut parts = Vec::with_capacity(4);
            match style.experience_layout {
                ExperienceLayout::Stacked => {
                    parts.push(div("item-title", title));
                    if let Some(company) = company {
                        parts.push(div("item-subtitle", company));
                    }
                }
                ExperienceLayout::Inline => {
                    let line = match company {
                        Some(company) => format!("{title} at {company}"),
                        None => title.to_string(),
                    };
                    parts.push(div("item-title", &line));
                }
            }
            if let Some(duration) = exp.present("duration") {
                parts.push(div("item-duration", duration));
            }
            if let Some(description) = exp.present("description") {
                parts.push(paragraph(description, style.description_style));
            }
            Some(item(&parts))
        })
        .collect();

    (!items.is_empty()).then(|| section(style.experience, &items.join("\n")))
}

fn education(style: &Style, resume: &Resume) -> Option<String> {
    let items: Vec<String> = resume
        .education
        .iter()
        .filter_map(|edu| {
            let degree = edu.headline()?;
            let subtitle: Vec<&str> = ["institution", "year", "grade"]
                .into_iter()
                .filter_map(|field| edu.present(field))
                .collect();
            let mut parts = vec![div("item-title", degree)];
            if !subtitle.is_empty() {
                parts.push(div("item-subtitle", &subtitle.join(" • ")));
            }
            Some(item(&parts))
        })
        .collect();

    (!items.is_empty()).then(|| section(style.education, &items.join("\n")))
}

fn skills(style: &Style, resume: &Resume) -> Option<String> {
    if resume.skills.is_empty() {
        return None;
    }
    let body = match style.skills_layout {
        SkillsLayout::Grid => {
            let cells: String = resume
                .skills
                .iter()
                .map(|skill| div("skill-item", skill))
                .collect();
            format!(r#"<div class="skills-grid">{cells}</div>"#)
        }
        SkillsLayout::Inline => paragraph(&resume.skills.join(" • "), None),
    };
    Some(section(style.skills, &body))
}

fn projects(style: &Style, resume: &Resume) -> Option<String> {
    let items: Vec<String> = resume
        .projects
        .iter()
        .filter_map(|proj| {
            let title = proj.headline()?;
            let mut parts = vec![div("item-title", title)];
            if let Some(description) = proj.present("description") {
                parts.push(paragraph(description, None));
            }
            Some(item(&parts))
        })
        .collect();

    (!items.is_empty()).then(|| section(style.projects, &items.join("\n")))
}

fn achievements(style: &Style, resume: &Resume) -> Option<String> {
    let items: Vec<String> = resume
        .achievements
        .iter()
        .filter_map(|ach| Some(item(&[div("item-title", ach.headline()?)])))
        .collect();

    (!items.is_empty()).then(|| section(style.achievements, &items.join("\n")))
}
