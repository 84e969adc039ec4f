//! Record-to-HTML rendering.
//!
//! [`render`] derives the resume fragment for one of the three [`Template`]s;
//! [`render_document`] wraps that fragment into a standalone, print-ready
//! HTML page for export.

pub mod html;
mod templates;

use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::export::ExportOptions;
use crate::model::Resume;

pub use templates::PLACEHOLDER_NAME;

/// One of the fixed rendering layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Serif-style layout with plain section titles.
    #[default]
    Classic,
    /// Layout with icons in front of every section title.
    Modern,
    /// Sparse layout without icons.
    Minimal,
}

impl Template {
    /// All templates, in selector order.
    pub const ALL: [Template; 3] = [Self::Classic, Self::Modern, Self::Minimal];

    /// Template name as used in configuration and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
            Self::Minimal => "minimal",
        }
    }

    /// Parse a stored template name, falling back to [`Template::Classic`].
    #[must_use]
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    fn style(self) -> &'static templates::Style {
        match self {
            Self::Classic => &templates::CLASSIC,
            Self::Modern => &templates::MODERN,
            Self::Minimal => &templates::MINIMAL,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "modern" => Ok(Self::Modern),
            "minimal" => Ok(Self::Minimal),
            _ => Err(Error::UnknownTemplate {
                name: s.to_string(),
            }),
        }
    }
}

/// Theme values injected into the document as CSS custom properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Accent color, `#rrggbb`.
    pub primary_color: String,
    /// Font family name.
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_string(),
            font_family: "Inter".to_string(),
        }
    }
}

/// Render the resume fragment for `template`.
///
/// Sections with nothing to show are omitted; entries are shown only when
/// their headline field (degree, job title, project title, achievement text)
/// is present. All user text is escaped.
#[must_use]
pub fn render(resume: &Resume, template: Template) -> String {
    templates::render_with(template.style(), resume)
}

/// Render a standalone HTML document suitable for printing to paged media.
#[must_use]
pub fn render_document(
    resume: &Resume,
    template: Template,
    theme: &Theme,
    options: &ExportOptions,
) -> String {
    let title = resume
        .personal
        .display_name()
        .map_or_else(|| "Resume".to_string(), |name| format!("{name} - Resume"));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<meta name="generator" content="resumeforge {version}">
<title>{title}</title>
<style>
:root {{
    --primary-color: {color};
    --font-family: '{font}', sans-serif;
}}
@page {{
    size: {page_size};
    margin: {margin}mm;
}}
{base_css}
</style>
</head>
<body>
<div id="resumePreview">
{body}
</div>
</body>
</html>
"#,
        version = env!("CARGO_PKG_VERSION"),
        title = html::escape(&title),
        color = css_escape(&theme.primary_color),
        font = css_escape(&theme.font_family),
        page_size = options.page_size(),
        margin = options.margin_mm,
        base_css = BASE_CSS,
        body = render(resume, template),
    )
}

/// Escape a value placed inside the `<style>` block.
///
/// Entities are not decoded there, so characters that could close the string,
/// the declaration or the element become CSS hex escapes.
fn css_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_control() || matches!(c, '\\' | '\'' | '"' | '<' | '>' | ';' | '{' | '}') {
            let _ = write!(out, "\\{:x} ", u32::from(c));
        } else {
            out.push(c);
        }
    }
    out
}

/// Layout rules shared by every template; colors and fonts come from the
/// custom properties.
const BASE_CSS: &str = r"
body { margin: 0; font-family: var(--font-family); color: #1f2937; }
.resume-template { padding: 0; line-height: 1.5; }
.resume-header { margin-bottom: 1.25rem; }
.resume-name { font-size: 2rem; font-weight: 700; color: var(--primary-color); }
.resume-contact { display: flex; flex-wrap: wrap; gap: 0.75rem; font-size: 0.9rem; }
.resume-section { margin-bottom: 1rem; break-inside: avoid; page-break-inside: avoid; }
.section-title { font-weight: 700; text-transform: uppercase; color: var(--primary-color);
    border-bottom: 1px solid var(--primary-color); margin-bottom: 0.5rem; }
.section-item { margin-bottom: 0.75rem; break-inside: avoid; page-break-inside: avoid; }
.item-title { font-weight: 600; }
.item-subtitle, .item-duration { font-size: 0.9rem; color: #4b5563; }
.skills-grid { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.skill-item { padding: 0.15rem 0.6rem; border: 1px solid var(--primary-color); border-radius: 4px; }
.template-minimal .section-title { border-bottom: none; color: inherit; }
.template-modern .resume-header { border-left: 4px solid var(--primary-color); padding-left: 1rem; }
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Achievement, Education, Experience, Project};

    fn sample() -> Resume {
        let mut resume = Resume::blank();
        resume.personal.full_name = Some("Ada Lovelace".to_string());
        resume.personal.email = Some("ada@example.com".to_string());
        resume.personal.github = Some("github.com/ada".to_string());
        resume.personal.summary = Some("Analyst.\nMathematician.".to_string());
        resume.experience = vec![
            Experience {
                job_title: Some("Engineer".to_string()),
                company: Some("Analytical Engines".to_string()),
                duration: Some("1842 - 1843".to_string()),
                description: Some("Wrote the first program.".to_string()),
            },
            Experience {
                company: Some("Hidden Co".to_string()),
                ..Experience::default()
            },
        ];
        resume.education = vec![Education {
            degree: Some("Mathematics".to_string()),
            institution: Some("Home".to_string()),
            year: Some("1835".to_string()),
            grade: None,
        }];
        resume.skills = vec!["Rust".to_string(), "Math".to_string()];
        resume.projects = vec![Project {
            title: Some("Note G".to_string()),
            description: None,
        }];
        resume.achievements = vec![Achievement {
            text: Some("First programmer".to_string()),
        }];
        resume
    }

    #[test]
    fn test_template_from_str() {
        assert_eq!("classic".parse::<Template>().unwrap(), Template::Classic);
        assert_eq!("MODERN".parse::<Template>().unwrap(), Template::Modern);
        assert_eq!(" minimal".parse::<Template>().unwrap(), Template::Minimal);
        assert!("fancy".parse::<Template>().is_err());
    }

    #[test]
    fn test_template_fallback() {
        assert_eq!(Template::from_name_or_default("fancy"), Template::Classic);
        assert_eq!(Template::from_name_or_default("modern"), Template::Modern);
    }

    #[test]
    fn test_template_display_round_trip() {
        for template in Template::ALL {
            assert_eq!(template.to_string().parse::<Template>().unwrap(), template);
        }
    }

    #[test]
    fn test_blank_record_shows_placeholder_only() {
        let html = render(&Resume::blank(), Template::Classic);
        assert!(html.contains(r#"<div class="resume-name">Your Name</div>"#));
        assert!(!html.contains("resume-section"));
    }

    #[test]
    fn test_classic_layout() {
        let html = render(&sample(), Template::Classic);

        assert!(html.contains("template-classic"));
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains(r#"<i class="fas fa-envelope"></i> ada@example.com"#));
        assert!(html.contains(r#"<i class="fab fa-github"></i> github.com/ada"#));
        assert!(html.contains("Professional Summary"));
        assert!(html.contains("Work Experience"));
        assert!(html.contains(r#"<div class="item-subtitle">Analytical Engines</div>"#));
        assert!(html.contains(r#"<div class="item-duration">1842 - 1843</div>"#));
        assert!(html.contains("margin-top: 0.5rem;"));
        assert!(html.contains(r#"<div class="item-subtitle">Home • 1835</div>"#));
        assert!(html.contains(r#"<div class="skill-item">Rust</div>"#));
        assert!(html.contains("Achievements &amp; Certifications"));
    }

    #[test]
    fn test_modern_layout_has_icons() {
        let html = render(&sample(), Template::Modern);

        assert!(html.contains("template-modern"));
        assert!(html.contains(r#"<i class="fas fa-user"></i> About Me"#));
        assert!(html.contains(r#"<i class="fas fa-briefcase"></i> Experience"#));
        assert!(html.contains(r#"<i class="fas fa-graduation-cap"></i> Education"#));
        assert!(html.contains(r#"<i class="fas fa-star"></i> Skills"#));
        assert!(html.contains(r#"<i class="fas fa-project-diagram"></i> Projects"#));
        assert!(html.contains(r#"<i class="fas fa-trophy"></i> Achievements"#));
    }

    #[test]
    fn test_minimal_layout() {
        let html = render(&sample(), Template::Minimal);

        assert!(html.contains("template-minimal"));
        assert!(!html.contains("<i class="));
        assert!(html.contains("<span>ada@example.com</span>"));
        assert!(html.contains(r#"<div class="item-title">Engineer at Analytical Engines</div>"#));
        assert!(html.contains("Rust • Math"));
        assert!(!html.contains("skills-grid"));
        assert!(!html.contains("margin-top: 0.5rem;"));
    }

    #[test]
    fn test_entries_without_headline_are_hidden() {
        let html = render(&sample(), Template::Classic);
        assert!(!html.contains("Hidden Co"));
    }

    #[test]
    fn test_section_hidden_when_no_headlines() {
        let mut resume = Resume::blank();
        resume.projects[0].description = Some("no title".to_string());
        let html = render(&resume, Template::Modern);
        assert!(!html.contains("Projects"));
        assert!(!html.contains("no title"));
    }

    #[test]
    fn test_section_order() {
        let html = render(&sample(), Template::Classic);
        let order = [
            "Professional Summary",
            "Work Experience",
            "Education",
            "Skills",
            "Projects",
            "Achievements",
        ];
        let positions: Vec<usize> = order.iter().map(|t| html.find(t).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_whitespace_only_values_count_as_absent() {
        let mut resume = Resume::blank();
        resume.personal.full_name = Some("   ".to_string());
        resume.personal.email = Some(" \t".to_string());
        resume.personal.summary = Some("   ".to_string());
        resume.experience[0].job_title = Some("  ".to_string());
        resume.experience[0].company = Some("Shown Nowhere".to_string());

        for template in Template::ALL {
            let html = render(&resume, template);
            assert!(html.contains(r#"<div class="resume-name">Your Name</div>"#));
            assert!(!html.contains("<span>"), "{template}");
            assert!(!html.contains("resume-section"), "{template}");
            assert!(!html.contains("Shown Nowhere"), "{template}");
        }
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut resume = Resume::blank();
        resume.personal.full_name = Some("<script>alert(1)</script>".to_string());
        resume.skills.push("C & C++".to_string());
        let html = render(&resume, Template::Classic);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("C &amp; C++"));
    }

    #[test]
    fn test_render_does_not_depend_on_prior_template() {
        let resume = sample();
        let first = render(&resume, Template::Modern);
        let _ = render(&resume, Template::Minimal);
        assert_eq!(render(&resume, Template::Modern), first);
    }

    #[test]
    fn test_render_document_shell() {
        let theme = Theme {
            primary_color: "#ff0000".to_string(),
            font_family: "Roboto".to_string(),
        };
        let doc = render_document(&sample(), Template::Modern, &theme, &ExportOptions::default());

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Ada Lovelace - Resume</title>"));
        assert!(doc.contains("--primary-color: #ff0000;"));
        assert!(doc.contains("--font-family: 'Roboto', sans-serif;"));
        assert!(doc.contains("size: A4 portrait;"));
        assert!(doc.contains("margin: 10mm;"));
        assert!(doc.contains("template-modern"));
    }

    #[test]
    fn test_render_document_escapes_theme_as_css() {
        let theme = Theme {
            primary_color: "#2563eb".to_string(),
            font_family: "Gill Sans & Co's".to_string(),
        };
        let doc = render_document(&sample(), Template::Classic, &theme, &ExportOptions::default());

        assert!(doc.contains(r"--font-family: 'Gill Sans & Co\27 s', sans-serif;"));
        assert!(!doc.contains("Gill Sans &amp;"));
        assert!(doc.contains("--primary-color: #2563eb;"));
    }

    #[test]
    fn test_css_escape_cannot_close_style() {
        assert_eq!(css_escape("Inter"), "Inter");
        assert_eq!(css_escape("a;b"), r"a\3b b");
        assert_eq!(css_escape(r"x\y"), r"x\5c y");

        let theme = Theme {
            primary_color: "#2563eb".to_string(),
            font_family: "</style><script>".to_string(),
        };
        let doc = render_document(
            &Resume::blank(),
            Template::Classic,
            &theme,
            &ExportOptions::default(),
        );
        assert_eq!(doc.matches("</style>").count(), 1);
        assert!(!doc.contains("<script>"));
    }

    #[test]
    fn test_render_document_default_title() {
        let doc = render_document(
            &Resume::blank(),
            Template::Classic,
            &Theme::default(),
            &ExportOptions::default(),
        );
        assert!(doc.contains("<title>Resume</title>"));
    }
}
