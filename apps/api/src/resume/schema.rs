//! Section definitions that drive both the editor and the print preview.
//!
//! A resume variant is just an ordered list of [`SectionDef`]s, so adding a
//! layout means adding a list here rather than another copy of the form.

use serde::{Deserialize, Serialize};

use crate::resume::store::{FieldValue, Record, SectionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Single,
    List,
}

/// Where a field lands in the printed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Centered, upper-cased page title.
    Name,
    /// Joined into the line under the name.
    Contact,
    /// Left side of an entry's first line.
    Title,
    /// Appended to the title after a dash.
    Tagline,
    /// Right side of an entry's first line.
    Aside,
    /// Left side of an entry's second line.
    Subtitle,
    /// Right side of an entry's second line.
    Date,
    Bullets,
    /// `Label: value` on its own line.
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub role: FieldRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: SectionKind,
    pub fields: &'static [FieldDef],
}

const fn field(key: &'static str, label: &'static str, role: FieldRole) -> FieldDef {
    FieldDef { key, label, role }
}

const HEADER: SectionDef = SectionDef {
    key: "header",
    label: "Header",
    kind: SectionKind::Single,
    fields: &[
        field("name", "Full name", FieldRole::Name),
        field("address", "Location", FieldRole::Contact),
        field("phone", "Phone", FieldRole::Contact),
        field("email", "Email", FieldRole::Contact),
        field("linkedin", "LinkedIn", FieldRole::Contact),
        field("github", "GitHub", FieldRole::Contact),
    ],
};

const EDUCATION: SectionDef = SectionDef {
    key: "education",
    label: "Education",
    kind: SectionKind::List,
    fields: &[
        field("school", "School", FieldRole::Title),
        field("location", "Location", FieldRole::Aside),
        field("degree", "Degree", FieldRole::Subtitle),
        field("date", "Date", FieldRole::Date),
        field("details", "Details", FieldRole::Bullets),
    ],
};

const EXPERIENCE: SectionDef = SectionDef {
    key: "experience",
    label: "Experience",
    kind: SectionKind::List,
    fields: &[
        field("company", "Company", FieldRole::Title),
        field("location", "Location", FieldRole::Aside),
        field("role", "Role", FieldRole::Subtitle),
        field("date", "Date", FieldRole::Date),
        field("bullets", "Highlights", FieldRole::Bullets),
    ],
};

const PROJECTS: SectionDef = SectionDef {
    key: "projects",
    label: "Leadership & Projects",
    kind: SectionKind::List,
    fields: &[
        field("name", "Project", FieldRole::Title),
        field("tech", "Tech stack", FieldRole::Tagline),
        field("bullets", "Highlights", FieldRole::Bullets),
    ],
};

const SKILLS: SectionDef = SectionDef {
    key: "skills",
    label: "Technical Skills & Interests",
    kind: SectionKind::Single,
    fields: &[
        field("languages", "Languages", FieldRole::Inline),
        field("frameworks", "Frameworks", FieldRole::Inline),
        field("tools", "Developer Tools", FieldRole::Inline),
    ],
};

const COMPACT_SKILLS: SectionDef = SectionDef {
    label: "Skills",
    ..SKILLS
};

const CLASSIC: &[SectionDef] = &[HEADER, EDUCATION, EXPERIENCE, PROJECTS, SKILLS];
const COMPACT: &[SectionDef] = &[HEADER, EXPERIENCE, EDUCATION, COMPACT_SKILLS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeVariant {
    /// Education first, with a projects section.
    #[default]
    Classic,
    /// Experience first, no projects.
    Compact,
}

impl ResumeVariant {
    pub fn sections(self) -> &'static [SectionDef] {
        match self {
            ResumeVariant::Classic => CLASSIC,
            ResumeVariant::Compact => COMPACT,
        }
    }

    pub fn section(self, key: &str) -> Option<&'static SectionDef> {
        self.sections().iter().find(|s| s.key == key)
    }
}

/// Empty entry for the editor's "add" button.
pub fn blank_record(section: &SectionDef) -> Record {
    section.fields.iter().fold(Record::new(), |record, f| {
        let value = match f.role {
            FieldRole::Bullets => FieldValue::List(Vec::new()),
            _ => FieldValue::text(""),
        };
        record.with(f.key, value)
    })
}

/// Empty section state matching the definition's shape.
pub fn blank_section(section: &SectionDef) -> SectionState {
    match section.kind {
        SectionKind::Single => SectionState::Single(blank_record(section)),
        SectionKind::List => SectionState::List(Vec::new()),
    }
}
