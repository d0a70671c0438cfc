//! Print preview: renders a form snapshot as fixed-width text.
//!
//! Whatever the store holds at the moment of the call is what gets printed.
//! Collapsed sections are still rendered; collapsing only affects the editor.

use crate::resume::schema::{FieldDef, FieldRole, ResumeVariant, SectionDef};
use crate::resume::store::{FieldValue, FormState, Record, SectionState};

pub const PREVIEW_WIDTH: usize = 80;

const CONTACT_SEPARATOR: &str = " • ";
const BULLET: &str = "• ";
const BULLET_INDENT: usize = 2;

pub fn render_preview(variant: ResumeVariant, state: &FormState) -> String {
    let mut lines: Vec<String> = Vec::new();

    for def in variant.sections() {
        let Some(section) = state.section(def.key) else {
            continue;
        };
        let records: Vec<&Record> = match section {
            SectionState::Single(record) => vec![record],
            SectionState::List(records) => records.iter().collect(),
        };

        if is_header(def) {
            for record in records {
                render_header(def, record, &mut lines);
            }
            lines.push(String::new());
            continue;
        }

        if records.iter().all(|r| is_blank_record(def, r)) {
            continue;
        }

        lines.push(def.label.to_uppercase());
        lines.push("-".repeat(PREVIEW_WIDTH));
        for record in records {
            render_entry(def, record, &mut lines);
        }
        lines.push(String::new());
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn is_header(def: &SectionDef) -> bool {
    def.fields.iter().any(|f| f.role == FieldRole::Name)
}

fn is_blank_record(def: &SectionDef, record: &Record) -> bool {
    def.fields
        .iter()
        .all(|f| record.get(f.key).map_or(true, FieldValue::is_blank))
}

fn text_of<'a>(record: &'a Record, field: &FieldDef) -> Option<&'a str> {
    match record.get(field.key)? {
        FieldValue::Text(s) if !s.trim().is_empty() => Some(s.trim()),
        _ => None,
    }
}

fn items_of<'a>(record: &'a Record, field: &FieldDef) -> Vec<&'a str> {
    let raw: Vec<&str> = match record.get(field.key) {
        Some(FieldValue::Text(s)) => vec![s.as_str()],
        Some(FieldValue::List(items)) => items.iter().map(String::as_str).collect(),
        None => Vec::new(),
    };
    raw.into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn first_with_role<'a>(def: &SectionDef, record: &'a Record, role: FieldRole) -> Option<&'a str> {
    def.fields
        .iter()
        .filter(|f| f.role == role)
        .find_map(|f| text_of(record, f))
}

fn render_header(def: &SectionDef, record: &Record, lines: &mut Vec<String>) {
    if let Some(name) = first_with_role(def, record, FieldRole::Name) {
        for line in wrap(&name.to_uppercase(), PREVIEW_WIDTH) {
            lines.push(center(&line, PREVIEW_WIDTH));
        }
    }
    let contacts: Vec<&str> = def
        .fields
        .iter()
        .filter(|f| f.role == FieldRole::Contact)
        .filter_map(|f| text_of(record, f))
        .collect();
    if !contacts.is_empty() {
        for line in wrap(&contacts.join(CONTACT_SEPARATOR), PREVIEW_WIDTH) {
            lines.push(center(&line, PREVIEW_WIDTH));
        }
    }
}

fn render_entry(def: &SectionDef, record: &Record, lines: &mut Vec<String>) {
    if is_blank_record(def, record) {
        return;
    }

    let title = match (
        first_with_role(def, record, FieldRole::Title),
        first_with_role(def, record, FieldRole::Tagline),
    ) {
        (Some(title), Some(tagline)) => Some(format!("{title} — {tagline}")),
        (Some(title), None) => Some(title.to_string()),
        (None, Some(tagline)) => Some(tagline.to_string()),
        (None, None) => None,
    };
    push_pair(
        title.as_deref(),
        first_with_role(def, record, FieldRole::Aside),
        lines,
    );
    push_pair(
        first_with_role(def, record, FieldRole::Subtitle),
        first_with_role(def, record, FieldRole::Date),
        lines,
    );

    for field in def.fields {
        match field.role {
            FieldRole::Inline => {
                if let Some(value) = text_of(record, field) {
                    lines.extend(wrap(&format!("{}: {value}", field.label), PREVIEW_WIDTH));
                }
            }
            FieldRole::Bullets => {
                for item in items_of(record, field) {
                    push_bullet(item, lines);
                }
            }
            _ => {}
        }
    }
}

/// Left text with right text flush to the margin; falls back to separate
/// wrapped blocks when they do not fit side by side.
fn push_pair(left: Option<&str>, right: Option<&str>, lines: &mut Vec<String>) {
    if let (Some(l), Some(r)) = (left, right) {
        let used = l.chars().count() + r.chars().count();
        if used + 2 <= PREVIEW_WIDTH {
            lines.push(format!("{l}{}{r}", " ".repeat(PREVIEW_WIDTH - used)));
            return;
        }
    }
    if let Some(l) = left {
        lines.extend(wrap(l, PREVIEW_WIDTH));
    }
    if let Some(r) = right {
        for line in wrap(r, PREVIEW_WIDTH) {
            lines.push(format!("{line:>width$}", width = PREVIEW_WIDTH));
        }
    }
}

fn push_bullet(item: &str, lines: &mut Vec<String>) {
    let prefix = format!("{}{BULLET}", " ".repeat(BULLET_INDENT));
    let hang = " ".repeat(prefix.chars().count());
    let body_width = PREVIEW_WIDTH - prefix.chars().count();
    for (i, line) in wrap(item, body_width).into_iter().enumerate() {
        let lead = if i == 0 { &prefix } else { &hang };
        lines.push(format!("{lead}{line}"));
    }
}

/// Greedy word wrap. Words longer than the width are split at the width.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace().flat_map(|w| split_long(w, width)) {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if !current.is_empty() && needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long(word: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{text}", " ".repeat((width - len) / 2))
}
