//! Form-state store for the resume editor.
//!
//! State is never edited in place. [`reduce`] takes the current snapshot and
//! one [`Action`] and returns the next snapshot, which the presentation layer
//! renders. Every action is total: anything that does not address an existing
//! section, record or field yields an equal snapshot.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|s| s.trim().is_empty()),
        }
    }
}

/// One entry of a section. Its field set is fixed when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    fn replace(&mut self, field: &str, value: FieldValue) -> bool {
        match self.0.get_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SectionState {
    Single(Record),
    List(Vec<Record>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormState {
    sections: BTreeMap<String, SectionState>,
    collapsed: BTreeSet<String>,
}

impl FormState {
    pub fn new() -> Self {
        FormState::default()
    }

    pub fn with_section(mut self, key: impl Into<String>, section: SectionState) -> Self {
        self.sections.insert(key.into(), section);
        self
    }

    pub fn section(&self, key: &str) -> Option<&SectionState> {
        self.sections.get(key)
    }

    pub fn records(&self, key: &str) -> &[Record] {
        match self.sections.get(key) {
            Some(SectionState::List(records)) => records,
            _ => &[],
        }
    }

    pub fn is_collapsed(&self, key: &str) -> bool {
        self.collapsed.contains(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Replaces one existing field. `index` is omitted for singleton sections.
    UpdateField {
        section: String,
        #[serde(default)]
        index: Option<usize>,
        field: String,
        value: FieldValue,
    },
    AddRecord {
        section: String,
        template: Record,
    },
    RemoveRecord {
        section: String,
        index: usize,
    },
    ToggleSection {
        section: String,
    },
}

pub fn reduce(state: &FormState, action: Action) -> FormState {
    let mut next = state.clone();

    match action {
        Action::UpdateField {
            section,
            index,
            field,
            value,
        } => {
            let target = match (next.sections.get_mut(&section), index) {
                (Some(SectionState::Single(record)), None) => Some(record),
                (Some(SectionState::List(records)), Some(i)) => records.get_mut(i),
                _ => None,
            };
            let applied = target.is_some_and(|record| record.replace(&field, value));
            if !applied {
                debug!("update_field ignored: {section}[{index:?}].{field} does not exist");
            }
        }
        Action::AddRecord { section, template } => match next.sections.get_mut(&section) {
            Some(SectionState::List(records)) => records.push(template),
            _ => debug!("add_record ignored: '{section}' is not a list section"),
        },
        Action::RemoveRecord { section, index } => match next.sections.get_mut(&section) {
            Some(SectionState::List(records)) if index < records.len() => {
                records.remove(index);
            }
            _ => debug!("remove_record ignored: {section}[{index}] does not exist"),
        },
        Action::ToggleSection { section } => {
            if !next.sections.contains_key(&section) {
                debug!("toggle_section ignored: unknown section '{section}'");
            } else if !next.collapsed.remove(&section) {
                next.collapsed.insert(section);
            }
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn education(school: &str) -> Record {
        Record::new()
            .with("school", FieldValue::text(school))
            .with("degree", FieldValue::text("BSc"))
            .with("date", FieldValue::text("2025"))
            .with("details", FieldValue::list(["GPA: 3.9"]))
    }

    fn job(company: &str) -> Record {
        Record::new()
            .with("company", FieldValue::text(company))
            .with("role", FieldValue::text("Engineer"))
    }

    fn state() -> FormState {
        FormState::new()
            .with_section(
                "header",
                SectionState::Single(Record::new().with("name", FieldValue::text("Ada"))),
            )
            .with_section("education", SectionState::List(vec![education("Harvard")]))
            .with_section(
                "experience",
                SectionState::List(vec![job("Tech Giant Corp"), job("StartUp Inc.")]),
            )
    }

    #[test]
    fn test_add_record_appends_template_unchanged() {
        let template = Record::new()
            .with("school", FieldValue::text(""))
            .with("degree", FieldValue::text(""))
            .with("date", FieldValue::text(""))
            .with("details", FieldValue::text(""));

        let next = reduce(
            &state(),
            Action::AddRecord {
                section: "education".to_string(),
                template: template.clone(),
            },
        );

        let records = next.records("education");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], template);
        assert_eq!(records[0], education("Harvard"));
    }

    #[test]
    fn test_remove_record_shifts_remaining() {
        let next = reduce(
            &state(),
            Action::RemoveRecord {
                section: "experience".to_string(),
                index: 0,
            },
        );
        assert_eq!(next.records("experience"), &[job("StartUp Inc.")]);
    }

    #[test]
    fn test_update_field_in_list_record() {
        let next = reduce(
            &state(),
            Action::UpdateField {
                section: "experience".to_string(),
                index: Some(1),
                field: "role".to_string(),
                value: FieldValue::text("Founder"),
            },
        );
        assert_eq!(
            next.records("experience")[1].get("role"),
            Some(&FieldValue::text("Founder"))
        );
        assert_eq!(next.records("experience")[0], job("Tech Giant Corp"));
    }

    #[test]
    fn test_update_field_in_singleton_section() {
        let next = reduce(
            &state(),
            Action::UpdateField {
                section: "header".to_string(),
                index: None,
                field: "name".to_string(),
                value: FieldValue::text("Grace"),
            },
        );
        match next.section("header") {
            Some(SectionState::Single(record)) => {
                assert_eq!(record.get("name"), Some(&FieldValue::text("Grace")))
            }
            other => panic!("unexpected header {other:?}"),
        }
    }

    #[test]
    fn test_reduce_leaves_previous_snapshot_untouched() {
        let before = state();
        let _ = reduce(
            &before,
            Action::RemoveRecord {
                section: "experience".to_string(),
                index: 1,
            },
        );
        assert_eq!(before, state());
    }

    #[test]
    fn test_out_of_range_and_unknown_targets_are_no_ops() {
        let base = state();
        let actions = vec![
            Action::RemoveRecord {
                section: "experience".to_string(),
                index: 5,
            },
            Action::RemoveRecord {
                section: "header".to_string(),
                index: 0,
            },
            Action::AddRecord {
                section: "awards".to_string(),
                template: Record::new(),
            },
            Action::UpdateField {
                section: "education".to_string(),
                index: Some(3),
                field: "school".to_string(),
                value: FieldValue::text("MIT"),
            },
            Action::UpdateField {
                section: "education".to_string(),
                index: None,
                field: "school".to_string(),
                value: FieldValue::text("MIT"),
            },
            Action::UpdateField {
                section: "header".to_string(),
                index: None,
                field: "nickname".to_string(),
                value: FieldValue::text("Countess"),
            },
            Action::ToggleSection {
                section: "awards".to_string(),
            },
        ];
        for action in actions {
            assert_eq!(reduce(&base, action), base);
        }
    }

    #[test]
    fn test_toggle_section_flips_collapsed() {
        let toggle = || Action::ToggleSection {
            section: "education".to_string(),
        };
        let collapsed = reduce(&state(), toggle());
        assert!(collapsed.is_collapsed("education"));
        let expanded = reduce(&collapsed, toggle());
        assert!(!expanded.is_collapsed("education"));
    }

    #[test]
    fn test_action_deserializes_from_json() {
        let action: Action = serde_json::from_str(
            r#"{"action":"update_field","section":"header","field":"name","value":"Ada"}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::UpdateField {
                section: "header".to_string(),
                index: None,
                field: "name".to_string(),
                value: FieldValue::text("Ada"),
            }
        );

        let action: Action = serde_json::from_str(
            r#"{"action":"add_record","section":"education","template":{"school":"","details":[]}}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::AddRecord {
                section: "education".to_string(),
                template: Record::new()
                    .with("school", FieldValue::text(""))
                    .with("details", FieldValue::List(vec![])),
            }
        );
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::text("  ").is_blank());
        assert!(FieldValue::List(vec![]).is_blank());
        assert!(!FieldValue::list(["x"]).is_blank());
    }
}
