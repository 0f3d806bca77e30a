//! Whole-value edit operations on a CV.
//!
//! Each operation consumes the current value and returns the replacement.
//! On error the caller still holds its previous value, so a rejected edit
//! never leaves a half-applied CV behind.
//!
//! Invariants kept here:
//! - every section id has a row in both `section_entries` and
//!   `custom_section_fields`, created and removed together with the section
//! - a section's kind and id never change after creation
//! - `order` is assigned once at creation and never renumbered

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::cv::{
    CustomSection, CustomSectionField, CvData, Entry, PersonalInfo, Publication, SectionKind,
    SectionSettings, StyleSettings, Technologies,
};

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("Section {0} not found")]
    SectionNotFound(String),

    #[error("Section title cannot be empty")]
    BlankTitle,

    #[error("Section {id} is '{actual}'; its type and id cannot change")]
    KindChange { id: String, actual: &'static str },

    #[error("Section {id} is '{actual}', expected '{expected}'")]
    WrongKind {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Request to create a section. Unset spacing/line values take the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSection {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub show_line: Option<bool>,
    pub top_margin: Option<f64>,
    pub bottom_margin: Option<f64>,
    pub visible: Option<bool>,
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Appends a section with a fresh id and the given `order`, plus its empty
/// side-table rows. Returns the new CV and the created section.
pub fn add_section(
    mut cv: CvData,
    request: NewSection,
    order: i64,
) -> Result<(CvData, CustomSection), EditError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(EditError::BlankTitle);
    }

    let defaults = SectionSettings::default();
    let section = CustomSection {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        kind: request.kind,
        settings: SectionSettings {
            title: title.to_string(),
            show_line: request
                .show_line
                .unwrap_or(cv.style_settings.section_title_line),
            top_margin: request.top_margin.unwrap_or(defaults.top_margin),
            bottom_margin: request.bottom_margin.unwrap_or(defaults.bottom_margin),
            order,
            visible: request.visible.unwrap_or(defaults.visible),
        },
    };

    cv.section_entries.insert(section.id.clone(), Vec::new());
    cv.custom_section_fields
        .insert(section.id.clone(), Vec::new());
    cv.custom_sections.push(section.clone());
    Ok((cv, section))
}

/// Replaces a section's title and settings. Kind and id are fixed; the
/// stored `order` is kept whatever the request carries.
pub fn update_section(
    mut cv: CvData,
    id: &str,
    mut updated: CustomSection,
) -> Result<CvData, EditError> {
    let slot = cv
        .custom_sections
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| EditError::SectionNotFound(id.to_string()))?;

    if updated.kind != slot.kind || updated.id != slot.id {
        return Err(EditError::KindChange {
            id: id.to_string(),
            actual: slot.kind.as_str(),
        });
    }
    updated.settings.order = slot.settings.order;
    *slot = updated;
    Ok(cv)
}

/// Removes a section together with both of its side-table rows.
pub fn delete_section(mut cv: CvData, id: &str) -> Result<CvData, EditError> {
    let before = cv.custom_sections.len();
    cv.custom_sections.retain(|s| s.id != id);
    if cv.custom_sections.len() == before {
        return Err(EditError::SectionNotFound(id.to_string()));
    }
    cv.section_entries.remove(id);
    cv.custom_section_fields.remove(id);
    Ok(cv)
}

fn require_kind(cv: &CvData, id: &str, expected: SectionKind) -> Result<(), EditError> {
    let section = cv
        .section(id)
        .ok_or_else(|| EditError::SectionNotFound(id.to_string()))?;
    if section.kind != expected {
        return Err(EditError::WrongKind {
            id: id.to_string(),
            expected: expected.as_str(),
            actual: section.kind.as_str(),
        });
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Section content
// ────────────────────────────────────────────────────────────────────────────

pub fn set_entries(mut cv: CvData, id: &str, entries: Vec<Entry>) -> Result<CvData, EditError> {
    require_kind(&cv, id, SectionKind::Entries)?;
    cv.section_entries.insert(id.to_string(), entries);
    Ok(cv)
}

pub fn set_custom_fields(
    mut cv: CvData,
    id: &str,
    fields: Vec<CustomSectionField>,
) -> Result<CvData, EditError> {
    require_kind(&cv, id, SectionKind::Custom)?;
    cv.custom_section_fields.insert(id.to_string(), fields);
    Ok(cv)
}

// ────────────────────────────────────────────────────────────────────────────
// Singletons
// ────────────────────────────────────────────────────────────────────────────

pub fn set_personal_info(mut cv: CvData, info: PersonalInfo) -> CvData {
    cv.personal_info = info;
    cv
}

/// Shared by every publications section.
pub fn set_publications(mut cv: CvData, publications: Vec<Publication>) -> CvData {
    cv.publications = publications;
    cv
}

/// Shared by every technologies section.
pub fn set_technologies(mut cv: CvData, technologies: Technologies) -> CvData {
    cv.technologies = technologies;
    cv
}

pub fn set_style(mut cv: CvData, style: StyleSettings) -> CvData {
    cv.style_settings = style;
    cv
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn new_section(title: &str, kind: SectionKind) -> NewSection {
        NewSection {
            title: title.to_string(),
            kind,
            show_line: None,
            top_margin: None,
            bottom_margin: None,
            visible: None,
        }
    }

    fn with_section(kind: SectionKind) -> (CvData, CustomSection) {
        add_section(CvData::default(), new_section("Experience", kind), 1).unwrap()
    }

    #[test]
    fn test_add_section_creates_side_tables() {
        let (cv, section) = with_section(SectionKind::Entries);
        assert_eq!(cv.custom_sections, vec![section.clone()]);
        assert_eq!(cv.section_entries.get(&section.id), Some(&vec![]));
        assert_eq!(cv.custom_section_fields.get(&section.id), Some(&vec![]));
        assert_eq!(section.settings.order, 1);
        assert_eq!(section.settings.title, "Experience");
        assert!(section.settings.visible);
        assert_eq!(section.settings.top_margin, 0.3);
    }

    #[test]
    fn test_add_section_trims_and_rejects_blank_titles() {
        let (_, section) = add_section(
            CvData::default(),
            new_section("  Awards ", SectionKind::Custom),
            7,
        )
        .unwrap();
        assert_eq!(section.title, "Awards");

        let err = add_section(CvData::default(), new_section("   ", SectionKind::Custom), 1)
            .unwrap_err();
        assert_eq!(err, EditError::BlankTitle);
    }

    #[test]
    fn test_show_line_defaults_to_global_setting() {
        let mut cv = CvData::default();
        cv.style_settings.section_title_line = false;
        let (_, section) = add_section(cv, new_section("X", SectionKind::Entries), 1).unwrap();
        assert!(!section.settings.show_line);

        let mut request = new_section("Y", SectionKind::Entries);
        request.show_line = Some(true);
        let mut cv = CvData::default();
        cv.style_settings.section_title_line = false;
        let (_, section) = add_section(cv, request, 2).unwrap();
        assert!(section.settings.show_line);
    }

    #[test]
    fn test_update_section_replaces_settings() {
        let (cv, section) = with_section(SectionKind::Entries);
        let mut updated = section.clone();
        updated.settings.title = "Work History".into();
        updated.settings.visible = false;

        let cv = update_section(cv, &section.id, updated).unwrap();
        assert_eq!(cv.custom_sections[0].settings.title, "Work History");
        assert!(!cv.custom_sections[0].settings.visible);
    }

    #[test]
    fn test_update_section_rejects_kind_change() {
        let (cv, section) = with_section(SectionKind::Entries);
        let mut updated = section.clone();
        updated.kind = SectionKind::Custom;

        let err = update_section(cv, &section.id, updated).unwrap_err();
        assert!(matches!(err, EditError::KindChange { actual: "entries", .. }));
    }

    #[test]
    fn test_update_section_keeps_order() {
        let (cv, section) = with_section(SectionKind::Entries);
        let mut updated = section.clone();
        updated.settings.order = 99;
        updated.settings.title = "Work".to_string();
        updated.settings.visible = false;

        let cv = update_section(cv, &section.id, updated).unwrap();
        let stored = cv.section(&section.id).unwrap();
        assert_eq!(stored.settings.order, 1);
        assert_eq!(stored.settings.title, "Work");
        assert!(!stored.settings.visible);
    }

    #[test]
    fn test_update_unknown_section() {
        let (cv, section) = with_section(SectionKind::Entries);
        let err = update_section(cv, "nope", section).unwrap_err();
        assert_eq!(err, EditError::SectionNotFound("nope".into()));
    }

    #[test]
    fn test_delete_section_removes_side_tables() {
        let (cv, section) = with_section(SectionKind::Entries);
        let cv = set_entries(cv, &section.id, vec![Entry::default()]).unwrap();
        let cv = delete_section(cv, &section.id).unwrap();
        assert!(cv.custom_sections.is_empty());
        assert!(cv.section_entries.is_empty());
        assert!(cv.custom_section_fields.is_empty());

        assert!(matches!(
            delete_section(cv, &section.id),
            Err(EditError::SectionNotFound(_))
        ));
    }

    #[test]
    fn test_set_entries_requires_entries_section() {
        let (cv, section) = with_section(SectionKind::Custom);
        let err = set_entries(cv, &section.id, vec![Entry::default()]).unwrap_err();
        assert_eq!(
            err,
            EditError::WrongKind {
                id: section.id.clone(),
                expected: "entries",
                actual: "custom",
            }
        );
    }

    #[test]
    fn test_set_custom_fields() {
        let (cv, section) = with_section(SectionKind::Custom);
        let field = CustomSectionField {
            main_heading: "Talk".into(),
            ..CustomSectionField::default()
        };
        let cv = set_custom_fields(cv, &section.id, vec![field.clone()]).unwrap();
        assert_eq!(cv.custom_section_fields[&section.id], vec![field]);

        let (cv, entries) = with_section(SectionKind::Entries);
        assert!(set_custom_fields(cv, &entries.id, vec![]).is_err());
    }

    #[test]
    fn test_singleton_replacements_leave_sections_alone() {
        let (cv, _) = with_section(SectionKind::Publications);
        let sections = cv.custom_sections.clone();

        let cv = set_publications(
            cv,
            vec![Publication {
                title: "P".into(),
                ..Publication::default()
            }],
        );
        let cv = set_technologies(cv, Technologies::default());
        let cv = set_style(cv, StyleSettings::default());
        let cv = set_personal_info(
            cv,
            PersonalInfo {
                full_name: "Jane".into(),
                ..PersonalInfo::default()
            },
        );

        assert_eq!(cv.custom_sections, sections);
        assert_eq!(cv.publications.len(), 1);
        assert_eq!(cv.personal_info.full_name, "Jane");
    }

    #[test]
    fn test_new_section_wire_format() {
        let request: NewSection =
            serde_json::from_str(r#"{"title":"Talks","type":"custom","showLine":false}"#).unwrap();
        assert_eq!(request.kind, SectionKind::Custom);
        assert_eq!(request.show_line, Some(false));
        assert!(request.top_margin.is_none());
    }
}
