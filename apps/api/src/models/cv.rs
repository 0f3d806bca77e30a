//! CV data model — everything the editing surface produces and the LaTeX
//! generator consumes.
//!
//! Every string and list field tolerates `null` or absence on the wire and
//! normalizes to the empty value, so the generator never sees a hole.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Deserialization helpers
// ────────────────────────────────────────────────────────────────────────────

/// Treats an explicit `null` the same as an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp (UTC date kept), `null`, or
/// an empty string. Anything unparseable degrades to `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc).date_naive())
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub phone: String,
    #[serde(deserialize_with = "nullable")]
    pub website: String,
    #[serde(deserialize_with = "nullable")]
    pub linkedin: String,
    #[serde(deserialize_with = "nullable")]
    pub github: String,
    /// Shown in the top-right stamp. Absent → a fixed fallback month.
    #[serde(deserialize_with = "lenient_date")]
    pub last_updated: Option<NaiveDate>,
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Which renderer (and which content table) a section uses.
/// Fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Entries,
    Publications,
    Technologies,
    Custom,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Entries => "entries",
            SectionKind::Publications => "publications",
            SectionKind::Technologies => "technologies",
            SectionKind::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionSettings {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    pub show_line: bool,
    /// Centimeters.
    pub top_margin: f64,
    /// Centimeters.
    pub bottom_margin: f64,
    /// Render position, ascending. Assigned once, never renumbered; gaps and
    /// duplicates are fine (duplicates keep list order).
    pub order: i64,
    pub visible: bool,
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            title: String::new(),
            show_line: true,
            top_margin: 0.3,
            bottom_margin: 0.2,
            order: 0,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSection {
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(default, deserialize_with = "nullable")]
    pub settings: SectionSettings,
}

impl CustomSection {
    /// The heading printed in the document. The settings title is the
    /// user-editable one; the creation title is only a fallback.
    pub fn heading(&self) -> &str {
        if self.settings.title.trim().is_empty() {
            &self.title
        } else {
            &self.settings.title
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section content
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entry {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub left_title: String,
    #[serde(deserialize_with = "nullable")]
    pub subtitle: String,
    /// Carried for the editor; not rendered.
    #[serde(deserialize_with = "nullable")]
    pub right_side_value: String,
    pub is_one_column: bool,
    #[serde(deserialize_with = "nullable")]
    pub bullet_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools_used: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Publication {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub authors: String,
    #[serde(deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "nullable")]
    pub doi_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnologyCategory {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Technologies {
    /// Insertion order is display order.
    #[serde(deserialize_with = "nullable")]
    pub categories: Vec<TechnologyCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSectionField {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub main_heading: String,
    #[serde(deserialize_with = "nullable")]
    pub right_section: String,
    #[serde(deserialize_with = "nullable")]
    pub sub_heading: String,
    #[serde(deserialize_with = "nullable")]
    pub right_sub_section: String,
    #[serde(deserialize_with = "nullable")]
    pub bullet_points: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Style
// ────────────────────────────────────────────────────────────────────────────

/// Page margins in centimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMargins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self {
            top: 2.0,
            bottom: 2.0,
            left: 2.0,
            right: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSettings {
    #[serde(deserialize_with = "nullable")]
    pub page_margins: PageMargins,
    pub column_spacing: f64,
    pub bullet_left_margin: f64,
    /// Default `showLine` for newly created sections.
    pub section_title_line: bool,
    #[serde(deserialize_with = "nullable")]
    pub font_size: String,
    /// `#RRGGBB`, `#RGB`, or an xcolor name.
    #[serde(deserialize_with = "nullable")]
    pub theme_color: String,
    pub show_page_number: bool,
    /// Blank → the person's full name.
    #[serde(deserialize_with = "nullable")]
    pub footer_text: String,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            page_margins: PageMargins::default(),
            column_spacing: 0.0,
            bullet_left_margin: 0.4,
            section_title_line: true,
            font_size: "10pt".to_string(),
            theme_color: "#004F90".to_string(),
            show_page_number: true,
            footer_text: String::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Root aggregate
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvData {
    #[serde(deserialize_with = "nullable")]
    pub personal_info: PersonalInfo,
    /// Display order comes from `settings.order`, not list position.
    #[serde(deserialize_with = "nullable")]
    pub custom_sections: Vec<CustomSection>,
    /// Section id → entries. Only read for `entries` sections.
    #[serde(deserialize_with = "nullable")]
    pub section_entries: BTreeMap<String, Vec<Entry>>,
    /// Shared by every `publications` section.
    #[serde(deserialize_with = "nullable")]
    pub publications: Vec<Publication>,
    /// Shared by every `technologies` section.
    #[serde(deserialize_with = "nullable")]
    pub technologies: Technologies,
    /// Section id → fields. Only read for `custom` sections.
    #[serde(deserialize_with = "nullable")]
    pub custom_section_fields: BTreeMap<String, Vec<CustomSectionField>>,
    #[serde(deserialize_with = "nullable")]
    pub style_settings: StyleSettings,
}

/// A section resolved to the content its kind selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionContent<'a> {
    Entries(&'a [Entry]),
    Publications(&'a [Publication]),
    Technologies(&'a [TechnologyCategory]),
    Custom(&'a [CustomSectionField]),
}

impl SectionContent<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Entries(items) => items.is_empty(),
            SectionContent::Publications(items) => items.is_empty(),
            SectionContent::Technologies(items) => items.is_empty(),
            SectionContent::Custom(items) => items.is_empty(),
        }
    }
}

impl CvData {
    /// The only place a section's kind picks a content table. A missing
    /// side-table entry resolves to empty content.
    pub fn section_content(&self, section: &CustomSection) -> SectionContent<'_> {
        match section.kind {
            SectionKind::Entries => SectionContent::Entries(
                self.section_entries
                    .get(&section.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            ),
            SectionKind::Publications => SectionContent::Publications(&self.publications),
            SectionKind::Technologies => {
                SectionContent::Technologies(&self.technologies.categories)
            }
            SectionKind::Custom => SectionContent::Custom(
                self.custom_section_fields
                    .get(&section.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            ),
        }
    }

    /// Sections in render order: ascending `order`, ties in list order.
    pub fn ordered_sections(&self) -> Vec<&CustomSection> {
        let mut sections: Vec<&CustomSection> = self.custom_sections.iter().collect();
        // sort_by_key is stable
        sections.sort_by_key(|s| s.settings.order);
        sections
    }

    pub fn section(&self, id: &str) -> Option<&CustomSection> {
        self.custom_sections.iter().find(|s| s.id == id)
    }

    pub fn max_order(&self) -> Option<i64> {
        self.custom_sections.iter().map(|s| s.settings.order).max()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
