//! Whole-document assembly: preamble, header, then every visible non-empty
//! section in `order`, then the terminator.
//!
//! Generation is a pure function of the CV value. It never fails; absent
//! fields render blank and empty sections disappear.

use tracing::debug;

use crate::latex::blocks::{
    custom_field_block, entry_block, join_blocks, publication_block, technology_block,
};
use crate::latex::preamble::{header, preamble};
use crate::latex::text::{length, RenderOptions};
use crate::models::cv::{CustomSection, CvData, SectionContent};

/// Gap between a section title and its rule line, in centimeters.
pub const TITLE_RULE_GAP_CM: f64 = 0.1;

/// Renders the CV with user text passed through verbatim.
pub fn generate(cv: &CvData) -> String {
    generate_with(cv, &RenderOptions::default())
}

pub fn generate_with(cv: &CvData, opts: &RenderOptions) -> String {
    let mut out = preamble(cv, opts);
    out.push_str("\n\n");
    out.push_str(&header(&cv.personal_info, opts));

    let mut rendered = 0usize;
    for section in cv.ordered_sections() {
        if let Some(block) = section_block(cv, section, opts) {
            out.push_str("\n\n");
            out.push_str(&block);
            rendered += 1;
        }
    }

    out.push_str("\n\n\\end{document}\n");

    debug!(
        sections = cv.custom_sections.len(),
        rendered,
        bytes = out.len(),
        escape_text = opts.escape_text,
        "Generated LaTeX document"
    );
    out
}

/// The heading invocation plus body for one section, or `None` when the
/// section is hidden or has nothing to show.
fn section_block(cv: &CvData, section: &CustomSection, opts: &RenderOptions) -> Option<String> {
    if !section.settings.visible {
        return None;
    }
    let body = section_body(cv.section_content(section), opts)?;
    let settings = &section.settings;
    Some(format!(
        "    \\mysection{{{title}}}{{{rule}}}{{{top}}}{{{gap}}}{{{bottom}}}\n{body}",
        title = opts.text(section.heading()),
        rule = settings.show_line,
        top = length(settings.top_margin),
        gap = length(TITLE_RULE_GAP_CM),
        bottom = length(settings.bottom_margin),
    ))
}

fn section_body(content: SectionContent<'_>, opts: &RenderOptions) -> Option<String> {
    if content.is_empty() {
        return None;
    }
    let blocks: Vec<String> = match content {
        SectionContent::Entries(entries) => {
            entries.iter().map(|e| entry_block(e, opts)).collect()
        }
        SectionContent::Publications(publications) => publications
            .iter()
            .map(|p| publication_block(p, opts))
            .collect(),
        SectionContent::Technologies(categories) => categories
            .iter()
            .map(|c| technology_block(c, opts))
            .collect(),
        SectionContent::Custom(fields) => {
            fields.iter().map(|f| custom_field_block(f, opts)).collect()
        }
    };
    Some(join_blocks(blocks))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
