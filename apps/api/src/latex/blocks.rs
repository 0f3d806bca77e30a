//! Block renderers — one LaTeX block per entry, custom field, publication,
//! or technology category. Each returns the block text without a trailing
//! newline; the caller joins blocks with [`join_blocks`].
//!
//! All blocks are emitted at a fixed base depth (two levels inside
//! `\begin{document}`), so the generated source reads as nested markup.

use crate::latex::text::{optional_month_year, RenderOptions};
use crate::models::cv::{CustomSectionField, Entry, Publication, TechnologyCategory};

/// Vertical space between sibling blocks in a section.
pub const BLOCK_GAP: &str = "\\vspace{0.2 cm}";

/// Vertical space between a two-column header and its bullet list.
const BULLET_GAP: &str = "\\vspace{0.10 cm}";

const BASE_DEPTH: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Line builder
// ────────────────────────────────────────────────────────────────────────────

/// Accumulates indented lines. Depth is in units of four spaces.
#[derive(Debug, Default)]
pub struct Lines(Vec<String>);

impl Lines {
    pub fn push(&mut self, depth: usize, text: impl AsRef<str>) {
        self.0.push(format!("{}{}", "    ".repeat(depth), text.as_ref()));
    }

    pub fn blank(&mut self) {
        self.0.push(String::new());
    }

    pub fn finish(self) -> String {
        self.0.join("\n")
    }
}

/// Joins rendered blocks with a blank line, the gap directive, and another blank line.
pub fn join_blocks(blocks: Vec<String>) -> String {
    let separator = format!("\n\n{}{BLOCK_GAP}\n\n", "    ".repeat(BASE_DEPTH));
    blocks.join(&separator)
}

fn present(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn present_opt(value: &Option<String>) -> Option<&str> {
    value.as_deref().and_then(present)
}

/// Writes up to two stacked lines; a forced break separates them only when
/// both are present.
fn stacked(lines: &mut Lines, depth: usize, first: Option<String>, second: Option<String>) {
    match (first, second) {
        (Some(first), Some(second)) => {
            lines.push(depth, format!("{first}\\\\"));
            lines.push(depth, second);
        }
        (Some(only), None) | (None, Some(only)) => lines.push(depth, only),
        (None, None) => {}
    }
}

fn highlights(lines: &mut Lines, depth: usize, points: &[String], opts: &RenderOptions) {
    lines.push(depth, "\\begin{highlights}");
    for point in points {
        lines.push(depth + 1, format!("\\item {}", opts.text(point)));
    }
    lines.push(depth, "\\end{highlights}");
}

// ────────────────────────────────────────────────────────────────────────────
// Two-column block (entries and custom fields)
// ────────────────────────────────────────────────────────────────────────────

/// The text slots of a two-column block, already extracted from whichever
/// record is being rendered.
struct TwoColumn<'a> {
    title: Option<&'a str>,
    subtitle: Option<&'a str>,
    right_top: Option<&'a str>,
    right_bottom: Option<&'a str>,
    bullets: &'a [String],
}

fn two_column(block: TwoColumn<'_>, opts: &RenderOptions) -> String {
    let depth = BASE_DEPTH;
    let italic = |s: &str| format!("\\textit{{{}}}", opts.text(s));
    let bold = |s: &str| format!("\\textbf{{{}}}", opts.text(s));

    let mut lines = Lines::default();
    lines.push(depth, "\\begin{twocolentry}{");
    stacked(
        &mut lines,
        depth + 1,
        block.right_top.map(italic),
        block.right_bottom.map(italic),
    );
    lines.push(depth, "}");
    stacked(
        &mut lines,
        depth + 1,
        block.title.map(bold),
        block.subtitle.map(italic),
    );
    lines.push(depth, "\\end{twocolentry}");

    if !block.bullets.is_empty() {
        lines.blank();
        lines.push(depth, BULLET_GAP);
        lines.push(depth, "\\begin{onecolentry}");
        highlights(&mut lines, depth + 1, block.bullets, opts);
        lines.push(depth, "\\end{onecolentry}");
    }
    lines.finish()
}

/// Renders one entry, either as a single-column title with bullets or as a
/// two-column block (title/subtitle left, location/date right).
pub fn entry_block(entry: &Entry, opts: &RenderOptions) -> String {
    if entry.is_one_column {
        let depth = BASE_DEPTH;
        let mut lines = Lines::default();
        lines.push(depth, "\\begin{onecolentry}");
        lines.push(depth + 1, opts.text(&entry.left_title));
        if !entry.bullet_points.is_empty() {
            highlights(&mut lines, depth + 1, &entry.bullet_points, opts);
        }
        lines.push(depth, "\\end{onecolentry}");
        return lines.finish();
    }

    two_column(
        TwoColumn {
            title: present(&entry.left_title),
            subtitle: present(&entry.subtitle),
            right_top: present_opt(&entry.location),
            right_bottom: present_opt(&entry.date_range),
            bullets: &entry.bullet_points,
        },
        opts,
    )
}

/// Custom fields always use the two-column layout.
pub fn custom_field_block(field: &CustomSectionField, opts: &RenderOptions) -> String {
    two_column(
        TwoColumn {
            title: present(&field.main_heading),
            subtitle: present(&field.sub_heading),
            right_top: present(&field.right_section),
            right_bottom: present(&field.right_sub_section),
            bullets: &field.bullet_points,
        },
        opts,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Publications and technologies
// ────────────────────────────────────────────────────────────────────────────

pub fn publication_block(publication: &Publication, opts: &RenderOptions) -> String {
    let depth = BASE_DEPTH;
    let mut lines = Lines::default();
    lines.push(depth, "\\begin{samepage}");
    lines.push(depth + 1, "\\begin{twocolentry}{");
    lines.push(depth + 2, optional_month_year(publication.date));
    lines.push(depth + 1, "}");
    lines.push(
        depth + 2,
        format!("\\textbf{{{}}}", opts.text(&publication.title)),
    );
    lines.blank();
    lines.push(depth + 2, BULLET_GAP);
    lines.blank();
    lines.push(depth + 2, opts.text(&publication.authors));
    lines.push(depth + 1, "\\end{twocolentry}");

    if let Some(doi) = present(&publication.doi_url) {
        lines.blank();
        lines.push(depth + 1, BULLET_GAP);
        lines.push(depth + 1, "\\begin{onecolentry}");
        lines.push(
            depth + 2,
            format!("\\href{{{}}}{{{}}}", opts.url(doi), opts.text(doi)),
        );
        lines.push(depth + 1, "\\end{onecolentry}");
    }
    lines.push(depth, "\\end{samepage}");
    lines.finish()
}

/// `Languages: Go, Rust` with the category name in bold.
pub fn technology_block(category: &TechnologyCategory, opts: &RenderOptions) -> String {
    let items = category
        .items
        .iter()
        .map(|item| opts.text(item))
        .collect::<Vec<_>>()
        .join(", ");

    let depth = BASE_DEPTH;
    let mut lines = Lines::default();
    lines.push(depth, "\\begin{onecolentry}");
    lines.push(
        depth + 1,
        format!("\\textbf{{{}:}} {items}", opts.text(&category.name)),
    );
    lines.push(depth, "\\end{onecolentry}");
    lines.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
