//! Document preamble and the header block (name, contact strip, stamp).
//!
//! The preamble defines every environment the block renderers call
//! (`onecolentry`, `twocolentry`, `highlights`, `header`) plus the
//! `\mysection` heading macro, parameterized by the style settings.

use crate::latex::text::{
    length, month_year, theme_color_definition, RenderOptions, FALLBACK_LAST_UPDATED,
};
use crate::models::cv::{CvData, PersonalInfo, StyleSettings};

/// Font size option used when the style setting is blank.
const DEFAULT_FONT_SIZE: &str = "10pt";

// ────────────────────────────────────────────────────────────────────────────
// Preamble
// ────────────────────────────────────────────────────────────────────────────

/// Everything before `\begin{document}`.
pub fn preamble(cv: &CvData, opts: &RenderOptions) -> String {
    let style = &cv.style_settings;
    let info = &cv.personal_info;
    let margins = &style.page_margins;

    let font_size = match style.font_size.trim() {
        "" => DEFAULT_FONT_SIZE,
        size => size,
    };
    let name = opts.text(&info.full_name);
    let last_updated = info
        .last_updated
        .map(month_year)
        .unwrap_or_else(|| FALLBACK_LAST_UPDATED.to_string());

    format!(
        r#"\documentclass[{font_size}, letterpaper]{{article}}

% Packages:
\usepackage[
    ignoreheadfoot,
    top={top} cm,
    bottom={bottom} cm,
    left={left} cm,
    right={right} cm,
    footskip=1.0 cm,
]{{geometry}}
\usepackage{{titlesec}}
\usepackage{{tabularx}}
\usepackage{{array}}
\usepackage[dvipsnames]{{xcolor}}
{theme_color}
\usepackage{{enumitem}}
\usepackage{{fontawesome5}}
\usepackage{{amsmath}}
\usepackage[
    pdftitle={{{name}'s CV}},
    pdfauthor={{{name}}},
    pdfcreator={{LaTeX with CV Editor}},
    colorlinks=true,
    urlcolor=primaryColor
]{{hyperref}}
\usepackage[pscoord]{{eso-pic}}
\usepackage{{calc}}
\usepackage{{bookmark}}
\usepackage{{lastpage}}
\usepackage{{changepage}}
\usepackage{{paracol}}
\usepackage{{ifthen}}
\usepackage{{needspace}}
\usepackage{{iftex}}
\usepackage{{etoolbox}}

% Settings and commands
\ifPDFTeX
    \input{{glyphtounicode}}
    \pdfgentounicode=1
    \usepackage[utf8]{{inputenc}}
    \usepackage{{lmodern}}
\fi

\AtBeginEnvironment{{adjustwidth}}{{\partopsep0pt}}
\pagestyle{{empty}}
\setcounter{{secnumdepth}}{{0}}
\setlength{{\parindent}}{{0pt}}
\setlength{{\topskip}}{{0pt}}
\setlength{{\columnsep}}{{{column_spacing} cm}}

\makeatletter
\let\ps@customFooterStyle\ps@plain
\patchcmd{{\ps@customFooterStyle}}{{\thepage}}{{
    \color{{gray}}\textit{{\small {footer}}}
}}{{}}{{}}
\makeatother
\pagestyle{{customFooterStyle}}

% Section heading. Args: title, rule flag (true|false), top gap, title-to-rule gap, bottom gap (cm).
\newcommand{{\mysection}}[5]{{%
    \vspace{{#3 cm}}%
    \needspace{{4\baselineskip}}%
    \par\noindent{{\bfseries\large\color{{primaryColor}}#1}}\par
    \ifthenelse{{\equal{{#2}}{{true}}}}{{\vspace{{#4 cm}}\noindent\rule{{\linewidth}}{{0.4pt}}\par}}{{}}%
    \vspace{{#5 cm}}%
}}

\renewcommand\labelitemi{{$\circ$}}
\newenvironment{{highlights}}{{
    \begin{{itemize}}[
        topsep=0.10 cm,
        parsep=0.10 cm,
        partopsep=0pt,
        itemsep=0pt,
        leftmargin={bullet_left_margin} cm + 10pt
    ]
}}{{
    \end{{itemize}}
}}

\newenvironment{{onecolentry}}{{
    \begin{{adjustwidth}}{{
        0.2 cm + 0.00001 cm
    }}{{
        0.2 cm + 0.00001 cm
    }}
}}{{
    \end{{adjustwidth}}
}}

\newenvironment{{twocolentry}}[2][]{{
    \onecolentry
    \def\secondColumn{{#2}}
    \setcolumnwidth{{\fill, 4.5 cm}}
    \begin{{paracol}}{{2}}
}}{{
    \switchcolumn \raggedleft \secondColumn
    \end{{paracol}}
    \endonecolentry
}}

\newenvironment{{header}}{{
    \setlength{{\topsep}}{{0pt}}\par\kern\topsep\centering\linespread{{1.5}}
}}{{
    \par\kern\topsep
}}

\newcommand{{\placelastupdatedtext}}{{%
  \AddToShipoutPictureFG*{{%
    \put(
        \LenToUnit{{\paperwidth-{right} cm-0.2 cm+0.05cm}},
        \LenToUnit{{\paperheight-1.0 cm}}
    ){{\vtop{{{{\null}}\makebox[0pt][c]{{
        \small\color{{gray}}\textit{{Last updated in {last_updated}}}\hspace{{\widthof{{Last updated in {last_updated}}}}}
    }}}}}}%
  }}%
}}%

\let\hrefWithoutArrow\href
\renewcommand{{\href}}[2]{{\hrefWithoutArrow{{#1}}{{\ifthenelse{{\equal{{#2}}{{}}}}{{}}{{#2 }}\raisebox{{.15ex}}{{\footnotesize \faExternalLink*}}}}}}"#,
        top = length(margins.top),
        bottom = length(margins.bottom),
        left = length(margins.left),
        right = length(margins.right),
        theme_color = theme_color_definition(&style.theme_color),
        column_spacing = length(style.column_spacing),
        footer = footer_text(style, info, opts),
        bullet_left_margin = length(style.bullet_left_margin),
    )
}

/// The footer line: footer text (or the full name), then the page counter
/// when page numbers are on.
fn footer_text(style: &StyleSettings, info: &PersonalInfo, opts: &RenderOptions) -> String {
    let label = if style.footer_text.trim().is_empty() {
        opts.text(&info.full_name)
    } else {
        opts.text(&style.footer_text)
    };
    let label = label.trim();
    let pages = r"Page \thepage{} of \pageref*{LastPage}";

    match (label.is_empty(), style.show_page_number) {
        (false, true) => format!("{label} - {pages}"),
        (false, false) => label.to_string(),
        (true, true) => pages.to_string(),
        (true, false) => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// One slot in the contact strip, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contact {
    Location,
    Email,
    Phone,
    Website,
    Linkedin,
    Github,
}

impl Contact {
    const ORDER: [Contact; 6] = [
        Contact::Location,
        Contact::Email,
        Contact::Phone,
        Contact::Website,
        Contact::Linkedin,
        Contact::Github,
    ];

    fn value(self, info: &PersonalInfo) -> &str {
        match self {
            Contact::Location => &info.location,
            Contact::Email => &info.email,
            Contact::Phone => &info.phone,
            Contact::Website => &info.website,
            Contact::Linkedin => &info.linkedin,
            Contact::Github => &info.github,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Contact::Location => r"\faMapMarker*",
            Contact::Email => r"\faEnvelope[regular]",
            Contact::Phone => r"\faPhone*",
            Contact::Website => r"\faLink",
            Contact::Linkedin => r"\faLinkedinIn",
            Contact::Github => r"\faGithub",
        }
    }

    /// Link target prefix; `None` for the one item that is not a link.
    fn link_scheme(self) -> Option<&'static str> {
        match self {
            Contact::Location => None,
            Contact::Email => Some("mailto:"),
            Contact::Phone => Some("tel:"),
            Contact::Website | Contact::Linkedin | Contact::Github => Some(""),
        }
    }

    fn render(self, value: &str, opts: &RenderOptions) -> String {
        let icon = self.icon();
        let text = opts.text(value);
        match self.link_scheme() {
            None => format!(
                r"\mbox{{{{\color{{black}}\footnotesize{icon}}}\hspace*{{0.13cm}}{text}}}%"
            ),
            Some(scheme) => format!(
                r"\mbox{{\hrefWithoutArrow{{{scheme}{target}}}{{\color{{black}}{{\footnotesize{icon}}}\hspace*{{0.13cm}}{text}}}}}%",
                target = opts.url(value),
            ),
        }
    }
}

const CONTACT_SEPARATOR: [&str; 3] = [r"\kern 0.25 cm%", r"\AND%", r"\kern 0.25 cm%"];

/// The contact strip lines: present fields in fixed order, a separator only
/// between two present fields.
fn contact_lines(info: &PersonalInfo, opts: &RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();
    let mut emitted_any = false;
    for contact in Contact::ORDER {
        let value = contact.value(info);
        if value.trim().is_empty() {
            continue;
        }
        if emitted_any {
            lines.extend(CONTACT_SEPARATOR.iter().map(|s| s.to_string()));
        }
        lines.push(contact.render(value, opts));
        emitted_any = true;
    }
    lines
}

/// `\begin{document}`, the separator box, the stamp, and the header block.
pub fn header(info: &PersonalInfo, opts: &RenderOptions) -> String {
    let mut out = format!(
        r"\begin{{document}}
    \newcommand{{\AND}}{{\unskip
        \cleaders\copy\ANDbox\hskip\wd\ANDbox
        \ignorespaces
    }}
    \newsavebox\ANDbox
    \sbox\ANDbox{{$|$}}

    \placelastupdatedtext
    \begin{{header}}
        \textbf{{\fontsize{{24 pt}}{{24 pt}}\selectfont {name}}}

        \vspace{{0.3 cm}}

        \normalsize
",
        name = opts.text(&info.full_name),
    );
    for line in contact_lines(info, opts) {
        out.push_str("        ");
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("    \\end{header}\n\n    \\vspace{0.3 cm - 0.3 cm}");
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
