// LaTeX document generation.
// `document` is the entry point; `blocks` and `preamble` hold the template
// pieces; `handlers` exposes generation over HTTP.

pub mod blocks;
pub mod document;
pub mod handlers;
pub mod preamble;
pub mod text;

pub use document::{generate, generate_with};
pub use text::RenderOptions;
