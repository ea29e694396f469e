//! Terminal frame rendering for the sidebar

use bitrain_core::emphasis::RenderedLine;
use std::fmt::Write as _;

const CLEAR_AND_HOME: &str = "\x1b[2J\x1b[H";
const EMPHASIS: &str = "\x1b[1;92m";
const NORMAL: &str = "\x1b[2;32m";
const RESET: &str = "\x1b[0m";

/// Frame styling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// ANSI colors, emphasized lines bold bright green
    Ansi,
    /// Plain text, emphasized lines marked with `*`
    Plain,
}

/// Format one frame from a render pass
pub fn frame(lines: &[RenderedLine<'_>], style: Style) -> String {
    let mut out = String::with_capacity(lines.len() * 24);

    if style == Style::Ansi {
        out.push_str(CLEAR_AND_HOME);
    }

    for line in lines {
        match (style, line.emphasized) {
            (Style::Ansi, true) => {
                let _ = writeln!(out, "{}{}{}", EMPHASIS, line.text, RESET);
            }
            (Style::Ansi, false) => {
                let _ = writeln!(out, "{}{}{}", NORMAL, line.text, RESET);
            }
            (Style::Plain, true) => {
                let _ = writeln!(out, "*{}", line.text);
            }
            (Style::Plain, false) => {
                let _ = writeln!(out, " {}", line.text);
            }
        }
    }

    out
}
