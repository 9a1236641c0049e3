//! Adaptive font size for table-of-contents slides.

/// Font size (points) for outlines at or below the threshold.
pub const TOC_BASE_FONT_SIZE: u32 = 18;

/// Smallest font size the outline is ever shrunk to.
pub const TOC_MIN_FONT_SIZE: u32 = 8;

/// Number of lines that still fit at the base size.
pub const TOC_SCALE_THRESHOLD: usize = 10;

/// Points removed per line above the threshold.
const TOC_STEP: f64 = 0.5;

/// Font size for a table-of-contents slide with `line_count` lines.
///
/// `18` up to ten lines, then half a point less per extra line (halves
/// round to even), never below `8`. Non-increasing in `line_count`.
pub fn toc_font_size(line_count: usize) -> u32 {
    if line_count <= TOC_SCALE_THRESHOLD {
        return TOC_BASE_FONT_SIZE;
    }

    let extra = (line_count - TOC_SCALE_THRESHOLD) as f64;
    let scaled = (TOC_BASE_FONT_SIZE as f64 - extra * TOC_STEP).round_ties_even();
    if scaled <= TOC_MIN_FONT_SIZE as f64 {
        TOC_MIN_FONT_SIZE
    } else {
        scaled as u32
    }
}
