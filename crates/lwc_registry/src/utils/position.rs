//! Conversions between LSP positions and rope byte offsets.

use ropey::Rope;
use tower_lsp::lsp_types::Position;

/// Convert an LSP Position (0-based) to a byte offset.
///
/// Characters past the end of the line clamp to the line end.
pub fn position_to_offset(rope: &Rope, position: Position) -> Option<usize> {
    let line = position.line as usize;
    if line >= rope.len_lines() {
        return None;
    }

    let line_start_char = rope.line_to_char(line);
    let line_len = rope.line(line).len_chars();
    let char_idx = line_start_char + (position.character as usize).min(line_len);

    rope.try_char_to_byte(char_idx).ok()
}
