// format.rs: Fixed-width presentation of generated code
//
// Cosmetic only: wraps the instruction string into uniform lines, padding
// the last line with a filler character a Brainfuck interpreter ignores.
// `strip` is the inverse, recovering the single-line program.

/// Default pad character for short final lines. Not part of the instruction
/// alphabet, so it never changes execution.
pub const DEFAULT_FILLER: char = '#';

/// Wrap `code` into lines of exactly `width` characters, right-padding the
/// final line with `filler` so every line has uniform length. A code length
/// that is an exact multiple of `width` gains no filler. `width == 0` means
/// no wrapping and returns the code unchanged.
pub fn format(code: &str, width: usize, filler: char) -> String {
    if width == 0 || code.is_empty() {
        return code.to_string();
    }
    let chars: Vec<char> = code.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / width + width);
    for (i, chunk) in chars.chunks(width).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.extend(chunk.iter());
    }
    let remainder = chars.len() % width;
    if remainder != 0 {
        for _ in remainder..width {
            out.push(filler);
        }
    }
    out
}

/// Remove line breaks and filler, restoring the single-line program.
pub fn strip(formatted: &str, filler: char) -> String {
    formatted
        .chars()
        .filter(|&c| c != '\n' && c != filler)
        .collect()
}
