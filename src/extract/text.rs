// src/extract/text.rs
// Text cleanup applied to every string before it becomes a block.

// Characters that would otherwise change the meaning of the markdown
const MARKDOWN_SPECIALS: &[char] = &['*', '_', '`', '#', '[', ']'];

/// Trims, collapses whitespace runs to one space, then backslash-escapes
/// markdown control characters.
pub fn clean_text(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());

    for (i, word) in raw.split_whitespace().enumerate() {
        if i > 0 {
            cleaned.push(' ');
        }
        for c in word.chars() {
            if MARKDOWN_SPECIALS.contains(&c) {
                cleaned.push('\\');
            }
            cleaned.push(c);
        }
    }

    cleaned
}
