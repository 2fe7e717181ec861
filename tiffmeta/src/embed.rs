use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const CHUNK_WIDTH: usize = 120;

pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Split `text` into ordered pieces of at most `width` characters.
pub fn chunks(text: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let mut out = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut end = width.min(rest.len());
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            end = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (head, tail) = rest.split_at(end);
        out.push(head);
        rest = tail;
    }
    out
}

/// JavaScript source assigning the concatenated chunks to `window.<name>`.
pub fn render_script(name: &str, chunks: &[&str]) -> String {
    let mut script = format!("window.{} = \"\" +\n", name);
    for chunk in chunks {
        script.push_str(&format!("  \"{}\" +\n", chunk));
    }
    script.push_str("  \"\";\n");
    script
}

pub fn embed(name: &str, data: &[u8]) -> String {
    let encoded = encode(data);
    render_script(name, &chunks(&encoded, CHUNK_WIDTH))
}
