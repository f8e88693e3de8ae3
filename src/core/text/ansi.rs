//! ANSI escape scanning for rendered rows.

/// Length in bytes of the CSI sequence starting at byte `pos`, if there is one.
pub fn extract_ansi_code(input: &str, pos: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.get(pos) != Some(&0x1b) || bytes.get(pos + 1) != Some(&b'[') {
        return None;
    }
    bytes[pos + 2..]
        .iter()
        .position(|b| (0x40..=0x7e).contains(b))
        .map(|offset| offset + 3)
}

/// Plain text of a rendered row with every CSI sequence removed.
pub fn strip_ansi(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;
    while pos < input.len() {
        if let Some(length) = extract_ansi_code(input, pos) {
            pos += length;
            continue;
        }
        let Some(ch) = input[pos..].chars().next() else {
            break;
        };
        out.push(ch);
        pos += ch.len_utf8();
    }
    out
}
