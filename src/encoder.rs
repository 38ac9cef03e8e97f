//! Binary-safe string encoder FSM (component C2): turns an arbitrary byte
//! sequence into a syntactically valid, UTF-8-clean JSON string literal,
//! repairing ill-formed UTF-8 by hex-escaping the offending bytes rather
//! than emitting invalid output.
//!
//! Driven entirely by `tables::tables().encoder_states`, a flat
//! `(state, byte) -> state` lookup table with 23 states: one quiescent
//! "nothing pending" state, eight escape-emission states, and fourteen
//! states spent buffering the lead and tail bytes of a multi-byte UTF-8
//! sequence while its well-formedness is confirmed one byte at a time. A
//! tail byte that fails its range check does not get reprocessed as fresh
//! input — it and every byte already buffered for the aborted sequence are
//! hex-escaped together, and the byte after it starts clean.

use crate::tables::{
    tables, EC_COPY, EC_CTRL, EC_ESC_BACKSLASH, EC_ESC_BS, EC_ESC_CR, EC_ESC_FF, EC_ESC_LF,
    EC_ESC_QUOTE, EC_ESC_TAB, EC_INVALID, EC_LEAD2, EC_LEAD3_E0, EC_LEAD3_ED, EC_LEAD3_MID,
    EC_LEAD4_F0, EC_LEAD4_F4, EC_LEAD4_MID, EC_TAIL2_DONE, EC_TAIL3_DONE, EC_TAIL3_PEND,
    EC_TAIL4_DONE, EC_TAIL4_PEND1, EC_TAIL4_PEND2, HEX_ENCODE,
};

/// Encode arbitrary bytes as a complete JSON string literal, including the
/// surrounding quotes.
///
/// ```
/// use fsmjson::encode_string;
/// assert_eq!(encode_string(b"hi"), "\"hi\"");
/// assert_eq!(encode_string(b"a\"b"), "\"a\\\"b\"");
/// assert_eq!(encode_string(b"\x01"), "\"\\u0001\"");
/// // 0xFF is never valid UTF-8; it gets hex-escaped individually.
/// assert_eq!(encode_string(&[b'"', 0xFF, b'"']), "\"\\\"\\u00ff\\\"\"");
/// ```
pub fn encode_string(bytes: &[u8]) -> String {
    let t = tables();
    let mut out = String::with_capacity(32.max(bytes.len() + 2));
    out.push('"');

    let mut state = EC_COPY;
    let mut buf: Vec<u8> = Vec::with_capacity(4);

    for &b in bytes {
        let next = t.encoder_states[state as usize][b as usize];
        apply_transition(&mut out, &mut buf, next, b);
        state = next;
    }
    // A sequence still buffered at end of input never got confirmed; every
    // byte collected so far is escaped standalone.
    for &pending in &buf {
        push_hex_escape(&mut out, pending);
    }

    out.push('"');
    out
}

/// Perform the output action associated with arriving at `next` on byte `b`,
/// given the bytes already buffered for an in-progress multi-byte sequence.
fn apply_transition(out: &mut String, buf: &mut Vec<u8>, next: u8, b: u8) {
    match next {
        EC_COPY => out.push(b as char),
        EC_CTRL => push_hex_escape(out, b),
        EC_ESC_QUOTE => out.push_str("\\\""),
        EC_ESC_BACKSLASH => out.push_str("\\\\"),
        EC_ESC_BS => out.push_str("\\b"),
        EC_ESC_FF => out.push_str("\\f"),
        EC_ESC_LF => out.push_str("\\n"),
        EC_ESC_CR => out.push_str("\\r"),
        EC_ESC_TAB => out.push_str("\\t"),
        EC_INVALID => {
            for &pending in buf.iter() {
                push_hex_escape(out, pending);
            }
            buf.clear();
            push_hex_escape(out, b);
        }
        EC_LEAD2 | EC_LEAD3_E0 | EC_LEAD3_MID | EC_LEAD3_ED | EC_LEAD4_F0 | EC_LEAD4_MID
        | EC_LEAD4_F4 | EC_TAIL3_PEND | EC_TAIL4_PEND1 | EC_TAIL4_PEND2 => buf.push(b),
        EC_TAIL2_DONE | EC_TAIL3_DONE | EC_TAIL4_DONE => {
            buf.push(b);
            out.push_str(
                std::str::from_utf8(buf)
                    .expect("encoder_states only confirms RFC 3629 well-formed byte ranges"),
            );
            buf.clear();
        }
        _ => unreachable!("encoder_states never targets state {next}"),
    }
}

fn push_hex_escape(out: &mut String, b: u8) {
    out.push_str("\\u00");
    out.push(HEX_ENCODE[(b >> 4) as usize] as char);
    out.push(HEX_ENCODE[(b & 0x0F) as usize] as char);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ascii_copied_verbatim() {
        assert_eq!(encode_string(b"hello world"), "\"hello world\"");
    }

    #[test]
    fn canonical_short_escapes() {
        assert_eq!(encode_string(b"\"\\\x08\x0C\n\r\t"), "\"\\\"\\\\\\b\\f\\n\\r\\t\"");
    }

    #[test]
    fn control_characters_hex_escaped() {
        assert_eq!(encode_string(b"\x00\x1F"), "\"\\u0000\\u001f\"");
    }

    #[test]
    fn valid_multibyte_sequences_copied_through() {
        // U+00E9 (2 bytes), U+4E2D (3 bytes), U+1F600 (4 bytes)
        let bytes = "\u{e9}\u{4e2d}\u{1f600}".as_bytes();
        let encoded = encode_string(bytes);
        assert_eq!(&encoded[1..encoded.len() - 1], "\u{e9}\u{4e2d}\u{1f600}");
    }

    #[test]
    fn standalone_invalid_byte_is_escaped() {
        // S5: `"` 0xFF `"` round trips to a single-byte string FF once parsed.
        let encoded = encode_string(&[b'"', 0xFF, b'"']);
        assert_eq!(encoded, "\"\\\"\\u00ff\\\"\"");
    }

    #[test]
    fn broken_sequence_escapes_the_buffered_lead_and_the_breaking_byte() {
        // 0xE1 starts a 3-byte sequence; 0x41 ('A') is not a valid tail
        // byte, so both the lead and the byte that broke the sequence are
        // hex-escaped — 'A' is not reprocessed as fresh ASCII.
        let encoded = encode_string(&[0xE1, b'A']);
        assert_eq!(encoded, "\"\\u00e1\\u0041\"");
    }

    #[test]
    fn partially_confirmed_sequence_escapes_buffer_and_breaking_byte() {
        // 0xE1 0x80 are both buffered as an attempted 3-byte sequence; the
        // third byte breaks it and is itself escaped, not passed through.
        let encoded = encode_string(&[0xE1, 0x80, b'A']);
        assert_eq!(encoded, "\"\\u00e1\\u0080\\u0041\"");
    }

    #[test]
    fn sequence_truncated_at_end_of_input_escapes_the_buffer() {
        let encoded = encode_string(&[0xE1, 0x80]);
        assert_eq!(encoded, "\"\\u00e1\\u0080\"");
    }

    #[test]
    fn overlong_and_surrogate_forming_leads_rejected() {
        // 0xC0 is never a valid lead byte at all.
        assert_eq!(encode_string(&[0xC0, 0x80]), "\"\\u00c0\\u0080\"");
        // 0xED 0xA0 would form a UTF-16 surrogate; RFC 3629 excludes it by
        // narrowing ED's first tail byte range to 80-9F.
        assert_eq!(encode_string(&[0xED, 0xA0, 0x80]), "\"\\u00ed\\u00a0\\u0080\"");
    }

    #[test]
    fn bare_tail_byte_is_standalone_invalid() {
        assert_eq!(encode_string(&[0x80]), "\"\\u0080\"");
    }

    #[test]
    fn empty_input_is_empty_string_literal() {
        assert_eq!(encode_string(b""), "\"\"");
    }
}
