//! Byte-class and lookup tables shared by the encoder, parser and Base64
//! codec (component C1).
//!
//! Tables are populated imperatively from the rules below and then frozen
//! behind a [`OnceLock`]: initialized exactly once, on first use, and
//! observed identically by every thread afterward.

use std::sync::OnceLock;

/// Nibble -> lowercase ASCII hex digit.
pub const HEX_ENCODE: [u8; 16] = *b"0123456789abcdef";

/// ASCII hex digit -> nibble value, 0 for non-hex-digit bytes. Callers must
/// have already established that a byte is a hex digit via some other means
/// (the parser does so through its state table); this table never signals
/// "not a hex digit" on its own.
fn build_hex_decode() -> [u8; 256] {
    let mut t = [0u8; 256];
    for (d, c) in (0u8..10).zip(b'0'..=b'9') {
        t[c as usize] = d;
    }
    for (d, c) in (10u8..16).zip(b'a'..=b'f') {
        t[c as usize] = d;
    }
    for (d, c) in (10u8..16).zip(b'A'..=b'F') {
        t[c as usize] = d;
    }
    t
}

/// Index (0..64) -> Base64 alphabet character (RFC 4648 standard alphabet:
/// `+` and `/` for 62/63).
fn build_b64_encode() -> [u8; 64] {
    let mut t = [0u8; 64];
    let mut i = 0u8;
    for c in b'A'..=b'Z' {
        t[i as usize] = c;
        i += 1;
    }
    for c in b'a'..=b'z' {
        t[i as usize] = c;
        i += 1;
    }
    for c in b'0'..=b'9' {
        t[i as usize] = c;
        i += 1;
    }
    t[62] = b'+';
    t[63] = b'/';
    t
}

/// Base64 alphabet character -> 6-bit value. 0xFF marks "not in the
/// alphabet"; `=` is handled separately by the driver since its validity is
/// positional, not a property of the character class alone.
fn build_b64_decode() -> [u8; 256] {
    let mut t = [0xFFu8; 256];
    let enc = build_b64_encode();
    for (v, c) in enc.iter().enumerate() {
        t[*c as usize] = v as u8;
    }
    t
}

/// A UTF-8 byte class, used only while *building* the flat FSM tables below
/// (the encoder and parser are driven entirely by the tables themselves,
/// never by this enum at run time — this is purely a construction-time
/// convenience so both FSMs fix the same RFC 3629 byte ranges in one place).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Class {
    /// 0x00-0x7F, a complete one-byte code point.
    Ascii,
    /// 0x80-0xBF, a continuation/tail byte with no lead of its own.
    Tail,
    /// 0xC2-0xDF, lead of a 2-byte sequence.
    Lead2,
    /// 0xE0, lead of a 3-byte sequence whose first tail byte must be in
    /// A0-BF (excludes overlong encodings).
    Lead3E0,
    /// 0xE1-0xEC, 0xEE, 0xEF, lead of a 3-byte sequence with an ordinary
    /// 80-BF tail range.
    Lead3Mid,
    /// 0xED, lead of a 3-byte sequence whose first tail byte must be in
    /// 80-9F (excludes surrogate-forming D800-DFFF).
    Lead3Ed,
    /// 0xF0, lead of a 4-byte sequence whose first tail byte must be in
    /// 90-BF (excludes overlong encodings).
    Lead4F0,
    /// 0xF1-0xF3, lead of a 4-byte sequence with an ordinary 80-BF tail
    /// range.
    Lead4Mid,
    /// 0xF4, lead of a 4-byte sequence whose first tail byte must be in
    /// 80-8F (excludes code points beyond U+10FFFF).
    Lead4F4,
    /// 0xC0, 0xC1, 0xF5-0xFF: never valid as a lead byte under RFC 3629.
    Invalid,
}

/// Classify a single byte.
fn build_utf8_class() -> [Utf8Class; 256] {
    use Utf8Class::*;
    let mut t = [Invalid; 256];
    for b in 0x00u16..=0x7F {
        t[b as usize] = Ascii;
    }
    for b in 0x80u16..=0xBF {
        t[b as usize] = Tail;
    }
    for b in 0xC2u16..=0xDF {
        t[b as usize] = Lead2;
    }
    t[0xE0] = Lead3E0;
    for b in 0xE1u16..=0xEC {
        t[b as usize] = Lead3Mid;
    }
    t[0xED] = Lead3Ed;
    t[0xEE] = Lead3Mid;
    t[0xEF] = Lead3Mid;
    t[0xF0] = Lead4F0;
    for b in 0xF1u16..=0xF3 {
        t[b as usize] = Lead4Mid;
    }
    t[0xF4] = Lead4F4;
    // 0xC0, 0xC1, 0xF5-0xFF stay Invalid.
    t
}

/// The valid first-tail-byte range for a given lead class, per RFC 3629
/// Table 3-7. Second and third tail bytes (if any) are always 0x80-0xBF.
pub fn first_tail_range(lead: Utf8Class) -> (u8, u8) {
    match lead {
        Utf8Class::Lead3E0 => (0xA0, 0xBF),
        Utf8Class::Lead3Ed => (0x80, 0x9F),
        Utf8Class::Lead4F0 => (0x90, 0xBF),
        Utf8Class::Lead4F4 => (0x80, 0x8F),
        _ => (0x80, 0xBF),
    }
}

/// Number of continuation bytes a lead byte's class introduces.
pub fn tail_len(lead: Utf8Class) -> usize {
    match lead {
        Utf8Class::Lead2 => 1,
        Utf8Class::Lead3E0 | Utf8Class::Lead3Mid | Utf8Class::Lead3Ed => 2,
        Utf8Class::Lead4F0 | Utf8Class::Lead4Mid | Utf8Class::Lead4F4 => 3,
        _ => 0,
    }
}

// ---------------------------------------------------------------------
// String encoder FSM (component C2): 23 states, 0-22.
// ---------------------------------------------------------------------

pub const EC_COPY: u8 = 0; // quiescent: entry, and "copy this byte verbatim"
pub const EC_CTRL: u8 = 1; // 0x00-0x1F other than the 7 canonical escapes
pub const EC_ESC_QUOTE: u8 = 2;
pub const EC_ESC_BACKSLASH: u8 = 3;
pub const EC_ESC_BS: u8 = 4;
pub const EC_ESC_FF: u8 = 5;
pub const EC_ESC_LF: u8 = 6;
pub const EC_ESC_CR: u8 = 7;
pub const EC_ESC_TAB: u8 = 8;
pub const EC_INVALID: u8 = 9; // standalone invalid byte, or a sequence just broke
pub const EC_LEAD2: u8 = 10;
pub const EC_TAIL2_DONE: u8 = 11;
pub const EC_LEAD3_E0: u8 = 12;
pub const EC_LEAD3_MID: u8 = 13;
pub const EC_LEAD3_ED: u8 = 14;
pub const EC_TAIL3_PEND: u8 = 15;
pub const EC_TAIL3_DONE: u8 = 16;
pub const EC_LEAD4_F0: u8 = 17;
pub const EC_LEAD4_MID: u8 = 18;
pub const EC_LEAD4_F4: u8 = 19;
pub const EC_TAIL4_PEND1: u8 = 20;
pub const EC_TAIL4_PEND2: u8 = 21;
pub const EC_TAIL4_DONE: u8 = 22;
pub const ENCODER_STATE_COUNT: usize = 23;

/// The quiescent dispatch row, shared by every state that resets to
/// "nothing buffered" for the next byte (0-9, 11, 16, 22 all end up here).
fn fill_quiescent_row(row: &mut [u8; 256]) {
    for b in 0x00u16..=0xFF {
        row[b as usize] = EC_COPY;
    }
    for b in 0x00u16..=0x1F {
        row[b as usize] = EC_CTRL;
    }
    row[b'"' as usize] = EC_ESC_QUOTE;
    row[b'\\' as usize] = EC_ESC_BACKSLASH;
    row[0x08] = EC_ESC_BS;
    row[0x0C] = EC_ESC_FF;
    row[0x0A] = EC_ESC_LF;
    row[0x0D] = EC_ESC_CR;
    row[0x09] = EC_ESC_TAB;
    for b in 0x80u16..=0xBF {
        row[b as usize] = EC_INVALID;
    }
    row[0xC0] = EC_INVALID;
    row[0xC1] = EC_INVALID;
    for b in 0xC2u16..=0xDF {
        row[b as usize] = EC_LEAD2;
    }
    row[0xE0] = EC_LEAD3_E0;
    for b in 0xE1u16..=0xEC {
        row[b as usize] = EC_LEAD3_MID;
    }
    row[0xED] = EC_LEAD3_ED;
    row[0xEE] = EC_LEAD3_MID;
    row[0xEF] = EC_LEAD3_MID;
    row[0xF0] = EC_LEAD4_F0;
    for b in 0xF1u16..=0xF3 {
        row[b as usize] = EC_LEAD4_MID;
    }
    row[0xF4] = EC_LEAD4_F4;
    for b in 0xF5u16..=0xFF {
        row[b as usize] = EC_INVALID;
    }
}

/// Fill `row` so that bytes in `lo..=hi` advance to `ok`, everything else
/// breaks the sequence (`EC_INVALID` — the driver hex-escapes both the
/// buffered lead bytes and this breaking byte, it does not get reprocessed).
fn fill_tail_check(row: &mut [u8; 256], lo: u8, hi: u8, ok: u8) {
    for b in 0x00u16..=0xFF {
        row[b as usize] = EC_INVALID;
    }
    for b in lo as u16..=hi as u16 {
        row[b as usize] = ok;
    }
}

fn build_encoder_states() -> [[u8; 256]; ENCODER_STATE_COUNT] {
    let mut t: [[u8; 256]; ENCODER_STATE_COUNT] = [[0u8; 256]; ENCODER_STATE_COUNT];
    // States 0-9, 11, 16, 22 all dispatch the next byte exactly like the
    // quiescent start state: each has either just emitted a complete escape
    // or flushed/discarded a finished sequence, so nothing is pending.
    for s in [
        EC_COPY,
        EC_CTRL,
        EC_ESC_QUOTE,
        EC_ESC_BACKSLASH,
        EC_ESC_BS,
        EC_ESC_FF,
        EC_ESC_LF,
        EC_ESC_CR,
        EC_ESC_TAB,
        EC_INVALID,
        EC_TAIL2_DONE,
        EC_TAIL3_DONE,
        EC_TAIL4_DONE,
    ] {
        fill_quiescent_row(&mut t[s as usize]);
    }
    fill_tail_check(&mut t[EC_LEAD2 as usize], 0x80, 0xBF, EC_TAIL2_DONE);
    fill_tail_check(&mut t[EC_LEAD3_E0 as usize], 0xA0, 0xBF, EC_TAIL3_PEND);
    fill_tail_check(&mut t[EC_LEAD3_MID as usize], 0x80, 0xBF, EC_TAIL3_PEND);
    fill_tail_check(&mut t[EC_LEAD3_ED as usize], 0x80, 0x9F, EC_TAIL3_PEND);
    fill_tail_check(&mut t[EC_TAIL3_PEND as usize], 0x80, 0xBF, EC_TAIL3_DONE);
    fill_tail_check(&mut t[EC_LEAD4_F0 as usize], 0x90, 0xBF, EC_TAIL4_PEND1);
    fill_tail_check(&mut t[EC_LEAD4_MID as usize], 0x80, 0xBF, EC_TAIL4_PEND1);
    fill_tail_check(&mut t[EC_LEAD4_F4 as usize], 0x80, 0x8F, EC_TAIL4_PEND1);
    fill_tail_check(&mut t[EC_TAIL4_PEND1 as usize], 0x80, 0xBF, EC_TAIL4_PEND2);
    fill_tail_check(&mut t[EC_TAIL4_PEND2 as usize], 0x80, 0xBF, EC_TAIL4_DONE);
    t
}

// ---------------------------------------------------------------------
// JSON parser FSM (component C6): states 1-68, 0 is the error sink.
// ---------------------------------------------------------------------

pub const PS_ENTRY: u8 = 1;

pub const PS_N1: u8 = 2;
pub const PS_N2: u8 = 3;
pub const PS_N3: u8 = 4;
pub const PS_NULL: u8 = 5;
pub const PS_F1: u8 = 6;
pub const PS_F2: u8 = 7;
pub const PS_F3: u8 = 8;
pub const PS_F4: u8 = 9;
pub const PS_FALSE: u8 = 10;
pub const PS_T1: u8 = 11;
pub const PS_T2: u8 = 12;
pub const PS_T3: u8 = 13;
pub const PS_TRUE: u8 = 14;

pub const PS_NUM_ZERO: u8 = 15;
pub const PS_NUM_INT: u8 = 16;
pub const PS_NUM_MINUS: u8 = 17;
pub const PS_NUM_FRAC_FIRST: u8 = 18;
pub const PS_NUM_EXP_FIRST: u8 = 19;
pub const PS_NUM_DOT: u8 = 20;
pub const PS_NUM_FRAC_REST: u8 = 21;
pub const PS_NUM_EXP_SIGN_OR_DIGIT: u8 = 22;
pub const PS_NUM_EXP_REST: u8 = 23;
pub const PS_NUM_EXP_SIGN: u8 = 24;

pub const PS_STR_ENTRY: u8 = 25;
pub const PS_STR_LOOP: u8 = 26;
pub const PS_STR_CLOSE: u8 = 27;
pub const PS_STR_ESCAPE: u8 = 28;
pub const PS_ESC_QUOTE: u8 = 29;
pub const PS_ESC_BACKSLASH: u8 = 30;
pub const PS_ESC_SLASH: u8 = 31;
pub const PS_ESC_BS: u8 = 32;
pub const PS_ESC_FF: u8 = 33;
pub const PS_ESC_LF: u8 = 34;
pub const PS_ESC_CR: u8 = 35;
pub const PS_ESC_TAB: u8 = 36;

pub const PS_U_D1: u8 = 37;
pub const PS_U_D2_ZERO: u8 = 38;
pub const PS_U_D2_D: u8 = 39;
pub const PS_U_D2_OTHER: u8 = 40;
pub const PS_U_D3_00: u8 = 41;
pub const PS_U_D3_LOW: u8 = 42;
pub const PS_U_D3_HIGH: u8 = 43;
pub const PS_U_D3_3BYTE: u8 = 44;
pub const PS_U_D4_1BYTE: u8 = 45;
pub const PS_U_D4_2BYTE_A: u8 = 46;
pub const PS_U_D4_2BYTE_B: u8 = 47;
pub const PS_U_D4_3BYTE: u8 = 48;

// Inline UTF-8 validation shares a single generic continuation state
// (`PS_UTF8_TAIL_PEND`) across every remaining tail byte, regardless of
// sequence length, tracked by the driver's `utf8_remaining` counter —
// only the narrowed first-tail ranges of E0/ED/F0/F4 need a dedicated
// state of their own, since a generic-range (Mid) lead's first tail byte
// is already the continuation check.
pub const PS_UTF8_3_E0_T1: u8 = 49;
pub const PS_UTF8_3_ED_T1: u8 = 50;
pub const PS_UTF8_4_F0_T1: u8 = 51;
pub const PS_UTF8_4_F4_T1: u8 = 52;
pub const PS_UTF8_TAIL_PEND: u8 = 53;

pub const PS_ARR_OPEN: u8 = 57;
pub const PS_ARR_EMPTY: u8 = 58;
pub const PS_ARR_CLOSE: u8 = 59;
pub const PS_COMMA: u8 = 60;
pub const PS_OBJ_OPEN: u8 = 61;
pub const PS_OBJ_EMPTY: u8 = 62;
pub const PS_OBJ_CLOSE: u8 = 63;
pub const PS_EXPECT_VALUE: u8 = 64;
pub const PS_COLON: u8 = 65;
pub const PS_WS_BEFORE_KEY: u8 = 66;
pub const PS_WS_AFTER_KEY: u8 = 67;
pub const PS_WS_AFTER_VALUE: u8 = 68;

pub const PARSER_STATE_COUNT: usize = 69;

/// States reached immediately after a complete value (or a string that will
/// turn out to be an object key — the driver disambiguates using the
/// container stack, not this table).
pub const PARSER_ACCEPTING_LIST: &[u8] = &[
    PS_NULL,
    PS_FALSE,
    PS_TRUE,
    PS_NUM_ZERO,
    PS_NUM_INT,
    PS_NUM_FRAC_FIRST,
    PS_NUM_EXP_FIRST,
    PS_NUM_FRAC_REST,
    PS_NUM_EXP_REST,
    PS_STR_CLOSE,
    PS_ARR_EMPTY,
    PS_ARR_CLOSE,
    PS_OBJ_EMPTY,
    PS_OBJ_CLOSE,
    PS_WS_AFTER_KEY,
    PS_WS_AFTER_VALUE,
];

fn build_parser_accepting() -> [bool; PARSER_STATE_COUNT] {
    let mut t = [false; PARSER_STATE_COUNT];
    for &s in PARSER_ACCEPTING_LIST {
        t[s as usize] = true;
    }
    t
}

fn set_byte(row: &mut [u8; 256], b: u8, target: u8) {
    row[b as usize] = target;
}

fn set_range(row: &mut [u8; 256], lo: u8, hi: u8, target: u8) {
    for b in lo as u16..=hi as u16 {
        row[b as usize] = target;
    }
}

/// Every hex digit byte (0-9, a-f, A-F) to one target — used by the `\uXXXX`
/// states that don't need to branch on the digit's value.
fn set_any_hex_digit(row: &mut [u8; 256], target: u8) {
    set_range(row, b'0', b'9', target);
    set_range(row, b'a', b'f', target);
    set_range(row, b'A', b'F', target);
}

fn set_value_start(row: &mut [u8; 256]) {
    set_byte(row, b'"', PS_STR_ENTRY);
    set_byte(row, b'{', PS_OBJ_OPEN);
    set_byte(row, b'[', PS_ARR_OPEN);
    set_byte(row, b'-', PS_NUM_MINUS);
    set_byte(row, b'0', PS_NUM_ZERO);
    set_range(row, b'1', b'9', PS_NUM_INT);
    set_byte(row, b't', PS_T1);
    set_byte(row, b'f', PS_F1);
    set_byte(row, b'n', PS_N1);
}

fn set_whitespace_self_loop(row: &mut [u8; 256], state: u8) {
    set_byte(row, b' ', state);
    set_byte(row, b'\t', state);
    set_byte(row, b'\n', state);
    set_byte(row, b'\r', state);
}

/// Rows shared by every "inside a string, not escaping" state: any byte
/// that isn't the closing quote, a backslash, a control character or a
/// UTF-8 lead/tail byte is ordinary string content.
fn fill_string_body_row(row: &mut [u8; 256], utf8_class: &[Utf8Class; 256]) {
    for b in 0x20u16..=0xFF {
        row[b as usize] = PS_STR_LOOP;
    }
    for b in 0x00u16..=0x1F {
        row[b as usize] = 0; // unescaped control characters are never valid
    }
    row[b'"' as usize] = PS_STR_CLOSE;
    row[b'\\' as usize] = PS_STR_ESCAPE;
    for b in 0x80u16..=0xFF {
        row[b as usize] = match utf8_class[b] {
            // A lead byte whose first tail byte is already the generic
            // 80-BF range goes straight to the shared continuation state;
            // only the narrowed ranges (E0, ED, F0, F4) need their own
            // dedicated first-tail check.
            Utf8Class::Lead2 | Utf8Class::Lead3Mid | Utf8Class::Lead4Mid => PS_UTF8_TAIL_PEND,
            Utf8Class::Lead3E0 => PS_UTF8_3_E0_T1,
            Utf8Class::Lead3Ed => PS_UTF8_3_ED_T1,
            Utf8Class::Lead4F0 => PS_UTF8_4_F0_T1,
            Utf8Class::Lead4F4 => PS_UTF8_4_F4_T1,
            Utf8Class::Tail | Utf8Class::Invalid => 0,
            Utf8Class::Ascii => unreachable!("0x80-0xFF never classifies as Ascii"),
        };
    }
}

fn build_parser_states(utf8_class: &[Utf8Class; 256]) -> [[u8; 256]; PARSER_STATE_COUNT] {
    let mut t: [[u8; 256]; PARSER_STATE_COUNT] = [[0u8; 256]; PARSER_STATE_COUNT];

    // Entry: absorb leading whitespace, dispatch to the start of any value.
    set_whitespace_self_loop(&mut t[PS_ENTRY as usize], PS_ENTRY);
    set_value_start(&mut t[PS_ENTRY as usize]);

    // Literal walks: null, false, true.
    set_byte(&mut t[PS_N1 as usize], b'u', PS_N2);
    set_byte(&mut t[PS_N2 as usize], b'l', PS_N3);
    set_byte(&mut t[PS_N3 as usize], b'l', PS_NULL);
    set_byte(&mut t[PS_F1 as usize], b'a', PS_F2);
    set_byte(&mut t[PS_F2 as usize], b'l', PS_F3);
    set_byte(&mut t[PS_F3 as usize], b's', PS_F4);
    set_byte(&mut t[PS_F4 as usize], b'e', PS_FALSE);
    set_byte(&mut t[PS_T1 as usize], b'r', PS_T2);
    set_byte(&mut t[PS_T2 as usize], b'u', PS_T3);
    set_byte(&mut t[PS_T3 as usize], b'e', PS_TRUE);

    // Numbers.
    set_byte(&mut t[PS_NUM_MINUS as usize], b'0', PS_NUM_ZERO);
    set_range(&mut t[PS_NUM_MINUS as usize], b'1', b'9', PS_NUM_INT);
    set_byte(&mut t[PS_NUM_ZERO as usize], b'.', PS_NUM_DOT);
    set_byte(&mut t[PS_NUM_ZERO as usize], b'e', PS_NUM_EXP_SIGN_OR_DIGIT);
    set_byte(&mut t[PS_NUM_ZERO as usize], b'E', PS_NUM_EXP_SIGN_OR_DIGIT);
    set_range(&mut t[PS_NUM_INT as usize], b'0', b'9', PS_NUM_INT);
    set_byte(&mut t[PS_NUM_INT as usize], b'.', PS_NUM_DOT);
    set_byte(&mut t[PS_NUM_INT as usize], b'e', PS_NUM_EXP_SIGN_OR_DIGIT);
    set_byte(&mut t[PS_NUM_INT as usize], b'E', PS_NUM_EXP_SIGN_OR_DIGIT);
    set_range(&mut t[PS_NUM_DOT as usize], b'0', b'9', PS_NUM_FRAC_FIRST);
    set_range(&mut t[PS_NUM_FRAC_FIRST as usize], b'0', b'9', PS_NUM_FRAC_REST);
    set_byte(&mut t[PS_NUM_FRAC_FIRST as usize], b'e', PS_NUM_EXP_SIGN_OR_DIGIT);
    set_byte(&mut t[PS_NUM_FRAC_FIRST as usize], b'E', PS_NUM_EXP_SIGN_OR_DIGIT);
    set_range(&mut t[PS_NUM_FRAC_REST as usize], b'0', b'9', PS_NUM_FRAC_REST);
    set_byte(&mut t[PS_NUM_FRAC_REST as usize], b'e', PS_NUM_EXP_SIGN_OR_DIGIT);
    set_byte(&mut t[PS_NUM_FRAC_REST as usize], b'E', PS_NUM_EXP_SIGN_OR_DIGIT);
    set_byte(&mut t[PS_NUM_EXP_SIGN_OR_DIGIT as usize], b'+', PS_NUM_EXP_SIGN);
    set_byte(&mut t[PS_NUM_EXP_SIGN_OR_DIGIT as usize], b'-', PS_NUM_EXP_SIGN);
    set_range(
        &mut t[PS_NUM_EXP_SIGN_OR_DIGIT as usize],
        b'0',
        b'9',
        PS_NUM_EXP_FIRST,
    );
    set_range(&mut t[PS_NUM_EXP_SIGN as usize], b'0', b'9', PS_NUM_EXP_FIRST);
    set_range(&mut t[PS_NUM_EXP_FIRST as usize], b'0', b'9', PS_NUM_EXP_REST);
    set_range(&mut t[PS_NUM_EXP_REST as usize], b'0', b'9', PS_NUM_EXP_REST);

    // Strings: body, escapes, and the eight canonical escape targets.
    fill_string_body_row(&mut t[PS_STR_ENTRY as usize], utf8_class);
    fill_string_body_row(&mut t[PS_STR_LOOP as usize], utf8_class);
    set_byte(&mut t[PS_STR_ESCAPE as usize], b'"', PS_ESC_QUOTE);
    set_byte(&mut t[PS_STR_ESCAPE as usize], b'\\', PS_ESC_BACKSLASH);
    set_byte(&mut t[PS_STR_ESCAPE as usize], b'/', PS_ESC_SLASH);
    set_byte(&mut t[PS_STR_ESCAPE as usize], b'b', PS_ESC_BS);
    set_byte(&mut t[PS_STR_ESCAPE as usize], b'f', PS_ESC_FF);
    set_byte(&mut t[PS_STR_ESCAPE as usize], b'n', PS_ESC_LF);
    set_byte(&mut t[PS_STR_ESCAPE as usize], b'r', PS_ESC_CR);
    set_byte(&mut t[PS_STR_ESCAPE as usize], b't', PS_ESC_TAB);
    set_byte(&mut t[PS_STR_ESCAPE as usize], b'u', PS_U_D1);
    // After decoding a short escape, behave exactly like the in-string loop.
    let loop_row = t[PS_STR_LOOP as usize];
    for s in [
        PS_ESC_QUOTE,
        PS_ESC_BACKSLASH,
        PS_ESC_SLASH,
        PS_ESC_BS,
        PS_ESC_FF,
        PS_ESC_LF,
        PS_ESC_CR,
        PS_ESC_TAB,
    ] {
        t[s as usize] = loop_row;
    }

    // `\uXXXX` decoding: branch on each hex digit so the 4th digit's arrival
    // already knows how many UTF-8 bytes the scalar value needs.
    set_byte(&mut t[PS_U_D1 as usize], b'0', PS_U_D2_ZERO);
    set_byte(&mut t[PS_U_D1 as usize], b'D', PS_U_D2_D);
    set_byte(&mut t[PS_U_D1 as usize], b'd', PS_U_D2_D);
    set_range(&mut t[PS_U_D1 as usize], b'1', b'9', PS_U_D2_OTHER);
    set_range(&mut t[PS_U_D1 as usize], b'a', b'c', PS_U_D2_OTHER);
    set_range(&mut t[PS_U_D1 as usize], b'A', b'C', PS_U_D2_OTHER);
    set_range(&mut t[PS_U_D1 as usize], b'e', b'f', PS_U_D2_OTHER);
    set_range(&mut t[PS_U_D1 as usize], b'E', b'F', PS_U_D2_OTHER);

    set_byte(&mut t[PS_U_D2_ZERO as usize], b'0', PS_U_D3_00);
    set_range(&mut t[PS_U_D2_ZERO as usize], b'1', b'7', PS_U_D3_LOW);
    set_range(&mut t[PS_U_D2_ZERO as usize], b'8', b'9', PS_U_D3_HIGH);
    set_range(&mut t[PS_U_D2_ZERO as usize], b'a', b'f', PS_U_D3_HIGH);
    set_range(&mut t[PS_U_D2_ZERO as usize], b'A', b'F', PS_U_D3_HIGH);

    // `\uD8xx`-`\uDFxx` are always surrogates; `\uD0xx`-`\uD7xx` are not —
    // left at 0 (error) for the surrogate half, PS_U_D3_3BYTE otherwise.
    set_byte(&mut t[PS_U_D2_D as usize], b'0', PS_U_D3_3BYTE);
    set_range(&mut t[PS_U_D2_D as usize], b'1', b'7', PS_U_D3_3BYTE);

    set_any_hex_digit(&mut t[PS_U_D2_OTHER as usize], PS_U_D3_3BYTE);

    set_range(&mut t[PS_U_D3_00 as usize], b'0', b'7', PS_U_D4_1BYTE);
    set_range(&mut t[PS_U_D3_00 as usize], b'8', b'9', PS_U_D4_2BYTE_A);
    set_range(&mut t[PS_U_D3_00 as usize], b'a', b'f', PS_U_D4_2BYTE_A);
    set_range(&mut t[PS_U_D3_00 as usize], b'A', b'F', PS_U_D4_2BYTE_A);

    set_any_hex_digit(&mut t[PS_U_D3_LOW as usize], PS_U_D4_2BYTE_B);
    set_any_hex_digit(&mut t[PS_U_D3_HIGH as usize], PS_U_D4_3BYTE);
    set_any_hex_digit(&mut t[PS_U_D3_3BYTE as usize], PS_U_D4_3BYTE);

    // The 4th digit's arrival triggers the emit action; the table just needs
    // to recognize that a hex digit belongs here (the driver does the math).
    set_any_hex_digit(&mut t[PS_U_D4_1BYTE as usize], PS_STR_LOOP);
    set_any_hex_digit(&mut t[PS_U_D4_2BYTE_A as usize], PS_STR_LOOP);
    set_any_hex_digit(&mut t[PS_U_D4_2BYTE_B as usize], PS_STR_LOOP);
    set_any_hex_digit(&mut t[PS_U_D4_3BYTE as usize], PS_STR_LOOP);

    // Inline UTF-8 validation of bytes embedded directly in a string
    // literal, split by lead-byte range exactly as the encoder is (C2). The
    // narrowed first-tail checks land in the shared continuation state;
    // the table row alone can't say how many more tail bytes remain for a
    // 3- vs. 4-byte sequence, so the driver tracks that with a counter and
    // overrides this row's nominal self-loop with `PS_STR_LOOP` once the
    // count reaches zero.
    set_range(&mut t[PS_UTF8_3_E0_T1 as usize], 0xA0, 0xBF, PS_UTF8_TAIL_PEND);
    set_range(&mut t[PS_UTF8_3_ED_T1 as usize], 0x80, 0x9F, PS_UTF8_TAIL_PEND);
    set_range(&mut t[PS_UTF8_4_F0_T1 as usize], 0x90, 0xBF, PS_UTF8_TAIL_PEND);
    set_range(&mut t[PS_UTF8_4_F4_T1 as usize], 0x80, 0x8F, PS_UTF8_TAIL_PEND);
    set_range(&mut t[PS_UTF8_TAIL_PEND as usize], 0x80, 0xBF, PS_UTF8_TAIL_PEND);

    // Containers.
    set_whitespace_self_loop(&mut t[PS_ARR_OPEN as usize], PS_ARR_OPEN);
    set_value_start(&mut t[PS_ARR_OPEN as usize]);
    set_byte(&mut t[PS_ARR_OPEN as usize], b']', PS_ARR_EMPTY);

    set_whitespace_self_loop(&mut t[PS_OBJ_OPEN as usize], PS_OBJ_OPEN);
    set_byte(&mut t[PS_OBJ_OPEN as usize], b'"', PS_STR_ENTRY);
    set_byte(&mut t[PS_OBJ_OPEN as usize], b'}', PS_OBJ_EMPTY);

    set_whitespace_self_loop(&mut t[PS_EXPECT_VALUE as usize], PS_EXPECT_VALUE);
    set_value_start(&mut t[PS_EXPECT_VALUE as usize]);

    // After a colon an object always expects a value, regardless of what
    // comes after that value — same dispatch as PS_EXPECT_VALUE.
    let expect_value_row = t[PS_EXPECT_VALUE as usize];
    t[PS_COLON as usize] = expect_value_row;

    set_whitespace_self_loop(&mut t[PS_WS_BEFORE_KEY as usize], PS_WS_BEFORE_KEY);
    set_byte(&mut t[PS_WS_BEFORE_KEY as usize], b'"', PS_STR_ENTRY);

    set_whitespace_self_loop(&mut t[PS_WS_AFTER_KEY as usize], PS_WS_AFTER_KEY);
    set_byte(&mut t[PS_WS_AFTER_KEY as usize], b':', PS_COLON);

    set_whitespace_self_loop(&mut t[PS_WS_AFTER_VALUE as usize], PS_WS_AFTER_VALUE);
    set_byte(&mut t[PS_WS_AFTER_VALUE as usize], b',', PS_COMMA);
    set_byte(&mut t[PS_WS_AFTER_VALUE as usize], b']', PS_ARR_CLOSE);
    set_byte(&mut t[PS_WS_AFTER_VALUE as usize], b'}', PS_OBJ_CLOSE);

    // PS_COMMA and every other value-accepting state (5, 10, 14, 15, 16, 18,
    // 19, 21, 23, 27, 58, 59, 62, 63) are resolved by the driver the moment
    // they're reached — see `parser.rs`'s `route_after_value` — rather than
    // by a table row of their own, since which byte comes next (',' vs ':',
    // array vs object) depends on the open container, not on this table.
    t
}

pub struct Tables {
    pub hex_decode: [u8; 256],
    pub b64_encode: [u8; 64],
    pub b64_decode: [u8; 256],
    pub utf8_class: [Utf8Class; 256],
    pub encoder_states: [[u8; 256]; ENCODER_STATE_COUNT],
    pub parser_states: [[u8; 256]; PARSER_STATE_COUNT],
    pub parser_accepting: [bool; PARSER_STATE_COUNT],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

/// Return the process-wide table set, building it on first use. Every
/// subsequent call (from any thread) observes the same frozen tables.
pub fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        let utf8_class = build_utf8_class();
        Tables {
            hex_decode: build_hex_decode(),
            b64_encode: build_b64_encode(),
            b64_decode: build_b64_decode(),
            encoder_states: build_encoder_states(),
            parser_states: build_parser_states(&utf8_class),
            parser_accepting: build_parser_accepting(),
            utf8_class,
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let t = tables();
        for b in 0u8..16 {
            let c = HEX_ENCODE[b as usize];
            assert_eq!(t.hex_decode[c as usize], b);
        }
    }

    #[test]
    fn b64_alphabet_round_trip() {
        let t = tables();
        for v in 0u8..64 {
            let c = t.b64_encode[v as usize];
            assert_eq!(t.b64_decode[c as usize], v);
        }
    }

    #[test]
    fn utf8_class_boundaries() {
        let t = tables();
        assert_eq!(t.utf8_class[0x7F], Utf8Class::Ascii);
        assert_eq!(t.utf8_class[0x80], Utf8Class::Tail);
        assert_eq!(t.utf8_class[0xC1], Utf8Class::Invalid);
        assert_eq!(t.utf8_class[0xC2], Utf8Class::Lead2);
        assert_eq!(t.utf8_class[0xE0], Utf8Class::Lead3E0);
        assert_eq!(t.utf8_class[0xED], Utf8Class::Lead3Ed);
        assert_eq!(t.utf8_class[0xF4], Utf8Class::Lead4F4);
        assert_eq!(t.utf8_class[0xF5], Utf8Class::Invalid);
    }

    #[test]
    fn encoder_table_shape() {
        let t = tables();
        assert_eq!(t.encoder_states.len(), ENCODER_STATE_COUNT);
        assert_eq!(t.encoder_states[EC_COPY as usize][b'"' as usize], EC_ESC_QUOTE);
        assert_eq!(t.encoder_states[EC_COPY as usize][0xC2], EC_LEAD2);
        assert_eq!(t.encoder_states[EC_LEAD2 as usize][0x80], EC_TAIL2_DONE);
        assert_eq!(t.encoder_states[EC_LEAD2 as usize][b'A' as usize], EC_INVALID);
    }

    #[test]
    fn parser_table_shape() {
        let t = tables();
        assert_eq!(t.parser_states.len(), PARSER_STATE_COUNT);
        assert!(t.parser_accepting[PS_NULL as usize]);
        assert!(t.parser_accepting[PS_WS_AFTER_VALUE as usize]);
        assert!(!t.parser_accepting[PS_ENTRY as usize]);
        assert_eq!(t.parser_states[PS_ENTRY as usize][b'{' as usize], PS_OBJ_OPEN);
        assert_eq!(t.parser_states[PS_N1 as usize][b'u' as usize], PS_N2);
        assert_eq!(t.parser_states[PS_N1 as usize][b'x' as usize], 0);
    }

    #[test]
    fn accepting_set_matches_sixteen_named_states() {
        let t = tables();
        let count = t.parser_accepting.iter().filter(|&&a| a).count();
        assert_eq!(count, 16);
    }
}
