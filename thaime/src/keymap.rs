//! Thai Kedmanee keyboard layout.
//!
//! Maps the character a US QWERTY key produces (with or without Shift) to
//! the Thai text the Kedmanee layout puts on that key.

use phf::phf_map;
use thaime_core::StaticKeymap;

/// QWERTY character → Kedmanee output.
pub static KEDMANEE: phf::Map<char, &'static str> = phf_map! {
    // number row
    '1' => "ๅ", '2' => "/", '3' => "_", '4' => "ภ", '5' => "ถ",
    '6' => "ุ", '7' => "ึ", '8' => "ค", '9' => "ต", '0' => "จ",
    '-' => "ข", '=' => "ช",
    '!' => "+", '@' => "๑", '#' => "๒", '$' => "๓", '%' => "๔",
    '^' => "ู", '&' => "฿", '*' => "๕", '(' => "๖", ')' => "๗",
    '_' => "๘", '+' => "๙",

    // top row
    'q' => "ๆ", 'w' => "ไ", 'e' => "ำ", 'r' => "พ", 't' => "ะ",
    'y' => "ั", 'u' => "ี", 'i' => "ร", 'o' => "น", 'p' => "ย",
    '[' => "บ", ']' => "ล",
    'Q' => "๐", 'W' => "\"", 'E' => "ฎ", 'R' => "ฑ", 'T' => "ธ",
    'Y' => "ํ", 'U' => "๊", 'I' => "ณ", 'O' => "ฯ", 'P' => "ญ",
    '{' => "ฐ", '}' => ",",

    // home row
    'a' => "ฟ", 's' => "ห", 'd' => "ก", 'f' => "ด", 'g' => "เ",
    'h' => "้", 'j' => "่", 'k' => "า", 'l' => "ส", ';' => "ว",
    '\'' => "ง",
    'A' => "ฤ", 'S' => "ฆ", 'D' => "ฏ", 'F' => "โ", 'G' => "ฌ",
    'H' => "็", 'J' => "๋", 'K' => "ษ", 'L' => "ศ", ':' => "ซ",
    '"' => ".",

    // bottom row
    'z' => "ผ", 'x' => "ป", 'c' => "แ", 'v' => "อ", 'b' => "ิ",
    'n' => "ื", 'm' => "ท", ',' => "ม", '.' => "ใ", '/' => "ฝ",
    'Z' => "(", 'X' => ")", 'C' => "ฉ", 'V' => "ฮ", 'B' => "ฺ",
    'N' => "์", 'M' => "?", '<' => "ฒ", '>' => "ฬ", '?' => "ฦ",

    ' ' => " ",
};

/// The Kedmanee layout as a `StaticKeymap` for the remap editor.
pub fn kedmanee() -> StaticKeymap {
    KEDMANEE.entries().map(|(k, v)| (*k, *v)).collect()
}

/// Transliterate QWERTY text as if typed on a Kedmanee keyboard. Characters
/// without a mapping pass through.
pub fn qwerty_to_thai(text: &str) -> String {
    text.chars()
        .map(|ch| match KEDMANEE.get(&ch) {
            Some(out) => (*out).to_string(),
            None => ch.to_string(),
        })
        .collect()
}

/// Reverse of `qwerty_to_thai`: the QWERTY key that types each character.
pub fn thai_to_qwerty(text: &str) -> String {
    text.chars().map(|ch| qwerty_key_for(ch).unwrap_or(ch)).collect()
}

fn qwerty_key_for(ch: char) -> Option<char> {
    let mut buf = [0u8; 4];
    let needle: &str = ch.encode_utf8(&mut buf);
    KEDMANEE
        .entries()
        .find(|(_, out)| **out == needle)
        .map(|(key, _)| *key)
}
