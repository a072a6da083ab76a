//! Raw key events and the logical input symbols derived from them.
//!
//! Hosts deliver key events as a keyval (X11 keysym, the same numbering IBus
//! uses), a press/release flag and a modifier mask. The engine reduces each
//! press to an `InputSymbol` once, so editors only ever match on symbols.

use std::fmt;
use std::ops::BitOr;

/// Keysym values for the named keys the engine cares about.
pub mod keysym {
    pub const SPACE: u32 = 0x0020;
    pub const GRAVE: u32 = 0x0060;
    pub const BACKSPACE: u32 = 0xff08;
    pub const TAB: u32 = 0xff09;
    pub const RETURN: u32 = 0xff0d;
    pub const ESCAPE: u32 = 0xff1b;
    pub const LEFT: u32 = 0xff51;
    pub const UP: u32 = 0xff52;
    pub const RIGHT: u32 = 0xff53;
    pub const DOWN: u32 = 0xff54;
    pub const KP_ENTER: u32 = 0xff8d;

    /// Offset of the direct Unicode keysym range (`0x0100_0000 + code point`).
    pub const UNICODE_OFFSET: u32 = 0x0100_0000;
}

/// Modifier bit-set, laid out like the IBus modifier mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1 << 0);
    pub const LOCK: Modifiers = Modifiers(1 << 1);
    pub const CONTROL: Modifiers = Modifiers(1 << 2);
    /// Mod1, which is Alt on every common layout.
    pub const ALT: Modifiers = Modifiers(1 << 3);
    pub const SUPER: Modifiers = Modifiers(1 << 26);
    pub const RELEASE: Modifiers = Modifiers(1 << 30);

    pub const fn from_bits(bits: u32) -> Self {
        Modifiers(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when a chord modifier that hands the key to the application is held.
    pub const fn has_control_or_alt(self) -> bool {
        self.0 & (Self::CONTROL.0 | Self::ALT.0) != 0
    }

    pub const fn without(self, other: Modifiers) -> Self {
        Modifiers(self.0 & !other.0)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

/// A key event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub keyval: u32,
    pub is_press: bool,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn press(keyval: u32, modifiers: Modifiers) -> Self {
        Self {
            keyval,
            is_press: true,
            modifiers,
        }
    }

    pub fn release(keyval: u32, modifiers: Modifiers) -> Self {
        Self {
            keyval,
            is_press: false,
            modifiers,
        }
    }

    /// Decode an IBus `ProcessKeyEvent` triple. The release flag travels in the
    /// state mask; the hardware keycode is not needed for symbol decoding.
    pub fn from_ibus(keyval: u32, _keycode: u32, state: u32) -> Self {
        let modifiers = Modifiers::from_bits(state);
        Self {
            keyval,
            is_press: !modifiers.contains(Modifiers::RELEASE),
            modifiers: modifiers.without(Modifiers::RELEASE),
        }
    }

    /// Press of the key that produces `ch` with no modifiers.
    pub fn char(ch: char) -> Self {
        Self::press(keyval_for_char(ch), Modifiers::NONE)
    }

    /// Reduce the event to a symbol. Releases never produce one.
    pub fn symbol(&self) -> Option<InputSymbol> {
        if !self.is_press {
            return None;
        }
        Some(InputSymbol::from_keyval(self.keyval, self.modifiers))
    }

    /// Reduce the event to a `KeyPress` ready for routing.
    pub fn to_press(&self) -> Option<KeyPress> {
        self.symbol().map(|symbol| KeyPress {
            symbol,
            modifiers: self.modifiers,
        })
    }
}

/// Keyval for a character: Latin-1 maps to itself, everything else uses the
/// Unicode keysym range.
pub fn keyval_for_char(ch: char) -> u32 {
    let cp = ch as u32;
    if (0x20..=0x7e).contains(&cp) || (0xa0..=0xff).contains(&cp) {
        cp
    } else {
        keysym::UNICODE_OFFSET + cp
    }
}

/// A single logical keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSymbol {
    /// ASCII letter as typed (case preserved).
    Letter(char),
    /// Digit key without Control.
    Digit(u8),
    /// Digit key with Control held; reserved for mode shortcuts.
    ControlDigit(u8),
    /// Any other printable character.
    Char(char),
    Space,
    Enter,
    Backspace,
    Escape,
    ArrowUp,
    ArrowDown,
    /// Keys the engine never routes (Tab, function keys, ...).
    Other(u32),
}

impl InputSymbol {
    pub fn from_keyval(keyval: u32, modifiers: Modifiers) -> Self {
        match keyval {
            keysym::SPACE => InputSymbol::Space,
            keysym::RETURN | keysym::KP_ENTER => InputSymbol::Enter,
            keysym::BACKSPACE => InputSymbol::Backspace,
            keysym::ESCAPE => InputSymbol::Escape,
            keysym::UP => InputSymbol::ArrowUp,
            keysym::DOWN => InputSymbol::ArrowDown,
            0x30..=0x39 => {
                let digit = (keyval - 0x30) as u8;
                if modifiers.contains(Modifiers::CONTROL) {
                    InputSymbol::ControlDigit(digit)
                } else {
                    InputSymbol::Digit(digit)
                }
            }
            0x41..=0x5a | 0x61..=0x7a => InputSymbol::Letter(keyval as u8 as char),
            0x21..=0x7e | 0xa0..=0xff => InputSymbol::Char(keyval as u8 as char),
            kv if kv > keysym::UNICODE_OFFSET => match char::from_u32(kv - keysym::UNICODE_OFFSET) {
                Some(ch) => InputSymbol::Char(ch),
                None => InputSymbol::Other(kv),
            },
            other => InputSymbol::Other(other),
        }
    }

    /// The printable character this symbol types, if any.
    pub fn as_char(&self) -> Option<char> {
        match *self {
            InputSymbol::Letter(ch) | InputSymbol::Char(ch) => Some(ch),
            InputSymbol::Digit(d) => char::from_digit(d as u32, 10),
            InputSymbol::Space => Some(' '),
            _ => None,
        }
    }

    pub fn is_lowercase_letter(&self) -> bool {
        matches!(self, InputSymbol::Letter(ch) if ch.is_ascii_lowercase())
    }
}

impl fmt::Display for InputSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSymbol::Letter(ch) | InputSymbol::Char(ch) => write!(f, "{}", ch),
            InputSymbol::Digit(d) => write!(f, "{}", d),
            InputSymbol::ControlDigit(d) => write!(f, "Ctrl+{}", d),
            InputSymbol::Space => f.write_str("Space"),
            InputSymbol::Enter => f.write_str("Enter"),
            InputSymbol::Backspace => f.write_str("BackSpace"),
            InputSymbol::Escape => f.write_str("Escape"),
            InputSymbol::ArrowUp => f.write_str("Up"),
            InputSymbol::ArrowDown => f.write_str("Down"),
            InputSymbol::Other(kv) => write!(f, "<0x{:x}>", kv),
        }
    }
}

/// A decoded key press: the symbol plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub symbol: InputSymbol,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(symbol: InputSymbol, modifiers: Modifiers) -> Self {
        Self { symbol, modifiers }
    }

    pub fn plain(symbol: InputSymbol) -> Self {
        Self::new(symbol, Modifiers::NONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_has_no_symbol() {
        let ev = KeyEvent::release('a' as u32, Modifiers::NONE);
        assert_eq!(ev.symbol(), None);
        assert_eq!(ev.to_press(), None);
    }

    #[test]
    fn test_ibus_release_mask() {
        let state = Modifiers::RELEASE.bits() | Modifiers::SHIFT.bits();
        let ev = KeyEvent::from_ibus('A' as u32, 38, state);
        assert!(!ev.is_press);
        assert_eq!(ev.modifiers, Modifiers::SHIFT);

        let ev = KeyEvent::from_ibus('a' as u32, 38, 0);
        assert!(ev.is_press);
    }

    #[test]
    fn test_named_keys() {
        let m = Modifiers::NONE;
        assert_eq!(InputSymbol::from_keyval(keysym::SPACE, m), InputSymbol::Space);
        assert_eq!(InputSymbol::from_keyval(keysym::RETURN, m), InputSymbol::Enter);
        assert_eq!(InputSymbol::from_keyval(keysym::KP_ENTER, m), InputSymbol::Enter);
        assert_eq!(InputSymbol::from_keyval(keysym::BACKSPACE, m), InputSymbol::Backspace);
        assert_eq!(InputSymbol::from_keyval(keysym::ESCAPE, m), InputSymbol::Escape);
        assert_eq!(InputSymbol::from_keyval(keysym::UP, m), InputSymbol::ArrowUp);
        assert_eq!(InputSymbol::from_keyval(keysym::DOWN, m), InputSymbol::ArrowDown);
        assert_eq!(InputSymbol::from_keyval(keysym::TAB, m), InputSymbol::Other(keysym::TAB));
    }

    #[test]
    fn test_digits_and_control_digits() {
        assert_eq!(
            InputSymbol::from_keyval('3' as u32, Modifiers::NONE),
            InputSymbol::Digit(3)
        );
        assert_eq!(
            InputSymbol::from_keyval('3' as u32, Modifiers::CONTROL),
            InputSymbol::ControlDigit(3)
        );
    }

    #[test]
    fn test_letters_keep_case() {
        assert_eq!(
            InputSymbol::from_keyval('q' as u32, Modifiers::NONE),
            InputSymbol::Letter('q')
        );
        assert_eq!(
            InputSymbol::from_keyval('Q' as u32, Modifiers::SHIFT),
            InputSymbol::Letter('Q')
        );
        assert!(InputSymbol::Letter('q').is_lowercase_letter());
        assert!(!InputSymbol::Letter('Q').is_lowercase_letter());
    }

    #[test]
    fn test_unicode_keysym() {
        let kv = keyval_for_char('ก');
        assert_eq!(kv, keysym::UNICODE_OFFSET + 0x0e01);
        assert_eq!(InputSymbol::from_keyval(kv, Modifiers::NONE), InputSymbol::Char('ก'));
    }

    #[test]
    fn test_as_char() {
        assert_eq!(InputSymbol::Letter('a').as_char(), Some('a'));
        assert_eq!(InputSymbol::Char(';').as_char(), Some(';'));
        assert_eq!(InputSymbol::Digit(7).as_char(), Some('7'));
        assert_eq!(InputSymbol::Space.as_char(), Some(' '));
        assert_eq!(InputSymbol::Enter.as_char(), None);
        assert_eq!(InputSymbol::ControlDigit(1).as_char(), None);
    }

    #[test]
    fn test_modifier_helpers() {
        let mods = Modifiers::SHIFT | Modifiers::ALT;
        assert!(mods.has_control_or_alt());
        assert!(!Modifiers::SHIFT.has_control_or_alt());
        assert!(Modifiers::NONE.is_empty());
        assert_eq!(mods.without(Modifiers::ALT), Modifiers::SHIFT);
    }
}
