//! Line-oriented terminal host.
//!
//! Each input line is a whitespace-separated list of tokens:
//!
//! - a key: `a`, `1`, `Space`, `Return`, `BackSpace`, `Escape`, `Up`,
//!   `Down`, optionally with modifiers (`Ctrl+2`, `Shift+a`, `Alt+x`)
//! - `text:<chars>` types each character as a plain key press
//! - `release:<key>` sends a key release
//! - `mode:<id>` sends a mode-selection request
//! - `reset`, `focus-in`, `focus-out`, `quit`
//!
//! Every resulting notification is printed on its own line.

use std::io::{BufRead, Write};
use thaime_core::{keysym, keyval_for_char, KeyEvent, KeyResult, Modifiers, Notification, Session};
use tracing::debug;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("unknown modifier: {0}")]
    UnknownModifier(String),

    #[error("empty argument for {0}")]
    MissingArgument(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Key(KeyEvent),
    Text(String),
    SelectMode(String),
    Reset,
    FocusIn,
    FocusOut,
    Quit,
}

/// Parse one input line into commands.
pub fn parse_line(line: &str) -> Result<Vec<Command>, CommandError> {
    line.split_whitespace().map(parse_command).collect()
}

pub fn parse_command(token: &str) -> Result<Command, CommandError> {
    if let Some(id) = token.strip_prefix("mode:") {
        if id.is_empty() {
            return Err(CommandError::MissingArgument("mode"));
        }
        return Ok(Command::SelectMode(id.to_string()));
    }
    if let Some(text) = token.strip_prefix("text:") {
        if text.is_empty() {
            return Err(CommandError::MissingArgument("text"));
        }
        return Ok(Command::Text(text.to_string()));
    }
    if let Some(key) = token.strip_prefix("release:") {
        let press = parse_key(key)?;
        return Ok(Command::Key(KeyEvent::release(press.keyval, press.modifiers)));
    }
    match token {
        "reset" => Ok(Command::Reset),
        "focus-in" => Ok(Command::FocusIn),
        "focus-out" => Ok(Command::FocusOut),
        "quit" => Ok(Command::Quit),
        _ => parse_key(token).map(Command::Key),
    }
}

/// Parse a key spec such as `a`, `Return` or `Ctrl+2` into a press event.
pub fn parse_key(spec: &str) -> Result<KeyEvent, CommandError> {
    // a lone "+" is the plus key, not a separator
    let (mods, name) = match spec.rfind('+') {
        Some(pos) if pos + 1 < spec.len() => (&spec[..pos], &spec[pos + 1..]),
        _ => ("", spec),
    };

    let mut modifiers = Modifiers::NONE;
    for m in mods.split('+').filter(|m| !m.is_empty()) {
        modifiers = modifiers
            | match m.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => Modifiers::CONTROL,
                "alt" => Modifiers::ALT,
                "shift" => Modifiers::SHIFT,
                "super" => Modifiers::SUPER,
                _ => return Err(CommandError::UnknownModifier(m.to_string())),
            };
    }

    let keyval = match name {
        "Space" | "space" => keysym::SPACE,
        "Return" | "Enter" => keysym::RETURN,
        "BackSpace" | "Backspace" => keysym::BACKSPACE,
        "Escape" | "Esc" => keysym::ESCAPE,
        "Tab" => keysym::TAB,
        "Up" => keysym::UP,
        "Down" => keysym::DOWN,
        "Left" => keysym::LEFT,
        "Right" => keysym::RIGHT,
        "grave" => keysym::GRAVE,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    let ch = if modifiers.contains(Modifiers::SHIFT) {
                        us_shifted(ch)
                    } else {
                        ch
                    };
                    if ch.is_ascii_uppercase() {
                        modifiers = modifiers | Modifiers::SHIFT;
                    }
                    keyval_for_char(ch)
                }
                _ => return Err(CommandError::UnknownKey(spec.to_string())),
            }
        }
    };
    Ok(KeyEvent::press(keyval, modifiers))
}

/// What a US keyboard types for `ch` with Shift held. Shift+1 is `!`, not a
/// digit.
fn us_shifted(ch: char) -> char {
    const SHIFTED: &[(char, char)] = &[
        ('1', '!'),
        ('2', '@'),
        ('3', '#'),
        ('4', '$'),
        ('5', '%'),
        ('6', '^'),
        ('7', '&'),
        ('8', '*'),
        ('9', '('),
        ('0', ')'),
        ('-', '_'),
        ('=', '+'),
        ('[', '{'),
        (']', '}'),
        ('\\', '|'),
        (';', ':'),
        ('\'', '"'),
        (',', '<'),
        ('.', '>'),
        ('/', '?'),
        ('`', '~'),
    ];
    if ch.is_ascii_lowercase() {
        return ch.to_ascii_uppercase();
    }
    SHIFTED
        .iter()
        .find(|(plain, _)| *plain == ch)
        .map(|(_, shifted)| *shifted)
        .unwrap_or(ch)
}

/// Render a notification as a single output line.
pub fn format_notification(n: &Notification) -> String {
    match n {
        Notification::UpdatePreedit { text, caret } => format!("preedit: {} (caret {})", text, caret),
        Notification::HidePreedit => "hide-preedit".to_string(),
        Notification::UpdateCandidates { entries, cursor } => {
            let items: Vec<String> = entries
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    let mark = if i == *cursor { "*" } else { "" };
                    format!("{}.{}{}", i + 1, e, mark)
                })
                .collect();
            format!("candidates: {}", items.join(" "))
        }
        Notification::HideCandidates => "hide-candidates".to_string(),
        Notification::Commit(text) => format!("commit: {:?}", text),
    }
}

fn write_result<W: Write>(out: &mut W, label: &str, result: &KeyResult) -> std::io::Result<()> {
    let state = if result.consumed { "consumed" } else { "passed" };
    writeln!(out, "{} -> {}", label, state)?;
    for n in &result.notifications {
        writeln!(out, "  {}", format_notification(n))?;
    }
    Ok(())
}

fn write_notifications<W: Write>(
    out: &mut W,
    label: &str,
    notifications: &[Notification],
) -> std::io::Result<()> {
    writeln!(out, "{}", label)?;
    for n in notifications {
        writeln!(out, "  {}", format_notification(n))?;
    }
    Ok(())
}

/// Apply one command to `session`, writing what happened to `out`. Returns
/// false once the host should stop.
pub fn apply_command<W: Write>(
    session: &mut Session,
    command: Command,
    out: &mut W,
) -> std::io::Result<bool> {
    debug!(?command, "host command");
    match command {
        Command::Key(event) => {
            let result = session.handle_key(event);
            let label = match event.symbol() {
                Some(symbol) => format!("{}", symbol),
                None => "release".to_string(),
            };
            write_result(out, &label, &result)?;
        }
        Command::Text(text) => {
            for ch in text.chars() {
                let result = session.handle_key(KeyEvent::char(ch));
                write_result(out, &ch.to_string(), &result)?;
            }
        }
        Command::SelectMode(id) => match session.activate_mode(&id) {
            Some(notes) => write_notifications(out, &format!("mode {}", session.mode()), &notes)?,
            None => writeln!(out, "mode {:?} ignored", id)?,
        },
        Command::Reset => {
            let notes = session.reset();
            write_notifications(out, "reset", &notes)?;
        }
        Command::FocusIn => session.focus_in(),
        Command::FocusOut => session.focus_out(),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Feed every line of `input` through `session` until EOF or `quit`.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
) -> std::io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let commands = match parse_line(&line) {
            Ok(commands) => commands,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };
        for command in commands {
            if !apply_command(session, command, out)? {
                return out.flush();
            }
        }
        out.flush()?;
    }
    Ok(())
}
