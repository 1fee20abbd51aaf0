//! Key classification and formatting over crossterm key events

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Keys that own a rule ladder in the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyClass {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
    Backspace,
    Tab,
    BackTab,
    Enter,
    Escape,
    /// Any single character key, with or without modifiers
    Printable,
}

impl KeyClass {
    pub const ALL: [KeyClass; 13] = [
        KeyClass::Up,
        KeyClass::Down,
        KeyClass::Left,
        KeyClass::Right,
        KeyClass::Home,
        KeyClass::End,
        KeyClass::Delete,
        KeyClass::Backspace,
        KeyClass::Tab,
        KeyClass::BackTab,
        KeyClass::Enter,
        KeyClass::Escape,
        KeyClass::Printable,
    ];

    /// Classify a key event; `None` for keys no ladder handles (F-keys, paging...)
    pub fn of(event: &KeyEvent) -> Option<Self> {
        let class = match event.code {
            KeyCode::Up => KeyClass::Up,
            KeyCode::Down => KeyClass::Down,
            KeyCode::Left => KeyClass::Left,
            KeyCode::Right => KeyClass::Right,
            KeyCode::Home => KeyClass::Home,
            KeyCode::End => KeyClass::End,
            KeyCode::Delete => KeyClass::Delete,
            KeyCode::Backspace => KeyClass::Backspace,
            // Some terminals report Shift+Tab as Tab with SHIFT
            KeyCode::Tab if event.modifiers.contains(KeyModifiers::SHIFT) => KeyClass::BackTab,
            KeyCode::Tab => KeyClass::Tab,
            KeyCode::BackTab => KeyClass::BackTab,
            KeyCode::Enter => KeyClass::Enter,
            KeyCode::Esc => KeyClass::Escape,
            KeyCode::Char(_) => KeyClass::Printable,
            _ => return None,
        };
        Some(class)
    }
}

pub fn has_ctrl(event: &KeyEvent) -> bool {
    event.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn has_shift(event: &KeyEvent) -> bool {
    event.modifiers.contains(KeyModifiers::SHIFT)
}

pub fn has_alt(event: &KeyEvent) -> bool {
    event.modifiers.contains(KeyModifiers::ALT)
}

/// The character of a character key, regardless of modifiers
pub fn key_char(event: &KeyEvent) -> Option<char> {
    match event.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

/// Character that would be typed: no modifiers other than Shift
pub fn typed_char(event: &KeyEvent) -> Option<char> {
    let plain = event.modifiers.difference(KeyModifiers::SHIFT).is_empty();
    key_char(event).filter(|_| plain)
}

/// Format a key event as a user-friendly string ("Ctrl+Backspace", "Shift+←")
pub fn format_key(event: &KeyEvent) -> String {
    let mut result = String::new();

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        result.push_str("Ctrl+");
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        result.push_str("Alt+");
    }
    // Uppercase letters already carry their shift
    let shifted_char = matches!(event.code, KeyCode::Char(c) if !c.is_lowercase());
    if event.modifiers.contains(KeyModifiers::SHIFT) && !shifted_char {
        result.push_str("Shift+");
    }

    match event.code {
        KeyCode::Enter => result.push_str("Enter"),
        KeyCode::Backspace => result.push_str("Backspace"),
        KeyCode::Delete => result.push_str("Del"),
        KeyCode::Tab => result.push_str("Tab"),
        KeyCode::BackTab => result.push_str("BackTab"),
        KeyCode::Esc => result.push_str("Esc"),
        KeyCode::Left => result.push('←'),
        KeyCode::Right => result.push('→'),
        KeyCode::Up => result.push('↑'),
        KeyCode::Down => result.push('↓'),
        KeyCode::Home => result.push_str("Home"),
        KeyCode::End => result.push_str("End"),
        KeyCode::PageUp => result.push_str("PgUp"),
        KeyCode::PageDown => result.push_str("PgDn"),
        KeyCode::Char(' ') => result.push_str("Space"),
        KeyCode::Char(c) => result.push(c),
        KeyCode::F(n) => result.push_str(&format!("F{}", n)),
        _ => result.push('?'),
    }

    result
}

/// Parse a key spec such as `"ctrl+backspace"`, `"shift+left"` or `"5"`
pub fn parse_key(spec: &str) -> Option<KeyEvent> {
    if spec.trim() == "+" {
        return Some(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE));
    }
    let mut parts: Vec<&str> = spec.split('+').map(str::trim).collect();
    // "ctrl++" names the plus key
    if spec.ends_with("++") {
        parts.pop();
        parts.pop();
        parts.push("+");
    }
    let key = parts.pop()?;

    let mut modifiers = KeyModifiers::NONE;
    for m in parts {
        match m.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeyEvent::new(code, modifiers))
}
