//! User configuration: physics tunables, layout, and keybindings.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/drag-carousel/config.toml` (default
//! `~/.config/drag-carousel/config.toml`).  Unknown keys and bad values are
//! ignored so a stale file never prevents startup.

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::physics::Physics;

// ───────────────────────────────────────── actions ───────────

/// Keyboard actions available in the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollLeft,
    ScrollRight,
    JumpStart,
    JumpEnd,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollLeft,
        Action::ScrollRight,
        Action::JumpStart,
        Action::JumpEnd,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollLeft => "scroll_left",
            Action::ScrollRight => "scroll_right",
            Action::JumpStart => "jump_start",
            Action::JumpEnd => "jump_end",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A key code plus the CTRL/ALT/SHIFT modifiers that must accompany it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// SHIFT is ignored for character keys: the case of the char carries it.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match self.code {
            KeyCode::Char(_) => MODIFIER_MASK.difference(KeyModifiers::SHIFT),
            _ => MODIFIER_MASK,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short form for the status bar (e.g. `"←"`, `"Ctrl+c"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            _ => self.key_name(),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Config-file form (e.g. `"Alt+Left"`, `"q"`).
    fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.key_name())
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        s
    }

    fn key_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse `"Ctrl+c"`, `"Alt+Left"`, `"q"`, `"End"`.
    fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.pop()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            // Keep the original case for single characters ("Q" ≠ "q").
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Everything the user can tune.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub physics: Physics,
    /// Pixels represented by one terminal column.
    pub px_per_cell: f64,
    /// Slide width in terminal columns.
    pub item_width: u16,
    /// Pixels per mouse-wheel notch.
    pub wheel_step: f64,
    /// Pixels per scroll-left/right key press.
    pub key_step: f64,
    /// Frames per second of the animation loop.
    pub fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            physics: Physics::default(),
            px_per_cell: 8.0,
            item_width: 28,
            wheel_step: 100.0,
            key_step: 160.0,
            fps: 60,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(ScrollRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(JumpStart, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(JumpEnd, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action bound to a key event; more modifiers win ties.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "drag / wheel: scroll | {}/{}: step | {}/{}: jump | {}: quit",
            self.short_binding(Action::ScrollLeft),
            self.short_binding(Action::ScrollRight),
            self.short_binding(Action::JumpStart),
            self.short_binding(Action::JumpEnd),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::parse_config(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    fn parse_config(s: &str) -> Self {
        let mut cfg = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if cfg.apply_setting(key, value) {
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!("ignoring unknown config key `{key}`");
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                cfg.bindings.insert(action, parsed);
            }
        }

        cfg.physics = cfg.physics.sanitised();
        cfg
    }

    /// Apply a numeric setting.  Returns `false` when `key` is not one.
    fn apply_setting(&mut self, key: &str, value: &str) -> bool {
        let number = value.parse::<f64>().ok().filter(|v| v.is_finite());
        let slot: &mut f64 = match key {
            "smoothing" => &mut self.physics.smoothing,
            "drag_multiplier" => &mut self.physics.drag_multiplier,
            "velocity_cap" => &mut self.physics.velocity_cap,
            "bar_baseline" => &mut self.physics.bar_baseline,
            "item_squash" => &mut self.physics.item_squash,
            "image_stretch" => &mut self.physics.image_stretch,
            "px_per_cell" => &mut self.px_per_cell,
            "wheel_step" => &mut self.wheel_step,
            "key_step" => &mut self.key_step,
            "item_width" => {
                if let Some(v) = number {
                    self.item_width = (v as u16).clamp(6, 200);
                }
                return true;
            }
            "fps" => {
                if let Some(v) = number {
                    self.fps = (v as u32).clamp(10, 240);
                }
                return true;
            }
            _ => return false,
        };
        match number {
            Some(v) => *slot = v,
            None => tracing::debug!("ignoring bad value for `{key}`: {value}"),
        }
        match key {
            "px_per_cell" => self.px_per_cell = self.px_per_cell.clamp(1.0, 64.0),
            "wheel_step" => self.wheel_step = self.wheel_step.clamp(1.0, 10_000.0),
            "key_step" => self.key_step = self.key_step.clamp(1.0, 10_000.0),
            _ => {}
        }
        true
    }

    /// Render the effective config in file format.
    pub fn serialise(&self) -> String {
        let p = &self.physics;
        let mut lines = vec![
            "# drag-carousel configuration".to_string(),
            String::new(),
            "# Physics".to_string(),
            format!("smoothing = {}", p.smoothing),
            format!("drag_multiplier = {}", p.drag_multiplier),
            format!("velocity_cap = {}", p.velocity_cap),
            format!("bar_baseline = {}", p.bar_baseline),
            format!("item_squash = {}", p.item_squash),
            format!("image_stretch = {}", p.image_stretch),
            String::new(),
            "# Layout and input".to_string(),
            format!("px_per_cell = {}", self.px_per_cell),
            format!("item_width = {}", self.item_width),
            format!("wheel_step = {}", self.wheel_step),
            format!("key_step = {}", self.key_step),
            format!("fps = {}", self.fps),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/drag-carousel/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("drag-carousel").join("config.toml")
}
