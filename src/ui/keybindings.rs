//! Keyboard shortcuts registry.
//!
//! Single source of truth for the help overlay. Key handling lives in
//! `App::handle_key` and `ProjectForm::handle_key`; the tests below keep the
//! two in sync with this table.

use crossterm::event::KeyCode;

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., vim-style or arrow key)
    pub alt_key: Option<KeyCode>,
    /// Requires the Ctrl modifier
    pub ctrl: bool,
    pub description: &'static str,
    pub category: ShortcutCategory,
    pub context: ShortcutContext,
}

/// Categories for organizing shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutCategory {
    General,
    Navigation,
    Actions,
}

impl ShortcutCategory {
    /// All categories in display order
    pub fn all() -> &'static [ShortcutCategory] {
        &[
            ShortcutCategory::General,
            ShortcutCategory::Navigation,
            ShortcutCategory::Actions,
        ]
    }
}

/// Where a shortcut is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Project table
    Table,
    /// Add/edit form
    Form,
    /// Delete confirmation
    Confirm,
}

impl ShortcutContext {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::Table => "Projects",
            ShortcutContext::Form => "Project Form",
            ShortcutContext::Confirm => "Delete Confirmation",
        }
    }

    /// All contexts in display order
    pub fn all() -> &'static [ShortcutContext] {
        &[
            ShortcutContext::Table,
            ShortcutContext::Form,
            ShortcutContext::Confirm,
        ]
    }
}

impl Shortcut {
    /// Format key for display (e.g., "q", "Ctrl+G", "j/↓")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key, self.ctrl);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt, false)),
            None => primary,
        }
    }

    /// Format key for help dialog (left-padded to 10 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<10}", self.key_display())
    }
}

fn format_keycode(key: &KeyCode, ctrl: bool) -> String {
    let name = match key {
        KeyCode::Char(c) if ctrl => c.to_ascii_uppercase().to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        _ => format!("{:?}", key),
    };
    if ctrl {
        format!("Ctrl+{}", name)
    } else {
        name
    }
}

const fn shortcut(
    key: KeyCode,
    alt_key: Option<KeyCode>,
    description: &'static str,
    category: ShortcutCategory,
    context: ShortcutContext,
) -> Shortcut {
    Shortcut {
        key,
        alt_key,
        ctrl: false,
        description,
        category,
        context,
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // === Table ===
    shortcut(
        KeyCode::Char('q'),
        Some(KeyCode::Esc),
        "Quit",
        ShortcutCategory::General,
        ShortcutContext::Table,
    ),
    shortcut(
        KeyCode::Char('?'),
        None,
        "Toggle help",
        ShortcutCategory::General,
        ShortcutContext::Table,
    ),
    shortcut(
        KeyCode::Char('t'),
        None,
        "Toggle step delay",
        ShortcutCategory::General,
        ShortcutContext::Table,
    ),
    shortcut(
        KeyCode::Char('j'),
        Some(KeyCode::Down),
        "Next project",
        ShortcutCategory::Navigation,
        ShortcutContext::Table,
    ),
    shortcut(
        KeyCode::Char('k'),
        Some(KeyCode::Up),
        "Previous project",
        ShortcutCategory::Navigation,
        ShortcutContext::Table,
    ),
    shortcut(
        KeyCode::Char('a'),
        None,
        "Add project",
        ShortcutCategory::Actions,
        ShortcutContext::Table,
    ),
    shortcut(
        KeyCode::Char('e'),
        Some(KeyCode::Enter),
        "Edit selected project",
        ShortcutCategory::Actions,
        ShortcutContext::Table,
    ),
    shortcut(
        KeyCode::Char('d'),
        None,
        "Delete selected project",
        ShortcutCategory::Actions,
        ShortcutContext::Table,
    ),
    shortcut(
        KeyCode::Char('r'),
        None,
        "Reload projects",
        ShortcutCategory::Actions,
        ShortcutContext::Table,
    ),
    // === Form ===
    shortcut(
        KeyCode::Esc,
        None,
        "Cancel",
        ShortcutCategory::General,
        ShortcutContext::Form,
    ),
    shortcut(
        KeyCode::Tab,
        Some(KeyCode::BackTab),
        "Next / previous field",
        ShortcutCategory::Navigation,
        ShortcutContext::Form,
    ),
    Shortcut {
        key: KeyCode::Char('g'),
        alt_key: None,
        ctrl: true,
        description: "Generate a sample project",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Form,
    },
    Shortcut {
        key: KeyCode::Char('s'),
        alt_key: None,
        ctrl: true,
        description: "Save (add or update)",
        category: ShortcutCategory::Actions,
        context: ShortcutContext::Form,
    },
    // === Confirm ===
    shortcut(
        KeyCode::Char('y'),
        None,
        "Delete",
        ShortcutCategory::Actions,
        ShortcutContext::Confirm,
    ),
    shortcut(
        KeyCode::Tab,
        Some(KeyCode::Right),
        "Switch choice",
        ShortcutCategory::Navigation,
        ShortcutContext::Confirm,
    ),
    shortcut(
        KeyCode::Enter,
        None,
        "Apply highlighted choice",
        ShortcutCategory::Actions,
        ShortcutContext::Confirm,
    ),
    shortcut(
        KeyCode::Char('n'),
        Some(KeyCode::Esc),
        "Keep",
        ShortcutCategory::Actions,
        ShortcutContext::Confirm,
    ),
];

/// Shortcuts for one context, grouped by category in display order
pub fn shortcuts_by_category_for_context(
    context: ShortcutContext,
) -> Vec<(ShortcutCategory, Vec<&'static Shortcut>)> {
    let mut result = Vec::new();
    for category in ShortcutCategory::all() {
        let shortcuts: Vec<&Shortcut> = SHORTCUTS
            .iter()
            .filter(|s| s.context == context && s.category == *category)
            .collect();
        if !shortcuts.is_empty() {
            result.push((*category, shortcuts));
        }
    }
    result
}
