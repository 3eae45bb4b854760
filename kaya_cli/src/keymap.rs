//! Centralized keybindings and help text for the Kaya TUI
use crossterm::event::{KeyCode, KeyModifiers};
use kaya_core::Screen;

pub struct KeyMap;

impl KeyMap {
    /// Help text for the keys that apply on `screen`
    pub fn help_text(screen: Screen) -> Vec<(&'static str, &'static str)> {
        let mut items = match screen {
            Screen::Landing => vec![
                ("Enter/g", "Let's get started"),
                ("l", "Learn more"),
            ],
            Screen::Intake => vec![
                ("Tab/↓", "Next field"),
                ("S-Tab/↑", "Previous field"),
                ("←/→", "Change selection"),
                ("Enter", "Attach file / submit"),
                ("Del", "Remove attached resume"),
                ("Paste", "Drop a resume file path"),
                ("Esc", "Back to home"),
            ],
            Screen::Processing => vec![
                ("", "Analysis runs automatically"),
                ("Enter", "Retry a failed report"),
            ],
            Screen::Report => vec![
                ("←/→ 1-4", "Switch tab"),
                ("j/k", "Scroll"),
                ("h", "Feedback: helpful"),
                ("n", "Feedback: needs improvement"),
                ("c", "Edit feedback comment"),
                ("s", "Submit feedback"),
                ("d", "Download report"),
                ("a", "Analyze another resume"),
            ],
        };

        items.push(("t", "Toggle high-contrast"));
        items.push(("?", "Show help"));
        items.push(("q/C-c", "Quit"));
        items
    }

    /// Ctrl+C always quits, even while typing
    pub fn is_force_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
        matches!(code, KeyCode::Char('c')) && modifiers.contains(KeyModifiers::CONTROL)
    }

    pub fn is_quit(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('q'))
    }

    pub fn is_help(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('?'))
    }

    pub fn is_toggle_theme(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('t'))
    }

    pub fn is_back(code: KeyCode) -> bool {
        matches!(code, KeyCode::Esc)
    }

    pub fn is_confirm(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter)
    }

    pub fn is_get_started(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter | KeyCode::Char('g'))
    }

    pub fn is_learn_more(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('l'))
    }

    pub fn is_next_field(code: KeyCode) -> bool {
        matches!(code, KeyCode::Tab | KeyCode::Down)
    }

    pub fn is_prev_field(code: KeyCode) -> bool {
        matches!(code, KeyCode::BackTab | KeyCode::Up)
    }

    pub fn is_down(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('j') | KeyCode::Down)
    }

    pub fn is_up(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('k') | KeyCode::Up)
    }

    pub fn is_left(code: KeyCode) -> bool {
        matches!(code, KeyCode::Left)
    }

    pub fn is_right(code: KeyCode) -> bool {
        matches!(code, KeyCode::Right)
    }

    /// `1`..`4` as a tab index
    pub fn tab_index(code: KeyCode) -> Option<usize> {
        match code {
            KeyCode::Char(c @ '1'..='4') => Some(c as usize - '1' as usize),
            _ => None,
        }
    }

    pub fn is_remove(code: KeyCode) -> bool {
        matches!(code, KeyCode::Delete)
    }

    pub fn is_helpful(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('h'))
    }

    pub fn is_needs_improvement(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('n'))
    }

    pub fn is_edit_comment(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('c'))
    }

    pub fn is_submit_feedback(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('s'))
    }

    pub fn is_download(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('d'))
    }

    pub fn is_analyze_another(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('a'))
    }
}
