use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, View};
use crate::tui::AppEvent;

/// Lines moved per PageUp/PageDown
const PAGE_SCROLL: u16 = 10;
/// Lines moved per mouse wheel notch
const WHEEL_SCROLL: u16 = 3;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any view
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.show_splash {
        return;
    }

    match app.view {
        View::Calculators => handle_calculators(app, key),
        View::Mentor => handle_mentor(app, key),
    }
}

fn handle_calculators(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('m') => app.set_view(View::Mentor),

        KeyCode::Tab | KeyCode::Down => app.calc_focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.calc_focus_prev(),

        KeyCode::Left => app.calc_cycle_pair(false),
        KeyCode::Right => app.calc_cycle_pair(true),

        KeyCode::Backspace => app.calc_backspace(),
        KeyCode::Char(c) => app.calc_insert(c),

        _ => {}
    }
}

fn handle_mentor(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.set_view(View::Calculators);
            return;
        }
        KeyCode::PageUp => {
            app.scroll_chat_up(PAGE_SCROLL);
            return;
        }
        KeyCode::PageDown => {
            app.scroll_chat_down(PAGE_SCROLL);
            return;
        }
        _ => {}
    }

    // Input is locked while a reply is outstanding
    if app.chat.is_awaiting() {
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit_chat(),
        KeyCode::Backspace => {
            if app.chat_cursor > 0 {
                app.chat_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.chat_input, app.chat_cursor);
                app.chat_input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.chat_input.chars().count();
            if app.chat_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.chat_input, app.chat_cursor);
                app.chat_input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.chat_cursor = app.chat_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.chat_input.chars().count();
            app.chat_cursor = (app.chat_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.chat_cursor = 0;
        }
        KeyCode::End => {
            app.chat_cursor = app.chat_input.chars().count();
        }
        KeyCode::Char(c) if !c.is_control() => {
            let byte_pos = char_to_byte_index(&app.chat_input, app.chat_cursor);
            app.chat_input.insert(byte_pos, c);
            app.chat_cursor += 1;
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.show_splash {
        return;
    }

    let x = mouse.column;
    let y = mouse.row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.calculators_tab.map(|r| point_in_rect(x, y, r)).unwrap_or(false) {
                app.set_view(View::Calculators);
            } else if app.mentor_tab.map(|r| point_in_rect(x, y, r)).unwrap_or(false) {
                app.set_view(View::Mentor);
            }
        }
        MouseEventKind::ScrollDown if app.view == View::Mentor => {
            app.scroll_chat_down(WHEEL_SCROLL);
        }
        MouseEventKind::ScrollUp if app.view == View::Mentor => {
            app.scroll_chat_up(WHEEL_SCROLL);
        }
        _ => {}
    }
}
