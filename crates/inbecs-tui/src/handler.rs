use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, FocusPane, InputMode, Screen, TextInput};
use crate::tui::AppEvent;

const PAGE_STEP: u16 = 10;
const MOUSE_STEP: u16 = 3;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Paste(text) => handle_paste(app, &text),
        AppEvent::Resize => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_tasks().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Popups take every key while open
    if app.show_save_popup {
        handle_save_popup(app, key);
    } else if app.show_custom_model_input {
        handle_custom_model_input(app, key);
    } else if app.show_model_picker {
        handle_model_picker(app, key);
    } else {
        match (app.input_mode, app.screen) {
            (InputMode::Normal, Screen::Generate) => handle_generate_normal(app, key),
            (InputMode::Normal, Screen::Settings) => handle_settings_normal(app, key),
            (InputMode::Editing, Screen::Generate) => handle_generate_editing(app, key),
            (InputMode::Editing, Screen::Settings) => handle_template_editing(app, key),
        }
    }

    app.drain_notices();
}

/// Shared line-editing keys for single-line inputs.
fn edit_text_input(input: &mut TextInput, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        KeyCode::Char(c) => input.insert(c),
        _ => {}
    }
}

fn start_editing(app: &mut App, focus: FocusPane) {
    app.focus = focus;
    app.input_mode = InputMode::Editing;
}

fn handle_generate_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('2') => app.screen = Screen::Settings,

        // Inputs
        KeyCode::Char('/') | KeyCode::Char('i') => start_editing(app, FocusPane::Keyword),
        KeyCode::Char('n') => start_editing(app, FocusPane::Manual),

        // Result count
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_display_count(1),
        KeyCode::Char('-') => app.adjust_display_count(-1),
        KeyCode::Char(']') => app.adjust_display_count(10),
        KeyCode::Char('[') => app.adjust_display_count(-10),

        // Focus and navigation
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::Char('j') | KeyCode::Down => app.focused_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.focused_up(1),
        KeyCode::PageDown => app.focused_down(PAGE_STEP),
        KeyCode::PageUp => app.focused_up(PAGE_STEP),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.focused_down(PAGE_STEP)
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.focused_up(PAGE_STEP)
        }

        KeyCode::Enter => match app.focus {
            pane @ (FocusPane::Keyword | FocusPane::Manual) => start_editing(app, pane),
            FocusPane::Suggestions => app.generate_selected_suggestion(),
            FocusPane::Posts | FocusPane::Report | FocusPane::Article => {}
        },

        // Article actions
        KeyCode::Char('s') => app.open_save_popup(),
        KeyCode::Char('d') => app.delete_article(),

        _ => {}
    }
}

fn handle_generate_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            match app.focus {
                FocusPane::Keyword => {
                    app.start_search();
                    app.focus = FocusPane::Posts;
                }
                FocusPane::Manual => {
                    app.generate_manual_title();
                    app.focus = FocusPane::Article;
                }
                _ => {}
            }
        }
        _ => match app.focus {
            FocusPane::Keyword => edit_text_input(&mut app.keyword_input, key),
            FocusPane::Manual => edit_text_input(&mut app.manual_input, key),
            _ => app.input_mode = InputMode::Normal,
        },
    }
}

fn handle_settings_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('1') => app.screen = Screen::Generate,
        KeyCode::Char('e') | KeyCode::Char('i') | KeyCode::Enter => {
            app.input_mode = InputMode::Editing
        }
        KeyCode::Char('s') => app.save_template(),
        KeyCode::Char('r') => app.reset_template(),
        KeyCode::Char('m') => app.open_model_picker(),
        KeyCode::Char('M') => app.open_custom_model_input(),
        KeyCode::Char('j') | KeyCode::Down => app.template_editor.down(),
        KeyCode::Char('k') | KeyCode::Up => app.template_editor.up(),
        _ => {}
    }
}

fn handle_template_editing(app: &mut App, key: KeyEvent) {
    let editor = &mut app.template_editor;
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_mode = InputMode::Normal;
            app.save_template();
        }
        KeyCode::Enter => editor.newline(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.left(),
        KeyCode::Right => editor.right(),
        KeyCode::Up => editor.up(),
        KeyCode::Down => editor.down(),
        KeyCode::Home => editor.home(),
        KeyCode::End => editor.end(),
        KeyCode::Tab => {
            for _ in 0..4 {
                editor.insert(' ');
            }
        }
        KeyCode::Char(c) => editor.insert(c),
        _ => {}
    }
}

fn handle_save_popup(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.show_save_popup = false,
        KeyCode::Enter => app.save_article(),
        _ => edit_text_input(&mut app.save_input, key),
    }
}

fn handle_model_picker(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.show_model_picker = false,
        KeyCode::Char('j') | KeyCode::Down => app.model_picker_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.model_picker_nav_up(),
        KeyCode::Enter => app.select_model(),
        _ => {}
    }
}

fn handle_custom_model_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.show_custom_model_input = false,
        KeyCode::Enter => app.submit_custom_model(),
        _ => edit_text_input(&mut app.custom_model_input, key),
    }
}

/// Insert pasted text into whatever is being edited. Single-line inputs drop line breaks.
fn handle_paste(app: &mut App, text: &str) {
    let single_line = || text.chars().filter(|c| *c != '\r' && *c != '\n');

    if app.show_save_popup {
        single_line().for_each(|c| app.save_input.insert(c));
    } else if app.show_custom_model_input {
        single_line().for_each(|c| app.custom_model_input.insert(c));
    } else if app.input_mode == InputMode::Editing {
        match (app.screen, app.focus) {
            (Screen::Settings, _) => {
                for c in text.chars().filter(|c| *c != '\r') {
                    if c == '\n' {
                        app.template_editor.newline();
                    } else {
                        app.template_editor.insert(c);
                    }
                }
            }
            (Screen::Generate, FocusPane::Keyword) => {
                single_line().for_each(|c| app.keyword_input.insert(c))
            }
            (Screen::Generate, FocusPane::Manual) => {
                single_line().for_each(|c| app.manual_input.insert(c))
            }
            _ => {}
        }
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let (x, y) = (mouse.column, mouse.row);
    let within = |area: Option<Rect>| area.is_some_and(|r| point_in_rect(x, y, r));

    let down = match mouse.kind {
        MouseEventKind::ScrollDown => true,
        MouseEventKind::ScrollUp => false,
        _ => return,
    };

    match app.screen {
        Screen::Generate => {
            let pane = if within(app.posts_area) {
                FocusPane::Posts
            } else if within(app.suggestions_area) {
                FocusPane::Suggestions
            } else if within(app.report_area) {
                FocusPane::Report
            } else if within(app.article_area) {
                FocusPane::Article
            } else {
                return;
            };

            // Scroll the pane under the pointer without stealing focus
            let focus = std::mem::replace(&mut app.focus, pane);
            if down {
                app.focused_down(MOUSE_STEP);
            } else {
                app.focused_up(MOUSE_STEP);
            }
            app.focus = focus;
        }
        Screen::Settings => {
            if within(app.template_area) {
                let editor = &mut app.template_editor;
                editor.scroll = if down {
                    editor.scroll.saturating_add(MOUSE_STEP)
                } else {
                    editor.scroll.saturating_sub(MOUSE_STEP)
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inbecs_core::Settings;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, press(KeyCode::Char(c)));
        }
    }

    fn test_app(dir: &TempDir) -> App {
        App::new(Settings {
            config_path: Some(dir.path().join("prompt_config.json")),
            output_dir: dir.path().to_path_buf(),
            ..Settings::default()
        })
    }

    #[test]
    fn test_point_in_rect() {
        let rect = Rect::new(2, 2, 4, 3);
        assert!(point_in_rect(2, 2, rect));
        assert!(point_in_rect(5, 4, rect));
        assert!(!point_in_rect(6, 4, rect));
        assert!(!point_in_rect(1, 2, rect));
    }

    #[test]
    fn test_ctrl_c_quits_from_editing() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.input_mode = InputMode::Editing;
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_keyword_does_not_trigger_shortcuts() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        handle_key(&mut app, press(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Editing);
        type_text(&mut app, "qs 맛집");
        assert!(!app.should_quit);
        assert!(!app.show_save_popup);
        assert_eq!(app.keyword_input.text, "qs 맛집");

        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_count_keys_adjust_display_count() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        handle_key(&mut app, press(KeyCode::Char(']')));
        handle_key(&mut app, press(KeyCode::Char('+')));
        assert_eq!(app.display_count, 41);
        handle_key(&mut app, press(KeyCode::Char('-')));
        assert_eq!(app.display_count, 40);
    }

    #[test]
    fn test_screen_switch_and_template_editing() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        handle_key(&mut app, press(KeyCode::Char('2')));
        assert_eq!(app.screen, Screen::Settings);

        handle_key(&mut app, press(KeyCode::Char('e')));
        handle_key(&mut app, press(KeyCode::Char('가')));
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(app.template_editor.text().starts_with("가\n"));

        handle_key(&mut app, press(KeyCode::Esc));
        handle_key(&mut app, press(KeyCode::Char('1')));
        assert_eq!(app.screen, Screen::Generate);
    }

    #[test]
    fn test_model_picker_popup_captures_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.screen = Screen::Settings;

        handle_key(&mut app, press(KeyCode::Char('m')));
        assert!(app.show_model_picker);
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Enter));

        assert!(!app.show_model_picker);
        assert_eq!(app.prompt_config.openai_model_name, "gpt-4o-mini");
        assert!(app.notices.iter().any(|n| n.message.contains("gpt-4o-mini")));
    }

    #[test]
    fn test_paste_into_inputs() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);

        handle_paste(&mut app, "무시됨");
        assert!(app.keyword_input.text.is_empty());

        handle_key(&mut app, press(KeyCode::Char('/')));
        handle_paste(&mut app, "강남\r\n맛집");
        assert_eq!(app.keyword_input.text, "강남맛집");

        app.screen = Screen::Settings;
        app.template_editor = crate::app::TemplateEditor::new("");
        handle_paste(&mut app, "{keyword}\r\n{target_audience}");
        assert_eq!(app.template_editor.text(), "{keyword}\n{target_audience}");
    }

    #[test]
    fn test_mouse_scroll_keeps_focus() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.focus = FocusPane::Keyword;
        app.article_area = Some(Rect::new(0, 0, 10, 10));

        handle_mouse(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 1,
                row: 1,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.article_scroll, MOUSE_STEP);
        assert_eq!(app.focus, FocusPane::Keyword);
    }
}
