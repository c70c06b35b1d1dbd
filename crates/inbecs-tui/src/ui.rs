use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use inbecs_core::{template, GenerationResult, NoticeLevel};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, FocusPane, InputMode, Screen, TextInput};

/// Characters of a post summary shown under its title.
const SUMMARY_PREVIEW_CHARS: usize = 100;

fn columns(width: usize) -> u16 {
    u16::try_from(width).unwrap_or(u16::MAX)
}

fn display_width(s: &str) -> u16 {
    columns(UnicodeWidthStr::width(s))
}

/// Width of the first `cursor` characters of `s`, for placing the terminal cursor.
fn cursor_offset(s: &str, cursor: usize) -> u16 {
    columns(
        s.chars()
            .take(cursor)
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .sum(),
    )
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    }
}

fn ellipsis(frame: u8) -> &'static str {
    match frame {
        0 => ".",
        1 => "..",
        _ => "...",
    }
}

fn pane_block(title: impl Into<String>, focused: bool, editing: bool) -> Block<'static> {
    let border = if editing {
        Color::Yellow
    } else if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title.into())
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Render one markdown line: `#` headings, `**bold**` spans, everything else literal.
fn parse_markdown_line(text: &str) -> Line<'static> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('#') {
        let level = trimmed.chars().take_while(|c| *c == '#').count();
        let heading = trimmed[level..].trim().replace("**", "");
        let color = if level <= 2 { Color::Cyan } else { Color::LightBlue };
        return Line::from(Span::styled(
            heading,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'*') {
            chars.next();

            if !current_text.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_text)));
            }

            // Find closing **
            let mut bold_text = String::new();
            let mut found_close = false;
            while let Some(c) = chars.next() {
                if c == '*' && chars.peek() == Some(&'*') {
                    chars.next();
                    found_close = true;
                    break;
                }
                bold_text.push(c);
            }

            if found_close && !bold_text.is_empty() {
                spans.push(Span::styled(
                    bold_text,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                // No closing **, treat as literal
                current_text.push_str("**");
                current_text.push_str(&bold_text);
            }
        } else {
            current_text.push(c);
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::raw(current_text));
    }

    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, status, footer
    let [header_area, body_area, status_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.screen {
        Screen::Generate => render_generate_screen(app, frame, body_area),
        Screen::Settings => render_settings_screen(app, frame, body_area),
    }

    render_status(app, frame, status_area);
    render_footer(app, frame, footer_area);

    // Render popups (in order of priority)
    if app.show_save_popup {
        render_text_popup(
            frame,
            area,
            " 블로그 글 저장 ",
            &format!("저장 폴더: {}", app.settings.output_dir.display()),
            &app.save_input,
        );
    } else if app.show_custom_model_input {
        render_text_popup(
            frame,
            area,
            " 모델 직접 입력 ",
            "OpenAI 모델 이름을 입력하세요 (예: gpt-4o, gpt-3.5-turbo)",
            &app.custom_model_input,
        );
    } else if app.show_model_picker {
        render_model_picker(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Inbecs ", Style::default().fg(Color::Green).bold()),
        Span::styled("네이버 블로그 SEO & AI 글 생성기 ", Style::default().fg(Color::White)),
        Span::styled(
            format!("[{}]", app.prompt_config.openai_model_name),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    let dots = ellipsis(app.animation_frame);

    if app.search_task.is_some() {
        spans.push(Span::styled(
            format!(" 검색 중{dots} "),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    } else if app.analysis_task.is_some() {
        spans.push(Span::styled(
            format!(" 분석 중{dots} "),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }
    if app.is_generating() {
        spans.push(Span::styled(
            format!(" 글 생성 중{dots} "),
            Style::default().fg(Color::Black).bg(Color::Magenta),
        ));
    }

    if let Some(notice) = app.last_notice() {
        let (marker, color) = match notice.level {
            NoticeLevel::Info => ("✔", Color::Green),
            NoticeLevel::Warning => ("!", Color::Yellow),
            NoticeLevel::Error => ("✖", Color::Red),
        };
        spans.push(Span::styled(
            format!(" {marker} {}", notice.message),
            Style::default().fg(color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.screen {
        Screen::Generate => " GENERATE ",
        Screen::Settings => " SETTINGS ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(format!(" {key} "), key_style),
            Span::styled(format!(" {label} "), label_style),
        ]
    };

    let pairs: Vec<(&'static str, &'static str)> = if app.show_save_popup || app.show_custom_model_input {
        vec![("Enter", "confirm"), ("Esc", "cancel")]
    } else if app.show_model_picker {
        vec![("j/k", "nav"), ("Enter", "select"), ("Esc", "cancel")]
    } else {
        match (app.screen, app.input_mode) {
            (Screen::Generate, InputMode::Normal) => {
                let mut pairs = vec![
                    ("/", "keyword"),
                    ("+/-", "count"),
                    ("n", "manual title"),
                    ("Tab", "focus"),
                    ("j/k", "nav"),
                ];
                if app.focus == FocusPane::Suggestions {
                    pairs.push(("Enter", "write"));
                }
                if app.session.article().is_some() {
                    pairs.extend([("s", "save"), ("d", "delete")]);
                }
                pairs.extend([("2", "settings"), ("q", "quit")]);
                pairs
            }
            (Screen::Generate, InputMode::Editing) => {
                let action = if app.focus == FocusPane::Manual { "write" } else { "search" };
                vec![("Enter", action), ("Esc", "cancel")]
            }
            (Screen::Settings, InputMode::Normal) => vec![
                ("e", "edit"),
                ("s", "save"),
                ("r", "reset"),
                ("m", "model"),
                ("M", "custom model"),
                ("1", "generate"),
                ("q", "quit"),
            ],
            (Screen::Settings, InputMode::Editing) => vec![("Ctrl+S", "save"), ("Esc", "done")],
        }
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    for (key, label) in pairs {
        spans.extend(hint(key, label));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_generate_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(42), Constraint::Percentage(58)]).areas(area);

    let [keyword_area, posts_area, suggestions_area, manual_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(12),
        Constraint::Length(3),
    ])
    .areas(left);

    let [report_area, article_area] =
        Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(right);

    app.posts_area = Some(posts_area);
    app.suggestions_area = Some(suggestions_area);
    app.report_area = Some(report_area);
    app.article_area = Some(article_area);

    let count_label = format!(" 키워드 · 검색 수 {} ", app.display_count);
    render_input(app, frame, keyword_area, FocusPane::Keyword, count_label, &app.keyword_input);
    render_posts(app, frame, posts_area);
    render_suggestions(app, frame, suggestions_area);
    render_input(
        app,
        frame,
        manual_area,
        FocusPane::Manual,
        " 수동 제목으로 글 생성 ".to_string(),
        &app.manual_input,
    );
    render_report(app, frame, report_area);
    render_article(app, frame, article_area);
}

fn render_input(
    app: &App,
    frame: &mut Frame,
    area: Rect,
    pane: FocusPane,
    title: String,
    input: &TextInput,
) {
    let focused = app.focus == pane;
    let editing = focused && app.input_mode == InputMode::Editing && app.screen == Screen::Generate;

    let block = pane_block(title, focused, editing);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = if input.text.is_empty() && !editing {
        let placeholder = match pane {
            FocusPane::Keyword => "'/' 를 눌러 검색할 키워드 입력",
            _ => "'n' 을 눌러 원하는 제목 입력",
        };
        Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(input.text.as_str())
    };
    frame.render_widget(paragraph, inner);

    if editing && pane.is_input() {
        let x = cursor_offset(&input.text, input.cursor).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + x, inner.y));
    }
}

fn render_posts(app: &mut App, frame: &mut Frame, area: Rect) {
    let posts = app.session.posts();
    let title = if app.session.keyword().is_empty() {
        " 네이버 블로그 검색 결과 ".to_string()
    } else {
        format!(" '{}' 검색 결과 ({}) ", app.session.keyword(), posts.len())
    };
    let block = pane_block(title, app.focus == FocusPane::Posts, false);

    if posts.is_empty() {
        let message = if app.search_task.is_some() {
            format!("네이버 블로그 검색 중{}", ellipsis(app.animation_frame))
        } else {
            "검색 결과가 없습니다.".to_string()
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(
                    format!("{}. {}", i + 1, post.title),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("   {}", post.link),
                    Style::default().fg(Color::Blue),
                )),
                Line::from(Span::styled(
                    format!("   요약: {}", truncate_chars(&post.summary, SUMMARY_PREVIEW_CHARS)),
                    Style::default().fg(Color::DarkGray),
                )),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.posts_state);
}

fn render_suggestions(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = pane_block(
        " ✨ 새로운 제목 제안 (Enter: 글 생성) ",
        app.focus == FocusPane::Suggestions,
        false,
    );

    let suggestions = app.session.suggestions();
    if suggestions.is_empty() {
        let message = if app.analysis_task.is_some() {
            format!("AI가 새로운 제목을 만드는 중{}", ellipsis(app.animation_frame))
        } else {
            "제안된 제목이 없습니다.".to_string()
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|title| {
            if app.session.is_generated(title) {
                ListItem::new(Line::from(vec![
                    Span::styled("✔ ", Style::default().fg(Color::Green)),
                    Span::styled(title.clone(), Style::default().fg(Color::Green)),
                ]))
            } else {
                ListItem::new(Line::from(vec![Span::raw("  "), Span::raw(title.clone())]))
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.suggestions_state);
}

fn render_report(app: &App, frame: &mut Frame, area: Rect) {
    let title = if app.session.keyword().is_empty() {
        " 📊 제목 분석 ".to_string()
    } else {
        format!(" 📊 '{}' 키워드 분석 결과 ", app.session.keyword())
    };
    let block = pane_block(title, app.focus == FocusPane::Report, false);

    let lines: Vec<Line> = match app.session.report() {
        Some(report) => {
            let mut lines = Vec::new();
            for (heading, body) in report.sections() {
                lines.push(Line::from(Span::styled(
                    heading,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                lines.extend(body.lines().map(|l| Line::from(l.to_string())));
                lines.push(Line::default());
            }
            lines
        }
        None if app.is_searching() => vec![Line::from(Span::styled(
            format!("검색 결과를 분석하는 중{}", ellipsis(app.animation_frame)),
            Style::default().fg(Color::DarkGray),
        ))],
        None => vec![Line::from(Span::styled(
            "키워드를 입력하고 Enter를 누르면 분석 결과가 표시됩니다.",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.report_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_article(app: &App, frame: &mut Frame, area: Rect) {
    let title = match app.session.selected_title() {
        Some(selected) => format!(" ✍️ '{selected}' "),
        None => " 📰 생성된 블로그 글 ".to_string(),
    };
    let block = pane_block(title, app.focus == FocusPane::Article, false);

    let lines: Vec<Line> = if app.session.is_generation_pending() {
        vec![Line::from(Span::styled(
            format!("AI가 블로그 글을 작성하는 중{}", ellipsis(app.animation_frame)),
            Style::default().fg(Color::Magenta),
        ))]
    } else {
        match app.session.generated() {
            Some(GenerationResult::Article(text)) => text.lines().map(parse_markdown_line).collect(),
            Some(failed @ GenerationResult::Failed { .. }) => vec![Line::from(Span::styled(
                failed.text().to_string(),
                Style::default().fg(Color::Red),
            ))],
            None => vec![Line::from(Span::styled(
                "제안된 제목을 선택하거나 'n'으로 제목을 직접 입력하세요.",
                Style::default().fg(Color::DarkGray),
            ))],
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.article_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_settings_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [editor_area, info_area] =
        Layout::horizontal([Constraint::Percentage(68), Constraint::Percentage(32)]).areas(area);

    app.template_area = Some(editor_area);
    render_template_editor(app, frame, editor_area);
    render_settings_info(app, frame, info_area);
}

fn render_template_editor(app: &mut App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let block = pane_block(
        " AI 블로그 글 생성 지침 (프롬프트 템플릿) ",
        true,
        editing,
    );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let editor = &mut app.template_editor;
    if editing {
        editor.scroll_to_cursor(inner.height);
    }

    let lines: Vec<Line> = editor
        .lines()
        .iter()
        .map(|l| Line::from(l.clone()))
        .collect();
    let paragraph = Paragraph::new(lines).scroll((editor.scroll, 0));
    frame.render_widget(paragraph, inner);

    if editing {
        let line = editor.lines().get(editor.row).map_or("", String::as_str);
        let x = cursor_offset(line, editor.col).min(inner.width.saturating_sub(1));
        let y = (editor.row as u16).saturating_sub(editor.scroll);
        if y < inner.height {
            frame.set_cursor_position((inner.x + x, inner.y + y));
        }
    }
}

fn render_settings_info(app: &App, frame: &mut Frame, area: Rect) {
    let block = pane_block(" 설정 ", false, false);
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let configured = |set: bool| {
        if set {
            Span::styled("설정됨", Style::default().fg(Color::Green))
        } else {
            Span::styled("없음", Style::default().fg(Color::Red))
        }
    };

    let template_status = match template::validate(&app.template_editor.text()) {
        Ok(()) => Span::styled("사용 가능", Style::default().fg(Color::Green)),
        Err(e) => Span::styled(e.to_string(), Style::default().fg(Color::Yellow)),
    };
    let template_kind = if app.prompt_config.is_default_template() {
        "기본값"
    } else {
        "사용자 지정"
    };

    let lines = vec![
        Line::from(Span::styled("AI 모델", label)),
        Line::from(Span::styled(app.prompt_config.openai_model_name.clone(), value)),
        Line::default(),
        Line::from(Span::styled("저장된 지침", label)),
        Line::from(Span::styled(template_kind, value)),
        Line::default(),
        Line::from(Span::styled("템플릿 검사", label)),
        Line::from(template_status),
        Line::default(),
        Line::from(Span::styled(
            format!("{{{}}} 와 {{{}}} 는 자동으로 채워집니다.", template::KEYWORD, template::TARGET_AUDIENCE),
            label,
        )),
        Line::default(),
        Line::from(vec![Span::styled("네이버 API  ", label), configured(app.settings.has_search_credentials())]),
        Line::from(vec![Span::styled("OpenAI API  ", label), configured(app.text_generator.is_some())]),
        Line::default(),
        Line::from(Span::styled("설정 파일", label)),
        Line::from(app.config_store.path().display().to_string()),
        Line::from(Span::styled("저장 폴더", label)),
        Line::from(app.settings.output_dir.display().to_string()),
    ];

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_text_popup(frame: &mut Frame, area: Rect, title: &str, hint: &str, input: &TextInput) {
    let popup_area = centered_rect(area, 64, 7);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(title.to_string());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let hint_area = Rect::new(inner.x, inner.y, inner.width, 1);
    frame.render_widget(
        Paragraph::new(hint.to_string()).style(Style::default().fg(Color::DarkGray)),
        hint_area,
    );

    let input_area = Rect::new(inner.x, inner.y + 2, inner.width, 1);
    frame.render_widget(
        Paragraph::new(input.text.clone()).style(Style::default().fg(Color::Cyan)),
        input_area,
    );

    let x = cursor_offset(&input.text, input.cursor).min(input_area.width.saturating_sub(1));
    frame.set_cursor_position((input_area.x + x, input_area.y));

    let status = format!("{} columns", display_width(&input.text));
    let status_area = Rect::new(inner.x, inner.y + 4, inner.width, 1);
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        status_area,
    );
}

fn render_model_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(area, 40, app.available_models.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" AI 모델 선택 (Enter 선택, Esc 취소) ");

    let current = &app.prompt_config.openai_model_name;
    let items: Vec<ListItem> = app
        .available_models
        .iter()
        .map(|model| {
            let style = if model == current {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {} ", model)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup_area, &mut app.model_picker_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_markdown_heading_strips_hashes() {
        let line = parse_markdown_line("## **강남 맛집** 총정리");
        assert_eq!(plain(&line), "강남 맛집 총정리");
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_markdown_bold_spans() {
        let line = parse_markdown_line("오늘은 **숨은 맛집**을 소개합니다");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "숨은 맛집");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_markdown_unclosed_bold_is_literal() {
        let line = parse_markdown_line("가격 **미정");
        assert_eq!(plain(&line), "가격 **미정");
        assert!(parse_markdown_line("").spans.is_empty());
    }

    #[test]
    fn test_wide_characters_take_two_columns() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("강남 맛집"), 9);
        assert_eq!(cursor_offset("강남 맛집", 2), 4);

        assert_eq!(display_width("🚀맛집"), 6);
        assert_eq!(cursor_offset("🚀맛집", 1), 2);
        assert_eq!(display_width("🚀맛집"), Span::raw("🚀맛집").width() as u16);
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("가나다", 5), "가나다");
        assert_eq!(truncate_chars("가나다라", 2), "가나...");
    }

    #[test]
    fn test_centered_rect_fits_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(area, 64, 7);
        assert_eq!(popup, Rect::new(18, 16, 64, 7));

        let small = centered_rect(Rect::new(0, 0, 20, 5), 64, 7);
        assert!(small.width <= 16 && small.height <= 3);
    }
}
