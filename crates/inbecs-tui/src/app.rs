use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::task::JoinHandle;

use inbecs_core::generator::API_FAILURE_MESSAGE;
use inbecs_core::search::{clamp_display, MAX_DISPLAY, MIN_DISPLAY};
use inbecs_core::{
    analyze, save_markdown, template, ConfigStore, ContentError, ContentGenerator,
    GenerationError, GenerationResult, Notice, NoticeLevel, OpenAIClient, Post, PromptConfig, SearchCache,
    SearchClient, SearchError, Session, Settings, TextGenerator, TitleAnalysis,
};

/// Notices kept for the status line history.
const NOTICE_HISTORY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Generate,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Keyword,
    Manual,
    Posts,
    Suggestions,
    Report,
    Article,
}

impl FocusPane {
    pub fn next(self) -> Self {
        match self {
            FocusPane::Keyword => FocusPane::Posts,
            FocusPane::Posts => FocusPane::Report,
            FocusPane::Report => FocusPane::Suggestions,
            FocusPane::Suggestions => FocusPane::Manual,
            FocusPane::Manual => FocusPane::Article,
            FocusPane::Article => FocusPane::Keyword,
        }
    }

    pub fn is_input(self) -> bool {
        matches!(self, FocusPane::Keyword | FocusPane::Manual)
    }
}

/// Convert a character index to a byte index for UTF-8 safe string operations
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Single-line text field with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let byte_pos = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_pos);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// Multi-line editor for the prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEditor {
    lines: Vec<String>,
    pub row: usize,
    /// Character column within `row`.
    pub col: usize,
    pub scroll: u16,
}

impl TemplateEditor {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            row: 0,
            col: 0,
            scroll: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    pub fn insert(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        let byte_pos = char_to_byte_index(line, self.col);
        line.insert(byte_pos, c);
        self.col += 1;
    }

    pub fn newline(&mut self) {
        let line = &mut self.lines[self.row];
        let byte_pos = char_to_byte_index(line, self.col);
        let rest = line.split_off(byte_pos);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    /// Delete before the cursor, joining with the previous line at column 0.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let line = &mut self.lines[self.row];
            let byte_pos = char_to_byte_index(line, self.col);
            line.remove(byte_pos);
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&current);
        }
    }

    pub fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let line = &mut self.lines[self.row];
            let byte_pos = char_to_byte_index(line, self.col);
            line.remove(byte_pos);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    pub fn left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn home(&mut self) {
        self.col = 0;
    }

    pub fn end(&mut self) {
        self.col = self.line_len(self.row);
    }

    /// Keep the cursor row inside a viewport of `height` rows.
    pub fn scroll_to_cursor(&mut self, height: u16) {
        let height = height.max(1) as usize;
        let scroll = self.scroll as usize;
        if self.row < scroll {
            self.scroll = self.row as u16;
        } else if self.row >= scroll + height {
            self.scroll = (self.row + 1 - height) as u16;
        }
    }
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub focus: FocusPane,
    pub session: Session,

    // Generate screen
    pub keyword_input: TextInput,
    pub manual_input: TextInput,
    pub display_count: u32,
    pub posts_state: ListState,
    pub suggestions_state: ListState,
    pub report_scroll: u16,
    pub article_scroll: u16,

    // Settings screen
    pub template_editor: TemplateEditor,

    // Status line history
    pub notices: Vec<Notice>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Save popup state
    pub show_save_popup: bool,
    pub save_input: TextInput,

    // Model picker state
    pub show_model_picker: bool,
    pub available_models: Vec<String>,
    pub model_picker_state: ListState,

    // Custom model input state
    pub show_custom_model_input: bool,
    pub custom_model_input: TextInput,

    // Panel areas for mouse hit-testing (updated during render)
    pub posts_area: Option<Rect>,
    pub suggestions_area: Option<Rect>,
    pub report_area: Option<Rect>,
    pub article_area: Option<Rect>,
    pub template_area: Option<Rect>,

    // Services
    pub settings: Settings,
    pub config_store: ConfigStore,
    pub prompt_config: PromptConfig,
    pub search_client: SearchClient,
    pub search_cache: SearchCache,
    pub text_generator: Option<Arc<dyn TextGenerator>>,
    pub content_generator: ContentGenerator,

    // Background work
    pub search_task: Option<JoinHandle<Result<Vec<Post>, SearchError>>>,
    pub analysis_task: Option<JoinHandle<TitleAnalysis>>,
    pub generation_task: Option<JoinHandle<Result<GenerationResult, ContentError>>>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let mut session = Session::new();

        let config_store = match &settings.config_path {
            Some(path) => ConfigStore::at(path),
            None => ConfigStore::new().unwrap_or_else(|e| {
                tracing::warn!("{}; keeping prompt config in the working directory", e);
                ConfigStore::at("prompt_config.json")
            }),
        };
        let (prompt_config, load_error) = config_store.load_or_default();
        if let Some(e) = load_error {
            session.push_notice(
                NoticeLevel::Warning,
                format!("설정 파일을 불러오지 못해 기본값을 사용합니다: {e}"),
            );
        }

        let search_client = SearchClient::with_options(
            settings.naver_client_id.clone(),
            settings.naver_client_secret.clone(),
            &settings.naver_search_url,
            settings.http_timeout,
        );
        if !settings.has_search_credentials() {
            session.push_notice(
                NoticeLevel::Warning,
                "네이버 API 키가 설정되지 않았습니다. NAVER_CLIENT_ID와 NAVER_CLIENT_SECRET을 확인해주세요.",
            );
        }

        let text_generator: Option<Arc<dyn TextGenerator>> =
            settings.openai_api_key.as_deref().map(|key| {
                Arc::new(OpenAIClient::with_options(
                    key,
                    &settings.openai_base_url,
                    settings.http_timeout,
                )) as Arc<dyn TextGenerator>
            });
        let content_generator = ContentGenerator::new(text_generator.clone());

        let template_editor = TemplateEditor::new(&prompt_config.prompt_template);
        let display_count = session.display_count();

        Self {
            should_quit: false,
            screen: Screen::Generate,
            input_mode: InputMode::Normal,
            focus: FocusPane::Keyword,
            session,

            keyword_input: TextInput::default(),
            manual_input: TextInput::default(),
            display_count,
            posts_state: ListState::default(),
            suggestions_state: ListState::default(),
            report_scroll: 0,
            article_scroll: 0,

            template_editor,

            notices: Vec::new(),
            animation_frame: 0,

            show_save_popup: false,
            save_input: TextInput::default(),

            show_model_picker: false,
            available_models: Vec::new(),
            model_picker_state: ListState::default(),

            show_custom_model_input: false,
            custom_model_input: TextInput::default(),

            posts_area: None,
            suggestions_area: None,
            report_area: None,
            article_area: None,
            template_area: None,

            settings,
            config_store,
            prompt_config,
            search_client,
            search_cache: SearchCache::default(),
            text_generator,
            content_generator,

            search_task: None,
            analysis_task: None,
            generation_task: None,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.search_task.is_some() || self.analysis_task.is_some()
    }

    pub fn is_generating(&self) -> bool {
        self.generation_task.is_some()
    }

    /// Move session notices into the status history.
    pub fn drain_notices(&mut self) {
        self.notices.extend(self.session.take_notices());
        if self.notices.len() > NOTICE_HISTORY {
            let excess = self.notices.len() - NOTICE_HISTORY;
            self.notices.drain(..excess);
        }
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    // Search and analysis

    pub fn adjust_display_count(&mut self, delta: i64) {
        let next = (self.display_count as i64 + delta).clamp(MIN_DISPLAY as i64, MAX_DISPLAY as i64);
        self.display_count = clamp_display(next as u32);
    }

    /// Validate the keyword and start a search, answering from the cache when possible.
    ///
    /// Refused while an article is being written, since a new search resets the selected title.
    pub fn start_search(&mut self) {
        if self.is_searching() {
            self.session
                .push_notice(NoticeLevel::Warning, "이미 검색이 진행 중입니다.");
            return;
        }
        if self.refuse_if_generating() {
            return;
        }

        let Ok(request) = self
            .session
            .begin_search(&self.keyword_input.text, self.display_count)
        else {
            return;
        };

        self.display_count = request.count;
        self.posts_state.select(None);
        self.suggestions_state.select(None);
        self.report_scroll = 0;
        self.article_scroll = 0;

        if let Some(posts) = self.search_cache.get(&request.keyword, request.count) {
            tracing::debug!("Cache hit for {:?} ({})", request.keyword, request.count);
            let posts = posts.to_vec();
            self.show_search_results(Ok(posts));
            return;
        }

        tracing::info!("Searching {:?} ({} posts)", request.keyword, request.count);
        let client = self.search_client.clone();
        self.search_task = Some(tokio::spawn(async move {
            client.search(&request.keyword, request.count).await
        }));
    }

    /// Cache a network result under the request that produced it, then show it.
    fn finish_search(&mut self, result: Result<Vec<Post>, SearchError>) {
        if let Ok(posts) = &result {
            if !posts.is_empty() {
                self.search_cache.insert(
                    self.session.keyword(),
                    self.session.display_count(),
                    posts.clone(),
                );
            }
        }
        self.show_search_results(result);
    }

    fn show_search_results(&mut self, result: Result<Vec<Post>, SearchError>) {
        let titles = self.session.finish_search(result);
        if !titles.is_empty() {
            self.posts_state.select(Some(0));
        }
        self.spawn_analysis(titles);
    }

    fn spawn_analysis(&mut self, titles: Vec<String>) {
        let generator = self.text_generator.clone();
        let model = self.prompt_config.openai_model_name.clone();
        self.analysis_task = Some(tokio::spawn(async move {
            analyze(&titles, generator.as_deref(), &model).await
        }));
    }

    // Generation

    pub fn generate_selected_suggestion(&mut self) {
        if self.refuse_if_generating() {
            return;
        }
        let Some(index) = self.suggestions_state.selected() else {
            return;
        };
        if let Some(title) = self.session.select_suggestion(index) {
            self.spawn_generation(title);
        }
    }

    pub fn generate_manual_title(&mut self) {
        if self.refuse_if_generating() {
            return;
        }
        if let Ok(title) = self.session.select_manual(&self.manual_input.text) {
            self.manual_input.clear();
            self.spawn_generation(title);
        }
    }

    fn refuse_if_generating(&mut self) -> bool {
        if self.is_generating() {
            self.session
                .push_notice(NoticeLevel::Warning, "이미 블로그 글을 생성하는 중입니다.");
        }
        self.is_generating()
    }

    fn spawn_generation(&mut self, title: String) {
        let generator = self.content_generator.clone();
        let config = self.prompt_config.clone();
        let stats = self.session.stats().cloned();
        self.article_scroll = 0;
        self.generation_task = Some(tokio::spawn(async move {
            generator.generate(&title, stats.as_ref(), &config).await
        }));
    }

    /// Collect finished background tasks.
    pub async fn poll_tasks(&mut self) {
        if self.search_task.as_ref().is_some_and(|t| t.is_finished()) {
            if let Some(task) = self.search_task.take() {
                match task.await {
                    Ok(result) => self.finish_search(result),
                    Err(e) => {
                        tracing::error!("Search task failed: {}", e);
                        self.session
                            .push_notice(NoticeLevel::Error, format!("검색 작업이 중단되었습니다: {e}"));
                    }
                }
            }
        }

        if self.analysis_task.as_ref().is_some_and(|t| t.is_finished()) {
            if let Some(task) = self.analysis_task.take() {
                match task.await {
                    Ok(analysis) => {
                        let has_suggestions = !analysis.suggestions.is_empty();
                        self.session.finish_analysis(analysis);
                        self.suggestions_state
                            .select(if has_suggestions { Some(0) } else { None });
                    }
                    Err(e) => {
                        tracing::error!("Analysis task failed: {}", e);
                        self.session
                            .push_notice(NoticeLevel::Error, format!("제목 분석 작업이 중단되었습니다: {e}"));
                    }
                }
            }
        }

        if self.generation_task.as_ref().is_some_and(|t| t.is_finished()) {
            if let Some(task) = self.generation_task.take() {
                match task.await {
                    Ok(result) => self.session.finish_generation(result),
                    Err(e) => {
                        tracing::error!("Generation task failed: {}", e);
                        self.session.finish_generation(Ok(GenerationResult::Failed {
                            message: API_FAILURE_MESSAGE.to_string(),
                            cause: GenerationError::Interrupted(e.to_string()),
                        }));
                    }
                }
            }
        }

        self.drain_notices();
    }

    // Save / delete

    pub fn open_save_popup(&mut self) {
        if self.session.article().is_none() {
            self.session
                .push_notice(NoticeLevel::Warning, "저장할 블로그 글이 없습니다.");
            return;
        }
        self.save_input = TextInput::with_text(self.session.download_filename());
        self.show_save_popup = true;
    }

    pub fn save_article(&mut self) {
        self.show_save_popup = false;
        let Some(article) = self.session.article() else {
            return;
        };

        match save_markdown(&self.settings.output_dir, &self.save_input.text, article) {
            Ok(path) => self.session.push_notice(
                NoticeLevel::Info,
                format!("블로그 글을 저장했습니다: {}", path.display()),
            ),
            Err(e) => {
                tracing::error!("Saving article failed: {}", e);
                self.session
                    .push_notice(NoticeLevel::Error, format!("파일 저장 중 오류 발생: {e}"));
            }
        }
    }

    pub fn delete_article(&mut self) {
        self.session.clear_generated();
        self.article_scroll = 0;
    }

    // Settings

    /// Persist the edited template. Placeholder problems are reported but do not block saving.
    pub fn save_template(&mut self) {
        let text = self.template_editor.text();
        if let Err(e) = template::validate(&text) {
            self.session.push_notice(
                NoticeLevel::Warning,
                format!("템플릿 경고: {e} 글 생성 전에 수정해주세요."),
            );
        }

        match self.config_store.save_template(&mut self.prompt_config, &text) {
            Ok(()) => self
                .session
                .push_notice(NoticeLevel::Info, "새로운 지침이 저장되었습니다!"),
            Err(e) => self
                .session
                .push_notice(NoticeLevel::Error, format!("설정 저장 중 오류 발생: {e}")),
        }
    }

    pub fn reset_template(&mut self) {
        match self.config_store.reset_template(&mut self.prompt_config) {
            Ok(()) => {
                self.template_editor = TemplateEditor::new(&self.prompt_config.prompt_template);
                self.session
                    .push_notice(NoticeLevel::Info, "지침이 기본값으로 복원되었습니다!");
            }
            Err(e) => self
                .session
                .push_notice(NoticeLevel::Error, format!("설정 저장 중 오류 발생: {e}")),
        }
    }

    pub fn open_model_picker(&mut self) {
        self.available_models = OpenAIClient::list_models();
        let current = self
            .available_models
            .iter()
            .position(|m| *m == self.prompt_config.openai_model_name)
            .unwrap_or(0);
        self.model_picker_state.select(Some(current));
        self.show_model_picker = true;
    }

    pub fn model_picker_nav_down(&mut self) {
        let len = self.available_models.len();
        if len > 0 {
            let i = self.model_picker_state.selected().unwrap_or(0);
            self.model_picker_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn model_picker_nav_up(&mut self) {
        let i = self.model_picker_state.selected().unwrap_or(0);
        self.model_picker_state.select(Some(i.saturating_sub(1)));
    }

    pub fn select_model(&mut self) {
        self.show_model_picker = false;
        let Some(model) = self
            .model_picker_state
            .selected()
            .and_then(|i| self.available_models.get(i))
            .cloned()
        else {
            return;
        };
        self.set_model(&model);
    }

    pub fn open_custom_model_input(&mut self) {
        self.custom_model_input = TextInput::default();
        self.show_custom_model_input = true;
    }

    pub fn submit_custom_model(&mut self) {
        let model = self.custom_model_input.text.trim().to_string();
        if model.is_empty() {
            self.session
                .push_notice(NoticeLevel::Warning, "모델 이름을 입력해주세요.");
            return;
        }
        self.show_custom_model_input = false;
        self.set_model(&model);
    }

    fn set_model(&mut self, model: &str) {
        match self.config_store.save_model(&mut self.prompt_config, model) {
            Ok(()) => {
                tracing::info!("Model set to {}", model);
                self.session.push_notice(
                    NoticeLevel::Info,
                    format!("AI 모델이 '{}'으로 설정되었습니다!", self.prompt_config.openai_model_name),
                );
            }
            Err(e) => self
                .session
                .push_notice(NoticeLevel::Error, format!("설정 저장 중 오류 발생: {e}")),
        }
    }

    // List navigation and scrolling

    pub fn posts_nav_down(&mut self) {
        let len = self.session.posts().len();
        if len > 0 {
            let i = self.posts_state.selected().unwrap_or(0);
            self.posts_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn posts_nav_up(&mut self) {
        let i = self.posts_state.selected().unwrap_or(0);
        self.posts_state.select(Some(i.saturating_sub(1)));
    }

    pub fn suggestions_nav_down(&mut self) {
        let len = self.session.suggestions().len();
        if len > 0 {
            let i = self.suggestions_state.selected().unwrap_or(0);
            self.suggestions_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn suggestions_nav_up(&mut self) {
        let i = self.suggestions_state.selected().unwrap_or(0);
        self.suggestions_state.select(Some(i.saturating_sub(1)));
    }

    /// Move down in whichever pane has focus.
    pub fn focused_down(&mut self, step: u16) {
        match self.focus {
            FocusPane::Posts => self.posts_nav_down(),
            FocusPane::Suggestions => self.suggestions_nav_down(),
            FocusPane::Report => self.report_scroll = self.report_scroll.saturating_add(step),
            FocusPane::Article => self.article_scroll = self.article_scroll.saturating_add(step),
            FocusPane::Keyword | FocusPane::Manual => {}
        }
    }

    pub fn focused_up(&mut self, step: u16) {
        match self.focus {
            FocusPane::Posts => self.posts_nav_up(),
            FocusPane::Suggestions => self.suggestions_nav_up(),
            FocusPane::Report => self.report_scroll = self.report_scroll.saturating_sub(step),
            FocusPane::Article => self.article_scroll = self.article_scroll.saturating_sub(step),
            FocusPane::Keyword | FocusPane::Manual => {}
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_searching() || self.is_generating() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}
