pub mod ai;
pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod search;
pub mod settings;
pub mod state;
pub mod template;

// Re-export main types for convenience
pub use ai::{ChatMessage, ChatRequest, OpenAIClient, TextGenerator};
pub use analysis::{analyze, AnalysisReport, TitleAnalysis, TitleStats};
pub use config::{ConfigStore, PromptConfig};
pub use error::{
    ConfigError, ContentError, ExportError, GenerationError, InputError, SearchError,
    TemplateError,
};
pub use export::{default_filename, save_markdown};
pub use generator::{ContentGenerator, GenerationResult};
pub use search::{Post, SearchCache, SearchClient};
pub use settings::Settings;
pub use state::{Notice, NoticeLevel, SearchRequest, Session};
