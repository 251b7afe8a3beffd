//! Exam configuration model.
//!
//! The configuration is a single immutable value replaced wholesale on
//! every edit. [`ConfigStore`] is a small reducer with one action per
//! field; the numeric clamps live at this write boundary so an invalid
//! count can never be stored.

use serde::{Deserialize, Serialize};

/// Upper bound on multiple-choice questions per exam.
pub const MAX_MULTIPLE_CHOICE: u32 = 50;
/// Upper bound on essay questions per exam.
pub const MAX_ESSAY: u32 = 10;

/// Output language of the generated exam.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Vi,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
        }
    }

    /// Parse a language code; anything other than "en" falls back to vi.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            _ => Language::Vi,
        }
    }
}

/// Difficulty level of the exam.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Localized label interpolated into the prompt.
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (Difficulty::Easy, Language::Vi) => "Dễ",
            (Difficulty::Medium, Language::Vi) => "Trung bình",
            (Difficulty::Hard, Language::Vi) => "Khó",
            (Difficulty::Easy, Language::En) => "easy",
            (Difficulty::Medium, Language::En) => "medium",
            (Difficulty::Hard, Language::En) => "hard",
        }
    }
}

/// The full exam request configuration.
///
/// Invariants: `num_multiple_choice ∈ [0, 50]`, `num_essay ∈ [0, 10]`.
/// Both are enforced by [`ConfigStore::apply`]; constructing the struct
/// directly bypasses the clamp and is reserved for tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamConfig {
    /// Exam topic; may be empty when attachments supply the content
    pub topic: String,
    /// Grade label, "1" through "12"
    pub grade: String,
    pub difficulty: Difficulty,
    pub num_multiple_choice: u32,
    pub num_essay: u32,
    /// Generate TikZ figures instead of placeholder images
    pub use_tikz: bool,
    /// Vary numeric data instead of preserving source values
    pub vary_data: bool,
    pub language: Language,
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            topic: String::new(),
            grade: "6".to_string(),
            difficulty: Difficulty::default(),
            num_multiple_choice: 10,
            num_essay: 2,
            use_tikz: false,
            vary_data: false,
            language: Language::default(),
        }
    }
}

/// One edit action per configuration field.
///
/// Count actions carry the raw user text; parsing and clamping happen in
/// the reducer so a non-numeric entry resolves to `0`, never to an
/// out-of-range or stale value.
#[derive(Clone, Debug)]
pub enum ConfigAction {
    SetTopic(String),
    SetGrade(String),
    SetDifficulty(Difficulty),
    SetMultipleChoiceCount(String),
    SetEssayCount(String),
    SetUseTikz(bool),
    SetVaryData(bool),
    SetLanguage(Language),
}

/// Holds the current exam configuration for the session.
#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
    current: ExamConfig,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current configuration value.
    pub fn get(&self) -> &ExamConfig {
        &self.current
    }

    /// Apply one edit, replacing the stored value wholesale.
    pub fn apply(&mut self, action: ConfigAction) {
        let mut next = self.current.clone();
        match action {
            ConfigAction::SetTopic(topic) => next.topic = topic,
            ConfigAction::SetGrade(grade) => next.grade = grade,
            ConfigAction::SetDifficulty(difficulty) => next.difficulty = difficulty,
            ConfigAction::SetMultipleChoiceCount(raw) => {
                next.num_multiple_choice = clamp_count(&raw, MAX_MULTIPLE_CHOICE);
            }
            ConfigAction::SetEssayCount(raw) => {
                next.num_essay = clamp_count(&raw, MAX_ESSAY);
            }
            ConfigAction::SetUseTikz(flag) => next.use_tikz = flag,
            ConfigAction::SetVaryData(flag) => next.vary_data = flag,
            ConfigAction::SetLanguage(language) => next.language = language,
        }
        self.current = next;
    }
}

/// Parse a user-entered count; non-numeric input resolves to 0.
fn clamp_count(raw: &str, max: u32) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0).min(max)
}
