//! Terminal rendering of assistant answers.
//!
//! Answers come back as markdown-ish prose; `AnswerRenderer` formats them
//! through termimad. Confidence scores are rendered as a percentage with
//! one decimal, matching how the score is displayed everywhere else.

use termimad::MadSkin;

/// Terminal markdown renderer for assistant answers.
pub struct AnswerRenderer {
    skin: MadSkin,
}

impl AnswerRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    /// Render an answer as formatted terminal text.
    pub fn render(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }
}

impl Default for AnswerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a confidence score for display, e.g. `Confidence: 87.0%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("Confidence: {:.1}%", confidence * 100.0)
}
