//! Input/render controller
//!
//! Owns the text the user typed and the symbol currently on screen. The
//! toolkit forwards text edits to [`RenderController::on_text_changed`] and
//! button clicks to [`RenderController::on_save_clicked`]; everything else
//! about the display is derived from [`RenderController::display`].

use crate::error::{Error, SaveError};
use crate::export::{PathPrompt, SaveOutcome, SymbolExporter, save_notice};
use crate::notify::{Notice, Notifier};
use crate::qr::{QrEncoder, RenderedSymbol};

/// What the preview area shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    /// No symbol yet ("Your QR Code will appear here")
    #[default]
    Placeholder,
    /// Symbol for the current text
    ShowingSymbol(RenderedSymbol),
}

impl DisplayState {
    /// Symbol on display, if any
    pub fn symbol(&self) -> Option<&RenderedSymbol> {
        match self {
            DisplayState::Placeholder => None,
            DisplayState::ShowingSymbol(symbol) => Some(symbol),
        }
    }

    /// Whether the placeholder is showing
    pub fn is_placeholder(&self) -> bool {
        matches!(self, DisplayState::Placeholder)
    }
}

/// Result of handling one text change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextChangeOutcome {
    /// Text became empty; placeholder shown
    Cleared,
    /// New symbol rendered and shown
    Rendered,
    /// Display already matched the text
    Unchanged,
    /// Encoding failed; previous display kept
    Failed(String),
}

/// Keeps the preview in step with the text input
#[derive(Debug)]
pub struct RenderController<N> {
    text: String,
    display: DisplayState,
    revision: u64,
    encoder: QrEncoder,
    notifier: N,
}

impl<N: Notifier> RenderController<N> {
    /// Create a controller in the placeholder state
    pub fn new(encoder: QrEncoder, notifier: N) -> Self {
        Self {
            text: String::new(),
            display: DisplayState::Placeholder,
            revision: 0,
            encoder,
            notifier,
        }
    }

    /// Regenerate the preview for `new_text`.
    ///
    /// Empty text resets to the placeholder without encoding. On encoding
    /// failure the display is left untouched and an error notice goes to the
    /// notifier.
    pub fn on_text_changed(&mut self, new_text: &str) -> TextChangeOutcome {
        if self.text != new_text {
            self.text = new_text.to_string();
        }

        if new_text.is_empty() {
            self.notifier.dismiss();
            if self.display.is_placeholder() {
                return TextChangeOutcome::Unchanged;
            }
            self.transition(DisplayState::Placeholder);
            return TextChangeOutcome::Cleared;
        }

        if self.display.symbol().map(RenderedSymbol::text) == Some(new_text) {
            // Back to the text on screen; any earlier failure no longer applies.
            self.notifier.dismiss();
            return TextChangeOutcome::Unchanged;
        }

        match self.encoder.encode_text(new_text) {
            Ok(symbol) => {
                self.notifier.dismiss();
                self.transition(DisplayState::ShowingSymbol(symbol));
                TextChangeOutcome::Rendered
            }
            Err(e) => {
                tracing::warn!(bytes = new_text.len(), "Could not generate QR code: {e}");
                let reason = match e {
                    Error::QrEncode(msg) => msg,
                    other => other.to_string(),
                };
                let message = format!("Could not generate QR code: {reason}");
                self.notifier.notify(Notice::error(message.clone()));
                TextChangeOutcome::Failed(message)
            }
        }
    }

    /// Save the current text through `exporter`, asking `prompt` for a path
    /// only when there is something to save, and report the result to
    /// `dialogs`.
    pub fn on_save_clicked<P, D>(
        &self,
        exporter: &SymbolExporter,
        prompt: &mut P,
        dialogs: &mut D,
    ) -> Result<SaveOutcome, SaveError>
    where
        P: PathPrompt + ?Sized,
        D: Notifier + ?Sized,
    {
        let result = exporter.save_with_prompt(&self.text, prompt);
        if let Some(notice) = save_notice(&result) {
            dialogs.notify(notice);
        }
        result
    }

    fn transition(&mut self, next: DisplayState) {
        // Replacing the state drops the previous symbol.
        self.display = next;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Current input text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Counter bumped on every display transition
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Non-blocking notifier used for display-time problems
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the notifier, e.g. to dismiss a banner
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeLevel;

    fn controller() -> RenderController<Vec<Notice>> {
        RenderController::new(QrEncoder::new(), Vec::new())
    }

    #[test]
    fn test_starts_as_placeholder() {
        let ctl = controller();
        assert!(ctl.display().is_placeholder());
        assert_eq!(ctl.text(), "");
        assert_eq!(ctl.revision(), 0);
    }

    #[test]
    fn test_text_renders_symbol() {
        let mut ctl = controller();
        assert_eq!(
            ctl.on_text_changed("https://example.com"),
            TextChangeOutcome::Rendered
        );
        let symbol = ctl.display().symbol().unwrap();
        assert_eq!(symbol.text(), "https://example.com");
        assert_eq!(ctl.revision(), 1);
    }

    #[test]
    fn test_empty_text_resets() {
        let mut ctl = controller();
        ctl.on_text_changed("abc");
        assert_eq!(ctl.on_text_changed(""), TextChangeOutcome::Cleared);
        assert!(ctl.display().is_placeholder());
        assert_eq!(ctl.on_text_changed(""), TextChangeOutcome::Unchanged);
    }

    #[test]
    fn test_repeated_text_is_not_reencoded() {
        let mut ctl = controller();
        ctl.on_text_changed("same");
        let revision = ctl.revision();
        assert_eq!(ctl.on_text_changed("same"), TextChangeOutcome::Unchanged);
        assert_eq!(ctl.revision(), revision);
    }

    #[test]
    fn test_failure_keeps_previous_display() {
        let mut ctl = controller();
        ctl.on_text_changed("https://example.com");
        let before = ctl.display().clone();
        let revision = ctl.revision();

        let too_long = "x".repeat(4000);
        let outcome = ctl.on_text_changed(&too_long);

        assert!(matches!(outcome, TextChangeOutcome::Failed(_)));
        assert_eq!(ctl.display(), &before);
        assert_eq!(ctl.revision(), revision);
        assert_eq!(ctl.text(), too_long);
        assert_eq!(ctl.notifier().len(), 1);
        assert_eq!(ctl.notifier()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_failure_message_is_not_double_prefixed() {
        let mut ctl = controller();
        let outcome = ctl.on_text_changed(&"x".repeat(4000));

        let TextChangeOutcome::Failed(message) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert!(message.starts_with("Could not generate QR code: "));
        assert!(!message.contains("Failed to encode"));
        assert_eq!(ctl.notifier()[0].message, message);
    }

    #[test]
    fn test_failure_from_placeholder_stays_placeholder() {
        let mut ctl = controller();
        ctl.on_text_changed(&"x".repeat(4000));
        assert!(ctl.display().is_placeholder());
    }

    #[test]
    fn test_save_click_with_empty_text() {
        let ctl = controller();
        let exporter = SymbolExporter::default();
        let mut dialogs: Vec<Notice> = Vec::new();
        let mut prompt = || -> Option<std::path::PathBuf> { panic!("must not prompt") };

        let result = ctl.on_save_clicked(&exporter, &mut prompt, &mut dialogs);

        assert_eq!(result, Err(SaveError::EmptyInput));
        assert_eq!(dialogs.len(), 1);
        assert_eq!(dialogs[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn test_save_click_cancelled_is_silent() {
        let mut ctl = controller();
        ctl.on_text_changed("https://example.com");
        let exporter = SymbolExporter::default();
        let mut dialogs: Vec<Notice> = Vec::new();
        let mut prompt = || -> Option<std::path::PathBuf> { None };

        let result = ctl.on_save_clicked(&exporter, &mut prompt, &mut dialogs);

        assert_eq!(result, Ok(SaveOutcome::Cancelled));
        assert!(dialogs.is_empty());
    }
}
