use crate::Config;
use crate::dictionary::Dictionary;
use crate::translate::{AnnotatedLine, translate_document};

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
    /// Resolved from CLI, modeline or project config
    pub model: Option<String>,
}

impl DocumentState {
    /// Resolve the model from the document's modeline and the configuration
    pub fn new(content: String, dictionary: &Dictionary, config: &Config) -> Self {
        let model = config.resolve_model(dictionary.detect_modeline_model(&content));
        Self { content, model }
    }

    /// Line text by 0-based index, without its line terminator
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.content
            .split('\n')
            .nth(idx)
            .map(|line| line.trim_end_matches('\r'))
    }

    /// Translate every line against a dictionary snapshot
    pub fn annotate(&self, dictionary: &Dictionary) -> Vec<AnnotatedLine> {
        translate_document(&self.content, dictionary, self.model.as_deref())
    }
}
