use std::collections::HashMap;

use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::Config;
use crate::dictionary::Dictionary;
use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::parser::{TokenClass, classify_line};
use crate::translate::{AnnotatedLine, translate_line};

/// Diagnostic source name
pub const DIAGNOSTIC_SOURCE: &str = "nc-gloss";

/// Trait for handling hover requests
#[tower_lsp::async_trait]
pub trait HandleHover {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>>;
}

/// Trait for handling inlay hints
#[tower_lsp::async_trait]
pub trait HandleInlayHint {
    async fn handle_inlay_hint(&self, params: InlayHintParams) -> LspResult<Option<Vec<InlayHint>>>;
}

/// Trait for handling document symbols
#[tower_lsp::async_trait]
pub trait HandleDocumentSymbol {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    fn create_document_state(&self, content: String) -> DocumentState;
    async fn publish_diagnostics(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl HandleHover for Backend {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let tdpp = params.text_document_position_params;
        let uri = tdpp.text_document.uri;
        let line_idx = tdpp.position.line as usize;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let line = match doc_state.line(line_idx) {
            Some(line) => line,
            None => return Ok(None),
        };

        let dictionary = self.store.snapshot();
        let translation = translate_line(line, &dictionary, doc_state.model.as_deref());
        if translation.text.is_empty() {
            return Ok(None);
        }

        let mut hover_text = format!("`{}`\n\n{}", line.trim(), translation.text);
        if translation.has_unknown {
            hover_text.push_str("\n\n**Unknown:** ");
            hover_text.push_str(&translation.unknown_tokens.join(", "));
        }
        if let Some(model) = &doc_state.model {
            hover_text.push_str(&format!("\n\n_Model: {}_", model));
        }

        Ok(Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: hover_text,
            }),
            range: Some(line_range(line_idx, line)),
        }))
    }
}

#[tower_lsp::async_trait]
impl HandleInlayHint for Backend {
    async fn handle_inlay_hint(&self, params: InlayHintParams) -> LspResult<Option<Vec<InlayHint>>> {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&params.text_document.uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let lines = doc_state.annotate(&self.store.snapshot());
        let first = params.range.start.line as usize;
        let last = params.range.end.line as usize;

        let hints: Vec<InlayHint> = line_inlay_hints(&lines)
            .into_iter()
            .filter(|hint| (first..=last).contains(&(hint.position.line as usize)))
            .collect();

        Ok(Some(hints))
    }
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Create a new document state, resolving the model for its content
    fn create_document_state(&self, content: String) -> DocumentState {
        DocumentState::new(content, &self.store.snapshot(), &self.config)
    }

    /// Publish one warning per line with unknown tokens
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return,
        };

        let lines = doc_state.annotate(&self.store.snapshot());
        drop(docs);

        self.client
            .publish_diagnostics(uri, unknown_token_diagnostics(&lines), None)
            .await;
    }
}

#[tower_lsp::async_trait]
impl HandleDocumentSymbol for Backend {
    async fn handle_document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> LspResult<Option<DocumentSymbolResponse>> {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&params.text_document.uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let lines = doc_state.annotate(&self.store.snapshot());
        Ok(Some(DocumentSymbolResponse::Nested(label_symbols(&lines))))
    }
}

/// Range covering a whole line (UTF-16 columns)
fn line_range(line_idx: usize, line: &str) -> Range {
    Range::new(
        Position::new(line_idx as u32, 0),
        Position::new(line_idx as u32, line.encode_utf16().count() as u32),
    )
}

/// Warnings for lines that contain unknown tokens
pub fn unknown_token_diagnostics(lines: &[AnnotatedLine]) -> Vec<Diagnostic> {
    lines
        .iter()
        .filter(|line| line.has_unknown)
        .map(|line| {
            Diagnostic::new(
                line_range(line.line_number - 1, &line.source),
                Some(DiagnosticSeverity::WARNING),
                None,
                Some(DIAGNOSTIC_SOURCE.to_string()),
                format!("Unknown token(s): {}", line.unknown_tokens.join(", ")),
                None,
                None,
            )
        })
        .collect()
}

/// The gloss of each non-empty line, placed at the end of the line
pub fn line_inlay_hints(lines: &[AnnotatedLine]) -> Vec<InlayHint> {
    lines
        .iter()
        .filter(|line| !line.text.is_empty())
        .map(|line| InlayHint {
            position: line_range(line.line_number - 1, &line.source).end,
            label: InlayHintLabel::String(line.text.clone()),
            kind: None,
            text_edits: None,
            tooltip: None,
            padding_left: Some(true),
            padding_right: None,
            data: None,
        })
        .collect()
}

/// Re-resolve every open document against a reloaded dictionary
///
/// Returns the fresh diagnostics of each document, to be published.
pub fn refresh_documents(
    documents: &mut HashMap<Url, DocumentState>,
    dictionary: &Dictionary,
    config: &Config,
) -> Vec<(Url, Vec<Diagnostic>)> {
    documents
        .iter_mut()
        .map(|(uri, state)| {
            let content = std::mem::take(&mut state.content);
            *state = DocumentState::new(content, dictionary, config);
            let lines = state.annotate(dictionary);
            (uri.clone(), unknown_token_diagnostics(&lines))
        })
        .collect()
}

/// One symbol per line carrying a sequence label (N-code)
pub fn label_symbols(lines: &[AnnotatedLine]) -> Vec<DocumentSymbol> {
    let mut symbols = Vec::new();

    for line in lines {
        let label = classify_line(&line.source)
            .into_iter()
            .find_map(|(_, class)| match class {
                TokenClass::Label(label) => Some(label),
                _ => None,
            });

        if let Some(label) = label {
            let range = line_range(line.line_number - 1, &line.source);
            symbols.push(DocumentSymbol {
                name: label,
                detail: Some(line.text.clone()),
                kind: SymbolKind::KEY,
                tags: None,
                #[allow(deprecated)]
                deprecated: Some(false), // Required by tower-lsp 0.20
                range,
                selection_range: range,
                children: None,
            });
        }
    }

    symbols
}
