use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::Config;
use crate::dictionary::{DictionaryStore, DictionaryWatcher};
use crate::lsp::document::DocumentState;
use crate::lsp::handlers::{
    HandleDiagnostics, HandleDocumentSymbol, HandleHover, HandleInlayHint, refresh_documents,
};

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub client: Client,
    pub store: DictionaryStore,
    pub documents: Arc<Mutex<HashMap<Url, DocumentState>>>,
    pub config: Config,
    watcher: Mutex<Option<DictionaryWatcher>>,
}

impl Backend {
    pub fn new(client: Client, config: Config, store: DictionaryStore) -> Self {
        Self {
            client,
            store,
            documents: Arc::new(Mutex::new(HashMap::new())),
            config,
            watcher: Mutex::new(None),
        }
    }

    /// Start hot reload of the configured dictionary directories
    async fn start_dictionary_watcher(&self) {
        match DictionaryWatcher::spawn(
            self.store.clone(),
            &self.config.dictionary_dirs,
            Some(self.client.clone()),
        ) {
            Ok(watcher) => {
                log::info!(
                    "Watching {} dictionary director(ies)",
                    watcher.watched_dirs().len()
                );
                self.spawn_reload_refresh(&watcher);
                *self.watcher.lock().await = Some(watcher);
            }
            Err(e) => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Dictionary hot reload disabled: {}", e),
                    )
                    .await;
            }
        }
    }

    /// Re-publish diagnostics of open documents after every dictionary reload
    fn spawn_reload_refresh(&self, watcher: &DictionaryWatcher) {
        let mut reloads = watcher.subscribe();
        let client = self.client.clone();
        let store = self.store.clone();
        let documents = Arc::clone(&self.documents);
        let config = self.config.clone();

        tokio::spawn(async move {
            while reloads.changed().await.is_ok() {
                let dictionary = store.snapshot();
                let refreshed = refresh_documents(&mut *documents.lock().await, &dictionary, &config);

                for (uri, diagnostics) in refreshed {
                    client.publish_diagnostics(uri, diagnostics, None).await;
                }
            }
        });
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                document_symbol_provider: Some(OneOf::Left(true)),
                inlay_hint_provider: Some(OneOf::Left(true)),
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "nc-gloss".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "nc-gloss initialized")
            .await;

        self.start_dictionary_watcher().await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn hover(&self, params: HoverParams) -> tower_lsp::jsonrpc::Result<Option<Hover>> {
        self.handle_hover(params).await
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> tower_lsp::jsonrpc::Result<Option<DocumentSymbolResponse>> {
        self.handle_document_symbol(params).await
    }

    async fn inlay_hint(
        &self,
        params: InlayHintParams,
    ) -> tower_lsp::jsonrpc::Result<Option<Vec<InlayHint>>> {
        self.handle_inlay_hint(params).await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let doc_state = self.create_document_state(params.text_document.text);

        let mut docs = self.documents.lock().await;
        docs.insert(uri.clone(), doc_state);
        drop(docs); // Release the lock before calling publish_diagnostics

        self.publish_diagnostics(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        if let Some(change) = params.content_changes.into_iter().last() {
            let doc_state = self.create_document_state(change.text);

            let mut docs = self.documents.lock().await;
            docs.insert(uri.clone(), doc_state);
            drop(docs);

            self.publish_diagnostics(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.lock().await.remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}
