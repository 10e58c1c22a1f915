use std::thread;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::Config;
use crate::dictionary::DictionaryStore;
use crate::lsp::backend::Backend;

/// Environment switch used by integration tests to stop the server after a second
pub const TEST_EXIT_ENV: &str = "NC_GLOSS_TEST_EXIT";

/// Start the LSP server on stdio
pub async fn serve(config: Config, store: DictionaryStore) -> Result<()> {
    if let Some(model) = config.get_effective_model() {
        log::info!("Default model: {}", model);
    }

    // Lets the integration test read stdout to EOF
    if std::env::var(TEST_EXIT_ENV).as_deref() == Ok("1") {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs(1));
            std::process::exit(0);
        });
    }

    let (service, socket) =
        LspService::build(move |client| Backend::new(client, config, store)).finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
