//! k8s-manifests CLI binary

use anyhow::Result;

use k8s_manifests::cli::CliApp;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries rendered manifests
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "k8s_manifests=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = CliApp::app().get_matches();

    CliApp::run(&matches).await
}
