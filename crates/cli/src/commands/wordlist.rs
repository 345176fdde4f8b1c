use anyhow::Context;
use futures::{future, Stream, StreamExt};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing::warn;

/// Opens a wordlist as a lazy stream of candidate labels.
///
/// The file is read as the discovery engine pulls candidates. Blank lines
/// and `#` comments are skipped; a read error ends the stream.
pub async fn open(path: &Path) -> anyhow::Result<impl Stream<Item = String> + Send + 'static> {
    let file = File::open(path)
        .await
        .with_context(|| format!("Failed to read wordlist {}", path.display()))?;
    let wordlist = path.display().to_string();

    Ok(LinesStream::new(BufReader::new(file).lines())
        .take_while(move |line| {
            if let Err(e) = line {
                warn!(wordlist = %wordlist, error = %e, "Stopped reading wordlist");
            }
            future::ready(line.is_ok())
        })
        .filter_map(|line| future::ready(line.ok().and_then(|l| candidate(&l)))))
}

/// Trimmed entry of a list file, or `None` for blanks and comments.
pub fn candidate(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        None
    } else {
        Some(line.to_string())
    }
}
