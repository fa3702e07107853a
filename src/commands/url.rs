use anyhow::{bail, Result};

use super::load_adapter;

/// Prints a public URL for `path`. Each run creates a new share.
pub async fn run(path: &str) -> Result<()> {
    let adapter = load_adapter()?;

    let url = adapter.get_url(path).await?;
    if url.is_empty() {
        bail!("server returned no share URL for '{}'", path);
    }

    println!("{}", url);
    Ok(())
}
