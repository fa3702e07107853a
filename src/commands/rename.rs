use anyhow::{bail, Result};

use super::load_adapter;

pub async fn run(from: &str, to: &str) -> Result<()> {
    let adapter = load_adapter()?;

    if !adapter.rename(from, to).await? {
        bail!("could not move '{}' to '{}'", from, to);
    }

    println!("Moved '{}' to '{}'", from, to);
    Ok(())
}
