use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::App;

pub fn run(app: &App, filename: &str, output: Option<PathBuf>) -> Result<()> {
    // Stored names never carry directories; keep only the last component
    let local_name = Path::new(filename)
        .file_name()
        .context("Image filename is empty")?;
    let output = output.unwrap_or_else(|| PathBuf::from(local_name));

    let written = app.block_on(async {
        let mut file = tokio::fs::File::create(&output)
            .await
            .with_context(|| format!("Failed to create {}", output.display()))?;
        app.client
            .download_image(filename, &mut file)
            .await
            .with_context(|| format!("Failed to download {}", app.client.image_url(filename)))
    })?;

    println!("Saved {} ({} bytes)", output.display(), written);
    Ok(())
}
