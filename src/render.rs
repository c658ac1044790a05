use crate::error::{ProbeError, Result};
use std::path::Path;
use std::process::Command;

/// Message shown when the graph renderer cannot produce the image.
pub const RENDER_FAILURE: &str = "Could not run dot, ie graphviz, to produce visualization";

/// Runs `<program> -Tpng <dot_path> -o <png_path>`.
///
/// # Errors
///
/// Returns [`ProbeError::Render`] if the program cannot be started or exits
/// with a non-zero status.
pub fn render_png(program: &str, dot_path: &Path, png_path: &Path) -> Result<()> {
    tracing::info!("Rendering {} with {program}", png_path.display());
    let output = Command::new(program)
        .arg("-Tpng")
        .arg(dot_path)
        .arg("-o")
        .arg(png_path)
        .output();

    match output {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            tracing::error!(status = %out.status, "{program} failed: {}", stderr.trim());
            Err(ProbeError::Render(RENDER_FAILURE.to_owned()))
        }
        Err(e) => {
            tracing::error!("Failed to execute {program}: {e}");
            Err(ProbeError::Render(RENDER_FAILURE.to_owned()))
        }
    }
}
