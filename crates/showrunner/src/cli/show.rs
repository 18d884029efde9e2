//! Shot list display command handler.

use showrunner::{ShowrunnerResult, read_shot_list};
use std::path::Path;

/// Print the text rendering of a saved shot list.
pub async fn show_script(path: &Path) -> ShowrunnerResult<()> {
    let shots = read_shot_list(path).await?;
    tracing::debug!(path = %path.display(), shots = shots.len(), "Shot list loaded");
    println!("{}", shots.to_text());
    Ok(())
}
