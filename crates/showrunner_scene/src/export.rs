//! Writing run results to disk.

use crate::SceneLog;
use showrunner_core::ShotList;
use showrunner_error::{SceneError, SceneErrorKind, ShowrunnerResult};
use std::path::Path;
use tracing::{debug, instrument};

/// Write a shot list record (`script.json`).
///
/// # Errors
///
/// Returns a scene export error if the file cannot be written.
#[instrument(skip(path, shots), fields(path = %path.as_ref().display(), shots = shots.len()))]
pub async fn write_shot_list(path: impl AsRef<Path>, shots: &ShotList) -> ShowrunnerResult<()> {
    let record = shots.to_record()?;
    tokio::fs::write(path.as_ref(), record).await.map_err(|e| {
        SceneError::new(SceneErrorKind::Export(format!(
            "{}: {}",
            path.as_ref().display(),
            e
        )))
    })?;
    debug!("Shot list written");
    Ok(())
}

/// Read a shot list record written by [`write_shot_list`].
///
/// Legacy field names are accepted.
///
/// # Errors
///
/// Returns a scene import error if the file cannot be read, or a script
/// error if its contents are not a shot list.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub async fn read_shot_list(path: impl AsRef<Path>) -> ShowrunnerResult<ShotList> {
    let record = tokio::fs::read_to_string(path.as_ref()).await.map_err(|e| {
        SceneError::new(SceneErrorKind::Import(format!(
            "{}: {}",
            path.as_ref().display(),
            e
        )))
    })?;
    Ok(ShotList::from_record(&record)?)
}

/// Write the text rendering of a shot list.
///
/// # Errors
///
/// Returns a scene export error if the file cannot be written.
#[instrument(skip(path, shots), fields(path = %path.as_ref().display()))]
pub async fn write_shot_list_text(
    path: impl AsRef<Path>,
    shots: &ShotList,
) -> ShowrunnerResult<()> {
    tokio::fs::write(path.as_ref(), shots.to_text())
        .await
        .map_err(|e| {
            SceneError::new(SceneErrorKind::Export(format!(
                "{}: {}",
                path.as_ref().display(),
                e
            )))
        })?;
    Ok(())
}

/// Write the scene log as plain text, one entry per line.
///
/// # Errors
///
/// Returns a scene export error if the file cannot be written.
#[instrument(skip(path, log), fields(path = %path.as_ref().display(), entries = log.len()))]
pub async fn write_scene_log(path: impl AsRef<Path>, log: &SceneLog) -> ShowrunnerResult<()> {
    tokio::fs::write(path.as_ref(), log.to_text())
        .await
        .map_err(|e| {
            SceneError::new(SceneErrorKind::Export(format!(
                "{}: {}",
                path.as_ref().display(),
                e
            )))
        })?;
    debug!("Scene log written");
    Ok(())
}
