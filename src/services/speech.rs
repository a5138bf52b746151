//! Text-to-speech: fetch, play and discard a pronunciation clip

use std::path::{Path, PathBuf};

use reqwest::{Client, Url};
use tokio::process::Command;

use super::error::ServiceError;

const TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Speak `token` in `language_code`.
///
/// Downloads the clip into `audio_dir`, plays it with `player`, then deletes
/// it. Returns the failures of every step that went wrong, one per line.
pub async fn speak(
    client: &Client,
    token: &str,
    language_code: &str,
    audio_dir: &Path,
    player: &[String],
) -> Option<String> {
    let path = clip_path(audio_dir, token);

    // Armed before the download so a cancelled request still cleans up
    let clip = ClipFile::new(path);

    if let Err(e) = fetch_clip(client, token, language_code, clip.path()).await {
        return Some(e.to_string());
    }

    let mut failures = Vec::new();
    if let Err(e) = play_clip(player, clip.path()).await {
        failures.push(e.to_string());
    }
    if let Err(e) = clip.remove().await {
        failures.push(e.to_string());
    }

    (!failures.is_empty()).then(|| failures.join("\n"))
}

/// A downloaded clip, deleted when dropped unless removed explicitly
struct ClipFile {
    path: PathBuf,
    armed: bool,
}

impl ClipFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the clip, reporting failure
    async fn remove(mut self) -> Result<(), ServiceError> {
        self.armed = false;
        tokio::fs::remove_file(&self.path).await?;
        Ok(())
    }
}

impl Drop for ClipFile {
    fn drop(&mut self) {
        if self.armed && self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                tracing::warn!("Could not remove clip {:?}: {}", self.path, e);
            }
        }
    }
}

/// Speech endpoint URL for `token`
pub fn speech_url(token: &str, language_code: &str) -> Result<Url, ServiceError> {
    Url::parse_with_params(
        TTS_URL,
        &[("ie", "UTF-8"), ("client", "tw-ob"), ("tl", language_code), ("q", token)],
    )
    .map_err(|e| ServiceError::Url(e.to_string()))
}

/// Scratch file for a clip; the token is reduced to filename-safe characters
pub fn clip_path(audio_dir: &Path, token: &str) -> PathBuf {
    let stem: String =
        token.chars().map(|c| if c.is_alphanumeric() { c } else { '_' }).collect();
    audio_dir.join(format!("{}.mp3", stem))
}

async fn fetch_clip(
    client: &Client,
    token: &str,
    language_code: &str,
    path: &Path,
) -> Result<(), ServiceError> {
    let response = client.get(speech_url(token, language_code)?).send().await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ServiceError::Api { status: status.as_u16(), message });
    }

    let bytes = response.bytes().await?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, &bytes).await?;
    Ok(())
}

async fn play_clip(player: &[String], path: &Path) -> Result<(), ServiceError> {
    let (program, args) =
        player.split_first().ok_or_else(|| ServiceError::Player("no player configured".into()))?;

    let status = Command::new(program)
        .args(args)
        .arg(path)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|e| ServiceError::Player(format!("{}: {}", program, e)))?;

    if !status.success() {
        return Err(ServiceError::Player(format!("{} exited with {}", program, status)));
    }
    Ok(())
}
