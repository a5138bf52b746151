//! Opening lookup pages in the system browser

use reqwest::Url;
use tokio::process::Command;

use super::error::ServiceError;

const STROKE_ORDER_BASE: &str = "https://www.strokeorder.com/chinese/";
const WEB_TRANSLATE_BASE: &str = "https://translate.google.com/";

/// Stroke order animation page for a character
pub fn stroke_order_url(token: &str) -> Result<Url, ServiceError> {
    let mut url = Url::parse(STROKE_ORDER_BASE).map_err(|e| ServiceError::Url(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ServiceError::Url(STROKE_ORDER_BASE.to_string()))?
        .pop_if_empty()
        .push(token);
    Ok(url)
}

/// Google Translate web page for a token
pub fn web_translate_url(token: &str, source: &str, target: &str) -> Result<Url, ServiceError> {
    Url::parse_with_params(
        WEB_TRANSLATE_BASE,
        &[("sl", source), ("tl", target), ("text", token), ("op", "translate")],
    )
    .map_err(|e| ServiceError::Url(e.to_string()))
}

/// Hand `url` to the platform opener
pub async fn open_in_browser(url: &str) -> Result<(), ServiceError> {
    let mut command = opener_command(url);
    let status = command
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await
        .map_err(|e| ServiceError::Browser(e.to_string()))?;

    if !status.success() {
        return Err(ServiceError::Browser(format!("opener exited with {}", status)));
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(url);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}
