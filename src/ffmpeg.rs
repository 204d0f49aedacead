use std::fs::File;
use std::io;
use std::process::{Command, Stdio};

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FfmpegError {
    #[error("`{0}` command not found. Please ensure it is installed and in your PATH.")]
    CommandNotFound(String),
    #[error("`{0} -version` exited with a non-zero status")]
    PreflightFailed(String),
    #[error("failed to run `{0}`: {1}")]
    SpawnFailed(String, String),
    #[error("`{0}` failed: {1}")]
    CommandFailed(String, String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

/// Pre-flight check gating the whole run: `ffmpeg -version` must spawn and
/// exit cleanly before any track is extracted. The detected version is
/// logged when the banner is parseable.
pub fn check_ffmpeg(bin: &str, ignore_check: bool) -> Result<(), FfmpegError> {
    if ignore_check {
        return Ok(());
    }

    let output = match Command::new(bin).arg("-version").output() {
        Ok(output) => output,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FfmpegError::CommandNotFound(bin.to_string()));
        }
        Err(e) => return Err(FfmpegError::SpawnFailed(bin.to_string(), e.to_string())),
    };
    if !output.status.success() {
        return Err(FfmpegError::PreflightFailed(bin.to_string()));
    }

    let banner = String::from_utf8_lossy(&output.stdout);
    let re = Regex::new(r"ffmpeg version (\d+)\.(\d+)")?;
    if let Some(caps) = re.captures(&banner) {
        log::info!("found ffmpeg {}.{}", &caps[1], &caps[2]);
    } else {
        log::debug!("could not parse ffmpeg version from `{bin} -version` output");
    }
    Ok(())
}

/// Run one ffmpeg invocation synchronously, appending its combined
/// stdout/stderr to the shared log file.
pub fn run_ffmpeg(bin: &str, args: &[String], log_file: &File) -> Result<(), FfmpegError> {
    log::debug!("running `{} {}`", bin, args.join(" "));

    let status = Command::new(bin)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log_file.try_clone()?))
        .stderr(Stdio::from(log_file.try_clone()?))
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(FfmpegError::CommandFailed(
            format!("{} {}", bin, args.join(" ")),
            status.to_string(),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(FfmpegError::CommandNotFound(bin.to_string()))
        }
        Err(e) => Err(FfmpegError::SpawnFailed(bin.to_string(), e.to_string())),
    }
}
