use clap::Parser;

/// Split a single album audio file into tracks using ffmpeg
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Album file to be split (any FFmpeg-supported format)
    pub albumfile: String,

    /// Manifest file with one row per track: start_time, end_time, title, artist
    pub csvfile: String,

    /// Delimiter for the manifest file
    #[arg(short = 'd', long, default_value_t = ',')]
    pub delimiter: char,

    /// File receiving the combined stdout/stderr of every ffmpeg invocation
    #[arg(short = 'l', long = "log-file", default_value = "logfile.txt")]
    pub log_file: String,

    /// Print the extraction plan without invoking ffmpeg
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Path to the ffmpeg binary
    #[arg(long, default_value = "ffmpeg")]
    pub ffmpeg: String,

    /// Skip the ffmpeg pre-flight check
    #[arg(long)]
    pub ignore_ffmpeg_check: bool,
}
