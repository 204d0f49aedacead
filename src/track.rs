/// Characters replaced with `_` when deriving an output filename from a
/// track title.
const RESERVED_CHARS: &[char] = &[
    ' ', '-', ',', '.', ';', ':', '(', ')', '{', '}', '[', ']', '`', '~', '\'',
];

/// One parsed manifest row describing a single output track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Start offset, passed verbatim to ffmpeg's `-ss`.
    pub start_time: String,
    /// End offset for `-to`; extraction runs to end of input when absent.
    pub end_time: Option<String>,
    pub title: String,
    pub artist: Option<String>,
}

impl Track {
    /// Build the per-track ffmpeg argument fragment and the sanitized
    /// output filename. The fragment is an argv list, never a shell string,
    /// so titles and artists need no quoting or escaping.
    pub fn ffmpeg_args(&self, extension: &str) -> (Vec<String>, String) {
        let mut args = vec!["-ss".to_string(), self.start_time.clone()];
        if let Some(end) = &self.end_time {
            args.push("-to".to_string());
            args.push(end.clone());
        }
        args.push("-metadata".to_string());
        args.push(format!("title={}", self.title));
        if let Some(artist) = &self.artist {
            args.push("-metadata".to_string());
            args.push(format!("artist={artist}"));
        }
        (args, self.output_filename(extension))
    }

    /// Derive the output filename from the title, tagged with the shared
    /// extension when one is present.
    pub fn output_filename(&self, extension: &str) -> String {
        let stem = sanitize_title(&self.title);
        if extension.is_empty() {
            stem
        } else {
            format!("{stem}.{extension}")
        }
    }
}

/// Replace every reserved character in `title` with `_`, yielding a
/// filesystem-safe stem. Colliding stems from different titles are not
/// detected; the last extraction wins.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Extract the extension of the album file, i.e. everything after the last
/// `.` in `filename`. Errors when there is no `.`: the extension tags every
/// output file, so guessing here would mislabel the whole run.
pub fn resolve_extension(filename: &str) -> anyhow::Result<&str> {
    match filename.rfind('.') {
        Some(index) => Ok(&filename[index + 1..]),
        None => anyhow::bail!(
            "album file '{}' has no extension to derive output filenames from",
            filename
        ),
    }
}
