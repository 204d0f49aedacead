use std::fs;

use thiserror::Error;

use crate::track::Track;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not read manifest '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("manifest line {line}: expected 4 fields (start_time, end_time, title, artist), found {found}")]
    Format { line: usize, found: usize },
}

/// Read the track manifest at `path` into an ordered list of [`Track`]s.
///
/// Rows are delimiter-separated with optional double-quoting to embed the
/// delimiter. Blank rows and rows whose first field starts with `#` are
/// skipped; every other row must carry exactly four fields, in order
/// `start_time, end_time, title, artist`.
pub fn parse_manifest(path: &str, delimiter: char) -> Result<Vec<Track>, ManifestError> {
    let contents = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_string(),
        source,
    })?;
    let tracks = parse_records(&contents, delimiter)?;
    log::info!("parsed {} track(s) from '{}'", tracks.len(), path);
    Ok(tracks)
}

fn parse_records(contents: &str, delimiter: char) -> Result<Vec<Track>, ManifestError> {
    let mut tracks = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let fields = split_row(line, delimiter);
        if fields.is_empty() || fields[0].starts_with('#') {
            log::debug!("skipping manifest line {}", index + 1);
            continue;
        }
        if fields.len() != 4 {
            return Err(ManifestError::Format {
                line: index + 1,
                found: fields.len(),
            });
        }
        tracks.push(Track {
            start_time: fields[0].trim().to_string(),
            end_time: non_empty(&fields[1]),
            title: fields[2].trim().to_string(),
            artist: non_empty(&fields[3]),
        });
    }
    Ok(tracks)
}

fn non_empty(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Split one manifest row into fields. A field may be wrapped in double
/// quotes to embed the delimiter; `""` inside a quoted field is a literal
/// quote. An empty line yields zero fields.
fn split_row(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    if line.is_empty() {
        return fields;
    }

    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' && current.is_empty() {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_row_with_trimming() {
        let tracks = parse_records("00:00:00, 00:03:30, Intro, The Band", ',').unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].start_time, "00:00:00");
        assert_eq!(tracks[0].end_time.as_deref(), Some("00:03:30"));
        assert_eq!(tracks[0].title, "Intro");
        assert_eq!(tracks[0].artist.as_deref(), Some("The Band"));
    }

    #[test]
    fn preserves_row_order_and_skips_blank_and_comment_rows() {
        let contents = "\
#start,end,title,artist
00:00:00,00:03:30,Intro,The Band

00:03:30,,Outro,The Band
#trailing comment,x,y,z
";
        let tracks = parse_records(contents, ',').unwrap();
        let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Intro", "Outro"]);
    }

    #[test]
    fn empty_end_time_and_artist_become_none() {
        let tracks = parse_records("00:00:00, , Solo Piece, ", ',').unwrap();
        assert_eq!(tracks[0].end_time, None);
        assert_eq!(tracks[0].artist, None);
    }

    #[test]
    fn three_fields_is_a_format_error() {
        let err = parse_records("00:00:00,00:03:30,Intro", ',').unwrap_err();
        match err {
            ManifestError::Format { line, found } => {
                assert_eq!(line, 1);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn five_fields_is_a_format_error() {
        assert!(parse_records("a,b,c,d,e", ',').is_err());
    }

    #[test]
    fn reports_the_failing_line_number() {
        let contents = "00:00:00,00:03:30,Intro,The Band\nbroken row\n";
        let err = parse_records(contents, ',').unwrap_err();
        match err {
            ManifestError::Format { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn quoted_fields_may_embed_the_delimiter() {
        let tracks =
            parse_records("00:00:00,00:03:30,\"Song, One\",\"Band, The\"", ',').unwrap();
        assert_eq!(tracks[0].title, "Song, One");
        assert_eq!(tracks[0].artist.as_deref(), Some("Band, The"));
    }

    #[test]
    fn doubled_quotes_inside_a_quoted_field_are_literal() {
        let tracks = parse_records("0:00,,\"The \"\"Hit\"\"\",", ',').unwrap();
        assert_eq!(tracks[0].title, "The \"Hit\"");
    }

    #[test]
    fn alternate_delimiter_is_honored() {
        let tracks = parse_records("00:00:00;00:03:30;Intro;The Band", ';').unwrap();
        assert_eq!(tracks[0].title, "Intro");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = parse_manifest("does-not-exist.csv", ',').unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }
}
