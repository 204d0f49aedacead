use std::fs::File;

use anyhow::{Context, Result};
use comfy_table::{Table, presets::UTF8_FULL};

use crate::cli::Args;
use crate::ffmpeg::{check_ffmpeg, run_ffmpeg};
use crate::manifest::parse_manifest;
use crate::track::{Track, resolve_extension};

pub fn run(args: Args) -> Result<()> {
    let extension = resolve_extension(&args.albumfile)?;
    let tracks = parse_manifest(&args.csvfile, args.delimiter)?;

    if args.dry_run {
        print_plan(&tracks, extension);
        return Ok(());
    }

    check_ffmpeg(&args.ffmpeg, args.ignore_ffmpeg_check)?;

    // One shared handle, truncated at run start; every invocation appends
    // through clones of it.
    let log_file = File::create(&args.log_file)
        .with_context(|| format!("could not create log file '{}'", args.log_file))?;

    let total = tracks.len();
    for (index, track) in tracks.iter().enumerate() {
        println!("{}/{} Extracting track: {}", index + 1, total, track.title);

        let (fragment, output_filename) = track.ffmpeg_args(extension);
        let mut ffmpeg_args = vec!["-y".to_string(), "-i".to_string(), args.albumfile.clone()];
        ffmpeg_args.extend(fragment);
        ffmpeg_args.push(output_filename);

        run_ffmpeg(&args.ffmpeg, &ffmpeg_args, &log_file)
            .with_context(|| format!("error occurred while extracting \"{}\"", track.title))?;
    }

    println!(
        "✅ Extracted {} track(s). ffmpeg output written to {}",
        total, args.log_file
    );
    Ok(())
}

fn print_plan(tracks: &[Track], extension: &str) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Title", "Start", "End", "Output File"]);

    for (index, track) in tracks.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            track.title.clone(),
            track.start_time.clone(),
            track.end_time.clone().unwrap_or_else(|| "end".to_string()),
            track.output_filename(extension),
        ]);
    }

    println!("▶️ Extraction Plan:");
    println!("{table}");
    println!("\nDry run: no tracks were extracted.");
}
