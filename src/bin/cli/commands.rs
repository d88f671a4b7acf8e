//! Command implementations for the CLI tool.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use wadlump::{
    Destinations, EditOptions, EditResult, EditableWad, Error, Wad, WriteOptions, WriteResult,
};

use crate::Cli;
use crate::exit_codes::{ExitCode, error_to_exit_code};
use crate::output::create_formatter;

/// Runs the read, edit, write pipeline for one invocation.
pub fn run(cli: &Cli) -> ExitCode {
    let formatter = create_formatter(cli.format);
    let destinations = destinations(cli);

    let mut wad = match open_source(&cli.path) {
        Ok(w) => w,
        Err(code) => return code,
    };

    if cli.namespaces {
        if let Err(e) = wad.resolve_namespaces() {
            return fail("Error resolving namespaces", &e);
        }
    }

    let edit = match apply_changes(&mut wad, cli) {
        Ok(result) => result,
        Err(e) => return fail("Error applying changes", &e),
    };

    if cli.show {
        print!("{}", ensure_newline(formatter.format_regions(wad.regions())));
    }

    let mut written: Option<WriteResult> = None;
    if !destinations.is_empty() {
        match wad.write(&destinations, &write_options(cli)) {
            Ok(result) => written = Some(result),
            Err(e) => return fail("Error writing output", &e),
        }
    }

    if !cli.quiet {
        print!(
            "{}",
            ensure_newline(formatter.format_stats(&edit, written.as_ref()))
        );
    }

    ExitCode::Success
}

/// Maps the output flags to destinations. In-place editing writes back to
/// the source, as an archive or a region directory.
fn destinations(cli: &Cli) -> Destinations {
    let mut destinations = Destinations::new();
    if cli.in_place {
        if cli.path.is_dir() {
            destinations = destinations.directory(&cli.path);
        } else {
            destinations = destinations.archive(&cli.path);
        }
    }
    if let Some(path) = &cli.output {
        destinations = destinations.archive(path);
    }
    if let Some(path) = &cli.output_dir {
        destinations = destinations.directory(path);
    }
    destinations
}

/// `--case` keeps names as written for both matching and output;
/// `--match-case` only affects matching.
fn edit_options(cli: &Cli) -> EditOptions {
    EditOptions::new()
        .case_sensitive(cli.case || cli.match_case)
        .once(cli.once)
        .invert(cli.invert)
}

fn write_options(cli: &Cli) -> WriteOptions {
    WriteOptions::new()
        .preserve_case(cli.case)
        .lumps_only(cli.lumps)
        .namespaces(cli.namespaces)
        .offset_order(cli.offset_order)
        .overwrite(cli.force || cli.in_place)
}

fn apply_changes(wad: &mut Wad<BufReader<File>>, cli: &Cli) -> wadlump::Result<EditResult> {
    let mut editor = wad.edit().with_options(edit_options(cli));
    editor.changes(&cli.changes)?;
    editor.apply()
}

fn open_source(path: &Path) -> Result<Wad<BufReader<File>>, ExitCode> {
    Wad::open_path(path).map_err(|e| {
        eprintln!("Error opening {}: {}", path.display(), e);
        error_to_exit_code(&e)
    })
}

fn fail(context: &str, error: &Error) -> ExitCode {
    eprintln!("{}: {}", context, error);
    error_to_exit_code(error)
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
