//! Interactive solver: load a snapshot directory and answer one plate.
//!
//! Usage: `emplaka [--paths] [DIR]` (default `emplaka_graph`). Refuses to
//! start on a missing, corrupt or unclosed snapshot. `--paths` also lists
//! everything each half of the plate reaches.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use log::error;

use emplaka_harness::plate::Plate;
use emplaka_harness::render::{render_answers, render_header, render_paths};
use emplaka_harness::runner::{answer, load_graph, DEFAULT_GRAPH_DIR};
use emplaka_kernel::operators::operator_catalog::OperationCatalog;

const PROMPT: &str = "Enter a plate number (4 digits): ";
const REPROMPT: &str = "Invalid plate. Enter a plate number (4 digits): ";

/// Prompt until a valid plate is entered. `None` on end of input.
fn read_plate(input: &mut impl BufRead, output: &mut impl Write) -> std::io::Result<Option<Plate>> {
    let mut prompt = PROMPT;
    loop {
        output.write_all(prompt.as_bytes())?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if let Ok(plate) = Plate::parse(line.trim_end_matches(['\r', '\n'])) {
            return Ok(Some(plate));
        }
        prompt = REPROMPT;
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut show_paths = false;
    let mut dir = PathBuf::from(DEFAULT_GRAPH_DIR);
    for arg in std::env::args_os().skip(1) {
        if arg == "--paths" {
            show_paths = true;
        } else {
            dir = PathBuf::from(arg);
        }
    }
    let registry = match load_graph(&dir, &OperationCatalog::standard()) {
        Ok(registry) => registry,
        Err(e) => {
            error!("{e}");
            eprintln!("run `emplaka-build {}` first", dir.display());
            return ExitCode::FAILURE;
        }
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let plate = match read_plate(&mut stdin.lock(), &mut out) {
        Ok(Some(plate)) => plate,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            error!("terminal I/O failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let solutions = match answer(&registry, &plate) {
        Ok(solutions) => solutions,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut text = format!("\n{}\n{}", render_header(&plate), render_answers(&solutions));
    if show_paths {
        for half in [plate.left(), plate.right()] {
            if let Some(id) = registry.get(&half) {
                text.push_str(&render_paths(&registry, id));
            }
        }
    }
    if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        error!("terminal I/O failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
