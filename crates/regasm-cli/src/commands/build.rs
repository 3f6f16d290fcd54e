use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use regasm_lib::batch::{ASM_FILE, C_FILE, DEFS_FILE};
use regasm_lib::{Batch, PatternConfig};

use super::pattern_loader::load_patterns;
use super::run_common::report_failure;

pub struct BuildArgs {
    pub patterns: Vec<String>,
    pub pattern_file: Option<PathBuf>,
    pub output: PathBuf,
    pub config: PatternConfig,
    pub color: bool,
}

pub fn run(args: BuildArgs) {
    let patterns = match load_patterns(&args.patterns, args.pattern_file.as_deref()) {
        Ok(patterns) => patterns,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let mut batch = Batch::new(args.config);
    batch.extend(patterns.iter().map(String::as_str));

    for failure in batch.failures() {
        report_failure(&failure.pattern, &failure.error, args.color);
    }

    if let Err(e) = write_artifacts(&batch, &args.output) {
        eprintln!("error: failed to write '{}': {}", args.output.display(), e);
        std::process::exit(1);
    }

    eprintln!(
        "compiled {} of {} patterns into {}",
        batch.compiled().len(),
        patterns.len(),
        args.output.display()
    );
}

/// Writes the assembly, C and definitions files into `dir`, creating it if
/// needed. Returns the written paths.
pub fn write_artifacts(batch: &Batch, dir: &Path) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let files = [
        (ASM_FILE, batch.render_asm()),
        (C_FILE, batch.render_c()),
        (DEFS_FILE, batch.render_defs()),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        fs::write(&path, contents)?;
        info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
