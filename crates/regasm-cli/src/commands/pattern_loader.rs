use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    File { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("no patterns given: use positional arguments or -f/--file")]
    Empty,
}

/// Collects patterns from the command line, then from `file` if given.
///
/// `-` reads the file contents from stdin.
pub fn load_patterns(patterns: &[String], file: Option<&Path>) -> Result<Vec<String>, LoadError> {
    let mut all = patterns.to_vec();

    if let Some(path) = file {
        let text = if path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(LoadError::Stdin)?;
            buf
        } else {
            fs::read_to_string(path).map_err(|source| LoadError::File {
                path: path.to_path_buf(),
                source,
            })?
        };
        all.extend(parse_pattern_lines(&text));
    }

    if all.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(all)
}

/// One pattern per line. Blank lines are skipped; spaces are kept since
/// they are valid symbols.
pub fn parse_pattern_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
