use crate::parse::reader::ChunkedLineReader;
use std::path::Path;

/// Header keywords that open a module declaration.
const MODULE_PREFIXES: [&str; 3] = ["module ", "port module ", "effect module "];

/// Where the scanner is relative to the file's import block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No module declaration seen yet.
    AwaitingModule,
    /// Module declaration seen, no import yet.
    AwaitingImports,
    /// Inside the import block.
    ReadingImports,
    /// Inside a `{- ... -}` block comment; `resume` is the state to return to.
    InComment { resume: Phase },
    /// Past the import block. Terminal.
    Done,
}

/// The non-comment states a block comment can interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingModule,
    AwaitingImports,
    ReadingImports,
}

impl From<Phase> for ScanState {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::AwaitingModule => ScanState::AwaitingModule,
            Phase::AwaitingImports => ScanState::AwaitingImports,
            Phase::ReadingImports => ScanState::ReadingImports,
        }
    }
}

/// Line-driven state machine that collects the raw import lines of one file.
#[derive(Debug)]
pub struct ImportScanner {
    state: ScanState,
    imports: Vec<String>,
}

impl ImportScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::AwaitingModule,
            imports: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// True once the import block is over and no more lines are needed.
    pub fn is_done(&self) -> bool {
        self.state == ScanState::Done
    }

    /// Feed one line (without its terminator).
    pub fn feed_line(&mut self, line: &str) {
        self.state = match self.state {
            ScanState::Done => ScanState::Done,
            ScanState::InComment { resume } => {
                if line.ends_with("-}") {
                    resume.into()
                } else {
                    self.state
                }
            }
            ScanState::AwaitingModule => {
                if is_module_declaration(line) {
                    ScanState::AwaitingImports
                } else if is_import(line) {
                    // The module line may be omitted entirely.
                    self.imports.push(line.to_string());
                    ScanState::ReadingImports
                } else {
                    enter_comment(line, Phase::AwaitingModule)
                }
            }
            ScanState::AwaitingImports => {
                if is_import(line) {
                    self.imports.push(line.to_string());
                    ScanState::ReadingImports
                } else {
                    enter_comment(line, Phase::AwaitingImports)
                }
            }
            ScanState::ReadingImports => {
                if is_import(line) {
                    self.imports.push(line.to_string());
                    ScanState::ReadingImports
                } else if is_incidental(line) {
                    ScanState::ReadingImports
                } else if line.starts_with("{-") {
                    enter_comment(line, Phase::ReadingImports)
                } else {
                    tracing::trace!(line, "end of import block");
                    ScanState::Done
                }
            }
        };
    }

    /// Consume the scanner and return the collected import lines in file order.
    pub fn into_imports(self) -> Vec<String> {
        self.imports
    }
}

impl Default for ImportScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_module_declaration(line: &str) -> bool {
    MODULE_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

fn is_import(line: &str) -> bool {
    line.starts_with("import ")
}

/// Indented, blank and line-comment lines inside the import block.
fn is_incidental(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t') || line.trim().is_empty() || line.starts_with("--")
}

/// State after `line` in `phase`: a block comment opening at column 0 that
/// does not also close on the same line suspends the phase.
fn enter_comment(line: &str, phase: Phase) -> ScanState {
    match line.strip_prefix("{-") {
        Some(rest) if !rest.ends_with("-}") => ScanState::InComment { resume: phase },
        _ => phase.into(),
    }
}

/// Result of scanning one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The raw import lines, in file order.
    Imports(Vec<String>),
    /// The file could not be opened or read.
    Unreadable,
}

/// Scan `path` for import lines, reading `chunk_size` bytes at a time and
/// stopping as soon as the import block is over.
pub fn scan_imports(path: &Path, chunk_size: usize) -> ScanOutcome {
    let mut reader = match ChunkedLineReader::open(path, chunk_size) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Cannot open {}: {}", path.display(), e);
            return ScanOutcome::Unreadable;
        }
    };

    let mut scanner = ImportScanner::new();
    loop {
        match reader.next_line() {
            Ok(Some(line)) => {
                scanner.feed_line(&line);
                if scanner.is_done() {
                    reader.stop();
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("Cannot read {}: {}", path.display(), e);
                return ScanOutcome::Unreadable;
            }
        }
    }

    tracing::trace!(
        file = %path.display(),
        bytes = reader.bytes_read(),
        "scan finished"
    );
    ScanOutcome::Imports(scanner.into_imports())
}
