use crate::errors::{DepsError, Result};
use crate::paths::{normalize_path, parent_dir};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Keywords that may precede `module` in a declaration.
const HEADER_QUALIFIERS: [&str; 2] = ["port", "effect"];

/// What the first line of a file says about its module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleHeader {
    /// `module Css.Declarations exposing (..)` and friends.
    Declared(String),
    /// No module declaration; allowed for single-file programs.
    Omitted,
    /// Starts like a declaration but names no module.
    Invalid,
}

impl ModuleHeader {
    pub fn parse(first_line: &str) -> Self {
        let unqualified = HEADER_QUALIFIERS
            .iter()
            .find_map(|q| {
                first_line
                    .strip_prefix(*q)
                    .and_then(|rest| rest.strip_prefix(char::is_whitespace))
            })
            .map(str::trim_start)
            .unwrap_or(first_line);

        let Some(after_module) = unqualified.strip_prefix("module") else {
            return ModuleHeader::Omitted;
        };
        if !after_module.starts_with(char::is_whitespace) {
            return ModuleHeader::Omitted;
        }
        match after_module.split_whitespace().next() {
            Some(name) => ModuleHeader::Declared(name.to_string()),
            None => ModuleHeader::Invalid,
        }
    }
}

/// Base directory that `file`'s own module name resolves against.
///
/// For `src/Css/Declarations.elm` declaring `module Css.Declarations`, the
/// base is `src`. A file without a module declaration resolves against its
/// own directory. Only the first line of the file is read.
pub fn base_dir(file: &Path) -> Result<PathBuf> {
    let first_line = read_first_line(file)?;
    base_dir_for_header(file, &ModuleHeader::parse(&first_line))
}

pub fn base_dir_for_header(file: &Path, header: &ModuleHeader) -> Result<PathBuf> {
    let dir = parent_dir(file);
    match header {
        ModuleHeader::Declared(name) => {
            let mut base = dir;
            for _ in name.split('.').skip(1) {
                base.push("..");
            }
            Ok(normalize_path(&base))
        }
        ModuleHeader::Omitted => Ok(normalize_path(&dir)),
        ModuleHeader::Invalid => Err(DepsError::InvalidModuleDeclaration {
            file: file.to_path_buf(),
        }),
    }
}

fn read_first_line(file: &Path) -> Result<String> {
    let unreadable = |source| DepsError::EntryUnreadable {
        file: file.to_path_buf(),
        source,
    };
    let handle = File::open(file).map_err(unreadable)?;
    let mut raw = Vec::new();
    BufReader::new(handle)
        .read_until(b'\n', &mut raw)
        .map_err(unreadable)?;
    let line = String::from_utf8_lossy(&raw);
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}
