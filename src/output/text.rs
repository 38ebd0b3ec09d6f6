use crate::errors::Result;
use std::io::Write;
use std::path::PathBuf;

/// Write one dependency path per line.
pub fn write_dependencies_text<W: Write>(writer: &mut W, dependencies: &[PathBuf]) -> Result<()> {
    for path in dependencies {
        writeln!(writer, "{}", path.display())?;
    }
    Ok(())
}
