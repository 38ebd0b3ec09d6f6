use crate::errors::Result;
use std::io::Write;
use std::path::PathBuf;

/// Write the dependency list as a pretty-printed JSON array of paths.
pub fn write_dependencies_json<W: Write>(writer: &mut W, dependencies: &[PathBuf]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, dependencies)?;
    writeln!(writer)?;
    Ok(())
}
