//! Scoped file output for text emitters.
//!
//! Every emitter in the workspace writes to a `&mut dyn Write` and never
//! opens files itself. [`write_file`] is the one place where a path turns
//! into a sink: it creates the file, buffers it, runs the emitter and
//! flushes. The file handle is dropped, and therefore closed, on every
//! exit path including emitter errors.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create (or truncate) `path`, run `emit` on a buffered writer, flush.
///
/// The emitter's error type only needs a conversion from `io::Error`, so
/// each crate's own error enum can be used directly.
///
/// # Examples
///
/// ```
/// use std::io::Write;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("out.txt");
/// memkmc_core::write_file(&path, |w| -> std::io::Result<()> {
///     writeln!(w, "hello")?;
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
/// ```
pub fn write_file<P, E, F>(path: P, emit: F) -> Result<(), E>
where
    P: AsRef<Path>,
    E: From<io::Error>,
    F: FnOnce(&mut dyn Write) -> Result<(), E>,
{
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    emit(&mut writer)?;
    writer.flush()?;
    Ok(())
}
