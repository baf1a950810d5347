use crate::infrastructure::error::InfrastructureError;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, instrument};

/// Number of data rows in a delimited text file: its line count minus the
/// header line.
///
/// The file is streamed one line at a time, so memory use does not depend on
/// its size. A missing trailing newline does not change the result, and an
/// empty file counts zero rows.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn count_data_rows<P: AsRef<Path>>(path: P) -> Result<u64, InfrastructureError> {
    let file = File::open(path.as_ref()).map_err(InfrastructureError::Io)?;
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    let mut lines: u64 = 0;

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(InfrastructureError::Io)?;
        if read == 0 {
            break;
        }
        lines += 1;
    }

    let rows = lines.saturating_sub(1);
    debug!(lines, rows, "Counted source rows");
    Ok(rows)
}

/// Write content to a file atomically using a temporary file.
///
/// The temporary file lives in the target directory so the final rename never
/// crosses filesystems: the target is either fully written or untouched.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(InfrastructureError::Io)?;
    }

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}
