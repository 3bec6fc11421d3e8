use super::{errors, Backup, Locked};
use crate::scheme::Scheme;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a backup from an input stream using the given scheme
///
/// The backup starts locked, use [`Backup::unlock`] to unlock
pub fn from_reader_with_scheme<R: Read>(
    mut input: R,
    scheme: Scheme,
) -> Result<Backup<Locked>, errors::OpenError> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;
    let text = String::from_utf8(data)?;
    tracing::debug!(bytes = text.len(), "read backup");

    let body = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Backup::from_text(body, scheme)
}

/// Read a SecureVault backup from an input stream
///
/// The backup starts locked, use [`Backup::unlock`] to unlock
pub fn from_reader<R: Read>(input: R) -> Result<Backup<Locked>, errors::OpenError> {
    from_reader_with_scheme(input, Scheme::SECUREVAULT)
}

/// Read a backup from a given path using the given scheme
pub fn open_with_scheme<P: AsRef<Path>>(
    path: P,
    scheme: Scheme,
) -> Result<Backup<Locked>, errors::OpenError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening backup");
    let file = File::open(path)?;
    from_reader_with_scheme(file, scheme)
}

/// Read a SecureVault backup from a given path
///
/// The backup starts locked, use [`Backup::unlock`] to unlock
pub fn open<P: AsRef<Path>>(path: P) -> Result<Backup<Locked>, errors::OpenError> {
    open_with_scheme(path, Scheme::SECUREVAULT)
}
