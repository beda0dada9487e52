//! Small filesystem and parsing helpers.

use std::{fs, io, path::Path, process::Command};

/// Parse a boolean value from a raw string, accepting common env-style forms.
///
/// Accepted truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`.
/// Accepted falsy values: `"0"`, `"false"`, `"no"`, `"off"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Report whether `path` exists.
///
/// A missing path is `Ok(false)`. Any other stat failure (permission denied,
/// a non-directory path component, ...) is returned as an error rather than
/// being treated as absence.
pub fn path_exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Look up the host name of the machine.
///
/// On Linux the kernel's view is read first, then `/etc/hostname`. Other
/// platforms (and Linux hosts without either file) ask the `hostname`
/// command, which ships with macOS, the BSDs, and Windows.
pub fn hostname() -> io::Result<String> {
    clean_hostname(&raw_hostname()?)
}

#[cfg(target_os = "linux")]
fn raw_hostname() -> io::Result<String> {
    fs::read_to_string("/proc/sys/kernel/hostname")
        .or_else(|_| fs::read_to_string("/etc/hostname"))
        .or_else(|_| hostname_command())
}

#[cfg(not(target_os = "linux"))]
fn raw_hostname() -> io::Result<String> {
    hostname_command()
}

fn hostname_command() -> io::Result<String> {
    let output = Command::new("hostname").output()?;
    if !output.status.success() {
        return Err(io::Error::other(format!(
            "`hostname` exited with {}",
            output.status
        )));
    }
    String::from_utf8(output.stdout)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn clean_hostname(raw: &str) -> io::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "host name is empty",
        ));
    }
    Ok(trimmed.to_string())
}

/// Extension of the final path component: everything after its last `.`,
/// case preserved. Unlike [`Path::extension`], a leading dot counts, so
/// `.json` yields `json`.
pub fn file_extension(path: &Path) -> Option<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}
