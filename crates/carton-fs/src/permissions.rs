use std::fs::Metadata;

/// Mode used for directories created without a stored mode.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Mode used for files created without a stored mode.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Unix-style mode bits (type and permission) for `metadata`.
///
/// On Unix the raw `st_mode` is returned. Elsewhere the bits are
/// synthesized from the directory flag and the read-only attribute.
#[cfg(unix)]
pub fn mode_of(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
pub fn mode_of(metadata: &Metadata) -> u32 {
    let base = if metadata.is_dir() {
        DEFAULT_DIR_MODE
    } else {
        DEFAULT_FILE_MODE
    };
    if metadata.permissions().readonly() {
        base & !0o222
    } else {
        base
    }
}

/// Strips the file-type bits, keeping permission, setuid/setgid and sticky bits.
pub fn permission_bits(mode: u32) -> u32 {
    mode & 0o7777
}
