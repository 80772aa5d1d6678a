//! Formatting helpers for dirview.
//!
//! Turns file metadata into the 10 character POSIX mode string shown in front of every entry
//! (`drwxr-xr-x`, `-rwsr-x--T`, ...).

use std::fs::Metadata;

/// Placeholder mode string used when the metadata of an entry cannot be read.
pub const UNKNOWN_MODE: &str = "??????????";

const SETUID: u32 = 0o4000;
const SETGID: u32 = 0o2000;
const STICKY: u32 = 0o1000;

/// Formats the permission bits of `mode` behind the given type character.
///
/// The special bits replace the execute slot of their triad the same way `ls -l` does:
/// `s`/`S` for setuid and setgid, `t`/`T` for the sticky bit. Lowercase when the execute bit
/// underneath is set, uppercase when it is not.
pub fn format_mode_bits(type_char: char, mode: u32) -> String {
    let mut chars = [type_char, '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    let shifts = [6, 3, 0];
    for (i, &shift) in shifts.iter().enumerate() {
        let base = 1 + i * 3;
        if (mode >> (shift + 2)) & 1 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1 != 0 {
            chars[base + 1] = 'w';
        }
        if (mode >> shift) & 1 != 0 {
            chars[base + 2] = 'x';
        }
    }

    let specials = [(SETUID, 3, 's'), (SETGID, 6, 's'), (STICKY, 9, 't')];
    for (bit, slot, mark) in specials {
        if mode & bit != 0 {
            chars[slot] = if chars[slot] == 'x' {
                mark
            } else {
                mark.to_ascii_uppercase()
            };
        }
    }
    chars.iter().collect()
}

/// Builds the mode string for an entry from its (non following) metadata.
pub fn format_mode(meta: &Metadata) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::fs::{FileTypeExt, PermissionsExt};

        let ft = meta.file_type();
        let type_char = if ft.is_dir() {
            'd'
        } else if ft.is_symlink() {
            'l'
        } else if ft.is_block_device() {
            'b'
        } else if ft.is_char_device() {
            'c'
        } else if ft.is_fifo() {
            'p'
        } else if ft.is_socket() {
            's'
        } else {
            '-'
        };
        format_mode_bits(type_char, meta.permissions().mode())
    }
    #[cfg(not(unix))]
    {
        let ft = meta.file_type();
        let type_char = if ft.is_dir() {
            'd'
        } else if ft.is_symlink() {
            'l'
        } else {
            '-'
        };
        // No unix mode bits here, approximate from the readonly flag.
        let mode = if meta.permissions().readonly() {
            0o444
        } else {
            0o644
        };
        format_mode_bits(type_char, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_permissions() {
        assert_eq!(format_mode_bits('d', 0o755), "drwxr-xr-x");
        assert_eq!(format_mode_bits('-', 0o644), "-rw-r--r--");
        assert_eq!(format_mode_bits('l', 0o777), "lrwxrwxrwx");
        assert_eq!(format_mode_bits('-', 0), "----------");
    }

    #[test]
    fn special_bits_follow_exec_slot() {
        assert_eq!(format_mode_bits('-', 0o4755), "-rwsr-xr-x");
        assert_eq!(format_mode_bits('-', 0o4644), "-rwSr--r--");
        assert_eq!(format_mode_bits('-', 0o2755), "-rwxr-sr-x");
        assert_eq!(format_mode_bits('-', 0o2745), "-rwxr-Sr-x");
        assert_eq!(format_mode_bits('d', 0o1777), "drwxrwxrwt");
        assert_eq!(format_mode_bits('d', 0o1776), "drwxrwxrwT");
    }

    #[cfg(unix)]
    #[test]
    fn metadata_of_directory() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub)?;
        std::fs::set_permissions(&sub, std::fs::Permissions::from_mode(0o750))?;

        let meta = std::fs::symlink_metadata(&sub)?;
        assert_eq!(format_mode(&meta), "drwxr-x---");
        Ok(())
    }
}
