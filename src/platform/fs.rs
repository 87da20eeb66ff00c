// Platform-specific filesystem attribute operations

use std::io;
use std::path::Path;

#[cfg(windows)]
fn file_attributes(path: &Path) -> io::Result<u32> {
    use std::os::windows::fs::MetadataExt;
    Ok(std::fs::metadata(path)?.file_attributes())
}

#[cfg(windows)]
pub fn is_hidden(path: &Path) -> io::Result<bool> {
    use windows_sys::Win32::Storage::FileSystem::FILE_ATTRIBUTE_HIDDEN;

    Ok(file_attributes(path)? & FILE_ATTRIBUTE_HIDDEN != 0)
}

#[cfg(windows)]
pub fn set_hidden(path: &Path, hidden: bool) -> io::Result<()> {
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::{
        SetFileAttributesW, FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_NORMAL,
    };

    let current = file_attributes(path)?;
    let mut updated = if hidden {
        current | FILE_ATTRIBUTE_HIDDEN
    } else {
        current & !FILE_ATTRIBUTE_HIDDEN
    };
    // NORMAL is only valid on its own
    if updated == 0 {
        updated = FILE_ATTRIBUTE_NORMAL;
    }

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let ok = unsafe { SetFileAttributesW(wide.as_ptr(), updated) };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}

#[cfg(not(windows))]
pub fn is_hidden(path: &Path) -> io::Result<bool> {
    // No hidden attribute outside Windows; still report missing files
    std::fs::metadata(path)?;
    Ok(false)
}

#[cfg(not(windows))]
pub fn set_hidden(path: &Path, _hidden: bool) -> io::Result<()> {
    std::fs::metadata(path)?;
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "hidden file attribute is only available on Windows",
    ))
}
