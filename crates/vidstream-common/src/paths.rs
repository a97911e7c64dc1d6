//! Path utilities for placing catalog destinations under a media root.

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Join a catalog destination onto `root`, refusing anything that would
/// land outside of it.
///
/// A single leading `/` is tolerated because destinations are commonly
/// written as `/clips/intro.mp4` relative to the media directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use vidstream_common::paths::join_under_root;
///
/// let p = join_under_root(Path::new("/srv/media"), "/clips/intro.mp4").unwrap();
/// assert_eq!(p, Path::new("/srv/media/clips/intro.mp4"));
/// assert!(join_under_root(Path::new("/srv/media"), "../secret").is_err());
/// ```
pub fn join_under_root(root: &Path, destination: &str) -> Result<PathBuf> {
    let relative = Path::new(destination.strip_prefix('/').unwrap_or(destination));

    let mut joined = root.to_path_buf();
    let mut pushed = 0usize;
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                joined.push(part);
                pushed += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::validation(format!(
                    "destination escapes media root: {destination:?}"
                )));
            }
        }
    }

    if pushed == 0 {
        return Err(Error::validation(format!(
            "destination does not name a file: {destination:?}"
        )));
    }

    Ok(joined)
}
