use crate::error::{Error, Result};
use crate::fs::Filesystem;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkStyle {
    /// Links point at the absolute path of the source.
    #[default]
    Absolute,
    Relative,
}

/// Create a symlink at `target` pointing at `source`, creating missing parent
/// directories first. An existing symlink at `target` is replaced only when
/// `clobber` is set; anything else already there is left alone and the OS
/// error is returned.
pub fn create_symlink<F>(
    fs: &F,
    source: &Path,
    target: &Path,
    clobber: bool,
    style: LinkStyle,
) -> Result<()>
where
    F: Filesystem + ?Sized,
{
    if style == LinkStyle::Relative {
        return Err(Error::NotImplemented("relative symlinks"));
    }

    let original =
        std::path::absolute(source).map_err(|e| Error::io("resolve", source, e))?;

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent)
            .map_err(|e| Error::io("create directory", parent, e))?;
    }

    if clobber && fs.is_symlink(target) {
        tracing::debug!(target = %target.display(), "removing existing symlink");
        fs.remove_file(target)
            .map_err(|e| Error::io("remove symlink", target, e))?;
    }

    fs.symlink(&original, target)
        .map_err(|e| Error::io("create symlink", target, e))?;

    tracing::debug!(source = %original.display(), target = %target.display(), "linked");
    Ok(())
}
