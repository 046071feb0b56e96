//! Serializing interfaces files back to disk
//!
//! Output order is the header, then interfaces, then mappings, then the
//! `source` directives. Startup directives are written directly above the
//! stanza they were attached to.
//!
//! Backup and overwrite are two separate steps. A crash in between can leave
//! a backup without an updated file.

use crate::error::IfacesResult;
use crate::fs;
use crate::interfaces_file::InterfacesFile;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Also save every included file, relative to the saved parent
    pub recursive: bool,
    /// Write here instead of the file's own name
    pub filename: Option<PathBuf>,
    /// Base for a relative `filename`
    pub directory: Option<PathBuf>,
}

impl SaveOptions {
    pub fn recursive() -> Self {
        Self {
            recursive: true,
            ..Self::default()
        }
    }
}

impl InterfacesFile {
    /// Text written by [`InterfacesFile::save`]
    pub fn render(&self) -> String {
        let mut out = self.header.clone();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }

        for iface in &self.interfaces {
            out.push_str(&format!("\n{}", iface));
        }
        for mapping in &self.mappings {
            out.push_str(&format!("\n{}", mapping));
        }
        if !self.sources.is_empty() {
            out.push('\n');
            for source in &self.sources {
                out.push_str(&format!("{}\n", source));
            }
        }
        out
    }

    /// Where `save` writes this file
    pub fn save_target(&self, options: &SaveOptions) -> PathBuf {
        match (&options.filename, &options.directory) {
            (Some(name), _) if name.is_absolute() => name.clone(),
            (Some(name), Some(dir)) => fs::resolve_path(dir, name),
            (Some(name), None) => fs::resolve_path(&self.dirname(), name),
            (None, Some(dir)) if !self.filename.is_absolute() => {
                fs::resolve_path(dir, &self.filename)
            }
            (None, _) => self.path().to_path_buf(),
        }
    }

    /// Write this file, backing up any existing one first.
    ///
    /// A failed backup aborts the save.
    pub fn save(&self, options: &SaveOptions) -> IfacesResult<()> {
        let target = self.save_target(options);

        if let Some(suffix) = self.backup_suffix.as_deref().filter(|s| !s.is_empty()) {
            if target.exists() {
                let mut backup = target.clone().into_os_string();
                backup.push(suffix);
                let backup = PathBuf::from(backup);
                fs::copy_file(&target, &backup)?;
                info!("Backed up {} to {}", target.display(), backup.display());
            }
        }

        fs::write_file(&target, &self.render())?;
        info!("Saved interfaces file {}", target.display());

        if options.recursive {
            let dir = fs::dirname(&target);
            for child in &self.children {
                child.save(&SaveOptions {
                    recursive: true,
                    filename: None,
                    directory: Some(dir.clone()),
                })?;
            }
        }
        Ok(())
    }
}
