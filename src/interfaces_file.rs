//! Parsed interfaces files and their inclusion tree
//!
//! Loading is eager: [`InterfacesFile::load`] reads the file, builds its
//! stanzas, follows every `source` and `source-directory` directive and
//! attaches `auto`/`allow-*` directives to the stanzas they name.

use crate::error::{IfacesError, IfacesResult};
use crate::fs;
use crate::stanza::{classify, Iface, Mapping, SourceStanza, Stanza, Startup};
use crate::tokenizer::{is_blank_or_comment, is_stanza_start, tokenize};
use glob::Pattern;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Header written at the top of saved files
pub const DEFAULT_HEADER: &str = "# Generated by ifaces. A library to manage /etc/network/interfaces files.\n\
# You may manually edit this file, but it may be rewritten by the library.\n";

pub const DEFAULT_BACKUP_SUFFIX: &str = ".back";

/// File names picked up from a `source-directory` (run-parts convention)
pub const SOURCE_DIRECTORY_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

/// Settings shared by a file and every file it includes
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Comment block emitted by `save`
    pub header: String,
    /// Suffix for the copy made before overwriting; `None` disables backups
    pub backup_suffix: Option<String>,
    /// Which `source-directory` entries are loaded
    pub directory_pattern: Regex,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            backup_suffix: Some(DEFAULT_BACKUP_SUFFIX.to_string()),
            directory_pattern: Regex::new(SOURCE_DIRECTORY_PATTERN)
                .expect("valid source-directory pattern"),
        }
    }
}

/// Link from an included file back to the directive that included it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOwner {
    /// Index into the parent's `sources`
    pub index: usize,
    /// Directory of the parent file, base for relative names
    pub base_dir: PathBuf,
}

/// One parsed interfaces file
#[derive(Debug, Clone, Serialize)]
pub struct InterfacesFile {
    /// Name as written by the includer (or given by the caller)
    pub filename: PathBuf,
    path: PathBuf,
    owner: Option<SourceOwner>,
    #[serde(skip)]
    pub header: String,
    #[serde(skip)]
    pub backup_suffix: Option<String>,
    pub interfaces: Vec<Iface>,
    pub mappings: Vec<Mapping>,
    pub sources: Vec<SourceStanza>,
    /// Files included by `sources`, in directive order
    pub children: Vec<InterfacesFile>,
}

fn absolute_path(filename: &Path, owner: Option<&SourceOwner>) -> IfacesResult<PathBuf> {
    if filename.is_absolute() {
        return Ok(fs::resolve_path(Path::new("/"), filename));
    }
    match owner {
        Some(owner) => Ok(fs::resolve_path(&owner.base_dir, filename)),
        None => Err(IfacesError::PathResolution {
            path: filename.to_path_buf(),
        }),
    }
}

/// Stanzas opened by one header line; `auto lo eth0` opens one per name
fn open_stanzas(line: &str, path: &Path) -> IfacesResult<Vec<Stanza>> {
    let cells = tokenize(line);
    let is_startup = cells
        .first()
        .map(|k| k == "auto" || k.starts_with("allow-"))
        .unwrap_or(false);

    if is_startup && cells.len() > 2 {
        return cells[1..]
            .iter()
            .map(|name| classify(&format!("{} {}", cells[0], name), path))
            .collect();
    }
    Ok(vec![classify(line, path)?])
}

/// Read `path` into a flat list of stanzas in file order
fn parse_stanzas(path: &Path) -> IfacesResult<Vec<Stanza>> {
    let mut stanzas = Vec::new();
    let mut current: Option<Stanza> = None;

    for (idx, raw) in fs::read_lines(path)?.iter().enumerate() {
        let lineno = idx + 1;
        if is_blank_or_comment(raw) {
            continue;
        }
        let line = raw.trim();

        if is_stanza_start(line) {
            stanzas.extend(current.take());
            let mut opened = open_stanzas(line, path).map_err(|e| e.at_line(lineno))?;
            current = opened.pop();
            stanzas.extend(opened);
            continue;
        }

        let Some(stanza) = current.as_mut() else {
            return Err(IfacesError::parse(path, "option line outside of any stanza").at_line(lineno));
        };
        match stanza.options_mut() {
            Some(options) => {
                options.push_line(line);
            }
            None => {
                return Err(IfacesError::parse(
                    path,
                    format!("'{}' does not take options", stanza.header_line()),
                )
                .at_line(lineno));
            }
        }
    }

    stanzas.extend(current);
    Ok(stanzas)
}

/// File names (relative to `base_dir` unless absolute) included by `source`
fn expand_source(
    source: &SourceStanza,
    base_dir: &Path,
    options: &LoadOptions,
) -> IfacesResult<Vec<PathBuf>> {
    let written = Path::new(source.path());

    match source {
        SourceStanza::SourceDirectory(_) => {
            let dir = fs::resolve_path(base_dir, written);
            let names = fs::list_regular_files(&dir, &options.directory_pattern)?;
            Ok(names.into_iter().map(|n| written.join(n)).collect())
        }
        SourceStanza::Source(pattern) => {
            if Pattern::escape(pattern) == *pattern {
                return Ok(vec![written.to_path_buf()]);
            }
            // An unclosed `[` is not a pattern, the shell takes it literally
            if let Err(e) = Pattern::new(pattern) {
                debug!("Source '{}' is not a glob ({}), using it as a file name", pattern, e.msg);
                return Ok(vec![written.to_path_buf()]);
            }

            let matches = fs::glob_regular_files(base_dir, pattern)?;
            if matches.is_empty() {
                warn!("Source pattern '{}' matches no files in {}", pattern, base_dir.display());
            }
            Ok(matches
                .into_iter()
                .map(|m| {
                    if written.is_absolute() {
                        m
                    } else {
                        m.strip_prefix(base_dir).map(Path::to_path_buf).unwrap_or(m)
                    }
                })
                .collect())
        }
    }
}

impl InterfacesFile {
    /// Load a top-level file; `filename` must be absolute
    pub fn load(filename: impl AsRef<Path>) -> IfacesResult<Self> {
        Self::load_with(filename, &LoadOptions::default())
    }

    pub fn load_with(filename: impl AsRef<Path>, options: &LoadOptions) -> IfacesResult<Self> {
        let mut ancestors = Vec::new();
        Self::load_tree(filename.as_ref().to_path_buf(), None, options, &mut ancestors)
    }

    fn load_tree(
        filename: PathBuf,
        owner: Option<SourceOwner>,
        options: &LoadOptions,
        ancestors: &mut Vec<PathBuf>,
    ) -> IfacesResult<Self> {
        let path = absolute_path(&filename, owner.as_ref())?;
        let identity = fs::canonical_path(&path);
        if ancestors.contains(&identity) {
            return Err(IfacesError::IncludeCycle { path });
        }

        debug!("Loading interfaces file {}", path.display());

        let mut interfaces = Vec::new();
        let mut mappings = Vec::new();
        let mut sources = Vec::new();
        let mut startups = Vec::new();

        for stanza in parse_stanzas(&path)? {
            match stanza {
                Stanza::Iface(i) => interfaces.push(i),
                Stanza::Mapping(m) => mappings.push(m),
                Stanza::Source(s) | Stanza::SourceDirectory(s) => sources.push(s),
                Stanza::Auto(s) | Stanza::Allow(s) => startups.push(s),
            }
        }

        let base_dir = fs::dirname(&path);
        let mut children = Vec::new();
        ancestors.push(identity);
        for (index, source) in sources.iter().enumerate() {
            for child in expand_source(source, &base_dir, options)? {
                debug!("{} includes {}", path.display(), child.display());
                let owner = SourceOwner {
                    index,
                    base_dir: base_dir.clone(),
                };
                children.push(Self::load_tree(child, Some(owner), options, ancestors)?);
            }
        }
        ancestors.pop();

        for startup in startups {
            attach_startup(&path, &mut interfaces, &mut mappings, startup)?;
        }

        Ok(Self {
            filename,
            path,
            owner,
            header: options.header.clone(),
            backup_suffix: options.backup_suffix.clone(),
            interfaces,
            mappings,
            sources,
            children,
        })
    }

    /// Resolved absolute path of this file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding this file
    pub fn dirname(&self) -> PathBuf {
        fs::dirname(&self.path)
    }

    pub fn owner(&self) -> Option<&SourceOwner> {
        self.owner.as_ref()
    }

    /// The directive in `parent` that included this file
    pub fn source_in<'a>(&self, parent: &'a InterfacesFile) -> Option<&'a SourceStanza> {
        self.owner.as_ref().and_then(|o| parent.sources.get(o.index))
    }

    /// This file followed by all included files, depth-first
    pub fn iter_files(&self) -> impl Iterator<Item = &InterfacesFile> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let file = stack.pop()?;
            stack.extend(file.children.iter().rev());
            Some(file)
        })
    }

    /// Exact name match here first, then in included files depth-first
    pub fn find_interface(&self, name: &str) -> Option<&Iface> {
        self.interfaces
            .iter()
            .find(|i| i.name == name)
            .or_else(|| self.children.iter().find_map(|c| c.find_interface(name)))
    }

    pub fn find_interface_mut(&mut self, name: &str) -> Option<&mut Iface> {
        if let Some(pos) = self.interfaces.iter().position(|i| i.name == name) {
            return Some(&mut self.interfaces[pos]);
        }
        self.children
            .iter_mut()
            .find_map(|c| c.find_interface_mut(name))
    }

    /// Like [`InterfacesFile::find_interface`] but fails with `NotFound`
    pub fn interface(&self, name: &str) -> IfacesResult<&Iface> {
        self.find_interface(name)
            .ok_or_else(|| IfacesError::NotFound(format!("interface {}", name)))
    }

    pub fn find_mapping(&self, name: &str) -> Option<&Mapping> {
        self.mappings
            .iter()
            .find(|m| m.name == name)
            .or_else(|| self.children.iter().find_map(|c| c.find_mapping(name)))
    }

    pub fn find_mapping_mut(&mut self, name: &str) -> Option<&mut Mapping> {
        if let Some(pos) = self.mappings.iter().position(|m| m.name == name) {
            return Some(&mut self.mappings[pos]);
        }
        self.children
            .iter_mut()
            .find_map(|c| c.find_mapping_mut(name))
    }

    /// Interfaces anywhere in the tree whose name contains `needle`
    pub fn search_interfaces(&self, needle: &str) -> Vec<&Iface> {
        self.iter_files()
            .flat_map(|f| f.interfaces.iter())
            .filter(|i| i.name.contains(needle))
            .collect()
    }

    pub fn add_interface(&mut self, iface: Iface) {
        self.interfaces.push(iface);
    }

    /// Remove the first interface named `name` from this file
    pub fn remove_interface(&mut self, name: &str) -> Option<Iface> {
        let pos = self.interfaces.iter().position(|i| i.name == name)?;
        Some(self.interfaces.remove(pos))
    }

    pub fn add_mapping(&mut self, mapping: Mapping) {
        self.mappings.push(mapping);
    }

    pub fn remove_mapping(&mut self, name: &str) -> Option<Mapping> {
        let pos = self.mappings.iter().position(|m| m.name == name)?;
        Some(self.mappings.remove(pos))
    }

    /// Append a directive. The referenced files are not loaded until the
    /// tree is loaded again.
    pub fn add_source(&mut self, source: SourceStanza) {
        self.sources.push(source);
    }

    /// XOR of this file's stanza hashes; included files are not covered
    pub fn content_hash(&self) -> u64 {
        let ifaces = self.interfaces.iter().map(Iface::content_hash);
        let maps = self.mappings.iter().map(Mapping::content_hash);
        let sources = self.sources.iter().map(SourceStanza::content_hash);
        ifaces.chain(maps).chain(sources).fold(0, |acc, h| acc ^ h)
    }
}

fn attach_startup(
    path: &Path,
    interfaces: &mut [Iface],
    mappings: &mut [Mapping],
    startup: Startup,
) -> IfacesResult<()> {
    debug!("Attaching '{}' in {}", startup, path.display());

    if let Some(iface) = interfaces.iter_mut().find(|i| i.name == startup.iface_name) {
        iface.startups.push(startup);
        return Ok(());
    }
    if let Some(mapping) = mappings.iter_mut().find(|m| m.name == startup.iface_name) {
        mapping.startups.push(startup);
        return Ok(());
    }
    Err(IfacesError::DanglingReference {
        path: path.to_path_buf(),
        name: startup.iface_name,
    })
}
