//! Stanza model for the interfaces format
//!
//! A stanza is one configuration paragraph opened by a keyword line:
//! - `auto` / `allow-*`: startup directives naming an interface
//! - `iface`: interface definition with free-form options
//! - `mapping`: interface mapping with `map` entries
//! - `source` / `source-directory`: inclusion of other files
//!
//! Fixed header positions are typed fields on each variant; body lines are
//! kept in an ordered [`Options`] list.

use crate::error::{IfacesError, IfacesResult};
use crate::tokenizer::tokenize;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

fn hash_tokens<T: AsRef<str>>(tokens: &[T]) -> u64 {
    let mut hasher = DefaultHasher::new();
    tokens.len().hash(&mut hasher);
    for token in tokens {
        token.as_ref().hash(&mut hasher);
    }
    hasher.finish()
}

/// Field names use underscores, the file format uses hyphens
fn normalize_key(key: &str) -> String {
    key.replace('_', "-")
}

/// Ordered body entries of a multiline stanza.
///
/// Each entry is `[key, value tokens...]`. Parsing keeps every line as
/// written, so repeated keys such as `up` survive a load/save cycle;
/// lookups and updates act on the first entry with a given key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Options {
    entries: Vec<Vec<String>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw body line. Returns false if the line had no tokens.
    pub fn push_line(&mut self, line: &str) -> bool {
        let cells = tokenize(line);
        if cells.is_empty() {
            return false;
        }
        self.entries.push(cells);
        true
    }

    fn position(&self, key: &str) -> Option<usize> {
        let key = normalize_key(key);
        self.entries.iter().position(|e| e[0] == key)
    }

    /// Value tokens of `key`, space-joined
    pub fn get(&self, key: &str) -> Option<String> {
        self.position(key).map(|i| self.entries[i][1..].join(" "))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Set `key` to the whitespace-split tokens of `value`.
    ///
    /// An existing entry keeps its position; a new one is appended.
    pub fn set(&mut self, key: &str, value: &str) {
        let values = value.split_whitespace().map(str::to_string);
        match self.position(key) {
            Some(i) => {
                let entry = &mut self.entries[i];
                entry.truncate(1);
                entry.extend(values);
            }
            None => {
                let mut entry = vec![normalize_key(key)];
                entry.extend(values);
                self.entries.push(entry);
            }
        }
    }

    /// Remove the first entry for `key`, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.position(key)
            .map(|i| self.entries.remove(i)[1..].join(" "))
    }

    pub fn entries(&self) -> impl Iterator<Item = &[String]> {
        self.entries.iter().map(Vec::as_slice)
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<Vec<String>> {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Order-independent hash over the entries
    pub fn content_hash(&self) -> u64 {
        self.entries.iter().fold(0, |acc, e| acc ^ hash_tokens(e))
    }

    fn write_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "  {}", entry.join(" "))?;
        }
        Ok(())
    }
}

/// `auto` or `allow-*` directive bringing an interface up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Startup {
    /// The directive keyword (`auto`, `allow-hotplug`, ...)
    pub mode: String,
    pub iface_name: String,
}

impl Startup {
    pub fn auto(iface_name: impl Into<String>) -> Self {
        Self {
            mode: "auto".to_string(),
            iface_name: iface_name.into(),
        }
    }

    pub fn allow(class: &str, iface_name: impl Into<String>) -> Self {
        Self {
            mode: format!("allow-{}", class),
            iface_name: iface_name.into(),
        }
    }

    pub fn is_auto(&self) -> bool {
        self.mode == "auto"
    }

    /// The `allow-` class, e.g. `hotplug`
    pub fn allow_class(&self) -> Option<&str> {
        self.mode.strip_prefix("allow-")
    }

    pub fn content_hash(&self) -> u64 {
        hash_tokens(&[self.mode.as_str(), self.iface_name.as_str()])
    }
}

impl fmt::Display for Startup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mode, self.iface_name)
    }
}

/// `iface NAME FAMILY METHOD` with its options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Iface {
    pub name: String,
    pub address_family: String,
    pub method: String,
    pub options: Options,
    /// Startup directives attached at load time, in source order
    pub startups: Vec<Startup>,
}

impl Iface {
    pub fn new(
        name: impl Into<String>,
        address_family: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address_family: address_family.into(),
            method: method.into(),
            options: Options::new(),
            startups: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.options.get(key)
    }

    /// Like [`Iface::get`] but fails with `FieldNotFound`
    pub fn field(&self, key: &str) -> IfacesResult<String> {
        self.get(key).ok_or_else(|| IfacesError::FieldNotFound {
            stanza: self.header_line(),
            key: key.to_string(),
        })
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.options.set(key, value)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.options.remove(key)
    }

    /// Change the name along with every attached startup directive
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        for startup in &mut self.startups {
            startup.iface_name.clone_from(&self.name);
        }
    }

    pub fn is_auto(&self) -> bool {
        self.startups.iter().any(Startup::is_auto)
    }

    pub fn header_line(&self) -> String {
        format!("iface {} {} {}", self.name, self.address_family, self.method)
    }

    pub fn content_hash(&self) -> u64 {
        let header = hash_tokens(&[
            "iface",
            self.name.as_str(),
            self.address_family.as_str(),
            self.method.as_str(),
        ]);
        self.startups
            .iter()
            .fold(header ^ self.options.content_hash(), |acc, s| acc ^ s.content_hash())
    }
}

impl fmt::Display for Iface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for startup in &self.startups {
            writeln!(f, "{} {}", startup.mode, self.name)?;
        }
        writeln!(f, "{}", self.header_line())?;
        self.options.write_body(f)
    }
}

/// `mapping NAME [PATTERN...]` with `script` and `map` entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mapping {
    pub name: String,
    /// Further interface patterns on the header line
    pub patterns: Vec<String>,
    pub options: Options,
    pub startups: Vec<Startup>,
}

impl Mapping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            patterns: Vec::new(),
            options: Options::new(),
            startups: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.options.get(key)
    }

    pub fn field(&self, key: &str) -> IfacesResult<String> {
        self.get(key).ok_or_else(|| IfacesError::FieldNotFound {
            stanza: self.header_line(),
            key: key.to_string(),
        })
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.options.set(key, value)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.options.remove(key)
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        for startup in &mut self.startups {
            startup.iface_name.clone_from(&self.name);
        }
    }

    /// All `map` entries, without the leading `map` keyword
    pub fn maps(&self) -> impl Iterator<Item = &[String]> {
        self.options
            .entries()
            .filter(|e| e[0] == "map")
            .map(|e| &e[1..])
    }

    /// Tokens following `map TARGET`, space-joined
    pub fn map_value(&self, target: &str) -> Option<String> {
        self.maps()
            .find(|m| m.first().map(String::as_str) == Some(target))
            .map(|m| m[1..].join(" "))
    }

    pub fn map_field(&self, target: &str) -> IfacesResult<String> {
        self.map_value(target).ok_or_else(|| IfacesError::FieldNotFound {
            stanza: self.header_line(),
            key: format!("map {}", target),
        })
    }

    /// Replace the `map TARGET` entry in place, or append a new one
    pub fn set_map(&mut self, target: &str, value: &str) {
        let mut entry = vec!["map".to_string(), target.to_string()];
        entry.extend(value.split_whitespace().map(str::to_string));

        let entries = self.options.entries_mut();
        match entries
            .iter_mut()
            .find(|e| e[0] == "map" && e.get(1).map(String::as_str) == Some(target))
        {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }

    pub fn header_line(&self) -> String {
        let mut line = format!("mapping {}", self.name);
        for pattern in &self.patterns {
            line.push(' ');
            line.push_str(pattern);
        }
        line
    }

    pub fn content_hash(&self) -> u64 {
        let mut header = vec!["mapping", self.name.as_str()];
        header.extend(self.patterns.iter().map(String::as_str));
        self.startups.iter().fold(
            hash_tokens(&header) ^ self.options.content_hash(),
            |acc, s| acc ^ s.content_hash(),
        )
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for startup in &self.startups {
            writeln!(f, "{} {}", startup.mode, self.name)?;
        }
        writeln!(f, "{}", self.header_line())?;
        self.options.write_body(f)
    }
}

/// `source PATH` or `source-directory DIR`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "kebab-case")]
pub enum SourceStanza {
    Source(String),
    SourceDirectory(String),
}

impl SourceStanza {
    pub fn keyword(&self) -> &'static str {
        match self {
            SourceStanza::Source(_) => "source",
            SourceStanza::SourceDirectory(_) => "source-directory",
        }
    }

    /// The referenced file, glob or directory as written
    pub fn path(&self) -> &str {
        match self {
            SourceStanza::Source(p) | SourceStanza::SourceDirectory(p) => p,
        }
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        match self {
            SourceStanza::Source(p) | SourceStanza::SourceDirectory(p) => *p = path.into(),
        }
    }

    pub fn content_hash(&self) -> u64 {
        hash_tokens(&[self.keyword(), self.path()])
    }
}

impl fmt::Display for SourceStanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keyword(), self.path())
    }
}

/// Any stanza as produced by [`classify`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stanza {
    Auto(Startup),
    Allow(Startup),
    Iface(Iface),
    Mapping(Mapping),
    Source(SourceStanza),
    SourceDirectory(SourceStanza),
}

impl Stanza {
    /// Whether body lines may follow this stanza's header
    pub fn is_multiline(&self) -> bool {
        matches!(self, Stanza::Iface(_) | Stanza::Mapping(_))
    }

    pub fn options(&self) -> Option<&Options> {
        match self {
            Stanza::Iface(i) => Some(&i.options),
            Stanza::Mapping(m) => Some(&m.options),
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut Options> {
        match self {
            Stanza::Iface(i) => Some(&mut i.options),
            Stanza::Mapping(m) => Some(&mut m.options),
            _ => None,
        }
    }

    /// Generic body lookup; single-line stanzas have no body
    pub fn get(&self, key: &str) -> Option<String> {
        self.options().and_then(|o| o.get(key))
    }

    pub fn field(&self, key: &str) -> IfacesResult<String> {
        self.get(key).ok_or_else(|| IfacesError::FieldNotFound {
            stanza: self.header_line(),
            key: key.to_string(),
        })
    }

    pub fn header_line(&self) -> String {
        match self {
            Stanza::Auto(s) | Stanza::Allow(s) => s.to_string(),
            Stanza::Iface(i) => i.header_line(),
            Stanza::Mapping(m) => m.header_line(),
            Stanza::Source(s) | Stanza::SourceDirectory(s) => s.to_string(),
        }
    }

    pub fn content_hash(&self) -> u64 {
        match self {
            Stanza::Auto(s) | Stanza::Allow(s) => s.content_hash(),
            Stanza::Iface(i) => i.content_hash(),
            Stanza::Mapping(m) => m.content_hash(),
            Stanza::Source(s) | Stanza::SourceDirectory(s) => s.content_hash(),
        }
    }
}

impl fmt::Display for Stanza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stanza::Auto(s) | Stanza::Allow(s) => writeln!(f, "{}", s),
            Stanza::Iface(i) => fmt::Display::fmt(i, f),
            Stanza::Mapping(m) => fmt::Display::fmt(m, f),
            Stanza::Source(s) | Stanza::SourceDirectory(s) => writeln!(f, "{}", s),
        }
    }
}

type Constructor = fn(Vec<String>) -> Result<Stanza, String>;

/// Registered stanza kinds, most specific tags first
const VARIANTS: &[(&str, Constructor)] = &[
    ("auto", build_auto),
    ("allow-", build_allow),
    ("iface", build_iface),
    ("mapping", build_mapping),
    ("source-directory", build_source_directory),
    ("source", build_source),
];

fn expect_arity(cells: &[String], n: usize, usage: &str) -> Result<(), String> {
    if cells.len() == n {
        Ok(())
    } else {
        Err(format!("expected '{}', got '{}'", usage, cells.join(" ")))
    }
}

fn build_startup(cells: Vec<String>) -> Result<Startup, String> {
    expect_arity(&cells, 2, "<auto|allow-CLASS> IFACE")?;
    let mut cells = cells.into_iter();
    Ok(Startup {
        mode: cells.next().unwrap_or_default(),
        iface_name: cells.next().unwrap_or_default(),
    })
}

fn build_auto(cells: Vec<String>) -> Result<Stanza, String> {
    build_startup(cells).map(Stanza::Auto)
}

fn build_allow(cells: Vec<String>) -> Result<Stanza, String> {
    build_startup(cells).map(Stanza::Allow)
}

fn build_iface(cells: Vec<String>) -> Result<Stanza, String> {
    expect_arity(&cells, 4, "iface NAME FAMILY METHOD")?;
    Ok(Stanza::Iface(Iface::new(
        cells[1].clone(),
        cells[2].clone(),
        cells[3].clone(),
    )))
}

fn build_mapping(mut cells: Vec<String>) -> Result<Stanza, String> {
    if cells.len() < 2 {
        return Err(format!("expected 'mapping NAME [PATTERN...]', got '{}'", cells.join(" ")));
    }
    let patterns = cells.split_off(2);
    let mut mapping = Mapping::new(cells.swap_remove(1));
    mapping.patterns = patterns;
    Ok(Stanza::Mapping(mapping))
}

fn build_source(cells: Vec<String>) -> Result<Stanza, String> {
    expect_arity(&cells, 2, "source PATH")?;
    Ok(Stanza::Source(SourceStanza::Source(cells[1].clone())))
}

fn build_source_directory(cells: Vec<String>) -> Result<Stanza, String> {
    expect_arity(&cells, 2, "source-directory DIR")?;
    Ok(Stanza::SourceDirectory(SourceStanza::SourceDirectory(cells[1].clone())))
}

/// Build a stanza from its header line.
///
/// The first token is matched exactly against the registered tags, then as a
/// prefix (`allow-hotplug` matches `allow-`); first match wins.
pub fn classify(header: &str, filename: &Path) -> IfacesResult<Stanza> {
    let cells = tokenize(header);
    let kind = cells
        .first()
        .ok_or_else(|| IfacesError::parse(filename, "empty stanza header"))?;

    let constructor = VARIANTS
        .iter()
        .find(|(tag, _)| kind == *tag)
        .or_else(|| VARIANTS.iter().find(|(tag, _)| kind.starts_with(*tag)))
        .map(|(_, build)| *build)
        .ok_or_else(|| IfacesError::parse(filename, format!("unknown stanza kind '{}'", kind)))?;

    constructor(cells).map_err(|reason| IfacesError::parse(filename, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(header: &str, body: &[&str]) -> Stanza {
        let mut stanza = classify(header, Path::new("/test")).unwrap();
        for line in body {
            assert!(stanza.options_mut().unwrap().push_line(line));
        }
        stanza
    }

    fn iface(header: &str, body: &[&str]) -> Iface {
        match parse(header, body) {
            Stanza::Iface(i) => i,
            other => panic!("expected iface, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_kinds() {
        let p = Path::new("/test");
        assert!(matches!(classify("auto eth0", p).unwrap(), Stanza::Auto(_)));
        assert!(matches!(classify("allow-hotplug eth0", p).unwrap(), Stanza::Allow(_)));
        assert!(matches!(classify("iface eth0 inet dhcp", p).unwrap(), Stanza::Iface(_)));
        assert!(matches!(classify("mapping eth1", p).unwrap(), Stanza::Mapping(_)));
        assert!(matches!(classify("source a.conf", p).unwrap(), Stanza::Source(_)));
        assert!(matches!(
            classify("source-directory interfaces.d", p).unwrap(),
            Stanza::SourceDirectory(_)
        ));
    }

    #[test]
    fn test_classify_allow_class() {
        match classify("allow-hotplug eth0", Path::new("/test")).unwrap() {
            Stanza::Allow(s) => {
                assert_eq!(s.allow_class(), Some("hotplug"));
                assert_eq!(s.iface_name, "eth0");
                assert!(!s.is_auto());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_classify_rejects_unknown_and_bad_arity() {
        let p = Path::new("/test");
        assert!(matches!(
            classify("bogus eth0", p),
            Err(IfacesError::ParseStructure { .. })
        ));
        assert!(classify("iface eth0 inet", p).is_err());
        assert!(classify("source", p).is_err());
        assert!(classify("mapping", p).is_err());
        assert!(classify("", p).is_err());
    }

    #[test]
    fn test_iface_header_fields() {
        let mut i = iface("iface eth0 inet static", &[]);
        assert_eq!(i.name, "eth0");
        assert_eq!(i.address_family, "inet");
        assert_eq!(i.method, "static");

        i.method = "dhcp".to_string();
        assert_eq!(i.header_line(), "iface eth0 inet dhcp");
    }

    #[test]
    fn test_get_normalizes_underscores() {
        let i = iface("iface br0 inet manual", &["bridge-ports eth0 eth1"]);
        assert_eq!(i.get("bridge_ports").as_deref(), Some("eth0 eth1"));
        assert_eq!(i.get("bridge-ports").as_deref(), Some("eth0 eth1"));
        assert!(i.get("address").is_none());
        assert!(matches!(
            i.field("address"),
            Err(IfacesError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_set_then_get() {
        let mut i = iface("iface eth0 inet static", &[]);
        i.set("dns_nameservers", "  8.8.8.8   1.1.1.1 ");
        assert_eq!(i.get("dns-nameservers").as_deref(), Some("8.8.8.8 1.1.1.1"));
    }

    #[test]
    fn test_set_existing_keeps_position() {
        let mut i = iface(
            "iface eth0 inet static",
            &["address 10.0.0.2", "netmask 255.0.0.0", "gateway 10.0.0.1"],
        );
        i.set("netmask", "255.255.0.0");
        let keys: Vec<&str> = i.options.entries().map(|e| e[0].as_str()).collect();
        assert_eq!(keys, vec!["address", "netmask", "gateway"]);
        assert_eq!(i.get("netmask").as_deref(), Some("255.255.0.0"));

        i.set("mtu", "9000");
        assert_eq!(i.options.entries().last().unwrap()[0], "mtu");
    }

    #[test]
    fn test_remove() {
        let mut i = iface("iface eth0 inet static", &["address 10.0.0.2", "mtu 1500"]);
        assert_eq!(i.remove("address").as_deref(), Some("10.0.0.2"));
        assert!(i.get("address").is_none());
        assert_eq!(i.options.len(), 1);
        assert!(i.remove("address").is_none());
    }

    #[test]
    fn test_mapping_map_lookup() {
        let m = match parse(
            "mapping eth1",
            &["script /usr/bin/foo", "map eth1 HOME script-path", "map eth2 WORK"],
        ) {
            Stanza::Mapping(m) => m,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(m.map_value("eth1").as_deref(), Some("HOME script-path"));
        assert_eq!(m.map_value("eth2").as_deref(), Some("WORK"));
        assert!(m.map_value("eth3").is_none());
        assert!(m.map_field("eth3").is_err());
        assert_eq!(m.get("script").as_deref(), Some("/usr/bin/foo"));
        assert_eq!(m.maps().count(), 2);
    }

    #[test]
    fn test_mapping_set_map() {
        let mut m = Mapping::new("eth1");
        m.set_map("eth1", "HOME");
        m.set("script", "/usr/bin/foo");
        m.set_map("eth1", "WORK");
        assert_eq!(m.map_value("eth1").as_deref(), Some("WORK"));
        assert_eq!(m.options.len(), 2);
    }

    #[test]
    fn test_mapping_patterns() {
        match classify("mapping eth0 eth1 eth2", Path::new("/test")).unwrap() {
            Stanza::Mapping(m) => {
                assert_eq!(m.name, "eth0");
                assert_eq!(m.patterns, vec!["eth1", "eth2"]);
                assert_eq!(m.header_line(), "mapping eth0 eth1 eth2");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_content_hash_ignores_entry_order() {
        let a = parse("iface eth0 inet static", &["address 10.0.0.2", "netmask 255.0.0.0"]);
        let b = parse("iface eth0 inet static", &["netmask 255.0.0.0", "address 10.0.0.2"]);
        assert_eq!(a.content_hash(), b.content_hash());

        let c = parse("iface eth0 inet static", &["address 10.0.0.3", "netmask 255.0.0.0"]);
        assert_ne!(a.content_hash(), c.content_hash());
    }

    #[test]
    fn test_content_hash_covers_header() {
        let a = parse("iface eth0 inet static", &[]);
        let b = parse("iface eth0 inet dhcp", &[]);
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_iface_display() {
        let mut i = iface("iface eth0 inet static", &["address 192.168.1.5"]);
        i.startups.push(Startup::auto("eth0"));
        assert_eq!(
            i.to_string(),
            "auto eth0\niface eth0 inet static\n  address 192.168.1.5\n"
        );
    }

    #[test]
    fn test_display_uses_current_name() {
        let mut i = iface("iface eth0 inet dhcp", &[]);
        i.startups.push(Startup::auto("eth0"));
        i.startups.push(Startup::allow("hotplug", "eth0"));
        i.name = "eth1".to_string();
        assert_eq!(
            i.to_string(),
            "auto eth1\nallow-hotplug eth1\niface eth1 inet dhcp\n"
        );
    }

    #[test]
    fn test_rename_updates_startups() {
        let mut i = iface("iface eth0 inet dhcp", &[]);
        i.startups.push(Startup::auto("eth0"));
        i.rename("br0");
        assert_eq!(i.startups, vec![Startup::auto("br0")]);

        let mut m = Mapping::new("eth0");
        m.startups.push(Startup::allow("hotplug", "eth0"));
        m.rename("wlan0");
        assert_eq!(m.startups, vec![Startup::allow("hotplug", "wlan0")]);
        assert_eq!(m.to_string(), "allow-hotplug wlan0\nmapping wlan0\n");
    }

    #[test]
    fn test_single_line_stanzas_have_no_body() {
        let s = classify("source-directory interfaces.d", Path::new("/test")).unwrap();
        assert!(!s.is_multiline());
        assert!(s.get("anything").is_none());
        assert_eq!(s.to_string(), "source-directory interfaces.d\n");
    }
}
