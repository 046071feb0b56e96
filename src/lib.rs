//! ifaces - Debian network interfaces file library
//!
//! Reads, edits and writes `/etc/network/interfaces` style files:
//! - Tokenizing lines and detecting stanza headers
//! - Typed stanzas (`iface`, `mapping`, `auto`, `allow-*`, `source`, `source-directory`)
//! - Recursive loading of files pulled in by `source` and `source-directory`
//! - Rendering back to text and saving with backups
//!
//! The `ifacectl` binary is a thin command-line front end.

pub mod error;
pub mod config;
pub mod fs;
pub mod tokenizer;
pub mod stanza;
pub mod interfaces_file;
pub mod writer;

// Re-export commonly used types
pub use error::{IfacesError, IfacesResult};
pub use config::IfacesConfig;
pub use interfaces_file::{InterfacesFile, LoadOptions, SourceOwner};
pub use stanza::{classify, Iface, Mapping, Options, SourceStanza, Stanza, Startup};
pub use tokenizer::{is_stanza_start, tokenize};
pub use writer::SaveOptions;
