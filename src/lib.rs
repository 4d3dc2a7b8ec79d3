//! # linefmt
//!
//! Fixed-width terminal line formatting driven by a small template language.
//!
//! Templates mix literal text with `{...}` substitutions that pull single-character
//! fields from a map and size them in absolute columns, percentages of the
//! line, or equal "star" shares of whatever is left:
//!
//! ```rust
//! use linefmt::Formatter;
//! use std::collections::HashMap;
//!
//! let mut formatter = Formatter::new("{-*%:%a - %t}{*%:[%l]}");
//! let data = HashMap::from([
//!     ('a', "Kino".to_string()),
//!     ('t', "Kukushka".to_string()),
//!     ('l', "6:40".to_string()),
//! ]);
//!
//! let line = formatter.format(&data, 30);
//! assert_eq!(line, "Kino - Kukushka         [6:40]");
//! assert_eq!(line.chars().count(), 30);
//! ```
//!
//! The pipeline is [`parser::parse`] → [`resolve::resolve`] →
//! [`render::render`]; [`Formatter`] caches the first two steps per line width.

pub mod config;
pub mod error;
pub mod formatter;
pub mod layout;
pub mod node;
pub mod parser;
pub mod records;
pub mod render;
pub mod resolve;
pub mod utils;
pub mod version;

pub use config::Config;
pub use error::{LinefmtError, Result, TemplateError};
pub use formatter::{validate, Formatter};
pub use layout::Layout;
pub use node::{Node, Subst, Width};
pub use records::{Fields, Record};
pub use version::{short_version, version_string};
