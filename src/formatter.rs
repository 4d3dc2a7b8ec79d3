//! Cached template formatter.
//!
//! A [`Formatter`] owns one template and keeps the node list resolved for the
//! most recent line width. Display surfaces are redrawn far more often than
//! they are resized, so most calls go straight to rendering.
//!
//! # Example
//!
//! ```
//! use linefmt::Formatter;
//! use std::collections::HashMap;
//!
//! let mut f = Formatter::new("{-*%:%a - %t}{20%:%l}");
//! let data = HashMap::from([
//!     ('a', "Artist".to_string()),
//!     ('t', "Title".to_string()),
//!     ('l', "3:45".to_string()),
//! ]);
//! assert_eq!(f.format(&data, 24), "Artist - Title      3:45");
//! ```

use log::{debug, error};
use std::collections::HashMap;

use crate::error::TemplateError;
use crate::node::Node;
use crate::parser::parse;
use crate::render::render;
use crate::resolve::resolve;

/// Width used by [`validate`]; resolution cannot fail, so any value works.
const VALIDATION_WIDTH: usize = 100;

/// Check a template for structural errors without rendering it.
///
/// Call this when templates are loaded (configuration, command line) so a
/// broken template is reported before anything is drawn.
pub fn validate(template: &str) -> Result<(), TemplateError> {
    let mut nodes = parse(template)?;
    resolve(&mut nodes, VALIDATION_WIDTH);
    Ok(())
}

/// Nodes resolved for one line width.
#[derive(Debug, Clone)]
struct Snapshot {
    width: usize,
    nodes: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct Formatter {
    template: String,
    snapshot: Option<Snapshot>,
    parse_count: usize,
}

impl Formatter {
    /// Create a formatter. The template is not parsed until the first
    /// [`format`](Self::format) call; use [`Formatter::checked`] or
    /// [`validate`] to catch errors up front.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            snapshot: None,
            parse_count: 0,
        }
    }

    /// Create a formatter after validating its template.
    pub fn checked(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        validate(&template)?;
        Ok(Self::new(template))
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// How many times the template has been parsed.
    pub fn parse_count(&self) -> usize {
        self.parse_count
    }

    /// Render `data` into a line of exactly `width` code points.
    ///
    /// # Panics
    ///
    /// Panics if the template is structurally invalid. Templates are expected
    /// to be validated when they are loaded, so this indicates a programming
    /// error rather than bad input.
    pub fn format(&mut self, data: &HashMap<char, String>, width: usize) -> String {
        render(self.nodes_for(width), data, width)
    }

    fn nodes_for(&mut self, width: usize) -> &[Node] {
        let stale = self.snapshot.as_ref().map(|s| s.width) != Some(width);
        if stale {
            let mut nodes = match parse(&self.template) {
                Ok(nodes) => nodes,
                Err(e) => {
                    error!("Unvalidated template {:?}: {}", self.template, e);
                    panic!("invalid template {:?}: {}", self.template, e);
                }
            };
            self.parse_count += 1;
            resolve(&mut nodes, width);
            debug!(
                "Resolved template {:?} for width {} ({} nodes)",
                self.template,
                width,
                nodes.len()
            );
            self.snapshot = Some(Snapshot { width, nodes });
        }

        match &self.snapshot {
            Some(s) => s.nodes.as_slice(),
            None => &[],
        }
    }
}
