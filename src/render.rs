//! Rendering of resolved nodes into a fixed-width line.

use log::trace;
use std::collections::HashMap;

use crate::node::{Node, Subst, Width};
use crate::utils::{char_len, fit_within, truncate};

/// Render `nodes` with field values from `data` into a line of exactly
/// `total_width` code points.
///
/// Fields missing from `data` render as empty strings.
pub fn render(nodes: &[Node], data: &HashMap<char, String>, total_width: usize) -> String {
    let mut line = String::new();
    let mut used = 0;

    for node in nodes {
        if used >= total_width {
            break;
        }
        let remaining = total_width - used;
        let piece = match node {
            Node::Text(s) => truncate(s, remaining).to_string(),
            Node::Subst(s) => render_subst(s, data, remaining),
        };
        used += char_len(&piece);
        line.push_str(&piece);
    }

    line.extend(std::iter::repeat(' ').take(total_width - used));
    line
}

/// Render one substitution, keeping at most `limit` code points of it.
fn render_subst(subst: &Subst, data: &HashMap<char, String>, limit: usize) -> String {
    let raw = fill(&subst.template, &subst.field_keys, data);

    match subst.width {
        Width::Absolute(n) => fit_within(&raw, n, subst.align_left, limit),
        Width::Resolved(n) => {
            if n < 0 {
                trace!("clamping resolved width {} to 0", n);
            }
            let n = usize::try_from(n).unwrap_or(0);
            fit_within(&raw, n, subst.align_left, limit)
        }
        Width::Auto | Width::Percent(_) | Width::Star => truncate(&raw, limit).to_string(),
    }
}

/// Fill positional `%s` placeholders with the values of `keys`, in order.
fn fill(template: &str, keys: &[char], data: &HashMap<char, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut values = keys
        .iter()
        .map(|k| data.get(k).map(String::as_str).unwrap_or(""));
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push_str(values.next().unwrap_or("")),
            Some(other) => out.push(other),
            None => out.push('%'),
        }
    }

    out
}
