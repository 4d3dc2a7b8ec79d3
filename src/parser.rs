//! Template parser.
//!
//! Turns a template string into a flat list of [`Node`]s. Parsing does not
//! depend on the target width; percent and star widths are left for
//! [`crate::resolve`].
//!
//! Syntax summary:
//!
//! - `{{` and `}}` in literal text stand for `{` and `}`; a bare `}` is an error.
//! - `{[WIDTH:]BODY}` is a substitution, closed by the first `}`.
//! - `WIDTH` is `-?*%`, `-?N%` or `-?N`; the `-` aligns left.
//! - In `BODY`, `%c` inserts field `c` and `%%` is a literal percent sign.

use crate::error::TemplateError;
use crate::node::{Node, Subst, Width};

/// Parse a template into nodes and check its percent-width rules.
pub fn parse(template: &str) -> Result<Vec<Node>, TemplateError> {
    let chars: Vec<char> = template.chars().collect();
    let mut nodes = Vec::with_capacity(8);
    let mut text = String::new();
    let mut i = 0;

    while i < chars.len() {
        match (chars[i], chars.get(i + 1)) {
            ('{', Some('{')) => {
                text.push('{');
                i += 2;
            }
            ('}', Some('}')) => {
                text.push('}');
                i += 2;
            }
            ('}', _) => return Err(TemplateError::UnmatchedClosingBrace { position: i }),
            ('{', _) => {
                let end = chars[i + 1..]
                    .iter()
                    .position(|&c| c == '}')
                    .map(|offset| i + 1 + offset)
                    .ok_or(TemplateError::UnterminatedSubstitution { position: i })?;

                if !text.is_empty() {
                    nodes.push(Node::Text(std::mem::take(&mut text)));
                }

                let body: String = chars[i + 1..end].iter().collect();
                nodes.push(Node::Subst(parse_subst(&body, i)?));
                i = end + 1;
            }
            (c, _) => {
                text.push(c);
                i += 1;
            }
        }
    }

    if !text.is_empty() {
        nodes.push(Node::Text(text));
    }

    check_percent_usage(&nodes)?;

    Ok(nodes)
}

/// Parse the inside of `{...}`. `position` is the offset of the opening brace.
fn parse_subst(body: &str, position: usize) -> Result<Subst, TemplateError> {
    let (width, align_left, format) = match body.split_once(':') {
        Some((token, format)) => {
            let (width, align_left) = parse_width(token).ok_or_else(|| {
                TemplateError::InvalidWidth {
                    token: token.to_string(),
                    position,
                }
            })?;
            (width, align_left, format)
        }
        None => (Width::Auto, false, body),
    };

    let (template, field_keys) = rewrite_format(format);

    Ok(Subst {
        width,
        align_left,
        template,
        field_keys,
    })
}

/// Parse a width token. Returns the width and whether it aligns left.
fn parse_width(token: &str) -> Option<(Width, bool)> {
    let (align_left, magnitude) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };

    let width = if magnitude == "*%" {
        Width::Star
    } else if let Some(digits) = magnitude.strip_suffix('%') {
        Width::Percent(parse_digits(digits)?)
    } else {
        Width::Absolute(parse_digits(magnitude)?)
    };

    Some((width, align_left))
}

// `usize::from_str` also accepts a leading '+', which is not part of the grammar.
fn parse_digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Rewrite `%c` field references into positional `%s` placeholders.
///
/// The returned template only ever contains `%s` and `%%` sequences, so the
/// renderer never has to know about field keys. A trailing lone `%` becomes
/// `%%`.
fn rewrite_format(format: &str) -> (String, Vec<char>) {
    let mut template = String::with_capacity(format.len());
    let mut keys = Vec::with_capacity(2);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            template.push(c);
            continue;
        }
        match chars.next() {
            Some('%') | None => template.push_str("%%"),
            Some(key) => {
                template.push_str("%s");
                keys.push(key);
            }
        }
    }

    (template, keys)
}

/// Either every substitution uses a percent/star width or none does, and
/// explicit percents add up to at most 100.
fn check_percent_usage(nodes: &[Node]) -> Result<(), TemplateError> {
    let mut substs = 0;
    let mut percent_nodes = 0;
    let mut percent_sum: usize = 0;

    for node in nodes {
        if let Node::Subst(s) = node {
            substs += 1;
            if s.width.is_percent_class() {
                percent_nodes += 1;
            }
            if let Width::Percent(p) = s.width {
                percent_sum = percent_sum.saturating_add(p);
            }
        }
    }

    if percent_nodes != 0 && percent_nodes != substs {
        return Err(TemplateError::MixedWidths);
    }
    if percent_sum > 100 {
        return Err(TemplateError::PercentOverflow { total: percent_sum });
    }

    Ok(())
}
