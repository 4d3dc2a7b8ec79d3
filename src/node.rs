//! Template AST.
//!
//! A parsed template is a flat sequence of [`Node`]s. There is no nesting:
//! literal text alternates with substitutions.

use std::fmt;

/// Column width of a substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// No width prefix: the substitution renders at its natural length.
    Auto,
    /// Fixed number of code points.
    Absolute(usize),
    /// Share of the width left over after text and absolute substitutions.
    Percent(usize),
    /// Equal share of whatever percent budget explicit percents leave.
    Star,
    /// Column count a percent or star width resolved to. Negative when the
    /// target line is narrower than its fixed parts.
    Resolved(isize),
}

impl Width {
    /// True for widths that are computed from the target line width.
    pub fn is_percent_class(&self) -> bool {
        matches!(self, Width::Percent(_) | Width::Star)
    }
}

/// One `{...}` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subst {
    pub width: Width,
    pub align_left: bool,
    /// Micro-format with every `%<key>` rewritten to a positional `%s`.
    pub template: String,
    /// Field keys filling the positional placeholders, in order.
    pub field_keys: Vec<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Subst(Subst),
}

impl Node {
    /// Number of code points a text node occupies; zero for substitutions.
    pub fn text_width(&self) -> usize {
        match self {
            Node::Text(s) => s.chars().count(),
            Node::Subst(_) => 0,
        }
    }
}

// Canonical template form, mostly useful in test failure output.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(s) => {
                for c in s.chars() {
                    match c {
                        '{' => f.write_str("{{")?,
                        '}' => f.write_str("}}")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                Ok(())
            }
            Node::Subst(s) => {
                f.write_str("{")?;
                let sign = if s.align_left { "-" } else { "" };
                match s.width {
                    Width::Auto => {}
                    Width::Absolute(n) => write!(f, "{}{}:", sign, n)?,
                    Width::Percent(n) => write!(f, "{}{}%:", sign, n)?,
                    Width::Star => write!(f, "{}*%:", sign)?,
                    Width::Resolved(n) => write!(f, "{}{}:", sign, n.max(0))?,
                }
                f.write_str(&s.template)?;
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_counts_code_points() {
        assert_eq!(Node::Text("кириллица".to_string()).text_width(), 9);
        assert_eq!(Node::Text(String::new()).text_width(), 0);
    }

    #[test]
    fn test_display_escapes_braces() {
        let node = Node::Text("{a}".to_string());
        assert_eq!(node.to_string(), "{{a}}");
    }

    #[test]
    fn test_display_subst() {
        let node = Node::Subst(Subst {
            width: Width::Star,
            align_left: true,
            template: "%s - %s".to_string(),
            field_keys: vec!['a', 't'],
        });
        assert_eq!(node.to_string(), "{-*%:%s - %s}");
    }
}
