//! Width resolution.
//!
//! Converts percent and star widths into column counts for one concrete line
//! width. Star nodes first receive a percent share, then every percent node is
//! scaled against the space left over by literal text and absolute
//! substitutions. Rounding drift is pushed into the last percent node so the
//! line always adds up exactly.

use crate::node::{Node, Width};

/// Resolve every percent/star width in `nodes` for a line `total_width`
/// code points wide. Text, auto and absolute nodes are left untouched.
pub fn resolve(nodes: &mut [Node], total_width: usize) {
    let mut stars = 0usize;
    let mut percent_sum = 0usize;
    let mut fixed = 0usize;

    for node in nodes.iter() {
        match node {
            Node::Text(_) => fixed = fixed.saturating_add(node.text_width()),
            Node::Subst(s) => match s.width {
                Width::Absolute(n) => fixed = fixed.saturating_add(n),
                Width::Percent(p) => percent_sum = percent_sum.saturating_add(p),
                Width::Star => stars += 1,
                Width::Auto | Width::Resolved(_) => {}
            },
        }
    }

    if stars > 0 {
        distribute_stars(nodes, stars, percent_sum);
    }

    let free = signed_difference(total_width, fixed);
    let one_percent = free as f64 / 100.0;
    // Columns handed to every percent node except the most recent one.
    let mut others: isize = 0;
    let mut last: Option<&mut isize> = None;

    for node in nodes.iter_mut() {
        let Node::Subst(s) = node else { continue };
        let Width::Percent(p) = s.width else { continue };

        s.width = Width::Resolved(round(p as f64 * one_percent));
        if let Width::Resolved(w) = &mut s.width {
            if let Some(prev) = last.replace(w) {
                others = others.saturating_add(*prev);
            }
        }
    }

    // Drift correction: the last node takes whatever the others left.
    if let Some(w) = last {
        *w = free.saturating_sub(others);
        debug_assert!(resolved_sum(nodes).map_or(true, |sum| sum == free));
    }
}

/// Give each star node an equal share of the unclaimed percent budget; the
/// remainder goes to the first star node.
fn distribute_stars(nodes: &mut [Node], stars: usize, percent_sum: usize) {
    let budget = 100usize.saturating_sub(percent_sum);
    let share = budget / stars;
    let mut remainder = budget - share * stars;

    for node in nodes.iter_mut() {
        if let Node::Subst(s) = node {
            if s.width == Width::Star {
                s.width = Width::Percent(share + remainder);
                remainder = 0;
            }
        }
    }
}

/// `a - b` as a signed value, saturating at the `isize` bounds.
fn signed_difference(a: usize, b: usize) -> isize {
    if a >= b {
        isize::try_from(a - b).unwrap_or(isize::MAX)
    } else {
        isize::try_from(b - a).map_or(isize::MIN, |d| -d)
    }
}

/// Sum of resolved widths, or `None` if it does not fit in `isize`.
fn resolved_sum(nodes: &[Node]) -> Option<isize> {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Subst(s) => match s.width {
                Width::Resolved(w) => Some(w),
                _ => None,
            },
            Node::Text(_) => None,
        })
        .try_fold(0isize, |acc, w| acc.checked_add(w))
}

/// Round to the nearest integer, with exact halves rounding DOWN (2.5 → 2).
///
/// This is deliberately not round-half-up: existing templates depend on the
/// tie going down (`{*%:..}{*%:..}` at width 3 puts the extra column in the
/// second node, `{-50%:..}{50%:..}` at width 15 splits 7/8). Do not change it
/// to `f64::round`.
fn round(f: f64) -> isize {
    let floor = f.floor();
    if f - floor <= 0.5 {
        floor as isize
    } else {
        f.ceil() as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn widths(template: &str, total_width: usize) -> Vec<isize> {
        let mut nodes = parse(template).unwrap();
        resolve(&mut nodes, total_width);
        nodes
            .iter()
            .filter_map(|n| match n {
                Node::Subst(s) => match s.width {
                    Width::Resolved(w) => Some(w),
                    Width::Absolute(w) => Some(w as isize),
                    _ => None,
                },
                Node::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_explicit_percents() {
        assert_eq!(widths("{-20%:%a}", 10), vec![10]);
        assert_eq!(widths("foo{30%:%a - %t}{-70%:%a}bar", 10), vec![1, 3]);
        assert_eq!(widths("{10%:%a}{-90%:%t}", 10), vec![1, 9]);
    }

    #[test]
    fn test_single_star_takes_everything() {
        assert_eq!(widths("{*%:%a}", 10), vec![10]);
        assert_eq!(widths("{-*%:%a}", 10), vec![10]);
    }

    #[test]
    fn test_star_remainder_goes_to_first_star() {
        // 34%, 33%, 33% of 10 columns: 3, 3, then 3 + drift.
        assert_eq!(widths("{*%:%a}{*%:%a}{*%:%a}", 10), vec![3, 3, 4]);
        assert_eq!(widths("{50%:%a}{*%:%a}{*%:%a}", 10), vec![5, 2, 3]);
        assert_eq!(widths("{-*%:%a}{50%:%a}{*%:%a}", 10), vec![2, 5, 3]);
    }

    #[test]
    fn test_stars_with_full_percent_budget() {
        assert_eq!(widths("{100%:%a}{*%:%a}", 10), vec![10, 0]);
    }

    #[test]
    fn test_half_rounds_down() {
        assert_eq!(widths("{*%:%a}{*%:%a}", 3), vec![1, 2]);
        assert_eq!(widths("{-50%:%k}{50%:test}", 15), vec![7, 8]);
        assert_eq!(round(2.5), 2);
        assert_eq!(round(2.51), 3);
        assert_eq!(round(-0.5), -1);
    }

    #[test]
    fn test_text_is_subtracted_from_free_width() {
        assert_eq!(widths(" {-*%:%a - %t}{*%:[%o/%l]} ", 22), vec![10, 10]);
        // Code points, not bytes.
        assert_eq!(widths("ёё{*%:%a}", 10), vec![8]);
    }

    #[test]
    fn test_absolute_and_auto_untouched() {
        assert_eq!(widths("{5:%a} {-3:%b}", 40), vec![5, 3]);
        let mut nodes = parse("{%a}").unwrap();
        resolve(&mut nodes, 40);
        assert_eq!(nodes, parse("{%a}").unwrap());
    }

    #[test]
    fn test_narrow_line_gives_negative_widths() {
        assert_eq!(widths("abcdef{*%:%a}", 4), vec![-2]);
    }

    #[test]
    fn test_huge_absolute_widths_saturate() {
        let template = format!("{{{}:%a}}{{1:%b}}", usize::MAX);
        for total_width in [0, 100, usize::MAX] {
            let mut nodes = parse(&template).unwrap();
            resolve(&mut nodes, total_width);
            assert_eq!(nodes, parse(&template).unwrap());
        }
    }

    #[test]
    fn test_huge_text_against_percent_nodes() {
        // Text wider than the line: free is negative, every column goes there.
        let template = format!("{}{{*%:%a}}{{*%:%b}}", "x".repeat(1010));
        assert_eq!(widths(&template, 10), vec![-500, -500]);
    }

    #[test]
    fn test_max_total_width_conserves_free_space() {
        let mut nodes = parse("ab{-*%:%a}{30%:%b}{*%:%c}").unwrap();
        resolve(&mut nodes, usize::MAX);
        assert_eq!(resolved_sum(&nodes), Some(isize::MAX));
    }

    #[test]
    fn test_signed_difference_saturates() {
        assert_eq!(signed_difference(10, 3), 7);
        assert_eq!(signed_difference(3, 10), -7);
        assert_eq!(signed_difference(usize::MAX, 0), isize::MAX);
        assert_eq!(signed_difference(0, usize::MAX), isize::MIN);
    }

    #[test]
    fn test_resolve_twice_is_noop() {
        let mut nodes = parse("{-*%:%a}{*%:%t}").unwrap();
        resolve(&mut nodes, 11);
        let once = nodes.clone();
        resolve(&mut nodes, 11);
        assert_eq!(nodes, once);
    }
}
