use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

/// Number of Unicode code points in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Keep at most `n` leading code points of `s`.
pub fn truncate(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Pad with spaces or truncate `s` to exactly `width` code points, then keep
/// at most `limit` of them.
///
/// Padding goes on the right when `align_left` is set, on the left otherwise.
/// Truncation always keeps the leading code points. At most `limit` columns
/// are ever materialized, however large `width` is.
pub fn fit_within(s: &str, width: usize, align_left: bool, limit: usize) -> String {
    let keep = width.min(limit);
    let len = char_len(s);
    if len >= width {
        return truncate(s, keep).to_string();
    }

    let mut out = String::new();
    if align_left {
        let text = truncate(s, keep);
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(keep - char_len(text)));
    } else {
        let pad = (width - len).min(keep);
        out.extend(std::iter::repeat(' ').take(pad));
        out.push_str(truncate(s, keep - pad));
    }
    out
}

fn control_sequences() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ANSI CSI/OSC sequences first, then any remaining C0/C1 control character.
    RE.get_or_init(|| {
        Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|[\x00-\x1f\x7f-\x9f]")
            .expect("static regex is valid")
    })
}

/// Strip escape sequences and control characters from a field value.
///
/// Field values come from tag metadata and file names, and a stray escape or
/// newline would break the fixed-width row it is painted into.
pub fn sanitize_for_terminal(s: &str) -> String {
    control_sequences().replace_all(s, "").into_owned()
}

/// Format a duration as `m:ss`, or `h:mm:ss` from one hour up.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
