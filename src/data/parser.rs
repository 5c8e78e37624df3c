//! Line grammar for telemetry text.
//!
//! One input line carries at most one channel tag, one point and any number of
//! `key:value` metadata fragments, all comma separated:
//!
//! ```text
//! CH:1,[0.25,3.1e-2],TEMP:21.5,MODE:run
//! 0.25,3.1e-2,TEMP:21.5
//! ```
//!
//! Parsing never fails; anything unrecognised is simply left out of the
//! resulting [`ParsedLine`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Reserved metadata key carrying the channel id. Never stored as metadata.
pub const CHANNEL_KEY: &str = "CH";

const NUMBER: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";

static CHANNEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|,)\s*CH\s*:\s*([+-]?\d+)\s*(?:,|$)").expect("channel pattern is valid")
});

static BRACKET_POINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\[\s*({NUMBER})\s*,\s*({NUMBER})\s*\]"))
        .expect("bracketed point pattern is valid")
});

static LEADING_POINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\s*({NUMBER})\s*,\s*({NUMBER})\s*"))
        .expect("leading point pattern is valid")
});

/// Structured view of one raw text line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLine {
    /// Channel id from a `CH:<n>` token, if present.
    pub channel: Option<i64>,
    /// The single `(x, y)` point of the line, if present.
    pub point: Option<[f64; 2]>,
    /// Metadata fragments, excluding the reserved `CH` key.
    pub kv: BTreeMap<String, String>,
}

impl ParsedLine {
    pub fn has_channel(&self) -> bool {
        self.channel.is_some()
    }

    pub fn has_point(&self) -> bool {
        self.point.is_some()
    }

    /// `true` when the line carried nothing usable.
    pub fn is_empty(&self) -> bool {
        self.channel.is_none() && self.point.is_none() && self.kv.is_empty()
    }
}

/// Parse one telemetry line.
///
/// Precedence: a bracketed `[x,y]` anywhere in the line always wins over a bare
/// `x,y` prefix, even when both are present.
pub fn parse_line(line: &str) -> ParsedLine {
    let mut out = ParsedLine::default();
    let s = line.trim();
    if s.is_empty() {
        return out;
    }

    if let Some(caps) = CHANNEL_RE.captures(s) {
        out.channel = caps.get(1).and_then(|m| m.as_str().parse::<i64>().ok());
    }

    let mut consumed: Option<std::ops::Range<usize>> = None;
    for re in [&*BRACKET_POINT_RE, &*LEADING_POINT_RE] {
        if let Some((point, range)) = match_point(re, s) {
            out.point = Some(point);
            consumed = Some(range);
            break;
        }
    }

    let rest = match consumed {
        Some(range) => {
            let mut r = String::with_capacity(s.len());
            r.push_str(&s[..range.start]);
            r.push_str(&s[range.end..]);
            r
        }
        None => s.to_string(),
    };

    let rest = rest.trim().trim_start_matches(',').trim();
    for fragment in rest.split(',') {
        let fragment = fragment.trim();
        let Some(colon) = fragment.find(':') else {
            continue;
        };
        let key = fragment[..colon].trim();
        if key.is_empty() || key.eq_ignore_ascii_case(CHANNEL_KEY) {
            continue;
        }
        let value = fragment[colon + 1..].trim();
        out.kv.insert(key.to_string(), value.to_string());
    }

    out
}

fn match_point(re: &Regex, s: &str) -> Option<([f64; 2], std::ops::Range<usize>)> {
    let caps = re.captures(s)?;
    // Overflowing literals parse as infinity; treat them as unparseable.
    let x = caps.get(1)?.as_str().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let y = caps.get(2)?.as_str().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let whole = caps.get(0)?;
    Some(([x, y], whole.range()))
}
