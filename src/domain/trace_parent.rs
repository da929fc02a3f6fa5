//! Trace-parent value type and the legacy `Request-Id` token parser.
//!
//! A trace parent pairs a 32-character trace id with a 16-character span id.
//! Both halves are lowercase hexadecimal and neither may be all zeros. The
//! only way to obtain a [`TraceParent`] is through a constructor that checks
//! both halves, so an invalid candidate never exists half-built.
//!
//! The legacy correlation token carried by `Request-Id` metadata looks like
//! `|<trace id>.<span id>.` with the trailing dot optional.

/// Length of a hex-encoded trace id.
const TRACE_ID_LEN: usize = 32;

/// Length of a hex-encoded span id.
const SPAN_ID_LEN: usize = 16;

/// A validated `(trace id, span id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceParent {
    trace_id: String,
    span_id: String,
}

impl TraceParent {
    /// Builds a trace parent when both ids pass validation.
    ///
    /// Returns `None` if either id has the wrong length, contains anything
    /// other than lowercase hex digits, or is all zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use telemetry_context::domain::TraceParent;
    ///
    /// assert!(TraceParent::new("4bf92f3577b34da6a3ce929d0e0e4736", "00f067aa0ba902b7").is_some());
    /// assert!(TraceParent::new("4bf92f3577b34da6a3ce929d0e0e4736", "0000000000000000").is_none());
    /// ```
    #[must_use]
    pub fn new(trace_id: &str, span_id: &str) -> Option<Self> {
        if is_valid_trace_id(trace_id) && is_valid_span_id(span_id) {
            Some(Self {
                trace_id: trace_id.to_string(),
                span_id: span_id.to_string(),
            })
        } else {
            None
        }
    }

    #[must_use]
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    #[must_use]
    pub fn span_id(&self) -> &str {
        &self.span_id
    }
}

/// Returns `true` for a 32-char lowercase hex string that is not all zeros.
#[must_use]
pub fn is_valid_trace_id(value: &str) -> bool {
    is_valid_id(value, TRACE_ID_LEN)
}

/// Returns `true` for a 16-char lowercase hex string that is not all zeros.
#[must_use]
pub fn is_valid_span_id(value: &str) -> bool {
    is_valid_id(value, SPAN_ID_LEN)
}

fn is_valid_id(value: &str, len: usize) -> bool {
    value.len() == len
        && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        && value.bytes().any(|b| b != b'0')
}

/// Raw input accepted by [`parse_request_id`].
///
/// Hosts hand correlation tokens over either as a single string or as a list
/// of header values. Only the first value of a list is ever considered.
pub trait RawRequestId {
    /// The single candidate value to parse, if any.
    fn first_value(&self) -> Option<&str>;
}

impl RawRequestId for str {
    fn first_value(&self) -> Option<&str> {
        Some(self)
    }
}

impl RawRequestId for String {
    fn first_value(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<S: AsRef<str>> RawRequestId for [S] {
    fn first_value(&self) -> Option<&str> {
        self.first().map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>, const N: usize> RawRequestId for [S; N] {
    fn first_value(&self) -> Option<&str> {
        self.as_slice().first_value()
    }
}

impl<S: AsRef<str>> RawRequestId for Vec<S> {
    fn first_value(&self) -> Option<&str> {
        self.as_slice().first_value()
    }
}

impl<T: RawRequestId> RawRequestId for Option<T> {
    fn first_value(&self) -> Option<&str> {
        self.as_ref().and_then(RawRequestId::first_value)
    }
}

impl<T: RawRequestId + ?Sized> RawRequestId for &T {
    fn first_value(&self) -> Option<&str> {
        (**self).first_value()
    }
}

/// Parses a legacy `Request-Id` correlation token.
///
/// The token must look like `|<trace id>.<span id>` with one optional trailing
/// `.`. Surrounding whitespace is ignored. Anything else yields `None`; this
/// function never panics and has no side effects.
///
/// # Examples
///
/// ```
/// use telemetry_context::domain::parse_request_id;
///
/// let parent = parse_request_id("|4bf92f3577b34da6a3ce929d0e0e4736.00f067aa0ba902b7").unwrap();
/// assert_eq!(parent.trace_id(), "4bf92f3577b34da6a3ce929d0e0e4736");
///
/// // Only the first value of a list is consulted.
/// assert!(parse_request_id(&["abc", "|4bf92f3577b34da6a3ce929d0e0e4736.00f067aa0ba902b7"]).is_none());
/// ```
#[must_use]
pub fn parse_request_id<R: RawRequestId + ?Sized>(raw: &R) -> Option<TraceParent> {
    let value = raw.first_value()?.trim();
    let rest = value.strip_prefix('|')?;
    let (trace_id, span_id) = rest.split_once('.')?;
    let span_id = span_id.strip_suffix('.').unwrap_or(span_id);

    TraceParent::new(trace_id, span_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = "4bf92f3577b34da6a3ce929d0e0e4736";
    const SPAN: &str = "00f067aa0ba902b7";

    #[test]
    fn parses_token_with_and_without_trailing_dot() {
        let with_dot = parse_request_id(&format!("|{TRACE}.{SPAN}.")).unwrap();
        let without_dot = parse_request_id(&format!("|{TRACE}.{SPAN}")).unwrap();

        assert_eq!(with_dot.trace_id(), TRACE);
        assert_eq!(with_dot.span_id(), SPAN);
        assert_eq!(with_dot, without_dot);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let parent = parse_request_id(&format!("  |{TRACE}.{SPAN}.\n")).unwrap();
        assert_eq!(parent.span_id(), SPAN);
    }

    #[test]
    fn rejects_all_zero_ids() {
        assert!(parse_request_id(&format!("|{}.{SPAN}.", "0".repeat(32))).is_none());
        assert!(parse_request_id(&format!("|{TRACE}.{}.", "0".repeat(16))).is_none());
    }

    #[test]
    fn rejects_structural_problems() {
        let cases = [
            String::new(),
            "   ".to_string(),
            format!("{TRACE}.{SPAN}."),
            format!("|{TRACE}{SPAN}"),
            format!("|{TRACE}.{SPAN}.."),
            format!("|{TRACE}.{SPAN}.1"),
            format!("||{TRACE}.{SPAN}"),
            format!("|{}.{SPAN}", &TRACE[1..]),
            format!("|{TRACE}0.{SPAN}"),
            format!("|{TRACE}.{}", &SPAN[1..]),
        ];

        for case in &cases {
            assert!(parse_request_id(case).is_none(), "expected none for {case:?}");
        }
    }

    #[test]
    fn hex_check_is_case_sensitive() {
        let upper = TRACE.to_uppercase();
        assert!(parse_request_id(&format!("|{upper}.{SPAN}")).is_none());
        assert!(parse_request_id(&format!("|{TRACE}.{}", "00F067AA0BA902B7")).is_none());
        assert!(parse_request_id(&format!("|{TRACE}.{}", "00f067aa0ba902bg")).is_none());
    }

    #[test]
    fn list_input_uses_first_element_only() {
        let good = format!("|{TRACE}.{SPAN}.");

        assert_eq!(parse_request_id(&["abc", "def"]), parse_request_id("abc"));
        assert!(parse_request_id(&vec!["abc".to_string(), good.clone()]).is_none());
        assert!(parse_request_id(&vec![good.clone(), "abc".to_string()]).is_some());

        let empty: Vec<String> = Vec::new();
        assert!(parse_request_id(&empty).is_none());
    }

    #[test]
    fn absent_input_is_none() {
        let absent: Option<String> = None;
        assert!(parse_request_id(&absent).is_none());
        assert!(parse_request_id(&Some(format!("|{TRACE}.{SPAN}"))).is_some());
    }

    #[test]
    fn validators_check_length_and_alphabet() {
        assert!(is_valid_trace_id(TRACE));
        assert!(!is_valid_trace_id(SPAN));
        assert!(is_valid_span_id(SPAN));
        assert!(!is_valid_span_id(TRACE));
        assert!(!is_valid_span_id("00f067aa0ba902b-"));
    }
}
