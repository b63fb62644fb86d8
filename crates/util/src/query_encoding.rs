//! Percent-encoding for values placed in a URL query string.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Everything except the characters `encodeURIComponent` leaves alone.
const QUERY_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encodes a single query parameter value.
///
/// ```rust
/// use atrium_util::encode_query_component;
///
/// assert_eq!(encode_query_component("q3 report&co"), "q3%20report%26co");
/// ```
pub fn encode_query_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT_SET).to_string()
}

/// Decodes a query parameter value; `+` is left as-is and invalid UTF-8 is
/// replaced lossily.
pub fn decode_query_component(value: &str) -> Cow<'_, str> {
    percent_decode_str(value).decode_utf8_lossy()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(encode_query_component("a/b?c=d#e"), "a%2Fb%3Fc%3Dd%23e");
        assert_eq!(encode_query_component("invoices"), "invoices");
    }

    #[test]
    fn unreserved_marks_survive() {
        assert_eq!(encode_query_component("don't-stop_now.(ok)!*~"), "don't-stop_now.(ok)!*~");
    }

    #[test]
    fn multibyte_text_is_utf8_encoded() {
        assert_eq!(encode_query_component("Übersicht"), "%C3%9Cbersicht");
        assert_eq!(decode_query_component("%C3%9Cbersicht"), "Übersicht");
    }
}
