//! Text normalization applied to model output before classification.

use unicode_normalization::UnicodeNormalization;

/// Normalize a generated body: NFC composition, invisible and
/// XML-illegal characters removed, no-break spaces turned into plain spaces.
///
/// Line structure is preserved; only characters inside lines change.
pub fn normalize(text: &str) -> String {
    text.nfc()
        .filter(|c| !is_invisible(*c) && !is_xml_illegal(*c))
        .map(|c| if is_nbsp(c) { ' ' } else { c })
        .collect()
}

/// Zero-width and byte-order-mark characters that models sometimes emit.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{FFFD}'
    )
}

/// Characters XML 1.0 forbids in a document, even escaped.
pub(crate) fn is_xml_illegal(c: char) -> bool {
    (c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

fn is_nbsp(c: char) -> bool {
    matches!(c, '\u{00A0}' | '\u{202F}' | '\u{2007}')
}
