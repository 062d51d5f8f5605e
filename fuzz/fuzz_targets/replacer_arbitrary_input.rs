#![no_main]

use erakit::replace::PatternReplacer;
use libfuzzer_sys::fuzz_target;

// Fuzz PatternReplacer with arbitrary UTF-8 input against a fixed table
//
// The table mixes overlapping ASCII prefixes with multibyte patterns. Checks
// that replacement never panics, is deterministic, and that a table mapping
// every pattern to itself is the identity.
const TABLE: [(&str, &str); 8] = [
    ("January", "มกราคม"),
    ("Jan", "ม.ค."),
    ("J", "j"),
    ("มกราคม", "January"),
    ("ม.ค.", "Jan"),
    ("aa", "a"),
    ("a", ""),
    ("\u{0}", "NUL"),
];

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(replacer) = PatternReplacer::new(TABLE) else {
        return;
    };
    let once = replacer.replace(text);
    assert_eq!(once, replacer.replace(text));

    let mut out = String::new();
    replacer.replace_into(text, &mut out);
    assert_eq!(out, once);

    let Ok(identity) = PatternReplacer::new(TABLE.iter().map(|(p, _)| (*p, *p))) else {
        return;
    };
    assert_eq!(identity.replace(text), text);
});
