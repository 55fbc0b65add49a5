use unicode_segmentation::UnicodeSegmentation;

/// returns a &str that is at most `limit` graphemes long
pub fn limit_graphemes(value: &str, limit: usize) -> &str {
    match value.grapheme_indices(true).nth(limit) {
        Some((boundary, _)) => &value[..boundary],
        None => value,
    }
}

/// first whitespace separated word and whatever follows it, trimmed
pub fn split_first_rest(text: &str) -> (&str, Option<&str>) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, Some(rest.trim_start()).filter(|r| !r.is_empty())),
        None => (text, None),
    }
}

#[test]
fn limiting() {
    // 5 graphemes
    const ASCII: &str = "hello";
    // 2 graphemes, the second one is 4 chars
    const EMOJI: &str = "a\u{1f9de}\u{200d}\u{2640}\u{fe0f}";

    assert_eq!(limit_graphemes(ASCII, 5), ASCII);
    assert_eq!(limit_graphemes(ASCII, 6), ASCII);
    assert_eq!(limit_graphemes(ASCII, 4), "hell");
    assert_eq!(limit_graphemes(ASCII, 0), "");

    assert_eq!(limit_graphemes(EMOJI, 2), EMOJI);
    assert_eq!(limit_graphemes(EMOJI, 1), "a");
}

#[test]
fn splitting() {
    assert_eq!(split_first_rest("iirose.wb.rm"), ("iirose.wb.rm", None));
    assert_eq!(split_first_rest("  iirose.wb.rm   "), ("iirose.wb.rm", None));
    assert_eq!(
        split_first_rest("iirose.wb.set  hi (@) o/"),
        ("iirose.wb.set", Some("hi (@) o/"))
    );
    assert_eq!(split_first_rest(""), ("", None));
}
