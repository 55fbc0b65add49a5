use welcome_core::mention::PLACEHOLDER;

use crate::{
    guard::UserGuard,
    handler::{Command, CommandBuilder, CommandContext},
    util::limit_graphemes,
};

mod leave;
mod welcome;

/// text to store for a `set` command, capped to the configured length
fn override_text(cx: &CommandContext) -> Option<&str> {
    cx.msg
        .args()
        .map(|text| cap_override(text, cx.max_override_graphemes))
}

/// [limit_graphemes], but a placeholder cut in half is dropped entirely
fn cap_override(text: &str, limit: usize) -> &str {
    let capped = limit_graphemes(text, limit);
    (1..PLACEHOLDER.len())
        .filter(|&n| n <= capped.len())
        .find(|&n| {
            text.get(capped.len() - n..)
                .is_some_and(|rest| rest.starts_with(PLACEHOLDER))
        })
        .map_or(capped, |n| &capped[..capped.len() - n])
}

/// the override management commands, none of which the bot may run on itself
pub fn all(self_id: &str) -> Vec<Command> {
    vec![
        CommandBuilder::new(welcome::set, vec!["iirose.wb.set".into()])
            .and(UserGuard::forbid(self_id))
            .build(),
        CommandBuilder::new(welcome::rm, vec!["iirose.wb.rm".into()])
            .and(UserGuard::forbid(self_id))
            .build(),
        CommandBuilder::new(leave::set, vec!["iirose.lr.set".into()])
            .and(UserGuard::forbid(self_id))
            .build(),
        CommandBuilder::new(leave::rm, vec!["iirose.lr.rm".into()])
            .and(UserGuard::forbid(self_id))
            .build(),
    ]
}

#[test]
fn capping_keeps_placeholders_whole() {
    assert_eq!(cap_override("yo abcd (@)", 10), "yo abcd ");
    assert_eq!(cap_override("yo abcde (@)", 10), "yo abcde ");
    assert_eq!(cap_override("yo abc (@) more", 10), "yo abc (@)");
    assert_eq!(cap_override("(@)", 2), "");
    assert_eq!(cap_override("hello (world)", 7), "hello (");
    assert_eq!(cap_override("short", 10), "short");
    assert_eq!(cap_override("ab é(@)", 4), "ab é");
}
