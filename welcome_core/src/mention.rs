/// the token replaced by a mention inside a message template
pub const PLACEHOLDER: &str = "(@)";

/// Which mention element the host understands.
///
/// Both flavours embed the username, the room adapter identifies users by name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MentionTag {
    /// `<at id="username"/>`
    #[default]
    Id,
    /// `<at name="username"/>`
    Name,
}

impl MentionTag {
    pub fn render(self, username: &str) -> String {
        match self {
            Self::Id => format!(r#"<at id="{username}"/>"#),
            Self::Name => format!(r#"<at name="{username}"/>"#),
        }
    }
}

/// replaces the first [PLACEHOLDER] in `template` with a mention of `username`,
/// templates without one come back untouched
pub fn fill_template(template: &str, tag: MentionTag, username: &str) -> String {
    if template.contains(PLACEHOLDER) {
        template.replacen(PLACEHOLDER, &tag.render(username), 1)
    } else {
        template.to_owned()
    }
}

#[test]
fn renders_tags() {
    assert_eq!(MentionTag::Id.render("Bob"), r#"<at id="Bob"/>"#);
    assert_eq!(MentionTag::Name.render("Bob"), r#"<at name="Bob"/>"#);
}

#[test]
fn fills_first_placeholder_only() {
    assert_eq!(
        fill_template("hi(@)!", MentionTag::Id, "Bob"),
        r#"hi<at id="Bob"/>!"#
    );
    assert_eq!(
        fill_template("(@) and (@)", MentionTag::Name, "Ann"),
        r#"<at name="Ann"/> and (@)"#
    );
}

#[test]
fn leaves_plain_templates_alone() {
    assert_eq!(fill_template("hello everyone", MentionTag::Id, "Bob"), "hello everyone");
    // almost a placeholder
    assert_eq!(fill_template("(@ )", MentionTag::Id, "Bob"), "(@ )");
    assert_eq!(fill_template("", MentionTag::Id, "Bob"), "");
}
