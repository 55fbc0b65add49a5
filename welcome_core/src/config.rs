use crate::mention::MentionTag;

/// Settings for one greeter instance, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GreetingConfig {
    /// also greet on generic guild member events
    pub fit: bool,
    /// deliver greetings privately instead of to the room
    pub private: bool,
    #[cfg_attr(feature = "serde", serde(alias = "welcomeList"))]
    pub welcome_list: Vec<String>,
    #[cfg_attr(feature = "serde", serde(alias = "exitList"))]
    pub exit_list: Vec<String>,
    pub mention: MentionTag,
    /// platform the override commands are restricted to
    pub platform: String,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            fit: false,
            private: false,
            welcome_list: vec!["welcome(@)!".into()],
            exit_list: vec!["bye(@)!".into()],
            mention: MentionTag::default(),
            platform: "iirose".into(),
        }
    }
}

#[test]
fn defaults() {
    let config = GreetingConfig::default();
    assert!(!config.fit);
    assert!(!config.private);
    assert_eq!(config.welcome_list, ["welcome(@)!"]);
    assert_eq!(config.exit_list, ["bye(@)!"]);
    assert_eq!(config.mention, MentionTag::Id);
    assert_eq!(config.platform, "iirose");
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn accepts_camel_case_lists() {
        let config: GreetingConfig = serde_json::from_str(
            r#"{"private": true, "welcomeList": ["a(@)"], "exitList": [], "mention": "name"}"#,
        )
        .unwrap();
        assert!(config.private);
        assert!(!config.fit);
        assert_eq!(config.welcome_list, ["a(@)"]);
        assert!(config.exit_list.is_empty());
        assert_eq!(config.mention, MentionTag::Name);
        assert_eq!(config.platform, "iirose");
    }
}
