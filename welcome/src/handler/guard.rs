use crate::guard::{Guard, GuardContext};

/// Matches messages whose first word is one of `names`
#[derive(Clone)]
pub struct CommandGuard {
    names: Vec<String>,
}

impl CommandGuard {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

impl Guard for CommandGuard {
    fn check(&self, ctx: &GuardContext) -> bool {
        let name = ctx.message().name();
        !name.is_empty() && self.names.iter().any(|n| n == name)
    }
}

#[test]
fn matches_first_word() {
    use crate::guard::command_message;

    let guard = CommandGuard::new(vec!["iirose.wb.set".into(), "wb".into()]);
    let check = |text: &str| guard.check(&GuardContext::new(&command_message("1", text)));

    assert!(check("iirose.wb.set hello (@)"));
    assert!(check("wb"));
    assert!(check("  wb  "));
    assert!(!check("iirose.wb.setx hello"));
    assert!(!check("say iirose.wb.set"));
    assert!(!check(""));
}
