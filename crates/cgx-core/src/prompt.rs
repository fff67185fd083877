// ── Interactive input ──
//
// Terminal I/O sits behind `Prompter`; the answer parsing and retry loop
// live here so they can be tested with scripted input.

use secrecy::SecretString;

use crate::error::CoreError;

const FIRST_ASK: &str = "Enter yes or no";
const RE_ASK: &str = "Please enter yes or no to verify changes";

/// Source of interactive input.
pub trait Prompter {
    /// Read one line of visible input.
    fn read_line(&mut self, prompt: &str) -> Result<String, CoreError>;

    /// Read one line of hidden input.
    fn read_secret(&mut self, prompt: &str) -> Result<SecretString, CoreError>;
}

/// Interpret a yes/no answer.
///
/// Exact, case-insensitive, whitespace-trimmed: `y`/`yes` → `Some(true)`,
/// `n`/`no` → `Some(false)`, anything else → `None`.
pub fn parse_answer(input: &str) -> Option<bool> {
    let answer = input.trim().to_lowercase();
    match answer.as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask until a recognised yes/no answer arrives.
pub fn confirm(prompter: &mut impl Prompter) -> Result<bool, CoreError> {
    let mut prompt = FIRST_ASK;
    loop {
        let input = prompter.read_line(prompt)?;
        if let Some(answer) = parse_answer(&input) {
            return Ok(answer);
        }
        prompt = RE_ASK;
    }
}

/// Ask for login credentials.
pub fn prompt_login(prompter: &mut impl Prompter) -> Result<(String, SecretString), CoreError> {
    let email = prompter.read_line("Email")?.trim().to_owned();
    let password = prompter.read_secret("Password: ")?;
    Ok((email, password))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use secrecy::SecretString;

    use super::Prompter;
    use crate::error::CoreError;

    /// Replays canned answers; fails once they run out.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub answers: VecDeque<String>,
        pub prompts: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new<I: IntoIterator<Item = &'static str>>(answers: I) -> Self {
            Self {
                answers: answers.into_iter().map(String::from).collect(),
                prompts: Vec::new(),
            }
        }

        fn next(&mut self, prompt: &str) -> Result<String, CoreError> {
            self.prompts.push(prompt.to_owned());
            self.answers.pop_front().ok_or_else(|| CoreError::Prompt {
                message: "input closed".into(),
            })
        }
    }

    impl Prompter for ScriptedPrompter {
        fn read_line(&mut self, prompt: &str) -> Result<String, CoreError> {
            self.next(prompt)
        }

        fn read_secret(&mut self, prompt: &str) -> Result<SecretString, CoreError> {
            self.next(prompt).map(SecretString::from)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::testing::ScriptedPrompter;
    use super::*;

    #[test]
    fn accepts_exact_answers_in_any_case() {
        for yes in ["y", "Y", "yes", "YES", " Yes \n"] {
            assert_eq!(parse_answer(yes), Some(true), "{yes:?}");
        }
        for no in ["n", "N", "no", "No", "NO\n"] {
            assert_eq!(parse_answer(no), Some(false), "{no:?}");
        }
    }

    #[test]
    fn rejects_answers_that_merely_contain_yes_or_no() {
        for junk in ["dye", "nostalgia", "yep", "nope", "yes please", "", "maybe"] {
            assert_eq!(parse_answer(junk), None, "{junk:?}");
        }
    }

    #[test]
    fn confirm_loops_until_recognised() {
        let mut prompter = ScriptedPrompter::new(["dye", "nostalgia", "YES"]);
        assert!(confirm(&mut prompter).unwrap());
        assert_eq!(prompter.prompts.len(), 3);
        assert_eq!(prompter.prompts[0], FIRST_ASK);
        assert_eq!(prompter.prompts[1], RE_ASK);
    }

    #[test]
    fn confirm_decline() {
        let mut prompter = ScriptedPrompter::new(["n"]);
        assert!(!confirm(&mut prompter).unwrap());
    }

    #[test]
    fn confirm_fails_when_input_closes() {
        let mut prompter = ScriptedPrompter::new(["what"]);
        assert!(matches!(
            confirm(&mut prompter),
            Err(CoreError::Prompt { .. })
        ));
    }

    #[test]
    fn login_prompt_trims_email() {
        let mut prompter = ScriptedPrompter::new([" ops@example.com ", "s3cret"]);
        let (email, password) = prompt_login(&mut prompter).unwrap();
        assert_eq!(email, "ops@example.com");
        assert_eq!(password.expose_secret(), "s3cret");
    }
}
