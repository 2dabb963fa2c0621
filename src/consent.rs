//! Consent for installing Galaxy collections
//!
//! The reconciler asks a [`ConsentProvider`] before it touches the
//! collections directory. Which provider is used depends on how the
//! process was started: `--galaxy-ok` approves up front, a detached
//! process refuses, and an attended terminal gets a yes/no prompt.

use anyhow::Result;
use dialoguer::Input;
use std::path::Path;

use crate::ui;

const RETRY_HINT: &str = "Please type 'yes' or 'no'";

/// Decide whether missing collections may be installed.
pub trait ConsentProvider {
    fn approve_install(&mut self, missing: &[String], collections_path: &Path) -> Result<bool>;
}

/// Always approves (`--galaxy-ok`).
pub struct AutoApprove;

impl ConsentProvider for AutoApprove {
    fn approve_install(&mut self, _missing: &[String], _collections_path: &Path) -> Result<bool> {
        Ok(true)
    }
}

/// Never approves; tells the user how to approve next time.
pub struct NonInteractive;

impl ConsentProvider for NonInteractive {
    fn approve_install(&mut self, missing: &[String], collections_path: &Path) -> Result<bool> {
        ui::error(&format!(
            "Missing Ansible Galaxy dependencies in {}: {}",
            collections_path.display(),
            missing.join(", ")
        ));
        ui::dim("Not running interactively. Rerun with --galaxy-ok to install them automatically.");
        Ok(false)
    }
}

/// Yes/no prompt on the attached terminal.
///
/// Anything other than `yes` or `no` (case-insensitive) asks again. If
/// the terminal goes away mid-prompt the install is refused.
pub struct Terminal;

impl ConsentProvider for Terminal {
    fn approve_install(&mut self, missing: &[String], collections_path: &Path) -> Result<bool> {
        println!("{}", install_notice(missing, collections_path));

        let answer = Input::<String>::new()
            .with_prompt("Is this OK (yes/no)?")
            .validate_with(|input: &String| -> Result<(), &'static str> {
                parse_answer(input).map(|_| ()).ok_or(RETRY_HINT)
            })
            .interact_text();

        match answer {
            Ok(answer) => Ok(parse_answer(&answer).unwrap_or(false)),
            Err(e) => {
                log::debug!("Consent prompt aborted: {e}");
                Ok(false)
            }
        }
    }
}

fn install_notice(missing: &[String], collections_path: &Path) -> String {
    format!(
        "I have to download and install the following\nAnsible Galaxy dependencies into {}:\n- {}",
        collections_path.display(),
        missing.join("\n- ")
    )
}

/// `Some(true)` for yes, `Some(false)` for no, ignoring case only.
fn parse_answer(answer: &str) -> Option<bool> {
    match answer.to_lowercase().as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{BufRead, Cursor, Write};

    /// The terminal prompt over any line reader and writer.
    pub(crate) struct Prompt<R, W> {
        input: R,
        output: W,
    }

    impl<R: BufRead, W: Write> Prompt<R, W> {
        pub fn new(input: R, output: W) -> Self {
            Self { input, output }
        }
    }

    impl<R: BufRead, W: Write> ConsentProvider for Prompt<R, W> {
        fn approve_install(&mut self, missing: &[String], collections_path: &Path) -> Result<bool> {
            write!(
                self.output,
                "{}\nIs this OK (yes/no)? ",
                install_notice(missing, collections_path)
            )?;
            loop {
                let mut line = String::new();
                if self.input.read_line(&mut line)? == 0 {
                    return Ok(false);
                }
                match parse_answer(line.trim_end_matches(['\r', '\n'])) {
                    Some(approved) => return Ok(approved),
                    None => write!(self.output, "{RETRY_HINT}: ")?,
                }
            }
        }
    }

    fn missing() -> Vec<String> {
        vec!["community.mysql".to_string(), "ansible.posix".to_string()]
    }

    fn ask(answers: &str) -> (bool, String) {
        let mut out = Vec::new();
        let approved = Prompt::new(Cursor::new(answers.as_bytes()), &mut out)
            .approve_install(&missing(), Path::new("/home/me/.ansible"))
            .unwrap();
        (approved, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_prompt_yes() {
        let (approved, out) = ask("yes\n");
        assert!(approved);
        assert!(out.contains("into /home/me/.ansible:"));
        assert!(out.contains("- community.mysql\n- ansible.posix"));
    }

    #[test]
    fn test_prompt_is_case_insensitive() {
        assert!(ask("YES\n").0);
        assert!(ask("yes\r\n").0);
        assert!(!ask("No\n").0);
    }

    #[test]
    fn test_prompt_repeats_until_answered() {
        let (approved, out) = ask("y\nmaybe\nyes\n");
        assert!(approved);
        assert_eq!(out.matches("Please type 'yes' or 'no': ").count(), 2);
    }

    #[test]
    fn test_prompt_eof_refuses() {
        assert!(!ask("").0);
        assert!(!ask("sure\n").0);
    }

    #[test]
    fn test_padded_answers_are_not_accepted() {
        assert_eq!(parse_answer(" yes "), None);
        assert_eq!(parse_answer("no "), None);
        let (approved, out) = ask(" yes \n");
        assert!(!approved);
        assert_eq!(out.matches("Please type 'yes' or 'no': ").count(), 1);
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("Yes"), Some(true));
        assert_eq!(parse_answer("NO"), Some(false));
        assert_eq!(parse_answer("y"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[test]
    fn test_fixed_providers() {
        let path = Path::new("/tmp");
        assert!(AutoApprove.approve_install(&missing(), path).unwrap());
        assert!(!NonInteractive.approve_install(&missing(), path).unwrap());
    }
}
