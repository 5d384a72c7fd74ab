//! API key resolution: environment first, then an interactive prompt.

use std::io::{self, BufRead, Write};

use secrecy::SecretString;
use shared_utils::env::get_env_var;
use tracing::debug;

use crate::cli::prompt::prompt_line;

pub const KEY_PROMPT: &str = "Enter your Polygon.io API key: ";

/// Resolves the API key from `env_var`, falling back to asking on `input`.
///
/// Returns `Ok(None)` when neither source yields a key; the reason has
/// already been written to `output`.
pub fn resolve_api_key<R: BufRead, W: Write>(
    env_var: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<SecretString>> {
    match get_env_var(env_var) {
        Ok(key) => {
            debug!(env_var, "using API key from environment");
            return Ok(Some(SecretString::new(key.into())));
        }
        Err(e) => debug!("{e}; prompting for API key"),
    }

    let key = prompt_line(input, output, KEY_PROMPT)?;
    if key.is_empty() {
        writeln!(output, "API key is required to continue")?;
        return Ok(None);
    }
    Ok(Some(SecretString::new(key.into())))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use secrecy::ExposeSecret;
    use serial_test::serial;

    use super::*;

    const VAR: &str = "PRICE_TRACKER_TEST_KEY";

    #[test]
    #[serial]
    fn environment_wins_without_prompting() {
        unsafe { std::env::set_var(VAR, "from-env") };
        let mut output = Vec::new();
        let key = resolve_api_key(VAR, &mut Cursor::new("typed\n"), &mut output)
            .unwrap()
            .unwrap();
        unsafe { std::env::remove_var(VAR) };

        assert_eq!(key.expose_secret(), "from-env");
        assert!(output.is_empty());
    }

    #[test]
    #[serial]
    fn falls_back_to_prompt() {
        unsafe { std::env::remove_var(VAR) };
        let mut output = Vec::new();
        let key = resolve_api_key(VAR, &mut Cursor::new(" typed-key \n"), &mut output)
            .unwrap()
            .unwrap();

        assert_eq!(key.expose_secret(), "typed-key");
        assert_eq!(String::from_utf8(output).unwrap(), KEY_PROMPT);
    }

    #[test]
    #[serial]
    fn blank_answer_means_no_key() {
        unsafe { std::env::remove_var(VAR) };
        let mut output = Vec::new();
        let key = resolve_api_key(VAR, &mut Cursor::new("\n"), &mut output).unwrap();

        assert!(key.is_none());
        assert!(
            String::from_utf8(output)
                .unwrap()
                .ends_with("API key is required to continue\n")
        );
    }
}
