use thiserror::Error;

/// An environment variable required by the application is not set, or is blank.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Values consisting only of whitespace count as missing, and surrounding
/// whitespace is trimmed from the returned value. Credentials pasted into
/// shell profiles often carry a trailing newline or space.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(MissingEnvVarError(name.to_string())),
    }
}
