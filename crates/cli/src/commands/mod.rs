//! CLI command implementations.

use std::io::{self, BufRead, Write};

use secrecy::SecretString;

pub mod auth;
pub mod orders;
pub mod products;
pub mod shop;

/// Read the password from `MARKETPLACE_PASSWORD`, falling back to a prompt.
///
/// The prompt echoes; set the variable for unattended use.
pub(crate) fn read_password() -> io::Result<SecretString> {
    if let Ok(password) = std::env::var("MARKETPLACE_PASSWORD") {
        return Ok(SecretString::from(password));
    }
    let input = prompt("Password")?
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no password provided"))?;
    Ok(SecretString::from(input))
}

/// Prompt on stderr and read one trimmed line from stdin.
///
/// Returns `None` at end of input.
pub(crate) fn prompt(label: &str) -> io::Result<Option<String>> {
    let mut stderr = io::stderr();
    write!(stderr, "{label}: ")?;
    stderr.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}
