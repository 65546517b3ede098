use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;
use regex::Regex;

const EMAIL_REGEX: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    match fs::read_dir(dir.as_ref()) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir.as_ref())
                .with_context(|| format!("create directory '{}'", dir.as_ref().display()))?;
            Ok(())
        }
        Err(err) => {
            Err(err).with_context(|| format!("read directory '{}'", dir.as_ref().display()))
        }
    }
}

pub struct BuildInfo {
    version: &'static str,
    build_target: &'static str,
    build_time: &'static str,
    rustc: &'static str,
}

impl BuildInfo {
    #[inline]
    pub fn new() -> Self {
        Self {
            version: env!("TASKFIXER_VERSION"),
            build_target: env!("TASKFIXER_TARGET"),
            build_time: env!("VERGEN_BUILD_TIMESTAMP"),
            rustc: env!("VERGEN_RUSTC_SEMVER"),
        }
    }

    pub fn log(&self) {
        info!(
            "Welcome to taskfixer, version {}, target '{}', rustc {}, build time '{}'",
            self.version, self.build_target, self.rustc, self.build_time
        );
    }
}

/// Ask for a yes/no confirmation on the terminal. Anything other than "y"
/// or "yes" counts as no.
pub fn confirm(message: &str) -> Result<bool> {
    eprint!("{message} [y/n]: ");
    io::stderr().flush().context("flush stderr")?;

    let mut input = String::new();
    io::stdin().read_line(&mut input).context("read stdin")?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}

/// Prompt for a line of input on the terminal, with the value echoed.
pub fn input(message: &str) -> Result<String> {
    eprint!("[taskfixer] {message}: ");
    io::stderr().flush().context("flush stderr")?;

    let mut line = String::new();
    io::stdin().read_line(&mut line).context("read stdin")?;
    Ok(line.trim().to_string())
}

/// Prompt for a password without echoing it.
pub fn input_password(message: &str) -> Result<String> {
    let password = rpassword::prompt_password(format!("[taskfixer] {message}: "))
        .context("input password from tty")?;
    Ok(password)
}

pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        bail!("email cannot be empty");
    }
    let re = Regex::new(EMAIL_REGEX).expect("invalid email regex");
    if !re.is_match(email) {
        bail!("invalid email address '{email}'");
    }
    Ok(())
}

/// Password rule applied before sending a signup request. At least 6
/// characters, with at least one letter and one digit.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        bail!("password cannot be empty");
    }
    if password.chars().count() < 6 {
        bail!("password must be at least 6 characters");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        bail!("password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        bail!("password must contain at least one digit");
    }
    Ok(())
}
