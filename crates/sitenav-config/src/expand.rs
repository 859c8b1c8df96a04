//! `${VAR}` expansion for path-like configuration values.
//!
//! Only the braced form is recognized: `${VAR}` fails when `VAR` is unset,
//! `${VAR:-fallback}` substitutes `fallback`. Text outside `${...}` spans,
//! including a bare `$VAR`, is copied unchanged so that literal dollar signs
//! in paths survive.

use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

static BRACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]*\}").expect("braced pattern is valid"));

/// Expand environment references in `value`, reporting failures against `key`.
pub(crate) fn expand_env(value: &str, key: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let mut result = String::with_capacity(value.len());
    let mut last = 0;
    for span in BRACED.find_iter(value) {
        result.push_str(&value[last..span.start()]);
        result.push_str(&expand_span(span.as_str(), key)?);
        last = span.end();
    }
    result.push_str(&value[last..]);
    Ok(result)
}

/// Expand a single `${...}` span.
fn expand_span(span: &str, key: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(span, lookup)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: key.to_owned(),
            message: format!("${{{}}} not set", e.cause.name),
        })
}

fn lookup(var: &str) -> Result<Option<String>, UnsetVar> {
    std::env::var(var).map(Some).map_err(|_| UnsetVar {
        name: var.to_owned(),
    })
}

/// Lookup failure for a variable without a fallback.
#[derive(Debug)]
struct UnsetVar {
    name: String,
}
