use std::fmt;

use crate::error::EncodeError;
use crate::message::needs_colon_prefix;

fn find_line_break(value: &str) -> Option<char> {
    value.chars().find(|&c| c == '\r' || c == '\n' || c == '\0')
}

/// Validate a middle parameter: non-empty, a single word, no line breaks.
pub(crate) fn token(field: &'static str, value: impl Into<String>) -> Result<String, EncodeError> {
    let value = value.into();
    if value.is_empty() {
        return Err(EncodeError::MissingField(field));
    }
    if let Some(ch) = find_line_break(&value) {
        return Err(EncodeError::IllegalChar { field, ch });
    }
    if value.contains(' ') || value.starts_with(':') {
        return Err(EncodeError::NotAToken { field, value });
    }
    Ok(value)
}

/// Validate free text destined for the trailing parameter.
pub(crate) fn text(field: &'static str, value: impl Into<String>) -> Result<String, EncodeError> {
    let value = value.into();
    if value.is_empty() {
        return Err(EncodeError::MissingField(field));
    }
    optional_text(field, value)
}

/// Like [`text`] but an empty value is allowed.
pub(crate) fn optional_text(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, EncodeError> {
    let value = value.into();
    if let Some(ch) = find_line_break(&value) {
        return Err(EncodeError::IllegalChar { field, ch });
    }
    Ok(value)
}

/// Write `cmd` and its args, colon-prefixing the last one only when needed.
pub(crate) fn write_cmd(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    if let Some((last, middle)) = args.split_last() {
        for arg in middle {
            write!(f, " {}", arg)?;
        }
        if needs_colon_prefix(last) {
            write!(f, " :{}", last)?;
        } else {
            write!(f, " {}", last)?;
        }
    }
    Ok(())
}

/// Write `cmd` and its args, always writing the last one in trailing form.
pub(crate) fn write_cmd_freeform(
    f: &mut fmt::Formatter<'_>,
    cmd: &str,
    args: &[&str],
) -> fmt::Result {
    f.write_str(cmd)?;
    if let Some((last, middle)) = args.split_last() {
        for arg in middle {
            write!(f, " {}", arg)?;
        }
        write!(f, " :{}", last)?;
    }
    Ok(())
}
