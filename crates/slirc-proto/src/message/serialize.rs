use std::fmt::{self, Display, Formatter};

use super::types::Message;

/// Whether the final parameter must be written in trailing (`:`) form.
pub(crate) fn needs_colon_prefix(param: &str) -> bool {
    param.is_empty() || param.contains(' ') || param.starts_with(':')
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.origin.is_empty() {
            write!(f, ":{} ", self.origin)?;
        }

        f.write_str(&self.command)?;

        if let Some((last, middle)) = self.params.split_last() {
            for param in middle {
                write!(f, " {}", param)?;
            }
            if needs_colon_prefix(last) {
                write!(f, " :{}", last)?;
            } else {
                write!(f, " {}", last)?;
            }
        }

        Ok(())
    }
}
