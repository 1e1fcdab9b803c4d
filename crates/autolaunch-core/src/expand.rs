//! Environment variable expansion for program paths.
//!
//! Supports `%VAR%` (Windows style), `$VAR` and `${VAR}`. References to
//! unset variables are left untouched so the resulting spawn error shows
//! what was written in the config.

/// Expands variables in `input` using the process environment.
pub fn expand_env(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expands variables in `input` using `lookup` to resolve names.
pub fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(['%', '$']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match expand_one(tail, &lookup) {
            Some((value, consumed)) => {
                out.push_str(&value);
                rest = &tail[consumed..];
            }
            None => {
                // Not a reference; keep the sigil and move on.
                out.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Tries to expand a reference at the start of `tail`.
///
/// Returns the replacement and the number of bytes it covers.
fn expand_one(tail: &str, lookup: &impl Fn(&str) -> Option<String>) -> Option<(String, usize)> {
    let (name, consumed) = if let Some(body) = tail.strip_prefix('%') {
        let end = body.find('%')?;
        (&body[..end], end + 2)
    } else if let Some(body) = tail.strip_prefix("${") {
        let end = body.find('}')?;
        (&body[..end], end + 3)
    } else {
        let body = &tail[1..];
        let end = body
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(body.len());
        (&body[..end], end + 1)
    };

    if !is_valid_name(name) {
        return None;
    }
    lookup(name).map(|value| (value, consumed))
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '(' || c == ')')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "WINDIR" => Some(r"C:\Windows".into()),
            "HOME" => Some("/home/ada".into()),
            "ProgramFiles(x86)" => Some(r"C:\Program Files (x86)".into()),
            _ => None,
        }
    }

    #[test]
    fn expands_percent_references() {
        assert_eq!(
            expand_with(r"%WINDIR%\notepad.exe", lookup),
            r"C:\Windows\notepad.exe"
        );
    }

    #[test]
    fn expands_percent_references_with_parentheses() {
        assert_eq!(
            expand_with(r"%ProgramFiles(x86)%\App\app.exe", lookup),
            r"C:\Program Files (x86)\App\app.exe"
        );
    }

    #[test]
    fn expands_dollar_references() {
        assert_eq!(expand_with("$HOME/bin/tool", lookup), "/home/ada/bin/tool");
        assert_eq!(expand_with("${HOME}bin", lookup), "/home/adabin");
    }

    #[test]
    fn unset_variables_are_left_verbatim() {
        assert_eq!(expand_with(r"%NOPE%\x.exe", lookup), r"%NOPE%\x.exe");
        assert_eq!(expand_with("$NOPE/x", lookup), "$NOPE/x");
    }

    #[test]
    fn lone_sigils_are_kept() {
        assert_eq!(expand_with("100% $ sure", lookup), "100% $ sure");
    }

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(
            expand_with(r"C:\Tools\launcher.exe", lookup),
            r"C:\Tools\launcher.exe"
        );
    }
}
