use url::Url;

use common::prelude::{validate_charset, Charset};

use super::WorkflowError;

/// Accept either a bare note id or a share link ending in `/note/{id}`.
pub fn parse_note_ref(input: &str) -> Result<String, WorkflowError> {
    let input = input.trim();
    let invalid = || WorkflowError::InvalidNoteRef(input.to_string());

    let id = match Url::parse(input) {
        Ok(url) => {
            let segments: Vec<&str> = url
                .path_segments()
                .map(|s| s.filter(|seg| !seg.is_empty()).collect())
                .unwrap_or_default();
            match segments.as_slice() {
                [.., "note", id] => (*id).to_string(),
                _ => return Err(invalid()),
            }
        }
        Err(_) => input.to_string(),
    };

    // ids are `{nickname}-{seconds}`, so they share the nickname charset
    if id.is_empty() || !validate_charset(&id, Charset::Nickname) {
        return Err(invalid());
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id() {
        assert_eq!(parse_note_ref("john-1700000000").unwrap(), "john-1700000000");
        assert_eq!(parse_note_ref("  john-42\n").unwrap(), "john-42");
    }

    #[test]
    fn test_share_url() {
        assert_eq!(
            parse_note_ref("https://notes.example.com/note/john-42").unwrap(),
            "john-42"
        );
        assert_eq!(
            parse_note_ref("http://localhost:5010/app/note/john-42/").unwrap(),
            "john-42"
        );
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in [
            "",
            "   ",
            "https://notes.example.com/",
            "https://notes.example.com/other/john-42",
            "john 42",
            "../etc/passwd",
        ] {
            assert!(
                matches!(parse_note_ref(bad), Err(WorkflowError::InvalidNoteRef(_))),
                "{bad:?}"
            );
        }
    }
}
