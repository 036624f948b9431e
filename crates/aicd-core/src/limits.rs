//! Input limits applied before a request leaves the machine
//!
//! The service enforces its own bounds; these mirror the detection form so
//! obviously bad input fails fast with a friendly message.

use aicd_client::Upload;

use crate::error::InputError;

/// Counted in UTF-16 code units, the way the detection form measures text
pub const MAX_TEXT_CHARS: usize = 100_000;
pub const MAX_UPLOAD_BYTES: usize = 500 * 1024;

pub fn check_text(text: &str) -> Result<(), InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }

    if text.encode_utf16().count() > MAX_TEXT_CHARS {
        return Err(InputError::TextTooLong {
            max: MAX_TEXT_CHARS,
        });
    }

    Ok(())
}

pub fn check_upload(upload: &Upload) -> Result<(), InputError> {
    if upload.len() > MAX_UPLOAD_BYTES {
        return Err(InputError::FileTooBig {
            max: MAX_UPLOAD_BYTES,
        });
    }

    if upload.kind().is_none() {
        return Err(InputError::UnsupportedFile);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_text() {
        assert_eq!(check_text("  \n "), Err(InputError::Empty));
        assert!(check_text("hello").is_ok());

        let exact = "é".repeat(MAX_TEXT_CHARS);
        assert!(check_text(&exact).is_ok());

        let long = "a".repeat(MAX_TEXT_CHARS + 1);
        assert_eq!(
            check_text(&long),
            Err(InputError::TextTooLong { max: MAX_TEXT_CHARS })
        );
    }

    #[test]
    fn test_astral_characters_count_twice() {
        let half = "\u{1F600}".repeat(MAX_TEXT_CHARS / 2);
        assert!(check_text(&half).is_ok());

        let over = format!("{half}a");
        assert_eq!(
            check_text(&over),
            Err(InputError::TextTooLong { max: MAX_TEXT_CHARS })
        );
    }

    #[test]
    fn test_check_upload() {
        assert!(check_upload(&Upload::new("essay.pdf", vec![0; MAX_UPLOAD_BYTES])).is_ok());

        let big = Upload::new("essay.pdf", vec![0; MAX_UPLOAD_BYTES + 1]);
        assert_eq!(
            check_upload(&big),
            Err(InputError::FileTooBig { max: MAX_UPLOAD_BYTES })
        );

        let image = Upload::new("photo.png", vec![1, 2, 3]);
        assert_eq!(check_upload(&image), Err(InputError::UnsupportedFile));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            InputError::FileTooBig { max: MAX_UPLOAD_BYTES }.to_string(),
            "File is too big! Maximum size is 500KB."
        );
        assert_eq!(
            InputError::TextTooLong { max: MAX_TEXT_CHARS }.to_string(),
            "Text is too long! Maximum is 100000 characters."
        );
    }
}
