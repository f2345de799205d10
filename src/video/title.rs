//! Video title normalization
//!
//! Archive link texts carry file-listing noise: separators, file sizes
//! (`12MB`), the language name, file extensions and stray numbers. This
//! module strips that noise to produce a display title.

use crate::language::capitalize;
use regex::Regex;
use std::sync::OnceLock;

/// Fixed noise tokens and their replacements
const NOISE: [(&str, &str); 5] = [
    ("-", " "),
    ("MB", ""),
    ("|", ""),
    (".avi", ""),
    (".wmv", ""),
];

/// Normalizes a raw video title
///
/// Removes hyphens (replaced by spaces), pipes, every `MB`, the language
/// name in upper, lower and capitalized form, `.avi`/`.wmv`, collapses
/// runs of spaces and trims. Removal is repeated until nothing changes, so
/// a removal can never leave a new noise token behind (`MMBB` → ``).
///
/// Finally, if the title ends in two digits, those two digits are dropped.
/// This also eats real trailing numbers (`Toy 12` → `Toy`).
///
/// # Examples
///
/// ```
/// use toybox_chef::video::normalize_title;
///
/// assert_eq!(normalize_title("Paper Boat - HINDI 12MB.avi", "hindi"), "Paper Boat");
/// assert_eq!(normalize_title("Flying Bird | Marathi 07", "marathi"), "Flying Bird");
/// ```
pub fn normalize_title(title: &str, language_name: &str) -> String {
    let language_forms = [
        language_name.to_uppercase(),
        language_name.to_lowercase(),
        capitalize(language_name),
    ];

    let mut clean = title.to_string();
    loop {
        let mut next = clean.clone();
        for (token, replacement) in NOISE {
            next = next.replace(token, replacement);
        }
        for form in language_forms.iter().filter(|f| !f.is_empty()) {
            next = next.replace(form.as_str(), "");
        }
        next = collapse_spaces(&next);

        if next == clean {
            break;
        }
        clean = next;
    }

    let mut clean = clean.trim().to_string();
    if ends_with_two_digits(&clean) {
        clean.truncate(clean.len() - 2);
        clean = clean.trim_end().to_string();
    }

    tracing::debug!("Cleaned video title: {:?} -> {:?}", title, clean);
    clean
}

static SPACES_RE: OnceLock<Regex> = OnceLock::new();

fn spaces_re() -> &'static Regex {
    SPACES_RE.get_or_init(|| Regex::new(" +").unwrap())
}

fn collapse_spaces(s: &str) -> String {
    spaces_re().replace_all(s, " ").into_owned()
}

fn ends_with_two_digits(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2
        && bytes[bytes.len() - 1].is_ascii_digit()
        && bytes[bytes.len() - 2].is_ascii_digit()
}
