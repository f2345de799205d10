//! Language lookup by the names used on the archive page

use crate::config::LanguageEntry;

/// A language known to the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Canonical lower-case name (may list several spellings, `"marwari; marwadi"`)
    pub name: String,

    /// Language code attached to video files
    pub code: String,

    /// Additional names that resolve to this language
    pub aliases: Vec<String>,
}

impl Language {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            code: code.to_string(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_lowercase()).collect();
        self
    }

    /// Returns true if `name` (already lower-cased) designates this language
    ///
    /// Matches the canonical name, any of its `;`-separated spellings, or an alias.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name
            || self.name.split(';').any(|part| part.trim() == name)
            || self.aliases.iter().any(|alias| alias == name)
    }

    /// Name with the first letter upper-cased and the rest lower-cased
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }
}

/// Upper-cases the first character and lower-cases the rest
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// Table of languages, searched in order
#[derive(Debug, Clone)]
pub struct LanguageTable {
    languages: Vec<Language>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LanguageTable {
    /// Languages appearing on the archive page
    pub fn builtin() -> Self {
        let languages = vec![
            Language::new("english", "en"),
            Language::new("hindi", "hi"),
            Language::new("marathi", "mr"),
            Language::new("kannada", "kn"),
            Language::new("tamil", "ta"),
            Language::new("gujarati", "gu"),
            Language::new("sanskrit", "sa"),
            Language::new("bhojpuri; bajpuri; bhojapuri", "bho"),
            Language::new("nepali", "ne"),
            Language::new("malayalam", "ml"),
            Language::new("telugu", "te"),
            Language::new("bengali", "bn"),
            Language::new("odiya", "or").with_aliases(&["oriya", "odia"]),
            Language::new("punjabi", "pa"),
            Language::new("marwari; marwadi", "mwr"),
            Language::new("assamese", "as"),
            Language::new("urdu", "ur"),
            Language::new("spanish", "es"),
            Language::new("chinese", "zh"),
            Language::new("indonesian", "id"),
            Language::new("russian", "ru"),
            Language::new("french", "fr"),
            Language::new("korean", "ko"),
            Language::new("science/educational", "en").with_aliases(&["sci_edu"]),
        ];
        Self { languages }
    }

    /// Builds the built-in table extended by configured entries
    ///
    /// A configured entry replaces a built-in one with the same name.
    pub fn with_entries(entries: &[LanguageEntry]) -> Self {
        let mut table = Self::builtin();
        for entry in entries {
            let aliases: Vec<&str> = entry.aliases.iter().map(String::as_str).collect();
            table.insert(Language::new(&entry.name, &entry.code).with_aliases(&aliases));
        }
        table
    }

    pub fn insert(&mut self, language: Language) {
        match self.languages.iter_mut().find(|l| l.name == language.name) {
            Some(existing) => *existing = language,
            None => self.languages.push(language),
        }
    }

    /// Looks up a language by any of its names, case-insensitively
    pub fn lookup(&self, name: &str) -> Option<&Language> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        self.languages.iter().find(|l| l.answers_to(&name))
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
