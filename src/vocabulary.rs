use crate::error::VocabularyError;
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::HashSet;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

const DEFAULT_VOCABULARY: &str = "guessword";

/// The fixed word list a round is shuffled from
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Vocabulary {
    pub name: String,
    #[serde(default)]
    pub size: u32,
    pub words: Vec<String>,
}

impl Vocabulary {
    /// The vocabulary shipped with the game
    pub fn embedded() -> Result<Self, VocabularyError> {
        Self::from_embedded_file(DEFAULT_VOCABULARY)
    }

    pub fn from_embedded_file(name: &str) -> Result<Self, VocabularyError> {
        let file_name = format!("{name}.json");
        let file = LANG_DIR
            .get_file(&file_name)
            .ok_or_else(|| VocabularyError::NotFound(file_name.clone()))?;
        let contents = file
            .contents_utf8()
            .ok_or(VocabularyError::NotUtf8(file_name))?;

        Self::from_json(contents)
    }

    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Vocabulary = serde_json::from_str(json)?;
        vocabulary.validated()
    }

    pub fn from_words<I, S>(name: &str, words: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        Self {
            name: name.to_string(),
            size: words.len() as u32,
            words,
        }
        .validated()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn validated(self) -> Result<Self, VocabularyError> {
        if self.words.is_empty() {
            return Err(VocabularyError::Empty(self.name));
        }

        let mut seen = HashSet::with_capacity(self.words.len());
        if let Some(dup) = self.words.iter().find(|w| !seen.insert(w.as_str())) {
            return Err(VocabularyError::Duplicate {
                name: self.name.clone(),
                word: dup.clone(),
            });
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_embedded_vocabulary() {
        let vocab = Vocabulary::embedded().unwrap();

        assert_eq!(vocab.name, "guessword");
        assert_eq!(vocab.len(), 21);
        assert_eq!(vocab.size as usize, vocab.len());
        assert!(vocab.words.contains(&"zebra".to_string()));
    }

    #[test]
    fn test_missing_embedded_file() {
        let result = Vocabulary::from_embedded_file("klingon");
        assert_matches!(result, Err(VocabularyError::NotFound(name)) if name == "klingon.json");
    }

    #[test]
    fn test_from_json() {
        let json_data = r#"
        {
            "name": "test",
            "size": 3,
            "words": ["hello", "world", "test"]
        }
        "#;

        let vocab = Vocabulary::from_json(json_data).unwrap();
        assert_eq!(vocab.name, "test");
        assert_eq!(vocab.words, vec!["hello", "world", "test"]);
    }

    #[test]
    fn test_invalid_json() {
        assert_matches!(
            Vocabulary::from_json("{ not json"),
            Err(VocabularyError::Parse(_))
        );
    }

    #[test]
    fn test_empty_word_list_rejected() {
        let result = Vocabulary::from_words("nothing", Vec::<String>::new());
        assert_matches!(result, Err(VocabularyError::Empty(name)) if name == "nothing");
    }

    #[test]
    fn test_duplicates_rejected() {
        let result = Vocabulary::from_words("dups", ["cat", "dog", "cat"]);
        assert_matches!(
            result,
            Err(VocabularyError::Duplicate { word, .. }) if word == "cat"
        );
    }
}
