//! Sample cleanup: echo, cut-strings and prefix trimming

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use regex::Regex;

use crate::config::Profile;
use crate::error::{Error, Result};

/// Compiled cut-string patterns shared by all requests.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: Mutex<HashMap<String, Arc<Regex>>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the compiled matcher for `pattern`, compiling it on first use.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<Regex>> {
        let mut compiled = self.compiled.lock();
        if let Some(regex) = compiled.get(pattern) {
            return Ok(Arc::clone(regex));
        }
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let regex = Arc::new(regex);
        compiled.insert(pattern.to_string(), Arc::clone(&regex));
        Ok(regex)
    }

    pub fn len(&self) -> usize {
        self.compiled.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.lock().is_empty()
    }
}

/// Clean one raw sample according to `config`.
///
/// Echo runs first so the prompt is subject to the same cleanup as the
/// generated text.
pub fn clean_sample(
    sample: String,
    input: &str,
    config: &Profile,
    patterns: &PatternCache,
) -> Result<String> {
    let mut text = if config.parameters.echo {
        format!("{}{}", input, sample)
    } else {
        sample
    };

    for pattern in &config.cutstrings {
        let regex = patterns.get_or_compile(pattern)?;
        text = regex.replace_all(&text, "").into_owned();
    }

    for prefix in &config.trimspace {
        let stripped = text.strip_prefix(prefix.as_str()).unwrap_or(text.as_str());
        text = stripped.trim().to_string();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_before_cleanup() {
        let mut config = Profile::default();
        config.parameters.echo = true;
        config.cutstrings = vec!["Hello".into()];
        config.trimspace = vec![" ".into()];

        let cache = PatternCache::new();
        let text = clean_sample("Hello world".into(), "Hello", &config, &cache).unwrap();
        assert_eq!(text, "world");
    }

    #[test]
    fn test_cut_without_trim_keeps_whitespace() {
        let mut config = Profile::default();
        config.parameters.echo = true;
        config.cutstrings = vec!["Hello".into()];

        let cache = PatternCache::new();
        let text = clean_sample(" world".into(), "Hello", &config, &cache).unwrap();
        assert_eq!(text, " world");
    }

    #[test]
    fn test_no_echo_leaves_input_out() {
        let config = Profile::default();
        let cache = PatternCache::new();
        let text = clean_sample("answer".into(), "question", &config, &cache).unwrap();
        assert_eq!(text, "answer");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_trim_prefixes_in_order() {
        let config = Profile {
            trimspace: vec!["AI:".into(), "Assistant:".into()],
            ..Default::default()
        };
        let cache = PatternCache::new();
        let text = clean_sample("AI:  Assistant: hi there \n".into(), "", &config, &cache).unwrap();
        assert_eq!(text, "hi there");

        let text = clean_sample("  no prefix  ".into(), "", &config, &cache).unwrap();
        assert_eq!(text, "no prefix");
    }

    #[test]
    fn test_cutstring_removes_all_matches() {
        let config = Profile {
            cutstrings: vec![r"\[\d+\]".into()],
            ..Default::default()
        };
        let cache = PatternCache::new();
        let text = clean_sample("a[1] b[22] c".into(), "", &config, &cache).unwrap();
        assert_eq!(text, "a b c");
    }

    #[test]
    fn test_invalid_pattern() {
        let config = Profile {
            cutstrings: vec!["(unclosed".into()],
            ..Default::default()
        };
        let cache = PatternCache::new();
        let result = clean_sample("x".into(), "", &config, &cache);
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_pattern_compiled_once() {
        let cache = PatternCache::new();
        let first = cache.get_or_compile("foo+").unwrap();
        let second = cache.get_or_compile("foo+").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_pattern_cache_concurrent() {
        let cache = Arc::new(PatternCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let regex = cache.get_or_compile(r"\s+END$").unwrap();
                    regex.replace_all("the story  END", "").into_owned()
                })
            })
            .collect();

        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|r| r == "the story"));
        assert_eq!(cache.len(), 1);
    }
}
