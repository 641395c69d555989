//! Filesystem-backed model directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use parking_lot::Mutex;

use super::{ModelLister, TemplateExpander};

/// Files in the models path that are never models.
const SKIPPED_EXTENSIONS: &[&str] = &["keep", "yaml", "yml", "tmpl"];

/// Template placeholder replaced with the request input.
const INPUT_PLACEHOLDERS: &[&str] = &["{{.Input}}", "{{ .Input }}"];

/// Models directory
///
/// Every regular file (other than profiles, templates and `.keep`) is a
/// model. A model or profile named `foo` can carry a prompt template in
/// `foo.tmpl`; template text is cached after the first read.
pub struct ModelDir {
    path: PathBuf,
    templates: Mutex<HashMap<String, Arc<str>>>,
}

impl ModelDir {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            templates: Mutex::new(HashMap::new()),
        }
    }

    fn load_template(&self, key: &str) -> Result<Arc<str>> {
        if let Some(template) = self.templates.lock().get(key) {
            return Ok(Arc::clone(template));
        }

        if !is_plain_name(key) {
            return Err(anyhow!("invalid template name: {}", key));
        }
        let file = self.path.join(format!("{}.tmpl", key));
        if !file.is_file() {
            return Err(anyhow!("template not found: {}", file.display()));
        }
        let text: Arc<str> = std::fs::read_to_string(&file)
            .with_context(|| format!("cannot read template {}", file.display()))?
            .into();

        self.templates
            .lock()
            .insert(key.to_string(), Arc::clone(&text));
        Ok(text)
    }
}

impl ModelLister for ModelDir {
    fn list_models(&self) -> Result<Vec<String>> {
        let mut models = Vec::new();

        let entries = std::fs::read_dir(&self.path)
            .with_context(|| format!("cannot read models path {}", self.path.display()))?;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let skipped = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|ext| SKIPPED_EXTENSIONS.contains(&ext))
                .unwrap_or(false);
            if !skipped {
                models.push(name);
            }
        }

        models.sort();
        Ok(models)
    }

    fn exists_in_path(&self, name: &str) -> bool {
        is_plain_name(name) && self.path.join(name).exists()
    }

    fn model_path(&self) -> &Path {
        &self.path
    }
}

impl TemplateExpander for ModelDir {
    fn template_prefix(&self, key: &str, input: &str) -> Result<String> {
        let template = self.load_template(key)?;
        Ok(render(&template, input))
    }
}

/// A bare file name: no separators and no parent references.
pub(crate) fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn render(template: &str, input: &str) -> String {
    INPUT_PLACEHOLDERS
        .iter()
        .fold(template.to_string(), |text, placeholder| {
            text.replace(placeholder, input)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "ggml-gpt4all-j.bin",
            "alpaca.bin",
            "gpt.yaml",
            "alpaca.bin.tmpl",
            ".keep",
        ] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("subdir")).unwrap();
        dir
    }

    #[test]
    fn test_list_models_skips_non_models() {
        let dir = models_dir();
        let models = ModelDir::new(dir.path()).list_models().unwrap();
        assert_eq!(models, vec!["alpaca.bin", "ggml-gpt4all-j.bin"]);
    }

    #[test]
    fn test_list_models_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ModelDir::new(dir.path().join("missing")).list_models().is_err());
    }

    #[test]
    fn test_exists_in_path() {
        let dir = models_dir();
        let models = ModelDir::new(dir.path());
        assert!(models.exists_in_path("alpaca.bin"));
        assert!(!models.exists_in_path("missing.bin"));
        assert!(!models.exists_in_path("../alpaca.bin"));
        assert!(!models.exists_in_path(""));
    }

    #[test]
    fn test_template_prefix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("alpaca.tmpl"),
            "### Instruction:\n{{.Input}}\n### Response:\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("spaced.tmpl"), "Q: {{ .Input }} A:").unwrap();

        let models = ModelDir::new(dir.path());
        assert_eq!(
            models.template_prefix("alpaca", "hi").unwrap(),
            "### Instruction:\nhi\n### Response:\n"
        );
        assert_eq!(models.template_prefix("spaced", "why").unwrap(), "Q: why A:");
        assert!(models.template_prefix("missing", "hi").is_err());
    }

    #[test]
    fn test_template_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cached.tmpl");
        std::fs::write(&file, "v1 {{.Input}}").unwrap();

        let models = ModelDir::new(dir.path());
        assert_eq!(models.template_prefix("cached", "x").unwrap(), "v1 x");
        std::fs::remove_file(&file).unwrap();
        assert_eq!(models.template_prefix("cached", "y").unwrap(), "v1 y");
    }
}
