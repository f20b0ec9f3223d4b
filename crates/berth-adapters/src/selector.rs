//! Dockerfile selection: search the workspace, then let the user pick.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use berth_core::{
    application::{
        ApplicationError,
        ports::{BuildFileChoice, BuildFilePrompts, BuildFileSelector, Prompter},
    },
    error::BerthResult,
};

pub const CUSTOM_PATH_OPTION: &str = "Enter custom path for your Dockerfile";
pub const EXISTING_IMAGE_OPTION: &str = "Use an existing image instead";

/// How deep below the search root Dockerfiles are looked for.
pub const DEFAULT_SEARCH_DEPTH: usize = 3;

const EXCLUDED_DIRS: &[&str] = &["node_modules", "vendor", "target", "dist", "build"];

const DOCKERFILE: &str = "Dockerfile";

/// Offers the Dockerfiles found under the search root, a custom path, or
/// an existing image.
pub struct DockerfileSelector<P> {
    prompter: P,
    max_depth: usize,
}

impl<P: Prompter> DockerfileSelector<P> {
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            max_depth: DEFAULT_SEARCH_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    fn ask_custom_path(&self, prompts: &BuildFilePrompts) -> BerthResult<PathBuf> {
        let answer = self.prompter.get_text(
            &prompts.path_prompt,
            &prompts.path_help,
            "",
            Some(validate_dockerfile_path),
        )?;

        let path = PathBuf::from(answer.trim());
        validate_dockerfile_path(answer.trim()).map_err(|reason| ApplicationError::BuildFile {
            path: path.clone(),
            reason,
        })?;
        Ok(path)
    }
}

impl<P: Prompter> BuildFileSelector for DockerfileSelector<P> {
    fn choose_build_file(
        &self,
        prompts: &BuildFilePrompts,
        search_root: &Path,
    ) -> BerthResult<BuildFileChoice> {
        let found = find_dockerfiles(search_root, self.max_depth);
        debug!(root = %search_root.display(), count = found.len(), "Dockerfiles found");

        let mut options: Vec<String> = found
            .iter()
            .map(|rel| rel.display().to_string())
            .collect();
        options.push(CUSTOM_PATH_OPTION.to_string());
        options.push(EXISTING_IMAGE_OPTION.to_string());

        let choice = self
            .prompter
            .select_one(&prompts.prompt, &prompts.help, &options)?;

        match choice.as_str() {
            EXISTING_IMAGE_OPTION => Ok(BuildFileChoice::ExistingImage),
            CUSTOM_PATH_OPTION => self.ask_custom_path(prompts).map(BuildFileChoice::Dockerfile),
            picked => {
                let rel = found
                    .iter()
                    .find(|rel| rel.display().to_string() == picked)
                    .ok_or_else(|| ApplicationError::Prompt {
                        reason: format!("{picked} is not one of the offered options"),
                    })?;
                Ok(BuildFileChoice::Dockerfile(search_root.join(rel)))
            }
        }
    }
}

/// Every file named `Dockerfile` under `root`, relative to it, sorted.
/// Hidden and vendored directories are skipped.
pub fn find_dockerfiles(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && e.file_name() == DOCKERFILE)
        .filter_map(|e| e.path().strip_prefix(root).ok().map(Path::to_path_buf))
        .collect();
    found.sort();
    found
}

fn is_excluded(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') || EXCLUDED_DIRS.contains(&name))
}

fn validate_dockerfile_path(raw: &str) -> Result<(), String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("path cannot be empty".into());
    }
    if !Path::new(raw).is_file() {
        return Err(format!("{raw} is not a file"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Mutex;

    use berth_core::application::ports::TextValidator;

    use super::*;

    /// Picks a fixed option and answers text prompts with a fixed string.
    struct Scripted {
        pick: String,
        text: String,
        offered: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(pick: &str, text: &str) -> Self {
            Self {
                pick: pick.into(),
                text: text.into(),
                offered: Mutex::new(Vec::new()),
            }
        }
    }

    impl Prompter for Scripted {
        fn select_one(&self, _: &str, _: &str, options: &[String]) -> BerthResult<String> {
            *self.offered.lock().unwrap() = options.to_vec();
            Ok(self.pick.clone())
        }

        fn get_text(
            &self,
            _: &str,
            _: &str,
            _: &str,
            _: Option<TextValidator>,
        ) -> BerthResult<String> {
            Ok(self.text.clone())
        }
    }

    fn prompts() -> BuildFilePrompts {
        BuildFilePrompts {
            prompt: "Which Dockerfile would you like to use for api?".into(),
            path_prompt: "What is the path to the Dockerfile for api?".into(),
            help: String::new(),
            path_help: String::new(),
        }
    }

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for rel in [
            "api/Dockerfile",
            "web/Dockerfile",
            "node_modules/pkg/Dockerfile",
            ".git/Dockerfile",
            "a/b/c/d/Dockerfile",
        ] {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "FROM scratch\n").unwrap();
        }
        dir
    }

    #[test]
    fn finds_dockerfiles_skipping_hidden_and_vendored() {
        let dir = workspace();
        assert_eq!(
            find_dockerfiles(dir.path(), DEFAULT_SEARCH_DEPTH),
            vec![PathBuf::from("api/Dockerfile"), PathBuf::from("web/Dockerfile")]
        );
    }

    #[test]
    fn offers_found_files_then_fallbacks() {
        let dir = workspace();
        let selector = DockerfileSelector::new(Scripted::new("web/Dockerfile", ""));

        let choice = selector.choose_build_file(&prompts(), dir.path()).unwrap();

        assert_eq!(
            choice,
            BuildFileChoice::Dockerfile(dir.path().join("web/Dockerfile"))
        );
        assert_eq!(
            *selector.prompter.offered.lock().unwrap(),
            vec![
                "api/Dockerfile".to_string(),
                "web/Dockerfile".into(),
                CUSTOM_PATH_OPTION.into(),
                EXISTING_IMAGE_OPTION.into(),
            ]
        );
    }

    #[test]
    fn existing_image_option_is_reported() {
        let dir = workspace();
        let selector = DockerfileSelector::new(Scripted::new(EXISTING_IMAGE_OPTION, ""));
        assert_eq!(
            selector.choose_build_file(&prompts(), dir.path()).unwrap(),
            BuildFileChoice::ExistingImage
        );
    }

    #[test]
    fn custom_path_must_exist() {
        let dir = workspace();
        let custom = dir.path().join("api/Dockerfile");
        let selector = DockerfileSelector::new(Scripted::new(
            CUSTOM_PATH_OPTION,
            custom.to_str().unwrap(),
        ));
        assert_eq!(
            selector.choose_build_file(&prompts(), dir.path()).unwrap(),
            BuildFileChoice::Dockerfile(custom)
        );

        let selector = DockerfileSelector::new(Scripted::new(
            CUSTOM_PATH_OPTION,
            "/no/such/Dockerfile",
        ));
        assert!(selector.choose_build_file(&prompts(), dir.path()).is_err());
    }

    #[test]
    fn deeper_search_finds_nested_files() {
        let dir = workspace();
        let found = find_dockerfiles(dir.path(), 5);
        assert!(found.contains(&PathBuf::from("a/b/c/d/Dockerfile")));
    }
}
