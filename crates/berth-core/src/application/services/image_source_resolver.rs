//! Image source resolution: build from a Dockerfile, or pull an existing image.

use std::path::Path;

use tracing::debug;

use crate::{
    application::{
        ApplicationError,
        ports::{BuildFileChoice, BuildFilePrompts, BuildFileSelector, Prompter},
    },
    domain::ImageSource,
    error::BerthResult,
};

pub const IMAGE_PROMPT: &str = "What's the location of the image to use?";
pub const IMAGE_HELP: &str = "The name of an existing Docker image. \
Images in the Docker Hub registry are available by default. \
Other repositories are specified with either repo-url/image:tag or repo-url/image@digest.";
pub const DOCKERFILE_HELP: &str = "Dockerfile to use for building your container image.";
pub const DOCKERFILE_PATH_HELP: &str =
    "Path to Dockerfile to use for building your container image.";

/// Prompts for choosing the Dockerfile of `service_name`.
pub fn build_file_prompts(service_name: &str) -> BuildFilePrompts {
    BuildFilePrompts {
        prompt: format!("Which Dockerfile would you like to use for {service_name}?"),
        path_prompt: format!("What is the path to the Dockerfile for {service_name}?"),
        help: DOCKERFILE_HELP.to_string(),
        path_help: DOCKERFILE_PATH_HELP.to_string(),
    }
}

pub struct ImageSourceResolver<'a> {
    prompter: &'a dyn Prompter,
    selector: &'a dyn BuildFileSelector,
}

impl<'a> ImageSourceResolver<'a> {
    pub fn new(prompter: &'a dyn Prompter, selector: &'a dyn BuildFileSelector) -> Self {
        Self {
            prompter,
            selector,
        }
    }

    /// Resolve the source for `service_name`. A source already given by
    /// flags is returned as-is and nothing is asked.
    pub fn resolve(
        &self,
        service_name: &str,
        given: Option<ImageSource>,
        search_root: &Path,
    ) -> BerthResult<ImageSource> {
        if let Some(source) = given {
            debug!(%source, "Using image source from flags");
            return Ok(source);
        }

        let choice = self
            .selector
            .choose_build_file(&build_file_prompts(service_name), search_root)
            .map_err(ApplicationError::select_build_file)?;

        match choice {
            BuildFileChoice::Dockerfile(path) => {
                debug!(dockerfile = %path.display(), "Dockerfile selected");
                Ok(ImageSource::Dockerfile(path))
            }
            BuildFileChoice::ExistingImage => self.ask_image_location(),
        }
    }

    fn ask_image_location(&self) -> BerthResult<ImageSource> {
        let location = self
            .prompter
            .get_text(IMAGE_PROMPT, IMAGE_HELP, "", None)
            .map_err(ApplicationError::get_image_location)?;

        let location = location.trim();
        if location.is_empty() {
            return Err(
                ApplicationError::get_image_location(ApplicationError::EmptyImageLocation.into())
                    .into(),
            );
        }
        Ok(ImageSource::Image(location.to_string()))
    }
}
