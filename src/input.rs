//! Input discrimination: decides whether an invocation supplies manifest files
//! or positional type/name arguments.

use crate::error::InputError;
use std::path::PathBuf;

/// File-reference flags as parsed from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameOptions {
    /// Paths, directories, URLs, or `-` for stdin
    pub filenames: Vec<String>,
    /// Kustomization directory (`-k`)
    pub kustomize: Option<PathBuf>,
    /// Expand directories recursively
    pub recursive: bool,
}

impl FilenameOptions {
    pub fn new(filenames: Vec<String>) -> Self {
        Self {
            filenames,
            ..Self::default()
        }
    }

    /// True when no usable file reference was supplied.
    pub fn is_empty(&self) -> bool {
        self.filenames.iter().all(|f| f.is_empty()) && self.kustomize.is_none()
    }

    /// Reject flag combinations that cannot be resolved together.
    pub fn validate(&self) -> Result<(), InputError> {
        let has_files = self.filenames.iter().any(|f| !f.is_empty());
        if has_files && self.kustomize.is_some() {
            return Err(InputError::InvalidFilenameOptions(
                "only one of -f or -k can be specified".to_string(),
            ));
        }
        if self.kustomize.is_some() && self.recursive {
            return Err(InputError::InvalidFilenameOptions(
                "the -k flag can't be used with -f or -R".to_string(),
            ));
        }
        Ok(())
    }
}

/// Classified input for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Files(FilenameOptions),
    TypeNameArgs(Vec<String>),
}

impl InputMode {
    pub fn is_files(&self) -> bool {
        matches!(self, InputMode::Files(_))
    }
}

/// Classify the invocation's input. Exactly one of the two forms must be present.
pub fn classify(files: &FilenameOptions, args: &[String]) -> Result<InputMode, InputError> {
    match (files.is_empty(), args.is_empty()) {
        (false, false) => Err(InputError::Conflicting),
        (true, true) => Err(InputError::Missing),
        (false, true) => {
            files.validate()?;
            let mut files = files.clone();
            files.filenames.retain(|f| !f.is_empty());
            Ok(InputMode::Files(files))
        }
        (true, false) => Ok(InputMode::TypeNameArgs(args.to_vec())),
    }
}
