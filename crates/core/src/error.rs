use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The sub process exited with non-success code.")]
    SubProcessExit,

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Json {
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    },

    #[error("Git command `{}` failed: {}", .command, .detail)]
    Git { command: String, detail: String },

    #[error("Could not locate website checkout at `{}`", _0)]
    WebsiteNotFound(String),

    #[error("File watch error: {}", _0)]
    Watch(#[from] notify::Error),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn io_error(file_description: &str, path: &str, original: std::io::Error) -> Self {
        Self::Io {
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn yaml_error(
        action: &str,
        file_description: &str,
        path: &str,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action: action.to_string(),
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn json_error(
        action: &str,
        file_description: &str,
        path: &str,
        original: serde_json::Error,
    ) -> Self {
        Self::Json {
            action: action.to_string(),
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }
}
