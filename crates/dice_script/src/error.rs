use thiserror::Error;

/// Errors that can occur while bringing script chunks into the runtime.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to create script runtime: {message}")]
    Init { message: String },

    #[error("Failed to load {name}: {message}")]
    Load { name: String, message: String },

    #[error("Failed to execute {name}: {message}")]
    Exec { name: String, message: String },
}

impl ScriptError {
    pub(crate) fn init(message: impl ToString) -> Self {
        Self::Init {
            message: message.to_string(),
        }
    }

    pub(crate) fn load(name: &str, message: impl ToString) -> Self {
        Self::Load {
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn exec(name: &str, message: impl ToString) -> Self {
        Self::Exec {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}
