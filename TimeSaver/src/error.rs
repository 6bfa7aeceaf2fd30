use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("WLData error: {0}")]
    WlData(#[from] wldata::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The object's main export (e.g. `Default__Foo_C`) isn't there
    #[error("Could not find {export} in {object}")]
    MissingPrimaryExport { object: String, export: String },

    #[error("Could not find OakCharacterMovement in {object}")]
    MissingMovement { object: String },

    #[error("{object} has no {attribute}")]
    MissingAttribute { object: String, attribute: String },

    #[error(
        "{object} was serialized at version {found:?}; version {required} or newer is needed for valid curve data"
    )]
    DataVersionTooOld {
        object: String,
        found: Option<u64>,
        required: u64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
