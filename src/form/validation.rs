use thiserror::Error;

/// Pre-flight form problems, reported locally without a network round trip
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Model is required")]
    ModelRequired,

    #[error("API key is required for {provider}")]
    CredentialRequired { provider: String },

    #[error("Endpoint is required")]
    EndpointRequired,

    #[error("Vector dimensions are required")]
    DimensionsRequired,

    #[error("Vector dimensions must be a positive integer (got '{0}')")]
    DimensionsInvalid(String),
}

/// What the validated form is about to be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Save,
    Test,
}
