use thiserror::Error;

/// Malformed or unrepresentable RIFF/WAVE data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("wav: header too small ({0} bytes)")]
    TooSmall(usize),

    #[error("wav: missing RIFF magic")]
    NotRiff,

    #[error("wav: missing WAVE form type")]
    NotWave,

    #[error("wav: missing fmt or data chunk")]
    MissingChunks,

    #[error("wav: invalid byte rate")]
    InvalidByteRate,

    #[error("wav: {id:?} chunk too large ({len} bytes)")]
    ChunkTooLarge { id: String, len: usize },

    #[error("wav: metadata serialization error: {0}")]
    Metadata(String),
}

/// Failure inside the decode/resample backend.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("decode: wav error: {0}")]
    Wav(String),

    #[error("decode: resample error: {0}")]
    Resample(String),

    #[error("decode: sample rate must be positive")]
    InvalidSampleRate,
}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        FormatError::Metadata(e.to_string())
    }
}

impl From<hound::Error> for DecodeError {
    fn from(e: hound::Error) -> Self {
        DecodeError::Wav(e.to_string())
    }
}

impl From<rubato::ResamplerConstructionError> for DecodeError {
    fn from(e: rubato::ResamplerConstructionError) -> Self {
        DecodeError::Resample(e.to_string())
    }
}

impl From<rubato::ResampleError> for DecodeError {
    fn from(e: rubato::ResampleError) -> Self {
        DecodeError::Resample(e.to_string())
    }
}

/// Error returned by the kit and flat encoders.
#[derive(Error, Debug)]
pub enum KitError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("kit: note {0} out of range 0..=127")]
    InvalidNote(u8),

    #[error("kit: sample rate must be positive")]
    InvalidSampleRate,

    #[error("kit: worker task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for KitError {
    fn from(e: tokio::task::JoinError) -> Self {
        KitError::Task(e.to_string())
    }
}
