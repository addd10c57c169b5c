use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP transport error: {0}")]
    Http(String),

    #[error("HTTP {code} from {url}")]
    Status { code: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response is missing `{0}`")]
    MissingField(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Response from {url} exceeds {limit} bytes")]
    TooLarge { limit: u64, url: String },

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image dimensions differ: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        a_width: u32,
        a_height: u32,
        b_width: u32,
        b_height: u32,
    },

    #[error("Threshold {0} outside 0..=255")]
    InvalidThreshold(i64),

    #[error("Not a number: {0:?}")]
    InvalidInput(String),

    #[error("Pair index {index} out of range (total: {total})")]
    PairIndexOutOfRange { index: usize, total: usize },

    #[error("Unknown score axis: {0}")]
    UnknownAxis(String),

    #[error("No template is open")]
    NoTemplate,

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
