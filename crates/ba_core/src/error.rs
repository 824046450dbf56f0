use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unsupported buffer shape: expected {expected} pixels, found {found}")]
    UnsupportedBufferShape { expected: usize, found: usize },

    #[error("feature decoding requires a single-channel frame")]
    DecoderPrecondition,

    #[error("degenerate view window: ({left},{top})-({right},{bottom})")]
    DegenerateWindow { left: usize, top: usize, right: usize, bottom: usize },

    #[error("view window ({left},{top})-({right},{bottom}) exceeds a {width}x{height} buffer")]
    WindowOutOfBounds {
        left: usize,
        top: usize,
        right: usize,
        bottom: usize,
        width: usize,
        height: usize,
    },

    #[error("player {player} has no masses")]
    EmptyPlayer { player: String },

    #[error("no color assigned to player identity {id}")]
    UnknownIdentity { id: u32 },

    #[error("no color assigned to team {id}")]
    UnknownTeam { id: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RenderError {
    /// True for errors that indicate a caller or palette bug rather than
    /// bad runtime data. These corrupt every subsequent feature mask if
    /// ignored, so callers should not attempt to continue the tick.
    pub fn is_contract_violation(&self) -> bool {
        match self {
            RenderError::UnsupportedBufferShape { .. } => true,
            RenderError::DecoderPrecondition => true,
            RenderError::DegenerateWindow { .. } => true,
            RenderError::WindowOutOfBounds { .. } => true,
            RenderError::UnknownIdentity { .. } => true,
            RenderError::UnknownTeam { .. } => true,
            RenderError::EmptyPlayer { .. } => false,
            RenderError::InvalidConfig(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
