/// Error parsing a name or index supplied from outside the puzzle.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Face name that is not one of the six walls.
    #[error("unknown face {0:?}")]
    UnknownFace(String),
    /// Cubie index outside `0..27`.
    #[error("cubie index {0} out of range")]
    CubieOutOfRange(usize),
    /// Malformed `#rrggbb` color.
    #[error("bad color: {0}")]
    BadColor(#[from] hex::FromHexError),
}
