/// Lifecycle of a game session.
///
/// `Empty` until the first game resolves, `Loading` while a fetch is in
/// flight, `Ready` once a matrix and its analysis are installed. A failed
/// fetch falls back to the last good state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Empty,
    Loading,
    Ready,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
        }
    }
}
