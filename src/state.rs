//! Lifecycle of the dashboard dataset as the UI sees it

#[derive(Clone, PartialEq, Debug)]
pub enum LoadState<T, E> {
    /// Nothing has been requested yet
    Idle,
    /// A load is in flight; `generation` identifies it
    Loading { generation: u64 },
    /// The latest load finished
    Success(T),
    /// The latest load failed; nothing is displayed
    Error(E),
}

impl<T, E> Default for LoadState<T, E> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T, E> LoadState<T, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoadState::Success(_))
    }

    /// Loaded data, if the last load succeeded
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            LoadState::Error(error) => Some(error),
            _ => None,
        }
    }
}
