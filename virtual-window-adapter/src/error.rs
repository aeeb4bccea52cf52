use thiserror::Error;

use crate::Listener;

#[derive(Debug, Error)]
pub enum MountError<E> {
    /// The host refused a listener. Anything attached before it has already been released.
    #[error("virtual_window_adapter: failed to attach the {listener:?} listener")]
    Attach {
        listener: Listener,
        #[source]
        source: E,
    },
}

impl<E> MountError<E> {
    pub fn listener(&self) -> Listener {
        match self {
            Self::Attach { listener, .. } => *listener,
        }
    }
}
