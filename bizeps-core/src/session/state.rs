/// Where the tracker stands with respect to an open workout session.
///
/// `NoSession` becomes `Open(id)` when a workout starts; closing drops
/// back to `NoSession`. A closed session is terminal: it is never
/// reopened, only ever replaced by a fresh row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    NoSession,
    Open(i64),
}

impl SessionState {
    pub fn session_id(&self) -> Option<i64> {
        match self {
            SessionState::NoSession => None,
            SessionState::Open(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_only_when_open() {
        assert_eq!(SessionState::NoSession.session_id(), None);
        assert_eq!(SessionState::Open(7).session_id(), Some(7));
    }
}
