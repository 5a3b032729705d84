//! Readiness gate: decides between the loading placeholder, the login
//! redirect and the dashboard shell.
//!
//! The decision is a pure state machine over three flags so the rules are
//! tested without a browser. The navigation side effect belongs to the
//! transition into [`GateState::Redirecting`], not to a render pass, so
//! re-evaluating unchanged inputs never navigates twice.

/// Куда отправляем неавторизованного пользователя.
pub const LOGIN_PATH: &str = "/user/login";

/// Inputs sampled from the data-source and session providers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateInputs {
    pub is_loaded: bool,
    pub session_loading: bool,
    pub is_authenticated: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    /// Data source not loaded, or session still being restored.
    #[default]
    Loading,
    /// Loaded and known to be signed out.
    Redirecting,
    /// Loaded and signed in: shell and page content are shown.
    Ready,
}

impl GateState {
    /// Authentication is only looked at once the data source is loaded.
    pub fn from_inputs(inputs: GateInputs) -> Self {
        if !inputs.is_loaded || inputs.session_loading {
            GateState::Loading
        } else if inputs.is_authenticated {
            GateState::Ready
        } else {
            GateState::Redirecting
        }
    }

    pub fn renders_shell(self) -> bool {
        self == GateState::Ready
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateEffect {
    Navigate(&'static str),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadinessGate {
    state: GateState,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Move to the state the inputs describe; returns the navigation to perform, if any.
    pub fn transition(&mut self, inputs: GateInputs) -> Option<GateEffect> {
        let next = GateState::from_inputs(inputs);
        let entering_redirect = next == GateState::Redirecting && self.state != GateState::Redirecting;
        self.state = next;
        entering_redirect.then_some(GateEffect::Navigate(LOGIN_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(is_loaded: bool, session_loading: bool, is_authenticated: bool) -> GateInputs {
        GateInputs {
            is_loaded,
            session_loading,
            is_authenticated,
        }
    }

    #[test]
    fn test_not_loaded_is_loading_whatever_the_session() {
        for loading in [false, true] {
            for auth in [false, true] {
                let mut gate = ReadinessGate::new();
                assert_eq!(gate.transition(inputs(false, loading, auth)), None);
                assert_eq!(gate.state(), GateState::Loading);
                assert!(!gate.state().renders_shell());
            }
        }
    }

    #[test]
    fn test_session_loading_never_redirects() {
        let mut gate = ReadinessGate::new();
        assert_eq!(gate.transition(inputs(true, true, false)), None);
        assert_eq!(gate.state(), GateState::Loading);
    }

    #[test]
    fn test_signed_out_redirects_once() {
        let mut gate = ReadinessGate::new();
        assert_eq!(gate.transition(inputs(true, true, false)), None);
        assert_eq!(
            gate.transition(inputs(true, false, false)),
            Some(GateEffect::Navigate("/user/login"))
        );
        // Re-renders with unchanged inputs
        assert_eq!(gate.transition(inputs(true, false, false)), None);
        assert_eq!(gate.transition(inputs(true, false, false)), None);
        assert_eq!(gate.state(), GateState::Redirecting);
    }

    #[test]
    fn test_signed_in_renders_shell() {
        let mut gate = ReadinessGate::new();
        assert_eq!(gate.transition(inputs(true, false, true)), None);
        assert_eq!(gate.state(), GateState::Ready);
        assert!(gate.state().renders_shell());
    }

    #[test]
    fn test_logout_after_ready_redirects_again() {
        let mut gate = ReadinessGate::new();
        gate.transition(inputs(true, false, false));
        gate.transition(inputs(true, false, true));
        assert_eq!(
            gate.transition(inputs(true, false, false)),
            Some(GateEffect::Navigate(LOGIN_PATH))
        );
    }

    #[test]
    fn test_data_source_lost_hides_shell() {
        let mut gate = ReadinessGate::new();
        gate.transition(inputs(true, false, true));
        gate.transition(inputs(false, false, true));
        assert_eq!(gate.state(), GateState::Loading);
        assert!(!gate.state().renders_shell());
    }
}
