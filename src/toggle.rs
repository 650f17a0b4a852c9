//! The assembled/scattered switch.

use std::fmt;

/// Which form the particles are heading toward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MorphState {
    /// Cone-shaped tree.
    #[default]
    Assembled,
    /// Diffuse spherical cloud.
    Scattered,
}

impl MorphState {
    /// The other state.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            MorphState::Assembled => MorphState::Scattered,
            MorphState::Scattered => MorphState::Assembled,
        }
    }

    #[inline]
    pub fn is_assembled(self) -> bool {
        self == MorphState::Assembled
    }

    /// Caption shown for the current mode.
    pub fn label(self) -> &'static str {
        match self {
            MorphState::Assembled => "Imperial Cone",
            MorphState::Scattered => "Stardust Drift",
        }
    }

    /// Caption of the control that leaves this mode.
    pub fn action_label(self) -> &'static str {
        match self {
            MorphState::Assembled => "Release to Chaos",
            MorphState::Scattered => "Assemble Form",
        }
    }
}

impl fmt::Display for MorphState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Two-state toggle driven by an external control.
///
/// There is no transitioning state: continuity comes from the engine
/// damping its own last position toward whichever target is current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Toggle {
    state: MorphState,
}

impl Toggle {
    /// A toggle starting in the given state.
    pub fn new(state: MorphState) -> Self {
        Self { state }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> MorphState {
        self.state
    }

    /// Switch to the other state and return it.
    pub fn flip(&mut self) -> MorphState {
        self.state = self.state.flipped();
        log::debug!("morph toggle flipped to {:?}", self.state);
        self.state
    }
}
