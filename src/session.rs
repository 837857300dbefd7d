//! Session state management.
//!
//! Holds the registry, the random source, the selected mission, and the
//! configuration for one game. A session moves from `Setup` to `Active`
//! once every territory is registered, and ends in `Concluded` when the
//! mission is met or the player leaves. It never returns to `Setup`.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Registry, RegistryError, Territory};
use crate::config::GameConfig;
use crate::resolve::{
    check_victory, resolve_attack, sample_mission, AttackError, AttackOutcome, Mission,
    MissionError,
};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conclusion {
    MissionComplete,
    Exited,
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Setup,
    Active,
    Concluded(Conclusion),
}

/// Errors raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Attack(#[from] AttackError),

    #[error(transparent)]
    Mission(#[from] MissionError),

    #[error("'{action}' is not allowed while the session is {state:?}")]
    WrongState {
        action: &'static str,
        state: SessionState,
    },

    #[error("territories not registered yet: {missing:?}")]
    Incomplete { missing: Vec<usize> },
}

/// One single-player game.
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    state: SessionState,
    mission: Option<Mission>,
    config: GameConfig,
    rng: SmallRng,
}

impl Session {
    /// Creates a session with `n` empty territory slots.
    pub fn new(n: i64, config: GameConfig) -> Result<Self, SessionError> {
        let registry = Registry::with_policy(n, config.labels)?;
        let rng = if config.seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(config.seed)
        };
        tracing::info!(territories = n, rule = ?config.rule, "session created");
        Ok(Session {
            registry,
            state: SessionState::Setup,
            mission: None,
            config,
            rng,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The mission, once the session is active.
    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    fn require(&self, expected: SessionState, action: &'static str) -> Result<(), SessionError> {
        if self.state != expected {
            return Err(SessionError::WrongState {
                action,
                state: self.state,
            });
        }
        Ok(())
    }

    /// Registers the territory at `index`. Only allowed during setup.
    pub fn register(
        &mut self,
        index: usize,
        name: &str,
        faction: &str,
        troops: i64,
    ) -> Result<&Territory, SessionError> {
        self.require(SessionState::Setup, "register")?;
        Ok(self.registry.set(index, name, faction, troops)?)
    }

    /// Starts play: requires every slot registered, then samples the mission.
    ///
    /// A mission that already holds concludes the session immediately.
    pub fn begin(&mut self) -> Result<&Mission, SessionError> {
        self.require(SessionState::Setup, "begin")?;
        let missing = self.registry.missing();
        if !missing.is_empty() {
            return Err(SessionError::Incomplete { missing });
        }

        let mission = sample_mission(&self.registry, &mut self.rng)?;
        tracing::info!(%mission, "session active");
        self.state = if check_victory(&self.registry, &mission) {
            tracing::info!("mission complete");
            SessionState::Concluded(Conclusion::MissionComplete)
        } else {
            SessionState::Active
        };
        Ok(&*self.mission.insert(mission))
    }

    /// Resolves an attack and re-checks the mission.
    ///
    /// A rejected attack leaves the session untouched.
    pub fn attack(
        &mut self,
        attacker: usize,
        defender: usize,
    ) -> Result<AttackOutcome, SessionError> {
        self.require(SessionState::Active, "attack")?;
        let outcome = resolve_attack(
            &mut self.registry,
            attacker,
            defender,
            &mut self.rng,
            self.config.rule,
        )
        .inspect_err(|e| tracing::debug!(attacker, defender, error = %e, "attack rejected"))?;

        if self.mission_complete() {
            tracing::info!("mission complete");
            self.state = SessionState::Concluded(Conclusion::MissionComplete);
        }
        Ok(outcome)
    }

    /// Returns true if the mission is currently satisfied.
    pub fn mission_complete(&self) -> bool {
        self.mission
            .as_ref()
            .is_some_and(|m| check_victory(&self.registry, m))
    }

    /// Ends the session at the player's request.
    pub fn exit(&mut self) -> Result<(), SessionError> {
        if let SessionState::Concluded(_) = self.state {
            return Err(SessionError::WrongState {
                action: "exit",
                state: self.state,
            });
        }
        tracing::info!("session exited");
        self.state = SessionState::Concluded(Conclusion::Exited);
        Ok(())
    }
}
