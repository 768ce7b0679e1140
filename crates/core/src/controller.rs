use crate::{
    compute_permissions, project, Accepted, CardClass, Catalog, Chrome, Command, MessageLog,
    PayloadError, RecoveryCache, RoundPayload, RoundSnapshot, Screen, TableView, TransportError,
    TurnContext, UiPermissionSet,
};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const ROUND_SEPARATOR: &str = "--------------------";

/// The remote game engine. One call per command, answered before the next.
pub trait Engine {
    fn call(&mut self, command: &Command) -> Result<RoundPayload, TransportError>;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn call(&mut self, command: &Command) -> Result<RoundPayload, TransportError> {
        (**self).call(command)
    }
}

/// Display surface handed to the controller at construction.
pub trait Shell {
    /// Replace whatever is on screen with `view`.
    fn present(&mut self, view: &TableView);

    /// A full reset succeeded; go back to the pre-round screen.
    fn leave_table(&mut self) {}

    /// Failures the user must not miss.
    fn alert(&mut self, _message: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// No round on the table.
    Idle,
    Local,
    Opponent,
    Finished,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0} is not available right now")]
    NotPermitted(Command),
    #[error("{command} failed: {source}")]
    Transport {
        command: Command,
        #[source]
        source: TransportError,
    },
    #[error("{command} returned an unusable response: {source}")]
    Malformed {
        command: Command,
        #[source]
        source: PayloadError,
    },
}

impl CommandError {
    pub fn command(&self) -> &Command {
        match self {
            Self::NotPermitted(command) => command,
            Self::Transport { command, .. } | Self::Malformed { command, .. } => command,
        }
    }

    /// Rejected locally; nothing was sent.
    pub fn is_not_permitted(&self) -> bool {
        matches!(self, Self::NotPermitted(_))
    }
}

pub struct Controller<E, S> {
    engine: E,
    shell: S,
    catalog: Catalog,
    snapshot: RoundSnapshot,
    recovery: RecoveryCache,
    permissions: UiPermissionSet,
    turn: Turn,
    screen: Screen,
    busy: bool,
    reset_enabled: bool,
    session_over: bool,
    log: MessageLog,
    reported_unknown: BTreeSet<String>,
}

impl<E: Engine, S: Shell> Controller<E, S> {
    pub fn new(engine: E, catalog: Catalog, shell: S) -> Self {
        let mut controller = Self {
            engine,
            shell,
            catalog,
            snapshot: RoundSnapshot::default(),
            recovery: RecoveryCache::default(),
            permissions: UiPermissionSet::default(),
            turn: Turn::Idle,
            screen: Screen::Title,
            busy: false,
            reset_enabled: true,
            session_over: false,
            log: MessageLog::default(),
            reported_unknown: BTreeSet::new(),
        };
        controller.settle(controller.snapshot.clone());
        controller
    }

    pub fn snapshot(&self) -> &RoundSnapshot {
        &self.snapshot
    }

    pub fn recovery(&self) -> &RecoveryCache {
        &self.recovery
    }

    pub fn permissions(&self) -> &UiPermissionSet {
        &self.permissions
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session_over(&self) -> bool {
        self.session_over
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Special card ids seen on the table but missing from the catalog.
    pub fn unrecognized_cards(&self) -> &BTreeSet<String> {
        &self.reported_unknown
    }

    pub fn turn_context(&self) -> TurnContext {
        TurnContext {
            local_turn: self.turn == Turn::Local,
            session_over: self.session_over,
        }
    }

    pub fn view(&self) -> TableView {
        let chrome = Chrome {
            screen: self.screen,
            busy: self.busy,
            reset_enabled: self.reset_enabled,
            session_over: self.session_over,
        };
        project(
            &self.snapshot,
            &self.permissions,
            &self.catalog,
            chrome,
            &self.log,
        )
    }

    /// Redraw the current state without talking to the engine.
    pub fn present(&mut self) {
        let view = self.view();
        self.shell.present(&view);
    }

    pub fn can_reset(&self) -> bool {
        !self.busy && self.reset_enabled
    }

    pub fn can_start_round(&self) -> bool {
        !self.busy && (self.screen == Screen::Title || self.permissions.next_round)
    }

    pub fn start_round(&mut self) -> Result<(), CommandError> {
        if !self.can_start_round() {
            return Err(self.reject(Command::StartRound));
        }
        if self.screen == Screen::Table {
            self.log.notice(ROUND_SEPARATOR);
            self.log.notice("starting the next round...");
        }
        self.dispatch(Command::StartRound)
    }

    pub fn draw(&mut self) -> Result<(), CommandError> {
        if self.busy || !self.permissions.draw {
            return Err(self.reject(Command::Draw));
        }
        self.dispatch(Command::Draw)?;
        self.follow_with_opponent(&Command::Draw)
    }

    pub fn stand(&mut self) -> Result<(), CommandError> {
        if self.busy || !self.permissions.stand {
            return Err(self.reject(Command::Stand));
        }
        self.dispatch(Command::Stand)?;
        self.follow_with_opponent(&Command::Stand)
    }

    pub fn use_special(&mut self, id: &str) -> Result<(), CommandError> {
        let command = Command::UseSpecial(id.to_string());
        if self.busy || !self.permissions.can_use(id) {
            return Err(self.reject(command));
        }
        let name = self.catalog.display_name(id).to_string();
        match self.catalog.class_of(id) {
            Some(CardClass::Declare) => self.log.notice(format!("declaring '{name}'...")),
            _ => self.log.notice(format!("using '{name}'...")),
        }
        self.dispatch(command)
    }

    pub fn reset_session(&mut self) -> Result<(), CommandError> {
        if !self.can_reset() {
            return Err(self.reject(Command::ResetSession));
        }
        let command = Command::ResetSession;
        self.reset_enabled = false;
        self.lock();
        let result = self
            .engine
            .call(&command)
            .map_err(|source| CommandError::Transport {
                command: command.clone(),
                source,
            })
            .and_then(|payload| {
                payload
                    .into_reset_message()
                    .map_err(|source| CommandError::Malformed {
                        command: command.clone(),
                        source,
                    })
            });
        match result {
            Ok(message) => {
                info!("session reset");
                self.snapshot = RoundSnapshot::default();
                self.recovery.clear();
                self.session_over = false;
                self.turn = Turn::Idle;
                self.screen = Screen::Title;
                self.busy = false;
                self.reset_enabled = true;
                self.reported_unknown.clear();
                self.log.clear();
                self.log.narration(message);
                self.shell.leave_table();
                self.settle(self.snapshot.clone());
                Ok(())
            }
            Err(err) => {
                self.reset_enabled = true;
                self.shell.alert(&err.to_string());
                self.recover(&err);
                Err(err)
            }
        }
    }

    fn follow_with_opponent(&mut self, trigger: &Command) -> Result<(), CommandError> {
        if self.turn != Turn::Opponent {
            return Ok(());
        }
        debug!(trigger = %trigger, "handing the turn to the opponent");
        self.dispatch(Command::AdvanceOpponent)
    }

    fn reject(&self, command: Command) -> CommandError {
        debug!(command = %command, "rejected locally");
        CommandError::NotPermitted(command)
    }

    fn lock(&mut self) {
        self.busy = true;
        self.permissions = UiPermissionSet::locked();
        self.present();
    }

    fn dispatch(&mut self, command: Command) -> Result<(), CommandError> {
        self.lock();
        debug!(command = %command, "dispatching engine command");
        let result = self
            .engine
            .call(&command)
            .map_err(|source| CommandError::Transport {
                command: command.clone(),
                source,
            })
            .and_then(|payload| {
                payload
                    .into_snapshot(&command, &self.snapshot)
                    .map_err(|source| CommandError::Malformed {
                        command: command.clone(),
                        source,
                    })
            });
        match result {
            Ok(accepted) => {
                self.apply(&command, accepted);
                Ok(())
            }
            Err(err) => {
                self.recover(&err);
                Err(err)
            }
        }
    }

    fn apply(&mut self, command: &Command, accepted: Accepted) {
        let Accepted {
            snapshot,
            load_status,
        } = accepted;
        if let Some(note) = load_status {
            self.log.notice(note);
        }
        if !snapshot.message.is_empty() {
            self.log.narration(snapshot.message.clone());
        }
        if snapshot.any_side_exhausted() && !self.session_over {
            info!(
                player = ?snapshot.player_points,
                opponent = ?snapshot.opponent_points,
                "points exhausted, session over"
            );
            self.session_over = true;
        }
        self.turn = if snapshot.round_over {
            Turn::Finished
        } else if command.passes_turn() {
            Turn::Opponent
        } else {
            Turn::Local
        };
        self.recovery.refresh(&snapshot);
        self.snapshot = snapshot;
        self.screen = Screen::Table;
        self.busy = false;
        self.settle(self.snapshot.clone());
    }

    fn recover(&mut self, err: &CommandError) {
        warn!(error = %err, "command failed, restoring last confirmed special cards");
        self.log.error(format!("error: {err}"));
        let restored = self.recovery.restore_onto(&self.snapshot);
        self.turn = if self.screen == Screen::Title {
            Turn::Idle
        } else if restored.round_over {
            Turn::Finished
        } else {
            Turn::Local
        };
        self.busy = false;
        self.settle(restored);
    }

    fn settle(&mut self, basis: RoundSnapshot) {
        self.permissions = compute_permissions(&basis, self.turn_context(), &self.catalog);
        let on_table = basis
            .player_specials
            .held()
            .chain(basis.opponent_specials.held())
            .map(|(id, _)| id)
            .chain(basis.player_declared.as_deref())
            .chain(basis.opponent_declared.as_deref());
        for id in on_table {
            if self.catalog.get(id).is_none() && self.reported_unknown.insert(id.to_string()) {
                warn!(card = %id, "special card missing from local catalog; shown by id");
            }
        }
        self.present();
    }
}
