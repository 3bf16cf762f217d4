//! Chat simulation: a finite-state walker over a step sequence that drives the
//! live preview.
//!
//! The engine owns no timers. Entering an informational step returns a
//! [`ScheduledAdvance`]; the host waits `delay` and calls
//! [`ChatSimulator::on_timer`] with the ticket. Restarting issues new tickets,
//! so a timer that fires after a restart finds its ticket stale and does nothing.

pub mod timing;
pub mod transcript;

pub use timing::*;
pub use transcript::*;

use crate::error::SimulationError;
use crate::step::{Interaction, Step};
use std::time::Duration;

/// Identifies one pending auto-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// A request to call [`ChatSimulator::on_timer`] after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub ticket: Ticket,
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    /// The flow has no steps; nothing is shown and no input is accepted.
    Idle,
    /// Waiting for the user to answer the step at `index`.
    AwaitingInput { index: usize },
    /// Showing the informational step at `index` until `ticket` fires.
    AutoAdvancing { index: usize, ticket: Ticket },
    Ended,
}

pub struct ChatSimulator {
    steps: Vec<Step>,
    state: SimState,
    transcript: Vec<Turn>,
    config: SimulationConfig,
    next_ticket: u64,
}

impl ChatSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            steps: Vec::new(),
            state: SimState::Idle,
            transcript: Vec::new(),
            config,
            next_ticket: 0,
        }
    }

    /// Creates a simulator and starts it on `steps`.
    pub fn start(steps: &[Step], config: SimulationConfig) -> (Self, Option<ScheduledAdvance>) {
        let mut sim = Self::new(config);
        let scheduled = sim.restart(steps);
        (sim, scheduled)
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn is_ended(&self) -> bool {
        self.state == SimState::Ended
    }

    /// The step currently on screen, if any.
    pub fn current_step(&self) -> Option<&Step> {
        match self.state {
            SimState::AwaitingInput { index } | SimState::AutoAdvancing { index, .. } => {
                self.steps.get(index)
            }
            SimState::Idle | SimState::Ended => None,
        }
    }

    /// Clears the transcript and starts over from the first of `steps`.
    ///
    /// Any pending auto-advance is invalidated.
    pub fn restart(&mut self, steps: &[Step]) -> Option<ScheduledAdvance> {
        self.steps = steps.to_vec();
        self.transcript.clear();
        self.state = SimState::Idle;
        if self.steps.is_empty() {
            return None;
        }
        self.enter(0)
    }

    /// Fires a scheduled auto-advance. Stale tickets are ignored.
    pub fn on_timer(&mut self, ticket: Ticket) -> Option<ScheduledAdvance> {
        match self.state {
            SimState::AutoAdvancing {
                index,
                ticket: pending,
            } if pending == ticket => self.enter(index + 1),
            _ => {
                tracing::debug!(?ticket, "ignoring stale auto-advance");
                None
            }
        }
    }

    /// Answers the current interactive step with free text.
    ///
    /// Choice steps accept typed answers only when they match an option.
    pub fn submit_answer(&mut self, value: &str) -> Result<Option<ScheduledAdvance>, SimulationError> {
        let index = self.awaiting_index()?;
        let step = &self.steps[index];
        if step.kind().is_choice() {
            return self.select_option(value);
        }
        let value = value.trim();
        if value.is_empty() && step.required {
            return Err(SimulationError::EmptyAnswer(step.id().clone()));
        }
        self.transcript.push(Turn::user(value.to_string()));
        Ok(self.enter(index + 1))
    }

    /// Picks one of the current choice step's options.
    pub fn select_option(&mut self, value: &str) -> Result<Option<ScheduledAdvance>, SimulationError> {
        let index = self.awaiting_index()?;
        let step = &self.steps[index];
        if !step.kind().is_choice() {
            return Err(SimulationError::NotAChoice(step.id().clone()));
        }
        if !step.options().iter().any(|o| o == value) {
            return Err(SimulationError::UnknownOption {
                step_id: step.id().clone(),
                option: value.to_string(),
            });
        }
        self.transcript.push(Turn::user(value.to_string()));
        Ok(self.enter(index + 1))
    }

    /// Fires pending auto-advances immediately until the chat waits for
    /// input, ends, or is idle.
    pub fn run_until_blocked(&mut self) -> SimState {
        while let SimState::AutoAdvancing { ticket, .. } = self.state {
            self.on_timer(ticket);
        }
        self.state
    }

    fn awaiting_index(&self) -> Result<usize, SimulationError> {
        match self.state {
            SimState::AwaitingInput { index } => Ok(index),
            SimState::Ended => Err(SimulationError::Ended),
            SimState::Idle | SimState::AutoAdvancing { .. } => {
                Err(SimulationError::NotAwaitingInput)
            }
        }
    }

    fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    fn enter(&mut self, index: usize) -> Option<ScheduledAdvance> {
        let Some(step) = self.steps.get(index) else {
            self.transcript.push(Turn::system(CHAT_ENDED));
            self.state = SimState::Ended;
            return None;
        };

        let options = if step.kind().is_choice() {
            step.options().to_vec()
        } else {
            Vec::new()
        };
        let delay = self.config.display_delay(&step.title);
        self.transcript.push(Turn::bot(
            step.id().clone(),
            step.kind(),
            step.title.clone(),
            options,
        ));

        match step.kind().interaction() {
            Interaction::Informational => {
                let ticket = self.issue_ticket();
                self.state = SimState::AutoAdvancing { index, ticket };
                Some(ScheduledAdvance { ticket, delay })
            }
            Interaction::FreeText | Interaction::Choice => {
                self.state = SimState::AwaitingInput { index };
                None
            }
        }
    }
}
