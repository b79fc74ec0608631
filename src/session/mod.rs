//! Client interaction state, modeled as an explicit state struct driven
//! through an event/update cycle rather than ambient mutable globals.
//!
//! `update` consumes one event, mutates the state, and returns the outbound
//! call (if any) the client should make next. Rendering is out of scope; this
//! module only pins down the state contract: the busy flag around each
//! in-flight action, creativity retained across refinements but reset on
//! fresh generation, and prior output left untouched on failure.

mod creativity;
mod picker;

pub use creativity::{CREATIVITY_DEFAULT, CreativityDial};
pub use picker::OptionPicker;

use crate::prompt::{RegenerateOption, ReplyConstraints};

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub email: String,
    pub reply: Option<String>,
    pub busy: bool,
    pub constraints: ReplyConstraints,
    pub creativity: CreativityDial,
}

/// One user interaction or one completion of an outbound call.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    EmailEdited(String),
    GenerateRequested,
    RefineRequested(RegenerateOption),
    ReplyReceived(String),
    GenerationFailed,
    CreativitySteppedUp,
    CreativitySteppedDown,
    SentenceSpliced { target: String, replacement: String },
}

/// The outbound call the client should issue after an update, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEffect {
    None,
    CallGenerate,
    CallRegenerate {
        option: RegenerateOption,
        temperature: f64,
    },
}

impl SessionState {
    /// The submit affordance is disabled while busy or while the email box is
    /// blank.
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.email.trim().is_empty()
    }

    fn regenerate(&mut self, option: RegenerateOption) -> SessionEffect {
        self.busy = true;
        SessionEffect::CallRegenerate {
            option,
            temperature: self.creativity.value(),
        }
    }

    pub fn update(&mut self, event: SessionEvent) -> SessionEffect {
        match event {
            SessionEvent::EmailEdited(text) => {
                self.email = text;
                SessionEffect::None
            }
            SessionEvent::GenerateRequested => {
                if !self.can_submit() {
                    return SessionEffect::None;
                }
                self.busy = true;
                // Fresh generation resets the dial.
                self.creativity.reset();
                SessionEffect::CallGenerate
            }
            SessionEvent::RefineRequested(option) => {
                if self.busy || self.reply.is_none() {
                    return SessionEffect::None;
                }
                self.regenerate(option)
            }
            SessionEvent::ReplyReceived(text) => {
                self.busy = false;
                // Full replacement, never a merge.
                self.reply = Some(text);
                SessionEffect::None
            }
            SessionEvent::GenerationFailed => {
                // Prior displayed response stays as it was.
                self.busy = false;
                SessionEffect::None
            }
            SessionEvent::CreativitySteppedUp => {
                if self.busy || self.reply.is_none() || !self.creativity.step_up() {
                    return SessionEffect::None;
                }
                self.regenerate(RegenerateOption::Temperature)
            }
            SessionEvent::CreativitySteppedDown => {
                if self.busy || self.reply.is_none() || !self.creativity.step_down() {
                    return SessionEffect::None;
                }
                self.regenerate(RegenerateOption::Temperature)
            }
            SessionEvent::SentenceSpliced {
                target,
                replacement,
            } => {
                if let Some(reply) = self.reply.as_mut() {
                    *reply = reply.replacen(&target, &replacement, 1);
                }
                SessionEffect::None
            }
        }
    }
}
