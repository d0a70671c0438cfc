//! Unlock dialog state machine for the background-colour page.
//!
//! `Idle` -> `AwaitingReference` on selecting a locked colour, back to `Idle`
//! on cancel or on a reference that passes the format check. Every step is a
//! pure function from the current snapshot to a new one.

use std::collections::BTreeSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PayeeConfig;
use crate::unlock::deep_link::PaymentPrompt;
use crate::unlock::validator::{PaymentReference, ReferenceRejection, VerificationLevel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColourOption {
    pub id: &'static str,
    pub name: &'static str,
    pub hex: &'static str,
    pub free: bool,
}

const COLOURS: &[ColourOption] = &[
    ColourOption { id: "paper-white", name: "Paper White", hex: "#FFFFFF", free: true },
    ColourOption { id: "ocean-blue", name: "Ocean Blue", hex: "#1E6FD9", free: false },
    ColourOption { id: "sunset-orange", name: "Sunset Orange", hex: "#F26B38", free: false },
    ColourOption { id: "forest-green", name: "Forest Green", hex: "#2E8B57", free: false },
    ColourOption { id: "royal-purple", name: "Royal Purple", hex: "#6A3FB5", free: false },
    ColourOption { id: "midnight-black", name: "Midnight Black", hex: "#111111", free: false },
];

pub fn catalog() -> &'static [ColourOption] {
    COLOURS
}

pub fn find_colour(id: &str) -> Option<&'static ColourOption> {
    COLOURS.iter().find(|c| c.id == id)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DialogState {
    Idle,
    AwaitingReference {
        pending: ColourOption,
        prompt: PaymentPrompt,
    },
}

/// One page instance's view of the unlock feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnlockSession {
    pub background: &'static str,
    pub unlocked: BTreeSet<&'static str>,
    pub dialog: DialogState,
    pub reference_input: String,
}

impl Default for UnlockSession {
    fn default() -> Self {
        let free: BTreeSet<&'static str> =
            COLOURS.iter().filter(|c| c.free).map(|c| c.id).collect();
        UnlockSession {
            background: COLOURS[0].id,
            unlocked: free,
            dialog: DialogState::Idle,
            reference_input: String::new(),
        }
    }
}

/// User interaction as it arrives from the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnlockEvent {
    Select { colour: String },
    Input { text: String },
    Submit,
    Cancel,
}

/// Input to [`transition`]. A submit carries the verifier's verdict so the
/// state machine itself stays synchronous.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowInput {
    Select(String),
    Input(String),
    Submit(Result<PaymentReference, ReferenceRejection>),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    DialogOpened { colour: &'static str },
    Applied { colour: &'static str },
    Unlocked {
        colour: &'static str,
        reference: PaymentReference,
        verification: VerificationLevel,
    },
    Rejected {
        reason: ReferenceRejection,
        message: String,
    },
    InputUpdated,
    Cancelled,
    UnknownColour { colour: String },
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub session: UnlockSession,
    pub feedback: Feedback,
}

pub fn transition(
    session: &UnlockSession,
    input: FlowInput,
    payee: &PayeeConfig,
    verification: VerificationLevel,
) -> Result<Transition> {
    let mut next = session.clone();

    let feedback = match input {
        FlowInput::Select(id) => {
            let Some(colour) = find_colour(&id) else {
                warn!("Unlock requested for unknown colour '{id}'");
                return Ok(unchanged(session, Feedback::UnknownColour { colour: id }));
            };
            next.reference_input.clear();
            if next.unlocked.contains(colour.id) {
                next.background = colour.id;
                next.dialog = DialogState::Idle;
                Feedback::Applied { colour: colour.id }
            } else {
                let prompt = PaymentPrompt::build(payee, colour.name)?;
                next.dialog = DialogState::AwaitingReference {
                    pending: colour.clone(),
                    prompt,
                };
                Feedback::DialogOpened { colour: colour.id }
            }
        }
        FlowInput::Input(text) => {
            if next.dialog == DialogState::Idle {
                debug!("Reference input ignored: no unlock in progress");
                return Ok(unchanged(session, Feedback::Ignored));
            }
            next.reference_input = text;
            Feedback::InputUpdated
        }
        FlowInput::Submit(verdict) => {
            let DialogState::AwaitingReference { pending, .. } = &session.dialog else {
                debug!("Submit ignored: no unlock in progress");
                return Ok(unchanged(session, Feedback::Ignored));
            };
            match verdict {
                Ok(reference) => {
                    info!(
                        "Unlocked '{}' with reference {reference} ({verification:?})",
                        pending.id
                    );
                    next.unlocked.insert(pending.id);
                    next.background = pending.id;
                    next.dialog = DialogState::Idle;
                    next.reference_input.clear();
                    Feedback::Unlocked {
                        colour: pending.id,
                        reference,
                        verification,
                    }
                }
                Err(reason) => {
                    warn!("Reference rejected for '{}': {:?}", pending.id, reason);
                    Feedback::Rejected {
                        reason,
                        message: reason.to_string(),
                    }
                }
            }
        }
        FlowInput::Cancel => {
            if next.dialog == DialogState::Idle {
                return Ok(unchanged(session, Feedback::Ignored));
            }
            next.dialog = DialogState::Idle;
            next.reference_input.clear();
            Feedback::Cancelled
        }
    };

    Ok(Transition {
        session: next,
        feedback,
    })
}

fn unchanged(session: &UnlockSession, feedback: Feedback) -> Transition {
    Transition {
        session: session.clone(),
        feedback,
    }
}
