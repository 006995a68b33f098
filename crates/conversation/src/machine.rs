//! The questionnaire state machine.
//!
//! ```text
//! AskingSkinType(1) -> AskingSkinTone(2) -> AskingHairColor(3) -> AskingEyeColor(4) -> Completed(5)
//!        ^                                                                                 |
//!        +--------------------------- "restart" from any state ---------------------------+
//! ```
//!
//! Every call to [`ConversationMachine::advance`] appends the user message and
//! the bot reply to the session transcript before returning.

use crate::attributes::{Attribute, InvalidChoice};
use crate::session::{Profile, Role, Session, Step};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Keyword that resets a conversation, matched case-insensitively
pub const RESTART_KEYWORD: &str = "restart";

/// Computes the final reply once all four answers are in.
///
/// Called synchronously, exactly once per completed questionnaire.
pub trait Recommender {
    fn recommend(&self, profile: &Profile) -> String;
}

impl<T: Recommender + ?Sized> Recommender for Arc<T> {
    fn recommend(&self, profile: &Profile) -> String {
        (**self).recommend(profile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// The next question
    Question,
    /// Input rejected, state unchanged
    InvalidChoice,
    /// Fourth answer accepted, recommendation computed
    Recommendation,
    /// Conversation reset to the first question
    Restarted,
    /// Input after completion that wasn't a restart
    AlreadyCompleted,
}

/// The bot's answer to one user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
}

impl Reply {
    fn new(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Drives sessions through the questionnaire.
///
/// Holds no per-user state, so one machine serves every session.
#[derive(Debug, Clone)]
pub struct ConversationMachine<R> {
    recommender: R,
}

impl<R: Recommender> ConversationMachine<R> {
    pub fn new(recommender: R) -> Self {
        Self { recommender }
    }

    pub fn recommender(&self) -> &R {
        &self.recommender
    }

    /// Seed an empty transcript with the first question.
    ///
    /// Returns true when a greeting was added.
    pub fn greet(&self, session: &mut Session) -> bool {
        if !session.history.is_empty() {
            return false;
        }
        let question = session
            .step
            .attribute()
            .unwrap_or(Attribute::SkinType)
            .question();
        session.record(Role::Bot, question);
        true
    }

    /// Apply one user message to the session and produce the bot reply
    pub fn advance(&self, session: &mut Session, raw_input: &str) -> Reply {
        if is_restart(raw_input) {
            session.reset();
            let question = Attribute::SkinType.question();
            session.record(Role::Bot, question.clone());
            info!("Conversation restarted");
            return Reply::new(ReplyKind::Restarted, question);
        }

        session.record(Role::User, raw_input);
        let reply = self.step(session, raw_input);
        session.record(Role::Bot, reply.text.clone());
        reply
    }

    fn step(&self, session: &mut Session, raw_input: &str) -> Reply {
        let Some(attribute) = session.step.attribute() else {
            debug!("Input after completion ignored");
            return Reply::new(
                ReplyKind::AlreadyCompleted,
                "✨ We're all done here! Type 'restart' to start a new consultation.",
            );
        };

        let value = match attribute.spec().validate(raw_input) {
            Ok(value) => value,
            Err(invalid) => {
                debug!("Rejected {:?} for {}", invalid.value, attribute);
                return Reply::new(ReplyKind::InvalidChoice, invalid_choice_message(&invalid));
            }
        };

        debug!("Recorded {} = {}", attribute.key(), value);
        session.answers.insert(attribute, value);
        session.step = session.step.next();

        if let Some(next) = session.step.attribute() {
            return Reply::new(ReplyKind::Question, next.question());
        }

        match session.answers.profile() {
            Some(profile) => {
                info!(?profile, "Questionnaire completed");
                Reply::new(ReplyKind::Recommendation, self.recommender.recommend(&profile))
            }
            None => {
                // Only reachable if answers and step drifted apart; ask again.
                let missing = session.answers.first_missing().unwrap_or(Attribute::SkinType);
                warn!("Completed without a {} answer, asking again", missing);
                session.step = Step::asking(missing);
                Reply::new(ReplyKind::Question, missing.question())
            }
        }
    }
}

/// Guidance shown when input is outside the current attribute's values
pub fn invalid_choice_message(invalid: &InvalidChoice) -> String {
    format!("⚠️ Oops! Please choose from: {}", invalid.valid_values.join(", "))
}

fn is_restart(raw_input: &str) -> bool {
    raw_input.trim().eq_ignore_ascii_case(RESTART_KEYWORD)
}
