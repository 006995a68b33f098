//! Per-user conversation state.
//!
//! A `Session` is created on first contact, mutated by every message and
//! reset in place on restart. Only the state machine mutates it; callers get
//! read access to the step, answers and transcript.

use crate::attributes::{Attribute, InvalidChoice};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One transcript entry. User content is kept exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Which question is pending, numbered 1 through 5
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    #[default]
    AskingSkinType,
    AskingSkinTone,
    AskingHairColor,
    AskingEyeColor,
    Completed,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::AskingSkinType => 1,
            Step::AskingSkinTone => 2,
            Step::AskingHairColor => 3,
            Step::AskingEyeColor => 4,
            Step::Completed => 5,
        }
    }

    /// Step that asks for `attribute`
    pub fn asking(attribute: Attribute) -> Self {
        match attribute {
            Attribute::SkinType => Step::AskingSkinType,
            Attribute::SkinTone => Step::AskingSkinTone,
            Attribute::HairColor => Step::AskingHairColor,
            Attribute::EyeColor => Step::AskingEyeColor,
        }
    }

    /// The attribute this step asks for; `None` once completed
    pub fn attribute(self) -> Option<Attribute> {
        match self {
            Step::AskingSkinType => Some(Attribute::SkinType),
            Step::AskingSkinTone => Some(Attribute::SkinTone),
            Step::AskingHairColor => Some(Attribute::HairColor),
            Step::AskingEyeColor => Some(Attribute::EyeColor),
            Step::Completed => None,
        }
    }

    /// Following step; `Completed` is terminal
    pub fn next(self) -> Self {
        match self {
            Step::AskingSkinType => Step::AskingSkinTone,
            Step::AskingSkinTone => Step::AskingHairColor,
            Step::AskingHairColor => Step::AskingEyeColor,
            Step::AskingEyeColor | Step::Completed => Step::Completed,
        }
    }
}

/// Validated answers collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Answers {
    values: BTreeMap<Attribute, String>,
}

impl Answers {
    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.values.get(&attribute).map(|v| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First attribute in question order without an answer
    pub fn first_missing(&self) -> Option<Attribute> {
        Attribute::ALL
            .into_iter()
            .find(|a| !self.values.contains_key(a))
    }

    /// The full profile once all four attributes are answered
    pub fn profile(&self) -> Option<Profile> {
        Some(Profile {
            skin_type: self.get(Attribute::SkinType)?.to_string(),
            skin_tone: self.get(Attribute::SkinTone)?.to_string(),
            hair_color: self.get(Attribute::HairColor)?.to_string(),
            eye_color: self.get(Attribute::EyeColor)?.to_string(),
        })
    }

    /// Only the state machine stores values, and only validated ones
    pub(crate) fn insert(&mut self, attribute: Attribute, value: String) {
        self.values.insert(attribute, value);
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }
}

/// The four validated answers a recommendation is computed from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Profile {
    pub skin_type: String,
    pub skin_tone: String,
    pub hair_color: String,
    pub eye_color: String,
}

impl Profile {
    /// Validate four raw values the same way the questionnaire does
    pub fn parse(
        skin_type: &str,
        skin_tone: &str,
        hair_color: &str,
        eye_color: &str,
    ) -> Result<Self, InvalidChoice> {
        Ok(Self {
            skin_type: Attribute::SkinType.spec().validate(skin_type)?,
            skin_tone: Attribute::SkinTone.spec().validate(skin_tone)?,
            hair_color: Attribute::HairColor.spec().validate(hair_color)?,
            eye_color: Attribute::EyeColor.spec().validate(eye_color)?,
        })
    }

    /// `(key, value)` pairs in question order
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            (Attribute::SkinType.key(), self.skin_type.as_str()),
            (Attribute::SkinTone.key(), self.skin_tone.as_str()),
            (Attribute::HairColor.key(), self.hair_color.as_str()),
            (Attribute::EyeColor.key(), self.eye_color.as_str()),
        ]
    }
}

/// Conversation state for one browser session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub(crate) step: Step,
    pub(crate) answers: Answers,
    pub(crate) history: Vec<Message>,
}

impl Session {
    /// Fresh session waiting for the first answer, with an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn is_completed(&self) -> bool {
        self.step == Step::Completed
    }

    pub(crate) fn record(&mut self, role: Role, content: impl Into<String>) {
        self.history.push(Message {
            role,
            content: content.into(),
        });
    }

    /// Back to step 1 with no answers and no transcript
    pub(crate) fn reset(&mut self) {
        self.step = Step::AskingSkinType;
        self.answers.clear();
        self.history.clear();
    }
}
