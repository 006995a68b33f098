//! # Conversation Crate
//!
//! The four-question consultation that collects a user's profile.
//!
//! ## Components
//!
//! ### Attributes
//! The closed value sets for skin type, skin tone, hair color and eye color,
//! plus the normalization applied to user input before validation.
//!
//! ### Session
//! Per-user state: the pending step, validated answers and the transcript.
//!
//! ### ConversationMachine
//! Advances a session by one message, rejecting invalid input, handling
//! restarts and handing the completed profile to a [`Recommender`].
//!
//! ## Example Usage
//!
//! ```ignore
//! use conversation::{ConversationMachine, Session};
//!
//! let machine = ConversationMachine::new(recommender);
//! let mut session = Session::new();
//! machine.greet(&mut session);
//!
//! for answer in ["Oily", "Fair", "Black", "Brown"] {
//!     let reply = machine.advance(&mut session, answer);
//!     println!("{}", reply.text);
//! }
//! assert!(session.is_completed());
//! ```

pub mod attributes;
pub mod machine;
pub mod session;

pub use attributes::{Attribute, AttributeSpec, InvalidChoice, normalize};
pub use machine::{ConversationMachine, RESTART_KEYWORD, Recommender, Reply, ReplyKind, invalid_choice_message};
pub use session::{Answers, Message, Profile, Role, Session, Step};
