//! Response intents and the builder handlers create them with.
//!
//! Handlers never produce platform markup themselves: they hand plain text to a
//! [`ResponseBuilder`] and return the resulting [`ResponseIntent`].

/// How a handler ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// The command was carried out
    #[default]
    Success,
    /// The argument was rejected, the text explains why
    InvalidArgument,
}

/// What a handler wants to reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseIntent {
    /// Text to send back to the user
    pub text: String,
    /// Whether the reply reports a success or a rejected argument
    pub outcome: Outcome,
}

impl ResponseIntent {
    /// Marks this reply as the rejection of an invalid argument.
    pub fn into_invalid_argument(self) -> Self {
        ResponseIntent {
            outcome: Outcome::InvalidArgument,
            ..self
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.outcome == Outcome::InvalidArgument
    }
}

/// Turns handler text into outbound replies.
pub trait ResponseBuilder: Send + Sync {
    fn build_text_response(&self, text: String) -> ResponseIntent;
}

/// Builder keeping the text as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextResponseBuilder;

impl ResponseBuilder for PlainTextResponseBuilder {
    fn build_text_response(&self, text: String) -> ResponseIntent {
        ResponseIntent {
            text,
            outcome: Outcome::Success,
        }
    }
}
