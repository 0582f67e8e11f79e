//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives a
//! [`Context`](crate::commands::Context), carries out the command and returns
//! an optional [`ResponseIntent`](crate::commands::ResponseIntent).
//!
//! # Handler Pattern
//!
//! Handlers follow a consistent pattern:
//! 1. Read the command record and the collaborators from the context
//! 2. Validate the argument, replying with an invalid argument intent if needed
//! 3. Read or update brews through the repository, propagating its errors
//! 4. Return a plain text reply
//!
//! # Registration
//!
//! [`declarations`] is the single place binding handlers to command names and
//! scopes. Names default to the handler identifier, scopes to private.

mod brew;
mod debug;
mod gone;
mod help;
mod last;
mod status;
mod today;

use crate::commands::{
    Scope,
    actions::{
        brew::{brew, brew_private},
        debug::debug,
        gone::{gone, gone_private},
        help::help,
        last::last,
        status::status,
        today::today,
    },
    registry::{Declaration, declare},
};

/// Number of brews the listing commands look at.
const RECENT_BREWS_LIMIT: usize = 20;

/// Returns the registration list of every bot command.
pub fn declarations() -> Vec<Declaration> {
    vec![
        declare!(help),
        declare!(today),
        declare!(status).name(""),
        declare!(brew).scope(Scope::Public),
        declare!(brew_private).name("brew"),
        declare!(gone).scope(Scope::Public),
        declare!(gone_private).name("gone"),
        declare!(debug),
        declare!(last).scope(Scope::Ephemeral),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::HandlerRegistry;

    #[test]
    fn test_declarations_build_a_registry() {
        let registry = HandlerRegistry::build(declarations()).unwrap();

        assert_eq!(registry.len(), 9);
        for (name, scope) in [
            ("help", Scope::Private),
            ("today", Scope::Private),
            ("", Scope::Private),
            ("brew", Scope::Public),
            ("brew", Scope::Private),
            ("gone", Scope::Public),
            ("gone", Scope::Private),
            ("debug", Scope::Private),
            ("last", Scope::Ephemeral),
        ] {
            assert!(
                registry.resolve(name, scope).is_some(),
                "missing '{}' with {} scope",
                name,
                scope
            );
        }
    }

    #[test]
    fn test_last_is_only_ephemeral() {
        let registry = HandlerRegistry::build(declarations()).unwrap();

        assert!(registry.resolve("last", Scope::Private).is_none());
        assert!(registry.resolve("last", Scope::Public).is_none());
    }
}
