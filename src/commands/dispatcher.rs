//! Command dispatching.
//!
//! The [`Dispatcher`] turns one [`CommandRecord`] into at most one
//! [`ResponseIntent`]: it resolves the handler bound to the record's name and
//! scope, builds a fresh [`Context`] for it and awaits it.
//!
//! # Flow
//!
//! ```text
//! CommandRecord → registry.resolve(name, scope) ─┬─ found     → handler(Context) → Option<ResponseIntent>
//!                                                └─ not found → unknown command intent
//! ```

use log::{debug, info};
use thiserror::Error;

use crate::commands::{
    CommandRecord, Context, ResponseIntent, Services, registry::HandlerRegistry,
};

/// Builds the reply sent for commands no handler is registered for.
pub type UnknownCommandFn = Box<dyn Fn(&CommandRecord) -> ResponseIntent + Send + Sync>;

/// A handler failed.
///
/// Carries the name of the command that failed so the failure can be
/// attributed, and the handler's own error as source.
#[derive(Debug, Error)]
#[error("command '{command}' failed")]
pub struct DispatchError {
    /// Name of the command whose handler failed
    pub command: String,
    /// Error returned by the handler
    #[source]
    pub source: anyhow::Error,
}

/// Routes command records to their handlers.
///
/// The dispatcher owns the registry and the collaborators handed to every
/// handler. It holds no mutable state, so an `Arc<Dispatcher>` can serve any
/// number of concurrent dispatches.
pub struct Dispatcher {
    registry: HandlerRegistry,
    services: Services,
    unknown_command: UnknownCommandFn,
}

impl Dispatcher {
    /// Creates a dispatcher.
    ///
    /// # Arguments
    ///
    /// * `registry` - The fully built handler registry
    /// * `services` - Collaborators injected into every [`Context`]
    /// * `unknown_command` - Reply for records without a registered handler
    pub fn new<F>(registry: HandlerRegistry, services: Services, unknown_command: F) -> Self
    where
        F: Fn(&CommandRecord) -> ResponseIntent + Send + Sync + 'static,
    {
        Dispatcher {
            registry,
            services,
            unknown_command: Box::new(unknown_command),
        }
    }

    /// Dispatches a command record to its handler.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(intent))` - The handler reply, or the unknown command reply
    /// * `Ok(None)` - The handler chose not to reply
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] naming the command when the handler fails.
    /// Rejected arguments are not errors: handlers report them as intents
    /// with [`Outcome::InvalidArgument`](crate::commands::Outcome::InvalidArgument).
    pub async fn dispatch(
        &self,
        record: CommandRecord,
    ) -> Result<Option<ResponseIntent>, DispatchError> {
        let Some(descriptor) = self.registry.resolve(&record.name, record.scope) else {
            debug!(
                "no handler for '{}' with {} scope",
                record.name, record.scope
            );
            return Ok(Some((self.unknown_command)(&record)));
        };

        info!(
            "dispatching '{}' ({}) for {}",
            descriptor.name(),
            descriptor.scope(),
            record.user.id
        );

        let context = Context::new(record, &self.services);

        descriptor
            .invoke(&context)
            .await
            .map_err(|source| DispatchError {
                command: descriptor.name().to_owned(),
                source,
            })
    }
}
