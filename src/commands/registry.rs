//! Handler registry.
//!
//! The registry maps a `(name, scope)` pair to exactly one handler. It is built
//! once at startup from an explicit list of [`Declaration`]s and is read-only
//! afterwards, so it can be shared between concurrent dispatches without any
//! locking.
//!
//! # Examples
//!
//! ```ignore
//! let registry = HandlerRegistry::build([
//!     declare!(help),
//!     declare!(status).name(""),
//!     declare!(brew).scope(Scope::Public),
//!     declare!(brew_private).name("brew"),
//! ])?;
//!
//! assert!(registry.resolve("brew", Scope::Public).is_some());
//! assert!(registry.resolve("brew", Scope::Ephemeral).is_none());
//! ```

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};

use futures::future::BoxFuture;
use log::debug;
use thiserror::Error;

use crate::commands::{Context, ResponseIntent, Scope};

/// What a handler returns: a reply, no reply, or a failure to report.
pub type HandlerResult = anyhow::Result<Option<ResponseIntent>>;

/// A command handler.
pub type HandlerFn = for<'a> fn(&'a Context) -> BoxFuture<'a, HandlerResult>;

/// Declares a handler named after its function identifier.
///
/// `declare!(today)` registers `today` as the `today` command with the
/// default scope. Use [`Declaration::name`] and [`Declaration::scope`] to
/// override either.
macro_rules! declare {
    ($handler:ident) => {
        $crate::commands::registry::Declaration::new(stringify!($handler), $handler)
    };
}
pub(crate) use declare;

/// Errors raised while building the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two declarations resolve to the same `(name, scope)` key.
    #[error("handler '{name}' is registered twice with the {scope} scope")]
    DuplicateRegistration { name: String, scope: Scope },
}

/// One entry of the registration list.
pub struct Declaration {
    /// Identifier of the handler function, used as name when none is given
    ident: &'static str,
    handler: HandlerFn,
    name: Option<String>,
    scope: Option<Scope>,
}

impl Declaration {
    pub fn new(ident: &'static str, handler: HandlerFn) -> Self {
        Declaration {
            ident,
            handler,
            name: None,
            scope: None,
        }
    }

    /// Overrides the command name. The empty name binds the bare command.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// Overrides the default [`Scope::Private`] scope.
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    fn into_descriptor(self) -> HandlerDescriptor {
        HandlerDescriptor {
            name: self.name.unwrap_or_else(|| self.ident.to_owned()),
            scope: self.scope.unwrap_or_default(),
            handler: self.handler,
        }
    }
}

/// A registered handler with its effective key.
#[derive(Clone)]
pub struct HandlerDescriptor {
    name: String,
    scope: Scope,
    handler: HandlerFn,
}

impl HandlerDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Runs the handler against the given context.
    pub async fn invoke(&self, context: &Context) -> HandlerResult {
        (self.handler)(context).await
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Immutable `(name, scope)` → handler table.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    /// Handlers indexed by scope, then by name
    handlers: HashMap<Scope, HashMap<String, HandlerDescriptor>>,
}

impl HandlerRegistry {
    /// Builds the registry from an ordered list of declarations.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRegistration`] as soon as two
    /// declarations resolve to the same key. Nothing is registered then.
    pub fn build<I>(declarations: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Declaration>,
    {
        let mut handlers: HashMap<Scope, HashMap<String, HandlerDescriptor>> = HashMap::new();

        for declaration in declarations {
            let descriptor = declaration.into_descriptor();
            let by_name = handlers.entry(descriptor.scope).or_default();

            match by_name.entry(descriptor.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(RegistryError::DuplicateRegistration {
                        name: descriptor.name,
                        scope: descriptor.scope,
                    });
                }
                Entry::Vacant(entry) => {
                    debug!(
                        "registered handler '{}' with {} scope",
                        descriptor.name, descriptor.scope
                    );
                    entry.insert(descriptor);
                }
            }
        }

        Ok(HandlerRegistry { handlers })
    }

    /// Finds the handler registered for exactly this name and scope.
    pub fn resolve(&self, name: &str, scope: Scope) -> Option<&HandlerDescriptor> {
        self.handlers.get(&scope)?.get(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every registered handler, in no particular order.
    pub fn descriptors(&self) -> impl Iterator<Item = &HandlerDescriptor> {
        self.handlers.values().flat_map(HashMap::values)
    }
}

#[cfg(test)]
mod tests {
    use futures::FutureExt;

    use super::*;
    use crate::commands::test_utils::create_test_context;

    fn reply(text: &str) -> HandlerResult {
        Ok(Some(ResponseIntent {
            text: text.to_owned(),
            outcome: Default::default(),
        }))
    }

    fn alpha(_: &Context) -> BoxFuture<'_, HandlerResult> {
        async { reply("alpha") }.boxed()
    }

    fn beta(_: &Context) -> BoxFuture<'_, HandlerResult> {
        async { reply("beta") }.boxed()
    }

    fn gamma(_: &Context) -> BoxFuture<'_, HandlerResult> {
        async { reply("gamma") }.boxed()
    }

    async fn invoke_text(registry: &HandlerRegistry, name: &str, scope: Scope) -> String {
        let context = create_test_context(name, scope, "");
        registry
            .resolve(name, scope)
            .unwrap()
            .invoke(&context)
            .await
            .unwrap()
            .unwrap()
            .text
    }

    #[test]
    fn test_name_defaults_to_function_identifier() {
        let registry = HandlerRegistry::build([declare!(alpha)]).unwrap();

        let descriptor = registry.resolve("alpha", Scope::Private).unwrap();
        assert_eq!(descriptor.name(), "alpha");
        assert_eq!(descriptor.scope(), Scope::Private);
    }

    #[test]
    fn test_scope_defaults_to_private() {
        let registry = HandlerRegistry::build([declare!(alpha)]).unwrap();

        assert!(registry.resolve("alpha", Scope::Private).is_some());
        assert!(registry.resolve("alpha", Scope::Public).is_none());
        assert!(registry.resolve("alpha", Scope::Ephemeral).is_none());
    }

    #[tokio::test]
    async fn test_resolve_returns_exact_descriptor_for_every_key() {
        let registry = HandlerRegistry::build([
            declare!(alpha),
            declare!(beta).scope(Scope::Public),
            declare!(gamma).name("alpha").scope(Scope::Ephemeral),
        ])
        .unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(invoke_text(&registry, "alpha", Scope::Private).await, "alpha");
        assert_eq!(invoke_text(&registry, "beta", Scope::Public).await, "beta");
        assert_eq!(
            invoke_text(&registry, "alpha", Scope::Ephemeral).await,
            "gamma"
        );
    }

    #[tokio::test]
    async fn test_same_name_different_scopes() {
        let registry = HandlerRegistry::build([
            declare!(alpha).name("brew").scope(Scope::Public),
            declare!(beta).name("brew"),
        ])
        .unwrap();

        assert_eq!(invoke_text(&registry, "brew", Scope::Public).await, "alpha");
        assert_eq!(invoke_text(&registry, "brew", Scope::Private).await, "beta");
        assert!(registry.resolve("brew", Scope::Ephemeral).is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let result = HandlerRegistry::build([
            declare!(alpha).name("gone").scope(Scope::Public),
            declare!(beta).name("gone"),
            declare!(gamma).name("gone").scope(Scope::Public),
        ]);

        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateRegistration {
                name: "gone".to_owned(),
                scope: Scope::Public,
            }
        );
    }

    #[test]
    fn test_duplicate_through_default_name() {
        let result = HandlerRegistry::build([declare!(alpha), declare!(beta).name("alpha")]);

        assert!(matches!(
            result,
            Err(RegistryError::DuplicateRegistration { name, scope })
            if name == "alpha" && scope == Scope::Private
        ));
    }

    #[test]
    fn test_duplicate_registration_message() {
        let error = RegistryError::DuplicateRegistration {
            name: "brew".to_owned(),
            scope: Scope::Public,
        };
        assert_eq!(
            error.to_string(),
            "handler 'brew' is registered twice with the public scope"
        );
    }

    #[tokio::test]
    async fn test_empty_name_is_a_distinct_key_per_scope() {
        let registry = HandlerRegistry::build([
            declare!(alpha).name("").scope(Scope::Public),
            declare!(beta).name(""),
        ])
        .unwrap();

        assert_eq!(invoke_text(&registry, "", Scope::Public).await, "alpha");
        assert_eq!(invoke_text(&registry, "", Scope::Private).await, "beta");
    }

    #[tokio::test]
    async fn test_only_handler_with_empty_name() {
        let registry =
            HandlerRegistry::build([declare!(alpha), declare!(beta).name("")]).unwrap();

        assert_eq!(invoke_text(&registry, "", Scope::Private).await, "beta");
        assert!(registry.resolve("", Scope::Public).is_none());
    }

    #[test]
    fn test_empty_registry() {
        let registry = HandlerRegistry::build(Vec::new()).unwrap();

        assert!(registry.is_empty());
        assert_eq!(registry.descriptors().count(), 0);
        assert!(registry.resolve("", Scope::Private).is_none());
    }

    #[test]
    fn test_descriptors_lists_every_handler() {
        let registry = HandlerRegistry::build([
            declare!(alpha),
            declare!(beta).scope(Scope::Public),
        ])
        .unwrap();

        let mut names: Vec<&str> = registry.descriptors().map(|d| d.name()).collect();
        names.sort();
        assert_eq!(names, vec!["alpha", "beta"]);
    }
}
