use flatrpc_common::codec::Parameters;
use flatrpc_common::protocol::{FlatrpcError, Result, Signature};
use std::collections::HashMap;

/// Runs one operation against the implementation.
///
/// The handler receives the request's parameters, decodes its arguments from
/// them and returns the flattened result (rooted at `result`).
pub type Handler<S> = fn(&mut S, &Parameters) -> Result<Parameters>;

/// An operation exposed by a skeleton.
pub struct Operation<S> {
    pub signature: Signature,
    pub handler: Handler<S>,
}

impl<S> Operation<S> {
    pub const fn new(signature: Signature, handler: Handler<S>) -> Self {
        Self { signature, handler }
    }

    pub fn name(&self) -> &'static str {
        self.signature.name
    }
}

impl<S> Clone for Operation<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Operation<S> {}

impl<S> std::fmt::Debug for Operation<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("signature", &self.signature)
            .finish()
    }
}

/// The set of operations a skeleton dispatches on, keyed by name.
///
/// Built once when the skeleton is created and read-only afterwards.
pub struct MethodTable<S> {
    operations: HashMap<&'static str, Operation<S>>,
}

impl<S> MethodTable<S> {
    /// Builds the table, rejecting two operations with the same name.
    pub fn new(operations: impl IntoIterator<Item = Operation<S>>) -> Result<Self> {
        let mut table = HashMap::new();
        for operation in operations {
            if table.insert(operation.name(), operation).is_some() {
                return Err(FlatrpcError::DuplicateOperation(operation.name().to_string()));
            }
        }
        Ok(Self { operations: table })
    }

    pub fn get(&self, name: &str) -> Option<&Operation<S>> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operation names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.operations.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl<S> std::fmt::Debug for MethodTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// A remote interface that an implementation of type `S` can be served as.
///
/// Usually implemented by the dispatch type generated by
/// `remote_interface!`, but can be written by hand.
pub trait Interface<S> {
    /// Name used in log output.
    const NAME: &'static str;

    fn operations() -> Vec<Operation<S>>;

    fn method_table() -> Result<MethodTable<S>> {
        MethodTable::new(Self::operations())
    }
}
