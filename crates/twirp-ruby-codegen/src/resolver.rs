//! Minimal qualification of type references.
//!
//! A protobuf type such as `.twirp.rubytypes.foo.my_message` becomes the Ruby
//! constant path `Twirp::Rubytypes::Foo::MyMessage`. When the reference is
//! written inside a module, the leading segments it shares with that module
//! are dropped, so inside `Twirp::Rubytypes` the same type is written as
//! `Foo::MyMessage`.
//!
//! Only a shared *leading* prefix is elided. There is no lexical scope search,
//! so a type in a sibling module keeps its full path below the common prefix.

use crate::descriptor::TypeIndex;
use crate::namespace::{NAMESPACE_SEPARATOR, NamespacePath};
use crate::naming::to_camel;

/// Shortest Ruby reference to `full_name` from inside `current`.
///
/// Segments are compared whole after camelization; partial overlaps never
/// count. The final segment (the type's own name) is always kept. An empty
/// `full_name` yields an empty string.
///
/// # Examples
///
/// ```
/// use twirp_ruby_codegen::{NamespacePath, resolve};
///
/// assert_eq!(resolve(".google.protobuf.Empty", &NamespacePath::root()), "Google::Protobuf::Empty");
///
/// let current = NamespacePath::new(["Twirp", "Rubytypes"]);
/// assert_eq!(resolve(".twirp.rubytypes.foo.my_message", &current), "Foo::MyMessage");
/// ```
pub fn resolve(full_name: &str, current: &NamespacePath) -> String {
    let trimmed = full_name.strip_prefix('.').unwrap_or(full_name);
    if trimmed.is_empty() {
        return String::new();
    }

    let segments: Vec<String> = trimmed.split('.').map(to_camel).collect();

    let shared = segments
        .iter()
        .zip(current.iter())
        .take_while(|(segment, scope)| segment == scope)
        .count()
        .min(segments.len() - 1);

    segments[shared..].join(NAMESPACE_SEPARATOR)
}

impl TypeIndex {
    /// Resolve a reference, or `None` when no loaded file declares the type
    pub fn resolve(&self, full_name: &str, current: &NamespacePath) -> Option<String> {
        self.contains(full_name).then(|| resolve(full_name, current))
    }
}
