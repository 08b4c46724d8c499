//! twirp-ruby-codegen - Symbol resolution and name projection for Twirp Ruby code
//!
//! This crate turns protobuf schema descriptors into Ruby Twirp service and
//! client scaffolding:
//! - [`naming`] converts identifiers between snake_case and CamelCase
//! - [`namespace_for`] computes the Ruby module path of a schema file
//! - [`select_files`] picks the files requested for generation
//! - [`resolve`] shortens fully-qualified type names against a namespace
//! - [`generate`] drives all of the above into [`GeneratedFile`]s
//!
//! The crate is pure: it performs no I/O and installs no tracing subscriber.
//! Decoding the protoc request and writing the response belongs to the
//! `protoc-gen-twirp_ruby` binary.
//!
//! # Example
//!
//! ```
//! use twirp_ruby_codegen::{
//!     GeneratorConfig, MessageDef, MethodDef, SchemaFile, SchemaSet, ServiceDef, generate,
//! };
//!
//! let file = SchemaFile::new("hello_world/service.proto")
//!     .with_package("example.hello_world")
//!     .with_message(MessageDef::new("HelloRequest"))
//!     .with_message(MessageDef::new("HelloResponse"))
//!     .with_service(ServiceDef::new("HelloWorld").with_method(MethodDef::new(
//!         "Hello",
//!         ".example.hello_world.HelloRequest",
//!         ".example.hello_world.HelloResponse",
//!     )));
//!
//! let set = SchemaSet::new(vec![file]);
//! let files = generate(&set, &["hello_world/service.proto".to_string()], &GeneratorConfig::default())?;
//!
//! assert_eq!(files[0].name, "hello_world/service_twirp.rb");
//! assert!(files[0].content.contains("rpc :Hello, HelloRequest, HelloResponse, :ruby_method => :hello"));
//! # Ok::<(), twirp_ruby_codegen::GenerateError>(())
//! ```

mod config;
mod descriptor;
mod emitter;
mod error;
mod namespace;
mod resolver;
mod selector;

pub mod naming;

pub use config::{GeneratorConfig, LogLevel};
pub use descriptor::{
    EnumDef, MessageDef, MethodDef, SchemaFile, SchemaSet, ServiceDef, SymbolKind, TypeIndex,
    TypeSymbol,
};
pub use emitter::{GENERATOR_VERSION, GeneratedFile, emit_file, generate};
pub use error::{GenerateError, GenerateResult};
pub use namespace::{NAMESPACE_SEPARATOR, NamespacePath, namespace_for, split_constants};
pub use resolver::resolve;
pub use selector::select_files;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        GenerateError, GenerateResult, GeneratedFile, GeneratorConfig, NamespacePath, SchemaFile,
        SchemaSet, generate,
    };
}
