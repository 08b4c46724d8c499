//! Schema model handed over by the host compiler.
//!
//! These types mirror the parts of `FileDescriptorProto` the generator reads.
//! They are built once per run and never mutated afterwards.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// One `.proto` file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaFile {
    /// Path-like file name, unique within a run (e.g. `example/service.proto`).
    pub name: String,

    /// Dotted package, empty when the file declares none.
    pub package: String,

    /// Direct imports, in declaration order.
    pub dependencies: Vec<String>,

    /// Top-level messages.
    pub messages: Vec<MessageDef>,

    /// Top-level enums.
    pub enums: Vec<EnumDef>,

    pub services: Vec<ServiceDef>,

    /// Raw Ruby namespace override, taken verbatim from the file options.
    pub namespace_override: Option<String>,
}

impl SchemaFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn with_message(mut self, message: MessageDef) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_enum(mut self, enum_def: EnumDef) -> Self {
        self.enums.push(enum_def);
        self
    }

    pub fn with_service(mut self, service: ServiceDef) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_namespace_override(mut self, value: impl Into<String>) -> Self {
        self.namespace_override = Some(value.into());
        self
    }

    /// Prefix shared by every type declared at the top level of this file
    fn scope(&self) -> String {
        if self.package.is_empty() {
            String::new()
        } else {
            format!(".{}", self.package)
        }
    }
}

/// A message, possibly containing nested definitions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageDef {
    pub name: String,
    pub nested_messages: Vec<MessageDef>,
    pub nested_enums: Vec<EnumDef>,
}

impl MessageDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_nested_message(mut self, message: MessageDef) -> Self {
        self.nested_messages.push(message);
        self
    }

    pub fn with_nested_enum(mut self, enum_def: EnumDef) -> Self {
        self.nested_enums.push(enum_def);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
}

impl EnumDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDef {
    pub name: String,
    pub methods: Vec<MethodDef>,
}

impl ServiceDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }
}

/// An RPC method; input and output are fully-qualified type names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
}

impl MethodDef {
    pub fn new(
        name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            output_type: output_type.into(),
            ..Default::default()
        }
    }

    pub fn with_streaming(mut self, client: bool, server: bool) -> Self {
        self.client_streaming = client;
        self.server_streaming = server;
        self
    }

    pub fn is_streaming(&self) -> bool {
        self.client_streaming || self.server_streaming
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Message,
    Enum,
}

/// A message or enum addressable by its fully-qualified name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    /// `.` + package + nesting chain + simple name, e.g. `.pkg.Outer.Inner`.
    pub full_name: String,
    pub name: String,
    /// Name of the declaring file.
    pub file: String,
    /// Enclosing message names, outermost first.
    pub nesting: Vec<String>,
    pub kind: SymbolKind,
}

/// Fully-qualified name → symbol, across every loaded file
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    symbols: HashMap<String, TypeSymbol>,
}

impl TypeIndex {
    /// Index every message and enum, nested ones included
    pub fn build(files: &[SchemaFile]) -> Self {
        let mut index = Self::default();
        for file in files {
            let scope = file.scope();
            for message in &file.messages {
                index.add_message(file, &scope, &[], message);
            }
            for enum_def in &file.enums {
                index.insert(file, &scope, &[], &enum_def.name, SymbolKind::Enum);
            }
        }
        index
    }

    pub fn get(&self, full_name: &str) -> Option<&TypeSymbol> {
        self.symbols.get(full_name)
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.symbols.contains_key(full_name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn add_message(
        &mut self,
        file: &SchemaFile,
        scope: &str,
        nesting: &[String],
        message: &MessageDef,
    ) {
        self.insert(file, scope, nesting, &message.name, SymbolKind::Message);

        let inner_scope = format!("{scope}.{}", message.name);
        let mut inner_nesting = nesting.to_vec();
        inner_nesting.push(message.name.clone());

        for nested in &message.nested_messages {
            self.add_message(file, &inner_scope, &inner_nesting, nested);
        }
        for nested in &message.nested_enums {
            self.insert(file, &inner_scope, &inner_nesting, &nested.name, SymbolKind::Enum);
        }
    }

    fn insert(
        &mut self,
        file: &SchemaFile,
        scope: &str,
        nesting: &[String],
        name: &str,
        kind: SymbolKind,
    ) {
        let full_name = format!("{scope}.{name}");
        match self.symbols.entry(full_name) {
            Entry::Occupied(existing) => {
                // First declaration wins; protoc rejects duplicates before we run.
                debug!(
                    type_name = %existing.key(),
                    first = %existing.get().file,
                    duplicate = %file.name,
                    "duplicate type symbol ignored"
                );
            }
            Entry::Vacant(slot) => {
                let full_name = slot.key().clone();
                slot.insert(TypeSymbol {
                    full_name,
                    name: name.to_string(),
                    file: file.name.clone(),
                    nesting: nesting.to_vec(),
                    kind,
                });
            }
        }
    }
}

/// Every file loaded for one run, with lookups built up front
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    files: Vec<SchemaFile>,
    by_name: HashMap<String, usize>,
    types: TypeIndex,
}

impl SchemaSet {
    pub fn new(files: Vec<SchemaFile>) -> Self {
        let by_name = files
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        let types = TypeIndex::build(&files);

        debug!(files = files.len(), types = types.len(), "loaded schema set");

        Self {
            files,
            by_name,
            types,
        }
    }

    pub fn files(&self) -> &[SchemaFile] {
        &self.files
    }

    pub fn file(&self, name: &str) -> Option<&SchemaFile> {
        self.by_name.get(name).map(|&i| &self.files[i])
    }

    pub fn types(&self) -> &TypeIndex {
        &self.types
    }
}
