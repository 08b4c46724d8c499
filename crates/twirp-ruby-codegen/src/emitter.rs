//! Generation of Ruby Twirp files from selected schema files.
//!
//! The emitter walks each selected file in request order, resolves every RPC
//! input and output against that file's namespace, and hands the resolved
//! names to the Ruby template. Errors are collected across all files and
//! returned as one failure.

mod ruby;

use crate::config::GeneratorConfig;
use crate::descriptor::{MethodDef, SchemaFile, SchemaSet, ServiceDef, TypeIndex};
use crate::error::{GenerateError, GenerateResult};
use crate::namespace::{NamespacePath, namespace_for};
use crate::naming::{no_extension, only_base, to_camel, to_snake};
use crate::selector::select_files;
use tracing::{debug, info};

/// Version stamped into every generated file header
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Suffix of generated file names
const OUTPUT_SUFFIX: &str = "_twirp.rb";

/// Suffix of the protobuf message file the generated code requires
const MESSAGES_SUFFIX: &str = "_pb";

/// One generated Ruby file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path, e.g. `example/service_twirp.rb`.
    pub name: String,

    /// Module path the services are rendered inside.
    pub namespace: NamespacePath,

    /// Ruby constant names of the file's top-level messages and enums.
    pub declared_types: Vec<String>,

    pub content: String,
}

/// A service with every name already projected into Ruby
#[derive(Debug)]
struct ResolvedService<'a> {
    proto_name: &'a str,
    class_name: String,
    methods: Vec<ResolvedMethod<'a>>,
}

#[derive(Debug)]
struct ResolvedMethod<'a> {
    proto_name: &'a str,
    ruby_method: String,
    input: String,
    output: String,
}

/// Generate Ruby files for the requested entries.
///
/// Returns the files in request order, or a single error covering every
/// failure found.
pub fn generate<S: AsRef<str>>(
    set: &SchemaSet,
    entry_names: &[S],
    config: &GeneratorConfig,
) -> GenerateResult<Vec<GeneratedFile>> {
    let selected = select_files(entry_names, set)?;

    let mut generated = Vec::with_capacity(selected.len());
    let mut errors = Vec::new();

    for file in selected {
        if config.skip_empty && file.services.is_empty() {
            debug!(file = %file.name, "skipping file without services");
            continue;
        }
        match emit_file(file, set.types()) {
            Ok(output) => generated.push(output),
            Err(e) => errors.push(e),
        }
    }

    if let Some(error) = GenerateError::aggregate(errors) {
        return Err(error);
    }

    info!(files = generated.len(), "generated Twirp Ruby files");
    Ok(generated)
}

/// Generate the Ruby file for a single schema file.
///
/// `types` must cover every loaded file, not only the selected ones, since
/// RPC inputs and outputs may live in any import.
pub fn emit_file(file: &SchemaFile, types: &TypeIndex) -> GenerateResult<GeneratedFile> {
    let namespace = namespace_for(file);
    debug!(file = %file.name, namespace = %namespace, "emitting file");

    let mut services = Vec::with_capacity(file.services.len());
    let mut errors = Vec::new();

    for service in &file.services {
        match resolve_service(service, &namespace, types) {
            Ok(resolved) => services.push(resolved),
            Err(e) => errors.extend(e),
        }
    }

    if let Some(error) = GenerateError::aggregate(errors) {
        return Err(error);
    }

    let declared_types = file
        .messages
        .iter()
        .map(|m| to_camel(&m.name))
        .chain(file.enums.iter().map(|e| to_camel(&e.name)))
        .collect();

    let messages_require = format!("{}{MESSAGES_SUFFIX}", no_extension(only_base(&file.name)));
    let content = ruby::render(file, &namespace, &messages_require, &services);

    Ok(GeneratedFile {
        name: format!("{}{OUTPUT_SUFFIX}", no_extension(&file.name)),
        namespace,
        declared_types,
        content,
    })
}

fn resolve_service<'a>(
    service: &'a ServiceDef,
    namespace: &NamespacePath,
    types: &TypeIndex,
) -> Result<ResolvedService<'a>, Vec<GenerateError>> {
    let mut methods = Vec::with_capacity(service.methods.len());
    let mut errors = Vec::new();

    for method in &service.methods {
        match resolve_method(service, method, namespace, types) {
            Ok(resolved) => methods.push(resolved),
            Err(e) => errors.extend(e),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ResolvedService {
        proto_name: &service.name,
        class_name: to_camel(&service.name),
        methods,
    })
}

fn resolve_method<'a>(
    service: &ServiceDef,
    method: &'a MethodDef,
    namespace: &NamespacePath,
    types: &TypeIndex,
) -> Result<ResolvedMethod<'a>, Vec<GenerateError>> {
    let qualified_method = format!("{}.{}", service.name, method.name);
    let mut errors = Vec::new();

    if method.is_streaming() {
        errors.push(GenerateError::StreamingNotSupported {
            service: service.name.clone(),
            method: method.name.clone(),
        });
    }

    let mut lookup = |type_name: &str| {
        let resolved = types.resolve(type_name, namespace);
        if resolved.is_none() {
            errors.push(GenerateError::UnresolvedType {
                type_name: type_name.to_string(),
                method: qualified_method.clone(),
            });
        }
        resolved
    };
    let input = lookup(&method.input_type);
    let output = lookup(&method.output_type);

    match (input, output) {
        (Some(input), Some(output)) if errors.is_empty() => {
            debug!(
                method = %qualified_method,
                input = %input,
                output = %output,
                "resolved method types"
            );
            Ok(ResolvedMethod {
                proto_name: &method.name,
                ruby_method: to_snake(&method.name),
                input,
                output,
            })
        }
        _ => Err(errors),
    }
}
