//! Conversion between protoc's plugin messages and the generator model

use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FileDescriptorProto, MethodDescriptorProto,
    ServiceDescriptorProto,
};
use tracing::error;
use twirp_ruby_codegen::{
    EnumDef, GenerateError, GeneratorConfig, MessageDef, MethodDef, SchemaFile, SchemaSet,
    ServiceDef, generate,
};

/// Run the generator over a decoded request.
///
/// Generation failures are reported through the response's `error` field,
/// as protoc expects, with no files attached.
pub fn respond(req: &CodeGeneratorRequest, config: &GeneratorConfig) -> CodeGeneratorResponse {
    let set = SchemaSet::new(req.proto_file.iter().map(schema_file).collect());

    match generate(&set, &req.file_to_generate, config) {
        Ok(generated) => CodeGeneratorResponse {
            supported_features: Some(Feature::Proto3Optional as u64),
            file: generated
                .into_iter()
                .map(|f| File {
                    name: Some(f.name),
                    content: Some(f.content),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        },
        Err(e) => error_response(&e),
    }
}

/// Response carrying only an error message
pub fn error_response(err: &GenerateError) -> CodeGeneratorResponse {
    error!(code = err.error_code(), "generation failed: {err}");
    CodeGeneratorResponse {
        error: Some(err.to_string()),
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    }
}

/// Convert one file descriptor into the generator model
pub fn schema_file(proto: &FileDescriptorProto) -> SchemaFile {
    SchemaFile {
        name: proto.name().to_string(),
        package: proto.package().to_string(),
        dependencies: proto.dependency.clone(),
        messages: proto.message_type.iter().map(message_def).collect(),
        enums: proto.enum_type.iter().map(enum_def).collect(),
        services: proto.service.iter().map(service_def).collect(),
        namespace_override: proto
            .options
            .as_ref()
            .and_then(|o| o.ruby_package.clone()),
    }
}

fn message_def(proto: &DescriptorProto) -> MessageDef {
    MessageDef {
        name: proto.name().to_string(),
        nested_messages: proto.nested_type.iter().map(message_def).collect(),
        nested_enums: proto.enum_type.iter().map(enum_def).collect(),
    }
}

fn enum_def(proto: &EnumDescriptorProto) -> EnumDef {
    EnumDef::new(proto.name())
}

fn service_def(proto: &ServiceDescriptorProto) -> ServiceDef {
    ServiceDef {
        name: proto.name().to_string(),
        methods: proto.method.iter().map(method_def).collect(),
    }
}

fn method_def(proto: &MethodDescriptorProto) -> MethodDef {
    MethodDef::new(proto.name(), proto.input_type(), proto.output_type())
        .with_streaming(proto.client_streaming(), proto.server_streaming())
}
