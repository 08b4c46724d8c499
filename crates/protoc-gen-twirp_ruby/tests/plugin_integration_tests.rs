//! Integration tests for the plugin binary.
//!
//! Drives the compiled binary the way protoc does (encoded request on stdin)
//! and through the offline descriptor-set mode.

#![allow(non_snake_case)]

use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::{
    DescriptorProto, FileDescriptorProto, FileDescriptorSet, FileOptions, MethodDescriptorProto,
    ServiceDescriptorProto,
};
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_protoc-gen-twirp_ruby");

fn haberdasher_proto() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("haberdasher/service.proto".into()),
        package: Some("example.haberdasher".into()),
        message_type: vec![
            DescriptorProto {
                name: Some("Size".into()),
                ..Default::default()
            },
            DescriptorProto {
                name: Some("Hat".into()),
                ..Default::default()
            },
        ],
        service: vec![ServiceDescriptorProto {
            name: Some("Haberdasher".into()),
            method: vec![MethodDescriptorProto {
                name: Some("MakeHat".into()),
                input_type: Some(".example.haberdasher.Size".into()),
                output_type: Some(".example.haberdasher.Hat".into()),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// Run the binary in plugin mode with extra environment variables
fn spawn_plugin(request: &CodeGeneratorRequest, envs: &[(&str, &str)]) -> Output {
    let mut child = Command::new(BIN)
        .env_remove("TWIRP_RUBY_LOG")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(&request.encode_to_vec())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "plugin exited with {:?}", output.status);
    output
}

/// Run the binary in plugin mode and decode its response
fn run_plugin(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let output = spawn_plugin(request, &[]);
    CodeGeneratorResponse::decode(output.stdout.as_slice()).unwrap()
}

mod plugin_mode {
    use super::*;

    #[test]
    fn plugin___valid_request___returns_generated_file() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["haberdasher/service.proto".into()],
            proto_file: vec![haberdasher_proto()],
            ..Default::default()
        };

        let response = run_plugin(&request);

        assert_eq!(response.error, None);
        assert_eq!(response.file.len(), 1);
        assert_eq!(response.file[0].name(), "haberdasher/service_twirp.rb");
        let content = response.file[0].content();
        assert!(content.contains("module Example\n  module Haberdasher\n"));
        assert!(content.contains("rpc :MakeHat, Size, Hat, :ruby_method => :make_hat\n"));
        assert!(content.contains("client_for HaberdasherService\n"));
    }

    #[test]
    fn plugin___ruby_package_option___overrides_modules() {
        let mut proto = haberdasher_proto();
        proto.options = Some(FileOptions {
            ruby_package: Some("Shop::Hats".into()),
            ..Default::default()
        });
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["haberdasher/service.proto".into()],
            proto_file: vec![proto],
            ..Default::default()
        };

        let response = run_plugin(&request);

        assert!(response.file[0].content().contains("module Shop\n  module Hats\n"));
    }

    #[test]
    fn plugin___unknown_file___reports_error_in_response() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["nope.proto".into()],
            proto_file: vec![haberdasher_proto()],
            ..Default::default()
        };

        let response = run_plugin(&request);

        assert!(response.file.is_empty());
        assert!(response.error.unwrap().contains("nope.proto"));
    }

    #[test]
    fn plugin___invalid_parameter___reports_error_in_response() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["haberdasher/service.proto".into()],
            proto_file: vec![haberdasher_proto()],
            parameter: Some("no_such_option".into()),
            ..Default::default()
        };

        let response = run_plugin(&request);

        assert!(response.file.is_empty());
        assert!(response.error.unwrap().starts_with("invalid plugin parameter"));
    }

    #[test]
    fn plugin___trace_logging___keeps_stdout_a_clean_response() {
        let mut proto = haberdasher_proto();
        proto.options = Some(FileOptions {
            ruby_package: Some("Bad::".into()),
            ..Default::default()
        });
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["haberdasher/service.proto".into()],
            proto_file: vec![proto],
            parameter: Some("log_level=trace".into()),
            ..Default::default()
        };

        let output = spawn_plugin(&request, &[]);

        let response = CodeGeneratorResponse::decode(output.stdout.as_slice()).unwrap();
        assert_eq!(response.error, None);
        assert_eq!(response.file.len(), 1);
        assert!(response.file[0].content().contains("module Example\n  module Haberdasher\n"));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("malformed namespace override"));
        assert!(!stderr.contains('\x1b'), "stderr is not a terminal, expected no colours");
    }

    #[test]
    fn plugin___log_env_var___enables_logging_on_stderr() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["haberdasher/service.proto".into()],
            proto_file: vec![haberdasher_proto()],
            ..Default::default()
        };

        let output = spawn_plugin(&request, &[("TWIRP_RUBY_LOG", "debug")]);

        let response = CodeGeneratorResponse::decode(output.stdout.as_slice()).unwrap();
        assert_eq!(response.file.len(), 1);
        assert!(!output.stderr.is_empty());
    }

    #[test]
    fn plugin___invalid_parameter___is_logged_on_stderr() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["haberdasher/service.proto".into()],
            proto_file: vec![haberdasher_proto()],
            parameter: Some("bogus".into()),
            ..Default::default()
        };

        let output = spawn_plugin(&request, &[("TWIRP_RUBY_LOG", "trace")]);

        let response = CodeGeneratorResponse::decode(output.stdout.as_slice()).unwrap();
        assert!(response.error.is_some());
        assert!(String::from_utf8_lossy(&output.stderr).contains("generation failed"));
    }

    #[test]
    fn plugin___garbage_stdin___exits_with_failure() {
        let mut child = Command::new(BIN)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        child
            .stdin
            .take()
            .unwrap()
            .write_all(&[0xff, 0xff, 0xff])
            .unwrap();

        let output = child.wait_with_output().unwrap();

        assert!(!output.status.success());
    }
}

mod offline_mode {
    use super::*;

    #[test]
    fn offline___descriptor_set___writes_files_under_out_dir() {
        let temp = TempDir::new().unwrap();
        let set_path = temp.path().join("fileset.pb");
        let set = FileDescriptorSet {
            file: vec![haberdasher_proto()],
        };
        std::fs::write(&set_path, set.encode_to_vec()).unwrap();
        let out = temp.path().join("out");

        let status = Command::new(BIN)
            .arg("--descriptor-set")
            .arg(&set_path)
            .arg("--file")
            .arg("haberdasher/service.proto")
            .arg("--out")
            .arg(&out)
            .status()
            .unwrap();

        assert!(status.success());
        let generated =
            std::fs::read_to_string(out.join("haberdasher/service_twirp.rb")).unwrap();
        assert!(generated.contains("require_relative 'service_pb'\n"));
    }

    #[test]
    fn offline___name_escaping_out_dir___is_refused() {
        let temp = TempDir::new().unwrap();
        let set_path = temp.path().join("fileset.pb");
        let mut proto = haberdasher_proto();
        proto.name = Some("../escape.proto".into());
        let set = FileDescriptorSet { file: vec![proto] };
        std::fs::write(&set_path, set.encode_to_vec()).unwrap();
        let out = temp.path().join("out");

        let status = Command::new(BIN)
            .arg("--descriptor-set")
            .arg(&set_path)
            .arg("--file")
            .arg("../escape.proto")
            .arg("--out")
            .arg(&out)
            .stderr(Stdio::null())
            .status()
            .unwrap();

        assert!(!status.success());
        assert!(!temp.path().join("escape_twirp.rb").exists());
    }

    #[test]
    fn offline___unknown_file___fails() {
        let temp = TempDir::new().unwrap();
        let set_path = temp.path().join("fileset.pb");
        let set = FileDescriptorSet {
            file: vec![haberdasher_proto()],
        };
        std::fs::write(&set_path, set.encode_to_vec()).unwrap();

        let status = Command::new(BIN)
            .arg("--descriptor-set")
            .arg(&set_path)
            .arg("--file")
            .arg("missing.proto")
            .arg("--out")
            .arg(temp.path())
            .stderr(Stdio::null())
            .status()
            .unwrap();

        assert!(!status.success());
    }
}
