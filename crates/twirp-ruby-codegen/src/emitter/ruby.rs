//! Ruby source template for Twirp services and clients.

use super::{GENERATOR_VERSION, ResolvedService};
use crate::descriptor::SchemaFile;
use crate::namespace::NamespacePath;

const INDENT: &str = "  ";

/// Line-oriented writer with two-space Ruby indentation
#[derive(Default)]
struct RubyWriter {
    code: String,
    depth: usize,
}

impl RubyWriter {
    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.code.push_str(INDENT);
            }
            self.code.push_str(text);
        }
        self.code.push('\n');
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("end");
    }
}

/// Render the `_twirp.rb` file for `file`
pub(super) fn render(
    file: &SchemaFile,
    namespace: &NamespacePath,
    messages_require: &str,
    services: &[ResolvedService<'_>],
) -> String {
    let mut w = RubyWriter::default();

    w.line(&format!(
        "# Code generated by protoc-gen-twirp_ruby {GENERATOR_VERSION}, DO NOT EDIT."
    ));
    w.line("require 'twirp'");
    w.line(&format!("require_relative '{messages_require}'"));
    w.line("");

    for module in namespace {
        w.open(&format!("module {module}"));
    }

    for (i, service) in services.iter().enumerate() {
        if i > 0 {
            w.line("");
        }

        w.open(&format!("class {}Service < Twirp::Service", service.class_name));
        if !file.package.is_empty() {
            w.line(&format!("package '{}'", file.package));
        }
        w.line(&format!("service '{}'", service.proto_name));
        for method in &service.methods {
            w.line(&format!(
                "rpc :{}, {}, {}, :ruby_method => :{}",
                method.proto_name, method.input, method.output, method.ruby_method
            ));
        }
        w.close();
        w.line("");

        w.open(&format!("class {}Client < Twirp::Client", service.class_name));
        w.line(&format!("client_for {}Service", service.class_name));
        w.close();
    }

    for _ in namespace {
        w.close();
    }

    w.code
}
