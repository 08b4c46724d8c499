//! Naming convention utilities for Ruby code generation.
//!
//! Protobuf identifiers arrive in whatever case the schema author chose. Ruby
//! wants CamelCase for constants (classes and modules) and snake_case for
//! methods. This module converts between the two.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `my_long_name` | [`to_camel`] | `MyLongName` |
//! | `MyLongName` | [`to_snake`] | `my_long_name` |
//! | `word` | [`capitalize`] | `Word` |
//! | `dir/file.proto` | [`no_extension`] | `dir/file` |
//! | `dir/file.proto` | [`only_base`] | `file.proto` |
//!
//! The conversions are intentionally lossy: `to_camel` only introduces word
//! boundaries at underscores, while `to_snake` splits before every uppercase
//! letter, so acronym runs do not survive a round trip.

/// Convert an identifier to CamelCase.
///
/// Word boundaries are underscores only. Each word gets its first character
/// uppercased and keeps the rest unchanged, so embedded case changes are
/// preserved.
///
/// # Examples
///
/// ```
/// use twirp_ruby_codegen::naming::to_camel;
///
/// assert_eq!(to_camel("foo_bar"), "FooBar");
/// assert_eq!(to_camel("myLong_miXEDName"), "MyLongMiXEDName");
/// assert_eq!(to_camel("a_2z"), "A2z");
/// ```
pub fn to_camel(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// Convert an identifier to snake_case.
///
/// Every uppercase letter that does not start the identifier and does not
/// directly follow an underscore opens a new word. All letters are lowercased.
///
/// # Examples
///
/// ```
/// use twirp_ruby_codegen::naming::to_snake;
///
/// assert_eq!(to_snake("FooBar"), "foo_bar");
/// assert_eq!(to_snake("myLong_miXEDName"), "my_long_mi_x_e_d_name");
/// assert_eq!(to_snake("foo_bar"), "foo_bar");
/// ```
pub fn to_snake(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;

    for c in s.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p != '_') {
            result.push('_');
        }
        result.extend(c.to_lowercase());
        prev = Some(c);
    }

    result
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use twirp_ruby_codegen::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize("p99"), "P99");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Strip the final extension from a path, keeping any directories.
///
/// # Examples
///
/// ```
/// use twirp_ruby_codegen::naming::no_extension;
///
/// assert_eq!(no_extension("foo_bar.txt"), "foo_bar");
/// assert_eq!(no_extension("my/filename.txt"), "my/filename");
/// ```
pub fn no_extension(path: &str) -> &str {
    let base_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[base_start..].rfind('.') {
        Some(dot) => &path[..base_start + dot],
        None => path,
    }
}

/// Keep only the last component of a path.
///
/// # Examples
///
/// ```
/// use twirp_ruby_codegen::naming::only_base;
///
/// assert_eq!(only_base("/long/path/stuff/foo_bar.txt"), "foo_bar.txt");
/// assert_eq!(only_base("foo_bar.txt"), "foo_bar.txt");
/// ```
pub fn only_base(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
