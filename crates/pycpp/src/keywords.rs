//! Target-language reserved words.
//!
//! Two dialects are enforced: the narrow dialect rejects C keywords only,
//! the full dialect rejects every C and C++ keyword. Identifiers coming from
//! the source program are checked against the configured dialect before they
//! become IR identifiers.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

/// Which keyword set identifiers are checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// C keywords.
    Narrow,
    /// C and C++ keywords.
    #[default]
    Full,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Narrow => write!(f, "narrow"),
            Dialect::Full => write!(f, "full"),
        }
    }
}

/// C keywords.
pub const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "int", "long", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while",
];

/// C++ keywords, including the alternative operator spellings and the
/// transactional-memory and reflection TS keywords.
pub const CPP_KEYWORDS: &[&str] = &[
    "alignas",
    "alignof",
    "and",
    "and_eq",
    "asm",
    "atomic_cancel",
    "atomic_commit",
    "atomic_noexcept",
    "auto",
    "bitand",
    "bitor",
    "bool",
    "break",
    "case",
    "catch",
    "char",
    "char8_t",
    "char16_t",
    "char32_t",
    "class",
    "co_await",
    "co_return",
    "co_yield",
    "compl",
    "concept",
    "const",
    "const_cast",
    "consteval",
    "constexpr",
    "constinit",
    "continue",
    "decltype",
    "default",
    "delete",
    "do",
    "double",
    "dynamic_cast",
    "else",
    "enum",
    "explicit",
    "export",
    "extern",
    "false",
    "float",
    "for",
    "friend",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "mutable",
    "namespace",
    "new",
    "noexcept",
    "not",
    "not_eq",
    "nullptr",
    "operator",
    "or",
    "or_eq",
    "private",
    "protected",
    "public",
    "reflexpr",
    "register",
    "reinterpret_cast",
    "requires",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "static_assert",
    "static_cast",
    "struct",
    "switch",
    "synchronized",
    "template",
    "this",
    "thread_local",
    "throw",
    "true",
    "try",
    "typedef",
    "typeid",
    "typename",
    "union",
    "unsigned",
    "using",
    "virtual",
    "void",
    "volatile",
    "wchar_t",
    "while",
    "xor",
    "xor_eq",
];

static NARROW: Lazy<HashSet<&'static str>> = Lazy::new(|| C_KEYWORDS.iter().copied().collect());

static FULL: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    C_KEYWORDS
        .iter()
        .chain(CPP_KEYWORDS.iter())
        .copied()
        .collect()
});

/// Returns true if `name` is a keyword of the given dialect.
pub fn is_reserved(name: &str, dialect: Dialect) -> bool {
    match dialect {
        Dialect::Narrow => NARROW.contains(name),
        Dialect::Full => FULL.contains(name),
    }
}
