//! Build-constraint file selection.
//!
//! Decides which `.go` files of a directory belong to the build for a given
//! GOOS/GOARCH and tag set: file-name rules, `_GOOS`/`_GOARCH` suffixes, and
//! `//go:build` or legacy `// +build` lines.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// The platform and tags files are selected for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTarget {
    pub goos: String,
    pub goarch: String,
    pub tags: Vec<String>,
    pub cgo: bool,
}

impl Default for BuildTarget {
    /// The host platform, in Go's naming.
    fn default() -> Self {
        let goos = match std::env::consts::OS {
            "macos" => "darwin",
            other => other,
        };
        let goarch = match std::env::consts::ARCH {
            "x86_64" => "amd64",
            "x86" => "386",
            "aarch64" => "arm64",
            "powerpc64" => "ppc64",
            "loongarch64" => "loong64",
            other => other,
        };
        Self::new(goos, goarch)
    }
}

impl BuildTarget {
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
            tags: Vec::new(),
            cgo: true,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Whether a single build tag holds for this target.
    pub fn satisfies(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch || self.tags.iter().any(|t| t == tag) {
            return true;
        }
        match tag {
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "gc" => true,
            "cgo" => self.cgo,
            "linux" => self.goos == "android",
            "solaris" => self.goos == "illumos",
            "darwin" => self.goos == "ios",
            _ => tag
                .strip_prefix("go1.")
                .is_some_and(|minor| !minor.is_empty() && minor.chars().all(|c| c.is_ascii_digit())),
        }
    }

    /// File-name rules only: `.go`, not a test, not hidden, matching suffixes.
    pub fn matches_file_name(&self, name: &str) -> bool {
        let Some(stem) = name.strip_suffix(".go") else {
            return false;
        };
        if stem.ends_with("_test") || name.starts_with('_') || name.starts_with('.') {
            return false;
        }
        let Some(idx) = stem.find('_') else {
            return true;
        };
        let parts: Vec<&str> = stem[idx + 1..].split('_').collect();
        let n = parts.len();
        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.satisfies(parts[n - 2]) && self.satisfies(parts[n - 1]);
        }
        let last = parts[n - 1];
        if KNOWN_OS.contains(&last) || KNOWN_ARCH.contains(&last) {
            return self.satisfies(last);
        }
        true
    }

    /// Full selection: name rules plus the constraint lines in the file header.
    pub fn matches(&self, name: &str, source: &str) -> Result<bool, ParseError> {
        if !self.matches_file_name(name) {
            return Ok(false);
        }
        self.matches_constraints(name, source)
    }

    /// Evaluate the `//go:build` line, or the `// +build` lines when absent.
    pub fn matches_constraints(&self, path: &str, source: &str) -> Result<bool, ParseError> {
        let mut go_build = None;
        let mut plus_build = Vec::new();

        let mut in_block = false;
        for line in source.lines() {
            let mut line = line.trim();
            if in_block {
                match line.find("*/") {
                    Some(end) => {
                        in_block = false;
                        line = line[end + 2..].trim();
                    }
                    None => continue,
                }
            }
            while let Some(rest) = line.strip_prefix("/*") {
                match rest.find("*/") {
                    Some(end) => line = rest[end + 2..].trim(),
                    None => {
                        in_block = true;
                        line = "";
                    }
                }
            }
            if line.is_empty() {
                continue;
            }
            let Some(comment) = line.strip_prefix("//") else {
                break;
            };
            if let Some(expr) = comment.strip_prefix("go:build") {
                go_build = Some(expr.trim().to_string());
            } else if let Some(expr) = comment.trim_start().strip_prefix("+build") {
                plus_build.push(expr.trim().to_string());
            }
        }

        if let Some(expr) = go_build {
            return evaluate(&expr, &|tag| self.satisfies(tag)).ok_or_else(|| {
                ParseError::Constraint {
                    path: path.to_string(),
                    expr,
                }
            });
        }

        Ok(plus_build.iter().all(|line| self.plus_build_line(line)))
    }

    /// A `// +build` line: space-separated options ORed, comma-separated terms ANDed.
    fn plus_build_line(&self, line: &str) -> bool {
        line.split_whitespace().any(|option| {
            option.split(',').all(|term| match term.strip_prefix('!') {
                Some(tag) => !self.satisfies(tag),
                None => self.satisfies(term),
            })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Not,
    And,
    Or,
    Open,
    Close,
    Tag(&'a str),
}

fn tokenize(expr: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let bytes = expr.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b' ' | b'\t' => i += 1,
            b'!' => {
                tokens.push(Token::Not);
                i += 1;
            }
            b'(' => {
                tokens.push(Token::Open);
                i += 1;
            }
            b')' => {
                tokens.push(Token::Close);
                i += 1;
            }
            b'&' if bytes.get(i + 1) == Some(&b'&') => {
                tokens.push(Token::And);
                i += 2;
            }
            b'|' if bytes.get(i + 1) == Some(&b'|') => {
                tokens.push(Token::Or);
                i += 2;
            }
            c if c.is_ascii_alphanumeric() || c == b'_' || c == b'.' => {
                let start = i;
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.')
                {
                    i += 1;
                }
                tokens.push(Token::Tag(&expr[start..i]));
            }
            _ => return None,
        }
    }
    Some(tokens)
}

/// Evaluate a `//go:build` expression. `None` when malformed.
fn evaluate(expr: &str, satisfies: &dyn Fn(&str) -> bool) -> Option<bool> {
    let tokens = tokenize(expr)?;
    let mut parser = ExprParser {
        tokens: &tokens,
        pos: 0,
        satisfies,
    };
    let value = parser.or()?;
    (parser.pos == tokens.len()).then_some(value)
}

struct ExprParser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    satisfies: &'t dyn Fn(&str) -> bool,
}

impl ExprParser<'_, '_> {
    fn peek(&self) -> Option<&Token<'_>> {
        self.tokens.get(self.pos)
    }

    fn or(&mut self) -> Option<bool> {
        let mut value = self.and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let rhs = self.and()?;
            value = value || rhs;
        }
        Some(value)
    }

    fn and(&mut self) -> Option<bool> {
        let mut value = self.not()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let rhs = self.not()?;
            value = value && rhs;
        }
        Some(value)
    }

    fn not(&mut self) -> Option<bool> {
        if self.peek() == Some(&Token::Not) {
            self.pos += 1;
            return self.not().map(|v| !v);
        }
        self.atom()
    }

    fn atom(&mut self) -> Option<bool> {
        let token = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        match token {
            Token::Open => {
                let value = self.or()?;
                if self.peek() != Some(&Token::Close) {
                    return None;
                }
                self.pos += 1;
                Some(value)
            }
            Token::Tag(tag) => Some((self.satisfies)(tag)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux() -> BuildTarget {
        BuildTarget::new("linux", "amd64")
    }

    #[test]
    fn test_file_name_rules() {
        let t = linux();
        assert!(t.matches_file_name("client.go"));
        assert!(!t.matches_file_name("client_test.go"));
        assert!(!t.matches_file_name("_client.go"));
        assert!(!t.matches_file_name(".client.go"));
        assert!(!t.matches_file_name("client.c"));
        assert!(t.matches_file_name("poll_linux.go"));
        assert!(!t.matches_file_name("poll_windows.go"));
        assert!(t.matches_file_name("poll_linux_amd64.go"));
        assert!(!t.matches_file_name("poll_linux_arm64.go"));
        assert!(!t.matches_file_name("asm_386.go"));
        assert!(t.matches_file_name("linux.go"));
        assert!(t.matches_file_name("my_helper.go"));
    }

    #[test]
    fn test_android_satisfies_linux() {
        let t = BuildTarget::new("android", "arm64");
        assert!(t.matches_file_name("poll_linux.go"));
        assert!(t.satisfies("unix"));
    }

    #[test]
    fn test_go_build_expression() {
        let t = linux();
        let src = |expr: &str| format!("//go:build {}\n\npackage p\n", expr);
        assert!(t.matches_constraints("a.go", &src("linux && amd64")).unwrap());
        assert!(!t.matches_constraints("a.go", &src("!linux")).unwrap());
        assert!(t.matches_constraints("a.go", &src("(darwin || linux) && !windows")).unwrap());
        assert!(t.matches_constraints("a.go", &src("unix && go1.21")).unwrap());
        assert!(!t.matches_constraints("a.go", &src("ignore")).unwrap());
        assert!(t.matches_constraints("a.go", &src("linux && (")).is_err());
    }

    #[test]
    fn test_go_build_takes_precedence() {
        let t = linux();
        let src = "//go:build linux\n// +build windows\n\npackage p\n";
        assert!(t.matches_constraints("a.go", src).unwrap());
    }

    #[test]
    fn test_plus_build_lines() {
        let t = linux();
        assert!(t
            .matches_constraints("a.go", "// +build linux,amd64 darwin\n\npackage p\n")
            .unwrap());
        assert!(!t
            .matches_constraints("a.go", "// +build linux\n// +build !amd64\n\npackage p\n")
            .unwrap());
    }

    #[test]
    fn test_constraints_after_package_ignored() {
        let t = linux();
        let src = "package p\n\n//go:build windows\n";
        assert!(t.matches_constraints("a.go", src).unwrap());
    }

    #[test]
    fn test_block_comment_header_skipped() {
        let t = linux();
        let license = "/*\nCopyright 2024 The Authors.\n*/\n\n//go:build windows\n\npackage p\n";
        assert!(!t.matches_constraints("a.go", license).unwrap());

        let inline = "/* generated */ /* twice */\n// +build windows\n\npackage p\n";
        assert!(!t.matches_constraints("a.go", inline).unwrap());

        let trailing = "/* header\n   continues */ package p\n\n//go:build windows\n";
        assert!(t.matches_constraints("a.go", trailing).unwrap());
    }

    #[test]
    fn test_custom_tags() {
        let t = linux().with_tags(["integration"]);
        assert!(t
            .matches("db.go", "//go:build integration\n\npackage p\n")
            .unwrap());
        assert!(!linux()
            .matches("db.go", "//go:build integration\n\npackage p\n")
            .unwrap());
    }
}
