//! Content fixtures shared by the compiler tests.

use std::fs;
use std::path::{Path, PathBuf};

use bytelang_core::Content;
use tempfile::TempDir;

use crate::compiler::{ByteLangCompiler, CompileResult, LogFlags};

/// The reference target description shipped with the repository.
pub fn shipped_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../content")
}

pub fn shipped_content() -> Content {
    Content::open(shipped_root()).unwrap()
}

/// A throw-away content root: the shipped primitives, the `vart` package
/// and a few extra profiles, packages and environments for edge cases.
///
/// - `vart_esp32`: the shipped environment
/// - `vart_mem`: `vart` plus pointer-taking instructions (`mem`)
/// - `vart_tiny`: `vart` on a profile limited to 8 bytes
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let shipped = shipped_root();
        for sub in ["profiles", "packages", "env"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        for file in ["std.json", "profiles/esp32.json", "packages/vart.blp", "env/vart_esp32.json"] {
            fs::copy(shipped.join(file), dir.path().join(file)).unwrap();
        }

        let fixture = Self { dir };
        fixture.write(
            "profiles/tiny.json",
            r#"{ "prog_len": 8, "ptr_prog": 2, "ptr_heap": 2, "ptr_inst": 1 }"#,
        );
        fixture.write(
            "packages/mem.blp",
            "speed_from u8*\ndelay_from u16*\nmove_from i16* i16*\n",
        );
        fixture.write(
            "env/vart_mem.json",
            r#"{ "profile": "esp32", "packages": ["vart", "mem"] }"#,
        );
        fixture.write(
            "env/vart_tiny.json",
            r#"{ "profile": "tiny", "packages": ["vart"] }"#,
        );
        fixture
    }

    pub fn write(&self, path: &str, body: &str) {
        fs::write(self.dir.path().join(path), body).unwrap();
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn content(&self) -> Content {
        Content::open(self.root()).unwrap()
    }

    pub fn compiler(&self) -> ByteLangCompiler {
        ByteLangCompiler::new(self.content())
    }

    /// Compile `source`; returns the result and what reached the sink.
    pub fn compile(&self, source: &str) -> (CompileResult, Vec<u8>) {
        let mut out = Vec::new();
        let result = self
            .compiler()
            .compile(source, &mut out, LogFlags::NONE)
            .unwrap();
        (result, out)
    }

    /// Bytes of a program expected to compile.
    pub fn bytecode(&self, source: &str) -> Vec<u8> {
        let (result, out) = self.compile(source);
        assert!(result.is_ok(), "{}", result.message());
        out
    }

    /// Plain diagnostics of a program expected to fail.
    pub fn errors(&self, source: &str) -> String {
        let (result, out) = self.compile(source);
        assert!(!result.is_ok(), "expected a failure");
        assert!(out.is_empty(), "failed compile wrote to the sink");
        result.diagnostics().unwrap().render()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Bytes as space separated hex pairs.
pub fn hex(bytes: &[u8]) -> String {
    let pairs: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
    pairs.join(" ")
}

/// Compile with the fixture and compare the bytes as hex pairs.
#[macro_export]
macro_rules! shot_bytes {
    ($source:literal, @$snapshot:literal) => {{
        let bytes = $crate::test_utils::Fixture::new().bytecode(indoc::indoc!($source));
        insta::assert_snapshot!($crate::test_utils::hex(&bytes), @$snapshot);
    }};
}

/// Compile with the fixture and compare the rendered diagnostics.
#[macro_export]
macro_rules! shot_errors {
    ($source:literal, @$snapshot:literal) => {{
        let errors = $crate::test_utils::Fixture::new().errors(indoc::indoc!($source));
        insta::assert_snapshot!(errors, @$snapshot);
    }};
}
