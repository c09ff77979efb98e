use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Program text and the name diagnostics should show for it.
pub struct LoadedSource {
    pub name: String,
    pub text: String,
}

pub fn load_source(path: &Path) -> Result<LoadedSource, String> {
    if path.as_os_str() == "-" {
        return load_stdin();
    }
    load_file(path)
}

fn load_stdin() -> Result<LoadedSource, String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(LoadedSource {
        name: "<stdin>".to_string(),
        text,
    })
}

fn load_file(path: &Path) -> Result<LoadedSource, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    Ok(LoadedSource {
        name: path.to_string_lossy().into_owned(),
        text,
    })
}
