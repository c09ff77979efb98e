//! Lazy, cached lookup of content stored one file per name.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{ContentError, Result};

/// A folder of `<name>.<ext>` files, each parsed on first request.
///
/// A name with no backing file yields `Ok(None)`; a file that exists but
/// cannot be read or parsed is an error. Parsed values are cached in load order.
#[derive(Debug)]
pub struct Catalog<T> {
    folder: PathBuf,
    extension: &'static str,
    cache: RefCell<IndexMap<String, Rc<T>>>,
}

impl<T> Catalog<T> {
    pub fn open(folder: impl Into<PathBuf>, extension: &'static str) -> Result<Self> {
        let folder = folder.into();
        if !folder.is_dir() {
            return Err(ContentError::NotADirectory(folder));
        }
        Ok(Self {
            folder,
            extension,
            cache: RefCell::new(IndexMap::new()),
        })
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.folder.join(format!("{name}.{}", self.extension))
    }

    /// Look up `name`, parsing its file with `parse(path, text)` on first use.
    pub fn get_or_load(
        &self,
        name: &str,
        parse: impl FnOnce(&Path, &str) -> Result<T>,
    ) -> Result<Option<Rc<T>>> {
        if let Some(cached) = self.cache.borrow().get(name) {
            return Ok(Some(Rc::clone(cached)));
        }

        let path = self.path_of(name);
        if !path.is_file() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(&path).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;
        // The cache borrow is released while parsing: loaders may consult other catalogs.
        let value = Rc::new(parse(&path, &text)?);
        self.cache
            .borrow_mut()
            .insert(name.to_string(), Rc::clone(&value));
        Ok(Some(value))
    }
}

/// Registry name of a content file: its stem, `std` for `std.json`.
pub(crate) fn parent_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse a JSON file body, attributing failures to `path`.
pub(crate) fn parse_json<'de, R: serde::Deserialize<'de>>(path: &Path, text: &'de str) -> Result<R> {
    serde_json::from_str(text).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })
}
