//! Handbook page repository.
//!
//! The repository is a thin view over one flat directory of markdown files.
//! It holds no state beyond the directory path: every call re-reads the
//! file system, so edits show up on the next call and callers never share
//! mutable data.
//!
//! ```text
//! content/handbook/
//! ├── index.md           # slug "" (introduction)
//! ├── ownership.md       # slug "ownership"
//! ├── borrowing.md       # slug "borrowing"
//! └── drafts/            # subdirectories are ignored
//! ```
//!
//! ## Lookups
//!
//! [`ContentRepository::get_page`] resolves a slug by matching it against the
//! slugs derived from the directory listing rather than by joining it onto
//! the directory path. Every slug returned by
//! [`ContentRepository::list_slugs`] therefore resolves, and nothing outside
//! the listing (`../secrets`, `a/b`, `index`) ever does.
//!
//! A missing page is `Ok(None)`, which callers turn into a 404. Unreadable
//! files and broken front matter are errors.
//!
//! The `.md` extension matches in any case, so `a.md` and `a.MD` can both
//! exist on a case-sensitive file system. Two files mapping to one slug make
//! the whole listing fail with [`ContentError::DuplicateSlug`].

use crate::frontmatter::{self, FrontMatterError};
use crate::markdown;
use crate::naming;
use crate::types::{Page, PageMetadata};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Front matter error in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
    #[error("Duplicate slug {slug:?} in {}: {}", dir.display(), format_paths(paths))]
    DuplicateSlug {
        slug: String,
        dir: PathBuf,
        paths: Vec<PathBuf>,
    },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl ContentError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn front_matter(path: &Path, source: FrontMatterError) -> Self {
        Self::FrontMatter {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A content file found in the handbook directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    pub slug: String,
    pub path: PathBuf,
}

/// Read-only access to the handbook directory.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    dir: PathBuf,
}

impl ContentRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All content files, sorted by file name.
    ///
    /// Sorting pins the enumeration order, which is otherwise up to the
    /// platform and would leak into navigation tie-breaks. Fails if two
    /// files share a slug.
    pub fn content_files(&self) -> Result<Vec<ContentFile>, ContentError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| ContentError::io(&self.dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ContentError::io(&self.dir, e))?.path();
            if path.is_file() && naming::is_content_file(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let files: Vec<ContentFile> = paths
            .into_iter()
            .filter_map(|path| naming::slug_from_path(&path).map(|slug| ContentFile { slug, path }))
            .collect();

        let mut seen: BTreeMap<&str, Vec<PathBuf>> = BTreeMap::new();
        for file in &files {
            seen.entry(&file.slug).or_default().push(file.path.clone());
        }
        if let Some((slug, paths)) = seen.into_iter().find(|(_, paths)| paths.len() > 1) {
            return Err(ContentError::DuplicateSlug {
                slug: slug.to_string(),
                dir: self.dir.clone(),
                paths,
            });
        }

        Ok(files)
    }

    /// Every page slug, in file-name order. The introduction is `""`.
    pub fn list_slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.content_files()?.into_iter().map(|f| f.slug).collect())
    }

    /// Find the file backing `slug`, if any.
    pub fn find(&self, slug: &str) -> Result<Option<ContentFile>, ContentError> {
        Ok(self.content_files()?.into_iter().find(|f| f.slug == slug))
    }

    /// Load, parse and render one page. `Ok(None)` when no file matches.
    pub fn get_page(&self, slug: &str) -> Result<Option<Page>, ContentError> {
        let Some(file) = self.find(slug)? else {
            tracing::debug!(slug, "page not found");
            return Ok(None);
        };
        load_page(&file).map(Some)
    }

    /// Load every page, failing on the first unreadable or malformed file.
    pub fn load_all(&self) -> Result<Vec<(ContentFile, Page)>, ContentError> {
        self.content_files()?
            .into_iter()
            .map(|file| load_page(&file).map(|page| (file, page)))
            .collect()
    }
}

/// Parse only the front matter of a content file.
pub fn load_metadata(file: &ContentFile) -> Result<PageMetadata, ContentError> {
    let reader = File::open(&file.path)
        .map(BufReader::new)
        .map_err(|e| ContentError::io(&file.path, e))?;
    let header = frontmatter::read_header(reader).map_err(|e| ContentError::io(&file.path, e))?;
    let (meta, _) = frontmatter::parse(&file.slug, &header)
        .map_err(|e| ContentError::front_matter(&file.path, e))?;
    Ok(meta)
}

/// Read a content file in full and assemble the page.
pub fn load_page(file: &ContentFile) -> Result<Page, ContentError> {
    let text = fs::read_to_string(&file.path).map_err(|e| ContentError::io(&file.path, e))?;
    let (meta, body) = frontmatter::parse(&file.slug, &text)
        .map_err(|e| ContentError::front_matter(&file.path, e))?;
    let rendered = markdown::render(body);
    tracing::debug!(slug = %file.slug, words = rendered.word_count, "loaded page");

    Ok(Page {
        meta,
        content: body.to_string(),
        content_html: rendered.html,
        toc: rendered.toc,
        word_count: rendered.word_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn list_slugs_maps_index_to_empty() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "index.md", "title: Welcome", "Hello");
        write_page(tmp.path(), "closures.md", "title: Closures", "Body");

        let repo = ContentRepository::new(tmp.path());
        assert_eq!(repo.list_slugs().unwrap(), vec!["closures", ""]);
    }

    #[test]
    fn list_slugs_skips_non_markdown_hidden_and_dirs() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "a.md", "", "A");
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        fs::write(tmp.path().join(".hidden.md"), "x").unwrap();
        fs::create_dir_all(tmp.path().join("nested.md")).unwrap();
        write_page(&tmp.path().join("nested.md"), "inner.md", "", "B");

        let repo = ContentRepository::new(tmp.path());
        assert_eq!(repo.list_slugs().unwrap(), vec!["a"]);
    }

    #[test]
    fn every_listed_slug_resolves() {
        let tmp = setup_fixtures();
        let repo = ContentRepository::new(tmp.path().join("handbook"));
        let slugs = repo.list_slugs().unwrap();
        assert!(!slugs.is_empty());
        for slug in slugs {
            let page = repo.get_page(&slug).unwrap();
            assert!(page.is_some(), "slug {slug:?} did not resolve");
            assert_eq!(page.unwrap().meta.slug, slug);
        }
    }

    #[test]
    fn uppercase_extension_resolves() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Shout.MD"), "# Loud").unwrap();
        let repo = ContentRepository::new(tmp.path());
        assert_eq!(repo.list_slugs().unwrap(), vec!["Shout"]);
        assert!(repo.get_page("Shout").unwrap().is_some());
    }

    #[test]
    fn extension_case_variants_are_duplicate_slugs() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.MD"), "---\ntitle: A upper\ncategory: X\n---\n").unwrap();
        write_page(tmp.path(), "a.md", "title: A lower\ncategory: X", "");
        let repo = ContentRepository::new(tmp.path());

        let err = repo.list_slugs().unwrap_err();
        match &err {
            ContentError::DuplicateSlug { slug, paths, .. } => {
                assert_eq!(slug, "a");
                assert_eq!(paths.len(), 2);
            }
            other => panic!("expected DuplicateSlug, got {other:?}"),
        }
        assert!(err.to_string().contains("a.MD"));
        assert!(err.to_string().contains("a.md"));
        assert!(repo.get_page("a").is_err());
        assert!(repo.load_all().is_err());
    }

    #[test]
    fn two_introduction_files_are_rejected() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "index.MD", "title: Upper Intro", "");
        write_page(tmp.path(), "index.md", "title: Lower Intro", "");
        write_page(tmp.path(), "b.md", "title: B", "");
        let repo = ContentRepository::new(tmp.path());

        assert!(matches!(
            repo.list_slugs(),
            Err(ContentError::DuplicateSlug { ref slug, .. }) if slug.is_empty()
        ));
        assert!(repo.get_page("").is_err());
        assert!(crate::navigation::build_navigation(&repo).is_err());
    }

    #[test]
    fn introduction_present_only_with_index_file() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "a.md", "title: A", "A");
        let repo = ContentRepository::new(tmp.path());
        assert!(repo.get_page("").unwrap().is_none());

        write_page(tmp.path(), "index.md", "title: Start here", "Welcome");
        let intro = repo.get_page("").unwrap().unwrap();
        assert_eq!(intro.meta.title, "Start here");
        assert!(intro.meta.is_introduction());
    }

    #[test]
    fn missing_slug_is_none() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "a.md", "", "A");
        let repo = ContentRepository::new(tmp.path());
        assert!(repo.get_page("nonexistent-slug").unwrap().is_none());
    }

    #[test]
    fn path_like_slugs_never_resolve() {
        let tmp = TempDir::new().unwrap();
        let handbook = tmp.path().join("handbook");
        fs::create_dir_all(&handbook).unwrap();
        write_page(&handbook, "index.md", "", "Intro");
        write_page(tmp.path(), "secret.md", "", "Secret");

        let repo = ContentRepository::new(&handbook);
        for slug in ["../secret", "index", "./index", "/etc/passwd", "index.md"] {
            assert!(repo.get_page(slug).unwrap().is_none(), "{slug:?} resolved");
        }
    }

    #[test]
    fn page_carries_body_and_html() {
        let tmp = TempDir::new().unwrap();
        write_page(
            tmp.path(),
            "traits.md",
            "title: Traits\ncategory: Fundamentals\nkeywords: [rust]",
            "## Definition\n\nA **trait** names behaviour.",
        );
        let repo = ContentRepository::new(tmp.path());
        let page = repo.get_page("traits").unwrap().unwrap();

        assert_eq!(page.meta.title, "Traits");
        assert_eq!(page.meta.category.as_deref(), Some("Fundamentals"));
        assert!(page.content.starts_with("## Definition"));
        assert!(!page.content.contains("title:"));
        assert!(page.content_html.contains("<strong>trait</strong>"));
        assert_eq!(page.toc.len(), 1);
        assert_eq!(page.toc[0].id, "definition");
    }

    #[test]
    fn broken_front_matter_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.md"), "---\ntitle: [oops\n---\nbody").unwrap();
        write_page(tmp.path(), "good.md", "title: Good", "fine");

        let repo = ContentRepository::new(tmp.path());
        let err = repo.get_page("bad").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
        assert!(err.to_string().contains("bad.md"));
        assert!(repo.get_page("good").unwrap().is_some());
    }

    #[test]
    fn load_all_surfaces_first_error() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "a.md", "title: A", "A");
        write_page(tmp.path(), "b.md", "title: B", "B");
        let repo = ContentRepository::new(tmp.path());

        let loaded = repo.load_all().unwrap();
        let titles: Vec<&str> = loaded.iter().map(|(_, p)| p.meta.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);

        fs::write(tmp.path().join("c.md"), "---\norder: [1\n---\n").unwrap();
        assert!(repo.load_all().is_err());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let repo = ContentRepository::new(tmp.path().join("nope"));
        assert!(matches!(repo.list_slugs(), Err(ContentError::Io { .. })));
    }

    #[test]
    fn load_metadata_ignores_body() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "a.md", "title: A\norder: 3", "# Body\n\nlong text");
        let repo = ContentRepository::new(tmp.path());
        let file = repo.find("a").unwrap().unwrap();
        let meta = load_metadata(&file).unwrap();
        assert_eq!(meta.title, "A");
        assert_eq!(meta.order, 3);
    }
}
