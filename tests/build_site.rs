//! End-to-end tests: run the `folio` binary against a copy of the fixture
//! content and inspect what it writes and prints.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn fixture_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn folio(args: &[&str], source: &Path, output: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(args)
        .arg("--source")
        .arg(source)
        .arg("--output")
        .arg(output)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(out: &Output) -> String {
    assert!(
        out.status.success(),
        "folio failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn build_writes_site_tree() {
    let content = fixture_content();
    let dist = TempDir::new().unwrap();

    let printed = stdout(&folio(&["build", "--offline"], content.path(), dist.path()));
    assert!(printed.contains("Home \u{2192} index.html"));
    assert!(printed.contains("Generated 7 handbook pages, 2 categories (1 unlisted)"));

    for file in [
        "index.html",
        "404.html",
        "sitemap.xml",
        "robots.txt",
        "handbook/index.html",
        "handbook/ownership/index.html",
        "handbook/tokio/index.html",
        "handbook/scratchpad/index.html",
    ] {
        assert!(dist.path().join(file).is_file(), "missing {file}");
    }
    assert!(!dist.path().join("handbook/unfinished/index.html").exists());

    let sitemap = std::fs::read_to_string(dist.path().join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>https://jane.example.dev/handbook/serde/</loc>"));
}

#[test]
fn build_falls_back_when_remote_is_unreachable() {
    let content = fixture_content();
    let dist = TempDir::new().unwrap();
    let config_path = content.path().join("config.toml");
    let mut config = std::fs::read_to_string(&config_path).unwrap();
    config.push_str("\n[remote]\nurl = \"http://127.0.0.1:9/personal.json\"\ntimeout_secs = 2\n");
    std::fs::write(&config_path, config).unwrap();

    let printed = stdout(&folio(&["build"], content.path(), dist.path()));
    assert!(printed.contains("Fetching personal info"));

    let home = std::fs::read_to_string(dist.path().join("index.html")).unwrap();
    assert!(home.contains("<h1>Jane Doe</h1>"));
    assert!(home.contains("Systems Engineer"));
}

#[test]
fn check_prints_navigation_tree() {
    let content = fixture_content();
    let dist = TempDir::new().unwrap();

    let printed = stdout(&folio(&["check"], content.path(), dist.path()));
    assert!(printed.contains("001 Fundamentals (3 pages)"));
    assert!(printed.contains("002 Frameworks & Libraries (2 pages)"));
    assert!(printed.contains("Unlisted"));
    assert!(printed.contains("Checked 7 pages, 2 categories"));
    assert!(!dist.path().join("index.html").exists());
}

#[test]
fn check_fails_on_broken_front_matter() {
    let content = fixture_content();
    let dist = TempDir::new().unwrap();
    std::fs::write(
        content.path().join("handbook/broken.md"),
        "---\ntitle: [unclosed\n---\nbody\n",
    )
    .unwrap();

    let out = folio(&["check"], content.path(), dist.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("broken.md"));
}

#[test]
fn nav_prints_json() {
    let content = fixture_content();
    let dist = TempDir::new().unwrap();

    let printed = stdout(&folio(&["nav"], content.path(), dist.path()));
    let json: serde_json::Value = serde_json::from_str(&printed).unwrap();
    assert_eq!(
        json["order"],
        serde_json::json!(["", "ownership", "borrowing", "lifetimes", "serde", "tokio"])
    );
    assert_eq!(json["navigation"]["categories"][0]["slug"], "fundamentals");
    assert_eq!(json["navigation"]["introduction"]["title"], "Welcome to the Rust Handbook");
}

#[test]
fn gen_config_round_trips() {
    let content = TempDir::new().unwrap();
    let dist = TempDir::new().unwrap();

    let printed = stdout(&folio(&["gen-config"], content.path(), dist.path()));
    std::fs::write(content.path().join("config.toml"), &printed).unwrap();
    std::fs::create_dir_all(content.path().join("handbook")).unwrap();

    let out = folio(&["check"], content.path(), dist.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn invalid_config_is_reported() {
    let content = fixture_content();
    let dist = TempDir::new().unwrap();
    std::fs::write(content.path().join("config.toml"), "[site]\nurll = \"x\"\n").unwrap();

    let out = folio(&["build", "--offline"], content.path(), dist.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("urll"));
}
