// README-to-rustdoc step shared by every crate's build.rs:
//     include!("../build_common.rs");
// The including file imports `std::env`, `std::fs` and `std::path::Path`.

/// Write `OUT_DIR/README_GENERATED.md` from the crate's README.md.
///
/// Links into `src/` become module links. Links to the workspace README or
/// to a sibling crate (`../voicestream-core`) point at the repository. Without a
/// README the page is just the package name, so `include_str!` always finds
/// a file.
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");
    println!("cargo:rerun-if-changed=../../Cargo.toml");

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let dest = Path::new(&out_dir).join("README_GENERATED.md");

    let page = match fs::read_to_string(Path::new(crate_dir).join("README.md")) {
        Ok(readme) => rewrite_links(&readme, workspace_repository(crate_dir).as_deref()),
        Err(_) => format!(
            "# {}\n",
            env::var("CARGO_PKG_NAME").unwrap_or_else(|_| "crate".to_string())
        ),
    };

    fs::write(dest, page).expect("README_GENERATED.md is writable");
}

fn rewrite_links(readme: &str, repository: Option<&str>) -> String {
    let mut page = readme.replace("](src/", "](").replace(".rs)", ")");
    if let Some(repo) = repository {
        page = page
            .replace("](../../README.md", &format!("]({repo}"))
            .replace("](../", &format!("]({repo}/tree/main/crates/"));
    }
    page
}

/// `repository = "..."` from the workspace manifest, if present.
fn workspace_repository(crate_dir: &str) -> Option<String> {
    let manifest = Path::new(crate_dir).parent()?.parent()?.join("Cargo.toml");
    let content = fs::read_to_string(manifest).ok()?;

    content.lines().map(str::trim).find_map(|line| {
        let value = line.strip_prefix("repository")?.trim_start().strip_prefix('=')?;
        Some(value.trim().trim_matches('"').to_string())
    })
}
