use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// Кладёт config.toml из корня workspace рядом с собранным бинарником
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .ok_or("Could not find workspace root")?;
    let source_config = workspace_root.join("config.toml");
    println!("cargo:rerun-if-changed={}", source_config.display());

    // OUT_DIR: target/<profile>/build/backend-xxx/out
    let profile = env::var("PROFILE")?;
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let target_dir = out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .ok_or("Could not find target profile directory")?;

    if source_config.exists() {
        let dest_config = target_dir.join("config.toml");
        fs::copy(&source_config, &dest_config)?;
        println!("cargo:warning=Copied config.toml to {}", dest_config.display());
    } else {
        println!(
            "cargo:warning=config.toml not found at {}, embedded defaults and environment will be used",
            source_config.display()
        );
    }
    Ok(())
}
