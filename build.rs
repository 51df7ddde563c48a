// build.rs
use cargo_metadata::MetadataCommand;
use std::collections::HashSet;

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");

    // Récupère la metadata du projet
    let metadata = MetadataCommand::new()
        .exec()
        .expect("cargo metadata failed");

    // Ensemble des crates qui nous intéressent
    let tracked = HashSet::from(["glam", "rand", "toml"]);

    for package in &metadata.packages {
        if tracked.contains(package.name.as_str()) {
            println!(
                "cargo:rustc-env={}={}",
                package.name.to_uppercase(),
                package.version
            );
        }
    }
}
