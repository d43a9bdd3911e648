use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    // OUT_DIR is target/<profile>/build/<pkg>/out; the binary sits three levels up
    let out_dir = env::var("OUT_DIR").unwrap();
    let config_path = Path::new("config.toml");
    let dest_path = Path::new(&out_dir)
        .ancestors()
        .nth(3)
        .unwrap()
        .join("config.toml");

    if config_path.exists() {
        fs::copy(config_path, dest_path).unwrap();
    }
}
