use chrono::Utc;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", Utc::now().format("%Y-%m-%dT%H:%M:%SZ"));
}
