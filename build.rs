fn main() {
    // Embedded configuration and detail text
    println!("cargo:rerun-if-changed=default_explorer_config.ron");
    println!("cargo:rerun-if-changed=component_details.ron");

    // Rebuild if the sphere shader changes
    println!("cargo:rerun-if-changed=shaders/sphere.wgsl");

    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") else {
            return;
        };
        let icon_path = std::path::Path::new(&manifest_dir).join("assets").join("icon.ico");

        let mut res = winres::WindowsResource::new();
        if let Some(icon) = icon_path.to_str().filter(|_| icon_path.exists()) {
            res.set_icon(icon);
        }
        if let Err(e) = res.compile() {
            println!("cargo:warning=failed to embed Windows resources: {e}");
        }
    }
}
