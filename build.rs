use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=assets/icon.ico");

    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    let mut res = winres::WindowsResource::new();
    res.set("ProductName", "RPS Game + Music Player");
    res.set("FileDescription", "Rock paper scissors and a small music player");
    if Path::new("assets/icon.ico").exists() {
        res.set_icon("assets/icon.ico");
    }
    if let Err(e) = res.compile() {
        println!("cargo:warning=failed to embed windows resources: {e}");
    }
}
