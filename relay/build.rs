fn main() {
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed=RUST_LOG_PRETTY");
    if std::env::var("RUST_LOG_PRETTY").is_ok_and(|x| x == "1") {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
