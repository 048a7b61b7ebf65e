pub fn version_string() -> String {
    format!("codebase-switcher v{}", env!("CARGO_PKG_VERSION"))
}

pub fn execute_version() {
    println!("{}", version_string());
}
