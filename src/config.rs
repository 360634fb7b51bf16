use std::path::PathBuf;

/// Server settings. The blog always runs with the defaults.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub address: String,
    /// Directory holding stylesheets and other static files.
    pub public_dir: PathBuf,
    /// URL prefix the static files are served under.
    pub assets_mount: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            address: "localhost:3000".to_string(),
            public_dir: PathBuf::from("public"),
            assets_mount: "/public/".to_string(),
        }
    }
}
