//! scaffold::templates
//!
//! Project template tree, embedded at compile time.
//!
//! Paths are relative to the `templates/` directory and use the on-disk
//! template names (`gitignore`, `_vscode`, `*.tpl`); [`super::plan`] maps them
//! to output paths.

macro_rules! embedded_templates {
    ($($path:literal),* $(,)?) => {
        /// Every template file as `(relative path, contents)`, sorted by path.
        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($path, include_str!(concat!("../../templates/", $path))), )*
        ];
    };
}

embedded_templates! {
    "Makefile",
    "README.md.tpl",
    "_vscode/extensions.json",
    "_vscode/settings.json",
    "docker/cluster.trig",
    "docker/docker-compose.gearshift.yml",
    "docker/docker-compose.yml",
    "gitignore",
    "models/examples/requirements.sysml",
    "models/examples/vehicle.sysml",
    "models/package.sysml",
    "sysml.toml.tpl",
}

/// Look up a template by relative path.
pub fn get(path: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, contents)| *contents)
}
