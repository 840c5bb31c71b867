//! Directory layout and resolved build paths.
//!
//! `DirMap` is the relative layout (what a project file can override) and
//! `PathRegistry` is that layout resolved against a project root. Resolution
//! is pure string manipulation (no filesystem I/O).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Relative directory layout for every target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirMap {
    #[serde(default)]
    pub output: OutputDirs,
    #[serde(default)]
    pub client: ClientDirs,
    #[serde(default)]
    pub server: ServerDirs,
    #[serde(default)]
    pub shared: SharedDirs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDirs {
    #[serde(default = "default_output_root")]
    pub root: String,
}

impl Default for OutputDirs {
    fn default() -> Self {
        Self {
            root: default_output_root(),
        }
    }
}

fn default_output_root() -> String {
    "dist".to_string()
}

fn default_sources() -> String {
    "src".to_string()
}

fn default_tsconfig() -> String {
    "tsconfig.json".to_string()
}

fn default_public_path() -> String {
    "/".to_string()
}

/// Html page generation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlOptions {
    /// For example `assets/index.html`. Empty disables html generation.
    #[serde(default)]
    pub template: String,
    #[serde(default = "default_html_filename")]
    pub filename: String,
    #[serde(default)]
    pub title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            template: String::new(),
            filename: default_html_filename(),
            title: String::new(),
        }
    }
}

fn default_html_filename() -> String {
    "index.html".to_string()
}

/// Asset manifest options. Empty `file_name` disables the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetManifestOptions {
    #[serde(default)]
    pub file_name: String,
    #[serde(default = "empty_object")]
    pub filter_template: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Service worker options. Empty `sw_dest` disables the worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWorkerOptions {
    #[serde(default)]
    pub sw_dest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOutputDirs {
    pub root: String,
    #[serde(default = "default_js_dir")]
    pub js: String,
    #[serde(default = "default_styles_dir")]
    pub styles: String,
    #[serde(default = "default_assets_dir")]
    pub assets: String,
    #[serde(default = "default_external_dir")]
    pub external: String,
    #[serde(default = "default_public_path")]
    pub public_path: String,
    #[serde(default)]
    pub asset_manifest: AssetManifestOptions,
    #[serde(default)]
    pub sw: ServiceWorkerOptions,
}

fn default_js_dir() -> String {
    "js".to_string()
}

fn default_styles_dir() -> String {
    "styles".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_external_dir() -> String {
    "lib".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDirs {
    pub root: String,
    #[serde(default = "default_sources")]
    pub sources: String,
    #[serde(default = "default_client_assets")]
    pub assets: String,
    #[serde(default = "default_static_content")]
    pub static_content: Vec<String>,
    #[serde(default)]
    pub html: HtmlOptions,
    #[serde(default = "default_tsconfig")]
    pub tsconfig: String,
    pub output: ClientOutputDirs,
}

fn default_client_assets() -> String {
    "src/assets".to_string()
}

fn default_static_content() -> Vec<String> {
    vec!["public".to_string()]
}

impl ClientDirs {
    /// Default client layout rooted at `root`.
    pub fn with_root(root: &str) -> Self {
        Self {
            root: root.to_string(),
            sources: default_sources(),
            assets: default_client_assets(),
            static_content: default_static_content(),
            html: HtmlOptions::default(),
            tsconfig: default_tsconfig(),
            output: ClientOutputDirs {
                root: root.to_string(),
                js: default_js_dir(),
                styles: default_styles_dir(),
                assets: default_assets_dir(),
                external: default_external_dir(),
                public_path: default_public_path(),
                asset_manifest: AssetManifestOptions::default(),
                sw: ServiceWorkerOptions::default(),
            },
        }
    }
}

impl Default for ClientDirs {
    fn default() -> Self {
        Self::with_root("client")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerOutputDirs {
    pub root: String,
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDirs {
    pub root: String,
    #[serde(default = "default_sources")]
    pub sources: String,
    #[serde(default = "default_tsconfig")]
    pub tsconfig: String,
    pub output: ServerOutputDirs,
}

impl ServerDirs {
    pub fn with_root(root: &str) -> Self {
        Self {
            root: root.to_string(),
            sources: default_sources(),
            tsconfig: default_tsconfig(),
            output: ServerOutputDirs {
                root: root.to_string(),
                public_path: default_public_path(),
            },
        }
    }
}

impl Default for ServerDirs {
    fn default() -> Self {
        Self::with_root("server")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedDirs {
    pub root: String,
    #[serde(default = "default_sources")]
    pub sources: String,
    #[serde(default = "default_tsconfig")]
    pub tsconfig: String,
}

impl SharedDirs {
    pub fn with_root(root: &str) -> Self {
        Self {
            root: root.to_string(),
            sources: default_sources(),
            tsconfig: default_tsconfig(),
        }
    }
}

impl Default for SharedDirs {
    fn default() -> Self {
        Self::with_root("shared")
    }
}

/// Resolved output location of a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPaths {
    pub path: String,
    pub public_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPaths {
    pub root: String,
    pub sources: String,
    pub assets: String,
    pub static_content: Vec<String>,
    pub tsconfig: String,
    pub output: OutputPaths,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPaths {
    pub root: String,
    pub sources: String,
    pub tsconfig: String,
    pub output: OutputPaths,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedPaths {
    pub root: String,
    pub sources: String,
    pub tsconfig: String,
}

/// Absolute paths for one build, resolved from a `DirMap`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRegistry {
    pub root: String,
    pub node_modules: String,
    pub output: String,
    pub client: ClientPaths,
    pub server: ServerPaths,
    pub shared: SharedPaths,
    /// The relative layout these paths were resolved from.
    pub dirs: DirMap,
}

impl PathRegistry {
    /// Resolve `dirs` against `project_root`.
    ///
    /// A relative project root is taken relative to the current working
    /// directory.
    pub fn resolve(project_root: &Path, dirs: &DirMap) -> Self {
        let root = resolve_root(project_root);
        let output = join(&root, &dirs.output.root);

        let client_root = join(&root, &dirs.client.root);
        let client = ClientPaths {
            sources: join(&client_root, &dirs.client.sources),
            assets: join(&client_root, &dirs.client.assets),
            static_content: dirs
                .client
                .static_content
                .iter()
                .map(|dir| join(&client_root, dir))
                .collect(),
            tsconfig: join(&client_root, &dirs.client.tsconfig),
            output: OutputPaths {
                path: join(&output, &dirs.client.output.root),
                public_path: dirs.client.output.public_path.clone(),
            },
            root: client_root,
        };

        let server_root = join(&root, &dirs.server.root);
        let server = ServerPaths {
            sources: join(&server_root, &dirs.server.sources),
            tsconfig: join(&server_root, &dirs.server.tsconfig),
            output: OutputPaths {
                path: join(&output, &dirs.server.output.root),
                public_path: dirs.server.output.public_path.clone(),
            },
            root: server_root,
        };

        let shared_root = join(&root, &dirs.shared.root);
        let shared = SharedPaths {
            sources: join(&shared_root, &dirs.shared.sources),
            tsconfig: join(&shared_root, &dirs.shared.tsconfig),
            root: shared_root,
        };

        Self {
            node_modules: join(&root, "node_modules"),
            output,
            client,
            server,
            shared,
            dirs: dirs.clone(),
            root,
        }
    }
}

/// Resolve the project root to an absolute canonical string.
fn resolve_root(root: &Path) -> String {
    let root_path = if root.as_os_str().is_empty() || root == Path::new(".") {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    } else if root.is_absolute() {
        root.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(root)
    };

    let normalized = normalize_path_components(&root_path);
    path_to_forward_slashes(&normalized)
}

/// Join `rel` onto `base` unless it is already absolute, then normalize.
fn join(base: &str, rel: &str) -> String {
    let path = Path::new(rel);
    let full = if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(base).join(path)
    };
    path_to_forward_slashes(&normalize_path_components(&full))
}

/// Normalize path components without requiring the file to exist.
/// Handles `.` and `..` components.
fn normalize_path_components(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => components.push(Component::Prefix(p)),
            Component::RootDir => components.push(Component::RootDir),
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                } else {
                    // Can't go up from root, keep the component
                    components.push(Component::ParentDir);
                }
            }
            Component::Normal(name) => components.push(Component::Normal(name)),
        }
    }

    components.iter().collect()
}

/// Convert path to string using forward slashes.
fn path_to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_resolve_defaults() {
        let paths = PathRegistry::resolve(Path::new("/app"), &DirMap::default());
        assert_eq!(paths.root, "/app");
        assert_eq!(paths.node_modules, "/app/node_modules");
        assert_eq!(paths.output, "/app/dist");
        assert_eq!(paths.client.sources, "/app/client/src");
        assert_eq!(paths.client.assets, "/app/client/src/assets");
        assert_eq!(paths.client.static_content, vec!["/app/client/public"]);
        assert_eq!(paths.client.output.path, "/app/dist/client");
        assert_eq!(paths.client.output.public_path, "/");
        assert_eq!(paths.server.sources, "/app/server/src");
        assert_eq!(paths.server.output.path, "/app/dist/server");
        assert_eq!(paths.shared.sources, "/app/shared/src");
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_with_overrides() {
        let mut dirs = DirMap::default();
        dirs.output.root = "build".to_string();
        dirs.client = ClientDirs::with_root("web");
        dirs.shared.sources = "./lib/../common".to_string();

        let paths = PathRegistry::resolve(Path::new("/app/"), &dirs);
        assert_eq!(paths.client.sources, "/app/web/src");
        assert_eq!(paths.client.output.path, "/app/build/web");
        assert_eq!(paths.shared.sources, "/app/shared/common");
    }

    #[test]
    fn test_relative_root_becomes_absolute() {
        let paths = PathRegistry::resolve(Path::new("."), &DirMap::default());
        assert!(Path::new(&paths.root).is_absolute());
        assert!(paths.client.sources.ends_with("/client/src"));
    }

    #[test]
    fn test_dir_map_default_roots() {
        let dirs = DirMap::default();
        assert_eq!(dirs.output.root, "dist");
        assert_eq!(dirs.client, ClientDirs::with_root("client"));
        assert_eq!(dirs.server, ServerDirs::with_root("server"));
        assert_eq!(dirs.shared, SharedDirs::with_root("shared"));
        // Empty document deserializes to the same layout
        let parsed: DirMap = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(parsed, dirs);
    }

    #[test]
    fn test_dir_map_from_partial_json() {
        let dirs: DirMap = serde_json::from_value(serde_json::json!({
            "client": {
                "root": "app",
                "output": { "root": "public", "publicPath": "/static/" }
            }
        }))
        .unwrap();
        assert_eq!(dirs.client.root, "app");
        assert_eq!(dirs.client.sources, "src");
        assert_eq!(dirs.client.output.js, "js");
        assert_eq!(dirs.client.output.public_path, "/static/");
        assert_eq!(dirs.server, ServerDirs::default());
    }

    #[test]
    fn test_normalize_path_components() {
        let path = Path::new("/foo/bar/../baz/./qux");
        let normalized = normalize_path_components(path);
        let result = path_to_forward_slashes(&normalized);
        assert_eq!(result, "/foo/baz/qux");
    }

    #[test]
    fn test_path_to_forward_slashes() {
        let path = Path::new("foo\\bar\\baz");
        let result = path_to_forward_slashes(path);
        assert_eq!(result, "foo/bar/baz");
    }
}
