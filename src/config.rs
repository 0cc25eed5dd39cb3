use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub search: SearchConfig,
    pub http: HttpConfig,
    pub paths: PathsConfig,
    pub editor: EditorConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }

    /// Reads the config file if one was given, built-in defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Config> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Config::default()),
        }
    }
}

/// The lyrics site being scraped
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SiteConfig {
    /// Site-relative image paths are resolved against this
    pub base_url: String,
    /// Domain the search is restricted to
    pub domain: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.azlyrics.com".to_string(),
            domain: "azlyrics.com".to_string(),
        }
    }
}

/// Searx instance used to find the lyrics page
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub url: String,
    pub language: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: "https://searx.dc09.ru/search".to_string(),
            language: "ru-RU".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/110.0"
                .to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PathsConfig {
    /// Scratch file handed to the lyrics editor
    pub lyrics_scratch: PathBuf,
    /// Root of the artist/album tree used in copy mode
    pub tagged_root: PathBuf,
    /// Directory prefixes removed from file names before searching
    pub strip_prefixes: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            lyrics_scratch: PathBuf::from("./lyrics.txt"),
            tagged_root: PathBuf::from("./tagged"),
            strip_prefixes: vec!["./convert/".to_string(), "./files/".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EditorConfig {
    /// Used when `$EDITOR` is not set
    pub default: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default: "nano".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
[site]
base_url = "https://lyrics.example.org"
domain = "lyrics.example.org"

[search]
url = "http://127.0.0.1:8888/search"
language = "en-US"

[http]
user_agent = "lyrictag-test"
timeout_secs = 15

[paths]
lyrics_scratch = "/tmp/lyrics.txt"
tagged_root = "/home/me/Music"
strip_prefixes = ["./downloads/"]

[editor]
default = "vim"
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.site.domain, "lyrics.example.org");
        assert_eq!(cfg.search.url, "http://127.0.0.1:8888/search");
        assert_eq!(cfg.search.language, "en-US");
        assert_eq!(cfg.http.user_agent, "lyrictag-test");
        assert_eq!(cfg.http.timeout_secs, Some(15));
        assert_eq!(cfg.paths.tagged_root, PathBuf::from("/home/me/Music"));
        assert_eq!(cfg.paths.strip_prefixes, vec!["./downloads/".to_string()]);
        assert_eq!(cfg.editor.default, "vim");

        Ok(())
    }

    #[test]
    fn test_missing_sections_use_defaults() -> anyhow::Result<()> {
        let toml_str = r#"
[editor]
default = "hx"
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        // Untouched sections
        assert_eq!(cfg.site.base_url, "https://www.azlyrics.com");
        assert_eq!(cfg.search.url, "https://searx.dc09.ru/search");
        assert_eq!(cfg.http.timeout_secs, None);
        assert_eq!(cfg.paths.lyrics_scratch, PathBuf::from("./lyrics.txt"));

        assert_eq!(cfg.editor.default, "hx");

        Ok(())
    }

    #[test]
    fn test_partial_section_keeps_other_fields() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str("[paths]\ntagged_root = \"out\"\n")?;

        assert_eq!(cfg.paths.tagged_root, PathBuf::from("out"));
        assert_eq!(
            cfg.paths.strip_prefixes,
            vec!["./convert/".to_string(), "./files/".to_string()]
        );

        Ok(())
    }

    #[test]
    fn test_example_config_matches_defaults() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str(include_str!("../config.example.toml"))?;
        let defaults = Config::default();

        assert_eq!(cfg.site.base_url, defaults.site.base_url);
        assert_eq!(cfg.search.url, defaults.search.url);
        assert_eq!(cfg.http.user_agent, defaults.http.user_agent);
        assert_eq!(cfg.paths.strip_prefixes, defaults.paths.strip_prefixes);
        assert_eq!(cfg.editor.default, defaults.editor.default);

        Ok(())
    }

    #[test]
    fn test_load_or_default_without_path() -> anyhow::Result<()> {
        let cfg = Config::load_or_default(None)?;
        assert_eq!(cfg.editor.default, "nano");
        Ok(())
    }

    #[test]
    fn test_load_reports_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = Config::load(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
