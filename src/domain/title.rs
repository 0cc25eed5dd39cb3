//! Guessing a search query from the name of a downloaded file

use once_cell::sync::Lazy;
use regex::Regex;

/// `---<source id>.<ext>` left behind by video downloaders
static SOURCE_ID_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-{3}[\w_-]*\.[\w_-]*").expect("source id regex is valid"));

/// "(Official Audio)", "(Lyric Video)" and the like
static ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(.*\)").expect("annotation regex is valid"));

/// Turns a file path into a lowercase title guess.
///
/// Known directory prefixes are removed first, then anything that still looks
/// like a directory.
pub fn normalize(path: &str, strip_prefixes: &[String]) -> String {
    let mut title = path.to_string();
    for prefix in strip_prefixes {
        title = title.replace(prefix.as_str(), "");
    }

    let title = title.rsplit(['/', '\\']).next().unwrap_or_default();
    let title = SOURCE_ID_SUFFIX.replace_all(title, "");
    let title = ANNOTATION.replace_all(&title, "");

    title
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    fn prefixes() -> Vec<String> {
        vec!["./convert/".to_string(), "./files/".to_string()]
    }

    #[test]
    fn strips_prefix_source_id_and_annotation() {
        let title = normalize(
            "./convert/Rick_Astley_-_Never_Gonna_Give_You_Up_(Official_Video)---dQw4w9WgXcQ.mp3",
            &prefixes(),
        );

        assert_eq!(title, "rick astley - never gonna give you up");
    }

    #[test]
    fn output_has_no_leftovers() {
        let inputs = [
            "./files/Queen_-_Bohemian_Rhapsody---fJ9rUzIMcZQ.mp3",
            "./convert/Кино_-_Группа_крови_(Remastered)---a-b_c.webm",
            "./files/Song_(Live)_(2004)---x.m4a",
        ];

        for input in inputs {
            let title = normalize(input, &prefixes());
            assert!(!title.contains('_'), "{title}");
            assert!(!title.contains('('), "{title}");
            assert!(!title.contains(')'), "{title}");
            assert!(!title.contains("---"), "{title}");
            assert!(!title.contains(".mp3"), "{title}");
            assert_eq!(title, title.trim());
        }
    }

    #[test]
    fn cyrillic_is_lowercased() {
        assert_eq!(
            normalize("./convert/Кино_-_Группа_крови---abc.mp3", &prefixes()),
            "кино - группа крови"
        );
    }

    #[test]
    fn unknown_directories_are_dropped() {
        assert_eq!(
            normalize("/home/me/Music/Daft_Punk_-_Veridis_Quo---id.mp3", &prefixes()),
            "daft punk - veridis quo"
        );
    }

    #[test]
    fn plain_title_is_kept() {
        assert_eq!(normalize("Muse - Uprising", &[]), "muse - uprising");
    }
}
