//! Law names and directory slugs.

use std::sync::LazyLock;

use regex::Regex;

static DATE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_\d{8}$").unwrap());

/// Prefix shared by national laws, dropped from short names.
pub(crate) const STATE_PREFIX: &str = "中华人民共和国";

/// Known slugs for laws whose names do not transliterate well.
const TRANSLATIONS: [(&str, &str); 3] = [
    ("反分裂国家法", "anti-secession-law"),
    (
        "专属经济区和大陆架法",
        "exclusive-economic-zone-and-continental-shelf-law",
    ),
    (
        "外国中央银行财产司法强制措施豁免法",
        "immunity-from-judicial-enforcement-measures-for-foreign-central-banks",
    ),
];

/// Law name of a converted file stem, without the `_YYYYMMDD` date suffix.
#[must_use]
pub fn law_name_from_stem(stem: &str) -> &str {
    match DATE_SUFFIX_RE.find(stem) {
        Some(m) => &stem[..m.start()],
        None => stem,
    }
}

/// Name without the state prefix.
pub(crate) fn short_name(law_name: &str) -> String {
    law_name.replace(STATE_PREFIX, "")
}

/// Directory slug for a law.
///
/// Uses the translation table when the short name is known; otherwise
/// lowercases the name, turns spaces and `、` into `-` and drops full-width
/// parentheses.
#[must_use]
pub fn english_slug(law_name: &str) -> String {
    let short = short_name(law_name);

    if let Some((_, slug)) = TRANSLATIONS.iter().find(|(name, _)| *name == short) {
        return (*slug).to_owned();
    }

    short
        .to_lowercase()
        .replace(' ', "-")
        .replace(['（', '）'], "")
        .replace('、', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_law_name_strips_date() {
        assert_eq!(
            law_name_from_stem("中华人民共和国民法典_20200528"),
            "中华人民共和国民法典"
        );
    }

    #[test]
    fn test_law_name_keeps_short_numbers() {
        assert_eq!(law_name_from_stem("刑法修正案_2020"), "刑法修正案_2020");
        assert_eq!(law_name_from_stem("民法典"), "民法典");
    }

    #[test]
    fn test_slug_from_translation_table() {
        assert_eq!(
            english_slug("中华人民共和国专属经济区和大陆架法"),
            "exclusive-economic-zone-and-continental-shelf-law"
        );
    }

    #[test]
    fn test_slug_fallback() {
        assert_eq!(
            english_slug("全国人民代表大会常务委员会关于司法鉴定管理问题的决定（修正）"),
            "全国人民代表大会常务委员会关于司法鉴定管理问题的决定修正"
        );
        assert_eq!(english_slug("Law A、Law B"), "law-a-law-b");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("中华人民共和国刑法"), "刑法");
        assert_eq!(short_name("反分裂国家法"), "反分裂国家法");
    }
}
