//! Display names for common primary language subtags.
//!
//! Backs the composed `"<English name>/<self name>"` label published for a
//! matched language axis. Tags whose primary subtag is missing here fall
//! back to the raw tag string on both sides of the slash.

/// Look up `(english_name, self_name)` for a primary language subtag.
///
/// The subtag must already be lower-cased.
pub(crate) fn lookup(primary: &str) -> Option<(&'static str, &'static str)> {
    let entry = match primary {
        "ar" => ("Arabic", "العربية"),
        "bg" => ("Bulgarian", "български"),
        "bn" => ("Bengali", "বাংলা"),
        "ca" => ("Catalan", "català"),
        "cs" => ("Czech", "čeština"),
        "cy" => ("Welsh", "Cymraeg"),
        "da" => ("Danish", "dansk"),
        "de" => ("German", "Deutsch"),
        "el" => ("Greek", "Ελληνικά"),
        "en" => ("English", "English"),
        "es" => ("Spanish", "español"),
        "et" => ("Estonian", "eesti"),
        "eu" => ("Basque", "euskara"),
        "fa" => ("Persian", "فارسی"),
        "fi" => ("Finnish", "suomi"),
        "fr" => ("French", "français"),
        "ga" => ("Irish", "Gaeilge"),
        "gl" => ("Galician", "galego"),
        "he" => ("Hebrew", "עברית"),
        "hi" => ("Hindi", "हिन्दी"),
        "hr" => ("Croatian", "hrvatski"),
        "hu" => ("Hungarian", "magyar"),
        "id" => ("Indonesian", "Indonesia"),
        "is" => ("Icelandic", "íslenska"),
        "it" => ("Italian", "italiano"),
        "ja" => ("Japanese", "日本語"),
        "ko" => ("Korean", "한국어"),
        "la" => ("Latin", "Latina"),
        "lt" => ("Lithuanian", "lietuvių"),
        "lv" => ("Latvian", "latviešu"),
        "ms" => ("Malay", "Melayu"),
        "nl" => ("Dutch", "Nederlands"),
        "no" => ("Norwegian", "norsk"),
        "pl" => ("Polish", "polski"),
        "pt" => ("Portuguese", "português"),
        "ro" => ("Romanian", "română"),
        "ru" => ("Russian", "русский"),
        "sk" => ("Slovak", "slovenčina"),
        "sl" => ("Slovenian", "slovenščina"),
        "sr" => ("Serbian", "српски"),
        "sv" => ("Swedish", "svenska"),
        "th" => ("Thai", "ไทย"),
        "tr" => ("Turkish", "Türkçe"),
        "uk" => ("Ukrainian", "українська"),
        "vi" => ("Vietnamese", "Tiếng Việt"),
        "zh" => ("Chinese", "中文"),
        _ => return None,
    };
    Some(entry)
}
