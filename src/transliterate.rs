// WHY: Revealed words in non-Latin scripts are shown romanized so a reader can
// sound them out; the engine only needs a text -> text function

/// Converts translated text into Latin script
pub trait Transliterator: Send + Sync {
    fn transliterate(&self, text: &str) -> String;
}

/// Transliterate optional input; absent text becomes an empty string
pub fn transliterate_opt(transliterator: &dyn Transliterator, text: Option<&str>) -> String {
    text.map(|t| transliterator.transliterate(t)).unwrap_or_default()
}

/// Leaves text unchanged; correct for targets already in Latin script
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTransliterator;

impl Transliterator for IdentityTransliterator {
    fn transliterate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Table-driven Cyrillic to Latin romanization. Characters outside the
/// table pass through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct CyrillicTransliterator;

impl CyrillicTransliterator {
    fn romanize(ch: char) -> Option<&'static str> {
        let lower = match ch {
            'а' | 'А' => "a",
            'б' | 'Б' => "b",
            'в' | 'В' => "v",
            'г' | 'Г' => "g",
            'д' | 'Д' => "d",
            'е' | 'Е' => "e",
            'ё' | 'Ё' => "ë",
            'ж' | 'Ж' => "ž",
            'з' | 'З' => "z",
            'и' | 'И' => "i",
            'й' | 'Й' => "j",
            'к' | 'К' => "k",
            'л' | 'Л' => "l",
            'м' | 'М' => "m",
            'н' | 'Н' => "n",
            'о' | 'О' => "o",
            'п' | 'П' => "p",
            'р' | 'Р' => "r",
            'с' | 'С' => "s",
            'т' | 'Т' => "t",
            'у' | 'У' => "u",
            'ф' | 'Ф' => "f",
            'х' | 'Х' => "h",
            'ц' | 'Ц' => "c",
            'ч' | 'Ч' => "č",
            'ш' | 'Ш' => "š",
            'щ' | 'Щ' => "ŝ",
            'ъ' | 'Ъ' => "ʺ",
            'ы' | 'Ы' => "y",
            'ь' | 'Ь' => "ʹ",
            'э' | 'Э' => "è",
            'ю' | 'Ю' => "û",
            'я' | 'Я' => "â",
            'і' | 'І' => "ì",
            'ї' | 'Ї' => "ï",
            'є' | 'Є' => "ê",
            'ґ' | 'Ґ' => "g̀",
            _ => return None,
        };
        Some(lower)
    }
}

impl Transliterator for CyrillicTransliterator {
    fn transliterate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match Self::romanize(ch) {
                Some(latin) if ch.is_uppercase() => {
                    let mut chars = latin.chars();
                    if let Some(first) = chars.next() {
                        out.extend(first.to_uppercase());
                        out.push_str(chars.as_str());
                    }
                }
                Some(latin) => out.push_str(latin),
                None => out.push(ch),
            }
        }
        out
    }
}
