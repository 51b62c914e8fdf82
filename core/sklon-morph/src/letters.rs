//! Character classes of Russian orthography used by the alternation rules.

pub(crate) const fn is_vowel(c: char) -> bool {
    matches!(c, 'а' | 'е' | 'ё' | 'и' | 'о' | 'у' | 'ы' | 'э' | 'ю' | 'я')
}

/// ж ш ч щ
pub(crate) const fn is_hissing(c: char) -> bool {
    matches!(c, 'ж' | 'ш' | 'ч' | 'щ')
}

/// к г х
pub(crate) const fn is_velar(c: char) -> bool {
    matches!(c, 'к' | 'г' | 'х')
}

/// Consonant letters, й included; ь and ъ are not consonants.
pub(crate) const fn is_consonant(c: char) -> bool {
    matches!(
        c,
        'б' | 'в' | 'г' | 'д' | 'ж' | 'з' | 'й' | 'к' | 'л' | 'м' | 'н' | 'п' | 'р' | 'с' | 'т' | 'ф' | 'х' | 'ц'
            | 'ч' | 'ш' | 'щ'
    )
}
