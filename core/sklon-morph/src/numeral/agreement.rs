use sklon_protocol::CountAgreement;

/// Which noun form follows `number`: 1, 21, 101 take the singular; 2-4,
/// 22-24 the paucal; everything else, 11-14 included, the plural.
pub const fn agreement(number: i64) -> CountAgreement {
    let n = number.unsigned_abs();
    let (last, last_two) = (n % 10, n % 100);
    if last == 1 && last_two != 11 {
        CountAgreement::Singular
    } else if matches!(last, 2..=4) && !matches!(last_two, 12..=14) {
        CountAgreement::Paucal
    } else {
        CountAgreement::Plural
    }
}
