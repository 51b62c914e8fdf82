use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;

/// Characters a stem may gain while it is being inflected ("врем" + "ен",
/// "котёночек" becoming "котятк").
pub const MAX_GROWTH: usize = 8;

/// A word split into a stem and an ending, edited in place by the declension
/// passes.
///
/// The stem occupies `chars[..stem_len]`, the ending the rest. Every edit
/// keeps that split intact and moves only the characters after the edit
/// point. The total length never exceeds the original stem length plus
/// [`MAX_GROWTH`]; crossing it is a bug in a pass and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflectionBuffer {
    chars: SmallVec<[char; 24]>,
    stem_len: usize,
    capacity: usize,
}

impl InflectionBuffer {
    pub fn new(stem: &str) -> Self {
        let chars: SmallVec<[char; 24]> = stem.chars().collect();
        let stem_len = chars.len();
        Self { chars, stem_len, capacity: stem_len + MAX_GROWTH }
    }

    /// Resets the buffer to `stem` followed by `ending`.
    pub fn write_initial_parts(&mut self, stem: &str, ending: &str) {
        self.chars.clear();
        self.chars.extend(stem.chars());
        self.stem_len = self.chars.len();
        self.capacity = self.stem_len + MAX_GROWTH;
        self.append_to_ending(ending);
    }

    pub fn stem(&self) -> &[char] {
        &self.chars[..self.stem_len]
    }

    pub fn ending(&self) -> &[char] {
        &self.chars[self.stem_len..]
    }

    pub fn stem_len(&self) -> usize {
        self.stem_len
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn stem_char(&self, index: usize) -> char {
        self.stem()[index]
    }

    pub fn last_stem_char(&self) -> Option<char> {
        self.stem().last().copied()
    }

    pub fn stem_ends_with(&self, suffix: &str) -> bool {
        let stem = self.stem();
        let n = suffix.chars().count();
        n <= stem.len() && stem[stem.len() - n..].iter().copied().eq(suffix.chars())
    }

    pub fn ending_is(&self, ending: &str) -> bool {
        self.ending().iter().copied().eq(ending.chars())
    }

    pub fn ending_starts_with(&self, c: char) -> bool {
        self.ending().first() == Some(&c)
    }

    pub fn ending_has_vowel(&self) -> bool {
        self.ending().iter().any(|&c| crate::letters::is_vowel(c))
    }

    /// Index of the last stem character matching `pred`.
    pub fn rfind_in_stem(&self, pred: impl Fn(char) -> bool) -> Option<usize> {
        self.stem().iter().rposition(|&c| pred(c))
    }

    pub fn replace_stem_char(&mut self, index: usize, c: char) {
        assert!(index < self.stem_len, "stem index {index} out of range");
        self.chars[index] = c;
    }

    pub fn remove_stem_char_at(&mut self, index: usize) {
        assert!(index < self.stem_len, "stem index {index} out of range");
        self.chars.remove(index);
        self.stem_len -= 1;
    }

    pub fn shrink_stem_by(&mut self, n: usize) {
        assert!(n <= self.stem_len, "cannot drop {n} chars of a {}-char stem", self.stem_len);
        self.chars.drain(self.stem_len - n..self.stem_len);
        self.stem_len -= n;
    }

    /// Appends to the stem, in front of the ending.
    pub fn append_to_stem(&mut self, s: &str) {
        for c in s.chars() {
            self.grow();
            self.chars.insert(self.stem_len, c);
            self.stem_len += 1;
        }
    }

    /// Inserts `c` between the last two characters of the stem.
    pub fn insert_between_two_last_stem_chars(&mut self, c: char) {
        assert!(self.stem_len >= 2, "stem too short for an inserted vowel");
        self.grow();
        self.chars.insert(self.stem_len - 1, c);
        self.stem_len += 1;
    }

    pub fn append_to_ending(&mut self, s: &str) {
        for c in s.chars() {
            self.grow();
            self.chars.push(c);
        }
    }

    pub fn remove_ending(&mut self) {
        self.chars.truncate(self.stem_len);
    }

    pub fn replace_ending(&mut self, ending: &str) {
        self.remove_ending();
        self.append_to_ending(ending);
    }

    pub fn replace_ending_char(&mut self, index: usize, c: char) {
        let at = self.stem_len + index;
        assert!(at < self.chars.len(), "ending index {index} out of range");
        self.chars[at] = c;
    }

    fn grow(&self) {
        assert!(self.chars.len() < self.capacity, "inflection buffer overflow");
    }
}

impl fmt::Display for InflectionBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            fmt::Write::write_char(f, *c)?;
        }
        Ok(())
    }
}

impl From<InflectionBuffer> for String {
    fn from(buffer: InflectionBuffer) -> Self {
        buffer.chars.iter().collect()
    }
}
