use crate::error::Suggestions;
use std::{borrow::Cow, cmp::min, mem::swap};

/// Candidates close to `word`, nearest first. Only candidates whose distance
/// is below `min(len / 3, 3)` are kept, so very short words get none.
pub(crate) fn suggest(
    word: &str,
    candidates: impl IntoIterator<Item = impl AsRef<str>>,
) -> Suggestions {
    let maximum = min(word.chars().count() / 3, 3);
    let mut rows = Rows::default();
    let mut suggestions: Suggestions = candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            let distance = rows.distance(word, candidate);
            (distance < maximum).then(|| (Cow::Owned(candidate.to_owned()), distance))
        })
        .collect();
    suggestions.sort_by(|left, right| left.1.cmp(&right.1).then_with(|| left.0.cmp(&right.0)));
    suggestions
}

#[derive(Default)]
struct Rows {
    previous: Vec<usize>,
    current: Vec<usize>,
}

impl Rows {
    fn distance(&mut self, left: &str, right: &str) -> usize {
        let left: Vec<char> = left.chars().map(|letter| letter.to_ascii_lowercase()).collect();
        let right: Vec<char> = right.chars().map(|letter| letter.to_ascii_lowercase()).collect();
        let (short, long) = if left.len() <= right.len() {
            (&left, &right)
        } else {
            (&right, &left)
        };

        self.previous.clear();
        self.previous.extend(0..=short.len());
        self.current.clear();
        self.current.resize(short.len() + 1, 0);
        for (row, &outer) in long.iter().enumerate() {
            self.current[0] = row + 1;
            for (column, &inner) in short.iter().enumerate() {
                let substitute = self.previous[column] + usize::from(outer != inner);
                let insert = self.current[column] + 1;
                let delete = self.previous[column + 1] + 1;
                self.current[column + 1] = substitute.min(insert).min(delete);
            }
            swap(&mut self.previous, &mut self.current);
        }
        self.previous[short.len()]
    }
}
