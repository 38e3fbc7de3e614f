use std::str::FromStr;

use crate::common::charset::{CharSet, Symbol};
use crate::common::error::{Code128Error, Code128Result};

// Charset specification
//------------------------------------------------------------------------------

/// How character sets are assigned to the input data.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub enum CharsetSpec {
    /// Choose sets so the emitted symbol sequence is as short as possible.
    #[default]
    Auto,
    /// Encode everything with one fixed set. Odd-length data under set C
    /// falls back to set B for the trailing digit.
    Single(CharSet),
    /// Explicit per-symbol assignment; a set C entry consumes two characters.
    Sequence(Vec<CharSet>),
}

impl From<CharSet> for CharsetSpec {
    fn from(set: CharSet) -> Self {
        Self::Single(set)
    }
}

impl FromStr for CharsetSpec {
    type Err = Code128Error;

    fn from_str(s: &str) -> Code128Result<Self> {
        let sets = s.chars().map(CharSet::try_from).collect::<Code128Result<Vec<_>>>()?;
        match sets.len() {
            0 => Err(Code128Error::EmptyCharset),
            1 => Ok(Self::Single(sets[0])),
            _ => Ok(Self::Sequence(sets)),
        }
    }
}

// Charset resolver
//------------------------------------------------------------------------------

/// Expand a charset specification into one set label per encoding unit (one
/// character for sets A/B, one digit pair for set C).
pub(crate) fn resolve(data: &[char], spec: &CharsetSpec) -> Code128Result<Vec<CharSet>> {
    match spec {
        CharsetSpec::Sequence(sets) => {
            let expected: usize = sets.iter().map(|set| set.unit_len()).sum();
            if expected != data.len() {
                return Err(Code128Error::CharsetLengthMismatch { expected, found: data.len() });
            }
            Ok(sets.clone())
        }
        CharsetSpec::Single(CharSet::C) => {
            let mut sets = vec![CharSet::C; data.len() / 2];
            if data.len() % 2 == 1 {
                // An unpaired trailing digit cannot live in set C.
                sets.push(CharSet::B);
            }
            Ok(sets)
        }
        CharsetSpec::Single(set) => Ok(vec![*set; data.len()]),
        CharsetSpec::Auto => auto_assign(data),
    }
}

// Order in which sets are tried; equal-cost paths settle on the earliest
// entry, so plain printable text lands in set B.
static SETS: [CharSet; 3] = [CharSet::B, CharSet::A, CharSet::C];

/// Assign sets by dynamic programming over (position, active set), pricing
/// one symbol per unit and one per latch, with set C advancing two digits at
/// a time. Isolated A/B switches may later be downgraded to shifts by the
/// encoder, which never makes the assignment longer.
fn auto_assign(data: &[char]) -> Code128Result<Vec<CharSet>> {
    let len = data.len();
    // cost[i][j]: symbols emitted so far encoding data[..i] with SETS[j]
    // active; step[i][j]: active set index before the unit ending at i.
    let mut cost = vec![[usize::MAX; 3]; len + 1];
    let mut step = vec![[usize::MAX; 3]; len + 1];
    // The start symbol selects any set at the same price.
    cost[0] = [1, 1, 1];

    for i in 0..len {
        for (j, set) in SETS.iter().enumerate() {
            let end = i + set.unit_len();
            if end > len || !set.contains(data[i]) {
                continue;
            }
            if *set == CharSet::C && !data[i + 1].is_ascii_digit() {
                continue;
            }
            for k in 0..3 {
                if cost[i][k] == usize::MAX {
                    continue;
                }
                let next = cost[i][k] + usize::from(k != j) + 1;
                if next < cost[end][j] {
                    cost[end][j] = next;
                    step[end][j] = k;
                }
            }
        }
    }

    let mut best = 0;
    for j in 1..3 {
        if cost[len][j] < cost[len][best] {
            best = j;
        }
    }
    if cost[len][best] == usize::MAX {
        let bad = data
            .iter()
            .copied()
            .find(|&ch| !CharSet::A.contains(ch) && !CharSet::B.contains(ch))
            .unwrap_or(data[0]);
        return Err(Code128Error::InvalidChar(bad));
    }

    let mut sets = Vec::new();
    let mut i = len;
    let mut j = best;
    while i > 0 {
        let set = SETS[j];
        sets.push(set);
        j = step[i][j];
        i -= set.unit_len();
    }
    sets.reverse();
    Ok(sets)
}

// Encoder
//------------------------------------------------------------------------------

/// Emit the full symbol-value sequence: start symbol, data symbols with
/// CODE/SHIFT control wherever the assignment changes set, checksum, stop.
pub(crate) fn encode(data: &[char], charsets: &[CharSet]) -> Code128Result<Vec<u8>> {
    debug_assert!(!charsets.is_empty(), "charset assignment must not be empty");
    debug_assert_eq!(
        charsets.iter().map(|set| set.unit_len()).sum::<usize>(),
        data.len(),
        "charset assignment must cover the data exactly"
    );

    let mut values = Vec::with_capacity(charsets.len() + 3);
    let mut active = charsets[0];
    values.push(active.value(Symbol::Start(active)).expect("start symbols exist in every set"));

    let mut cur = 0;
    for (i, &set) in charsets.iter().enumerate() {
        if set != active {
            // A lone A<->B excursion that immediately returns (or ends the
            // sequence) costs the same as a latch, so it becomes a
            // one-symbol shift and leaves the active set untouched.
            let returns = charsets.get(i + 1).map_or(true, |&next| next == active);
            if returns && active != CharSet::C && set != CharSet::C {
                values
                    .push(active.value(Symbol::Shift(set)).expect("A and B shift into each other"));
            } else {
                values
                    .push(active.value(Symbol::Code(set)).expect("every set latches the other two"));
                active = set;
            }
        }

        let symbol = match set {
            CharSet::C => {
                let (hi, lo) = (data[cur], data[cur + 1]);
                for ch in [hi, lo] {
                    if !ch.is_ascii_digit() {
                        return Err(Code128Error::IncompatibleCharset(ch, CharSet::C));
                    }
                }
                cur += 2;
                Symbol::Pair((hi as u8 - b'0') * 10 + (lo as u8 - b'0'))
            }
            _ => {
                cur += 1;
                Symbol::Char(data[cur - 1])
            }
        };
        match set.value(symbol) {
            Some(value) => values.push(value),
            None => return Err(Code128Error::IncompatibleCharset(data[cur - 1], set)),
        }
    }

    values.push(checksum(&values));
    values.push(active.value(Symbol::Stop).expect("stop exists in every set"));
    Ok(values)
}

/// Symbol check value: the start value seeds the accumulator and every value
/// is added again weighted by its position, mod 103.
fn checksum(values: &[u8]) -> u8 {
    let mut sum = values[0] as u64;
    for (i, &value) in values.iter().enumerate() {
        sum += i as u64 * value as u64;
    }
    (sum % 103) as u8
}

// Symbol replay
//------------------------------------------------------------------------------

/// Recover display symbols from a value sequence by tracking the active set
/// and a pending one-symbol shift, the way a decoder would. Start codes share
/// values across sets, so the initial set does not matter.
pub(crate) fn symbols(values: &[u8]) -> Vec<Symbol> {
    let mut active = CharSet::A;
    let mut shifted: Option<CharSet> = None;

    values
        .iter()
        .map(|&value| {
            let current = shifted.take().unwrap_or(active);
            let symbol = current
                .symbol(value)
                .expect("encoded values are valid in the set active at their position");
            match symbol {
                Symbol::Start(set) | Symbol::Code(set) => active = set,
                Symbol::Shift(set) => shifted = Some(set),
                _ => {}
            }
            symbol
        })
        .collect()
}

#[cfg(test)]
mod codec_tests {
    use std::str::FromStr;

    use test_case::test_case;

    use super::{auto_assign, checksum, encode, resolve, symbols, CharsetSpec};
    use crate::common::charset::{CharSet, Symbol};
    use crate::common::error::Code128Error;

    use CharSet::*;

    fn chars(data: &str) -> Vec<char> {
        data.chars().collect()
    }

    #[test]
    fn test_parse_spec() {
        assert_eq!(CharsetSpec::from_str("B"), Ok(CharsetSpec::Single(B)));
        assert_eq!(CharsetSpec::from_str("BAC"), Ok(CharsetSpec::Sequence(vec![B, A, C])));
        assert_eq!(CharsetSpec::from_str("D"), Err(Code128Error::UnknownCharset('D')));
        assert_eq!(CharsetSpec::from_str("BAD"), Err(Code128Error::UnknownCharset('D')));
        assert_eq!(CharsetSpec::from_str(""), Err(Code128Error::EmptyCharset));
    }

    #[test]
    fn test_resolve_single() {
        assert_eq!(resolve(&chars("Hi!"), &B.into()).unwrap(), vec![B, B, B]);
        assert_eq!(resolve(&chars("1234"), &C.into()).unwrap(), vec![C, C]);
        // Odd-length data under C keeps the stray digit in set B.
        assert_eq!(resolve(&chars("123"), &C.into()).unwrap(), vec![C, B]);
    }

    #[test]
    fn test_resolve_sequence_length() {
        let spec = CharsetSpec::Sequence(vec![B, C, B]);
        assert_eq!(resolve(&chars("a12b"), &spec).unwrap(), vec![B, C, B]);
        assert_eq!(
            resolve(&chars("a12"), &spec),
            Err(Code128Error::CharsetLengthMismatch { expected: 4, found: 3 })
        );
    }

    #[test_case("hello", &[B, B, B, B, B] ; "lowercase prefers b")]
    #[test_case("\x01A", &[A, A] ; "control chars force a")]
    #[test_case("123456", &[C, C, C] ; "digit pairs pack into c")]
    #[test_case("12345", &[C, C, B] ; "odd digit run ends in b")]
    #[test_case("a1b", &[B, B, B] ; "short digit run stays put")]
    fn test_auto_assign(data: &str, expected: &[CharSet]) {
        assert_eq!(auto_assign(&chars(data)).unwrap(), expected);
    }

    #[test]
    fn test_auto_assign_rejects_non_ascii() {
        assert_eq!(auto_assign(&chars("héllo")), Err(Code128Error::InvalidChar('é')));
    }

    #[test]
    fn test_auto_assign_switches_only_when_worthwhile() {
        // Six digits amortize the latch into C and back.
        let sets = auto_assign(&chars("code128128x")).unwrap();
        assert_eq!(sets, vec![B, B, B, B, C, C, C, B]);
    }

    #[test]
    fn test_encode_hello() {
        let values = encode(&chars("Hello!"), &[B; 6]).unwrap();
        assert_eq!(values, vec![104, 40, 69, 76, 76, 79, 1, 82, 106]);
    }

    #[test]
    fn test_encode_emits_shift_for_isolated_switch() {
        let values = encode(&chars("a\x00a\x00a"), &[B, A, B, A, B]).unwrap();
        assert_eq!(values, vec![104, 65, 98, 64, 65, 98, 64, 65, 86, 106]);
    }

    #[test]
    fn test_encode_latches_for_runs() {
        // Two consecutive control characters warrant a latch, not a shift.
        let values = encode(&chars("a\x00\x00"), &[B, A, A]).unwrap();
        assert_eq!(values, vec![104, 65, 101, 64, 64, checksum(&[104, 65, 101, 64, 64]), 106]);
    }

    #[test]
    fn test_encode_incompatible_chunk() {
        assert_eq!(
            encode(&chars("abc"), &[A, A, A]),
            Err(Code128Error::IncompatibleCharset('a', A))
        );
        assert_eq!(encode(&chars("1x"), &[C]), Err(Code128Error::IncompatibleCharset('x', C)));
    }

    #[test]
    fn test_checksum_seeds_with_start_value() {
        // START B + "Hello!" in set B.
        assert_eq!(checksum(&[104, 40, 69, 76, 76, 79, 1]), 82);
        // A single start symbol checks as itself.
        assert_eq!(checksum(&[104]), 1);
    }

    #[test]
    fn test_symbols_replay_tracks_shifts() {
        let values = encode(&chars("a\x00a\x00a"), &[B, A, B, A, B]).unwrap();
        let expected = vec![
            Symbol::Start(B),
            Symbol::Char('a'),
            Symbol::Shift(A),
            Symbol::Char('\x00'),
            Symbol::Char('a'),
            Symbol::Shift(A),
            Symbol::Char('\x00'),
            Symbol::Char('a'),
            Symbol::Char('v'),
            Symbol::Stop,
        ];
        assert_eq!(symbols(&values), expected);
    }

    #[test]
    fn test_symbols_replay_tracks_latches() {
        let values = encode(&chars("12345"), &[C, C, B]).unwrap();
        let expected = vec![
            Symbol::Start(C),
            Symbol::Pair(12),
            Symbol::Pair(34),
            Symbol::Code(B),
            Symbol::Char('5'),
            Symbol::Char('V'),
            Symbol::Stop,
        ];
        assert_eq!(symbols(&values), expected);
    }
}
