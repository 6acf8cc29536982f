use super::table::{Group, KhiproTable};

const HASANT: char = '\u{09CD}';

/// What the transducer last emitted. Decides which groups may match next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Init,
    /// After a vowel or sign: the next consonant starts a new syllable.
    Shor,
    /// After `rr`.
    Reph,
    /// After a consonant: vowels attach as kar, `r`/`z` as phola.
    Byanjon,
}

impl State {
    /// Groups tried in this state, in priority order within one chunk length.
    fn groups(self) -> &'static [Group] {
        use Group::*;
        match self {
            State::Init => &[
                Diacritic, Ng, Shor, Fkar, Prithayok, Biram, Reph, Byanjon, Juktoborno,
            ],
            State::Shor => &[
                Diacritic, Ng, Shor, Fkar, Biram, Prithayok, Reph, Byanjon, Juktoborno,
            ],
            State::Reph => &[Prithayok, Diacritic, Ng, Ae, Juktoborno, Byanjon, Reph, Kar],
            State::Byanjon => &[
                Diacritic, Ng, Prithayok, Biram, Kar, Phola, Byanjon, Juktoborno,
            ],
        }
    }

    fn after(self, group: Group) -> State {
        use Group::*;
        match (self, group) {
            (State::Init | State::Shor, Diacritic | Shor | Fkar | Prithayok | Biram | Ng) => {
                State::Shor
            }
            (State::Init | State::Shor, Reph) => State::Reph,
            (State::Init | State::Shor, Byanjon | Juktoborno) => State::Byanjon,

            (State::Reph, Prithayok | Diacritic | Ng | Ae | Kar) => State::Shor,
            (State::Reph, Reph) => State::Reph,
            (State::Reph, Juktoborno | Byanjon) => State::Byanjon,

            (State::Byanjon, Diacritic | Kar | Prithayok | Biram | Ng) => State::Shor,
            (State::Byanjon, Byanjon | Juktoborno) => State::Byanjon,

            (state, _) => state,
        }
    }
}

struct Match<'t> {
    group: Group,
    len: usize,
    value: &'t str,
}

/// Longest chunk starting at `chars[i]` that some allowed group maps.
/// For equal length, the earlier group in the state's order wins.
fn find_longest<'t>(
    table: &'t KhiproTable,
    state: State,
    chars: &[char],
    i: usize,
) -> Option<Match<'t>> {
    let allowed = state.groups();
    let max_len = allowed
        .iter()
        .map(|&g| table.max_key_len(g))
        .max()
        .unwrap_or(0);
    let end = chars.len().min(i + max_len);

    let mut chunk = String::with_capacity(max_len);
    for len in (1..=end.saturating_sub(i)).rev() {
        chunk.clear();
        chunk.extend(&chars[i..i + len]);
        for &group in allowed {
            if let Some(value) = table.lookup(group, &chunk) {
                return Some(Match { group, len, value });
            }
        }
    }
    None
}

/// Convert Latin Khipro input to Bengali using the global mapping table.
pub fn convert(text: &str) -> String {
    convert_with(KhiproTable::global(), text)
}

/// Convert with an explicit table. Unmapped characters are copied through
/// and reset the transducer to [`State::Init`].
pub fn convert_with(table: &KhiproTable, text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() * 3);
    let mut state = State::Init;
    let mut i = 0;

    while i < chars.len() {
        let Some(m) = find_longest(table, state, &chars, i) else {
            out.push(chars[i]);
            i += 1;
            state = State::Init;
            continue;
        };
        if state == State::Byanjon && m.group == Group::Phola {
            out.push(HASANT);
        }
        out.push_str(m.value);
        i += m.len;
        state = state.after(m.group);
    }
    out
}
