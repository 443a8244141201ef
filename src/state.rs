//! Session State: the single mutable, process-wide (per-connection)
//! structure the parser reads from and writes to. See spec §3.

use std::collections::{BTreeSet, HashMap};

use crate::casemap::CaseMapping;
use crate::daemon::Daemon;
use crate::numeric::{typenums_of, NumericTable};

/// The connected client's own identity and mode state (spec §3 `client`).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientState {
    pub nickname: String,
    pub user: String,
    pub ident: String,
    /// Nickname held before the most recent rename, if any.
    pub original_nickname: String,
    /// Sorted, deduplicated active user mode letters.
    pub modes: Vec<char>,
}

impl ClientState {
    /// Apply a signed user-mode string (as seen in a self-targeted `MODE`,
    /// spec §4.6's onMode self-mode branch) additively by default, keeping
    /// `modes` sorted and deduplicated (spec §3 invariant, §9 design note).
    pub fn apply_user_modes(&mut self, mode_string: &str) {
        let mut add = true;
        let mut set: BTreeSet<char> = self.modes.iter().copied().collect();
        for c in mode_string.trim_start_matches(':').chars() {
            match c {
                '+' => add = true,
                '-' => add = false,
                letter => {
                    if add {
                        set.insert(letter);
                    } else {
                        set.remove(&letter);
                    }
                }
            }
        }
        self.modes = set.into_iter().collect();
    }
}

/// Server-advertised capabilities and parsing parameters (spec §3
/// `server`), reparameterized by `ISUPPORT`/`MYINFO` as they arrive.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerState {
    pub address: String,
    pub resolved_address: String,
    pub daemon: Daemon,
    pub daemonstring: String,
    pub network: String,
    pub max_nick_length: usize,
    pub max_channel_length: usize,
    pub chantypes: String,
    /// Prefix mode letters, in server-advertised order (e.g. `"ov"`).
    pub prefixes: String,
    /// `sigil -> mode letter`, e.g. `'@' -> 'o'`.
    pub prefixchars: HashMap<char, char>,
    pub a_modes: String,
    pub b_modes: String,
    pub c_modes: String,
    pub d_modes: String,
    pub extban_prefix: char,
    pub extban_types: String,
    pub excepts_char: char,
    pub invex_char: char,
    pub case_mapping: CaseMapping,
}

impl Default for ServerState {
    fn default() -> Self {
        ServerState {
            address: String::new(),
            resolved_address: String::new(),
            daemon: Daemon::Unset,
            daemonstring: String::new(),
            network: String::new(),
            max_nick_length: crate::validation::DEFAULT_MAX_NICK_LENGTH,
            max_channel_length: crate::validation::DEFAULT_MAX_CHANNEL_LENGTH,
            chantypes: "#".to_string(),
            prefixes: "ov".to_string(),
            prefixchars: HashMap::from([('@', 'o'), ('+', 'v')]),
            a_modes: String::new(),
            b_modes: String::new(),
            c_modes: String::new(),
            d_modes: String::new(),
            extban_prefix: '$',
            extban_types: String::new(),
            excepts_char: 'e',
            invex_char: 'I',
            case_mapping: CaseMapping::Rfc1459,
        }
    }
}

/// One channel mode entry, per spec §3's `Mode` shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mode {
    pub letter: char,
    pub argument: String,
    pub user: Option<String>,
    pub account: Option<String>,
    pub channel: Option<String>,
    pub negated: bool,
    pub exceptions: Vec<String>,
}

/// A channel record, owned by the embedder and mutated by the Mode Engine
/// on demand (spec §3 `channel`).
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    pub topic: String,
    /// Flag-only (D-class) mode letters currently enabled.
    pub modechars: BTreeSet<char>,
    pub modes: Vec<Mode>,
    /// `prefix mode letter -> set of nicknames holding it`.
    pub mods: HashMap<char, BTreeSet<String>>,
}

/// Process-wide session state: client identity, server capabilities, and
/// the numeric table, plus the channel table the Mode Engine and dispatcher
/// mutate on demand. There is exactly one of these per connection (spec §5:
/// "each parser must own their own Session State — no cross-connection
/// sharing").
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    pub client: ClientState,
    pub server: ServerState,
    /// Dirty flag set on any state mutation; the embedder polls and clears
    /// it after each line (spec §3, §9).
    pub updated: bool,
    #[cfg_attr(feature = "serde", serde(skip, default = "crate::numeric::typenums_of_unset"))]
    pub numeric_table: NumericTable,
    pub channels: HashMap<String, Channel>,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            client: ClientState::default(),
            server: ServerState::default(),
            updated: false,
            numeric_table: typenums_of(Daemon::Unset),
            channels: HashMap::new(),
        }
    }
}

impl Session {
    pub fn new(nickname: impl Into<String>) -> Session {
        let mut s = Session::default();
        s.client.nickname = nickname.into();
        s
    }

    /// Rebuild `numeric_table` for the current `server.daemon`, and mark the
    /// state dirty. Called whenever `daemon` changes (spec §4.1, §5: "the
    /// daemon table swap performed by MYINFO must be visible immediately to
    /// subsequent parseTypestring numeric lookups").
    pub fn set_daemon(&mut self, daemon: Daemon) {
        if self.server.daemon != daemon {
            self.server.daemon = daemon;
            self.numeric_table = typenums_of(daemon);
            self.updated = true;
        }
    }

    /// Fetch (creating if absent) the channel record for `name`, keyed by
    /// case-folded name per `server.case_mapping`. Channel records are
    /// created on first reference (spec §3 Lifetimes).
    pub fn channel_mut(&mut self, name: &str) -> &mut Channel {
        let key = self.server.case_mapping.to_lower(name);
        self.channels.entry(key).or_default()
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        let key = self.server.case_mapping.to_lower(name);
        self.channels.get(&key)
    }

    /// Destroy a channel record, per spec §3 Lifetimes ("destroyed on
    /// SELFPART or disconnect").
    pub fn forget_channel(&mut self, name: &str) {
        let key = self.server.case_mapping.to_lower(name);
        self.channels.remove(&key);
    }

    pub fn is_self(&self, nickname: &str) -> bool {
        self.server.case_mapping.eq(&self.client.nickname, nickname)
    }
}
