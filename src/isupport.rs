//! `RPL_ISUPPORT` (005) and `RPL_MYINFO` (004) handling, per spec §4.6.
//!
//! `Isupport` parses the raw `KEY=VALUE` tokens out of a 005 line's params;
//! [`apply_isupport`] dispatches the recognised keys onto [`Session`],
//! mutating `server` and setting `updated`. [`apply_myinfo`] does the same
//! for 004's daemon-version-string inference.

use crate::casemap::CaseMapping;
use crate::daemon::Daemon;
use crate::state::Session;

/// One `KEY` or `KEY=VALUE` token from a 005 line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsupportEntry<'a> {
    pub key: &'a str,
    pub value: Option<&'a str>,
}

/// The parsed token list of a single `RPL_ISUPPORT` line, before dispatch.
#[derive(Debug, Clone, Default)]
pub struct Isupport<'a> {
    entries: Vec<IsupportEntry<'a>>,
}

impl<'a> Isupport<'a> {
    /// Parse every space-separated param token, stopping at the trailing
    /// `:are supported`-style free-text param (spec §4.6: "tokens without
    /// `=` are capability flags to be ignored by the core").
    pub fn parse_params(params: &[&'a str]) -> Isupport<'a> {
        let mut entries = Vec::new();
        for &tok in params {
            if tok.is_empty() {
                continue;
            }
            let (key, value) = match tok.split_once('=') {
                Some((k, v)) => (k, Some(v)),
                None => (tok, None),
            };
            entries.push(IsupportEntry { key, value });
        }
        Isupport { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &IsupportEntry<'a>> {
        self.entries.iter()
    }

    /// Last-match-wins lookup, since a single connection can resend 005
    /// with revised values.
    pub fn get(&self, key: &str) -> Option<Option<&'a str>> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key.eq_ignore_ascii_case(key))
            .map(|e| e.value)
    }
}

/// `(modes)prefixes`, e.g. `(ov)@+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixSpec<'a> {
    pub modes: &'a str,
    pub prefixes: &'a str,
}

impl<'a> PrefixSpec<'a> {
    pub fn parse(s: &'a str) -> Option<PrefixSpec<'a>> {
        if let Some(open) = s.find('(') {
            let close = s.find(')')?;
            Some(PrefixSpec {
                modes: &s[open + 1..close],
                prefixes: &s[close + 1..],
            })
        } else {
            None
        }
    }
}

/// The four comma-separated `CHANMODES` groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChanModes<'a> {
    pub a: &'a str,
    pub b: &'a str,
    pub c: &'a str,
    pub d: &'a str,
}

impl<'a> ChanModes<'a> {
    pub fn parse(s: &'a str) -> Option<ChanModes<'a>> {
        let mut parts = s.splitn(4, ',');
        Some(ChanModes {
            a: parts.next()?,
            b: parts.next()?,
            c: parts.next()?,
            d: parts.next().unwrap_or(""),
        })
    }
}

/// Apply a parsed `RPL_ISUPPORT` line's tokens to `session.server`, per
/// spec §4.6's onISUPPORT contract. Unknown keys are silently ignored.
/// Every successful mutation sets `session.updated`.
pub fn apply_isupport(session: &mut Session, params: &[&str]) {
    let table = Isupport::parse_params(params);
    for entry in table.iter() {
        match (
            entry.key.to_ascii_uppercase().as_str(),
            entry.value,
        ) {
            ("PREFIX", Some(value)) => {
                if let Some(spec) = PrefixSpec::parse(value) {
                    session.server.prefixes = spec.modes.to_string();
                    session.server.prefixchars =
                        spec.prefixes.chars().zip(spec.modes.chars()).collect();
                    session.updated = true;
                }
            }
            ("CHANTYPES", Some(value)) => {
                session.server.chantypes = value.to_string();
                session.updated = true;
            }
            ("CHANMODES", Some(value)) => {
                if let Some(cm) = ChanModes::parse(value) {
                    session.server.a_modes = cm.a.to_string();
                    session.server.b_modes = cm.b.to_string();
                    session.server.c_modes = cm.c.to_string();
                    session.server.d_modes = cm.d.to_string();
                    session.updated = true;
                }
            }
            ("NETWORK", Some(value)) => {
                session.server.network = value.to_string();
                if let Some(daemon) = Daemon::infer_from_network(value) {
                    session.set_daemon(daemon);
                }
                session.updated = true;
            }
            ("NICKLEN", Some(value)) => {
                if let Ok(n) = value.parse() {
                    session.server.max_nick_length = n;
                    session.updated = true;
                }
            }
            ("CHANNELLEN", Some(value)) => {
                if let Ok(n) = value.parse() {
                    session.server.max_channel_length = n;
                    session.updated = true;
                }
            }
            ("CASEMAPPING", Some(value)) => {
                session.server.case_mapping = CaseMapping::parse(value);
                session.updated = true;
            }
            ("EXTBAN", Some(value)) => {
                let mut parts = value.splitn(2, ',');
                let prefix = parts.next().unwrap_or("$");
                session.server.extban_prefix = prefix.chars().next().unwrap_or('$');
                session.server.extban_types = parts.next().unwrap_or("").to_string();
                session.updated = true;
            }
            ("EXCEPTS", value) => {
                session.server.excepts_char = value.and_then(|v| v.chars().next()).unwrap_or('e');
                session.updated = true;
            }
            ("INVEX", value) => {
                session.server.invex_char = value.and_then(|v| v.chars().next()).unwrap_or('I');
                session.updated = true;
            }
            _ => {}
        }
    }
}

/// Apply `RPL_MYINFO`'s daemon-version-string inference to
/// `session.server`, per spec §4.6's onMyInfo contract.
pub fn apply_myinfo(session: &mut Session, daemon_string: &str, server_address: &str) {
    session.server.daemonstring = daemon_string.to_string();
    if daemon_string == "-" && server_address.ends_with(".twitch.tv") {
        session.server.max_nick_length = 25;
        session.server.prefixes = "o".to_string();
        session.server.prefixchars = std::collections::HashMap::from([('@', 'o')]);
        session.server.network = "Twitch".to_string();
        session.set_daemon(Daemon::Twitch);
        session.updated = true;
        return;
    }
    let daemon = Daemon::infer_from_myinfo(daemon_string, server_address);
    session.set_daemon(daemon);
    session.updated = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_isupport_tokens_skipping_trailing_free_text() {
        let params = ["CHANTYPES=#", "PREFIX=(ov)@+", "NETWORK=freenode"];
        let table = Isupport::parse_params(&params);
        assert_eq!(table.get("CHANTYPES"), Some(Some("#")));
        assert_eq!(table.get("NETWORK"), Some(Some("freenode")));
    }

    #[test]
    fn prefix_spec_parses_modes_and_prefixes() {
        let spec = PrefixSpec::parse("(ov)@+").unwrap();
        assert_eq!(spec.modes, "ov");
        assert_eq!(spec.prefixes, "@+");
    }

    #[test]
    fn chanmodes_splits_four_groups() {
        let cm = ChanModes::parse("eIbq,k,flj,CFLMPQScgimnprstz").unwrap();
        assert_eq!(cm.a, "eIbq");
        assert_eq!(cm.b, "k");
        assert_eq!(cm.c, "flj");
        assert_eq!(cm.d, "CFLMPQScgimnprstz");
    }

    #[test]
    fn apply_isupport_matches_scenario_4() {
        let mut session = Session::new("nyxbot^");
        let params = [
            "CHANTYPES=#",
            "PREFIX=(ov)@+",
            "CHANMODES=eIbq,k,flj,CFLMPQScgimnprstz",
            "NETWORK=freenode",
            "NICKLEN=16",
            "CASEMAPPING=rfc1459",
        ];
        apply_isupport(&mut session, &params);
        assert_eq!(session.server.chantypes, "#");
        assert_eq!(session.server.prefixes, "ov");
        assert_eq!(session.server.prefixchars[&'@'], 'o');
        assert_eq!(session.server.prefixchars[&'+'], 'v');
        assert_eq!(session.server.a_modes, "eIbq");
        assert_eq!(session.server.b_modes, "k");
        assert_eq!(session.server.c_modes, "flj");
        assert_eq!(session.server.d_modes, "CFLMPQScgimnprstz");
        assert_eq!(session.server.network, "freenode");
        assert_eq!(session.server.max_nick_length, 16);
        assert_eq!(session.server.case_mapping, CaseMapping::Rfc1459);
        assert!(session.updated);
    }

    #[test]
    fn apply_isupport_satisfies_invariant() {
        let mut session = Session::new("bot");
        apply_isupport(&mut session, &["PREFIX=(ov)@+", "CHANTYPES=#"]);
        assert_eq!(
            session.server.prefixes.len(),
            session.server.prefixchars.len()
        );
        assert!(!session.server.chantypes.is_empty());
    }

    #[test]
    fn apply_myinfo_infers_twitch_special_case() {
        let mut session = Session::new("bot");
        apply_myinfo(&mut session, "-", "tmi.twitch.tv");
        assert_eq!(session.server.daemon, Daemon::Twitch);
        assert_eq!(session.server.max_nick_length, 25);
        assert_eq!(session.server.prefixchars[&'@'], 'o');
        assert_eq!(session.server.network, "Twitch");
    }

    #[test]
    fn apply_myinfo_infers_rizon_from_hybrid_and_address() {
        let mut session = Session::new("bot");
        apply_myinfo(&mut session, "hybrid-7.2.3+rizon", "irc.rizon.net");
        assert_eq!(session.server.daemon, Daemon::Rizon);
    }

    #[test]
    fn unknown_isupport_keys_are_ignored() {
        let mut session = Session::new("bot");
        apply_isupport(&mut session, &["FROBNICATE=1"]);
        assert!(!session.updated);
    }
}
