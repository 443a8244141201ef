//! Sanity Postpass: scans the assembled event record and records
//! diagnostic strings into `errors`. Never drops or downgrades an event —
//! see spec §4.9.

use crate::event::Event;
use crate::state::ClientState;

/// `channel` types allowed to surface without a `chantypes`-prefixed value
/// (spec §4.9).
const CHANNEL_PREFIX_ALLOWLIST: &[&str] = &[
    "ERR_NOSUCHCHANNEL",
    "RPL_ENDOFWHO",
    "RPL_NAMREPLY",
    "RPL_ENDOFNAMES",
    "SELFJOIN",
    "SELFPART",
    "RPL_LIST",
];

/// Event-kind names (as produced by the dispatcher for diagnostic
/// purposes) allowed to legitimately target the client itself without
/// being a "redundant echo" (spec §4.9).
const SELF_TARGET_ALLOWLIST: &[&str] = &[
    "MODE",
    "QUERY",
    "JOIN",
    "SELFNICK",
    "RPL_WHOREPLY",
    "RPL_WHOISUSER",
    "RPL_WHOISCHANNELS",
    "RPL_WHOISSERVER",
    "RPL_WHOISHOST",
    "RPL_WHOISIDLE",
    "RPL_LOGGEDIN",
    "RPL_WHOISACCOUNT",
    "RPL_WHOISREGNICK",
    "RPL_ENDOFWHOIS",
];

/// Run every check against `event`, appending to `event.errors`. `kind_name`
/// is the dispatcher's diagnostic name for `event.kind` (spec §4.9's
/// allow-lists are expressed over names, not the Rust enum discriminant,
/// since several of them — e.g. `RPL_WHOISCHANNELS`/`SERVER`/`HOST`/`IDLE`
/// — are one spec entry covering several kinds).
pub fn run(event: &mut Event, client: &ClientState, chantypes: &str, kind_name: &str) {
    if event.target.nickname.contains(' ') {
        event
            .errors
            .push("target.nickname contains a space".to_string());
    }
    if event.channel.contains(' ') {
        event.errors.push("channel contains a space".to_string());
    }

    if let Some(first) = event.target.nickname.chars().next() {
        if chantypes.contains(first) {
            event.errors.push(
                "target.nickname starts with a chantypes character (possible misclassification)"
                    .to_string(),
            );
        }
    }

    if !event.channel.is_empty() {
        let starts_ok = event
            .channel
            .chars()
            .next()
            .is_some_and(|c| chantypes.contains(c));
        if !starts_ok && !CHANNEL_PREFIX_ALLOWLIST.contains(&kind_name) {
            event.errors.push(format!(
                "channel {:?} does not start with a chantypes character",
                event.channel
            ));
        }
    }

    if !event.target.nickname.is_empty()
        && event.target.nickname.eq_ignore_ascii_case(&client.nickname)
        && !SELF_TARGET_ALLOWLIST.contains(&kind_name)
    {
        event.target.nickname.clear();
    }
}
