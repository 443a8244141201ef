//! Sender Classifier: layered heuristics deciding whether a sender is an
//! ordinary user or server/services/staff/bot infrastructure, per spec
//! §4.7.

use crate::daemon::Daemon;
use crate::event::UserRecord;
use crate::state::ServerState;

/// Case-insensitive known-services nicknames (spec §4.7). Table-driven
/// rather than hard-coded into control flow, per spec §9's design note.
const KNOWN_SERVICES: &[&str] = &[
    "nickserv",
    "chanserv",
    "operserv",
    "saslserv",
    "memoserv",
    "hostserv",
    "botserv",
    "alis",
    "chanfix",
    "c",
    "spamserv",
    "global",
    "helpserv",
    "statserv",
    "userserv",
    "gameserv",
    "groupserv",
    "infoserv",
    "reportserv",
    "moraleserv",
];

/// A compound services identity: nickname plus the ident/address that must
/// also match for the nickname to count (spec §4.7: "compound cases `q`
/// ident=TheQBot address=CServe.quakenet.org and `authserv`
/// ident=AuthServ address=Services.GameSurge.net").
struct CompoundService {
    nickname: &'static str,
    ident: &'static str,
    address: &'static str,
}

const COMPOUND_SERVICES: &[CompoundService] = &[
    CompoundService {
        nickname: "q",
        ident: "TheQBot",
        address: "CServe.quakenet.org",
    },
    CompoundService {
        nickname: "authserv",
        ident: "AuthServ",
        address: "Services.GameSurge.net",
    },
];

/// Narrower subset of [`COMPOUND_SERVICES`]/[`KNOWN_SERVICES`] recognised by
/// [`is_from_auth_service`]: nickserv, saslserv, q, authserv — explicitly
/// excluding ChanServ and the rest of the generic services set (spec §4.7:
/// "generic services like ChanServ return false").
const AUTH_SERVICE_NICKS: &[&str] = &["nickserv", "saslserv"];

fn trailing_labels_shared(a: &str, b: &str) -> usize {
    let a_labels: Vec<&str> = a.rsplit('.').collect();
    let b_labels: Vec<&str> = b.rsplit('.').collect();
    a_labels
        .iter()
        .zip(b_labels.iter())
        .take_while(|(x, y)| x.eq_ignore_ascii_case(y))
        .count()
}

fn compound_match(sender: &UserRecord) -> bool {
    COMPOUND_SERVICES.iter().any(|svc| {
        sender.nickname.eq_ignore_ascii_case(svc.nickname)
            && sender.ident.eq_ignore_ascii_case(svc.ident)
            && sender.address.eq_ignore_ascii_case(svc.address)
    })
}

/// True if `sender` should be classified [`crate::event::SenderClass::Special`],
/// per spec §4.7's four OR-conditions.
pub fn is_special(sender: &UserRecord, server: &ServerState) -> bool {
    if sender.address == server.address
        || sender.address == server.resolved_address
        || sender.address == "services."
    {
        return true;
    }

    let lower_nick = sender.nickname.to_ascii_lowercase();
    if KNOWN_SERVICES.contains(&lower_nick.as_str()) || compound_match(sender) {
        return true;
    }

    if server.daemon != Daemon::Twitch
        && !sender.address.is_empty()
        && (trailing_labels_shared(&sender.address, &server.address) >= 2
            || trailing_labels_shared(&sender.address, &server.resolved_address) >= 2)
    {
        return true;
    }

    if sender.address.contains("/staff/") {
        return true;
    }

    false
}

/// Narrower than [`is_special`]: only fires for the services identities a
/// NOTICE's authentication-promotion logic (spec §4.6's onNotice) should
/// trust — nickserv/saslserv/q/authserv under matching ident/address
/// constraints. Generic services (ChanServ included) return `false` even
/// though `is_special` would call them special — this asymmetry is
/// intentional (spec §4.7, §9 Open Questions).
pub fn is_from_auth_service(sender: &UserRecord) -> bool {
    let lower_nick = sender.nickname.to_ascii_lowercase();
    AUTH_SERVICE_NICKS.contains(&lower_nick.as_str()) || compound_match(sender)
}
