//! The IRC server software ("daemon") a connection is talking to.
//!
//! Correct numeric dispatch and mode-class defaults depend on which daemon is
//! on the other end. The daemon is inferred from [`RPL_MYINFO`](crate::event::EventKind::RplMyinfo)
//! (004) and refined by [`RPL_ISUPPORT`](crate::event::EventKind::RplIsupport) (005)'s `NETWORK` token;
//! see [`crate::isupport`].

/// Closed enumeration of recognised IRC daemons.
///
/// `Unknown` is the default for anything that doesn't match a known
/// substring; `Unset` is the initial value before any `MYINFO` has been
/// seen. Both use the base (RFC-only) numeric table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Daemon {
    #[default]
    Unset,
    Unknown,
    Unreal,
    InspIrcd,
    Bahamut,
    Ratbox,
    Hybrid,
    Ircu,
    Snircd,
    Nefarious,
    RusNet,
    Charybdis,
    IrcdSeven,
    IrcNet,
    Twitch,
    U2,
    Rizon,
    SorIrcd,
}

impl Daemon {
    /// Infer a daemon from the free-form version string carried in
    /// `RPL_MYINFO`'s third argument, substring-matching a fixed list of
    /// infix tokens (case-insensitive), per spec §4.6.
    ///
    /// `server_address` refines `hybrid` to `rizon` when the server name
    /// contains `.rizon.`, matching the source behaviour.
    pub fn infer_from_myinfo(daemon_string: &str, server_address: &str) -> Daemon {
        let lower = daemon_string.to_ascii_lowercase();
        let addr_lower = server_address.to_ascii_lowercase();

        let guess = if lower.contains("unreal") {
            Daemon::Unreal
        } else if lower.contains("inspircd") {
            Daemon::InspIrcd
        } else if lower.contains("snircd") {
            Daemon::Snircd
        } else if lower.contains("u2.") {
            Daemon::U2
        } else if lower.contains("bahamut") {
            Daemon::Bahamut
        } else if lower.contains("hybrid") {
            Daemon::Hybrid
        } else if lower.contains("ratbox") {
            Daemon::Ratbox
        } else if lower.contains("charybdis") {
            Daemon::Charybdis
        } else if lower.contains("ircd-seven") {
            Daemon::IrcdSeven
        } else {
            Daemon::Unknown
        };

        if guess == Daemon::Hybrid && addr_lower.contains(".rizon.") {
            Daemon::Rizon
        } else {
            guess
        }
    }

    /// Infer (or refine) a daemon from the `NETWORK` token of `RPL_ISUPPORT`.
    ///
    /// Only a handful of network names are strong enough signals to override
    /// whatever `MYINFO` already guessed.
    pub fn infer_from_network(network: &str) -> Option<Daemon> {
        match network {
            "RusNet" => Some(Daemon::RusNet),
            "IRCnet" => Some(Daemon::IrcNet),
            "Rizon" => Some(Daemon::Rizon),
            _ => None,
        }
    }
}
